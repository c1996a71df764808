use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, RouteAPI};
use crate::entities::{GeoPoint, MatrixEntry, Place, RouteResult};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct ResolveParams {
    origin: GeoPoint,
    destination: GeoPoint,
}

#[derive(Serialize, Deserialize)]
pub struct MatrixParams {
    places: Vec<Place>,
}

pub async fn resolve(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<ResolveParams>,
) -> Result<Json<RouteResult>, Error> {
    let route = api.resolve_route(params.origin, params.destination).await?;

    Ok(route.into())
}

pub async fn matrix(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<MatrixParams>,
) -> Result<Json<Vec<MatrixEntry>>, Error> {
    let entries = api.resolve_matrix(params.places).await?;

    Ok(entries.into())
}
