use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, TripAPI};
use crate::entities::{ConfirmationRequest, Place, Trip, TripPlan};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct PlanParams {
    customer_id: String,
    origin: Place,
    destination: Place,
}

#[derive(Serialize, Deserialize)]
pub struct ConfirmResponse {
    trip: Trip,
    recorded: bool,
    history_error: Option<String>,
}

pub async fn plan(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<PlanParams>,
) -> Result<Json<TripPlan>, Error> {
    let plan = api
        .plan_trip(params.customer_id, params.origin, params.destination)
        .await?;

    Ok(plan.into())
}

pub async fn confirm(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<ConfirmationRequest>,
) -> Result<Json<ConfirmResponse>, Error> {
    let confirmation = api.confirm_trip(request).await?;

    Ok(ConfirmResponse {
        recorded: confirmation.is_recorded(),
        history_error: confirmation.history_error.map(|err| err.to_string()),
        trip: confirmation.trip,
    }
    .into())
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Trip>>, Error> {
    let trips = api.list_trips().await?;

    Ok(trips.into())
}
