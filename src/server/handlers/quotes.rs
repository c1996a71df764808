use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, QuoteAPI};
use crate::entities::TripOption;
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct FetchParams {
    customer_id: String,
    origin: String,
    destination: String,
}

pub async fn fetch(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<FetchParams>,
) -> Result<Json<Vec<TripOption>>, Error> {
    let options = api
        .fetch_quotes(params.customer_id, params.origin, params.destination)
        .await?;

    Ok(options.into())
}
