use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    config::base_url,
    entities::{ConfirmationRequest, TripOption},
    error::{
        confirmation_failed_error, confirmation_rejected_error, driver_not_found_error,
        invalid_data_error, invalid_distance_error, malformed_response_error, network_error,
        unknown_confirmation_error, Error,
    },
};

#[derive(Clone, Debug, Serialize, Deserialize)]
struct EstimateResponse {
    options: Option<Vec<EstimateOption>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct EstimateOption {
    id: i64,
    name: String,
    description: String,
    vehicle: String,
    review: Review,
    value: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Review {
    rating: f64,
    comment: String,
}

impl TryFrom<EstimateOption> for TripOption {
    type Error = Error;

    fn try_from(option: EstimateOption) -> Result<Self, Error> {
        if !(0.0..=5.0).contains(&option.review.rating) {
            return Err(malformed_response_error(format!(
                "option {} has rating {} outside 0-5",
                option.id, option.review.rating
            )));
        }

        if option.value <= 0.0 {
            return Err(malformed_response_error(format!(
                "option {} has non-positive fare {}",
                option.id, option.value
            )));
        }

        Ok(TripOption {
            id: option.id,
            name: option.name,
            description: option.description,
            vehicle: option.vehicle,
            rating: option.review.rating,
            comment: option.review.comment,
            fare_value: option.value,
        })
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct ConfirmResponse {
    #[serde(default)]
    success: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct ConfirmErrorResponse {
    error_code: Option<String>,
    error_description: Option<String>,
}

impl From<ConfirmErrorResponse> for Error {
    fn from(res: ConfirmErrorResponse) -> Self {
        let description = res.error_description.unwrap_or_default();

        match res.error_code.as_deref() {
            Some("INVALID_DISTANCE") => invalid_distance_error(description),
            Some("DRIVER_NOT_FOUND") => driver_not_found_error(description),
            Some("INVALID_DATA") => invalid_data_error(description),
            _ => unknown_confirmation_error(description),
        }
    }
}

/// Client for the ride backend's estimate and confirm endpoints.
#[derive(Clone)]
pub struct RideApi {
    client: Client,
    api_base: String,
}

impl RideApi {
    pub fn new(client: Client, api_base: &str) -> Self {
        Self {
            client,
            api_base: base_url(api_base),
        }
    }

    /// One estimate attempt. Transport failures and error statuses come back
    /// as network errors, unparseable bodies as malformed responses.
    #[tracing::instrument(skip(self))]
    pub async fn estimate(
        &self,
        customer_id: &str,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<TripOption>, Error> {
        let url = format!("{}/ride/estimate", self.api_base);

        let res = self
            .client
            .post(url)
            .json(&json!({
                "customer_id": customer_id,
                "origin": origin,
                "destination": destination,
            }))
            .send()
            .await?;

        let status = res.status();

        if !status.is_success() {
            return Err(network_error(format!("quoting backend returned {}", status)));
        }

        let body = res.text().await?;
        let data: EstimateResponse = serde_json::from_str(&body).map_err(malformed_response_error)?;

        data.options
            .unwrap_or_default()
            .into_iter()
            .map(TripOption::try_from)
            .collect()
    }

    /// Submits the chosen option exactly once.
    #[tracing::instrument(skip(self))]
    pub async fn confirm(&self, request: &ConfirmationRequest) -> Result<(), Error> {
        let url = format!("{}/ride/confirm", self.api_base);

        let res = self
            .client
            .patch(url)
            .json(&json!({
                "customer_id": request.customer_id,
                "origin": request.origin,
                "destination": request.destination,
                "distance": request.distance_km,
                "duration": request.duration,
                "driver": {
                    "id": request.option.id,
                    "name": request.option.name,
                },
                "value": request.option.fare_value,
            }))
            .send()
            .await
            .map_err(|err| confirmation_failed_error(err.without_url()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| confirmation_failed_error(err.without_url()))?;

        if !status.is_success() {
            tracing::warn!(%status, body = %body, "confirmation backend returned an error status");

            return Err(match serde_json::from_str::<ConfirmErrorResponse>(&body) {
                Ok(res) => res.into(),
                Err(_) => unknown_confirmation_error(body),
            });
        }

        let data: ConfirmResponse = serde_json::from_str(&body).unwrap_or_default();

        if !data.success {
            return Err(confirmation_rejected_error());
        }

        Ok(())
    }
}
