use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::entities::TripOption;
use crate::error::Error;

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A confirmed trip as kept in the local history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub date: String,
    #[serde(rename = "driverName")]
    pub driver_name: String,
    pub origin: String,
    pub destination: String,
    pub duration: String,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    #[serde(rename = "value")]
    pub fare_value: f64,
}

impl Trip {
    pub fn new(request: &ConfirmationRequest) -> Self {
        Self {
            date: Local::now().format(DATE_FORMAT).to_string(),
            driver_name: request.option.name.clone(),
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            duration: request.duration.clone(),
            distance_km: request.distance_km,
            fare_value: request.option.fare_value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub customer_id: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub duration: String,
    pub option: TripOption,
}

impl ConfirmationRequest {
    pub fn has_sufficient_data(&self) -> bool {
        !self.origin.trim().is_empty() && !self.destination.trim().is_empty() && self.distance_km > 0.0
    }
}

/// Outcome of an accepted confirmation. The trip is handed back even when it
/// could not be written to the history so the caller can store it later.
#[derive(Clone, Debug)]
pub struct Confirmation {
    pub trip: Trip,
    pub history_error: Option<Error>,
}

impl Confirmation {
    pub fn is_recorded(&self) -> bool {
        self.history_error.is_none()
    }
}
