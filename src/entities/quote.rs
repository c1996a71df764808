use serde::{Deserialize, Serialize};

use crate::entities::RouteResult;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripOption {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub vehicle: String,
    pub rating: f64,
    pub comment: String,
    pub fare_value: f64,
}

/// Route and quotes gathered for one origin/destination request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub generation: u64,
    pub route: RouteResult,
    pub options: Vec<TripOption>,
}
