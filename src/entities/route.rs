use geo_types::LineString;
use serde::{Deserialize, Serialize};

use crate::entities::{GeoPoint, Place};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub distance_text: String,
    pub duration_text: String,
    pub path: Vec<GeoPoint>,
    pub distance_km: f64,
}

impl RouteResult {
    /// Path in the shape the map renderer draws as a polyline.
    pub fn line_string(&self) -> LineString<f64> {
        self.path
            .iter()
            .map(|point| (point.longitude, point.latitude))
            .collect::<Vec<_>>()
            .into()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub origin: Place,
    pub destination: Place,
    pub route: RouteResult,
}
