use serde::{Deserialize, Serialize};

use crate::entities::GeoPoint;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub display_name: String,
    pub location: GeoPoint,
}

impl Place {
    pub fn new(display_name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            display_name: display_name.into(),
            location,
        }
    }
}
