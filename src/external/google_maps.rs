use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    config::base_url,
    entities::GeoPoint,
    error::{malformed_response_error, no_route_found_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionsRoute {
    pub overview_polyline: OverviewPolyline,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Leg {
    pub distance: Option<TextValue>,
    pub duration: Option<TextValue>,
}

/// Human-readable text plus the raw value (metres or seconds).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextValue {
    pub text: Option<String>,
    pub value: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    status: Option<String>,
    routes: Option<Vec<DirectionsRoute>>,
}

#[derive(Clone)]
pub struct GoogleMaps {
    client: Client,
    api_base: String,
    api_key: String,
}

impl GoogleMaps {
    pub fn new(client: Client, api_base: &str, api_key: &str) -> Self {
        Self {
            client,
            api_base: base_url(api_base),
            api_key: api_key.to_string(),
        }
    }

    /// Returns the first route the directions provider offers between the two
    /// points.
    #[tracing::instrument(skip(self))]
    pub async fn find_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<DirectionsRoute, Error> {
        let origin: String = origin.into();
        let destination: String = destination.into();

        let url = format!("{}/maps/api/directions/json", self.api_base);

        let res = self
            .client
            .get(url)
            .query(&[("origin", origin)])
            .query(&[("destination", destination)])
            .query(&[("key", &self.api_key)])
            .send()
            .await?;

        let status = res.status();

        if !status.is_success() {
            tracing::warn!(%status, "directions provider returned an error status");
            return Err(no_route_found_error());
        }

        let body = res.text().await?;
        let data: Response = serde_json::from_str(&body).map_err(malformed_response_error)?;

        if let Some(provider_status) = data.status.as_deref().filter(|s| *s != "OK") {
            tracing::warn!(provider_status, "directions provider found no route");
            return Err(no_route_found_error());
        }

        data.routes
            .and_then(|routes| routes.into_iter().next())
            .ok_or_else(no_route_found_error)
    }
}
