use crate::{
    entities::{GeoPoint, RouteResult},
    error::{no_route_found_error, Error},
    external::{google_maps::DirectionsRoute, GoogleMaps},
    polyline,
};

const UNKNOWN: &str = "unknown";

#[tracing::instrument(skip(maps))]
pub async fn resolve_route(
    maps: &GoogleMaps,
    origin: GeoPoint,
    destination: GeoPoint,
) -> Result<RouteResult, Error> {
    origin.validate()?;
    destination.validate()?;

    let route = maps.find_route(origin, destination).await?;

    into_route_result(route, origin, destination)
}

/// Leg texts are passed through as the provider formatted them. The distance
/// falls back to a straight line when the provider leaves out the metres.
pub fn into_route_result(
    route: DirectionsRoute,
    origin: GeoPoint,
    destination: GeoPoint,
) -> Result<RouteResult, Error> {
    let path = polyline::decode(&route.overview_polyline.points)?;

    if path.is_empty() {
        return Err(no_route_found_error());
    }

    let leg = route.legs.into_iter().next();
    let distance = leg.as_ref().and_then(|leg| leg.distance.clone());
    let duration = leg.and_then(|leg| leg.duration);

    let distance_km = distance
        .as_ref()
        .and_then(|distance| distance.value)
        .map(|metres| metres / 1000.0)
        .unwrap_or_else(|| origin.haversine_km(&destination));

    Ok(RouteResult {
        distance_text: distance
            .and_then(|distance| distance.text)
            .unwrap_or_else(|| UNKNOWN.into()),
        duration_text: duration
            .and_then(|duration| duration.text)
            .unwrap_or_else(|| UNKNOWN.into()),
        path,
        distance_km,
    })
}
