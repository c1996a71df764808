use super::{helpers, Engine};

use async_trait::async_trait;

use crate::{
    api::RouteAPI,
    entities::{GeoPoint, MatrixEntry, Place, RouteResult},
    error::Error,
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn resolve_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RouteResult, Error> {
        helpers::resolve_route(&self.maps, origin, destination).await
    }

    #[tracing::instrument(skip(self, places))]
    async fn resolve_matrix(&self, places: Vec<Place>) -> Result<Vec<MatrixEntry>, Error> {
        let mut distinct: Vec<Place> = Vec::with_capacity(places.len());

        for place in places {
            place.location.validate()?;

            if !distinct.contains(&place) {
                distinct.push(place);
            }
        }

        let expected = distinct.len() * distinct.len().saturating_sub(1);

        if expected == 0 {
            return Ok(vec![]);
        }

        // every pair task reports through the channel; only this task touches
        // the accumulated results
        let (sender, receiver) = async_channel::bounded(expected);

        for (i, origin) in distinct.iter().enumerate() {
            for (j, destination) in distinct.iter().enumerate() {
                if i == j {
                    continue;
                }

                let maps = self.maps.clone();
                let sender = sender.clone();
                let (origin, destination) = (origin.location, destination.location);

                tokio::spawn(async move {
                    let result = helpers::resolve_route(&maps, origin, destination).await;
                    sender.send((i, j, result)).await.ok();
                });
            }
        }

        drop(sender);

        let mut routes = Vec::with_capacity(expected);
        let mut settled = 0;

        while settled < expected {
            let (i, j, result) = match receiver.recv().await {
                Ok(message) => message,
                // every sender is gone, so the remaining tasks panicked
                Err(_) => break,
            };
            settled += 1;

            match result {
                Ok(route) => routes.push((i, j, route)),
                Err(err) => tracing::warn!(
                    origin = %distinct[i].display_name,
                    destination = %distinct[j].display_name,
                    error = %err,
                    "dropping pair from matrix"
                ),
            }
        }

        tracing::info!(expected, settled, resolved = routes.len(), "matrix resolved");

        routes.sort_by_key(|(i, j, _)| (*i, *j));

        Ok(routes
            .into_iter()
            .map(|(i, j, route)| MatrixEntry {
                origin: distinct[i].clone(),
                destination: distinct[j].clone(),
                route,
            })
            .collect())
    }
}
