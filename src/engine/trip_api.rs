use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{QuoteAPI, RouteAPI, TripAPI},
    entities::{Confirmation, ConfirmationRequest, Place, Trip, TripPlan},
    error::{insufficient_data_error, superseded_error, Error},
};

#[async_trait]
impl TripAPI for Engine {
    /// Resolves the route and fetches quotes side by side. A plan overtaken by
    /// a newer call is discarded when it completes.
    #[tracing::instrument(skip(self))]
    async fn plan_trip(
        &self,
        customer_id: String,
        origin: Place,
        destination: Place,
    ) -> Result<TripPlan, Error> {
        origin.location.validate()?;
        destination.location.validate()?;

        let generation = self.next_generation();

        let (route, options) = futures::join!(
            self.resolve_route(origin.location, destination.location),
            self.fetch_quotes(
                customer_id,
                origin.location.into(),
                destination.location.into(),
            ),
        );

        let current = self.current_generation();

        if current != generation {
            tracing::info!(generation, current, "discarding stale trip plan");
            return Err(superseded_error(generation));
        }

        Ok(TripPlan {
            generation,
            route: route?,
            options: options?,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn submit_confirmation(&self, request: &ConfirmationRequest) -> Result<(), Error> {
        if !request.has_sufficient_data() {
            return Err(insufficient_data_error());
        }

        self.rides.confirm(request).await
    }

    /// Confirms with the backend, then records the trip. Failing to record it
    /// is reported on the returned confirmation, never as an error.
    #[tracing::instrument(skip(self))]
    async fn confirm_trip(&self, request: ConfirmationRequest) -> Result<Confirmation, Error> {
        self.submit_confirmation(&request).await?;

        tracing::info!(driver = %request.option.name, "trip confirmed");

        let trip = Trip::new(&request);

        let history_error = match self.history.append(&trip).await {
            Ok(()) => None,
            Err(err) => {
                tracing::error!(error = %err, "confirmed trip could not be saved to history");
                Some(err)
            }
        };

        Ok(Confirmation {
            trip,
            history_error,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn list_trips(&self) -> Result<Vec<Trip>, Error> {
        self.history.load_all().await
    }
}
