use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{
    Confirmation, ConfirmationRequest, GeoPoint, MatrixEntry, Place, RouteResult, Trip,
    TripOption, TripPlan,
};
use crate::error::Error;

#[async_trait]
pub trait RouteAPI {
    async fn resolve_route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RouteResult, Error>;

    /// Routes for every ordered pair of distinct places. Pairs that fail are
    /// left out.
    async fn resolve_matrix(&self, places: Vec<Place>) -> Result<Vec<MatrixEntry>, Error>;
}

#[async_trait]
pub trait QuoteAPI {
    async fn fetch_quotes(
        &self,
        customer_id: String,
        origin: String,
        destination: String,
    ) -> Result<Vec<TripOption>, Error>;
}

#[async_trait]
pub trait TripAPI {
    async fn plan_trip(
        &self,
        customer_id: String,
        origin: Place,
        destination: Place,
    ) -> Result<TripPlan, Error>;

    async fn submit_confirmation(&self, request: &ConfirmationRequest) -> Result<(), Error>;

    async fn confirm_trip(&self, request: ConfirmationRequest) -> Result<Confirmation, Error>;

    async fn list_trips(&self) -> Result<Vec<Trip>, Error>;
}

pub trait API: RouteAPI + QuoteAPI + TripAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
