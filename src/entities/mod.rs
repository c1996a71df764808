mod location;
mod place;
mod quote;
mod route;
mod trip;

pub use location::GeoPoint;
pub use place::Place;
pub use quote::{TripOption, TripPlan};
pub use route::{MatrixEntry, RouteResult};
pub use trip::{Confirmation, ConfirmationRequest, Trip};
