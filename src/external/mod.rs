pub mod google_maps;
pub mod ride_api;

pub use google_maps::GoogleMaps;
pub use ride_api::RideApi;
