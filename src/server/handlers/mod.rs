pub mod quotes;
pub mod routes;
pub mod trips;
