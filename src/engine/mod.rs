mod helpers;
mod quote_api;
mod quote_cache;
mod retry;
mod route_api;
mod trip_api;

pub use quote_cache::{normalize, QuoteCache};
pub use retry::{with_retries, Attempt, Backoff, ExponentialBackoff, Immediate};

use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::{
    api::API,
    config::Config,
    error::{configuration_error, Error},
    external::{GoogleMaps, RideApi},
    history::{FileTripHistory, TripHistory},
};

pub type DynTripHistory = Arc<dyn TripHistory + Send + Sync>;

pub struct Engine {
    maps: GoogleMaps,
    rides: RideApi,
    quote_cache: QuoteCache,
    history: DynTripHistory,
    backoff: Box<dyn Backoff>,
    max_retries: u32,
    generation: AtomicU64,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(configuration_error)?;

        let backoff: Box<dyn Backoff> = if config.quote_retry_backoff.is_zero() {
            Box::new(Immediate)
        } else {
            Box::new(ExponentialBackoff::new(config.quote_retry_backoff))
        };

        tracing::info!(
            history_dir = %config.history_dir.display(),
            max_retries = config.quote_max_retries,
            "engine ready"
        );

        Ok(Self {
            maps: GoogleMaps::new(client.clone(), &config.maps_api_base, &config.maps_api_key),
            rides: RideApi::new(client, &config.ride_api_base),
            quote_cache: QuoteCache::default(),
            history: Arc::new(FileTripHistory::new(&config.history_dir)),
            backoff,
            max_retries: config.quote_max_retries,
            generation: AtomicU64::new(0),
        })
    }

    pub fn with_history(mut self, history: DynTripHistory) -> Self {
        self.history = history;
        self
    }

    pub fn with_backoff(mut self, backoff: impl Backoff + 'static) -> Self {
        self.backoff = Box::new(backoff);
        self
    }

    pub fn quote_cache(&self) -> &QuoteCache {
        &self.quote_cache
    }

    /// Tag of the most recent `plan_trip` call.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl API for Engine {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TripAPI;
    use std::time::Duration;
    use tokio_test::block_on;

    fn config(history_dir: &std::path::Path) -> Config {
        Config {
            maps_api_base: "maps.googleapis.com".into(),
            maps_api_key: "key".into(),
            ride_api_base: "http://127.0.0.1:8080".into(),
            history_dir: history_dir.to_path_buf(),
            request_timeout: Duration::from_secs(10),
            quote_max_retries: 3,
            quote_retry_backoff: Duration::from_millis(200),
            listen_addr: ([127, 0, 0, 1], 3000).into(),
        }
    }

    #[test]
    fn new_engine() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Engine::new(&config(dir.path())).unwrap();

        assert_eq!(engine.current_generation(), 0);
        assert_eq!(block_on(engine.quote_cache().len()), 0);
        assert!(block_on(engine.list_trips()).unwrap().is_empty());
    }
}
