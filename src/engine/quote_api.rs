use super::{with_retries, Engine, QuoteCache};

use async_trait::async_trait;

use crate::{
    api::QuoteAPI,
    entities::TripOption,
    error::{invalid_input_error, Error},
};

#[async_trait]
impl QuoteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn fetch_quotes(
        &self,
        customer_id: String,
        origin: String,
        destination: String,
    ) -> Result<Vec<TripOption>, Error> {
        let (customer_id, origin, destination) =
            (customer_id.trim(), origin.trim(), destination.trim());

        if customer_id.is_empty() || origin.is_empty() || destination.is_empty() {
            return Err(invalid_input_error(
                "customer id, origin and destination are required",
            ));
        }

        let key = QuoteCache::key(origin, destination);

        if let Some(options) = self.quote_cache.get(&key).await {
            tracing::info!(%key, "serving quotes from cache");
            return Ok(options);
        }

        let rides = &self.rides;
        let options = with_retries(self.max_retries, self.backoff.as_ref(), move || {
            rides.estimate(customer_id, origin, destination)
        })
        .await?;

        if options.is_empty() {
            tracing::info!(%key, "no trip options available");
            return Ok(options);
        }

        tracing::info!(%key, options = options.len(), "caching quotes");

        Ok(self.quote_cache.insert(key, options).await)
    }
}
