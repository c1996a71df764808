use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::entities::TripOption;

/// Quotes already fetched this session, keyed by normalized origin and
/// destination. Entries live until the engine is dropped.
#[derive(Debug, Default)]
pub struct QuoteCache {
    entries: Mutex<HashMap<String, Vec<TripOption>>>,
}

impl QuoteCache {
    pub fn key(origin: &str, destination: &str) -> String {
        format!("{}_{}", normalize(origin), normalize(destination))
    }

    pub async fn get(&self, key: &str) -> Option<Vec<TripOption>> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Stores `options` unless a concurrent fetch already filled the key, and
    /// returns whichever list is cached.
    pub async fn insert(&self, key: String, options: Vec<TripOption>) -> Vec<TripOption> {
        self.entries
            .lock()
            .await
            .entry(key)
            .or_insert(options)
            .clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn option(id: i64, fare_value: f64) -> TripOption {
        TripOption {
            id,
            name: format!("driver {}", id),
            description: "sedan".into(),
            vehicle: "car".into(),
            rating: 4.0,
            comment: "ok".into(),
            fare_value,
        }
    }

    #[test]
    fn key_ignores_case_and_spacing() {
        assert_eq!(
            QuoteCache::key("  Av. Paulista,  1538 ", "OSASCO"),
            QuoteCache::key("av. paulista, 1538", "osasco")
        );
        assert_eq!(QuoteCache::key("a", "b"), "a_b");
    }

    #[tokio::test]
    async fn first_writer_wins() {
        let cache = QuoteCache::default();

        let stored = cache.insert("a_b".into(), vec![option(1, 10.0)]).await;
        assert_eq!(stored[0].id, 1);

        let stored = cache.insert("a_b".into(), vec![option(2, 12.0)]).await;
        assert_eq!(stored[0].id, 1);
        assert_eq!(cache.len().await, 1);

        cache.clear().await;
        assert!(cache.get("a_b").await.is_none());
    }

    #[tokio::test]
    async fn concurrent_inserts_keep_every_key() {
        let cache = Arc::new(QuoteCache::default());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move {
                    cache.insert(format!("origin{}_dest", i), vec![option(i, 5.0)]).await;
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len().await, 32);
    }
}
