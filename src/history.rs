use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::{
    entities::Trip,
    error::{persistence_error, Error},
};

const NAMESPACE: &str = "trip_history";

#[async_trait]
pub trait TripHistory {
    /// Appends `trip` after every trip already recorded.
    async fn append(&self, trip: &Trip) -> Result<(), Error>;

    /// Every recorded trip in insertion order; empty when nothing was saved yet.
    async fn load_all(&self) -> Result<Vec<Trip>, Error>;
}

#[derive(Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    trips: Vec<Trip>,
}

/// Trip history kept as a single JSON document under `{dir}/trip_history.json`.
/// Each append rewrites the whole document through a temporary file.
#[derive(Debug)]
pub struct FileTripHistory {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTripHistory {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", NAMESPACE)),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Document, Error> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Document::default()),
            Err(err) => return Err(persistence_error(err)),
        };

        if data.trim().is_empty() {
            return Ok(Document::default());
        }

        serde_json::from_str(&data).map_err(|err| {
            tracing::error!(path = %self.path.display(), error = %err, "trip history is corrupt");
            persistence_error(err)
        })
    }

    async fn write(&self, document: &Document) -> Result<(), Error> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let data = serde_json::to_vec_pretty(document).map_err(persistence_error)?;
        let staging = self.path.with_extension("json.tmp");

        tokio::fs::write(&staging, data).await?;

        if let Err(err) = tokio::fs::rename(&staging, &self.path).await {
            tokio::fs::remove_file(&staging).await.ok();
            return Err(err.into());
        }

        Ok(())
    }
}

#[async_trait]
impl TripHistory for FileTripHistory {
    #[tracing::instrument(skip(self))]
    async fn append(&self, trip: &Trip) -> Result<(), Error> {
        let _guard = self.lock.lock().await;

        let mut document = self.read().await?;
        document.trips.push(trip.clone());
        self.write(&document).await?;

        tracing::info!(trips = document.trips.len(), "trip saved to history");

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn load_all(&self) -> Result<Vec<Trip>, Error> {
        let _guard = self.lock.lock().await;

        Ok(self.read().await?.trips)
    }
}
