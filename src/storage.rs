use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::nutrition::{DailyLog, Food, MacroGoalSettings};

pub const FOODS_FILE: &str = "foods.json";
pub const DAILY_LOGS_FILE: &str = "daily-logs.json";
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed json in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistence for the three record collections.
///
/// Reads always go to the backing medium; nothing is cached between calls.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn foods(&self) -> Result<Vec<Food>, StoreError>;
    async fn save_foods(&self, foods: &[Food]) -> Result<(), StoreError>;
    async fn daily_logs(&self) -> Result<Vec<DailyLog>, StoreError>;
    async fn save_daily_logs(&self, logs: &[DailyLog]) -> Result<(), StoreError>;
    async fn settings(&self) -> Result<MacroGoalSettings, StoreError>;
    async fn save_settings(&self, settings: &MacroGoalSettings) -> Result<(), StoreError>;
    /// Copy the current daily logs aside. Returns where the copy went, or
    /// `None` when there was nothing to copy.
    async fn backup_daily_logs(&self) -> Result<Option<String>, StoreError>;
}

/// Pretty printed JSON files in a single data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create the directory and any missing collection file.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| io_err(&dir, e))?;
        let store = Self { dir };

        store.init_file(FOODS_FILE, &Vec::<Food>::new()).await?;
        store.init_file(DAILY_LOGS_FILE, &Vec::<DailyLog>::new()).await?;
        store.init_file(SETTINGS_FILE, &MacroGoalSettings::default()).await?;

        info!(dir = %store.dir.display(), "data directory ready");
        Ok(store)
    }

    async fn init_file<T: Serialize + Sync>(&self, name: &str, empty: &T) -> Result<(), StoreError> {
        let path = self.dir.join(name);
        let exists = tokio::fs::try_exists(&path).await.map_err(|e| io_err(&path, e))?;
        if !exists {
            info!(path = %path.display(), "creating data file");
            self.write_json(name, empty).await?;
        }
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        name: &str,
        missing: impl FnOnce() -> T + Send,
    ) -> Result<T, StoreError> {
        let path = self.dir.join(name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "data file missing; using empty value");
                return Ok(missing());
            }
            Err(e) => return Err(io_err(&path, e)),
        };
        debug!(path = %path.display(), len = bytes.len(), "read data file");
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Write through a sibling temp file and rename it into place.
    async fn write_json<T: Serialize + ?Sized + Sync>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!("{name}.tmp"));
        let body = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json {
            path: path.display().to_string(),
            source,
        })?;
        tokio::fs::write(&tmp, &body).await.map_err(|e| io_err(&tmp, e))?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| io_err(&path, e))?;
        debug!(path = %path.display(), len = body.len(), "wrote data file");
        Ok(())
    }
}

#[async_trait]
impl DataStore for JsonFileStore {
    async fn foods(&self) -> Result<Vec<Food>, StoreError> {
        self.read_json(FOODS_FILE, Vec::new).await
    }

    async fn save_foods(&self, foods: &[Food]) -> Result<(), StoreError> {
        self.write_json(FOODS_FILE, foods).await
    }

    async fn daily_logs(&self) -> Result<Vec<DailyLog>, StoreError> {
        self.read_json(DAILY_LOGS_FILE, Vec::new).await
    }

    async fn save_daily_logs(&self, logs: &[DailyLog]) -> Result<(), StoreError> {
        self.write_json(DAILY_LOGS_FILE, logs).await
    }

    async fn settings(&self) -> Result<MacroGoalSettings, StoreError> {
        self.read_json(SETTINGS_FILE, MacroGoalSettings::default).await
    }

    async fn save_settings(&self, settings: &MacroGoalSettings) -> Result<(), StoreError> {
        self.write_json(SETTINGS_FILE, settings).await
    }

    async fn backup_daily_logs(&self) -> Result<Option<String>, StoreError> {
        let src = self.dir.join(DAILY_LOGS_FILE);
        if !tokio::fs::try_exists(&src).await.map_err(|e| io_err(&src, e))? {
            return Ok(None);
        }
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let dst = self.dir.join(format!("daily-logs-backup-{millis}.json"));
        tokio::fs::copy(&src, &dst).await.map_err(|e| io_err(&dst, e))?;
        info!(backup = %dst.display(), "backed up daily logs");
        Ok(Some(dst.display().to_string()))
    }
}

fn io_err(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
pub(crate) use memory::InMemoryStore;
