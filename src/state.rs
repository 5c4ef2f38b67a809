use crate::config::AppConfig;
use crate::storage::{DataStore, JsonFileStore};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DataStore>,
    /// Held for the whole of a read-modify-write on the store.
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Arc::new(JsonFileStore::open(&config.data_dir).await?) as Arc<dyn DataStore>;
        Ok(Self::from_parts(config, store))
    }

    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn DataStore>) -> Self {
        Self {
            config,
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            data_dir: std::env::temp_dir(),
        });
        let store = Arc::new(crate::storage::InMemoryStore::default()) as Arc<dyn DataStore>;
        Self::from_parts(config, store)
    }
}
