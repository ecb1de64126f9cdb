use crate::config::AppConfig;
use crate::db::Db;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Ok(Self::new(config))
    }

    pub fn new(config: AppConfig) -> Self {
        let db = Db::open(&config.database_path);
        Self {
            db,
            config: Arc::new(config),
        }
    }
}
