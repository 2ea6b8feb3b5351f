use std::sync::Arc;

use sqlx::AnyPool;

use crate::auth::{tokens::PlaceholderTokens, CredentialService};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub credentials: CredentialService,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = crate::db::connect(&config).await?;
        Ok(Self::from_parts(db, Arc::new(config)))
    }

    pub fn from_parts(db: AnyPool, config: Arc<AppConfig>) -> Self {
        let credentials = CredentialService::new(db, Arc::new(PlaceholderTokens));
        Self {
            config,
            credentials,
        }
    }

    #[cfg(test)]
    pub async fn for_tests() -> Self {
        Self::for_tests_with(crate::db::memory_pool().await)
    }

    #[cfg(test)]
    pub fn for_tests_with(db: AnyPool) -> Self {
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            request_timeout_secs: 30,
        });
        Self::from_parts(db, config)
    }
}
