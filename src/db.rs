use anyhow::Context;
use sqlx::{any::AnyPoolOptions, AnyPool};

use crate::config::AppConfig;

const SQLITE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        username      VARCHAR(80)  NOT NULL UNIQUE,
        password_hash VARCHAR(120) NOT NULL
    )
"#;

const POSTGRES_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id            BIGSERIAL    PRIMARY KEY,
        username      VARCHAR(80)  NOT NULL UNIQUE,
        password_hash VARCHAR(120) NOT NULL
    )
"#;

/// SQL dialect behind a connection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn from_url(url: &str) -> anyhow::Result<Self> {
        if url.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Backend::Postgres)
        } else {
            anyhow::bail!("unsupported database url scheme: {url}")
        }
    }

    fn users_ddl(self) -> &'static str {
        match self {
            Backend::Sqlite => SQLITE_USERS,
            Backend::Postgres => POSTGRES_USERS,
        }
    }
}

pub async fn connect(config: &AppConfig) -> anyhow::Result<AnyPool> {
    sqlx::any::install_default_drivers();
    let backend = Backend::from_url(&config.database_url)?;
    let db = AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")?;
    ensure_schema(&db, backend).await?;
    tracing::info!(?backend, "database ready");
    Ok(db)
}

/// Creates the `users` table if it does not exist yet.
pub async fn ensure_schema(db: &AnyPool, backend: Backend) -> anyhow::Result<()> {
    sqlx::query(backend.users_ddl())
        .execute(db)
        .await
        .context("create users table")?;
    Ok(())
}

/// Single-connection in-memory SQLite pool; every connection to
/// `sqlite::memory:` is its own database, so the pool must never open a second.
#[cfg(test)]
pub async fn memory_pool() -> AnyPool {
    sqlx::any::install_default_drivers();
    let db = AnyPoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite pool");
    ensure_schema(&db, Backend::Sqlite)
        .await
        .expect("schema on in-memory sqlite");
    db
}
