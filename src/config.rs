use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://credvault.db?mode=rwc";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Reads configuration from the process environment. Only the database
    /// URL has a meaningful production value; everything else has a default.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
        Ok(Self {
            database_url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_or("APP_PORT", 5000),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 30),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_number_falls_back_to_default() {
        std::env::set_var("CREDVAULT_TEST_PORT", "not-a-port");
        assert_eq!(parse_or::<u16>("CREDVAULT_TEST_PORT", 5000), 5000);
        std::env::set_var("CREDVAULT_TEST_PORT", "6001");
        assert_eq!(parse_or::<u16>("CREDVAULT_TEST_PORT", 5000), 6001);
        std::env::remove_var("CREDVAULT_TEST_PORT");
    }

    #[test]
    fn missing_variable_uses_default() {
        assert_eq!(parse_or::<u64>("CREDVAULT_TEST_UNSET_TIMEOUT", 30), 30);
    }
}
