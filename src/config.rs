use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{AlertError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/alert_app".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| AlertError::Config(format!("invalid SERVER_PORT: {}", e)))?;

        Ok(AppConfig {
            database_url,
            server_host,
            server_port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_and_rejects_bad_port() {
        // Single test so the env mutations don't race each other.
        env::remove_var("DATABASE_URL");
        env::remove_var("SERVER_HOST");
        env::remove_var("SERVER_PORT");

        let config = AppConfig::load().unwrap();
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 3000);
        assert!(config.database_url.starts_with("postgres://"));

        env::set_var("SERVER_PORT", "not-a-port");
        let result = AppConfig::load();
        env::remove_var("SERVER_PORT");

        match result {
            Err(AlertError::Config(msg)) => assert!(msg.contains("SERVER_PORT")),
            other => panic!("expected Config error, got {:?}", other.map(|c| c.server_port)),
        }
    }
}
