//! Service configuration loaded from environment variables.

/// Runtime settings for the order service.
///
/// Read from the environment:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `5003`)
/// - `USER_SERVICE_URL` — user service base URL
///   (default: `"http://127.0.0.1:5001"`)
/// - `CATALOG_SERVICE_URL` — catalog service base URL
///   (default: `"http://127.0.0.1:5002"`)
/// - `DATABASE_URL` — SQLite database URL; unset runs the in-memory
///   store
/// - `SERVICE_TIMEOUT_SECS` — per-request timeout for collaborator
///   calls (default: `5`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user_service_url: String,
    pub catalog_service_url: String,
    pub database_url: Option<String>,
    pub service_timeout_secs: u64,
    pub log_level: String,
}

impl Config {
    /// Builds the configuration from the environment; missing or
    /// unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5003),
            user_service_url: std::env::var("USER_SERVICE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5001".to_string()),
            catalog_service_url: std::env::var("CATALOG_SERVICE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5002".to_string()),
            database_url: std::env::var("DATABASE_URL").ok(),
            service_timeout_secs: std::env::var("SERVICE_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(5),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Socket address string to bind, `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5003,
            user_service_url: "http://127.0.0.1:5001".to_string(),
            catalog_service_url: "http://127.0.0.1:5002".to_string(),
            database_url: None,
            service_timeout_secs: 5,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5003);
        assert_eq!(config.user_service_url, "http://127.0.0.1:5001");
        assert_eq!(config.catalog_service_url, "http://127.0.0.1:5002");
        assert!(config.database_url.is_none());
        assert_eq!(config.service_timeout_secs, 5);
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
