//! Gateway configuration loaded from environment variables.

/// Runtime settings for the gateway.
///
/// Read from the environment:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8000`)
/// - `USER_SERVICE_URL` — user service base URL
///   (default: `"http://127.0.0.1:5001"`)
/// - `CATALOG_SERVICE_URL` — catalog service base URL
///   (default: `"http://127.0.0.1:5002"`)
/// - `ORDER_SERVICE_URL` — order service base URL
///   (default: `"http://127.0.0.1:5003"`)
/// - `GATEWAY_TIMEOUT_SECS` — per-request timeout for forwarded calls
///   (default: `10`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user_service_url: String,
    pub catalog_service_url: String,
    pub order_service_url: String,
    pub timeout_secs: u64,
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
                .unwrap_or(8000),
            user_service_url: std::env::var("USER_SERVICE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5001".to_string()),
            catalog_service_url: std::env::var("CATALOG_SERVICE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5002".to_string()),
            order_service_url: std::env::var("ORDER_SERVICE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5003".to_string()),
            timeout_secs: std::env::var("GATEWAY_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(10),
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
            port: 8000,
            user_service_url: "http://127.0.0.1:5001".to_string(),
            catalog_service_url: "http://127.0.0.1:5002".to_string(),
            order_service_url: "http://127.0.0.1:5003".to_string(),
            timeout_secs: 10,
            log_level: "info".to_string(),
        }
    }
}
