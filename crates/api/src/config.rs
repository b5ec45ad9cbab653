/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the breed catalog service.
    pub breed_catalog_url: String,
    /// Timeout for a single breed catalog request in seconds (default: `10`).
    pub breed_catalog_timeout_secs: u64,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                     |
    /// |------------------------------|-----------------------------|
    /// | `HOST`                       | `0.0.0.0`                   |
    /// | `PORT`                       | `3000`                      |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                        |
    /// | `BREED_CATALOG_URL`          | `https://api.thecatapi.com` |
    /// | `BREED_CATALOG_TIMEOUT_SECS` | `10`                        |
    /// | `LOG_FORMAT`                 | `text` (`json` to switch)   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let breed_catalog_url = std::env::var("BREED_CATALOG_URL")
            .unwrap_or_else(|_| "https://api.thecatapi.com".into());

        let breed_catalog_timeout_secs: u64 = std::env::var("BREED_CATALOG_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("BREED_CATALOG_TIMEOUT_SECS must be a valid u64");

        let log_json = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            breed_catalog_url,
            breed_catalog_timeout_secs,
            log_json,
        }
    }
}
