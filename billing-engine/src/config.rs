//! Environment-backed configuration

/// Engine configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | BILLING_API_URL | http://localhost:3000 | Billing backend base URL |
/// | REQUEST_TIMEOUT_MS | 30000 | HTTP request timeout (ms) |
/// | LOG_LEVEL | info | Log level |
/// | LOG_JSON | false | JSON log format (production) |
/// | LOG_DIR | unset | Directory for rotating file logs |
/// | ENVIRONMENT | development | Runtime environment |
#[derive(Debug, Clone)]
pub struct Config {
    /// Billing backend base URL
    pub api_base_url: String,
    /// Request timeout in milliseconds (transport-level, per call)
    pub request_timeout_ms: u64,
    /// Log level for the default filter
    pub log_level: String,
    /// JSON log format (production)
    pub log_json: bool,
    /// Optional directory for rotating file logs
    pub log_dir: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the defaults above. A `.env` file is
    /// honored in development.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            api_base_url: std::env::var("BILLING_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override backend URL and timeout on top of the environment
    ///
    /// 常用于测试场景
    pub fn with_overrides(api_base_url: impl Into<String>, request_timeout_ms: u64) -> Self {
        let mut config = Self::from_env();
        config.api_base_url = api_base_url.into();
        config.request_timeout_ms = request_timeout_ms;
        config
    }
}
