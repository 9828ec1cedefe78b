//! Client configuration

use std::path::PathBuf;

/// Default API base address
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default transport timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the booking API
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | SALON_API_URL | http://localhost:5000/api | API base address |
/// | SALON_HTTP_TIMEOUT_SECS | 30 | Transport timeout |
/// | SALON_TOKEN_PATH | (unset: in-memory) | JSON file holding the access token |
/// | SALON_LOG_LEVEL | info | Log level for [`crate::logger::init_logger`] |
/// | SALON_LOG_JSON | false | JSON log output |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://api.salon.example/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Where the access token is persisted; `None` keeps it in memory
    pub token_path: Option<PathBuf>,

    /// Log level (e.g., "info", "debug")
    pub log_level: String,

    /// Emit JSON logs instead of human-readable ones
    pub log_json: bool,
}

impl ClientConfig {
    /// Create a new configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token_path: None,
            log_level: "info".into(),
            log_json: false,
        }
    }

    /// Read the configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("SALON_API_URL").unwrap_or(defaults.base_url),
            timeout_secs: std::env::var("SALON_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            token_path: std::env::var("SALON_TOKEN_PATH").ok().map(PathBuf::from),
            log_level: std::env::var("SALON_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: std::env::var("SALON_LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_json),
        }
    }

    /// Load `.env` (if present) into the process environment, then read it
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }
        Self::from_env()
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Persist the access token at `path`
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    /// Set the log level and format
    pub fn with_logging(mut self, level: impl Into<String>, json: bool) -> Self {
        self.log_level = level.into();
        self.log_json = json;
        self
    }

    /// Base URL without trailing slashes
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
