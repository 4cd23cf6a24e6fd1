mod app_config;
mod config;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

/// Default telemetry endpoint used when `WIALON_BASE_URL` is unset.
pub const DEFAULT_TELEMETRY_BASE_URL: &str = "https://hst-api.wialon.com/wialon/ajax.html";

/// Desktop browser identification sent with marketplace page requests.
pub const DEFAULT_LISTING_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
