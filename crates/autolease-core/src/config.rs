use crate::app_config::{AppConfig, Environment};
use crate::{ConfigError, DEFAULT_LISTING_USER_AGENT, DEFAULT_TELEMETRY_BASE_URL};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("AUTOLEASE_ENV", "development"));
    let log_level = or_default("AUTOLEASE_LOG_LEVEL", "info");

    let telemetry_base_url = or_default("WIALON_BASE_URL", DEFAULT_TELEMETRY_BASE_URL);
    let telemetry_token = lookup("WIALON_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let telemetry_timeout_secs = parse_u64("AUTOLEASE_TELEMETRY_TIMEOUT_SECS", "30")?;

    let listing_timeout_secs = parse_u64("AUTOLEASE_LISTING_TIMEOUT_SECS", "10")?;
    let listing_user_agent = or_default("AUTOLEASE_LISTING_USER_AGENT", DEFAULT_LISTING_USER_AGENT);

    Ok(AppConfig {
        env,
        log_level,
        telemetry_base_url,
        telemetry_token,
        telemetry_timeout_secs,
        listing_timeout_secs,
        listing_user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
