#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub telemetry_base_url: String,
    /// Provider token. `None` when unset or blank; callers report that as a
    /// configuration problem at call time rather than at startup.
    pub telemetry_token: Option<String>,
    pub telemetry_timeout_secs: u64,
    pub listing_timeout_secs: u64,
    pub listing_user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("telemetry_base_url", &self.telemetry_base_url)
            .field(
                "telemetry_token",
                &self.telemetry_token.as_ref().map(|_| "[redacted]"),
            )
            .field("telemetry_timeout_secs", &self.telemetry_timeout_secs)
            .field("listing_timeout_secs", &self.listing_timeout_secs)
            .field("listing_user_agent", &self.listing_user_agent)
            .finish()
    }
}
