use thiserror::Error;

/// Internal failures of the telemetry client.
///
/// Only [`crate::TelemetryClient::new`] returns these directly; every lookup
/// converts them into an [`crate::Lookup`] or [`crate::AuthError`].
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// No provider token was configured.
    #[error("telemetry token is not configured")]
    ConfigurationMissing,

    /// The login response did not carry a session key.
    #[error("telemetry provider rejected login (error code {code:?})")]
    AuthenticationFailed { code: Option<i64> },

    /// Network, TLS, timeout, or non-2xx HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the JSON shape expected for the service.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A well-formed response did not contain the requested data.
    #[error("not found: {context}")]
    NotFound { context: String },

    #[error("invalid telemetry base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
