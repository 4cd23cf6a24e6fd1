//! Explicit result variants returned across the telemetry boundary.

use crate::error::TelemetryError;

/// Why a login produced no session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// The token is absent or blank.
    ConfigurationMissing,
    /// The provider answered without a session key.
    Rejected,
    /// The provider could not be reached or answered with a non-JSON body.
    NetworkUnavailable,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::ConfigurationMissing => write!(f, "telemetry token is not configured"),
            AuthError::Rejected => write!(f, "telemetry provider rejected the token"),
            AuthError::NetworkUnavailable => write!(f, "telemetry provider is unreachable"),
        }
    }
}

impl From<TelemetryError> for AuthError {
    fn from(err: TelemetryError) -> Self {
        match err {
            TelemetryError::ConfigurationMissing => AuthError::ConfigurationMissing,
            TelemetryError::AuthenticationFailed { .. } | TelemetryError::NotFound { .. } => {
                AuthError::Rejected
            }
            TelemetryError::Http(_)
            | TelemetryError::Deserialize { .. }
            | TelemetryError::InvalidBaseUrl { .. } => AuthError::NetworkUnavailable,
        }
    }
}

/// Outcome of a telemetry lookup.
///
/// `NotFound` is routine (device offline, serial unregistered); the other
/// absence variants say why the provider could not be asked at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    ConfigurationMissing,
    AuthenticationFailed,
    NetworkUnavailable,
}

impl<T> Lookup<T> {
    /// Converts into an `Option`, discarding the reason for absence.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

impl<T> From<AuthError> for Lookup<T> {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::ConfigurationMissing => Lookup::ConfigurationMissing,
            AuthError::Rejected => Lookup::AuthenticationFailed,
            AuthError::NetworkUnavailable => Lookup::NetworkUnavailable,
        }
    }
}

impl<T> From<TelemetryError> for Lookup<T> {
    fn from(err: TelemetryError) -> Self {
        match err {
            TelemetryError::NotFound { .. } => Lookup::NotFound,
            other => AuthError::from(other).into(),
        }
    }
}
