//! HTTP client for the provider's `ajax.html` endpoint.
//!
//! Every call is a GET carrying `svc` (service name), `params` (JSON-encoded
//! payload) and, after login, `sid`. Success is inferred from which keys the
//! JSON body carries; the HTTP status is only checked for 2xx.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::TelemetryError;
use crate::outcome::AuthError;
use crate::types::{LoginResponse, Session};

pub(crate) const SVC_LOGIN: &str = "token/login";
pub(crate) const SVC_SEARCH_ITEM: &str = "core/search_item";
pub(crate) const SVC_SEARCH_ITEMS: &str = "core/search_items";

/// Client for the vehicle-tracking provider.
///
/// Holds no session: each top-level lookup logs in again, so request volume
/// stays one login plus one query per lookup.
pub struct TelemetryClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl TelemetryClient {
    /// Creates a client for `base_url` (the full `.../wialon/ajax.html` URL).
    ///
    /// A missing or blank `token` is accepted here; lookups then report
    /// [`AuthError::ConfigurationMissing`] without touching the network.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`TelemetryError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, TelemetryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("autolease/0.1 (fleet-telemetry)")
            .build()?;

        let parsed = Url::parse(base_url).map_err(|e| TelemetryError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            token: token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_owned),
        })
    }

    /// Creates a client from the `WIALON_*` and telemetry timeout settings.
    ///
    /// # Errors
    ///
    /// Same as [`TelemetryClient::new`].
    pub fn from_config(config: &autolease_core::AppConfig) -> Result<Self, TelemetryError> {
        Self::new(
            &config.telemetry_base_url,
            config.telemetry_token.as_deref(),
            config.telemetry_timeout_secs,
        )
    }

    /// Authenticates with the configured token and returns a fresh session.
    ///
    /// Performs one round trip per call. Never panics or propagates an error:
    /// every failure is one of the [`AuthError`] variants.
    pub async fn login(&self) -> Result<Session, AuthError> {
        self.try_login().await.map_err(|e| {
            match &e {
                TelemetryError::ConfigurationMissing => {
                    tracing::warn!("telemetry login skipped: WIALON_TOKEN is not set");
                }
                other => tracing::warn!(error = %other, "telemetry login failed"),
            }
            AuthError::from(e)
        })
    }

    async fn try_login(&self) -> Result<Session, TelemetryError> {
        let token = self
            .token
            .as_deref()
            .ok_or(TelemetryError::ConfigurationMissing)?;

        let url = self.build_url(SVC_LOGIN, &json!({ "token": token }), None);
        let body = self
            .request_json(&url, SVC_LOGIN)
            .await
            .map_err(reject_malformed_login)?;
        let response: LoginResponse = decode(body, SVC_LOGIN).map_err(reject_malformed_login)?;

        match response.eid.filter(|eid| !eid.is_empty()) {
            Some(sid) => Ok(Session { sid }),
            None => Err(TelemetryError::AuthenticationFailed {
                code: response.error,
            }),
        }
    }

    /// Builds the request URL with `svc`, JSON-encoded `params`, and an
    /// optional `sid`, all percent-encoded via [`Url::query_pairs_mut`].
    pub(crate) fn build_url(&self, svc: &str, params: &Value, sid: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("svc", svc);
            pairs.append_pair("params", &params.to_string());
            if let Some(sid) = sid {
                pairs.append_pair("sid", sid);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body as
    /// JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::Http`] on network failure or a non-2xx
    /// status, [`TelemetryError::Deserialize`] if the body is not JSON.
    pub(crate) async fn request_json(&self, url: &Url, svc: &str) -> Result<Value, TelemetryError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TelemetryError::Deserialize {
            context: svc.to_owned(),
            source: e,
        })
    }
}

/// A login body that is not the expected JSON is a rejected login.
fn reject_malformed_login(err: TelemetryError) -> TelemetryError {
    match err {
        TelemetryError::Deserialize { .. } => TelemetryError::AuthenticationFailed { code: None },
        other => other,
    }
}

/// Deserializes a provider body into the typed response for `svc`.
pub(crate) fn decode<T: DeserializeOwned>(body: Value, svc: &str) -> Result<T, TelemetryError> {
    serde_json::from_value(body).map_err(|e| TelemetryError::Deserialize {
        context: svc.to_owned(),
        source: e,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
