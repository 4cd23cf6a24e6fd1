//! Single-attempt page fetcher for marketplace listings.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::ListingError;
use crate::extract::Marketplace;
use crate::types::ListingRecord;

/// Fetches marketplace pages with a browser `User-Agent` and a bounded
/// timeout. No retries: an unreachable page is simply absent.
pub struct ListingFetcher {
    client: Client,
}

impl ListingFetcher {
    /// # Errors
    ///
    /// Returns [`ListingError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ListingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// # Errors
    ///
    /// Same as [`ListingFetcher::new`].
    pub fn from_config(config: &autolease_core::AppConfig) -> Result<Self, ListingError> {
        Self::new(config.listing_timeout_secs, &config.listing_user_agent)
    }

    /// Returns the page body for an HTTP 200 response, `None` otherwise.
    pub async fn fetch_page(&self, url: &str) -> Option<String> {
        let response = match self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "ru-RU,ru;q=0.9,en;q=0.8")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url, error = %e, "listing page request failed");
                return None;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(url, status = status.as_u16(), "listing page returned non-200 status");
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(url, error = %e, "failed to read listing page body");
                None
            }
        }
    }

    /// Routes `url` to its marketplace extractor, fetches, and extracts.
    ///
    /// Unrecognized hosts return `None` without a request.
    pub async fn scrape(&self, url: &str) -> Option<ListingRecord> {
        let Some(market) = Marketplace::detect(url) else {
            tracing::debug!(url, "no extractor for listing host");
            return None;
        };
        let html = self.fetch_page(url).await?;
        let record = market.extractor().extract(url, &html);
        tracing::debug!(url, source = %record.source, title = %record.title, "extracted listing");
        Some(record)
    }
}
