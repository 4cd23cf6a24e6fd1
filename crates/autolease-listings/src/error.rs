use thiserror::Error;

/// Errors constructing a [`crate::ListingFetcher`].
///
/// Fetching and extraction never fail: they degrade to `None` or to
/// placeholder fields.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
