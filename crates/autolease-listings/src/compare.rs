//! Side-by-side price comparison across several listing URLs.

use serde::Serialize;

use crate::fetch::ListingFetcher;
use crate::types::ListingRecord;

/// Records read successfully, plus the URLs that yielded nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub entries: Vec<ListingRecord>,
    pub failures: Vec<String>,
}

/// Scrapes each non-blank URL in order.
///
/// A URL that is unrecognized, unreachable, or non-200 is listed in
/// `failures`; the rest of the batch still runs.
pub async fn compare_listings<I, S>(fetcher: &ListingFetcher, urls: I) -> Comparison
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut comparison = Comparison::default();
    for url in urls {
        let url = url.as_ref().trim();
        if url.is_empty() {
            continue;
        }
        match fetcher.scrape(url).await {
            Some(record) => comparison.entries.push(record),
            None => {
                tracing::warn!(url, "could not read listing");
                comparison.failures.push(url.to_owned());
            }
        }
    }
    comparison
}
