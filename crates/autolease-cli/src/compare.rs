//! `compare` command: competitor listings side by side.

use autolease_core::AppConfig;
use autolease_listings::{compare_listings, Comparison, ListingFetcher};

/// Scrapes `urls` and prints the comparison.
///
/// # Errors
///
/// Returns an error if the listing fetcher cannot be constructed or the JSON
/// output cannot be serialized.
pub(crate) async fn run_compare(
    config: &AppConfig,
    urls: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let fetcher = ListingFetcher::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build listing fetcher: {e}"))?;
    let comparison = compare_listings(&fetcher, urls).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        print!("{}", format_comparison(&comparison));
    }
    Ok(())
}

pub(crate) fn format_comparison(comparison: &Comparison) -> String {
    let mut out = String::new();
    if !comparison.entries.is_empty() {
        out.push_str(&format!(
            "{:<12}{:<16}{:<6}{:<12}{:<14}{:<12}TITLE\n",
            "SOURCE", "PRICE", "YEAR", "MILEAGE", "ENGINE", "GEARBOX"
        ));
    }
    for entry in &comparison.entries {
        out.push_str(&format!(
            "{:<12}{:<16}{:<6}{:<12}{:<14}{:<12}{}\n",
            entry.source.display_name(),
            entry.price,
            entry.year,
            entry.mileage,
            entry.engine,
            entry.transmission,
            entry.title
        ));
    }
    for url in &comparison.failures {
        out.push_str(&format!("could not read: {url}\n"));
    }
    out
}
