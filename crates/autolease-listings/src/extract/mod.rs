//! Per-marketplace extraction rules and URL dispatch.
//!
//! Each marketplace's heuristics live behind [`ListingExtractor`] so one
//! site's markup change touches one file. Extraction is pure: the same HTML
//! always yields the same record.

mod lalafo;
mod mashina;

use regex::Regex;
use scraper::{Html, Selector};

use crate::types::{ListingRecord, ListingSource};

pub use lalafo::LalafoExtractor;
pub use mashina::MashinaExtractor;

/// Turns a fetched listing page into a [`ListingRecord`].
pub trait ListingExtractor: Send + Sync {
    fn source(&self) -> ListingSource;

    /// Extracts every field from `html`, using placeholders for anything the
    /// page does not carry.
    fn extract(&self, url: &str, html: &str) -> ListingRecord;
}

/// Marketplaces recognized by URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marketplace {
    Mashina,
    Lalafo,
}

static MASHINA: MashinaExtractor = MashinaExtractor;
static LALAFO: LalafoExtractor = LalafoExtractor;

impl Marketplace {
    /// Routes a URL by substring: `mashina.kg` first, then `lalafo`.
    #[must_use]
    pub fn detect(url: &str) -> Option<Self> {
        if url.contains("mashina.kg") {
            Some(Marketplace::Mashina)
        } else if url.contains("lalafo") {
            Some(Marketplace::Lalafo)
        } else {
            None
        }
    }

    #[must_use]
    pub fn extractor(self) -> &'static dyn ListingExtractor {
        match self {
            Marketplace::Mashina => &MASHINA,
            Marketplace::Lalafo => &LALAFO,
        }
    }
}

/// Extracts a record from already-fetched HTML, or `None` for an
/// unrecognized host.
#[must_use]
pub fn extract_listing(url: &str, html: &str) -> Option<ListingRecord> {
    Marketplace::detect(url).map(|market| market.extractor().extract(url, html))
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// First capture group of `re` in `text`.
fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `content` of the first `<meta property="...">` tag, if non-blank.
fn meta_property(document: &Html, property: &str) -> Option<String> {
    let css = format!("meta[property=\"{property}\"]");
    let sel = Selector::parse(&css).ok()?;
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_owned)
}
