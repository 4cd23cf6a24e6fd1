//! Whitespace normalization and page-text flattening shared by extractors.

use scraper::{ElementRef, Html};

use crate::types::PLACEHOLDER;

/// Collapses every whitespace run to one space and trims the ends.
///
/// Absent, empty, or whitespace-only input yields [`PLACEHOLDER`].
#[must_use]
pub fn normalize_text(text: Option<&str>) -> String {
    let collapsed = collapse_whitespace(text.unwrap_or_default());
    if collapsed.is_empty() {
        PLACEHOLDER.to_owned()
    } else {
        collapsed
    }
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes all whitespace, e.g. the thousands separator in `"125 000"`.
pub(crate) fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Concatenated text of every node in the document, whitespace-collapsed.
pub(crate) fn page_text(document: &Html) -> String {
    collapse_whitespace(&document.root_element().text().collect::<String>())
}

/// Normalized text content of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    normalize_text(Some(&element.text().collect::<String>()))
}
