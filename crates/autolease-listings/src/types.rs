use serde::{Serialize, Serializer};

/// Marks a field whose value could not be found on the page.
pub const PLACEHOLDER: &str = "-";

/// Marketplace a listing was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingSource {
    Mashina,
    Lalafo,
}

impl ListingSource {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ListingSource::Mashina => "Mashina.kg",
            ListingSource::Lalafo => "Lalafo.kg",
        }
    }
}

impl std::fmt::Display for ListingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for ListingSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

/// A competitor listing, kept as display strings for side-by-side comparison.
///
/// Every field is always set; fields the page did not yield hold a
/// placeholder (`"-"` or a marketplace-specific equivalent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRecord {
    pub source: ListingSource,
    pub url: String,
    pub title: String,
    pub price: String,
    pub image: Option<String>,
    pub year: String,
    pub mileage: String,
    pub engine: String,
    pub transmission: String,
}

impl ListingRecord {
    /// A record with every field at its placeholder.
    pub(crate) fn empty(source: ListingSource, url: &str, title: &str, price: &str) -> Self {
        Self {
            source,
            url: url.to_owned(),
            title: title.to_owned(),
            price: price.to_owned(),
            image: None,
            year: PLACEHOLDER.to_owned(),
            mileage: PLACEHOLDER.to_owned(),
            engine: PLACEHOLDER.to_owned(),
            transmission: PLACEHOLDER.to_owned(),
        }
    }
}
