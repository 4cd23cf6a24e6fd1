pub mod compare;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod types;

pub use compare::{compare_listings, Comparison};
pub use error::ListingError;
pub use extract::{
    extract_listing, LalafoExtractor, ListingExtractor, Marketplace, MashinaExtractor,
};
pub use fetch::ListingFetcher;
pub use normalize::normalize_text;
pub use types::{ListingRecord, ListingSource, PLACEHOLDER};
