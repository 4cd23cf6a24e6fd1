//! Lalafo.kg listing pages.
//!
//! Open Graph metadata is preferred over visible markup; the parameter list
//! ("Год выпуска: 2015", ...) is read from the flattened page text.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::{capture, meta_property, selector, ListingExtractor};
use crate::normalize::{element_text, page_text, strip_whitespace};
use crate::types::{ListingRecord, ListingSource};

const NO_TITLE: &str = "Lalafo объявление";
const NEGOTIABLE: &str = "Договорная";

static PRICE_SEL: LazyLock<Selector> = LazyLock::new(|| selector("span.heading__price"));

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Год выпуска:\s*(\d{4})").expect("valid regex"));
static YEAR_SHORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Год:\s*(\d{4})").expect("valid regex"));
static MILEAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Пробег[^:]*:\s*(\d[\d\s]*)").expect("valid regex"));
static DISPLACEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Объем двигателя:\s*(\d\.\d)").expect("valid regex"));
static GEARBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Коробка передач:\s*([а-яА-ЯёЁa-zA-Z]+)").expect("valid regex")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct LalafoExtractor;

impl ListingExtractor for LalafoExtractor {
    fn source(&self) -> ListingSource {
        ListingSource::Lalafo
    }

    fn extract(&self, url: &str, html: &str) -> ListingRecord {
        let document = Html::parse_document(html);
        let mut record = ListingRecord::empty(ListingSource::Lalafo, url, NO_TITLE, NEGOTIABLE);

        if let Some(title) = meta_property(&document, "og:title") {
            record.title = title;
        }
        record.image = meta_property(&document, "og:image");
        record.price = price(&document);

        let text = page_text(&document);
        if let Some(year) = capture(&YEAR_RE, &text).or_else(|| capture(&YEAR_SHORT_RE, &text)) {
            record.year = year.to_owned();
        }
        if let Some(mileage) = capture(&MILEAGE_RE, &text) {
            record.mileage = format!("{} км", strip_whitespace(mileage));
        }
        if let Some(displacement) = capture(&DISPLACEMENT_RE, &text) {
            record.engine = displacement.to_owned();
        }
        if let Some(gearbox) = capture(&GEARBOX_RE, &text) {
            record.transmission = gearbox.to_owned();
        }

        record
    }
}

/// `product:price:amount` plus currency, else the visible price, else
/// "negotiable".
fn price(document: &Html) -> String {
    if let Some(amount) = meta_property(document, "product:price:amount") {
        return match meta_property(document, "product:price:currency") {
            Some(currency) => format!("{amount} {currency}"),
            None => amount,
        };
    }
    document
        .select(&PRICE_SEL)
        .next()
        .map_or_else(|| NEGOTIABLE.to_owned(), element_text)
}
