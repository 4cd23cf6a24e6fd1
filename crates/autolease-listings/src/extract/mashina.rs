//! Mashina.kg listing pages.
//!
//! Title, price, and photo come from markup; the characteristics table (year, mileage,
//! engine, gearbox) is read from the flattened page text by label.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::{capture, selector, ListingExtractor};
use crate::normalize::{element_text, page_text, strip_whitespace};
use crate::types::{ListingRecord, ListingSource, PLACEHOLDER};

const NO_TITLE: &str = "Без названия";
const NO_PRICE: &str = "Не указана";

static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static PRICE_SEL: LazyLock<Selector> = LazyLock::new(|| selector("div.price-dollar"));
static MAIN_IMAGE_SEL: LazyLock<Selector> = LazyLock::new(|| selector(".main-image img[src]"));
static GALLERY_IMAGE_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(".image-gallery img[src]"));

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Год выпуска\s*(\d{4})").expect("valid regex"));
static MILEAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Пробег\s*(\d[\d\s]*)\s*км").expect("valid regex"));
static DISPLACEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Двигатель\s*(\d+(?:\.\d+)?)").expect("valid regex"));
static FUEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(бензин|дизель|гибрид|электро)").expect("valid regex"));
static GEARBOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Коробка\s*([а-яА-ЯёЁa-zA-Z]+)").expect("valid regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct MashinaExtractor;

impl ListingExtractor for MashinaExtractor {
    fn source(&self) -> ListingSource {
        ListingSource::Mashina
    }

    fn extract(&self, url: &str, html: &str) -> ListingRecord {
        let document = Html::parse_document(html);
        let mut record = ListingRecord::empty(ListingSource::Mashina, url, NO_TITLE, NO_PRICE);

        if let Some(h1) = document.select(&TITLE_SEL).next() {
            record.title = element_text(h1);
        }
        if let Some(price) = document.select(&PRICE_SEL).next() {
            record.price = element_text(price);
        }
        record.image = document
            .select(&MAIN_IMAGE_SEL)
            .next()
            .or_else(|| document.select(&GALLERY_IMAGE_SEL).next())
            .and_then(|img| img.value().attr("src"))
            .map(str::to_owned);

        let text = page_text(&document);
        if let Some(year) = capture(&YEAR_RE, &text) {
            record.year = year.to_owned();
        }
        if let Some(mileage) = capture(&MILEAGE_RE, &text) {
            record.mileage = format!("{} км", strip_whitespace(mileage));
        }
        record.engine = engine(&text);
        if let Some(gearbox) = capture(&GEARBOX_RE, &text) {
            record.transmission = gearbox.to_owned();
        }

        record
    }
}

/// Displacement and fuel type, whichever were found, joined by a single space
/// with no leading or trailing space; `-` when neither is present.
fn engine(text: &str) -> String {
    let parts: Vec<&str> = [capture(&DISPLACEMENT_RE, text), capture(&FUEL_RE, text)]
        .into_iter()
        .flatten()
        .collect();
    if parts.is_empty() {
        PLACEHOLDER.to_owned()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.mashina.kg/details/toyota-camry-65a1b2";

    fn page(body: &str) -> String {
        format!("<html><head><title>Mashina</title></head><body>{body}</body></html>")
    }

    fn full_page() -> String {
        page(
            r#"
            <h1>  Toyota
                  Camry 2015 </h1>
            <div class="price-dollar">15 000 $</div>
            <div class="main-image"><img src="https://cdn.mashina.kg/main.jpg"></div>
            <div class="image-gallery"><img src="https://cdn.mashina.kg/g1.jpg"></div>
            <dl>
              <dt>Год выпуска</dt><dd>2015</dd>
              <dt>Пробег</dt><dd>125 000 км</dd>
              <dt>Двигатель</dt><dd>2.5 / бензин</dd>
              <dt>Коробка</dt><dd>автомат</dd>
            </dl>
            "#,
        )
    }

    #[test]
    fn extracts_all_fields() {
        let record = MashinaExtractor.extract(URL, &full_page());
        assert_eq!(record.source, ListingSource::Mashina);
        assert_eq!(record.url, URL);
        assert_eq!(record.title, "Toyota Camry 2015");
        assert_eq!(record.price, "15 000 $");
        assert_eq!(record.image.as_deref(), Some("https://cdn.mashina.kg/main.jpg"));
        assert_eq!(record.year, "2015");
        assert_eq!(record.mileage, "125000 км");
        assert_eq!(record.engine, "2.5 бензин");
        assert_eq!(record.transmission, "автомат");
    }

    #[test]
    fn mileage_strips_thousands_separator() {
        let record = MashinaExtractor.extract(URL, &page("<p>Пробег 125 000 км</p>"));
        assert_eq!(record.mileage, "125000 км");
    }

    #[test]
    fn image_falls_back_to_gallery() {
        let record = MashinaExtractor.extract(
            URL,
            &page(r#"<div class="image-gallery"><img src="/g1.jpg"><img src="/g2.jpg"></div>"#),
        );
        assert_eq!(record.image.as_deref(), Some("/g1.jpg"));
    }

    #[test]
    fn empty_page_yields_placeholders() {
        let record = MashinaExtractor.extract(URL, &page(""));
        assert_eq!(record.title, "Без названия");
        assert_eq!(record.price, "Не указана");
        assert!(record.image.is_none());
        assert_eq!(record.year, "-");
        assert_eq!(record.mileage, "-");
        assert_eq!(record.engine, "-");
        assert_eq!(record.transmission, "-");
    }

    #[test]
    fn engine_keeps_whichever_half_was_found() {
        let fuel_only = MashinaExtractor.extract(URL, &page("<p>Топливо: Гибрид</p>"));
        assert_eq!(fuel_only.engine, "Гибрид");

        let displacement_only = MashinaExtractor.extract(URL, &page("<p>Двигатель 1.8</p>"));
        assert_eq!(displacement_only.engine, "1.8");
    }

    #[test]
    fn extraction_is_idempotent() {
        let html = full_page();
        assert_eq!(
            MashinaExtractor.extract(URL, &html),
            MashinaExtractor.extract(URL, &html)
        );
    }
}
