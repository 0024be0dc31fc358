use crate::core::document::{element_text, Document};
use crate::domain::model::ListItem;
use crate::domain::ports::PageExtractor;
use crate::domain::scoring::round_to;
use crate::utils::error::{EtlError, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

static LIST_BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("tbody.lister-list").unwrap());
static RATING: Lazy<Selector> = Lazy::new(|| Selector::parse(r#"span[name="ir"]"#).unwrap());
static RATING_COUNT: Lazy<Selector> = Lazy::new(|| Selector::parse(r#"span[name="nv"]"#).unwrap());
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("td.titleColumn a").unwrap());

/// Reads the ranked chart table, one `ListItem` per row in page order.
#[derive(Debug, Clone)]
pub struct TopListExtractor {
    base_url: String,
}

impl TopListExtractor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute detail page URL for a row's title href.
    pub fn detail_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if href.starts_with('/') {
            format!("{}{}", base, href)
        } else {
            format!("{}/{}", base, href)
        }
    }

    fn extract_row(&self, rank: usize, row: ElementRef<'_>) -> Result<ListItem> {
        let rating: f64 = parse_attr(rank, row, &RATING, "rating", "data-value")?;
        let rating_count: u64 = parse_attr(rank, row, &RATING_COUNT, "rating count", "data-value")?;

        let link = row
            .select(&TITLE_LINK)
            .next()
            .ok_or_else(|| EtlError::extraction(format!("row {}: title link not found", rank)))?;
        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| EtlError::extraction(format!("row {}: title link has no href", rank)))?;

        Ok(ListItem {
            rank,
            title: element_text(&link),
            rating: round_to(rating, 1),
            rating_count,
            detail_url: self.detail_url(href),
        })
    }
}

impl PageExtractor for TopListExtractor {
    type Output = Vec<ListItem>;

    fn extract(&self, doc: &Document) -> Result<Vec<ListItem>> {
        let body = doc
            .first(&LIST_BODY)
            .ok_or_else(|| EtlError::extraction("ranked list container tbody.lister-list not found"))?;

        body.children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "tr")
            .enumerate()
            .map(|(i, row)| self.extract_row(i + 1, row))
            .collect()
    }
}

fn parse_attr<T: std::str::FromStr>(
    rank: usize,
    row: ElementRef<'_>,
    selector: &Selector,
    field: &str,
    attr: &str,
) -> Result<T> {
    let raw = row
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .ok_or_else(|| EtlError::extraction(format!("row {}: {} ({}) not found", rank, field, attr)))?;

    raw.trim().parse().map_err(|_| {
        EtlError::extraction(format!("row {}: {} '{}' is not a number", rank, field, raw))
    })
}
