use crate::core::document::{element_text, Document};
use crate::domain::model::DetailInfo;
use crate::domain::ports::PageExtractor;
use crate::utils::error::{EtlError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

pub const DEFAULT_AWARDS_PATTERN: &str = r"Won\s+(\d+)\s+Oscars";

static DEFAULT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(DEFAULT_AWARDS_PATTERN).unwrap());
static AWARDS: Lazy<Selector> = Lazy::new(|| Selector::parse(r#"[data-testid="awards"]"#).unwrap());
static AWARDS_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("li a").unwrap());

/// Reads the Oscar win count from a title page's awards section.
#[derive(Debug, Clone)]
pub struct AwardsExtractor {
    pattern: Regex,
}

impl AwardsExtractor {
    pub fn new() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }

    /// The first capture group of `pattern` must hold the count.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| EtlError::InvalidConfigValueError {
            field: "extract.awards_pattern".to_string(),
            value: pattern.to_string(),
            reason: e.to_string(),
        })?;

        if pattern.captures_len() < 2 {
            return Err(EtlError::InvalidConfigValueError {
                field: "extract.awards_pattern".to_string(),
                value: pattern.as_str().to_string(),
                reason: "Pattern needs a capture group for the count".to_string(),
            });
        }

        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl Default for AwardsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageExtractor for AwardsExtractor {
    type Output = DetailInfo;

    fn extract(&self, doc: &Document) -> Result<DetailInfo> {
        let section = doc
            .first(&AWARDS)
            .ok_or_else(|| EtlError::extraction("awards section [data-testid=\"awards\"] not found"))?;

        // Present section without a link: fall back to its own text, which may be empty.
        let text = match section.select(&AWARDS_LINK).next() {
            Some(link) => element_text(&link),
            None => {
                tracing::debug!("Awards section has no link, matching its text instead");
                element_text(&section)
            }
        };

        let award_count = extract_award_wins(&text, &self.pattern)?;
        Ok(DetailInfo { award_count })
    }
}

/// Count captured by `pattern` in `text`, or 0 when it does not match.
pub fn extract_award_wins(text: &str, pattern: &Regex) -> Result<u32> {
    let Some(count) = pattern.captures(text).and_then(|caps| caps.get(1)) else {
        return Ok(0);
    };

    count.as_str().parse().map_err(|_| {
        EtlError::extraction(format!("award count '{}' is not a valid number", count.as_str()))
    })
}
