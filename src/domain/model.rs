use serde::{Deserialize, Serialize};

/// One row of the ranked list page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub rank: usize,
    pub title: String,
    pub rating: f64,
    pub rating_count: u64,
    pub detail_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetailInfo {
    pub award_count: u32,
}

/// Field order is the column order of the written table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub rank: usize,
    pub title: String,
    pub rating: f64,
    pub rating_count: u64,
    pub award_count: u32,
    pub penalty: f64,
    pub bonus: f64,
    pub adjusted_score: f64,
    #[serde(skip)]
    pub detail_url: String,
}

/// Scored items in rank order.
pub type Batch = Vec<ScoredItem>;
