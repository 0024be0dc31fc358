use crate::core::document::Document;
use crate::domain::model::{Batch, DetailInfo, ListItem, ScoredItem};
use crate::domain::ports::{PageExtractor, PageFetcher};
use crate::domain::scoring::{adjusted_score, award_bonus, penalty, ScoringParams};
use crate::utils::error::{EtlError, Result};

/// Fetches the ranked list, then every detail page, and scores the batch.
///
/// Requests are issued one at a time: `1 + limit` fetches per run. The
/// first failure aborts the run and nothing is returned.
pub struct Orchestrator<F, L, D> {
    fetcher: F,
    list_extractor: L,
    detail_extractor: D,
    top_list_url: String,
    scoring: ScoringParams,
}

impl<F, L, D> Orchestrator<F, L, D>
where
    F: PageFetcher,
    L: PageExtractor<Output = Vec<ListItem>>,
    D: PageExtractor<Output = DetailInfo>,
{
    pub fn new(
        fetcher: F,
        list_extractor: L,
        detail_extractor: D,
        top_list_url: impl Into<String>,
        scoring: ScoringParams,
    ) -> Self {
        Self {
            fetcher,
            list_extractor,
            detail_extractor,
            top_list_url: top_list_url.into(),
            scoring,
        }
    }

    pub fn scoring(&self) -> &ScoringParams {
        &self.scoring
    }

    pub async fn run(&self, limit: usize) -> Result<Batch> {
        let items = self.fetch_list(limit).await?;

        let mut details = Vec::with_capacity(items.len());
        for item in &items {
            tracing::debug!("Fetching awards for #{} {} ({})", item.rank, item.title, item.detail_url);
            let doc = self.fetcher.fetch(&item.detail_url).await?;
            let info = self.detail_extractor.extract(&doc)?;
            tracing::debug!("#{} {} won {} Oscars", item.rank, item.title, info.award_count);
            details.push(info);
        }

        score_batch(items, details, &self.scoring)
    }

    async fn fetch_list(&self, limit: usize) -> Result<Vec<ListItem>> {
        tracing::debug!("Fetching ranked list from {}", self.top_list_url);
        let doc: Document = self.fetcher.fetch(&self.top_list_url).await?;
        let mut items = self.list_extractor.extract(&doc)?;
        tracing::info!("Ranked list has {} rows, keeping {}", items.len(), limit);

        if items.len() < limit {
            return Err(EtlError::extraction(format!(
                "ranked list has {} rows but {} were requested",
                items.len(),
                limit
            )));
        }
        items.truncate(limit);
        Ok(items)
    }
}

/// Applies penalty and bonus using the batch-wide maximum rating count.
pub fn score_batch(items: Vec<ListItem>, details: Vec<DetailInfo>, params: &ScoringParams) -> Result<Batch> {
    if items.len() != details.len() {
        return Err(EtlError::invalid_argument(format!(
            "{} list items but {} detail results",
            items.len(),
            details.len()
        )));
    }

    let max_rating_count = items.iter().map(|i| i.rating_count).max().unwrap_or(0);

    items
        .into_iter()
        .zip(details)
        .map(|(item, info)| {
            let penalty = penalty(
                item.rating_count,
                max_rating_count,
                params.deviation,
                params.deduction,
                params.precision,
            )?;
            let bonus = award_bonus(info.award_count);

            Ok(ScoredItem {
                adjusted_score: adjusted_score(item.rating, penalty, bonus, params.precision),
                rank: item.rank,
                title: item.title,
                rating: item.rating,
                rating_count: item.rating_count,
                award_count: info.award_count,
                penalty,
                bonus,
                detail_url: item.detail_url,
            })
        })
        .collect()
}
