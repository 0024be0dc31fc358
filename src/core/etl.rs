use crate::core::orchestrator::Orchestrator;
use crate::core::output::{render, OutputFormat};
use crate::domain::model::{DetailInfo, ListItem};
use crate::domain::ports::{PageExtractor, PageFetcher, Storage};
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadSettings {
    pub output_path: String,
    pub format: OutputFormat,
}

pub struct EtlEngine<F, L, D, S> {
    orchestrator: Orchestrator<F, L, D>,
    storage: S,
    limit: usize,
    load: LoadSettings,
}

impl<F, L, D, S> EtlEngine<F, L, D, S>
where
    F: PageFetcher,
    L: PageExtractor<Output = Vec<ListItem>>,
    D: PageExtractor<Output = DetailInfo>,
    S: Storage,
{
    pub fn new(orchestrator: Orchestrator<F, L, D>, storage: S, limit: usize, load: LoadSettings) -> Self {
        Self {
            orchestrator,
            storage,
            limit,
            load,
        }
    }

    /// Scrapes and scores the batch, then writes it. Returns the output path.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Getting stats for the top {} films...", self.limit);
        let batch = self.orchestrator.run(self.limit).await?;
        tracing::info!("Scored {} films", batch.len());

        let data = render(&batch, self.load.format)?;
        tracing::debug!(
            "Writing {} bytes of {} to {}",
            data.len(),
            self.load.format.as_str(),
            self.load.output_path
        );
        self.storage.write_file(&self.load.output_path, &data).await?;

        Ok(self.load.output_path.clone())
    }
}
