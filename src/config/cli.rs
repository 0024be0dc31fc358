use crate::config::TomlConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "imdb-etl")]
#[command(about = "Scores the IMDb top chart by rating count and Oscar wins")]
pub struct CliConfig {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of films to score
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format: csv, tsv or json
    #[arg(long)]
    pub format: Option<String>,

    #[arg(long)]
    pub deviation: Option<u64>,

    #[arg(long)]
    pub deduction: Option<f64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the config file (or defaults) and applies command line overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => {
                tracing::info!("No configuration file given, using defaults");
                TomlConfig::default()
            }
        };

        if let Some(limit) = self.limit {
            config.extract.limit = limit;
        }
        if let Some(output) = &self.output {
            config.load.output_path = output.clone();
        }
        if let Some(format) = &self.format {
            config.load.format = format.clone();
        }
        if let Some(deviation) = self.deviation {
            config.scoring.deviation = deviation;
        }
        if let Some(deduction) = self.deduction {
            config.scoring.deduction = deduction;
        }

        Ok(config)
    }
}
