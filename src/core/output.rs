use crate::domain::model::ScoredItem;
use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["csv", "tsv", "json"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(EtlError::InvalidConfigValueError {
                field: "load.format".to_string(),
                value: s.to_string(),
                reason: format!("Supported formats: {}", Self::NAMES.join(", ")),
            }),
        }
    }
}

pub fn render(batch: &[ScoredItem], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => render_delimited(batch, b','),
        OutputFormat::Tsv => render_delimited(batch, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(batch)?),
    }
}

const HEADER: [&str; 8] = [
    "rank",
    "title",
    "rating",
    "rating_count",
    "award_count",
    "penalty",
    "bonus",
    "adjusted_score",
];

fn render_delimited(batch: &[ScoredItem], delimiter: u8) -> Result<Vec<u8>> {
    // Header is written by hand so an empty batch still gets one.
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for item in batch {
        writer.serialize(item)?;
    }

    writer.into_inner().map_err(|e| EtlError::IoError(e.into_error()))
}
