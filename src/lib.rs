pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{http::HttpFetcher, storage::LocalStorage};
pub use config::TomlConfig;
pub use crate::core::{
    awards::AwardsExtractor, document::Document, etl::EtlEngine, orchestrator::Orchestrator,
    top_list::TopListExtractor,
};
pub use domain::scoring::{award_bonus, penalty, ScoringParams};
pub use utils::error::{EtlError, Result};
