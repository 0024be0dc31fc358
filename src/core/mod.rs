pub mod awards;
pub mod document;
pub mod etl;
pub mod orchestrator;
pub mod output;
pub mod top_list;

pub use crate::domain::model::{Batch, DetailInfo, ListItem, ScoredItem};
pub use crate::domain::ports::{PageExtractor, PageFetcher, Storage};
pub use crate::utils::error::Result;
