pub mod orchestrator;
pub mod report;
pub mod source;

pub use orchestrator::{ConsolidationResult, Consolidator, NO_MATCHING_TRADES};
pub use source::{JsonDirSource, RawSources, TradeSource};
