pub mod config;
pub mod consolidation;
pub mod core;
pub mod error;
pub mod models;
#[cfg(test)]
pub mod test_helpers;

pub use consolidation::{ConsolidationResult, Consolidator};
pub use error::NormalizeError;
pub use models::{ConsolidationMode, ConsolidationRequest, EquityPoint, Granularity, SummaryMetrics, Trade};
