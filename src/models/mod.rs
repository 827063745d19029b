pub mod equity;
pub mod granularity;
pub mod metrics;
pub mod request;
pub mod trade;

pub use equity::{EquityPoint, PeriodBucket};
pub use granularity::Granularity;
pub use metrics::{GroupStats, PeriodExtremes, SummaryMetrics};
pub use request::{ConsolidationMode, ConsolidationRequest};
pub use trade::{epoch_sentinel, Trade};
