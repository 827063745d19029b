pub mod breakdown;
pub mod bucketer;
pub mod equity;
pub mod merger;
pub mod normalizer;
pub mod summary;

pub use bucketer::bucket;
pub use equity::compute_curve;
pub use merger::{merge, TradeSources};
pub use normalizer::{normalize, normalize_source, NormalizedSource};
pub use summary::{summarize, PROFIT_FACTOR_CAP};
