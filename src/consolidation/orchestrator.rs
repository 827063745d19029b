use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::core::{breakdown, bucket, compute_curve, equity, merge, summarize, TradeSources};
use crate::models::{
    ConsolidationRequest, EquityPoint, GroupStats, PeriodExtremes, SummaryMetrics, Trade,
};

use super::source::RawSources;

pub const NO_MATCHING_TRADES: &str = "no matching trades for current filters";

/// Everything a rendering or export surface needs for one request.
///
/// `curve` and `summary` are always derived from `trades`, the one merged
/// and filtered list for the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationResult {
    pub request: ConsolidationRequest,
    pub trades: Vec<Trade>,
    pub curve: Vec<EquityPoint>,
    pub summary: SummaryMetrics,
    pub by_strategy: BTreeMap<String, GroupStats>,
    pub by_weekday: BTreeMap<String, GroupStats>,
    pub by_week: BTreeMap<String, GroupStats>,
    pub by_month: BTreeMap<String, GroupStats>,
    pub week_extremes: PeriodExtremes,
    pub month_extremes: PeriodExtremes,
    pub rejected_records: usize,
}

impl ConsolidationResult {
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Largest drawdown on the displayed curve, `(absolute, percent)`.
    ///
    /// Bucketing smooths intra-period swings, so at daily or coarser
    /// granularity this can be lower than `summary.max_drawdown_absolute`,
    /// which is always read trade by trade.
    pub fn curve_max_drawdown(&self) -> (f64, f64) {
        equity::max_drawdown(&self.curve)
    }

    /// Message for the "nothing to show" state, if the filters matched nothing.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_MATCHING_TRADES)
    }
}

/// Single entry point for turning strategy sources into a curve and summary.
///
/// Stateless: the same request over the same sources always yields the same
/// result, so callers may run it from as many threads as they like.
#[derive(Debug, Default, Clone, Copy)]
pub struct Consolidator;

impl Consolidator {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, request: &ConsolidationRequest, sources: &TradeSources) -> ConsolidationResult {
        let trades = merge(sources, request);
        let curve = compute_curve(&bucket(&trades, request.granularity));
        let summary = summarize(&trades);

        debug!(
            "Consolidated {} trades into {} {} point(s)",
            trades.len(),
            curve.len(),
            request.granularity
        );

        let by_week = breakdown::weekly_breakdown(&trades);
        let by_month = breakdown::monthly_breakdown(&trades);

        ConsolidationResult {
            request: request.clone(),
            by_strategy: breakdown::strategy_breakdown(&trades),
            by_weekday: breakdown::weekday_breakdown(&trades),
            week_extremes: breakdown::period_extremes(&by_week),
            month_extremes: breakdown::period_extremes(&by_month),
            by_week,
            by_month,
            trades,
            curve,
            summary,
            rejected_records: 0,
        }
    }

    /// Normalizes raw records first, dropping malformed ones, then runs.
    pub fn run_raw(&self, request: &ConsolidationRequest, raw: &RawSources) -> ConsolidationResult {
        let (sources, rejected) = raw.normalize();
        if rejected > 0 {
            info!("Dropped {} malformed record(s) before consolidation", rejected);
        }
        let mut result = self.run(request, &sources);
        result.rejected_records = rejected;
        result
    }
}
