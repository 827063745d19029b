use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Profit/loss summed over one period key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBucket {
    pub key: String,
    pub pnl_sum: f64,
    pub trade_count: usize,
    pub contributing_strategies: BTreeSet<String>,
}

impl PeriodBucket {
    pub fn new(key: String) -> Self {
        Self {
            key,
            pnl_sum: 0.0,
            trade_count: 0,
            contributing_strategies: BTreeSet::new(),
        }
    }

    pub fn add(&mut self, pnl: f64, strategy_id: &str) {
        self.pnl_sum += pnl;
        self.trade_count += 1;
        if !self.contributing_strategies.contains(strategy_id) {
            self.contributing_strategies.insert(strategy_id.to_string());
        }
    }
}

/// One point on the equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub key: String,
    pub equity: f64,
    pub peak: f64,
    pub drawdown_absolute: f64,
    pub drawdown_percent: f64,
    pub trade_count_cumulative: usize,
    pub period_pnl: f64,
}
