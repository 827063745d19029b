use serde::{Deserialize, Serialize};

/// Headline statistics for one merged trade set.
///
/// All ratios are finite: empty inputs and zero denominators resolve to `0.0`,
/// and a loss-free profit factor is capped (see `core::summary`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SummaryMetrics {
    pub net_profit: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: f64,
    pub win_rate: f64,
    pub average_win: f64,
    pub average_loss: f64,
    pub max_drawdown_absolute: f64,
    pub max_drawdown_percent: f64,
    pub average_drawdown: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,

    pub payoff: f64,
    pub average_trade: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub max_consecutive_wins: usize,
    pub max_consecutive_losses: usize,
    pub recovery_factor: f64,
    pub peak_equity: f64,
    pub final_equity: f64,
    pub active_days: usize,
    pub average_trades_per_day: f64,
    pub winning_days: usize,
    pub losing_days: usize,
    pub sharpe_ratio: f64,
}

/// Win/loss statistics for a subset of trades (one strategy, weekday, week or month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GroupStats {
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub net_pnl: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub profit_factor: f64,
    pub average_win: f64,
    pub average_loss: f64,
}

/// Best and worst group of a breakdown, by net pnl.
///
/// `worst` is only set when some group actually lost money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PeriodExtremes {
    pub best: Option<String>,
    pub worst: Option<String>,
}
