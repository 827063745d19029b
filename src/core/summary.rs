use std::collections::BTreeMap;

use crate::core::{bucketer, equity};
use crate::models::{Granularity, SummaryMetrics, Trade};

/// Profit factor reported when there are profits but no losses.
pub const PROFIT_FACTOR_CAP: f64 = 999.0;

/// Gross profit over gross loss, kept finite.
pub fn profit_factor(gross_profit: f64, gross_loss: f64) -> f64 {
    if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else if gross_profit > 0.0 {
        PROFIT_FACTOR_CAP
    } else {
        0.0
    }
}

/// Summary statistics for a merged trade list.
///
/// Independent of display granularity: drawdown figures always come from a
/// trade-by-trade curve built here.
pub fn summarize(trades: &[Trade]) -> SummaryMetrics {
    if trades.is_empty() {
        return SummaryMetrics::default();
    }

    let total_trades = trades.len();
    let wins: Vec<f64> = trades.iter().filter(|t| t.is_win()).map(|t| t.pnl).collect();
    let losses: Vec<f64> = trades.iter().filter(|t| t.is_loss()).map(|t| t.pnl).collect();

    let gross_profit: f64 = wins.iter().sum();
    let gross_loss: f64 = losses.iter().sum::<f64>().abs();
    let net_profit = gross_profit - gross_loss;

    let winning_trades = wins.len();
    let losing_trades = losses.len();
    let win_rate = winning_trades as f64 / total_trades as f64 * 100.0;

    let average_win = if winning_trades > 0 {
        gross_profit / winning_trades as f64
    } else {
        0.0
    };
    let average_loss = if losing_trades > 0 {
        gross_loss / losing_trades as f64
    } else {
        0.0
    };
    let payoff = if average_loss > 0.0 {
        average_win / average_loss
    } else {
        0.0
    };

    let curve = equity::compute_curve(&bucketer::bucket(trades, Granularity::Trade));
    let (max_drawdown_absolute, max_drawdown_percent) = equity::max_drawdown(&curve);
    let average_drawdown = equity::average_drawdown(&curve);
    let peak_equity = curve.last().map(|p| p.peak).unwrap_or(0.0);
    let final_equity = curve.last().map(|p| p.equity).unwrap_or(0.0);

    let recovery_factor = if max_drawdown_absolute > 0.0 {
        net_profit / max_drawdown_absolute
    } else {
        0.0
    };

    let (max_consecutive_wins, max_consecutive_losses) = streaks(trades);

    let mut daily: BTreeMap<_, f64> = BTreeMap::new();
    for t in trades {
        *daily.entry(t.timestamp.date()).or_default() += t.pnl;
    }
    let active_days = daily.len();
    let winning_days = daily.values().filter(|&&pnl| pnl > 0.0).count();
    let losing_days = daily.values().filter(|&&pnl| pnl < 0.0).count();

    SummaryMetrics {
        net_profit,
        gross_profit,
        gross_loss,
        profit_factor: profit_factor(gross_profit, gross_loss),
        win_rate,
        average_win,
        average_loss,
        max_drawdown_absolute,
        max_drawdown_percent,
        average_drawdown,
        total_trades,
        winning_trades,
        losing_trades,
        payoff,
        average_trade: net_profit / total_trades as f64,
        largest_win: trades.iter().map(|t| t.pnl).fold(0.0, f64::max),
        largest_loss: trades.iter().map(|t| t.pnl).fold(0.0, f64::min),
        max_consecutive_wins,
        max_consecutive_losses,
        recovery_factor,
        peak_equity,
        final_equity,
        active_days,
        average_trades_per_day: total_trades as f64 / active_days as f64,
        winning_days,
        losing_days,
        sharpe_ratio: sharpe_ratio(trades),
    }
}

/// Mean over sample standard deviation of per-trade pnl.
pub fn sharpe_ratio(trades: &[Trade]) -> f64 {
    if trades.len() < 2 {
        return 0.0;
    }
    let n = trades.len() as f64;
    let mean = trades.iter().map(|t| t.pnl).sum::<f64>() / n;
    let variance = trades.iter().map(|t| (t.pnl - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();
    if std_dev > 0.0 {
        mean / std_dev
    } else {
        0.0
    }
}

/// Longest runs of winners and of losers. Flat trades reset neither run.
fn streaks(trades: &[Trade]) -> (usize, usize) {
    let (mut cw, mut cl, mut max_w, mut max_l) = (0usize, 0usize, 0usize, 0usize);
    for t in trades {
        if t.is_win() {
            cw += 1;
            cl = 0;
            max_w = max_w.max(cw);
        } else if t.is_loss() {
            cl += 1;
            cw = 0;
            max_l = max_l.max(cl);
        }
    }
    (max_w, max_l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{at, trade, worked_scenario};

    #[test]
    fn empty_trades_give_zeroed_summary() {
        let s = summarize(&[]);
        assert_eq!(s, SummaryMetrics::default());
        assert_eq!(s.profit_factor, 0.0);
        assert_eq!(s.win_rate, 0.0);
    }

    #[test]
    fn worked_scenario_totals() {
        let s = summarize(&worked_scenario());
        assert_eq!(s.total_trades, 5);
        assert_eq!(s.winning_trades, 2);
        assert_eq!(s.losing_trades, 3);
        assert_eq!(s.gross_profit, 300.0);
        assert_eq!(s.gross_loss, 170.0);
        assert_eq!(s.net_profit, 130.0);
        assert!((s.profit_factor - 300.0 / 170.0).abs() < 1e-12);
        assert!((s.win_rate - 40.0).abs() < 1e-12);
        assert_eq!(s.average_win, 150.0);
        assert!((s.average_loss - 170.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.final_equity, 130.0);
    }

    #[test]
    fn winning_and_losing_days() {
        // Day totals: +50, -20, +100
        let s = summarize(&worked_scenario());
        assert_eq!(s.active_days, 3);
        assert_eq!(s.winning_days, 2);
        assert_eq!(s.losing_days, 1);

        let flat_day = vec![
            trade("A", at(2024, 1, 1, 9, 0), 10.0),
            trade("A", at(2024, 1, 1, 10, 0), -10.0),
        ];
        let s = summarize(&flat_day);
        assert_eq!((s.winning_days, s.losing_days), (0, 0));
    }

    #[test]
    fn sharpe_uses_sample_deviation() {
        // pnl 100, -50, -20, 200, -100: mean 26, squared deviations sum to 59520
        let s = summarize(&worked_scenario());
        let expected = 26.0 / (59520.0f64 / 4.0).sqrt();
        assert!((s.sharpe_ratio - expected).abs() < 1e-12);
    }

    #[test]
    fn sharpe_is_zero_without_spread() {
        assert_eq!(sharpe_ratio(&[trade("A", at(2024, 1, 1, 0, 0), 5.0)]), 0.0);
        let same = vec![
            trade("A", at(2024, 1, 1, 0, 0), 5.0),
            trade("A", at(2024, 1, 2, 0, 0), 5.0),
        ];
        assert_eq!(sharpe_ratio(&same), 0.0);
        assert_eq!(summarize(&[]).sharpe_ratio, 0.0);
    }

    #[test]
    fn max_drawdown_uses_trade_curve() {
        // Trade curve: 100, 50, 30, 230, 130 -> peaks 100, 100, 100, 230, 230
        // Drawdowns 0, 50, 70, 0, 100; the daily curve would only show 20.
        // Percent maxima are taken separately: 70 of 100 beats 100 of 230.
        let s = summarize(&worked_scenario());
        assert_eq!(s.max_drawdown_absolute, 100.0);
        assert!((s.max_drawdown_percent - 70.0).abs() < 1e-9);
        assert!((s.average_drawdown - (50.0 + 70.0 + 100.0) / 3.0).abs() < 1e-9);
        assert_eq!(s.peak_equity, 230.0);
        assert!((s.recovery_factor - 1.3).abs() < 1e-12);
    }

    #[test]
    fn loss_free_profit_factor_is_capped() {
        let trades = vec![
            trade("A", at(2024, 1, 1, 0, 0), 10.0),
            trade("A", at(2024, 1, 2, 0, 0), 5.0),
        ];
        let s = summarize(&trades);
        assert_eq!(s.profit_factor, PROFIT_FACTOR_CAP);
        assert!(s.profit_factor.is_finite());
        assert_eq!(s.average_loss, 0.0);
        assert_eq!(s.payoff, 0.0);
        assert_eq!(s.max_drawdown_absolute, 0.0);
        assert_eq!(s.average_drawdown, 0.0);
    }

    #[test]
    fn flat_trades_only_give_zero_factor() {
        let trades = vec![trade("A", at(2024, 1, 1, 0, 0), 0.0)];
        let s = summarize(&trades);
        assert_eq!(s.profit_factor, 0.0);
        assert_eq!(s.win_rate, 0.0);
        assert_eq!(s.total_trades, 1);
        assert_eq!(s.winning_trades + s.losing_trades, 0);
    }

    #[test]
    fn all_losing_drawdown_is_deficit_from_zero() {
        let trades = vec![
            trade("A", at(2024, 1, 1, 0, 0), -10.0),
            trade("A", at(2024, 1, 2, 0, 0), -15.0),
        ];
        let s = summarize(&trades);
        assert_eq!(s.max_drawdown_absolute, 25.0);
        assert_eq!(s.max_drawdown_percent, 0.0);
        assert_eq!(s.peak_equity, 0.0);
        assert_eq!(s.profit_factor, 0.0);
        assert_eq!(s.largest_win, 0.0);
        assert_eq!(s.largest_loss, -15.0);
    }

    #[test]
    fn streaks_and_active_days() {
        let trades = vec![
            trade("A", at(2024, 1, 1, 9, 0), 1.0),
            trade("A", at(2024, 1, 1, 10, 0), 2.0),
            trade("A", at(2024, 1, 1, 11, 0), 0.0),
            trade("A", at(2024, 1, 2, 9, 0), 3.0),
            trade("A", at(2024, 1, 2, 10, 0), -1.0),
            trade("A", at(2024, 1, 3, 9, 0), -1.0),
        ];
        let s = summarize(&trades);
        assert_eq!(s.max_consecutive_wins, 3);
        assert_eq!(s.max_consecutive_losses, 2);
        assert_eq!(s.active_days, 3);
        assert!((s.average_trades_per_day - 2.0).abs() < 1e-12);
        assert_eq!(s.largest_win, 3.0);
    }
}
