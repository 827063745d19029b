use chrono::{Datelike, Weekday};
use std::collections::BTreeMap;

use crate::core::bucketer::period_key;
use crate::core::summary::profit_factor;
use crate::models::{Granularity, GroupStats, PeriodExtremes, Trade};

/// Statistics per source strategy.
pub fn strategy_breakdown(trades: &[Trade]) -> BTreeMap<String, GroupStats> {
    group_by(trades, |t| t.strategy_id.clone())
}

/// Statistics per weekday of the recorded close time.
pub fn weekday_breakdown(trades: &[Trade]) -> BTreeMap<String, GroupStats> {
    group_by(trades, |t| weekday_name(t.timestamp.weekday()).to_string())
}

/// Statistics per calendar month, keyed `YYYY-MM`.
pub fn monthly_breakdown(trades: &[Trade]) -> BTreeMap<String, GroupStats> {
    group_by(trades, |t| period_key(t.timestamp, Granularity::Monthly))
}

/// Statistics per ISO week, keyed by the week's Monday.
pub fn weekly_breakdown(trades: &[Trade]) -> BTreeMap<String, GroupStats> {
    group_by(trades, |t| period_key(t.timestamp, Granularity::Weekly))
}

/// Best group by net pnl, and the worst among the groups that lost money.
/// Ties resolve to the earliest key.
pub fn period_extremes(groups: &BTreeMap<String, GroupStats>) -> PeriodExtremes {
    let mut best: Option<(&String, f64)> = None;
    let mut worst: Option<(&String, f64)> = None;
    for (key, stats) in groups {
        if best.map_or(true, |(_, pnl)| stats.net_pnl > pnl) {
            best = Some((key, stats.net_pnl));
        }
        if stats.net_pnl < 0.0 && worst.map_or(true, |(_, pnl)| stats.net_pnl < pnl) {
            worst = Some((key, stats.net_pnl));
        }
    }
    PeriodExtremes {
        best: best.map(|(k, _)| k.clone()),
        worst: worst.map(|(k, _)| k.clone()),
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn group_by<F>(trades: &[Trade], key: F) -> BTreeMap<String, GroupStats>
where
    F: Fn(&Trade) -> String,
{
    let mut groups: BTreeMap<String, GroupStats> = BTreeMap::new();
    for t in trades {
        let entry = groups.entry(key(t)).or_default();
        entry.trades += 1;
        entry.net_pnl += t.pnl;
        if t.is_win() {
            entry.wins += 1;
            entry.gross_profit += t.pnl;
        } else if t.is_loss() {
            entry.losses += 1;
            entry.gross_loss += t.pnl.abs();
        }
    }

    for stats in groups.values_mut() {
        stats.win_rate = stats.wins as f64 / stats.trades as f64 * 100.0;
        stats.profit_factor = profit_factor(stats.gross_profit, stats.gross_loss);
        stats.average_win = if stats.wins > 0 {
            stats.gross_profit / stats.wins as f64
        } else {
            0.0
        };
        stats.average_loss = if stats.losses > 0 {
            stats.gross_loss / stats.losses as f64
        } else {
            0.0
        };
    }
    groups
}
