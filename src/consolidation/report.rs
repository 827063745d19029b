use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use super::orchestrator::ConsolidationResult;
use crate::models::{GroupStats, PeriodExtremes};

/// Human-readable summary of a consolidation run.
pub fn render_summary(result: &ConsolidationResult) -> String {
    let mut out = String::new();
    let _ = write_summary(&mut out, result);
    out
}

pub fn print_summary(result: &ConsolidationResult) {
    println!("{}", render_summary(result));
}

/// Writes the text summary plus the curve and summary as JSON next to it.
pub fn save_report(result: &ConsolidationResult, dir: &Path, stem: &str) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(dir.join(format!("{}.txt", stem)), render_summary(result))?;
    std::fs::write(
        dir.join(format!("{}.json", stem)),
        serde_json::to_string_pretty(result)?,
    )?;
    Ok(())
}

fn write_summary(out: &mut String, r: &ConsolidationResult) -> std::fmt::Result {
    let s = &r.summary;
    let rule = "─".repeat(35);

    writeln!(out, "{}", "=".repeat(70))?;
    writeln!(out, "  CONSOLIDATION REPORT")?;
    writeln!(out, "{}", "=".repeat(70))?;
    writeln!(
        out,
        "  Mode:        {:?} | Granularity: {}",
        r.request.mode, r.request.granularity
    )?;
    if let Some(asset) = &r.request.asset_filter {
        writeln!(out, "  Asset:       {}", asset)?;
    }
    if let (Some(first), Some(last)) = (r.trades.first(), r.trades.last()) {
        writeln!(
            out,
            "  Period:      {} to {}",
            first.timestamp.format("%Y-%m-%d"),
            last.timestamp.format("%Y-%m-%d")
        )?;
    }
    if r.rejected_records > 0 {
        writeln!(out, "  Rejected:    {} malformed record(s)", r.rejected_records)?;
    }

    if let Some(msg) = r.empty_message() {
        writeln!(out)?;
        writeln!(out, "  {}", msg)?;
        writeln!(out, "{}", "=".repeat(70))?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "  PERFORMANCE")?;
    writeln!(out, "  {}", rule)?;
    writeln!(out, "  Net Profit:  {:+.2}", s.net_profit)?;
    writeln!(out, "  Gross:       {:.2} / -{:.2}", s.gross_profit, s.gross_loss)?;
    writeln!(out, "  Profit Factor: {:.2}", s.profit_factor)?;
    writeln!(out, "  Payoff:      {:.2}", s.payoff)?;
    writeln!(out, "  Sharpe:      {:.2}", s.sharpe_ratio)?;
    writeln!(out)?;
    writeln!(out, "  TRADES")?;
    writeln!(out, "  {}", rule)?;
    writeln!(out, "  Total:       {}", s.total_trades)?;
    writeln!(out, "  Win/Loss:    {} / {}", s.winning_trades, s.losing_trades)?;
    writeln!(out, "  Win Rate:    {:.1}%", s.win_rate)?;
    writeln!(out, "  Avg Win:     {:+.2}", s.average_win)?;
    writeln!(out, "  Avg Loss:    -{:.2}", s.average_loss)?;
    writeln!(out, "  Best/Worst:  {:+.2} / {:+.2}", s.largest_win, s.largest_loss)?;
    writeln!(out, "  Avg Trade:   {:+.2}", s.average_trade)?;
    writeln!(
        out,
        "  Streaks:     {} wins / {} losses",
        s.max_consecutive_wins, s.max_consecutive_losses
    )?;
    writeln!(
        out,
        "  Active Days: {} ({:.1} trades/day)",
        s.active_days, s.average_trades_per_day
    )?;
    writeln!(out, "  Days +/-:    {} / {}", s.winning_days, s.losing_days)?;
    writeln!(out)?;
    writeln!(out, "  RISK")?;
    writeln!(out, "  {}", rule)?;
    writeln!(
        out,
        "  Max DD:      {:.2} ({:.1}%)",
        s.max_drawdown_absolute, s.max_drawdown_percent
    )?;
    let (curve_dd, curve_dd_pct) = r.curve_max_drawdown();
    writeln!(
        out,
        "  Curve DD:    {:.2} ({:.1}%) at {}",
        curve_dd, curve_dd_pct, r.request.granularity
    )?;
    writeln!(out, "  Avg DD:      {:.2}", s.average_drawdown)?;
    writeln!(out, "  Recovery:    {:.2}", s.recovery_factor)?;
    writeln!(out, "  Peak/Final:  {:.2} / {:.2}", s.peak_equity, s.final_equity)?;

    if r.by_strategy.len() > 1 {
        writeln!(out)?;
        writeln!(out, "  BY STRATEGY")?;
        writeln!(out, "  {}", rule)?;
        let mut rows: Vec<_> = r.by_strategy.iter().collect();
        rows.sort_by(|a, b| b.1.net_pnl.total_cmp(&a.1.net_pnl));
        for (id, stats) in rows {
            writeln!(
                out,
                "  {:>12}: {} trades | WR {:.0}% | PF {:.2} | PnL {:+.2}",
                id, stats.trades, stats.win_rate, stats.profit_factor, stats.net_pnl
            )?;
        }
    }

    if !r.by_weekday.is_empty() {
        writeln!(out)?;
        writeln!(out, "  BY WEEKDAY")?;
        writeln!(out, "  {}", rule)?;
        for (day, stats) in &r.by_weekday {
            writeln!(
                out,
                "  {:>12}: {} trades | WR {:.0}% | PnL {:+.2}",
                day, stats.trades, stats.win_rate, stats.net_pnl
            )?;
        }
    }

    write_periods(out, "BY MONTH", &r.by_month, &r.month_extremes)?;
    write_periods(out, "BY WEEK", &r.by_week, &r.week_extremes)?;

    writeln!(out, "{}", "=".repeat(70))?;
    Ok(())
}

fn write_periods(
    out: &mut String,
    title: &str,
    groups: &BTreeMap<String, GroupStats>,
    extremes: &PeriodExtremes,
) -> std::fmt::Result {
    if groups.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "  {}", title)?;
    writeln!(out, "  {}", "─".repeat(35))?;
    for (key, stats) in groups {
        writeln!(
            out,
            "  {:>12}: {} trades | WR {:.0}% | PF {:.2} | PnL {:+.2}",
            key, stats.trades, stats.win_rate, stats.profit_factor, stats.net_pnl
        )?;
    }
    writeln!(
        out,
        "  Best: {} | Worst: {}",
        extremes.best.as_deref().unwrap_or("-"),
        extremes.worst.as_deref().unwrap_or("-")
    )?;
    Ok(())
}
