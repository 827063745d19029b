use chrono::{NaiveDate, NaiveDateTime};

use crate::config::Config;
use crate::core::TradeSources;
use crate::models::{Granularity, Trade};

/// Wall-clock timestamp shorthand.
pub fn at(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

pub fn trade(strategy: &str, ts: NaiveDateTime, pnl: f64) -> Trade {
    Trade::new(ts, pnl, strategy)
}

/// Two strategies over three days, already in merged order:
/// Day1 A +100, B -50; Day2 A -20; Day3 A +200, B -100.
pub fn worked_scenario() -> Vec<Trade> {
    vec![
        trade("StrategyA", at(2025, 1, 1, 10, 0), 100.0),
        trade("StrategyB", at(2025, 1, 1, 11, 0), -50.0),
        trade("StrategyA", at(2025, 1, 2, 10, 0), -20.0),
        trade("StrategyA", at(2025, 1, 3, 10, 0), 200.0),
        trade("StrategyB", at(2025, 1, 3, 11, 0), -100.0),
    ]
}

/// The worked scenario split back into its two sources.
pub fn worked_sources() -> TradeSources {
    let (a, b): (Vec<Trade>, Vec<Trade>) = worked_scenario()
        .into_iter()
        .partition(|t| t.strategy_id == "StrategyA");
    let mut sources = TradeSources::new();
    sources.insert("StrategyA", a);
    sources.insert("StrategyB", b);
    sources
}

/// A Config that doesn't depend on the environment.
pub fn default_test_config() -> Config {
    Config {
        sources_dir: std::env::temp_dir()
            .join(format!("consolidator_src_{}", std::process::id()))
            .to_string_lossy()
            .to_string(),
        granularity: Granularity::Daily,
        asset_filter: None,
        strategies: Vec::new(),
        report_dir: std::env::temp_dir()
            .join(format!("consolidator_reports_{}", std::process::id()))
            .to_string_lossy()
            .to_string(),
        log_level: "debug".to_string(),
    }
}
