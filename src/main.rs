use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backtest_consolidator::config::Config;
use backtest_consolidator::consolidation::{report, Consolidator, JsonDirSource, TradeSource};
use backtest_consolidator::models::Granularity;

#[tokio::main]
async fn main() -> Result<()> {
    let mut cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    // Positional overrides: [sources_dir] [granularity]
    let args: Vec<String> = std::env::args().collect();
    if let Some(dir) = args.get(1) {
        cfg.sources_dir = dir.clone();
    }
    let mut request = cfg.request();
    if let Some(g) = args.get(2) {
        match Granularity::from_str_loose(g) {
            Some(granularity) => request = request.with_granularity(granularity),
            None => warn!("Unknown granularity '{}', keeping {}", g, cfg.granularity),
        }
    }

    info!(
        "Consolidating {} ({:?}, {})",
        cfg.sources_dir, request.mode, request.granularity
    );

    let mut source = JsonDirSource::new(&cfg.sources_dir);
    let raw = source.load().await?;
    if raw.is_empty() {
        warn!("No sources found in {}", cfg.sources_dir);
        return Ok(());
    }

    let result = Consolidator::new().run_raw(&request, &raw);
    report::print_summary(&result);

    let stem = format!("consolidation_{}", request.granularity);
    report::save_report(&result, Path::new(&cfg.report_dir), &stem)?;
    info!("Report saved to {}/{}.txt", cfg.report_dir, stem);

    Ok(())
}
