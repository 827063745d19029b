use serde::{Deserialize, Serialize};

use crate::models::{ConsolidationMode, ConsolidationRequest, Granularity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Sources
    pub sources_dir: String,

    // Request defaults
    pub granularity: Granularity,
    pub asset_filter: Option<String>,
    pub strategies: Vec<String>,

    // Output
    pub report_dir: String,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let asset_filter = Some(env("ASSET_FILTER", "").trim().to_string()).filter(|s| !s.is_empty());

        let strategies = env("STRATEGIES", "")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Config {
            sources_dir: env("SOURCES_DIR", "data"),
            granularity: Granularity::from_str_loose(&env("GRANULARITY", "daily"))
                .unwrap_or_default(),
            asset_filter,
            strategies,
            report_dir: env("REPORT_DIR", "reports"),
            log_level: env("LOG_LEVEL", "info"),
        }
    }

    /// The request these settings describe. Naming strategies switches to
    /// individual mode.
    pub fn request(&self) -> ConsolidationRequest {
        let mode = if self.strategies.is_empty() {
            ConsolidationMode::Consolidated
        } else {
            ConsolidationMode::Individual
        };
        ConsolidationRequest {
            mode,
            selected_strategy_ids: self.strategies.clone(),
            asset_filter: self.asset_filter.clone(),
            granularity: self.granularity,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::default_test_config;

    use super::*;

    #[test]
    fn request_defaults_to_consolidated() {
        let cfg = default_test_config();
        let req = cfg.request();
        assert_eq!(req.mode, ConsolidationMode::Consolidated);
        assert!(req.selected_strategy_ids.is_empty());
        assert_eq!(req.granularity, Granularity::Daily);
    }

    #[test]
    fn granularity_override_keeps_filters() {
        let mut cfg = default_test_config();
        cfg.strategies = vec!["alpha".to_string()];
        cfg.asset_filter = Some("WDO".to_string());
        let req = cfg.request().with_granularity(Granularity::Monthly);
        assert_eq!(req.granularity, Granularity::Monthly);
        assert_eq!(req.mode, ConsolidationMode::Individual);
        assert_eq!(req.asset_filter.as_deref(), Some("WDO"));
        assert_eq!(req.selected_strategy_ids, vec!["alpha".to_string()]);
    }

    #[test]
    fn naming_strategies_selects_individual_mode() {
        let mut cfg = default_test_config();
        cfg.strategies = vec!["alpha".to_string()];
        cfg.asset_filter = Some("WIN".to_string());
        let req = cfg.request();
        assert_eq!(req.mode, ConsolidationMode::Individual);
        assert_eq!(req.asset_filter.as_deref(), Some("WIN"));
    }
}
