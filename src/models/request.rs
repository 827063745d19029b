use serde::{Deserialize, Serialize};

use super::Granularity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsolidationMode {
    /// Every selected source merged into one combined curve.
    #[default]
    Consolidated,
    /// Restricted to an explicit subset of strategies.
    Individual,
}

/// What the caller wants consolidated and at which resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConsolidationRequest {
    #[serde(default)]
    pub mode: ConsolidationMode,
    #[serde(default)]
    pub selected_strategy_ids: Vec<String>,
    #[serde(default)]
    pub asset_filter: Option<String>,
    #[serde(default)]
    pub granularity: Granularity,
}

impl ConsolidationRequest {
    pub fn consolidated(granularity: Granularity) -> Self {
        Self {
            mode: ConsolidationMode::Consolidated,
            selected_strategy_ids: Vec::new(),
            asset_filter: None,
            granularity,
        }
    }

    pub fn individual(strategy_ids: &[&str], granularity: Granularity) -> Self {
        Self {
            mode: ConsolidationMode::Individual,
            selected_strategy_ids: strategy_ids.iter().map(|s| s.to_string()).collect(),
            asset_filter: None,
            granularity,
        }
    }

    pub fn with_asset(mut self, asset: &str) -> Self {
        self.asset_filter = Some(asset.to_string());
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Whether trades from `strategy_id` take part in this request.
    ///
    /// Individual mode only ever admits the selected ids (an empty selection
    /// admits nothing). Consolidated mode admits everything unless a
    /// selection narrows it.
    pub fn includes_strategy(&self, strategy_id: &str) -> bool {
        match self.mode {
            ConsolidationMode::Individual => {
                self.selected_strategy_ids.iter().any(|s| s == strategy_id)
            }
            ConsolidationMode::Consolidated => {
                self.selected_strategy_ids.is_empty()
                    || self.selected_strategy_ids.iter().any(|s| s == strategy_id)
            }
        }
    }

    /// Exact symbol match. Symbol-less trades pass only without an asset filter.
    pub fn includes_symbol(&self, symbol: Option<&str>) -> bool {
        match (&self.asset_filter, symbol) {
            (None, _) => true,
            (Some(wanted), Some(s)) => wanted == s,
            (Some(_), None) => false,
        }
    }
}
