use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder timestamp for trades whose dates could not be read.
/// Such trades are kept so counts stay intact; they simply sort first.
pub fn epoch_sentinel() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}

/// A single closed trade after field normalization.
///
/// `timestamp` is the recorded wall-clock close time. No timezone conversion
/// is applied anywhere in the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub timestamp: NaiveDateTime,
    pub pnl: f64,
    #[serde(default)]
    pub symbol: Option<String>,
    pub strategy_id: String,
    #[serde(default)]
    pub quantity: Option<f64>,
}

impl Trade {
    pub fn new(timestamp: NaiveDateTime, pnl: f64, strategy_id: &str) -> Self {
        Self {
            timestamp,
            pnl,
            symbol: None,
            strategy_id: strategy_id.to_string(),
            quantity: None,
        }
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    pub fn is_win(&self) -> bool {
        self.pnl > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.pnl < 0.0
    }

    pub fn has_sentinel_timestamp(&self) -> bool {
        self.timestamp == epoch_sentinel()
    }
}
