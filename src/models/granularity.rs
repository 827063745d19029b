use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolution at which profit/loss is summed before the equity curve is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Trade,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Trade => "trade",
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }

    /// Accepts the canonical names plus the short forms older front-ends send.
    pub fn from_str_loose(s: &str) -> Option<Granularity> {
        match s.trim().to_lowercase().as_str() {
            "trade" | "trades" => Some(Granularity::Trade),
            "daily" | "day" | "dia" => Some(Granularity::Daily),
            "weekly" | "week" | "semana" => Some(Granularity::Weekly),
            "monthly" | "month" | "mes" => Some(Granularity::Monthly),
            _ => None,
        }
    }

    pub fn is_bucketed(&self) -> bool {
        !matches!(self, Granularity::Trade)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
