use thiserror::Error;

/// Failures raised while turning a raw record into a [`Trade`](crate::models::Trade).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("malformed trade in '{strategy_id}': {reason}")]
    MalformedTrade { strategy_id: String, reason: String },
}

impl NormalizeError {
    pub fn malformed(strategy_id: &str, reason: impl Into<String>) -> Self {
        NormalizeError::MalformedTrade {
            strategy_id: strategy_id.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
