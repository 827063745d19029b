use tracing::{debug, warn};

use crate::models::{ConsolidationMode, ConsolidationRequest, Trade};

/// Normalized trades keyed by strategy id, kept in insertion order so that
/// merging is deterministic.
#[derive(Debug, Clone, Default)]
pub struct TradeSources {
    sources: Vec<(String, Vec<Trade>)>,
}

impl TradeSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source. Re-inserting an existing id replaces its trades in place.
    pub fn insert(&mut self, strategy_id: &str, trades: Vec<Trade>) {
        match self.sources.iter_mut().find(|(id, _)| id == strategy_id) {
            Some((_, existing)) => *existing = trades,
            None => self.sources.push((strategy_id.to_string(), trades)),
        }
    }

    pub fn get(&self, strategy_id: &str) -> Option<&[Trade]> {
        self.sources
            .iter()
            .find(|(id, _)| id == strategy_id)
            .map(|(_, t)| t.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Trade])> {
        self.sources.iter().map(|(id, t)| (id.as_str(), t.as_slice()))
    }

    pub fn strategy_ids(&self) -> Vec<&str> {
        self.sources.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn total_trades(&self) -> usize {
        self.sources.iter().map(|(_, t)| t.len()).sum()
    }
}

/// Flattens the requested sources into one chronologically ordered list.
///
/// Each trade is tagged with the id of the source it came from. The sort is
/// stable: trades sharing a timestamp keep source order, then record order.
/// Inputs are never modified.
pub fn merge(sources: &TradeSources, request: &ConsolidationRequest) -> Vec<Trade> {
    if request.mode == ConsolidationMode::Individual && request.selected_strategy_ids.is_empty() {
        debug!("Individual mode with no strategies selected");
    }
    for wanted in &request.selected_strategy_ids {
        if sources.get(wanted).is_none() {
            warn!("Selected strategy '{}' has no loaded source", wanted);
        }
    }

    let mut merged: Vec<Trade> = sources
        .iter()
        .filter(|(id, _)| request.includes_strategy(id))
        .flat_map(|(id, trades)| {
            trades
                .iter()
                .filter(move |t| request.includes_symbol(t.symbol.as_deref()))
                .map(move |t| Trade {
                    strategy_id: id.to_string(),
                    ..t.clone()
                })
        })
        .collect();

    merged.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    debug!(
        "Merged {} of {} trades from {} source(s)",
        merged.len(),
        sources.total_trades(),
        sources.len()
    );
    merged
}
