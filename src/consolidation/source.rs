use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::core::{normalize_source, TradeSources};

/// Raw, un-normalized records per strategy, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RawSources {
    sources: Vec<(String, Vec<Value>)>,
}

impl RawSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, strategy_id: &str, records: Vec<Value>) {
        match self.sources.iter_mut().find(|(id, _)| id == strategy_id) {
            Some((_, existing)) => *existing = records,
            None => self.sources.push((strategy_id.to_string(), records)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.sources.iter().map(|(id, r)| (id.as_str(), r.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Normalizes every source. Returns the trades and the number of records
    /// that had to be dropped as malformed.
    pub fn normalize(&self) -> (TradeSources, usize) {
        let mut out = TradeSources::new();
        let mut rejected = 0;
        for (id, records) in self.iter() {
            let normalized = normalize_source(id, records);
            rejected += normalized.rejected;
            out.insert(id, normalized.trades);
        }
        (out, rejected)
    }
}

/// Supplies raw trade records grouped by strategy. Parsing broker exports is
/// the implementor's concern; the engine only sees the resulting records.
#[async_trait]
pub trait TradeSource: Send + Sync {
    async fn load(&mut self) -> Result<RawSources>;
}

/// Reads every `*.json` file of a directory as one strategy source.
///
/// The file stem is the strategy id. A file holds either a bare array of
/// records or an object with a `trades` array.
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl TradeSource for JsonDirSource {
    async fn load(&mut self) -> Result<RawSources> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("reading source dir {}", self.dir.display()))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut sources = RawSources::new();
        for path in paths {
            let Some(strategy_id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let content = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            let value: Value = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;

            match extract_records(value) {
                Some(records) => {
                    debug!("  {}: {} records", strategy_id, records.len());
                    sources.insert(strategy_id, records);
                }
                None => warn!("No trade list in {}, skipping", path.display()),
            }
        }

        info!("Loaded {} source(s) from {}", sources.len(), self.dir.display());
        Ok(sources)
    }
}

/// Pulls the record list out of a source document.
pub fn extract_records(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(records) => Some(records),
        Value::Object(mut doc) => match doc.remove("trades") {
            Some(Value::Array(records)) => Some(records),
            _ => None,
        },
        _ => None,
    }
}
