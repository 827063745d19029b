use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{NormalizeError, Result};
use crate::models::{epoch_sentinel, Trade};

/// Profit/loss keys in priority order. The first one holding a finite number wins.
const PNL_ALIASES: &[&str] = &[
    "pnl",
    "PnL",
    "PNL",
    "resultado",
    "Resultado",
    "net_profit",
    "profit",
    "result",
    "Res. Operação",
    "res_operacao",
    "lucro",
    "profit_loss",
    "Total",
];

/// Lowercase fragments used when no alias matched.
const PNL_PATTERNS: &[&str] = &["pnl", "p&l", "profit", "result", "lucro", "res. opera", "res_opera"];

/// Key fragments marking percentage or ratio columns, never money amounts.
const PNL_EXCLUDED: &[&str] = &["%", "pct", "percent", "factor", "ratio"];

const QUANTITY_ALIASES: &[&str] = &[
    "quantity_total",
    "quantity_compra",
    "quantity_venda",
    "qty_buy",
    "qty_sell",
    "quantity",
    "qty",
    "quantity_buy",
    "quantity_sell",
    "contracts",
    "size",
];

const QUANTITY_PATTERNS: &[&str] = &["quantity", "qty", "qtd", "contracts", "lotes"];

const SYMBOL_ALIASES: &[&str] = &["symbol", "Symbol", "ativo", "Ativo", "asset", "ticker", "instrument"];

/// Exit time first, then entry time, then a generic date column.
const DATE_KEYS: &[&str] = &[
    "exit_date",
    "exit_time",
    "Fechamento",
    "entry_date",
    "entry_time",
    "Abertura",
    "date",
    "Data",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

const MAX_SCAN_DEPTH: usize = 2;

/// Outcome of looking a numeric field up by alias and pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Lookup {
    Found(f64),
    /// A matching key exists but none of the candidates parsed.
    Unparseable,
    Absent,
}

/// Trades recovered from one strategy source.
#[derive(Debug, Clone, Default)]
pub struct NormalizedSource {
    pub strategy_id: String,
    pub trades: Vec<Trade>,
    pub rejected: usize,
}

/// Normalizes every record of a source. Malformed records are logged and
/// skipped; the rest of the batch is unaffected.
pub fn normalize_source(strategy_id: &str, records: &[Value]) -> NormalizedSource {
    let mut out = NormalizedSource {
        strategy_id: strategy_id.to_string(),
        trades: Vec::with_capacity(records.len()),
        rejected: 0,
    };

    for (idx, record) in records.iter().enumerate() {
        match normalize(record, strategy_id) {
            Ok(trade) => out.trades.push(trade),
            Err(e) => {
                warn!("Skipping record #{} of '{}': {}", idx, strategy_id, e);
                out.rejected += 1;
            }
        }
    }

    debug!(
        "Normalized '{}': {} trades, {} rejected",
        strategy_id,
        out.trades.len(),
        out.rejected
    );
    out
}

/// Turns one loosely-typed record into a [`Trade`].
///
/// Fails only when the record has no profit/loss-like field at all. A
/// profit/loss field that is present but unreadable yields `pnl = 0.0`, and
/// unreadable dates yield the epoch sentinel.
pub fn normalize(raw: &Value, strategy_id: &str) -> Result<Trade> {
    let map = raw
        .as_object()
        .ok_or_else(|| NormalizeError::malformed(strategy_id, "record is not an object"))?;

    let pnl = match lookup_numeric(map, PNL_ALIASES, PNL_PATTERNS, PNL_EXCLUDED) {
        Lookup::Found(v) => v,
        Lookup::Unparseable => {
            debug!("Unreadable profit/loss in '{}', defaulting to 0", strategy_id);
            0.0
        }
        Lookup::Absent => {
            return Err(NormalizeError::malformed(strategy_id, "no profit/loss field"));
        }
    };

    let timestamp = resolve_timestamp(map).unwrap_or_else(|| {
        debug!("No readable date in '{}' record, using epoch", strategy_id);
        epoch_sentinel()
    });

    let quantity = match lookup_numeric(map, QUANTITY_ALIASES, QUANTITY_PATTERNS, &[]) {
        Lookup::Found(v) => Some(v),
        _ => None,
    };

    Ok(Trade {
        timestamp,
        pnl,
        symbol: resolve_symbol(map),
        strategy_id: strategy_id.to_string(),
        quantity,
    })
}

/// Reads a number out of a JSON value.
///
/// Strings may carry currency markers, thousands separators, a comma decimal
/// separator or accounting parentheses: `"(R$ 1.250,50)"` reads as `-1250.5`.
/// Returns `None` for anything that is not a finite number.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_numeric_str(s),
        _ => None,
    }
}

fn parse_numeric_str(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let first = s.find(|c: char| c.is_ascii_digit())?;
    let last = s.rfind(|c: char| c.is_ascii_digit())?;

    let prefix = &s[..first];
    let body = &s[first..=last];
    let suffix = &s[last + 1..];

    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | ' ' | '\u{a0}' | '\''))
    {
        return None;
    }

    let negative = prefix.contains('-')
        || prefix.contains('\u{2212}')
        || (prefix.contains('(') && suffix.contains(')'));

    let mut cleaned: String = body
        .chars()
        .filter(|&c| !matches!(c, ' ' | '\u{a0}' | '\''))
        .collect();
    if let Some(sep) = prefix.chars().last().filter(|&c| matches!(c, '.' | ',')) {
        cleaned.insert(0, sep);
        cleaned.insert(0, '0');
    }

    let dots = cleaned.matches('.').count();
    let commas = cleaned.matches(',').count();
    let normalized = match (dots, commas) {
        (0, 0) => cleaned,
        (d, 0) if d > 1 => cleaned.replace('.', ""),
        (_, 0) => cleaned,
        (0, 1) => cleaned.replace(',', "."),
        (0, _) => cleaned.replace(',', ""),
        _ => match (cleaned.rfind('.'), cleaned.rfind(',')) {
            (Some(dot), Some(comma)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
            _ => cleaned.replace(',', ""),
        },
    };

    let value: f64 = normalized.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Parses the date formats backtest exports commonly use. Offsets in RFC 3339
/// strings are kept as recorded (the local wall-clock part is returned).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

fn resolve_timestamp(map: &Map<String, Value>) -> Option<NaiveDateTime> {
    for key in DATE_KEYS {
        if let Some(ts) = map.get(*key).and_then(Value::as_str).and_then(parse_timestamp) {
            return Some(ts);
        }
    }
    map.values()
        .filter_map(Value::as_str)
        .filter(|s| looks_iso_like(s))
        .find_map(parse_timestamp)
}

fn looks_iso_like(s: &str) -> bool {
    let b = s.trim().as_bytes();
    b.len() >= 10 && b[..4].iter().all(u8::is_ascii_digit) && b[4] == b'-' && b[7] == b'-'
}

fn resolve_symbol(map: &Map<String, Value>) -> Option<String> {
    SYMBOL_ALIASES
        .iter()
        .filter_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn lookup_numeric(
    map: &Map<String, Value>,
    aliases: &[&str],
    patterns: &[&str],
    excluded: &[&str],
) -> Lookup {
    let mut seen = false;
    for alias in aliases {
        if let Some(value) = map.get(*alias) {
            seen = true;
            if let Some(v) = parse_number(value) {
                return Lookup::Found(v);
            }
        }
    }

    if let Some(v) = scan_numeric(map, patterns, excluded, 0, &mut seen) {
        return Lookup::Found(v);
    }
    if seen {
        Lookup::Unparseable
    } else {
        Lookup::Absent
    }
}

/// Breadth-first over one level, then into nested objects up to `MAX_SCAN_DEPTH`.
/// Keys matching any `excluded` fragment are never read.
fn scan_numeric(
    map: &Map<String, Value>,
    patterns: &[&str],
    excluded: &[&str],
    depth: usize,
    seen: &mut bool,
) -> Option<f64> {
    for (key, value) in map {
        if value.is_object() || !matches_pattern(key, patterns) || matches_pattern(key, excluded) {
            continue;
        }
        *seen = true;
        if let Some(v) = parse_number(value) {
            return Some(v);
        }
    }

    if depth >= MAX_SCAN_DEPTH {
        return None;
    }
    map.values()
        .filter_map(Value::as_object)
        .find_map(|nested| scan_numeric(nested, patterns, excluded, depth + 1, seen))
}

fn matches_pattern(key: &str, patterns: &[&str]) -> bool {
    let lower = key.to_lowercase();
    patterns.iter().any(|p| lower.contains(p))
}
