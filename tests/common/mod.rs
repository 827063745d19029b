use serde_json::{json, Value};

use backtest_consolidator::consolidation::RawSources;

/// The canonical two-strategy example as raw export rows, using the loose
/// field names real backtest exports carry.
pub fn worked_raw_sources() -> RawSources {
    let mut raw = RawSources::new();
    raw.insert(
        "StrategyA",
        vec![
            json!({ "entry_date": "2025-01-01T09:00:00", "exit_date": "2025-01-01T10:00:00", "pnl": 100.0, "symbol": "WIN" }),
            json!({ "entry_date": "2025-01-02T09:00:00", "exit_date": "2025-01-02T10:00:00", "pnl": "(20,00)", "symbol": "WIN" }),
            json!({ "entry_date": "2025-01-03T09:00:00", "exit_date": "2025-01-03T10:00:00", "resultado": "R$ 200,00", "symbol": "WIN" }),
        ],
    );
    raw.insert(
        "StrategyB",
        vec![
            json!({ "Abertura": "01/01/2025 10:30", "Fechamento": "01/01/2025 11:00", "Res. Operação": "-50,00", "Ativo": "WDO" }),
            json!({ "Abertura": "03/01/2025 10:30", "Fechamento": "03/01/2025 11:00", "Res. Operação": "-100,00", "Ativo": "WDO" }),
            json!({ "comment": "summary row without a result" }),
        ],
    );
    raw
}

/// Deterministic pseudo-random pnl series (LCG), mixing wins and losses,
/// spread over several weeks with repeated timestamps.
pub fn generated_records(seed: u64, n: usize) -> Vec<Value> {
    let mut state = seed;
    (0..n)
        .map(|i| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let cents = ((state >> 33) % 40_000) as i64 - 18_000;
            let day = 1 + (i / 4) % 28;
            let hour = 9 + (i % 3);
            json!({
                "exit_date": format!("2024-03-{:02}T{:02}:00:00", day, hour),
                "pnl": cents as f64 / 100.0,
            })
        })
        .collect()
}
