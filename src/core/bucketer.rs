use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

use crate::models::{Granularity, PeriodBucket, Trade};

/// Groups an ordered trade list into period buckets, ascending by key.
///
/// At `Granularity::Trade` every trade gets its own bucket (in merged order)
/// keyed `<timestamp>#<ordinal>`, so trades sharing a timestamp stay distinct
/// points. Other granularities sum pnl per calendar day, ISO week (Monday
/// start) or month of the recorded timestamp.
pub fn bucket(trades: &[Trade], granularity: Granularity) -> Vec<PeriodBucket> {
    if !granularity.is_bucketed() {
        return trades
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let mut b = PeriodBucket::new(trade_key(t.timestamp, i));
                b.add(t.pnl, &t.strategy_id);
                b
            })
            .collect();
    }

    let mut buckets: BTreeMap<String, PeriodBucket> = BTreeMap::new();
    for t in trades {
        let key = period_key(t.timestamp, granularity);
        buckets
            .entry(key)
            .or_insert_with_key(|k| PeriodBucket::new(k.clone()))
            .add(t.pnl, &t.strategy_id);
    }
    buckets.into_values().collect()
}

/// Key of the period containing `ts`. Keys sort chronologically as strings.
pub fn period_key(ts: NaiveDateTime, granularity: Granularity) -> String {
    let date = ts.date();
    match granularity {
        Granularity::Trade | Granularity::Daily => date.format("%Y-%m-%d").to_string(),
        Granularity::Weekly => week_start(date).format("%Y-%m-%d").to_string(),
        Granularity::Monthly => date.format("%Y-%m").to_string(),
    }
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn trade_key(ts: NaiveDateTime, index: usize) -> String {
    format!("{}#{}", ts.format("%Y-%m-%dT%H:%M:%S"), index + 1)
}
