use crate::models::{EquityPoint, PeriodBucket};

/// Walks the buckets once, left to right, accumulating equity and tracking
/// the running peak and the drawdown beneath it.
///
/// Equity and peak both start at a zero baseline. A series that never turns a
/// profit therefore keeps `peak == 0` and reports its full deficit from zero
/// as drawdown, rather than measuring from its own first (negative) point.
/// `drawdown_percent` is relative to the peak and is `0` while the peak is not
/// positive.
pub fn compute_curve(buckets: &[PeriodBucket]) -> Vec<EquityPoint> {
    let mut curve = Vec::with_capacity(buckets.len());
    let mut equity = 0.0f64;
    let mut peak = 0.0f64;
    let mut trades = 0usize;

    for b in buckets {
        equity += b.pnl_sum;
        peak = peak.max(equity);
        trades += b.trade_count;

        let drawdown_absolute = (peak - equity).max(0.0);
        let drawdown_percent = if peak > 0.0 {
            drawdown_absolute / peak * 100.0
        } else {
            0.0
        };

        curve.push(EquityPoint {
            key: b.key.clone(),
            equity,
            peak,
            drawdown_absolute,
            drawdown_percent,
            trade_count_cumulative: trades,
            period_pnl: b.pnl_sum,
        });
    }

    curve
}

/// Largest drawdown on a curve, as `(absolute, percent)`. Both maxima are
/// taken independently over all points.
pub fn max_drawdown(curve: &[EquityPoint]) -> (f64, f64) {
    curve.iter().fold((0.0f64, 0.0f64), |(abs, pct), p| {
        (abs.max(p.drawdown_absolute), pct.max(p.drawdown_percent))
    })
}

/// Mean of the strictly positive drawdowns. Points sitting at their peak are
/// not samples.
pub fn average_drawdown(curve: &[EquityPoint]) -> f64 {
    let (sum, count) = curve
        .iter()
        .filter(|p| p.drawdown_absolute > 0.0)
        .fold((0.0f64, 0usize), |(s, n), p| (s + p.drawdown_absolute, n + 1));
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn buckets(pnls: &[f64]) -> Vec<PeriodBucket> {
        pnls.iter()
            .enumerate()
            .map(|(i, &p)| PeriodBucket {
                key: format!("p{}", i),
                pnl_sum: p,
                trade_count: 1,
                contributing_strategies: BTreeSet::new(),
            })
            .collect()
    }

    #[test]
    fn empty_buckets_give_empty_curve() {
        assert!(compute_curve(&[]).is_empty());
        assert_eq!(max_drawdown(&[]), (0.0, 0.0));
        assert_eq!(average_drawdown(&[]), 0.0);
    }

    #[test]
    fn tracks_equity_peak_and_drawdown() {
        let curve = compute_curve(&buckets(&[50.0, -20.0, 100.0]));
        assert_eq!(curve.len(), 3);

        assert_eq!(curve[0].equity, 50.0);
        assert_eq!(curve[0].peak, 50.0);
        assert_eq!(curve[0].drawdown_absolute, 0.0);

        assert_eq!(curve[1].equity, 30.0);
        assert_eq!(curve[1].peak, 50.0);
        assert_eq!(curve[1].drawdown_absolute, 20.0);
        assert!((curve[1].drawdown_percent - 40.0).abs() < 1e-9);
        assert_eq!(curve[1].period_pnl, -20.0);

        assert_eq!(curve[2].equity, 130.0);
        assert_eq!(curve[2].peak, 130.0);
        assert_eq!(curve[2].drawdown_absolute, 0.0);
        assert_eq!(curve[2].trade_count_cumulative, 3);
    }

    #[test]
    fn all_losing_series_measures_from_zero() {
        let curve = compute_curve(&buckets(&[-10.0, -5.0, 3.0, -8.0]));
        for p in &curve {
            assert_eq!(p.peak, 0.0);
            assert_eq!(p.drawdown_absolute, p.equity.abs());
            assert_eq!(p.drawdown_percent, 0.0);
        }
        assert_eq!(max_drawdown(&curve).0, 20.0);
    }

    #[test]
    fn peak_never_decreases() {
        let curve = compute_curve(&buckets(&[5.0, -3.0, 10.0, -50.0, 20.0, 40.0, -1.0]));
        for w in curve.windows(2) {
            assert!(w[1].peak >= w[0].peak);
        }
        assert!(curve.iter().all(|p| p.drawdown_absolute >= 0.0));
    }

    #[test]
    fn average_ignores_points_at_peak() {
        // drawdowns: 0, 20, 0, 10 -> mean over positives = 15
        let curve = compute_curve(&buckets(&[50.0, -20.0, 100.0, -10.0]));
        assert!((average_drawdown(&curve) - 15.0).abs() < 1e-9);
        assert_eq!(max_drawdown(&curve).0, 20.0);
    }
}
