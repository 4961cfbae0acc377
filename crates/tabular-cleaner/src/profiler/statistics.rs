//! Descriptive statistics over plain `f64` slices.
//!
//! Percentiles use linear interpolation between closest ranks: for `n` sorted
//! values the quantile `q` sits at position `(n - 1) * q`.

use crate::types::NumericSummary;
use crate::utils::round_to;

/// Decimal places used for every reported statistic.
pub const STAT_DECIMALS: u32 = 4;

/// Sort a copy of the values in ascending order.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Quantile of already sorted values, linear interpolation.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    let low = sorted[lower];
    let high = sorted[upper];
    Some(low + (high - low) * fraction)
}

/// Quantile of unsorted values, linear interpolation.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    quantile_sorted(&sorted(values), q)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (Bessel's correction, ddof = 1).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Count, mean, std, min, quartiles and max, rounded to 4 decimals.
pub fn describe(values: &[f64]) -> NumericSummary {
    let sorted = sorted(values);
    let round = |v: Option<f64>| v.map(|v| round_to(v, STAT_DECIMALS));

    NumericSummary {
        count: values.len(),
        mean: round(mean(values)),
        std: round(sample_std(values)),
        min: round(sorted.first().copied()),
        p25: round(quantile_sorted(&sorted, 0.25)),
        p50: round(quantile_sorted(&sorted, 0.5)),
        p75: round(quantile_sorted(&sorted, 0.75)),
        max: round(sorted.last().copied()),
    }
}
