//! Percentile engine and univariate summaries.

use crate::model::DistributionSummary;
use crate::round::{round2, round4};

/// Arithmetic mean; 0 for an empty series
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Bessel-corrected sample variance; 0 when n < 2
#[must_use]
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Sample standard deviation (n-1 denominator)
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// Median; 0 for an empty series
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut ordered = values.to_vec();
    ordered.sort_by(f64::total_cmp);
    let mid = ordered.len() / 2;
    if ordered.len() % 2 == 1 {
        ordered[mid]
    } else {
        (ordered[mid - 1] + ordered[mid]) / 2.0
    }
}

/// Percentile with linear interpolation between the floor and ceiling ranks
/// of index `(n-1) * q / 100` over the sorted values.
///
/// Empty input returns 0; `q <= 0` returns the minimum; `q >= 100` the
/// maximum.
#[must_use]
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut ordered = values.to_vec();
    ordered.sort_by(f64::total_cmp);

    if q <= 0.0 {
        return ordered[0];
    }
    if q >= 100.0 {
        return ordered[ordered.len() - 1];
    }

    let idx = (ordered.len() - 1) as f64 * (q / 100.0);
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        return ordered[lo];
    }
    let weight = idx - lo as f64;
    ordered[lo] * (1.0 - weight) + ordered[hi] * weight
}

/// Full univariate summary, rounded at the output boundary (2 decimals for
/// scale values, 4 for the coefficient of variation).
#[must_use]
pub fn summarize(values: &[f64]) -> DistributionSummary {
    if values.is_empty() {
        return DistributionSummary::empty();
    }

    let mean_val = mean(values);
    let std = sample_std_dev(values);
    let q1 = percentile(values, 25.0);
    let q3 = percentile(values, 75.0);

    DistributionSummary {
        count: values.len(),
        mean: round2(mean_val),
        median: round2(median(values)),
        std_dev: round2(std),
        min: round2(percentile(values, 0.0)),
        max: round2(percentile(values, 100.0)),
        q1: round2(q1),
        q3: round2(q3),
        iqr: round2(q3 - q1),
        p10: round2(percentile(values, 10.0)),
        p90: round2(percentile(values, 90.0)),
        coefficient_of_variation: if mean_val != 0.0 {
            round4(std / mean_val)
        } else {
            0.0
        },
    }
}
