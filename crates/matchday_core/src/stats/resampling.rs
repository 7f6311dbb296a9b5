//! Bootstrap confidence intervals and permutation significance tests.
//!
//! Both routines take the generator explicitly. Callers seed a fresh
//! `SmallRng` per call (default seed 42); concurrent invocations must never
//! share one generator, or reproducibility breaks and results bleed across
//! requests.

use rand::Rng;
use rand::seq::SliceRandom;

use super::distribution::mean;

/// Default iteration count for both resampling loops
pub const DEFAULT_ITERATIONS: usize = 2_000;

/// Default seed for the per-call generators
pub const DEFAULT_SEED: u64 = 42;

/// 80% bootstrap confidence interval for `mean(a) - mean(b)`.
///
/// Draws `iterations` same-size with-replacement resamples from each side,
/// sorts the mean differences, and returns the values at the floor 10th and
/// 90th percentile ranks. Either sample empty (or zero iterations) yields
/// `(0.0, 0.0)`.
#[must_use]
pub fn bootstrap_diff_ci(
    a: &[f64],
    b: &[f64],
    iterations: usize,
    rng: &mut impl Rng,
) -> (f64, f64) {
    if a.is_empty() || b.is_empty() || iterations == 0 {
        return (0.0, 0.0);
    }

    let mut diffs = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let mean_a = resample_mean(a, rng);
        let mean_b = resample_mean(b, rng);
        diffs.push(mean_a - mean_b);
    }
    diffs.sort_by(f64::total_cmp);

    let lower = diffs[(0.1 * iterations as f64) as usize];
    let upper = diffs[(0.9 * iterations as f64) as usize];
    (lower, upper)
}

/// Mean of one with-replacement resample, drawn in index order
fn resample_mean(sample: &[f64], rng: &mut impl Rng) -> f64 {
    let n = sample.len();
    let sum: f64 = (0..n).map(|_| sample[rng.random_range(0..n)]).sum();
    sum / n as f64
}

/// Two-sided permutation p-value for the absolute difference of means.
///
/// Pools both samples, shuffles, re-splits at `a.len()`, and counts how
/// often the permuted |difference| is at least the observed one. Add-one
/// smoothing keeps the result in `[1/(iterations+1), 1]`, never exactly 0.
/// Either sample empty yields 1.0.
#[must_use]
pub fn permutation_p_value(a: &[f64], b: &[f64], iterations: usize, rng: &mut impl Rng) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 1.0;
    }

    let observed = (mean(a) - mean(b)).abs();
    let mut pooled: Vec<f64> = a.iter().chain(b.iter()).copied().collect();
    let size_a = a.len();

    let mut extreme_count = 0usize;
    for _ in 0..iterations {
        pooled.shuffle(rng);
        let diff = (mean(&pooled[..size_a]) - mean(&pooled[size_a..])).abs();
        if diff >= observed {
            extreme_count += 1;
        }
    }

    (extreme_count as f64 + 1.0) / (iterations as f64 + 1.0)
}
