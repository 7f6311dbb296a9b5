//! Covariance, Pearson correlation, and qualitative strength labels.

use super::distribution::{mean, sample_std_dev};

/// Sample covariance (n-1 denominator); 0 on mismatched lengths or n < 2
#[must_use]
pub fn sample_covariance(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return 0.0;
    }
    let a_mean = mean(a);
    let b_mean = mean(b);
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - a_mean) * (y - b_mean))
        .sum::<f64>()
        / (a.len() - 1) as f64
}

/// Pearson correlation; 0 when either series has zero variance or the
/// equal-length requirement fails
#[must_use]
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> f64 {
    let sd_a = sample_std_dev(a);
    let sd_b = sample_std_dev(b);
    if sd_a == 0.0 || sd_b == 0.0 {
        return 0.0;
    }
    sample_covariance(a, b) / (sd_a * sd_b)
}

/// Qualitative label for a correlation coefficient
#[must_use]
pub fn correlation_strength(r: f64) -> &'static str {
    if r >= 0.7 {
        "strong positive"
    } else if r >= 0.3 {
        "moderate positive"
    } else if r > 0.1 {
        "weak positive"
    } else if r <= -0.7 {
        "strong negative"
    } else if r <= -0.3 {
        "moderate negative"
    } else if r < -0.1 {
        "weak negative"
    } else {
        "near-zero"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_is_symmetric() {
        let a = [1.0, 2.0, 4.0, 8.0, 16.0];
        let b = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(pearson_correlation(&a, &b), pearson_correlation(&b, &a));
    }

    #[test]
    fn test_perfectly_linear_is_one() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [10.0, 20.0, 30.0, 40.0];
        let r = pearson_correlation(&a, &b);
        assert!((r - 1.0).abs() < 1e-12);

        let inverse = [40.0, 30.0, 20.0, 10.0];
        let r = pearson_correlation(&a, &inverse);
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_series_is_zero() {
        let constant = [5.0, 5.0, 5.0];
        let varying = [1.0, 2.0, 3.0];
        assert_eq!(pearson_correlation(&constant, &varying), 0.0);
        assert_eq!(pearson_correlation(&varying, &constant), 0.0);
    }

    #[test]
    fn test_mismatched_lengths_are_zero() {
        assert_eq!(sample_covariance(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(correlation_strength(0.85), "strong positive");
        assert_eq!(correlation_strength(0.7), "strong positive");
        assert_eq!(correlation_strength(0.5), "moderate positive");
        assert_eq!(correlation_strength(0.3), "moderate positive");
        assert_eq!(correlation_strength(0.2), "weak positive");
        assert_eq!(correlation_strength(0.1), "near-zero");
        assert_eq!(correlation_strength(0.0), "near-zero");
        assert_eq!(correlation_strength(-0.1), "near-zero");
        assert_eq!(correlation_strength(-0.2), "weak negative");
        assert_eq!(correlation_strength(-0.3), "moderate negative");
        assert_eq!(correlation_strength(-0.7), "strong negative");
        assert_eq!(correlation_strength(-0.95), "strong negative");
    }
}
