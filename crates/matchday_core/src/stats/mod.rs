//! Side-effect-free statistical primitives.
//!
//! Each routine operates only on its inputs so it can be unit tested
//! without constructing the full pipeline. Degenerate inputs (n < 2, zero
//! variance, empty series) resolve to defined neutral values, never errors.

pub mod association;
pub mod distribution;
pub mod regression;
pub mod resampling;

pub use association::{correlation_strength, pearson_correlation, sample_covariance};
pub use distribution::{mean, median, percentile, sample_std_dev, sample_variance, summarize};
pub use regression::{LinearFit, forecast_with_intervals, linear_fit};
pub use resampling::{bootstrap_diff_ci, permutation_p_value};
