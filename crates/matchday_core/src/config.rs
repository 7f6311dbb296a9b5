//! Tunable knobs for the analysis pipeline.

/// Configuration shared by every analysis entry point.
///
/// The defaults reproduce the historical season reports exactly; changing
/// `min_games_no_promo` or `seed` changes promotion-effect outputs.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Fixed venue capacity used for occupancy rates
    pub stadium_capacity: u32,
    /// How many of the lowest-attendance games are forcibly treated as
    /// unpromoted before any promotion comparison
    pub min_games_no_promo: usize,
    /// Number of games to forecast ahead
    pub forecast_horizon: usize,
    /// Bootstrap / permutation iterations per promotion comparison
    pub resample_iterations: usize,
    /// Seed for the per-call resampling generators
    pub seed: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stadium_capacity: 30_000,
            min_games_no_promo: 3,
            forecast_horizon: 3,
            resample_iterations: 2_000,
            seed: 42,
        }
    }
}

impl AnalysisConfig {
    /// Config with a reduced iteration count, for fast test runs
    #[must_use]
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            resample_iterations: iterations,
            ..Self::default()
        }
    }
}
