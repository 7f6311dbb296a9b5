//! Matchday attendance and revenue analytics engine
//!
//! This crate is the statistical core behind the fan-economics dashboard.
//! It consumes an already-materialized, date-ordered "game frame" (joined
//! attendance, ticketing, and merchandise records) and produces
//! decision-support analytics:
//! - Distribution summaries and cross-metric correlations
//! - OLS attendance trend forecast with 80% prediction intervals
//! - Promotion uplift estimates with bootstrap CIs and permutation tests
//! - Segment breakdowns by competition, weekday, and month
//! - Percentile-based demand anomaly flags
//! - A marketing ROI / break-even scenario simulator
//!
//! The engine performs no I/O, network, or persistence. Every invocation is
//! single-threaded synchronous computation over its inputs; concurrent
//! callers each get independently-seeded resampling generators, so results
//! are reproducible per call.

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod anomalies;
pub mod error;
pub mod mix;
pub mod narrative;
pub mod promotions;
pub mod round;
pub mod segments;
pub mod simulator;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{MixLines, advanced_analysis, holistic_analysis, simulate_marketing};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use model::{GameFrame, GameRecord, NO_PROMOTION, RawGameRow};
pub use simulator::MarketingScenario;
