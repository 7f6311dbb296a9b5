//! Integration tests for the analytics pipeline
//!
//! Tests are organized by topic:
//! - `promotions` - Relabeling policy and promotion-effect estimation
//! - `orchestrator` - Advanced/holistic payload composition and contracts
//! - `scenarios` - Marketing simulator boundary cases

mod orchestrator;
mod scenarios;

use jiff::civil::{Date, date};

use crate::config::AnalysisConfig;
use crate::model::{GameFrame, RawGameRow};

/// Low iteration count keeps resampling tests fast without losing coverage
pub(crate) fn test_config() -> AnalysisConfig {
    AnalysisConfig {
        resample_iterations: 200,
        ..AnalysisConfig::default()
    }
}

pub(crate) fn game(id: i64, d: Date, attendance: i64, promo: &str) -> RawGameRow {
    RawGameRow {
        id,
        game_date: d,
        opponent: format!("Opponent {id}"),
        attendance: Some(attendance),
        competition: Some("League".to_string()),
        venue: Some("Home Park".to_string()),
        promotion_name: Some(promo.to_string()),
        ticket_revenue: Some(attendance as f64 * 40.0),
        tickets_sold: Some(attendance),
        merch_revenue: Some(attendance as f64 * 5.0),
        merch_units: Some(attendance / 10),
    }
}

/// A 10-game season spanning two months with two promotions
pub(crate) fn season_frame(config: &AnalysisConfig) -> GameFrame {
    let rows = vec![
        game(1, date(2025, 3, 1), 20_000, "None"),
        game(2, date(2025, 3, 8), 25_000, "Family Night"),
        game(3, date(2025, 3, 15), 18_000, "None"),
        game(4, date(2025, 3, 22), 27_000, "Family Night"),
        game(5, date(2025, 3, 29), 15_000, "None"),
        game(6, date(2025, 4, 5), 22_000, "Fan Giveaway"),
        game(7, date(2025, 4, 12), 17_000, "None"),
        game(8, date(2025, 4, 19), 26_000, "Family Night"),
        game(9, date(2025, 4, 26), 16_000, "Fan Giveaway"),
        game(10, date(2025, 5, 3), 28_000, "None"),
    ];
    GameFrame::new(rows, config)
}
