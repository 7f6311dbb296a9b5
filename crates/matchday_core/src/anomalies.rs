//! Percentile-threshold anomaly tagging.

use crate::model::{AnomalyFlag, GameRecord};
use crate::round::round_whole;
use crate::stats::percentile;

pub const DEMAND_RISK: &str = "Demand Risk";
pub const DEMAND_SPIKE: &str = "Demand Spike";

/// Attendance thresholds used for anomaly tagging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandThresholds {
    pub low: f64,
    pub high: f64,
}

/// P20 / P80 cutoffs of the attendance distribution
#[must_use]
pub fn demand_thresholds(attendance: &[f64]) -> DemandThresholds {
    DemandThresholds {
        low: percentile(attendance, 20.0),
        high: percentile(attendance, 80.0),
    }
}

/// Tag bottom-quintile games as demand risk and top-quintile games as
/// demand spike, sorted ascending by attendance.
///
/// The risk condition is evaluated first: when P20 equals P80 (near-constant
/// attendance) a game matching both resolves to "Demand Risk".
#[must_use]
pub fn detect_anomalies(records: &[GameRecord]) -> Vec<AnomalyFlag> {
    let attendance: Vec<f64> = records.iter().map(|r| r.attendance as f64).collect();
    let thresholds = demand_thresholds(&attendance);

    let mut flags: Vec<AnomalyFlag> = records
        .iter()
        .filter_map(|r| {
            let att = r.attendance as f64;
            let tag = if att <= thresholds.low {
                DEMAND_RISK
            } else if att >= thresholds.high {
                DEMAND_SPIKE
            } else {
                return None;
            };
            Some(AnomalyFlag {
                game_id: r.id,
                game_date: r.game_date,
                opponent: r.opponent.clone(),
                attendance: r.attendance,
                total_revenue: round_whole(r.total_revenue),
                tag: tag.to_string(),
            })
        })
        .collect();

    flags.sort_by_key(|f| f.attendance);
    flags
}
