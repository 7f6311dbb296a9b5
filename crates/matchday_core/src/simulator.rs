//! Marketing scenario calculator.
//!
//! Translates a promotion's historical uplift (or the blended average) plus
//! user-provided cost assumptions into projected attendance, incremental
//! revenue/profit, ROI, and break-even points. Every division-by-zero path
//! resolves to null, never a fault.

use serde::Deserialize;

use crate::error::{AnalysisError, Result};
use crate::model::{GameRecord, PromotionEffect};
use crate::round::{round2, round4, round_whole};
use crate::stats::mean;

/// Placeholder label when no specific promotion is selected
const BLENDED_LABEL: &str = "Blended historical avg";

fn default_base_attendance() -> i64 {
    22_000
}

/// Scenario parameters as received from the caller
#[derive(Debug, Clone, Deserialize)]
pub struct MarketingScenario {
    /// Promotion to model; blended historical average when absent
    #[serde(default)]
    pub promotion: Option<String>,
    #[serde(default = "default_base_attendance")]
    pub base_attendance: i64,
    #[serde(default)]
    pub media_spend: f64,
    #[serde(default)]
    pub variable_cost_per_incremental_fan: f64,
}

impl Default for MarketingScenario {
    fn default() -> Self {
        Self {
            promotion: None,
            base_attendance: default_base_attendance(),
            media_spend: 0.0,
            variable_cost_per_incremental_fan: 0.0,
        }
    }
}

impl MarketingScenario {
    /// Scenario parameters must be usable numbers; defaults are fine,
    /// NaN/infinity is not.
    fn validate(&self) -> Result<()> {
        if !self.media_spend.is_finite() {
            return Err(AnalysisError::InvalidScenario {
                field: "media_spend",
                reason: "must be a finite number",
            });
        }
        if !self.variable_cost_per_incremental_fan.is_finite() {
            return Err(AnalysisError::InvalidScenario {
                field: "variable_cost_per_incremental_fan",
                reason: "must be a finite number",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScenarioInputs {
    pub promotion: String,
    pub base_attendance: i64,
    pub media_spend: f64,
    pub variable_cost_per_incremental_fan: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScenarioAssumptions {
    pub expected_uplift_attendance: i64,
    pub expected_uplift_ci80_low: Option<i64>,
    pub expected_uplift_ci80_high: Option<i64>,
    pub avg_ticket_revenue_per_attendee: f64,
    pub avg_merch_revenue_per_attendee: f64,
    pub avg_total_revenue_per_attendee: f64,
    pub margin_per_incremental_fan: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScenarioOutputs {
    pub projected_attendance: i64,
    pub incremental_revenue: f64,
    pub total_campaign_cost: f64,
    pub incremental_profit: f64,
    pub roi: Option<f64>,
    pub break_even_uplift_attendance: Option<i64>,
    pub break_even_media_spend: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MarketingSimulationResult {
    pub inputs: ScenarioInputs,
    pub assumptions: ScenarioAssumptions,
    pub outputs: ScenarioOutputs,
}

/// Run one scenario against the current promotion ranking.
///
/// A named promotion found in `effects` supplies its own uplift, CI, and
/// without-group revenue rates; otherwise the blended mean uplift across
/// all promotions (0 if none exist) and whole-dataset averages apply, with
/// null CI bounds.
pub fn run_scenario(
    records: &[GameRecord],
    effects: &[PromotionEffect],
    scenario: &MarketingScenario,
) -> Result<MarketingSimulationResult> {
    scenario.validate()?;

    let default_avg_ticket_per_att = mean(
        &records
            .iter()
            .map(|r| r.ticket_rev_per_attendee)
            .collect::<Vec<_>>(),
    );
    let default_avg_merch_per_att = mean(
        &records
            .iter()
            .map(|r| r.merch_rev_per_attendee)
            .collect::<Vec<_>>(),
    );
    let default_avg_total_per_att = default_avg_ticket_per_att + default_avg_merch_per_att;

    let selected = scenario
        .promotion
        .as_deref()
        .and_then(|name| effects.iter().find(|e| e.promotion == name));

    let expected_uplift = match selected {
        Some(effect) => effect.uplift_attendance,
        None if !effects.is_empty() => round_whole(mean(
            &effects
                .iter()
                .map(|e| e.uplift_attendance as f64)
                .collect::<Vec<_>>(),
        )),
        None => 0,
    };
    let (ci_low, ci_high) = match selected {
        Some(effect) => (Some(effect.ci80_low), Some(effect.ci80_high)),
        None => (None, None),
    };

    // The "without" pool for a selected promotion is every game not running
    // it, matching how the effect itself was estimated.
    let (avg_total_per_att, avg_ticket_per_att, avg_merch_per_att) = match selected {
        Some(effect) => {
            let without: Vec<&GameRecord> = records
                .iter()
                .filter(|r| Some(r.promotion_name.as_str()) != scenario.promotion.as_deref())
                .collect();
            (
                effect.avg_revenue_per_attendee_without_promo,
                mean(
                    &without
                        .iter()
                        .map(|r| r.ticket_rev_per_attendee)
                        .collect::<Vec<_>>(),
                ),
                mean(
                    &without
                        .iter()
                        .map(|r| r.merch_rev_per_attendee)
                        .collect::<Vec<_>>(),
                ),
            )
        }
        None => (
            default_avg_total_per_att,
            default_avg_ticket_per_att,
            default_avg_merch_per_att,
        ),
    };

    let projected_attendance = scenario.base_attendance + expected_uplift;
    let incremental_revenue = expected_uplift as f64 * avg_total_per_att;
    // Variable cost applies only to fans actually gained
    let positive_uplift = expected_uplift.max(0);
    let campaign_variable_cost =
        positive_uplift as f64 * scenario.variable_cost_per_incremental_fan;
    let total_cost = scenario.media_spend + campaign_variable_cost;
    let incremental_profit = incremental_revenue - total_cost;

    let margin_per_incremental_fan =
        avg_total_per_att - scenario.variable_cost_per_incremental_fan;
    let break_even_uplift = if margin_per_incremental_fan > 0.0 {
        // Zero media spend breaks even at zero incremental fans
        Some((scenario.media_spend / margin_per_incremental_fan).ceil() as i64)
    } else {
        None
    };
    let break_even_media_spend = if expected_uplift > 0 && margin_per_incremental_fan > 0.0 {
        Some(expected_uplift as f64 * margin_per_incremental_fan)
    } else {
        None
    };
    let roi = if total_cost > 0.0 {
        Some(incremental_profit / total_cost)
    } else {
        None
    };

    Ok(MarketingSimulationResult {
        inputs: ScenarioInputs {
            promotion: scenario
                .promotion
                .clone()
                .unwrap_or_else(|| BLENDED_LABEL.to_string()),
            base_attendance: scenario.base_attendance,
            media_spend: round2(scenario.media_spend),
            variable_cost_per_incremental_fan: round2(scenario.variable_cost_per_incremental_fan),
        },
        assumptions: ScenarioAssumptions {
            expected_uplift_attendance: expected_uplift,
            expected_uplift_ci80_low: ci_low,
            expected_uplift_ci80_high: ci_high,
            avg_ticket_revenue_per_attendee: round2(avg_ticket_per_att),
            avg_merch_revenue_per_attendee: round2(avg_merch_per_att),
            avg_total_revenue_per_attendee: round2(avg_total_per_att),
            margin_per_incremental_fan: round2(margin_per_incremental_fan),
        },
        outputs: ScenarioOutputs {
            projected_attendance,
            incremental_revenue: round2(incremental_revenue),
            total_campaign_cost: round2(total_cost),
            incremental_profit: round2(incremental_profit),
            roi: roi.map(round4),
            break_even_uplift_attendance: break_even_uplift,
            break_even_media_spend: break_even_media_spend.map(round2),
        },
    })
}
