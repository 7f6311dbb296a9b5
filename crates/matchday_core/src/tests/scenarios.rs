//! Marketing simulator boundary cases.

use super::test_config;
use crate::error::AnalysisError;
use crate::model::PromotionEffect;
use crate::simulator::{MarketingScenario, run_scenario};

fn effect(promotion: &str, uplift: i64, avg_rev_per_att_without: f64) -> PromotionEffect {
    PromotionEffect {
        promotion: promotion.to_string(),
        n_games_with_promo: 2,
        mean_with_promo: 26_000,
        mean_without_promo: 26_000 - uplift,
        uplift_attendance: uplift,
        uplift_pct: 0.0,
        ci80_low: uplift - 500,
        ci80_high: uplift + 500,
        permutation_p_value: 0.5,
        is_significant_at_10pct: false,
        avg_total_revenue_with_promo: 0,
        avg_total_revenue_without_promo: 0,
        avg_revenue_per_attendee_with_promo: avg_rev_per_att_without,
        avg_revenue_per_attendee_without_promo: avg_rev_per_att_without,
        raw_avg_total_revenue_diff: 0,
        modeled_revenue_lift_from_uplift: 0,
    }
}

#[test]
fn test_zero_cost_scenario_has_null_roi_and_zero_break_even() {
    let effects = vec![effect("Test Promo", 1_000, 10.0)];
    let scenario = MarketingScenario {
        promotion: Some("Test Promo".to_string()),
        base_attendance: 22_000,
        media_spend: 0.0,
        variable_cost_per_incremental_fan: 0.0,
    };
    let result = run_scenario(&[], &effects, &scenario).unwrap();

    assert_eq!(result.outputs.projected_attendance, 23_000);
    assert_eq!(result.outputs.incremental_revenue, 10_000.0);
    assert_eq!(result.outputs.total_campaign_cost, 0.0);
    assert_eq!(result.outputs.incremental_profit, 10_000.0);
    // ROI is undefined at zero cost, never a division fault
    assert_eq!(result.outputs.roi, None);
    // Zero media spend with positive margin breaks even at zero fans
    assert_eq!(result.outputs.break_even_uplift_attendance, Some(0));
    assert_eq!(result.outputs.break_even_media_spend, Some(10_000.0));
    assert_eq!(result.assumptions.margin_per_incremental_fan, 10.0);
    assert_eq!(result.assumptions.expected_uplift_ci80_low, Some(500));
    assert_eq!(result.assumptions.expected_uplift_ci80_high, Some(1_500));
}

#[test]
fn test_blended_average_when_no_promotion_selected() {
    let config = test_config();
    let frame = super::season_frame(&config);
    let effects = crate::promotions::compute_promotion_effects(frame.records(), &config);

    let scenario = MarketingScenario::default();
    let result = run_scenario(frame.records(), &effects, &scenario).unwrap();

    assert_eq!(result.inputs.promotion, "Blended historical avg");
    // Mean of the two ranked uplifts (6571 and 667)
    assert_eq!(result.assumptions.expected_uplift_attendance, 3_619);
    assert_eq!(result.assumptions.expected_uplift_ci80_low, None);
    assert_eq!(result.assumptions.expected_uplift_ci80_high, None);
    // Fixture revenue is a flat 45/attendee
    assert_eq!(result.assumptions.avg_total_revenue_per_attendee, 45.0);
    assert_eq!(result.outputs.incremental_revenue, 162_855.0);
}

#[test]
fn test_unknown_promotion_falls_back_to_blended_uplift() {
    let config = test_config();
    let frame = super::season_frame(&config);
    let effects = crate::promotions::compute_promotion_effects(frame.records(), &config);

    let scenario = MarketingScenario {
        promotion: Some("Mystery Night".to_string()),
        ..MarketingScenario::default()
    };
    let result = run_scenario(frame.records(), &effects, &scenario).unwrap();

    // The requested name is echoed back even though no effect matched
    assert_eq!(result.inputs.promotion, "Mystery Night");
    assert_eq!(result.assumptions.expected_uplift_attendance, 3_619);
    assert_eq!(result.assumptions.expected_uplift_ci80_low, None);
}

#[test]
fn test_negative_uplift_carries_no_variable_cost() {
    let effects = vec![effect("Bad Promo", -500, 20.0)];
    let scenario = MarketingScenario {
        promotion: Some("Bad Promo".to_string()),
        base_attendance: 22_000,
        media_spend: 100.0,
        variable_cost_per_incremental_fan: 2.0,
    };
    let result = run_scenario(&[], &effects, &scenario).unwrap();

    assert_eq!(result.outputs.projected_attendance, 21_500);
    assert_eq!(result.outputs.incremental_revenue, -10_000.0);
    // Variable cost applies only to fans gained, so cost is media only
    assert_eq!(result.outputs.total_campaign_cost, 100.0);
    assert_eq!(result.outputs.incremental_profit, -10_100.0);
    assert_eq!(result.outputs.roi, Some(-101.0));
    // ceil(100 / 18)
    assert_eq!(result.outputs.break_even_uplift_attendance, Some(6));
    // No break-even spend without a positive expected uplift
    assert_eq!(result.outputs.break_even_media_spend, None);
}

#[test]
fn test_non_positive_margin_disables_break_evens() {
    let effects = vec![effect("Thin Promo", 1_000, 10.0)];
    let scenario = MarketingScenario {
        promotion: Some("Thin Promo".to_string()),
        base_attendance: 22_000,
        media_spend: 5_000.0,
        variable_cost_per_incremental_fan: 10.0,
    };
    let result = run_scenario(&[], &effects, &scenario).unwrap();

    assert_eq!(result.assumptions.margin_per_incremental_fan, 0.0);
    assert_eq!(result.outputs.break_even_uplift_attendance, None);
    assert_eq!(result.outputs.break_even_media_spend, None);
}

#[test]
fn test_non_finite_inputs_are_rejected() {
    let scenario = MarketingScenario {
        media_spend: f64::NAN,
        ..MarketingScenario::default()
    };
    let err = run_scenario(&[], &[], &scenario).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InvalidScenario {
            field: "media_spend",
            ..
        }
    ));

    let scenario = MarketingScenario {
        variable_cost_per_incremental_fan: f64::INFINITY,
        ..MarketingScenario::default()
    };
    let err = run_scenario(&[], &[], &scenario).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidScenario { .. }));
}

#[test]
fn test_no_effects_and_no_selection_yields_zero_uplift() {
    let config = test_config();
    let frame = super::season_frame(&config);

    let scenario = MarketingScenario {
        media_spend: 1_000.0,
        ..MarketingScenario::default()
    };
    let result = run_scenario(frame.records(), &[], &scenario).unwrap();

    assert_eq!(result.assumptions.expected_uplift_attendance, 0);
    assert_eq!(result.outputs.incremental_revenue, 0.0);
    assert_eq!(result.outputs.total_campaign_cost, 1_000.0);
    assert_eq!(result.outputs.roi, Some(-1.0));
}
