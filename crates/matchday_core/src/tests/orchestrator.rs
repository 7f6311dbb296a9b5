//! Advanced/holistic payload composition and wire contracts.

use super::test_config;
use crate::analysis::{MixLines, advanced_analysis, holistic_analysis, simulate_marketing};
use crate::error::AnalysisError;
use crate::model::{DataSources, GameFrame};
use crate::simulator::MarketingScenario;

#[test]
fn test_empty_frame_is_rejected_by_every_entry_point() {
    let config = test_config();
    let frame = GameFrame::new(Vec::new(), &config);
    assert!(frame.is_empty());

    let err = advanced_analysis(&frame, &config).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyFrame));

    let err = holistic_analysis(&frame, &MixLines::default(), DataSources::default(), &config)
        .unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyFrame));

    let err = simulate_marketing(&frame, &MarketingScenario::default(), &config).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyFrame));
}

#[test]
fn test_advanced_analysis_headlines() {
    let config = test_config();
    let frame = super::season_frame(&config);
    let payload = advanced_analysis(&frame, &config).unwrap();

    assert_eq!(payload.sample_size_games, 10);
    assert_eq!(payload.attendance.mean, 21_400);
    assert_eq!(payload.attendance.median, 21_000);
    assert_eq!(payload.attendance.min, 15_000);
    assert_eq!(payload.attendance.max, 28_000);

    // Fixture revenue is 40 ticket + 5 merch per attendee
    assert_eq!(payload.revenue.total_ticket_revenue, 8_560_000);
    assert_eq!(payload.revenue.total_merch_revenue, 1_070_000);
    assert_eq!(payload.revenue.ticket_revenue_per_attendee, 40.0);
    assert_eq!(payload.revenue.merch_revenue_per_attendee, 5.0);
    assert_eq!(payload.revenue.merch_units_per_1000_attendees, 100.0);

    assert_eq!(payload.forecast.history_attendance.len(), 10);
    assert_eq!(payload.forecast.predictions.len(), config.forecast_horizon);

    assert_eq!(payload.promotion_effects.len(), 2);
    assert_eq!(payload.promotion_effects[0].promotion, "Family Night");
    assert_eq!(payload.promotion_effects[0].uplift_attendance, 6_571);
    assert_eq!(payload.promotion_effects[1].promotion, "Fan Giveaway");
    assert_eq!(payload.promotion_effects[1].uplift_attendance, 667);
}

#[test]
fn test_holistic_kpis_and_correlations() {
    let config = test_config();
    let frame = super::season_frame(&config);
    let payload =
        holistic_analysis(&frame, &MixLines::default(), DataSources::default(), &config).unwrap();

    assert_eq!(payload.meta.sample_size_games, 10);
    assert_eq!(payload.meta.stadium_capacity, 30_000);
    assert_eq!(payload.meta.data_sources.database, "matchday.db");

    assert_eq!(payload.kpis.avg_attendance, 21_400);
    assert_eq!(payload.kpis.total_revenue, 9_630_000);
    assert_eq!(payload.kpis.revenue_per_attendee, 45.0);
    assert_eq!(payload.kpis.avg_occupancy_rate, 0.7133);

    // Revenue is exactly linear in attendance in the fixture
    assert_eq!(payload.correlations.attendance_vs_total_revenue, 1.0);
    // Flat per-attendee rates have no variance to correlate against
    assert_eq!(payload.correlations.attendance_vs_merch_rev_per_attendee, 0.0);
    assert_eq!(payload.correlations.occupancy_vs_revenue_per_attendee, 0.0);

    assert_eq!(payload.statistics.associations.len(), 3);
    assert_eq!(
        payload.statistics.associations[0].interpretation,
        "strong positive"
    );

    assert_eq!(payload.statistics.descriptive.attendance.count, 10);
    assert_eq!(payload.statistics.descriptive.attendance.min, 15_000.0);
    assert_eq!(payload.statistics.descriptive.attendance.max, 28_000.0);
    let thresholds = &payload.statistics.descriptive.thresholds;
    assert_eq!(thresholds.attendance_p20_demand_risk_cutoff, 16_800.0);
    assert_eq!(thresholds.attendance_p80_demand_spike_cutoff, 26_200.0);

    assert_eq!(payload.attendance_time_series.len(), 10);
    assert_eq!(payload.attendance_time_series[0].game_id, 1);

    assert!(!payload.insights.is_empty());
    assert!(!payload.recommendations.is_empty());
    assert!(payload.recommendations.len() <= 5);
    assert!(!payload.caveats.is_empty());
}

#[test]
fn test_holistic_segments_and_anomalies() {
    let config = test_config();
    let frame = super::season_frame(&config);
    let payload =
        holistic_analysis(&frame, &MixLines::default(), DataSources::default(), &config).unwrap();

    let by_competition = &payload.segments.by_competition;
    assert_eq!(by_competition.len(), 1);
    assert_eq!(by_competition[0].segment, "League");
    assert_eq!(by_competition[0].games, 10);
    assert_eq!(by_competition[0].avg_attendance, 21_400);

    // Months ranked by average attendance: May (28000), Mar (21000), Apr (20250)
    let by_month = &payload.segments.by_month;
    assert_eq!(by_month.len(), 3);
    assert_eq!(by_month[0].segment, "May");
    assert_eq!(by_month[0].avg_attendance, 28_000);
    assert_eq!(by_month[1].segment, "Mar");
    assert_eq!(by_month[1].avg_attendance, 21_000);
    assert_eq!(by_month[2].segment, "Apr");
    assert_eq!(by_month[2].avg_attendance, 20_250);

    // P20 = 16800, P80 = 26200; flags come back sorted by attendance
    let anomalies = &payload.anomalies;
    assert_eq!(anomalies.len(), 4);
    assert_eq!(anomalies[0].attendance, 15_000);
    assert_eq!(anomalies[0].tag, "Demand Risk");
    assert_eq!(anomalies[1].attendance, 16_000);
    assert_eq!(anomalies[1].tag, "Demand Risk");
    assert_eq!(anomalies[2].attendance, 27_000);
    assert_eq!(anomalies[2].tag, "Demand Spike");
    assert_eq!(anomalies[3].attendance, 28_000);
    assert_eq!(anomalies[3].tag, "Demand Spike");

    // No line aggregates supplied, so the mix blocks are empty
    assert!(payload.mix.ticket_mix.is_empty());
    assert!(payload.mix.merch_mix.is_empty());
}

#[test]
fn test_holistic_payload_field_names_are_stable() {
    let config = test_config();
    let frame = super::season_frame(&config);
    let payload =
        holistic_analysis(&frame, &MixLines::default(), DataSources::default(), &config).unwrap();

    let json = serde_json::to_value(&payload).unwrap();
    let top = json.as_object().unwrap();
    for key in [
        "context",
        "workflow",
        "meta",
        "kpis",
        "attendance_time_series",
        "forecast",
        "promotion_effects",
        "segments",
        "mix",
        "correlations",
        "statistics",
        "methods",
        "caveats",
        "recommendations",
        "anomalies",
        "insights",
    ] {
        assert!(top.contains_key(key), "missing top-level key {key}");
    }

    let effect = json["promotion_effects"][0].as_object().unwrap();
    for key in [
        "promotion",
        "n_games_with_promo",
        "mean_with_promo",
        "mean_without_promo",
        "uplift_attendance",
        "uplift_pct",
        "ci80_low",
        "ci80_high",
        "permutation_p_value",
        "is_significant_at_10pct",
        "avg_revenue_per_attendee_without_promo",
        "modeled_revenue_lift_from_uplift",
    ] {
        assert!(effect.contains_key(key), "missing effect key {key}");
    }

    // Dates serialize as ISO strings
    assert_eq!(json["attendance_time_series"][0]["game_date"], "2025-03-01");
    assert_eq!(json["forecast"]["history_labels"][0], "2025-03-01");
}

#[test]
fn test_simulate_marketing_uses_frame_ranking() {
    let config = test_config();
    let frame = super::season_frame(&config);

    let scenario = MarketingScenario {
        promotion: Some("Family Night".to_string()),
        base_attendance: 20_000,
        media_spend: 50_000.0,
        variable_cost_per_incremental_fan: 5.0,
    };
    let result = simulate_marketing(&frame, &scenario, &config).unwrap();

    assert_eq!(result.inputs.promotion, "Family Night");
    assert_eq!(result.assumptions.expected_uplift_attendance, 6_571);
    assert_eq!(result.outputs.projected_attendance, 26_571);
    assert!(result.assumptions.expected_uplift_ci80_low.is_some());
}
