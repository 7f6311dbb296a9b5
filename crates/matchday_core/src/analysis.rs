//! Stateless orchestration of the full analytics pipeline.
//!
//! Every entry point recomputes its payload from the frame it is handed;
//! nothing is cached across calls and nothing outlives a single invocation.
//! The only error a caller sees is the "no data" condition on an empty
//! frame; every statistical degeneracy deeper in the pipeline resolves to
//! a neutral value instead.

use crate::anomalies::{demand_thresholds, detect_anomalies};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::mix::{MerchLine, TicketLine, merch_mix, ticket_mix};
use crate::model::{
    AdvancedAnalysis, AnomalyThresholds, AssociationSummary, AttendanceHeadline,
    CorrelationMatrix, DataSources, DescriptiveStatistics, ForecastBlock, GameFrame,
    HolisticAnalysis, MetaInfo, Mix, RevenueHeadline, SeasonKpis, Segments, Statistics,
    TimeSeriesPoint,
};
use crate::narrative;
use crate::promotions::compute_promotion_effects;
use crate::round::{round2, round4, round_whole};
use crate::segments::{SegmentKey, segment_summary};
use crate::simulator::{MarketingScenario, MarketingSimulationResult, run_scenario};
use crate::stats::{
    correlation_strength, forecast_with_intervals, mean, median, pearson_correlation,
    sample_std_dev, summarize,
};

/// Grouped line aggregates needed for the mix decomposition, supplied by
/// the data layer alongside the frame.
#[derive(Debug, Clone, Default)]
pub struct MixLines {
    pub tickets: Vec<TicketLine>,
    pub merch: Vec<MerchLine>,
}

/// Focused inference payload: headline stats, forecast, promotion effects.
pub fn advanced_analysis(frame: &GameFrame, config: &AnalysisConfig) -> Result<AdvancedAnalysis> {
    if frame.is_empty() {
        return Err(AnalysisError::EmptyFrame);
    }
    let records = frame.records();

    let attendance = frame.attendance_values();
    let total_attendance: f64 = attendance.iter().sum();
    let total_ticket_revenue: f64 = records.iter().map(|r| r.ticket_revenue).sum();
    let total_merch_revenue: f64 = records.iter().map(|r| r.merch_revenue).sum();
    let total_merch_units: i64 = records.iter().map(|r| r.merch_units).sum();

    let attendance_sd = sample_std_dev(&attendance);
    let attendance_mean = mean(&attendance);
    let forecast = forecast_with_intervals(&attendance, config.forecast_horizon);

    let per_attendee = |total: f64| {
        if total_attendance != 0.0 {
            round2(total / total_attendance)
        } else {
            0.0
        }
    };

    Ok(AdvancedAnalysis {
        sample_size_games: frame.len(),
        attendance: AttendanceHeadline {
            mean: round_whole(attendance_mean),
            median: round_whole(median(&attendance)),
            std_dev: round2(attendance_sd),
            min: records.iter().map(|r| r.attendance).min().unwrap_or(0),
            max: records.iter().map(|r| r.attendance).max().unwrap_or(0),
            coefficient_of_variation: if attendance_mean != 0.0 {
                round4(attendance_sd / attendance_mean)
            } else {
                0.0
            },
            trend_per_game: forecast.slope_per_game,
        },
        revenue: RevenueHeadline {
            total_ticket_revenue: round_whole(total_ticket_revenue),
            total_merch_revenue: round_whole(total_merch_revenue),
            ticket_revenue_per_attendee: per_attendee(total_ticket_revenue),
            merch_revenue_per_attendee: per_attendee(total_merch_revenue),
            merch_units_per_1000_attendees: if total_attendance != 0.0 {
                round2(total_merch_units as f64 / total_attendance * 1_000.0)
            } else {
                0.0
            },
        },
        forecast: forecast_block(frame, config),
        promotion_effects: compute_promotion_effects(records, config),
    })
}

/// The full dashboard payload, composed per request.
pub fn holistic_analysis(
    frame: &GameFrame,
    mix_lines: &MixLines,
    sources: DataSources,
    config: &AnalysisConfig,
) -> Result<HolisticAnalysis> {
    if frame.is_empty() {
        return Err(AnalysisError::EmptyFrame);
    }
    let records = frame.records();

    let attendance = frame.attendance_values();
    let total_attendance: f64 = attendance.iter().sum();
    let total_ticket_revenue: f64 = records.iter().map(|r| r.ticket_revenue).sum();
    let total_merch_revenue: f64 = records.iter().map(|r| r.merch_revenue).sum();
    let total_revenue = total_ticket_revenue + total_merch_revenue;
    let total_merch_units: i64 = records.iter().map(|r| r.merch_units).sum();

    let attendance_sd = sample_std_dev(&attendance);
    let attendance_mean = mean(&attendance);
    let forecast = forecast_with_intervals(&attendance, config.forecast_horizon);
    let promotion_effects = compute_promotion_effects(records, config);

    let total_revenue_values: Vec<f64> = records.iter().map(|r| r.total_revenue).collect();
    let rev_per_att_values: Vec<f64> = records.iter().map(|r| r.revenue_per_attendee).collect();
    let ticket_per_att_values: Vec<f64> =
        records.iter().map(|r| r.ticket_rev_per_attendee).collect();
    let merch_per_att_values: Vec<f64> =
        records.iter().map(|r| r.merch_rev_per_attendee).collect();
    let occupancy_values: Vec<f64> = records.iter().map(|r| r.occupancy_rate).collect();

    let correlations = CorrelationMatrix {
        attendance_vs_total_revenue: round4(pearson_correlation(
            &attendance,
            &total_revenue_values,
        )),
        attendance_vs_merch_rev_per_attendee: round4(pearson_correlation(
            &attendance,
            &merch_per_att_values,
        )),
        occupancy_vs_revenue_per_attendee: round4(pearson_correlation(
            &occupancy_values,
            &rev_per_att_values,
        )),
    };

    let associations = [
        (
            "attendance_vs_total_revenue",
            correlations.attendance_vs_total_revenue,
        ),
        (
            "attendance_vs_merch_rev_per_attendee",
            correlations.attendance_vs_merch_rev_per_attendee,
        ),
        (
            "occupancy_vs_revenue_per_attendee",
            correlations.occupancy_vs_revenue_per_attendee,
        ),
    ]
    .into_iter()
    .map(|(pair, r)| AssociationSummary {
        metric_pair: pair.to_string(),
        correlation: r,
        interpretation: correlation_strength(r).to_string(),
    })
    .collect();

    let thresholds = demand_thresholds(&attendance);
    let anomalies = detect_anomalies(records);

    let per_attendee = |total: f64| {
        if total_attendance != 0.0 {
            round2(total / total_attendance)
        } else {
            0.0
        }
    };

    let kpis = SeasonKpis {
        avg_attendance: round_whole(attendance_mean),
        median_attendance: round_whole(median(&attendance)),
        attendance_std_dev: round2(attendance_sd),
        attendance_trend_per_game: forecast.slope_per_game,
        forecast_r_squared: forecast.r_squared,
        total_ticket_revenue: round_whole(total_ticket_revenue),
        total_merch_revenue: round_whole(total_merch_revenue),
        total_revenue: round_whole(total_revenue),
        revenue_per_attendee: per_attendee(total_revenue),
        ticket_revenue_per_attendee: per_attendee(total_ticket_revenue),
        merch_revenue_per_attendee: per_attendee(total_merch_revenue),
        merch_units_per_1000_attendees: if total_attendance != 0.0 {
            round2(total_merch_units as f64 / total_attendance * 1_000.0)
        } else {
            0.0
        },
        avg_occupancy_rate: round4(mean(&occupancy_values)),
    };

    let attendance_time_series = records
        .iter()
        .map(|r| TimeSeriesPoint {
            game_id: r.id,
            game_date: r.game_date,
            opponent: r.opponent.clone(),
            attendance: r.attendance,
            occupancy_rate: round4(r.occupancy_rate),
            total_revenue: round_whole(r.total_revenue),
            revenue_per_attendee: round2(r.revenue_per_attendee),
            promotion_name: r.promotion_name.clone(),
            competition: r.competition.clone(),
            weekday: r.weekday.clone(),
        })
        .collect();

    let forecast_block = forecast_block(frame, config);

    let mut insights = Vec::new();
    if let Some(best) = promotion_effects.first() {
        insights.push(format!(
            "Top promotion by attendance lift is {} (+{} attendees/game).",
            best.promotion, best.uplift_attendance
        ));
    }
    insights.push(format!(
        "Median attendance is {} with volatility (CV) {}.",
        narrative::group_thousands(round_whole(median(&attendance))),
        if attendance_mean != 0.0 {
            round4(attendance_sd / attendance_mean)
        } else {
            0.0
        }
    ));
    if let Some(next_game) = forecast_block.predictions.first() {
        insights.push(format!(
            "Forecasted next-game attendance is {} (80% PI {}-{}).",
            narrative::group_thousands(next_game.predicted_attendance),
            narrative::group_thousands(next_game.pi80_low),
            narrative::group_thousands(next_game.pi80_high)
        ));
    }

    let recommendations =
        narrative::build_recommendations(records, &promotion_effects, &forecast_block, &correlations);

    Ok(HolisticAnalysis {
        context: narrative::project_context(),
        workflow: narrative::workflow_steps(),
        meta: MetaInfo {
            sample_size_games: frame.len(),
            stadium_capacity: config.stadium_capacity,
            data_sources: sources,
        },
        kpis,
        attendance_time_series,
        forecast: forecast_block,
        promotion_effects,
        segments: Segments {
            by_competition: segment_summary(records, SegmentKey::Competition),
            by_weekday: segment_summary(records, SegmentKey::Weekday),
            by_month: segment_summary(records, SegmentKey::Month),
        },
        mix: Mix {
            ticket_mix: ticket_mix(&mix_lines.tickets),
            merch_mix: merch_mix(&mix_lines.merch),
        },
        correlations,
        statistics: Statistics {
            descriptive: DescriptiveStatistics {
                attendance: summarize(&attendance),
                total_revenue: summarize(&total_revenue_values),
                revenue_per_attendee: summarize(&rev_per_att_values),
                ticket_revenue_per_attendee: summarize(&ticket_per_att_values),
                merch_revenue_per_attendee: summarize(&merch_per_att_values),
                occupancy_rate: summarize(&occupancy_values),
                thresholds: AnomalyThresholds {
                    attendance_p20_demand_risk_cutoff: round2(thresholds.low),
                    attendance_p80_demand_spike_cutoff: round2(thresholds.high),
                },
            },
            associations,
        },
        methods: narrative::methodology_notes(),
        caveats: narrative::analysis_caveats(),
        recommendations,
        anomalies,
        insights,
    })
}

/// Run a marketing scenario against the frame's current promotion ranking.
pub fn simulate_marketing(
    frame: &GameFrame,
    scenario: &MarketingScenario,
    config: &AnalysisConfig,
) -> Result<MarketingSimulationResult> {
    if frame.is_empty() {
        return Err(AnalysisError::EmptyFrame);
    }
    let effects = compute_promotion_effects(frame.records(), config);
    run_scenario(frame.records(), &effects, scenario)
}

fn forecast_block(frame: &GameFrame, config: &AnalysisConfig) -> ForecastBlock {
    let attendance = frame.attendance_values();
    let forecast = forecast_with_intervals(&attendance, config.forecast_horizon);
    ForecastBlock {
        history_labels: frame.records().iter().map(|r| r.game_date).collect(),
        history_attendance: frame.records().iter().map(|r| r.attendance).collect(),
        predictions: forecast.predictions,
        model_r_squared: forecast.r_squared,
    }
}
