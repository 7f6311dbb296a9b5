//! Fixed methodology/context copy and derived recommendations.
//!
//! The static blocks travel with every holistic payload so the dashboard
//! can render the analysis as an auditable report rather than bare numbers.

use serde::Serialize;

use crate::model::{CorrelationMatrix, ForecastBlock, GameRecord, PromotionEffect};
use crate::stats::percentile;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodologyNote {
    pub method: String,
    pub why_it_is_used: String,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodologyNotes {
    pub descriptive_statistics: MethodologyNote,
    pub trend_and_forecast: MethodologyNote,
    pub promotion_inference: MethodologyNote,
    pub segmentation_and_mix: MethodologyNote,
    pub anomaly_flagging: MethodologyNote,
    pub marketing_simulator: MethodologyNote,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataProvenance {
    pub attendance: String,
    pub promotions: String,
    pub ticket_and_merch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectContext {
    pub title: String,
    pub portfolio_intent: String,
    pub business_questions: Vec<String>,
    pub data_provenance: DataProvenance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowStep {
    pub step: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: String,
    pub recommendation: String,
    pub rationale: String,
}

fn note(method: &str, why: &str, interpretation: &str) -> MethodologyNote {
    MethodologyNote {
        method: method.to_string(),
        why_it_is_used: why.to_string(),
        interpretation: interpretation.to_string(),
    }
}

#[must_use]
pub fn methodology_notes() -> MethodologyNotes {
    MethodologyNotes {
        descriptive_statistics: note(
            "Univariate summaries (mean, median, standard deviation, quartiles, IQR, percentile bands, coefficient of variation).",
            "Provides a stable overview of central tendency, spread, and season volatility before any inference or forecasting.",
            "Median and quartiles help reduce sensitivity to outliers; CV contextualizes variability relative to average attendance.",
        ),
        trend_and_forecast: note(
            "Simple ordinary least squares linear regression over game sequence, plus 3-game forecast with 80% prediction intervals using residual standard error.",
            "Intentionally interpretable baseline that admissions reviewers can audit quickly.",
            "Slope estimates directional attendance trend per game; R^2 indicates in-sample fit; prediction intervals communicate uncertainty.",
        ),
        promotion_inference: note(
            "Observed mean attendance difference versus non-promo games, with bootstrap 80% confidence intervals and permutation-test p-values.",
            "Small-sample, nonparametric inference is more robust than strict normality assumptions for this dataset size.",
            "Uplift is associative, not causal. p-values quantify extremeness under a no-difference shuffle null; CI reflects plausible uplift range.",
        ),
        segmentation_and_mix: note(
            "Grouped averages by competition, weekday, and month, plus ticket/merch mix decomposition.",
            "Separates demand volume from monetization efficiency and supports operational planning.",
            "Use segment comparisons for prioritization, not causal claims.",
        ),
        anomaly_flagging: note(
            "Percentile-based rule: bottom 20% attendance = demand risk, top 20% = demand spike.",
            "Transparent screening rule for triage and review in small datasets.",
            "Flags are prompts for investigation, not errors or definitive root-cause labels.",
        ),
        marketing_simulator: note(
            "Scenario model combining expected attendance uplift with historical revenue-per-attendee and user-provided media/variable costs.",
            "Translates analytics output into operational and budgeting decisions.",
            "Outputs are decision-support estimates contingent on assumptions, not forecasts of guaranteed realized profit.",
        ),
    }
}

#[must_use]
pub fn analysis_caveats() -> Vec<String> {
    [
        "Attendance records are observed outcomes; promotion comparisons are not randomized experiments.",
        "Promotion names and game-level promotion assignments are simulated for portfolio demonstration and are not verified historical club campaigns.",
        "Ticket and merchandise transaction data are synthetic and intended for scenario analysis/portfolio demonstration.",
        "Forecasting model is a linear baseline for interpretability; it does not model opponent strength, weather, pricing, or injuries.",
        "Small sample sizes for some promotions can produce wide intervals and unstable p-values.",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[must_use]
pub fn project_context() -> ProjectContext {
    ProjectContext {
        title: "Fan Economics and Operations Analytics for Home Games".to_string(),
        portfolio_intent: "End-to-end decision-support analytics for club commercial operations."
            .to_string(),
        business_questions: [
            "How variable is home attendance across the season?",
            "Which promotions are associated with stronger attendance outcomes?",
            "How do demand levels relate to revenue and seat utilization?",
            "What campaign scenarios break even under different cost assumptions?",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
        data_provenance: DataProvenance {
            attendance: "Observed home-match attendance records".to_string(),
            promotions: "Simulated promotion labels and game assignments for portfolio analysis"
                .to_string(),
            ticket_and_merch: "Synthetic commercial scenario data for portfolio analysis"
                .to_string(),
        },
    }
}

#[must_use]
pub fn workflow_steps() -> Vec<WorkflowStep> {
    let step = |step: &str, description: &str| WorkflowStep {
        step: step.to_string(),
        description: description.to_string(),
    };
    vec![
        step(
            "Data integration",
            "Join game records to promotion, ticketing, and merchandise tables to create a game-level analytical frame.",
        ),
        step(
            "Descriptive analysis",
            "Summarize central tendency, volatility, distribution spread, and demand thresholds.",
        ),
        step(
            "Inference and forecasting",
            "Estimate promotion-associated uplift with uncertainty and build an interpretable attendance trend forecast.",
        ),
        step(
            "Decision support",
            "Translate findings into anomaly triage, segment diagnostics, and marketing ROI scenarios.",
        ),
    ]
}

/// Prioritized follow-ups derived from the strongest findings; capped at 5.
#[must_use]
pub fn build_recommendations(
    records: &[GameRecord],
    effects: &[PromotionEffect],
    forecast: &ForecastBlock,
    correlations: &CorrelationMatrix,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if let Some(top) = effects.first() {
        recommendations.push(Recommendation {
            category: "Promotion strategy".to_string(),
            priority: "High".to_string(),
            recommendation: format!(
                "Prioritize controlled follow-up testing for '{}' because it shows the largest observed attendance uplift (+{} fans/game, 80% CI {} to {}).",
                top.promotion, top.uplift_attendance, top.ci80_low, top.ci80_high
            ),
            rationale: "Top historical uplift may be useful for targeted campaigns, but results remain observational.".to_string(),
        });
    }

    if let Some(next_game) = forecast.predictions.first() {
        recommendations.push(Recommendation {
            category: "Operations planning".to_string(),
            priority: "Medium".to_string(),
            recommendation: format!(
                "Staff and inventory against a forecast baseline of {} attendees with contingency planning across the 80% interval ({}-{}).",
                group_thousands(next_game.predicted_attendance),
                group_thousands(next_game.pi80_low),
                group_thousands(next_game.pi80_high)
            ),
            rationale: "Prediction intervals are better planning inputs than point forecasts alone."
                .to_string(),
        });
    }

    if correlations.attendance_vs_total_revenue >= 0.6 {
        recommendations.push(Recommendation {
            category: "Commercial operations".to_string(),
            priority: "Medium".to_string(),
            recommendation: "Demand growth appears strongly linked to revenue totals; align merchandising and ticket upsell capacity with high-attendance risk/spike games.".to_string(),
            rationale: "A strong positive attendance-revenue association suggests capacity planning affects monetization outcomes.".to_string(),
        });
    }

    let attendance: Vec<f64> = records.iter().map(|r| r.attendance as f64).collect();
    let risk_cutoff = percentile(&attendance, 20.0);
    if records.iter().any(|r| r.attendance as f64 <= risk_cutoff) {
        recommendations.push(Recommendation {
            category: "Demand management".to_string(),
            priority: "Medium".to_string(),
            recommendation: "Create a pre-match intervention playbook for low-demand fixtures (bottom-quintile attendance) using segmented offers and targeted media timing.".to_string(),
            rationale: "Percentile-based risk flags identify recurring low-demand conditions for proactive intervention.".to_string(),
        });
    }

    recommendations.truncate(5);
    recommendations
}

/// Format an integer with thousands separators ("26,000")
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
