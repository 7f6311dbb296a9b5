//! Output records consumed verbatim by the serialization boundary.
//!
//! Field names and rounding are part of the wire contract; renaming a field
//! here is a breaking API change for every dashboard consumer.

use jiff::civil::Date;
use serde::Serialize;

/// Univariate summary of one numeric series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub p10: f64,
    pub p90: f64,
    pub coefficient_of_variation: f64,
}

impl DistributionSummary {
    /// All-zero summary for an empty series
    #[must_use]
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
            q1: 0.0,
            q3: 0.0,
            iqr: 0.0,
            p10: 0.0,
            p90: 0.0,
            coefficient_of_variation: 0.0,
        }
    }
}

/// One forecast step with its 80% prediction interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastPoint {
    pub game_number: usize,
    pub predicted_attendance: i64,
    pub pi80_low: i64,
    pub pi80_high: i64,
}

/// OLS trend forecast over the season's game sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub predictions: Vec<ForecastPoint>,
    pub slope_per_game: f64,
    pub r_squared: f64,
}

/// Promotion uplift estimate with resampling-based uncertainty
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionEffect {
    pub promotion: String,
    pub n_games_with_promo: usize,
    pub mean_with_promo: i64,
    pub mean_without_promo: i64,
    pub uplift_attendance: i64,
    pub uplift_pct: f64,
    pub ci80_low: i64,
    pub ci80_high: i64,
    pub permutation_p_value: f64,
    pub is_significant_at_10pct: bool,
    pub avg_total_revenue_with_promo: i64,
    pub avg_total_revenue_without_promo: i64,
    pub avg_revenue_per_attendee_with_promo: f64,
    pub avg_revenue_per_attendee_without_promo: f64,
    pub raw_avg_total_revenue_diff: i64,
    pub modeled_revenue_lift_from_uplift: i64,
}

/// Group-by summary for one categorical segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentSummary {
    pub segment: String,
    pub games: usize,
    pub avg_attendance: i64,
    pub avg_total_revenue: i64,
    pub avg_occupancy_rate: f64,
    pub avg_revenue_per_attendee: f64,
}

/// Percentile-threshold anomaly tag for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnomalyFlag {
    pub game_id: i64,
    pub game_date: Date,
    pub opponent: String,
    pub attendance: i64,
    pub total_revenue: i64,
    pub tag: String,
}

/// Correlation with a qualitative strength label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationSummary {
    pub metric_pair: String,
    pub correlation: f64,
    pub interpretation: String,
}

/// The fixed set of cross-metric correlations reported per season
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub attendance_vs_total_revenue: f64,
    pub attendance_vs_merch_rev_per_attendee: f64,
    pub occupancy_vs_revenue_per_attendee: f64,
}

/// Ticket sales decomposition by ticket type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketMixEntry {
    pub ticket_type: String,
    pub quantity: i64,
    pub revenue: i64,
    pub avg_price: f64,
    pub share_of_units: f64,
}

/// Merchandise sales decomposition by item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchMixEntry {
    pub item: String,
    pub quantity: i64,
    pub revenue: i64,
    pub avg_unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mix {
    pub ticket_mix: Vec<TicketMixEntry>,
    pub merch_mix: Vec<MerchMixEntry>,
}

/// Season-level headline figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonKpis {
    pub avg_attendance: i64,
    pub median_attendance: i64,
    pub attendance_std_dev: f64,
    pub attendance_trend_per_game: f64,
    pub forecast_r_squared: f64,
    pub total_ticket_revenue: i64,
    pub total_merch_revenue: i64,
    pub total_revenue: i64,
    pub revenue_per_attendee: f64,
    pub ticket_revenue_per_attendee: f64,
    pub merch_revenue_per_attendee: f64,
    pub merch_units_per_1000_attendees: f64,
    pub avg_occupancy_rate: f64,
}

/// One game in the attendance time series block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub game_id: i64,
    pub game_date: Date,
    pub opponent: String,
    pub attendance: i64,
    pub occupancy_rate: f64,
    pub total_revenue: i64,
    pub revenue_per_attendee: f64,
    pub promotion_name: String,
    pub competition: String,
    pub weekday: String,
}

/// Forecast block with the history it was fit on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastBlock {
    pub history_labels: Vec<Date>,
    pub history_attendance: Vec<i64>,
    pub predictions: Vec<ForecastPoint>,
    pub model_r_squared: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segments {
    pub by_competition: Vec<SegmentSummary>,
    pub by_weekday: Vec<SegmentSummary>,
    pub by_month: Vec<SegmentSummary>,
}

/// P20/P80 anomaly cutoffs, reported alongside the descriptive statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyThresholds {
    pub attendance_p20_demand_risk_cutoff: f64,
    pub attendance_p80_demand_spike_cutoff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStatistics {
    pub attendance: DistributionSummary,
    pub total_revenue: DistributionSummary,
    pub revenue_per_attendee: DistributionSummary,
    pub ticket_revenue_per_attendee: DistributionSummary,
    pub merch_revenue_per_attendee: DistributionSummary,
    pub occupancy_rate: DistributionSummary,
    pub thresholds: AnomalyThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub descriptive: DescriptiveStatistics,
    pub associations: Vec<AssociationSummary>,
}

/// Labels for where the analyzed data came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSources {
    pub attendance_csv: String,
    pub database: String,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            attendance_csv: "Attendance.csv".to_string(),
            database: "matchday.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaInfo {
    pub sample_size_games: usize,
    pub stadium_capacity: u32,
    pub data_sources: DataSources,
}

/// Everything the dashboard renders, composed per request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolisticAnalysis {
    pub context: crate::narrative::ProjectContext,
    pub workflow: Vec<crate::narrative::WorkflowStep>,
    pub meta: MetaInfo,
    pub kpis: SeasonKpis,
    pub attendance_time_series: Vec<TimeSeriesPoint>,
    pub forecast: ForecastBlock,
    pub promotion_effects: Vec<PromotionEffect>,
    pub segments: Segments,
    pub mix: Mix,
    pub correlations: CorrelationMatrix,
    pub statistics: Statistics,
    pub methods: crate::narrative::MethodologyNotes,
    pub caveats: Vec<String>,
    pub recommendations: Vec<crate::narrative::Recommendation>,
    pub anomalies: Vec<AnomalyFlag>,
    pub insights: Vec<String>,
}

/// Headline attendance stats for the advanced-analysis payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceHeadline {
    pub mean: i64,
    pub median: i64,
    pub std_dev: f64,
    pub min: i64,
    pub max: i64,
    pub coefficient_of_variation: f64,
    pub trend_per_game: f64,
}

/// Headline revenue stats for the advanced-analysis payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueHeadline {
    pub total_ticket_revenue: i64,
    pub total_merch_revenue: i64,
    pub ticket_revenue_per_attendee: f64,
    pub merch_revenue_per_attendee: f64,
    pub merch_units_per_1000_attendees: f64,
}

/// The focused inference payload: headline stats, forecast, promotion effects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedAnalysis {
    pub sample_size_games: usize,
    pub attendance: AttendanceHeadline,
    pub revenue: RevenueHeadline,
    pub forecast: ForecastBlock,
    pub promotion_effects: Vec<PromotionEffect>,
}
