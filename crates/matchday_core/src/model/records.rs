//! The enriched game frame: the single input every analysis consumes.

use jiff::civil::Date;

use crate::config::AnalysisConfig;

/// Sentinel promotion label meaning "no promotion ran"
pub const NO_PROMOTION: &str = "None";

/// One already-joined row as yielded by the data layer.
///
/// Missing numerics are zero, never an error; missing text normalizes to
/// `"Unknown"` (or the `"None"` sentinel for promotions). The core never
/// sees absence, only zero values.
#[derive(Debug, Clone)]
pub struct RawGameRow {
    pub id: i64,
    pub game_date: Date,
    pub opponent: String,
    pub attendance: Option<i64>,
    pub competition: Option<String>,
    pub venue: Option<String>,
    pub promotion_name: Option<String>,
    pub ticket_revenue: Option<f64>,
    pub tickets_sold: Option<i64>,
    pub merch_revenue: Option<f64>,
    pub merch_units: Option<i64>,
}

/// A game record with all derived per-game fields computed once.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub id: i64,
    pub game_date: Date,
    pub opponent: String,
    pub attendance: i64,
    pub competition: String,
    pub venue: String,
    pub promotion_name: String,
    pub ticket_revenue: f64,
    pub tickets_sold: i64,
    pub merch_revenue: f64,
    pub merch_units: i64,
    pub total_revenue: f64,
    pub occupancy_rate: f64,
    pub ticket_price_per_seat: f64,
    pub revenue_per_attendee: f64,
    pub ticket_rev_per_attendee: f64,
    pub merch_rev_per_attendee: f64,
    pub merch_attach_rate: f64,
    pub weekday: String,
    pub month: String,
}

impl GameRecord {
    /// Enrich a raw row. Every division-by-zero path resolves to 0.
    #[must_use]
    pub fn from_raw(raw: RawGameRow, stadium_capacity: u32) -> Self {
        let attendance = raw.attendance.unwrap_or(0);
        let ticket_revenue = raw.ticket_revenue.unwrap_or(0.0);
        let merch_revenue = raw.merch_revenue.unwrap_or(0.0);
        let tickets_sold = raw.tickets_sold.unwrap_or(0);
        let merch_units = raw.merch_units.unwrap_or(0);
        let total_revenue = ticket_revenue + merch_revenue;

        let att = attendance as f64;
        let per_attendee = |numerator: f64| if attendance != 0 { numerator / att } else { 0.0 };

        Self {
            id: raw.id,
            weekday: weekday_label(raw.game_date).to_string(),
            month: month_label(raw.game_date).to_string(),
            game_date: raw.game_date,
            opponent: raw.opponent,
            attendance,
            competition: normalize_text(raw.competition, "Unknown"),
            venue: normalize_text(raw.venue, "Unknown"),
            promotion_name: normalize_text(raw.promotion_name, NO_PROMOTION),
            ticket_revenue,
            tickets_sold,
            merch_revenue,
            merch_units,
            total_revenue,
            occupancy_rate: if stadium_capacity != 0 {
                att / f64::from(stadium_capacity)
            } else {
                0.0
            },
            ticket_price_per_seat: if tickets_sold != 0 {
                ticket_revenue / tickets_sold as f64
            } else {
                0.0
            },
            revenue_per_attendee: per_attendee(total_revenue),
            ticket_rev_per_attendee: per_attendee(ticket_revenue),
            merch_rev_per_attendee: per_attendee(merch_revenue),
            merch_attach_rate: per_attendee(merch_units as f64),
        }
    }
}

/// The ordered, enriched season frame.
///
/// Construction applies the low-attendance relabeling rule, so every
/// downstream promotion comparison sees the adjusted labels. Rows must
/// arrive sorted by (date, id); that ordering drives the forecaster's
/// sequence index.
#[derive(Debug, Clone, Default)]
pub struct GameFrame {
    records: Vec<GameRecord>,
}

impl GameFrame {
    #[must_use]
    pub fn new(rows: Vec<RawGameRow>, config: &AnalysisConfig) -> Self {
        let mut records: Vec<GameRecord> = rows
            .into_iter()
            .map(|raw| GameRecord::from_raw(raw, config.stadium_capacity))
            .collect();
        enforce_low_attendance_no_promo(&mut records, config.min_games_no_promo);
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Attendance column in frame order
    #[must_use]
    pub fn attendance_values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.attendance as f64).collect()
    }
}

/// Promotions are not credited for intrinsically low-demand fixtures: the
/// `min_games` lowest-attendance records (ties broken by date, then id)
/// have their promotion label overwritten to the `"None"` sentinel,
/// regardless of what was originally assigned. Changing this changes every
/// promotion-effect output downstream.
fn enforce_low_attendance_no_promo(records: &mut [GameRecord], min_games: usize) {
    if records.is_empty() || min_games == 0 {
        return;
    }

    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| {
        let (ra, rb) = (&records[a], &records[b]);
        ra.attendance
            .cmp(&rb.attendance)
            .then_with(|| ra.game_date.cmp(&rb.game_date))
            .then_with(|| ra.id.cmp(&rb.id))
    });

    for &idx in order.iter().take(min_games) {
        records[idx].promotion_name = NO_PROMOTION.to_string();
    }
}

fn normalize_text(value: Option<String>, default: &str) -> String {
    match value {
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                default.to_string()
            } else {
                trimmed.to_string()
            }
        }
        None => default.to_string(),
    }
}

fn weekday_label(date: Date) -> &'static str {
    use jiff::civil::Weekday;
    match date.weekday() {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}

fn month_label(date: Date) -> &'static str {
    match date.month() {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn raw(id: i64, d: Date, attendance: i64, promo: Option<&str>) -> RawGameRow {
        RawGameRow {
            id,
            game_date: d,
            opponent: format!("Opponent {id}"),
            attendance: Some(attendance),
            competition: Some("League".to_string()),
            venue: Some("Home Park".to_string()),
            promotion_name: promo.map(str::to_string),
            ticket_revenue: Some(attendance as f64 * 40.0),
            tickets_sold: Some(attendance),
            merch_revenue: Some(attendance as f64 * 5.0),
            merch_units: Some(attendance / 10),
        }
    }

    #[test]
    fn test_enrichment_divisions_resolve_to_zero() {
        let row = RawGameRow {
            id: 1,
            game_date: date(2025, 3, 1),
            opponent: "X".to_string(),
            attendance: None,
            competition: None,
            venue: Some("  ".to_string()),
            promotion_name: None,
            ticket_revenue: None,
            tickets_sold: None,
            merch_revenue: None,
            merch_units: None,
        };
        let record = GameRecord::from_raw(row, 30_000);

        assert_eq!(record.attendance, 0);
        assert_eq!(record.revenue_per_attendee, 0.0);
        assert_eq!(record.ticket_price_per_seat, 0.0);
        assert_eq!(record.merch_attach_rate, 0.0);
        assert_eq!(record.competition, "Unknown");
        assert_eq!(record.venue, "Unknown");
        assert_eq!(record.promotion_name, NO_PROMOTION);
    }

    #[test]
    fn test_enrichment_derived_fields() {
        let record = GameRecord::from_raw(raw(1, date(2025, 3, 1), 15_000, None), 30_000);

        assert_eq!(record.occupancy_rate, 0.5);
        assert_eq!(record.total_revenue, 15_000.0 * 45.0);
        assert_eq!(record.revenue_per_attendee, 45.0);
        assert_eq!(record.weekday, "Saturday");
        assert_eq!(record.month, "Mar");
    }

    #[test]
    fn test_low_attendance_relabel() {
        let rows = vec![
            raw(1, date(2025, 3, 1), 20_000, Some("Family Night")),
            raw(2, date(2025, 3, 8), 12_000, Some("Family Night")),
            raw(3, date(2025, 3, 15), 25_000, Some("Family Night")),
            raw(4, date(2025, 3, 22), 11_000, Some("Fan Giveaway")),
            raw(5, date(2025, 3, 29), 13_000, Some("Fan Giveaway")),
        ];
        let config = AnalysisConfig::default(); // min_games = 3
        let frame = GameFrame::new(rows, &config);

        // The three lowest (ids 4, 2, 5) lose their labels
        let promos: Vec<&str> = frame
            .records()
            .iter()
            .map(|r| r.promotion_name.as_str())
            .collect();
        assert_eq!(
            promos,
            vec!["Family Night", "None", "Family Night", "None", "None"]
        );
    }

    #[test]
    fn test_relabel_tie_break_by_date_then_id() {
        let rows = vec![
            raw(2, date(2025, 4, 5), 10_000, Some("Promo A")),
            raw(1, date(2025, 4, 5), 10_000, Some("Promo B")),
            raw(3, date(2025, 4, 1), 10_000, Some("Promo C")),
        ];
        let config = AnalysisConfig {
            min_games_no_promo: 2,
            ..AnalysisConfig::default()
        };
        let frame = GameFrame::new(rows, &config);

        // Earliest date wins, then lowest id: id 3 first, then id 1
        assert_eq!(frame.records()[2].promotion_name, "None"); // id 3
        assert_eq!(frame.records()[1].promotion_name, "None"); // id 1
        assert_eq!(frame.records()[0].promotion_name, "Promo A"); // id 2 kept
    }

    #[test]
    fn test_relabel_disabled_with_zero_min_games() {
        let rows = vec![raw(1, date(2025, 3, 1), 5_000, Some("Promo A"))];
        let config = AnalysisConfig {
            min_games_no_promo: 0,
            ..AnalysisConfig::default()
        };
        let frame = GameFrame::new(rows, &config);
        assert_eq!(frame.records()[0].promotion_name, "Promo A");
    }
}
