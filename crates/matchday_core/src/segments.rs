//! Group-by segment summaries over the game frame.

use rustc_hash::FxHashMap;

use crate::model::{GameRecord, SegmentSummary};
use crate::round::{round2, round4, round_whole};
use crate::stats::mean;

/// Categorical key a segment breakdown can group by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKey {
    Competition,
    Weekday,
    Month,
}

impl SegmentKey {
    fn value<'a>(self, record: &'a GameRecord) -> &'a str {
        match self {
            SegmentKey::Competition => &record.competition,
            SegmentKey::Weekday => &record.weekday,
            SegmentKey::Month => &record.month,
        }
    }
}

/// Per-group averages, emitted sorted descending by mean attendance.
/// Groups are accumulated in first-seen order so equal-attendance segments
/// keep their frame order under the stable sort.
#[must_use]
pub fn segment_summary(records: &[GameRecord], key: SegmentKey) -> Vec<SegmentSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: FxHashMap<&str, Vec<&GameRecord>> = FxHashMap::default();
    for record in records {
        let group = key.value(record);
        grouped
            .entry(group)
            .or_insert_with(|| {
                order.push(group);
                Vec::new()
            })
            .push(record);
    }

    let mut summary: Vec<SegmentSummary> = order
        .into_iter()
        .map(|group| {
            let items = &grouped[group];
            let attendance: Vec<f64> = items.iter().map(|r| r.attendance as f64).collect();
            let revenue: Vec<f64> = items.iter().map(|r| r.total_revenue).collect();
            let occupancy: Vec<f64> = items.iter().map(|r| r.occupancy_rate).collect();
            let rev_per_att: Vec<f64> = items.iter().map(|r| r.revenue_per_attendee).collect();

            SegmentSummary {
                segment: group.to_string(),
                games: items.len(),
                avg_attendance: round_whole(mean(&attendance)),
                avg_total_revenue: round_whole(mean(&revenue)),
                avg_occupancy_rate: round4(mean(&occupancy)),
                avg_revenue_per_attendee: round2(mean(&rev_per_att)),
            }
        })
        .collect();

    summary.sort_by(|a, b| b.avg_attendance.cmp(&a.avg_attendance));
    summary
}
