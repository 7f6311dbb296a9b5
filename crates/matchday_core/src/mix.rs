//! Ticket and merchandise mix decomposition.
//!
//! Operates on grouped line aggregates supplied by the data layer (one line
//! per ticket type / merch item), separating demand volume from
//! monetization efficiency.

use crate::model::{MerchMixEntry, TicketMixEntry};
use crate::round::{round2, round_whole};

/// Season-total ticket sales for one ticket type
#[derive(Debug, Clone)]
pub struct TicketLine {
    pub ticket_type: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Season-total merchandise sales for one item
#[derive(Debug, Clone)]
pub struct MerchLine {
    pub item: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Ticket mix with unit shares, sorted descending by revenue
#[must_use]
pub fn ticket_mix(lines: &[TicketLine]) -> Vec<TicketMixEntry> {
    let total_units: i64 = lines.iter().map(|l| l.quantity).sum();

    let mut mix: Vec<TicketMixEntry> = lines
        .iter()
        .map(|line| TicketMixEntry {
            ticket_type: line.ticket_type.clone(),
            quantity: line.quantity,
            revenue: round_whole(line.revenue),
            avg_price: if line.quantity != 0 {
                round2(line.revenue / line.quantity as f64)
            } else {
                0.0
            },
            share_of_units: if total_units != 0 {
                round2(line.quantity as f64 / total_units as f64 * 100.0)
            } else {
                0.0
            },
        })
        .collect();

    mix.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    mix
}

/// Merch mix, sorted descending by revenue
#[must_use]
pub fn merch_mix(lines: &[MerchLine]) -> Vec<MerchMixEntry> {
    let mut mix: Vec<MerchMixEntry> = lines
        .iter()
        .map(|line| MerchMixEntry {
            item: line.item.clone(),
            quantity: line.quantity,
            revenue: round_whole(line.revenue),
            avg_unit_price: if line.quantity != 0 {
                round2(line.revenue / line.quantity as f64)
            } else {
                0.0
            },
        })
        .collect();

    mix.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    mix
}
