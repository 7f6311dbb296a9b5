//! Output-boundary rounding helpers.
//!
//! Internal computation always runs at full precision; these apply the wire
//! contract's conventions (whole units for currency and attendance, 2
//! decimals for per-attendee rates, 4 decimals for ratios) at the very end.

/// Round to 2 decimal places (currency rates, per-attendee figures)
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 4 decimal places (correlations, R², CV, occupancy)
#[inline]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Round to a whole unit (attendance counts, currency totals)
#[inline]
pub fn round_whole(value: f64) -> i64 {
    value.round() as i64
}
