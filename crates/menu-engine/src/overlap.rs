//! Detect overlapping time slots in a schedule.
//!
//! Overlaps are advisory: the schedule may legitimately offer several menus
//! at once (e.g. breakfast alongside snacks), so editors show a warning but
//! never reject the schedule.
//!
//! Adjacent slots (one ends exactly when the other starts) are NOT overlaps.
//! The time test works on raw minute values and does not unroll windows that
//! wrap past midnight.

use serde::Serialize;

use crate::day::days_overlap;
use crate::model::TimeSlot;

/// A pair of slots whose days and time windows overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOverlap {
    /// Index of the earlier slot in the schedule.
    pub first: usize,
    /// Index of the later slot in the schedule.
    pub second: usize,
    pub first_id: String,
    pub second_id: String,
    pub overlap_minutes: u32,
}

/// Two windows overlap iff `a.start < b.end && a.end > b.start`.
pub fn time_ranges_overlap(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.start_minutes() < b.end_minutes() && a.end_minutes() > b.start_minutes()
}

/// Every unordered pair `(i, j)`, `i < j`, whose day-sets and time windows
/// both overlap. Pairs are reported in schedule order.
pub fn detect_all_overlaps(slots: &[TimeSlot]) -> Vec<SlotOverlap> {
    let mut overlaps = Vec::new();

    for (i, a) in slots.iter().enumerate() {
        for (j, b) in slots.iter().enumerate().skip(i + 1) {
            if days_overlap(&a.days_of_week, &b.days_of_week) && time_ranges_overlap(a, b) {
                let overlap_start = a.start_minutes().max(b.start_minutes());
                let overlap_end = a.end_minutes().min(b.end_minutes());

                overlaps.push(SlotOverlap {
                    first: i,
                    second: j,
                    first_id: a.id.clone(),
                    second_id: b.id.clone(),
                    overlap_minutes: overlap_end.saturating_sub(overlap_start),
                });
            }
        }
    }

    overlaps
}

/// Convenience check used by editors to decide whether to show the banner.
pub fn has_overlaps(slots: &[TimeSlot]) -> bool {
    !detect_all_overlaps(slots).is_empty()
}
