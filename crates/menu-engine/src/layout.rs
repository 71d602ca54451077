//! Timeline layout: pack a day's time slots into the fewest display rows.
//!
//! Slots are sorted by start minute (ties by end minute) and each one is
//! placed in the first row that is already free when it begins. With the
//! start-sorted order this first-fit greedy uses exactly as many rows as
//! there are slots active at the busiest instant, which is the lower bound.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::day::{DayOfWeek, ALL_DAYS};
use crate::model::TimeSlot;

/// Row placement of one day's slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowAssignment {
    /// Slot ID → row index (0-based).
    pub slot_rows: BTreeMap<String, usize>,
    pub total_rows: usize,
}

impl RowAssignment {
    pub fn row_of(&self, slot_id: &str) -> Option<usize> {
        self.slot_rows.get(slot_id).copied()
    }
}

/// Pack raw `(start, end)` minute intervals. Returns the row of each
/// interval, indexed like the input, and the total row count.
///
/// A row is free for an interval when its last end is `<=` the interval's
/// start, so back-to-back intervals share a row.
pub fn pack_intervals(intervals: &[(u32, u32)]) -> (Vec<usize>, usize) {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    // Stable sort keeps input order for identical windows.
    order.sort_by_key(|&i| intervals[i]);

    let mut row_end_times: Vec<u32> = Vec::new();
    let mut rows = vec![0; intervals.len()];

    for i in order {
        let (start, end) = intervals[i];
        let row = match row_end_times.iter().position(|&row_end| row_end <= start) {
            Some(row) => {
                row_end_times[row] = end;
                row
            }
            None => {
                row_end_times.push(end);
                row_end_times.len() - 1
            }
        };
        rows[i] = row;
    }

    (rows, row_end_times.len())
}

/// Assign each slot to a display row. Zero slots yield zero rows.
pub fn calculate_time_slot_rows<'a, I>(slots: I) -> RowAssignment
where
    I: IntoIterator<Item = &'a TimeSlot>,
{
    let slots: Vec<&TimeSlot> = slots.into_iter().collect();
    let intervals: Vec<(u32, u32)> = slots
        .iter()
        .map(|s| (s.start_minutes(), s.end_minutes()))
        .collect();

    let (rows, total_rows) = pack_intervals(&intervals);

    RowAssignment {
        slot_rows: slots
            .iter()
            .zip(rows)
            .map(|(slot, row)| (slot.id.clone(), row))
            .collect(),
        total_rows,
    }
}

/// The slots that apply on `day`, in schedule order. Slots without days
/// appear on every day.
pub fn slots_for_day(slots: &[TimeSlot], day: DayOfWeek) -> Vec<&TimeSlot> {
    slots.iter().filter(|s| s.applies_on(day)).collect()
}

/// Group slots by day, Monday first.
pub fn group_slots_by_day(slots: &[TimeSlot]) -> Vec<(DayOfWeek, Vec<&TimeSlot>)> {
    ALL_DAYS
        .into_iter()
        .map(|day| (day, slots_for_day(slots, day)))
        .collect()
}

/// One day of the weekly timeline preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    pub day: DayOfWeek,
    pub slot_ids: Vec<String>,
    pub rows: RowAssignment,
}

impl DayLayout {
    /// Height of the day's lane in rows; an empty day still takes one.
    pub fn lane_height(&self) -> usize {
        self.rows.total_rows.max(1)
    }
}

/// Row layout for a single day.
pub fn day_layout(slots: &[TimeSlot], day: DayOfWeek) -> DayLayout {
    let day_slots = slots_for_day(slots, day);
    DayLayout {
        day,
        slot_ids: day_slots.iter().map(|s| s.id.clone()).collect(),
        rows: calculate_time_slot_rows(day_slots),
    }
}

/// Row layout for all seven days, Monday first.
pub fn weekly_layout(slots: &[TimeSlot]) -> Vec<DayLayout> {
    ALL_DAYS
        .into_iter()
        .map(|day| day_layout(slots, day))
        .collect()
}
