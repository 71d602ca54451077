//! Schedule resolution: which menus are active at a given instant.
//!
//! Everything here is a pure function of `(schedule, instant)`. The display
//! loop calls it on every refresh tick with a fresh snapshot; nothing reads
//! the clock or the store directly.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::day::DayOfWeek;
use crate::model::{QueryInstant, Schedule, TimeSlot};
use crate::time::{minutes_to_time, MINUTES_PER_DAY};

/// Outcome of a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// Active menu IDs, first-seen order, no duplicates.
    pub menu_ids: Vec<String>,
    /// IDs of the slots that matched, in schedule order.
    pub active_slot_ids: Vec<String>,
    /// True when no slot matched and the default menu was substituted.
    pub used_default: bool,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.menu_ids.is_empty()
    }
}

/// Every slot active at `instant`, in schedule order.
pub fn active_time_slots<'a>(schedule: &'a Schedule, instant: &QueryInstant) -> Vec<&'a TimeSlot> {
    schedule
        .time_slots
        .iter()
        .filter(|slot| slot.is_active_at(instant))
        .collect()
}

/// The highest-priority (earliest defined) slot active at `instant`.
pub fn active_time_slot<'a>(schedule: &'a Schedule, instant: &QueryInstant) -> Option<&'a TimeSlot> {
    schedule
        .time_slots
        .iter()
        .find(|slot| slot.is_active_at(instant))
}

/// Menu IDs of the active slots, de-duplicated in first-seen order, without
/// falling back to the default menu. Slots with an empty menu ID are skipped.
pub fn active_menu_ids(schedule: &Schedule, instant: &QueryInstant) -> Vec<String> {
    let mut seen = HashSet::new();
    active_time_slots(schedule, instant)
        .into_iter()
        .filter(|slot| !slot.menu_id.is_empty())
        .filter(|slot| seen.insert(slot.menu_id.as_str()))
        .map(|slot| slot.menu_id.clone())
        .collect()
}

/// Resolve the menus to show at `instant`.
///
/// Returns the active menu IDs in slot-definition order, or
/// `[default_menu_id]` when nothing matches, or `[]` when there is no
/// default either. Menu IDs are not checked against the catalog.
pub fn resolve_active_menus(schedule: &Schedule, instant: &QueryInstant) -> Vec<String> {
    resolve(schedule, instant).menu_ids
}

/// Like [`resolve_active_menus`], also reporting which slots matched and
/// whether the default menu was used.
pub fn resolve(schedule: &Schedule, instant: &QueryInstant) -> Resolution {
    let active_slot_ids: Vec<String> = active_time_slots(schedule, instant)
        .into_iter()
        .map(|slot| slot.id.clone())
        .collect();
    let menu_ids = active_menu_ids(schedule, instant);

    let resolution = if menu_ids.is_empty() {
        Resolution {
            menu_ids: schedule.default_menu().map(str::to_string).into_iter().collect(),
            active_slot_ids,
            used_default: schedule.default_menu().is_some(),
        }
    } else {
        Resolution {
            menu_ids,
            active_slot_ids,
            used_default: false,
        }
    };

    debug!(
        time = %instant.time(),
        day = %instant.day,
        menus = ?resolution.menu_ids,
        used_default = resolution.used_default,
        "resolved active menus"
    );
    resolution
}

/// The next point at which a slot starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotChange {
    pub slot_id: String,
    pub menu_id: String,
    pub day: DayOfWeek,
    /// `HH:MM` at which the slot starts.
    pub change_time: String,
    pub minutes_until: u32,
}

/// Find the nearest slot start strictly after `instant`, looking at today
/// and then each following day (up to the same weekday next week).
///
/// Among slots starting at the same minute the earliest defined wins.
pub fn next_slot_change(schedule: &Schedule, instant: &QueryInstant) -> Option<SlotChange> {
    let mut day = instant.day;
    let now = instant.minutes % MINUTES_PER_DAY;

    for offset in 0..=7u32 {
        let candidate = schedule
            .time_slots
            .iter()
            .filter(|slot| slot.applies_on(day))
            .filter(|slot| offset > 0 || slot.start_minutes() > now)
            .min_by_key(|slot| slot.start_minutes());

        if let Some(slot) = candidate {
            let start = slot.start_minutes();
            return Some(SlotChange {
                slot_id: slot.id.clone(),
                menu_id: slot.menu_id.clone(),
                day,
                change_time: minutes_to_time(start),
                minutes_until: offset * MINUTES_PER_DAY + start - now,
            });
        }

        day = day.succ();
    }

    None
}
