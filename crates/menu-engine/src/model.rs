//! Records shared by every component: time slots, the schedule aggregate,
//! catalog entries and the query instant.
//!
//! Field names follow the persisted JSON document (`camelCase`).

use serde::{Deserialize, Serialize};

use crate::day::{day_matches, DayOfWeek};
use crate::time::{is_minute_in_range, minutes_to_time, time_to_minutes};

/// A scheduled association between a time window, a set of days and a menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    /// Window start, `HH:MM`.
    pub start_time: String,
    /// Window end, `HH:MM`. May be earlier than `start_time` for a window that
    /// wraps past midnight.
    pub end_time: String,
    pub menu_id: String,
    /// Days the slot applies to; empty means every day.
    #[serde(default)]
    pub days_of_week: Vec<DayOfWeek>,
}

impl TimeSlot {
    pub fn new(
        id: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        menu_id: impl Into<String>,
        days_of_week: impl IntoIterator<Item = DayOfWeek>,
    ) -> Self {
        Self {
            id: id.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            menu_id: menu_id.into(),
            days_of_week: days_of_week.into_iter().collect(),
        }
    }

    pub fn start_minutes(&self) -> u32 {
        time_to_minutes(&self.start_time)
    }

    pub fn end_minutes(&self) -> u32 {
        time_to_minutes(&self.end_time)
    }

    pub fn wraps_midnight(&self) -> bool {
        self.end_minutes() < self.start_minutes()
    }

    pub fn applies_on(&self, day: DayOfWeek) -> bool {
        day_matches(&self.days_of_week, day)
    }

    /// True if the slot is active at `instant`: the day matches and the
    /// time falls inside the (possibly wrapping) window.
    pub fn is_active_at(&self, instant: &QueryInstant) -> bool {
        self.applies_on(instant.day)
            && is_minute_in_range(instant.minutes, self.start_minutes(), self.end_minutes())
    }
}

/// The single ordered collection of time slots plus a fallback menu.
///
/// Slot order is significant: earlier slots rank first when several are
/// active at once.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_menu_id: Option<String>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

impl Schedule {
    pub fn new(id: impl Into<String>, default_menu_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            default_menu_id: default_menu_id.map(str::to_string),
            time_slots: Vec::new(),
        }
    }

    pub fn with_slots(mut self, slots: impl IntoIterator<Item = TimeSlot>) -> Self {
        self.time_slots.extend(slots);
        self
    }

    /// The default menu, treating an empty string as unset.
    pub fn default_menu(&self) -> Option<&str> {
        self.default_menu_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn slot(&self, id: &str) -> Option<&TimeSlot> {
        self.time_slots.iter().find(|s| s.id == id)
    }
}

/// A named, ordered list of item references. Owned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub item_ids: Vec<String>,
}

/// A food item. Owned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// The `(time, day)` pair a resolution pass is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryInstant {
    /// Minutes since midnight.
    pub minutes: u32,
    pub day: DayOfWeek,
}

impl QueryInstant {
    /// Build an instant from an `HH:MM` string. Malformed times resolve to
    /// midnight.
    pub fn at(time: &str, day: DayOfWeek) -> Self {
        Self {
            minutes: time_to_minutes(time),
            day,
        }
    }

    pub fn time(&self) -> String {
        minutes_to_time(self.minutes)
    }
}
