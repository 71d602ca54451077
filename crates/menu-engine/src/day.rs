//! Day-of-week names and slot day-set matching.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A day of the week, persisted as its lowercase English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Monday-first ordering used by the weekly preview.
pub const ALL_DAYS: [DayOfWeek; 7] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
    DayOfWeek::Saturday,
    DayOfWeek::Sunday,
];

pub const WEEKDAYS: [DayOfWeek; 5] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
];

pub const WEEKEND: [DayOfWeek; 2] = [DayOfWeek::Saturday, DayOfWeek::Sunday];

impl DayOfWeek {
    pub fn name(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Three-letter display form, e.g. `Mon`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }

    /// Capitalised display form, e.g. `Monday`.
    pub fn label(self) -> String {
        let name = self.name();
        let mut label = name[..1].to_uppercase();
        label.push_str(&name[1..]);
        label
    }

    /// The following day, wrapping Sunday to Monday.
    pub fn succ(self) -> Self {
        Weekday::from(self).succ().into()
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        ALL_DAYS
            .into_iter()
            .find(|d| d.name() == lowered || d.abbreviation().eq_ignore_ascii_case(&lowered))
            .ok_or_else(|| EngineError::UnknownDay(s.to_string()))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// True if a slot with `slot_days` applies on `day`. An empty set is a
/// wildcard meaning every day.
pub fn day_matches(slot_days: &[DayOfWeek], day: DayOfWeek) -> bool {
    slot_days.is_empty() || slot_days.contains(&day)
}

/// True if two slot day-sets share at least one day. An empty set on either
/// side is a wildcard and always overlaps.
pub fn days_overlap(a: &[DayOfWeek], b: &[DayOfWeek]) -> bool {
    if a.is_empty() || b.is_empty() {
        return true;
    }
    a.iter().any(|day| b.contains(day))
}

/// Human-readable summary of a day-set: `All Days`, `Weekdays`, `Weekends`,
/// or the capitalised day names joined by commas.
pub fn format_days_of_week(days: &[DayOfWeek]) -> String {
    if days.is_empty() || ALL_DAYS.iter().all(|d| days.contains(d)) {
        return "All Days".to_string();
    }
    if days.len() == WEEKDAYS.len() && WEEKDAYS.iter().all(|d| days.contains(d)) {
        return "Weekdays".to_string();
    }
    if days.len() == WEEKEND.len() && WEEKEND.iter().all(|d| days.contains(d)) {
        return "Weekends".to_string();
    }
    days.iter()
        .map(|d| d.label())
        .collect::<Vec<_>>()
        .join(", ")
}
