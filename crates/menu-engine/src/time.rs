//! Clock-time arithmetic on `HH:MM` strings.
//!
//! All schedule windows are compared in minute space (minutes since midnight,
//! `0..=1439`). A malformed string is treated as midnight and logged.

use tracing::warn;

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse an `HH:MM` string into minutes since midnight, or `None` if the
/// string is not a valid 24-hour clock time.
///
/// Hours may be one or two digits; minutes may be one or two digits.
pub fn parse_minutes(time: &str) -> Option<u32> {
    let (hours, minutes) = time.trim().split_once(':')?;
    if hours.is_empty() || minutes.is_empty() || hours.len() > 2 || minutes.len() > 2 {
        return None;
    }
    if !hours.bytes().all(|b| b.is_ascii_digit()) || !minutes.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Convert an `HH:MM` string into minutes since midnight.
///
/// Malformed or empty input yields `0` and emits a warning.
pub fn time_to_minutes(time: &str) -> u32 {
    match parse_minutes(time) {
        Some(minutes) => minutes,
        None => {
            warn!(time, "malformed clock time, treating as 00:00");
            0
        }
    }
}

/// Convert minutes since midnight into a zero-padded `HH:MM` string.
///
/// Values past the end of the day wrap around.
pub fn minutes_to_time(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Range containment in minute space.
///
/// When `start <= end` the window is `[start, end]` inclusive on both ends.
/// When `end < start` the window wraps past midnight and contains every
/// minute `>= start` or `<= end`.
pub fn is_minute_in_range(current: u32, start: u32, end: u32) -> bool {
    if end < start {
        return current >= start || current <= end;
    }
    current >= start && current <= end
}

/// Check whether `current` falls within the window `start..=end`, honouring
/// windows that wrap past midnight (e.g. `22:00`–`02:00`).
pub fn is_time_in_range(current: &str, start: &str, end: &str) -> bool {
    is_minute_in_range(
        time_to_minutes(current),
        time_to_minutes(start),
        time_to_minutes(end),
    )
}

/// Strict format check used by editors: `H:MM` or `HH:MM`, 24-hour.
pub fn is_valid_time_format(time: &str) -> bool {
    let Some((_, minutes)) = time.split_once(':') else {
        return false;
    };
    minutes.len() == 2 && time.trim() == time && parse_minutes(time).is_some()
}

/// Duration of a window in minutes. Windows that wrap past midnight count
/// the minutes up to midnight plus the minutes after it.
pub fn calculate_duration(start: &str, end: &str) -> u32 {
    let start = time_to_minutes(start);
    let end = time_to_minutes(end);
    if end < start {
        (MINUTES_PER_DAY - start) + end
    } else {
        end - start
    }
}

/// Position of a clock time within the day, as a percentage in `0.0..100.0`.
pub fn time_percentage(time: &str) -> f64 {
    f64::from(time_to_minutes(time)) / f64::from(MINUTES_PER_DAY) * 100.0
}

/// Format an `HH:MM` string in 12-hour form, e.g. `"13:05"` → `"1:05 PM"`.
///
/// Empty input formats as an empty string.
pub fn format_time_display(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }
    let minutes = time_to_minutes(time);
    let (hours, mins) = (minutes / 60, minutes % 60);
    let period = if hours >= 12 { "PM" } else { "AM" };
    let display_hours = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hours, mins, period)
}

/// Format a window as `"9:00 AM - 11:00 AM"`.
pub fn format_time_range(start: &str, end: &str) -> String {
    format!(
        "{} - {}",
        format_time_display(start),
        format_time_display(end)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_single_digit_hour() {
        assert_eq!(parse_minutes("9:05"), Some(545));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("noon"), None);
        assert_eq!(parse_minutes("24:00"), None);
        assert_eq!(parse_minutes("12:60"), None);
        assert_eq!(parse_minutes("12:"), None);
        assert_eq!(parse_minutes("-1:30"), None);
        assert_eq!(parse_minutes("123:00"), None);
    }

    #[test]
    fn minutes_to_time_wraps() {
        assert_eq!(minutes_to_time(1440), "00:00");
        assert_eq!(minutes_to_time(1441), "00:01");
    }
}
