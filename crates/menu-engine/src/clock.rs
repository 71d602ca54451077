//! Clock sources for the display loop.
//!
//! The resolver never reads the time itself; the display samples a [`Clock`]
//! once per refresh and passes the resulting [`QueryInstant`] down.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::day::DayOfWeek;
use crate::error::{EngineError, Result};
use crate::model::QueryInstant;

pub trait Clock {
    fn now(&self) -> QueryInstant;
}

/// Build an instant from any zoned datetime, truncating to the minute.
pub fn instant_from<T: TimeZone>(at: &DateTime<T>) -> QueryInstant {
    QueryInstant {
        minutes: at.hour() * 60 + at.minute(),
        day: at.weekday().into(),
    }
}

/// The host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> QueryInstant {
        instant_from(&Local::now())
    }
}

/// Wall-clock time in a fixed IANA zone, for kiosks whose host clock is UTC.
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock {
    tz: Tz,
}

impl ZonedClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Parse an IANA timezone name such as `"Europe/Paris"`.
    pub fn parse(timezone: &str) -> Result<Self> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| EngineError::InvalidTimezone(timezone.to_string()))?;
        Ok(Self::new(tz))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Clock for ZonedClock {
    fn now(&self) -> QueryInstant {
        instant_from(&Utc::now().with_timezone(&self.tz))
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub QueryInstant);

impl FixedClock {
    pub fn at(time: &str, day: DayOfWeek) -> Self {
        Self(QueryInstant::at(time, day))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> QueryInstant {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> QueryInstant {
        (**self).now()
    }
}
