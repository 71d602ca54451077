//! Display settings.
//!
//! Every field has a default, so an empty JSON object is a valid settings
//! file. Durations are stored in plain integer units to keep the file easy to
//! edit by hand.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::carousel::CarouselTiming;
use crate::clock::ZonedClock;
use crate::error::{EngineError, Result};
use crate::geometry::LayoutStyle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    /// How long each carousel page stays on screen.
    pub display_duration_ms: u64,
    /// Length of the fade before a page switch.
    pub transition_duration_ms: u64,
    /// How often the schedule is re-resolved against the clock.
    pub refresh_interval_secs: u64,
    /// How often the persisted document is polled for edits made elsewhere.
    pub poll_interval_secs: u64,
    pub layout_style: LayoutStyle,
    pub show_prices: bool,
    pub show_ingredients: bool,
    /// IANA zone for the wall clock; the host's local zone when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            display_duration_ms: 5000,
            transition_duration_ms: 500,
            refresh_interval_secs: 60,
            poll_interval_secs: 3,
            layout_style: LayoutStyle::Grid,
            show_prices: true,
            show_ingredients: false,
            timezone: None,
        }
    }
}

impl DisplaySettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Reject settings that cannot be acted on: zero periods would re-arm a
    /// timer at the current instant forever.
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("displayDurationMs", self.display_duration_ms),
            ("refreshIntervalSecs", self.refresh_interval_secs),
            ("pollIntervalSecs", self.poll_interval_secs),
        ];
        if let Some((field, _)) = periods.into_iter().find(|&(_, value)| value == 0) {
            return Err(EngineError::InvalidSetting { field });
        }
        self.zoned_clock().map(|_| ())
    }

    pub fn carousel_timing(&self) -> CarouselTiming {
        CarouselTiming {
            display: Duration::from_millis(self.display_duration_ms),
            transition: Duration::from_millis(self.transition_duration_ms),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// A clock pinned to the configured zone, or `None` for host local time.
    pub fn zoned_clock(&self) -> Result<Option<ZonedClock>> {
        self.timezone.as_deref().map(ZonedClock::parse).transpose()
    }
}
