//! JSON persistence of the signage data document.
//!
//! The document holds the schedule, the catalog and the token history:
//!
//! ```json
//! {
//!   "schedule": { "id": "...", "defaultMenuId": "...", "timeSlots": [ ... ] },
//!   "menus": [ ... ],
//!   "items": [ ... ],
//!   "tokens": [ ... ]
//! }
//! ```
//!
//! Shape is validated on load; the engine itself never re-checks it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::materialize::InMemoryCatalog;
use crate::model::{Item, Menu, Schedule};
use crate::store::ScheduleSource;
use crate::token::TokenHistory;
use crate::validate::validate_document_shape;

/// Everything a display needs, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignageData {
    pub schedule: Schedule,
    #[serde(default)]
    pub menus: Vec<Menu>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub tokens: TokenHistory,
}

impl SignageData {
    /// Parse and shape-check a document.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        validate_document_shape(&data.schedule).map_err(EngineError::Validation)?;
        Ok(data)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn catalog(&self) -> InMemoryCatalog {
        InMemoryCatalog::new(self.menus.clone(), self.items.clone())
    }
}

/// Parse just a schedule object.
pub fn schedule_from_json(json: &str) -> Result<Schedule> {
    let schedule: Schedule = serde_json::from_str(json)?;
    validate_document_shape(&schedule).map_err(EngineError::Validation)?;
    Ok(schedule)
}

pub fn schedule_to_json(schedule: &Schedule) -> Result<String> {
    Ok(serde_json::to_string_pretty(schedule)?)
}

/// A signage document stored in a JSON file.
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<SignageData> {
        let json = fs::read_to_string(&self.path)?;
        let data = SignageData::from_json(&json)?;
        debug!(
            path = %self.path.display(),
            slots = data.schedule.time_slots.len(),
            menus = data.menus.len(),
            items = data.items.len(),
            "loaded signage data"
        );
        Ok(data)
    }

    /// Write the document via a sibling temporary file and a rename, so a
    /// concurrent reader never sees a half-written file.
    pub fn save(&self, data: &SignageData) -> Result<()> {
        let json = data.to_json()?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        if let Err(error) = fs::rename(&tmp, &self.path) {
            // Best effort; the rename error is the one worth reporting.
            let _ = fs::remove_file(&tmp);
            return Err(error.into());
        }
        debug!(path = %self.path.display(), "saved signage data");
        Ok(())
    }
}

impl ScheduleSource for DataFile {
    fn load_schedule(&self) -> Result<Schedule> {
        Ok(self.load()?.schedule)
    }
}
