//! Error types for menu-engine operations.

use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Unknown day of week: {0}")]
    UnknownDay(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid setting {field}: must be greater than zero")]
    InvalidSetting { field: &'static str },

    #[error("Cannot create new schedule. Only one schedule is allowed in the system.")]
    ScheduleCreationRefused,

    #[error("Cannot delete schedule {0}. The system requires exactly one schedule to operate.")]
    ScheduleDeletionRefused(String),

    #[error("Time slot not found: {0}")]
    SlotNotFound(String),

    #[error("Duplicate time slot id: {0}")]
    DuplicateSlot(String),

    #[error("Cannot delete menu {menu_id}: it is used by the schedule")]
    MenuInUse { menu_id: String },

    #[error("Cannot delete item {item_id}: it is used in {menus} menu(s)")]
    ItemInUse { item_id: String, menus: usize },

    #[error("Validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, EngineError>;
