//! Input validation for schedules and time slots.
//!
//! Two levels:
//! - [`validate_document_shape`] runs at the persistence boundary. It only
//!   rejects data the engine cannot interpret (unparseable times, duplicate
//!   slot IDs). Windows that wrap past midnight are accepted.
//! - [`validate_time_slot`] and [`validate_schedule`] are the stricter editor
//!   rules: required fields, and `start < end` for every slot.
//!
//! All checks collect every problem instead of stopping at the first.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{Schedule, TimeSlot};
use crate::time::{is_valid_time_format, parse_minutes};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Slot the error refers to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<String>,
    /// Human-readable description.
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorKind {
    MissingStartTime,
    MissingEndTime,
    MissingMenu,
    InvalidTimeFormat,
    /// End time is not after start time.
    EndNotAfterStart,
    MissingDefaultMenu,
    NoTimeSlots,
    DuplicateSlotId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, slot_id: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            kind,
            slot_id: slot_id.map(str::to_string),
            message: message.into(),
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_time(
    errors: &mut Vec<ValidationError>,
    slot: &TimeSlot,
    value: &str,
    missing: ValidationErrorKind,
    label: &str,
) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(
            missing,
            Some(&slot.id),
            format!("{label} is required"),
        ));
    } else if !is_valid_time_format(value) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTimeFormat,
            Some(&slot.id),
            format!("{label} must be HH:MM (24-hour), got '{value}'"),
        ));
    }
}

/// Editor rules for a single slot.
pub fn validate_time_slot(slot: &TimeSlot) -> ValidationResult {
    let mut errors = Vec::new();

    check_time(
        &mut errors,
        slot,
        &slot.start_time,
        ValidationErrorKind::MissingStartTime,
        "Start time",
    );
    check_time(
        &mut errors,
        slot,
        &slot.end_time,
        ValidationErrorKind::MissingEndTime,
        "End time",
    );

    if slot.menu_id.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingMenu,
            Some(&slot.id),
            "Menu is required",
        ));
    }

    if let (Some(start), Some(end)) = (parse_minutes(&slot.start_time), parse_minutes(&slot.end_time)) {
        if start >= end {
            errors.push(ValidationError::new(
                ValidationErrorKind::EndNotAfterStart,
                Some(&slot.id),
                "End time must be after start time",
            ));
        }
    }

    finish(errors)
}

fn duplicate_ids(slots: &[TimeSlot]) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    slots
        .iter()
        .filter(|s| !seen.insert(s.id.as_str()))
        .map(|s| {
            ValidationError::new(
                ValidationErrorKind::DuplicateSlotId,
                Some(&s.id),
                format!("Duplicate time slot ID: {}", s.id),
            )
        })
        .collect()
}

/// Editor rules for the whole schedule: a default menu, at least one slot,
/// unique slot IDs, and every slot valid.
pub fn validate_schedule(schedule: &Schedule) -> ValidationResult {
    let mut errors = Vec::new();

    if schedule.default_menu().is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingDefaultMenu,
            None,
            "Default menu is required",
        ));
    }

    if schedule.time_slots.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoTimeSlots,
            None,
            "At least one time slot is required",
        ));
    }

    errors.extend(duplicate_ids(&schedule.time_slots));

    for slot in &schedule.time_slots {
        if let Err(slot_errors) = validate_time_slot(slot) {
            errors.extend(slot_errors);
        }
    }

    finish(errors)
}

/// Boundary check for loaded documents: every time parses and slot IDs are
/// unique. Overnight windows are allowed.
pub fn validate_document_shape(schedule: &Schedule) -> ValidationResult {
    let mut errors = duplicate_ids(&schedule.time_slots);

    for slot in &schedule.time_slots {
        for (label, value) in [("startTime", &slot.start_time), ("endTime", &slot.end_time)] {
            if parse_minutes(value).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTimeFormat,
                    Some(&slot.id),
                    format!("{label} of slot {} is not a clock time: '{value}'", slot.id),
                ));
            }
        }
    }

    finish(errors)
}
