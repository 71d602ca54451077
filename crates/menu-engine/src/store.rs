//! The single-schedule store and change propagation.
//!
//! [`ScheduleStore`] owns the one schedule of the system. Every mutation bumps
//! the version and notifies subscribers synchronously. Creating a second
//! schedule or deleting the existing one is refused.
//!
//! A display running in another process sees edits through a
//! [`ChangeWatcher`] polling a [`ScheduleSource`]: consistency is eventual and
//! a display may lag by up to one poll interval.

use std::fmt;

use tracing::info;

use crate::error::{EngineError, Result};
use crate::model::{Schedule, TimeSlot};
use crate::time::parse_minutes;

/// Handle returned by [`ScheduleStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Schedule, u64)>;

pub struct ScheduleStore {
    schedule: Schedule,
    version: u64,
    next_subscription: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl fmt::Debug for ScheduleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleStore")
            .field("schedule", &self.schedule)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ScheduleStore {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            version: 0,
            next_subscription: 0,
            listeners: Vec::new(),
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// An owned copy for a resolution pass.
    pub fn snapshot(&self) -> Schedule {
        self.schedule.clone()
    }

    /// Incremented on every mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Register a listener called with the new schedule and version after
    /// every mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Schedule, u64) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Call every listener with the current schedule.
    pub fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.schedule, self.version);
        }
    }

    /// Always refused: the system holds exactly one schedule.
    pub fn create_schedule(&mut self, _schedule: Schedule) -> Result<()> {
        Err(EngineError::ScheduleCreationRefused)
    }

    /// Always refused: the system holds exactly one schedule.
    pub fn delete_schedule(&mut self, id: &str) -> Result<()> {
        Err(EngineError::ScheduleDeletionRefused(id.to_string()))
    }

    pub fn set_default_menu(&mut self, menu_id: Option<String>) {
        self.schedule.default_menu_id = menu_id;
        self.commit("default menu changed");
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.schedule.name = name.into();
        self.commit("schedule renamed");
    }

    /// Append a slot. Its ID must be new and its times must parse.
    pub fn add_slot(&mut self, slot: TimeSlot) -> Result<()> {
        check_times(&slot)?;
        if self.schedule.slot(&slot.id).is_some() {
            return Err(EngineError::DuplicateSlot(slot.id));
        }
        self.schedule.time_slots.push(slot);
        self.commit("time slot added");
        Ok(())
    }

    /// Replace the slot with the same ID, keeping its position.
    pub fn update_slot(&mut self, slot: TimeSlot) -> Result<()> {
        check_times(&slot)?;
        let existing = self
            .schedule
            .time_slots
            .iter_mut()
            .find(|s| s.id == slot.id)
            .ok_or_else(|| EngineError::SlotNotFound(slot.id.clone()))?;
        *existing = slot;
        self.commit("time slot updated");
        Ok(())
    }

    pub fn remove_slot(&mut self, id: &str) -> Result<TimeSlot> {
        let index = self
            .schedule
            .time_slots
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| EngineError::SlotNotFound(id.to_string()))?;
        let removed = self.schedule.time_slots.remove(index);
        self.commit("time slot removed");
        Ok(removed)
    }

    /// Swap the whole slot list, e.g. after a bulk edit in the editor.
    pub fn replace_slots(&mut self, slots: Vec<TimeSlot>) -> Result<()> {
        let mut ids = std::collections::HashSet::new();
        for slot in &slots {
            check_times(slot)?;
            if !ids.insert(slot.id.as_str()) {
                return Err(EngineError::DuplicateSlot(slot.id.clone()));
            }
        }
        self.schedule.time_slots = slots;
        self.commit("time slots replaced");
        Ok(())
    }

    fn commit(&mut self, what: &str) {
        self.version += 1;
        info!(
            schedule = %self.schedule.id,
            version = self.version,
            slots = self.schedule.time_slots.len(),
            "{what}"
        );
        self.notify();
    }
}

fn check_times(slot: &TimeSlot) -> Result<()> {
    for value in [&slot.start_time, &slot.end_time] {
        if parse_minutes(value).is_none() {
            return Err(EngineError::InvalidTime(value.clone()));
        }
    }
    Ok(())
}

/// Anything a display can read the current schedule from.
pub trait ScheduleSource {
    fn load_schedule(&self) -> Result<Schedule>;
}

impl ScheduleSource for ScheduleStore {
    fn load_schedule(&self) -> Result<Schedule> {
        Ok(self.snapshot())
    }
}

impl<S: ScheduleSource + ?Sized> ScheduleSource for &S {
    fn load_schedule(&self) -> Result<Schedule> {
        (**self).load_schedule()
    }
}

/// Detects schedule changes made elsewhere by polling a source.
#[derive(Debug, Default)]
pub struct ChangeWatcher {
    last: Option<Schedule>,
}

impl ChangeWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the schedule and return it if it differs from what the previous
    /// poll saw. The first successful poll always returns the schedule.
    pub fn poll<S: ScheduleSource + ?Sized>(&mut self, source: &S) -> Result<Option<Schedule>> {
        let current = source.load_schedule()?;
        if self.last.as_ref() == Some(&current) {
            return Ok(None);
        }
        self.last = Some(current.clone());
        Ok(Some(current))
    }
}
