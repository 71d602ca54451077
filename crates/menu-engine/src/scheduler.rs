//! Cancellable delayed tasks.
//!
//! [`Scheduler`] is the seam between timer-driven components and whatever
//! actually keeps time. [`ManualScheduler`] is a virtual clock: nothing fires
//! until the owner advances it, which makes it suitable both for tests and for
//! a single-threaded kiosk loop that sleeps until [`ManualScheduler::next_deadline`].

use std::time::Duration;

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Something that can deliver an event after a delay and forget it again.
pub trait Scheduler<E> {
    /// Deliver `event` once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration, event: E) -> TaskId;

    /// Drop a pending task. Returns `false` if it already fired or was
    /// cancelled.
    fn cancel(&mut self, id: TaskId) -> bool;
}

#[derive(Debug)]
struct Pending<E> {
    id: TaskId,
    due: Duration,
    event: E,
}

/// A virtual-time scheduler. Events fire in due order; ties fire in the order
/// they were scheduled.
#[derive(Debug)]
pub struct ManualScheduler<E> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<E>>,
    scheduled: usize,
    cancelled: usize,
}

impl<E> Default for ManualScheduler<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
            scheduled: 0,
            cancelled: 0,
        }
    }
}

impl<E> ManualScheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Total tasks ever scheduled.
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }

    /// Total tasks cancelled before firing.
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }

    /// When the earliest pending task is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Remove and return the earliest task due at or before `until`, moving
    /// the clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<E> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.id.0))
            .map(|(i, _)| i)?;
        let task = self.pending.remove(index);
        self.now = self.now.max(task.due);
        Some(task.event)
    }

    /// Advance the clock by `by`, handing every task that falls due to
    /// `handler`. Tasks the handler schedules are delivered too if they fall
    /// due within the window.
    pub fn run_for<F>(&mut self, by: Duration, mut handler: F)
    where
        F: FnMut(&mut Self, E),
    {
        let target = self.now + by;
        while let Some(event) = self.pop_due(target) {
            handler(self, event);
        }
        self.advance_to(target);
    }

    /// Move the clock forward to `target` without firing anything. Use after
    /// draining [`pop_due`](Self::pop_due) up to the same target.
    pub fn advance_to(&mut self, target: Duration) {
        self.now = self.now.max(target);
    }

    /// Remove every pending task without firing it.
    pub fn clear(&mut self) {
        self.cancelled += self.pending.len();
        self.pending.clear();
    }
}

impl<E> Scheduler<E> for ManualScheduler<E> {
    fn schedule(&mut self, delay: Duration, event: E) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.scheduled += 1;
        self.pending.push(Pending {
            id,
            due: self.now + delay,
            event,
        });
        id
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        let removed = self.pending.len() != before;
        if removed {
            self.cancelled += 1;
        }
        removed
    }
}
