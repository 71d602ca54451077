//! Auto-advancing page carousel.
//!
//! The carousel is a small state machine:
//!
//! ```text
//! Idle ──start (more than one page)──▶ Displaying ──display elapsed──▶ Transitioning
//!                                          ▲                              │
//!                                          └───── transition elapsed ─────┘
//!                                                 (page advances)
//! ```
//!
//! Every timer it schedules carries the epoch it was scheduled under.
//! [`Carousel::start`] and [`Carousel::stop`] cancel the pending timer *and*
//! bump the epoch, so a tick that fired before the cancellation but is
//! delivered afterwards is recognised as stale and ignored.
//!
//! The carousel can share a scheduler with other timers: any event type `E`
//! with `CarouselTick: Into<E>` works.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pagination::{needs_rotation, total_pages};
use crate::scheduler::{Scheduler, TaskId};

/// Current state of the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing to rotate: zero or one page.
    #[default]
    Idle,
    /// A page is on screen, waiting for `display` to elapse.
    Displaying,
    /// The fade before the page switch.
    Transitioning,
}

/// How long each page stays up and how long the fade lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselTiming {
    pub display: Duration,
    pub transition: Duration,
}

impl Default for CarouselTiming {
    fn default() -> Self {
        Self {
            display: Duration::from_millis(5000),
            transition: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    BeginTransition,
    Advance,
}

/// Timer payload delivered back to [`Carousel::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselTick {
    epoch: u64,
    step: Step,
}

/// Observable effect of handling a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    TransitionStarted { page: usize },
    PageAdvanced { from: usize, to: usize },
}

#[derive(Debug)]
pub struct Carousel {
    timing: CarouselTiming,
    phase: Phase,
    page: usize,
    total_pages: usize,
    epoch: u64,
    pending: Option<TaskId>,
}

impl Carousel {
    pub fn new(timing: CarouselTiming) -> Self {
        Self {
            timing,
            phase: Phase::Idle,
            page: 0,
            total_pages: 0,
            epoch: 0,
            pending: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase == Phase::Transitioning
    }

    pub fn timing(&self) -> CarouselTiming {
        self.timing
    }

    /// Tear down any running rotation and start a new one for `total_items`
    /// at `items_per_page`. The page resets to 0. When everything fits on one
    /// page the carousel stays idle.
    pub fn start<E, S>(&mut self, scheduler: &mut S, total_items: usize, items_per_page: usize)
    where
        S: Scheduler<E>,
        CarouselTick: Into<E>,
    {
        self.stop::<E, S>(scheduler);
        self.total_pages = total_pages(total_items, items_per_page);

        if !needs_rotation(total_items, items_per_page) {
            debug!(total_items, items_per_page, "carousel idle: single page");
            return;
        }

        debug!(
            total_pages = self.total_pages,
            epoch = self.epoch,
            "carousel rotation started"
        );
        self.phase = Phase::Displaying;
        self.arm::<E, S>(scheduler, self.timing.display, Step::BeginTransition);
    }

    /// Cancel the pending timer and invalidate any tick already in flight.
    pub fn stop<E, S: Scheduler<E>>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
        self.epoch = self.epoch.wrapping_add(1);
        self.phase = Phase::Idle;
        self.page = 0;
    }

    /// Apply a delivered tick. Ticks from an earlier epoch are ignored.
    pub fn handle<E, S>(&mut self, scheduler: &mut S, tick: CarouselTick) -> Option<CarouselEvent>
    where
        S: Scheduler<E>,
        CarouselTick: Into<E>,
    {
        if tick.epoch != self.epoch {
            debug!(
                tick_epoch = tick.epoch,
                epoch = self.epoch,
                "ignoring stale carousel tick"
            );
            return None;
        }

        match (self.phase, tick.step) {
            (Phase::Displaying, Step::BeginTransition) => {
                self.phase = Phase::Transitioning;
                self.arm::<E, S>(scheduler, self.timing.transition, Step::Advance);
                Some(CarouselEvent::TransitionStarted { page: self.page })
            }
            (Phase::Transitioning, Step::Advance) => {
                let from = self.page;
                self.page = (self.page + 1) % self.total_pages.max(1);
                self.phase = Phase::Displaying;
                self.arm::<E, S>(scheduler, self.timing.display, Step::BeginTransition);
                Some(CarouselEvent::PageAdvanced {
                    from,
                    to: self.page,
                })
            }
            _ => None,
        }
    }

    fn arm<E, S>(&mut self, scheduler: &mut S, delay: Duration, step: Step)
    where
        S: Scheduler<E>,
        CarouselTick: Into<E>,
    {
        let tick = CarouselTick {
            epoch: self.epoch,
            step,
        };
        self.pending = Some(scheduler.schedule(delay, tick.into()));
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(CarouselTiming::default())
    }
}
