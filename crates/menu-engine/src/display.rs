//! The kiosk display: resolution, materialization and the carousel wired
//! together.
//!
//! [`SignageDisplay`] holds what is on screen and reacts to three inputs: a
//! refresh with a new schedule snapshot and instant, a new items-per-page
//! capacity, and carousel timer ticks. The carousel is only restarted when
//! the displayed item sequence or the page capacity actually changes, so a
//! refresh that resolves to the same items leaves the rotation undisturbed.
//!
//! [`DisplayRuntime`] drives a display from a clock, a schedule source and a
//! catalog with three periodic timers on one [`ManualScheduler`].

use std::time::Duration;

use tracing::{debug, warn};

use crate::carousel::{Carousel, CarouselEvent, CarouselTick, CarouselTiming};
use crate::clock::Clock;
use crate::config::DisplaySettings;
use crate::materialize::{materialize_items, Catalog};
use crate::model::{Item, QueryInstant, Schedule};
use crate::pagination::page_slice;
use crate::resolver::{resolve, Resolution};
use crate::scheduler::{ManualScheduler, Scheduler};
use crate::store::{ChangeWatcher, ScheduleSource};
use crate::time::minutes_to_time;
use crate::token::TokenHistory;

/// What the screen should render.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayView<'a> {
    /// No menu resolved, or the resolved menus have no active items.
    NoMenu { time: String },
    Menu {
        time: String,
        menu_ids: &'a [String],
        used_default: bool,
        /// Items on the current page.
        items: &'a [Item],
        page: usize,
        total_pages: usize,
        transitioning: bool,
    },
}

#[derive(Debug)]
pub struct SignageDisplay {
    carousel: Carousel,
    items_per_page: usize,
    resolution: Resolution,
    items: Vec<Item>,
    instant: Option<QueryInstant>,
    tokens: TokenHistory,
}

impl SignageDisplay {
    pub fn new(timing: CarouselTiming, items_per_page: usize) -> Self {
        Self {
            carousel: Carousel::new(timing),
            items_per_page: items_per_page.max(1),
            resolution: Resolution::default(),
            items: Vec::new(),
            instant: None,
            tokens: TokenHistory::new(),
        }
    }

    pub fn from_settings(settings: &DisplaySettings, items_per_page: usize) -> Self {
        Self::new(settings.carousel_timing(), items_per_page)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// Serving tokens shown beside the menu panel.
    pub fn tokens(&self) -> &TokenHistory {
        &self.tokens
    }

    /// Replace the token history, e.g. after the counter calls a new number.
    /// The carousel is not affected.
    pub fn set_tokens(&mut self, tokens: TokenHistory) {
        self.tokens = tokens;
    }

    /// Re-resolve against `schedule` at `instant`. Returns `true` if the
    /// displayed item sequence changed, in which case the carousel restarts
    /// from the first page.
    pub fn refresh<C, E, S>(
        &mut self,
        schedule: &Schedule,
        catalog: &C,
        instant: QueryInstant,
        scheduler: &mut S,
    ) -> bool
    where
        C: Catalog,
        S: Scheduler<E>,
        CarouselTick: Into<E>,
    {
        let resolution = resolve(schedule, &instant);
        let items: Vec<Item> = materialize_items(catalog, &resolution.menu_ids)
            .into_iter()
            .cloned()
            .collect();

        let changed = !same_ids(&self.items, &items);
        self.resolution = resolution;
        self.items = items;
        self.instant = Some(instant);

        if changed {
            debug!(items = self.items.len(), "displayed items changed");
            self.carousel
                .start::<E, S>(scheduler, self.items.len(), self.items_per_page);
        }
        changed
    }

    /// Apply a new page capacity from the geometry collaborator. Restarts
    /// the carousel if the capacity changed.
    pub fn set_items_per_page<E, S>(&mut self, items_per_page: usize, scheduler: &mut S)
    where
        S: Scheduler<E>,
        CarouselTick: Into<E>,
    {
        let items_per_page = items_per_page.max(1);
        if items_per_page == self.items_per_page {
            return;
        }
        self.items_per_page = items_per_page;
        self.carousel
            .start::<E, S>(scheduler, self.items.len(), self.items_per_page);
    }

    pub fn on_timer<E, S>(&mut self, tick: CarouselTick, scheduler: &mut S) -> Option<CarouselEvent>
    where
        S: Scheduler<E>,
        CarouselTick: Into<E>,
    {
        self.carousel.handle::<E, S>(scheduler, tick)
    }

    /// Stop the carousel, e.g. when the screen is torn down.
    pub fn stop<E, S: Scheduler<E>>(&mut self, scheduler: &mut S) {
        self.carousel.stop::<E, S>(scheduler);
    }

    pub fn view(&self) -> DisplayView<'_> {
        let time = self
            .instant
            .map(|i| minutes_to_time(i.minutes))
            .unwrap_or_default();

        if self.items.is_empty() {
            return DisplayView::NoMenu { time };
        }

        DisplayView::Menu {
            time,
            menu_ids: &self.resolution.menu_ids,
            used_default: self.resolution.used_default,
            items: page_slice(&self.items, self.items_per_page, self.carousel.page()),
            page: self.carousel.page(),
            total_pages: self.carousel.total_pages(),
            transitioning: self.carousel.is_transitioning(),
        }
    }
}

fn same_ids(a: &[Item], b: &[Item]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id)
}

/// Timers multiplexed on the runtime's scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTimer {
    /// Re-sample the clock and re-resolve.
    Refresh,
    /// Check the schedule source for edits made elsewhere.
    Poll,
    Carousel(CarouselTick),
}

impl From<CarouselTick> for DisplayTimer {
    fn from(tick: CarouselTick) -> Self {
        Self::Carousel(tick)
    }
}

/// A display driven by its own timers.
///
/// Single-threaded: the owner calls [`run_for`](Self::run_for) (tests, or a
/// loop that sleeps until [`next_deadline`](Self::next_deadline)).
pub struct DisplayRuntime<Src, Cat, Clk> {
    source: Src,
    catalog: Cat,
    clock: Clk,
    refresh_interval: Duration,
    poll_interval: Duration,
    schedule: Schedule,
    watcher: ChangeWatcher,
    display: SignageDisplay,
    scheduler: ManualScheduler<DisplayTimer>,
    refreshes: usize,
    started: bool,
}

impl<Src, Cat, Clk> DisplayRuntime<Src, Cat, Clk>
where
    Src: ScheduleSource,
    Cat: Catalog,
    Clk: Clock,
{
    pub fn new(
        source: Src,
        catalog: Cat,
        clock: Clk,
        settings: &DisplaySettings,
        items_per_page: usize,
    ) -> Self {
        Self {
            source,
            catalog,
            clock,
            refresh_interval: settings.refresh_interval(),
            poll_interval: settings.poll_interval(),
            schedule: Schedule::default(),
            watcher: ChangeWatcher::new(),
            display: SignageDisplay::from_settings(settings, items_per_page),
            scheduler: ManualScheduler::new(),
            refreshes: 0,
            started: false,
        }
    }

    /// Load the schedule, render once and arm the periodic timers. Calling
    /// it again is a no-op.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.poll_source();
        self.refresh();
        self.scheduler
            .schedule(self.refresh_interval, DisplayTimer::Refresh);
        self.scheduler.schedule(self.poll_interval, DisplayTimer::Poll);
    }

    pub fn display(&self) -> &SignageDisplay {
        &self.display
    }

    pub fn view(&self) -> DisplayView<'_> {
        self.display.view()
    }

    /// Number of resolution passes so far.
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.display
            .set_items_per_page::<DisplayTimer, _>(items_per_page, &mut self.scheduler);
    }

    /// Advance virtual time by `by`, firing every timer that falls due.
    pub fn run_for(&mut self, by: Duration) {
        let target = self.scheduler.now() + by;
        while let Some(timer) = self.scheduler.pop_due(target) {
            self.handle(timer);
        }
        self.scheduler.advance_to(target);
    }

    fn handle(&mut self, timer: DisplayTimer) {
        match timer {
            DisplayTimer::Refresh => {
                self.refresh();
                self.scheduler
                    .schedule(self.refresh_interval, DisplayTimer::Refresh);
            }
            DisplayTimer::Poll => {
                if self.poll_source() {
                    self.refresh();
                }
                self.scheduler.schedule(self.poll_interval, DisplayTimer::Poll);
            }
            DisplayTimer::Carousel(tick) => {
                self.display
                    .on_timer::<DisplayTimer, _>(tick, &mut self.scheduler);
            }
        }
    }

    /// Returns `true` when a new schedule was picked up. Load failures keep
    /// the last good schedule on screen.
    fn poll_source(&mut self) -> bool {
        match self.watcher.poll(&self.source) {
            Ok(Some(schedule)) => {
                debug!(schedule = %schedule.id, "schedule change detected");
                self.schedule = schedule;
                true
            }
            Ok(None) => false,
            Err(error) => {
                warn!(%error, "failed to load schedule, keeping last snapshot");
                false
            }
        }
    }

    fn refresh(&mut self) {
        let instant = self.clock.now();
        self.display.refresh::<Cat, DisplayTimer, _>(
            &self.schedule,
            &self.catalog,
            instant,
            &mut self.scheduler,
        );
        self.refreshes += 1;
    }
}
