//! # menu-engine
//!
//! Time-slot scheduling for canteen menu signage.
//!
//! A single [`Schedule`] maps time-of-day windows on selected weekdays to
//! menus. At any instant the engine resolves which menus are active, falls
//! back to the default menu when none are, turns the result into a flat list
//! of active items, and pages it through an auto-advancing carousel. Editors
//! get overlap warnings and a minimal-row weekly timeline layout.
//!
//! ## Modules
//!
//! - [`time`] — `HH:MM` ⇄ minutes, overnight-aware range containment
//! - [`day`] — weekday names and day-set matching
//! - [`overlap`] — advisory overlap detection between slots
//! - [`layout`] — greedy row packing for the timeline preview
//! - [`resolver`] — active menus for an instant, default fallback
//! - [`materialize`] — menu IDs → active, de-duplicated items
//! - [`pagination`] / [`carousel`] / [`scheduler`] — paging and rotation
//! - [`display`] — the kiosk loop tying it all together
//! - [`store`] / [`persist`] — the single-schedule store and JSON document
//! - [`validate`] — editor and boundary validation
//! - [`clock`], [`config`], [`geometry`], [`token`] — collaborators
//! - [`error`] — Error types

pub mod carousel;
pub mod clock;
pub mod config;
pub mod day;
pub mod display;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod materialize;
pub mod model;
pub mod overlap;
pub mod pagination;
pub mod persist;
pub mod resolver;
pub mod scheduler;
pub mod store;
pub mod time;
pub mod token;
pub mod validate;

pub use carousel::{Carousel, CarouselEvent, CarouselTick, CarouselTiming, Phase};
pub use clock::{Clock, FixedClock, SystemClock, ZonedClock};
pub use config::DisplaySettings;
pub use day::{day_matches, days_overlap, DayOfWeek};
pub use display::{DisplayRuntime, DisplayView, SignageDisplay};
pub use error::EngineError;
pub use layout::{calculate_time_slot_rows, weekly_layout, DayLayout, RowAssignment};
pub use materialize::{materialize_items, Catalog, InMemoryCatalog};
pub use model::{Item, Menu, QueryInstant, Schedule, TimeSlot};
pub use overlap::{detect_all_overlaps, time_ranges_overlap, SlotOverlap};
pub use persist::{DataFile, SignageData};
pub use resolver::{next_slot_change, resolve, resolve_active_menus, Resolution, SlotChange};
pub use scheduler::{ManualScheduler, Scheduler, TaskId};
pub use store::{ChangeWatcher, ScheduleSource, ScheduleStore};
pub use time::{is_time_in_range, minutes_to_time, time_to_minutes};
pub use token::TokenHistory;
