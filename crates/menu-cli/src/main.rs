//! `menu` CLI: resolve, lay out and validate a canteen menu schedule from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Which menus are on at 10:30 on Saturday?
//! menu resolve -i signage.json --at 10:30 --day saturday
//!
//! # ...and which items, right now, in Berlin?
//! menu resolve -i signage.json --items --timezone Europe/Berlin
//!
//! # Weekly timeline rows, or a single day
//! menu layout -i signage.json --day monday
//!
//! # Overlap warnings and the next slot start
//! menu overlaps -i signage.json
//! menu next -i signage.json --at 18:00 --day friday
//!
//! # Carousel pages for a 1080p kiosk
//! menu pages -i signage.json --viewport 1920x1080
//!
//! # Editor validation (exit code 1 on errors)
//! cat signage.json | menu validate
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG=debug` to see resolution traces.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use menu_engine::clock::{Clock, SystemClock, ZonedClock};
use menu_engine::geometry::{items_per_page, LayoutStyle, Viewport};
use menu_engine::layout::day_layout;
use menu_engine::pagination::{paginate, total_pages};
use menu_engine::persist::schedule_from_json;
use menu_engine::time::parse_minutes;
use menu_engine::validate::validate_schedule;
use menu_engine::{
    detect_all_overlaps, materialize_items, next_slot_change, resolve, weekly_layout, DayOfWeek,
    DisplaySettings, Item, QueryInstant, Resolution, SignageData,
};
use serde::Serialize;
use std::io::{self, Read};
use std::process;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "menu", version, about = "Canteen menu schedule tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Signage data file: a full document or a bare schedule (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// IANA timezone used for "now", e.g. Europe/Berlin
    #[arg(long, global = true, env = "MENU_TIMEZONE")]
    timezone: Option<String>,

    /// Display settings JSON file
    #[arg(long, global = true, env = "MENU_SETTINGS")]
    settings: Option<String>,
}

#[derive(Args)]
struct InstantArgs {
    /// Time of day as HH:MM (defaults to the current time)
    #[arg(long)]
    at: Option<String>,

    /// Day of week, full name or abbreviation (defaults to today)
    #[arg(long)]
    day: Option<DayOfWeek>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Style {
    Grid,
    List,
}

impl From<Style> for LayoutStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Grid => LayoutStyle::Grid,
            Style::List => LayoutStyle::List,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the menus active at an instant
    Resolve {
        #[command(flatten)]
        when: InstantArgs,
        /// Also list the de-duplicated active items
        #[arg(long)]
        items: bool,
    },
    /// Pack time slots into timeline rows, per day
    Layout {
        /// Only this day (all seven days if omitted)
        #[arg(long)]
        day: Option<DayOfWeek>,
    },
    /// List overlapping time slots
    Overlaps,
    /// Show the next time slot start
    Next {
        #[command(flatten)]
        when: InstantArgs,
    },
    /// Split the active items into carousel pages
    Pages {
        #[command(flatten)]
        when: InstantArgs,
        /// Items per page
        #[arg(long, conflicts_with = "viewport")]
        per_page: Option<usize>,
        /// Kiosk viewport as WIDTHxHEIGHT, used to derive items per page
        #[arg(long, value_parser = parse_viewport)]
        viewport: Option<Viewport>,
        /// Layout style for --viewport (defaults to the settings file)
        #[arg(long, value_enum)]
        style: Option<Style>,
    },
    /// Validate the schedule with the editor rules
    Validate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveOutput<'a> {
    time: String,
    day: DayOfWeek,
    #[serde(flatten)]
    resolution: &'a Resolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Vec<&'a Item>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PagesOutput<'a> {
    time: String,
    day: DayOfWeek,
    per_page: usize,
    total_items: usize,
    total_pages: usize,
    pages: Vec<Vec<&'a str>>,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref())?;
    let data = load_data(cli.input.as_deref())?;
    let timezone = cli.timezone.as_deref().or(settings.timezone.as_deref());

    match cli.command {
        Commands::Resolve { when, items } => {
            let instant = query_instant(&when, timezone)?;
            let resolution = resolve(&data.schedule, &instant);
            let catalog = data.catalog();
            let items = items.then(|| materialize_items(&catalog, &resolution.menu_ids));

            print_json(&ResolveOutput {
                time: instant.time(),
                day: instant.day,
                resolution: &resolution,
                items,
            })?;
        }
        Commands::Layout { day } => match day {
            Some(day) => print_json(&day_layout(&data.schedule.time_slots, day))?,
            None => print_json(&weekly_layout(&data.schedule.time_slots))?,
        },
        Commands::Overlaps => {
            let overlaps = detect_all_overlaps(&data.schedule.time_slots);
            for overlap in &overlaps {
                warn!(
                    first = %overlap.first_id,
                    second = %overlap.second_id,
                    minutes = overlap.overlap_minutes,
                    "time slots overlap"
                );
            }
            print_json(&overlaps)?;
        }
        Commands::Next { when } => {
            let instant = query_instant(&when, timezone)?;
            print_json(&next_slot_change(&data.schedule, &instant))?;
        }
        Commands::Pages {
            when,
            per_page,
            viewport,
            style,
        } => {
            let per_page = match (per_page, viewport) {
                (Some(n), _) => n.max(1),
                (None, Some(viewport)) => {
                    let style = style.map(LayoutStyle::from).unwrap_or(settings.layout_style);
                    items_per_page(viewport, style)
                }
                (None, None) => bail!("Either --per-page or --viewport is required"),
            };

            let instant = query_instant(&when, timezone)?;
            let resolution = resolve(&data.schedule, &instant);
            let catalog = data.catalog();
            let items = materialize_items(&catalog, &resolution.menu_ids);
            debug!(items = items.len(), per_page, "paginating");

            print_json(&PagesOutput {
                time: instant.time(),
                day: instant.day,
                per_page,
                total_items: items.len(),
                total_pages: total_pages(items.len(), per_page),
                pages: paginate(&items, per_page)
                    .into_iter()
                    .map(|page| page.iter().map(|item| item.id.as_str()).collect())
                    .collect(),
            })?;
        }
        Commands::Validate => {
            let schedule = &data.schedule;
            let errors = validate_schedule(schedule).err().unwrap_or_default();

            for error in &errors {
                match &error.slot_id {
                    Some(slot) => println!("error: [{}] {}", slot, error.message),
                    None => println!("error: {}", error.message),
                }
            }
            for overlap in detect_all_overlaps(&schedule.time_slots) {
                println!(
                    "warning: time slots {} and {} overlap by {} minutes",
                    overlap.first_id, overlap.second_id, overlap.overlap_minutes
                );
            }

            if !errors.is_empty() {
                process::exit(1);
            }
            println!(
                "Schedule '{}' is valid ({} time slots)",
                schedule.id,
                schedule.time_slots.len()
            );
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_settings(path: Option<&str>) -> Result<DisplaySettings> {
    match path {
        Some(path) => DisplaySettings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path)),
        None => Ok(DisplaySettings::default()),
    }
}

/// Accept either a full signage document or a bare schedule object.
fn load_data(path: Option<&str>) -> Result<SignageData> {
    let json = read_input(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&json).context("Input is not valid JSON")?;

    if value.get("schedule").is_some() {
        SignageData::from_json(&json).context("Failed to load signage data")
    } else {
        let schedule = schedule_from_json(&json).context("Failed to load schedule")?;
        Ok(SignageData {
            schedule,
            ..SignageData::default()
        })
    }
}

/// Build the query instant from `--at`/`--day`, filling whatever is missing
/// from the clock.
fn query_instant(when: &InstantArgs, timezone: Option<&str>) -> Result<QueryInstant> {
    let now = match (&when.at, when.day) {
        (Some(_), Some(_)) => None,
        _ => Some(clock(timezone)?.now()),
    };

    let minutes = match &when.at {
        Some(time) => parse_minutes(time)
            .with_context(|| format!("Invalid --at time '{}', expected HH:MM", time))?,
        None => now.map(|n| n.minutes).unwrap_or_default(),
    };
    let day = match (when.day, now) {
        (Some(day), _) => day,
        (None, Some(now)) => now.day,
        (None, None) => bail!("No day given and no clock available"),
    };

    Ok(QueryInstant { minutes, day })
}

fn clock(timezone: Option<&str>) -> Result<Box<dyn Clock>> {
    match timezone {
        Some(tz) => Ok(Box::new(ZonedClock::parse(tz)?)),
        None => Ok(Box::new(SystemClock)),
    }
}

fn parse_viewport(raw: &str) -> std::result::Result<Viewport, String> {
    let (width, height) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", raw))?;
    let width = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{}'", width))?;
    let height = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{}'", height))?;
    Ok(Viewport::new(width, height))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
