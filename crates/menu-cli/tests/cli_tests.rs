//! Integration tests for the `menu` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand
//! through the actual binary, including stdin input, bare-schedule input,
//! exit codes and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to the full signage document fixture.
fn canteen_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/canteen.json")
}

/// Helper: path to the bare-schedule fixture.
fn weekday_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/weekday.json")
}

fn menu() -> Command {
    let mut cmd = Command::cargo_bin("menu").unwrap();
    cmd.env_remove("MENU_TIMEZONE").env_remove("MENU_SETTINGS");
    cmd
}

/// Helper: run `menu` with `args` against the canteen fixture and parse stdout.
fn run_json(args: &[&str]) -> Value {
    let output = menu()
        .args(args)
        .args(["-i", canteen_path()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("stdout must be JSON")
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("array")
        .iter()
        .map(|v| v.as_str().expect("string").to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// resolve
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn resolve_weekend_overlap_in_definition_order() {
    let out = run_json(&["resolve", "--at", "10:30", "--day", "saturday"]);
    assert_eq!(strings(&out["menuIds"]), vec!["brunch", "specials"]);
    assert_eq!(strings(&out["activeSlotIds"]), vec!["c", "d"]);
    assert_eq!(out["usedDefault"], false);
    assert_eq!(out["time"], "10:30");
    assert_eq!(out["day"], "saturday");
    assert!(out.get("items").is_none());
}

#[test]
fn resolve_falls_back_to_default_between_slots() {
    let out = run_json(&["resolve", "--at", "11:30", "--day", "mon"]);
    assert_eq!(strings(&out["menuIds"]), vec!["default"]);
    assert_eq!(out["usedDefault"], true);
}

#[test]
fn resolve_overnight_slot_on_both_sides_of_midnight() {
    let late = run_json(&["resolve", "--at", "23:45", "--day", "friday"]);
    assert_eq!(strings(&late["menuIds"]), vec!["latenight"]);

    let early = run_json(&["resolve", "--at", "01:00", "--day", "saturday"]);
    assert_eq!(strings(&early["menuIds"]), vec!["latenight"]);
}

#[test]
fn resolve_items_are_deduplicated_and_active_only() {
    let out = run_json(&["resolve", "--at", "10:30", "--day", "sunday", "--items"]);
    let ids: Vec<&str> = out["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["pancakes", "eggs", "coffee", "juice", "waffles", "fruit", "bagel", "cake"]
    );
}

#[test]
fn resolve_reads_stdin() {
    let input = std::fs::read_to_string(canteen_path()).unwrap();
    menu()
        .args(["resolve", "--at", "08:00", "--day", "tuesday"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"breakfast\""));
}

#[test]
fn resolve_accepts_bare_schedule() {
    menu()
        .args(["resolve", "--at", "13:00", "--day", "wednesday", "-i", weekday_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"lunch\""));
}

#[test]
fn resolve_without_at_uses_the_clock() {
    menu()
        .args(["resolve", "--day", "monday", "--timezone", "UTC", "-i", canteen_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"menuIds\""));
}

// ─────────────────────────────────────────────────────────────────────────────
// layout / overlaps / next / pages
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn layout_single_day() {
    let out = run_json(&["layout", "--day", "saturday"]);
    assert_eq!(out["day"], "saturday");
    assert_eq!(strings(&out["slotIds"]), vec!["c", "d", "late"]);
    assert_eq!(out["rows"]["totalRows"], 2);
    assert_eq!(out["rows"]["slotRows"]["c"], 0);
    assert_eq!(out["rows"]["slotRows"]["d"], 1);
    assert_eq!(out["rows"]["slotRows"]["late"], 0);
}

#[test]
fn layout_whole_week_is_monday_first() {
    let out = run_json(&["layout"]);
    let days = out.as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["day"], "monday");
    assert_eq!(days[0]["rows"]["totalRows"], 1);
    assert_eq!(days[6]["day"], "sunday");
}

#[test]
fn overlaps_reports_the_weekend_pair() {
    let out = run_json(&["overlaps"]);
    let overlaps = out.as_array().unwrap();
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0]["firstId"], "c");
    assert_eq!(overlaps[0]["secondId"], "d");
    assert_eq!(overlaps[0]["overlapMinutes"], 120);
}

#[test]
fn overlaps_warn_on_stderr() {
    menu()
        .args(["overlaps", "-i", canteen_path()])
        .assert()
        .success()
        .stderr(predicate::str::contains("time slots overlap"));
}

#[test]
fn next_change_later_today() {
    let out = run_json(&["next", "--at", "18:00", "--day", "friday"]);
    assert_eq!(out["slotId"], "late");
    assert_eq!(out["changeTime"], "22:00");
    assert_eq!(out["minutesUntil"], 240);
}

#[test]
fn pages_with_explicit_capacity() {
    let out = run_json(&["pages", "--at", "10:30", "--day", "saturday", "--per-page", "6"]);
    assert_eq!(out["totalItems"], 8);
    assert_eq!(out["totalPages"], 2);
    assert_eq!(strings(&out["pages"][1]), vec!["bagel", "cake"]);
}

#[test]
fn pages_from_viewport() {
    let out = run_json(&[
        "pages",
        "--at",
        "10:30",
        "--day",
        "saturday",
        "--viewport",
        "1920x1080",
    ]);
    assert_eq!(out["perPage"], 6);

    let list = run_json(&[
        "pages",
        "--at",
        "10:30",
        "--day",
        "saturday",
        "--viewport",
        "1920x1080",
        "--style",
        "list",
    ]);
    assert_eq!(list["perPage"], 5);
    assert_eq!(list["totalPages"], 2);
}

#[test]
fn pages_requires_a_capacity() {
    menu()
        .args(["pages", "--at", "10:30", "--day", "saturday", "-i", canteen_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--per-page or --viewport"));
}

// ─────────────────────────────────────────────────────────────────────────────
// validate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn validate_valid_schedule() {
    menu()
        .args(["validate", "-i", weekday_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schedule 'main' is valid (2 time slots)"));
}

#[test]
fn validate_reports_errors_and_exits_nonzero() {
    menu()
        .args(["validate", "-i", canteen_path()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "error: [late] End time must be after start time",
        ))
        .stdout(predicate::str::contains(
            "warning: time slots c and d overlap by 120 minutes",
        ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_json_input_fails() {
    menu()
        .arg("overlaps")
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is not valid JSON"));
}

#[test]
fn malformed_slot_time_is_rejected_on_load() {
    let input = r#"{"id":"main","timeSlots":[
        {"id":"a","startTime":"breakfast","endTime":"11:00","menuId":"m"}]}"#;
    menu()
        .arg("overlaps")
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a clock time"));
}

#[test]
fn invalid_at_time_fails() {
    menu()
        .args(["resolve", "--at", "25:00", "--day", "monday", "-i", canteen_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --at time"));
}

#[test]
fn unknown_day_fails() {
    menu()
        .args(["resolve", "--at", "10:00", "--day", "funday", "-i", canteen_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("funday"));
}

#[test]
fn invalid_timezone_fails() {
    menu()
        .args(["next", "--timezone", "Mars/Olympus", "-i", canteen_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn timezone_from_environment() {
    menu()
        .env("MENU_TIMEZONE", "Europe/Berlin")
        .args(["next", "-i", canteen_path()])
        .assert()
        .success();
}

#[test]
fn missing_file_fails() {
    menu()
        .args(["overlaps", "-i", "/nonexistent/signage.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
