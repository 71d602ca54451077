//! Tests for advisory slot overlap detection.

use menu_engine::day::{DayOfWeek, WEEKDAYS, WEEKEND};
use menu_engine::overlap::has_overlaps;
use menu_engine::{detect_all_overlaps, time_ranges_overlap, TimeSlot};

/// Helper to build a slot with a day-set.
fn slot(id: &str, start: &str, end: &str, days: &[DayOfWeek]) -> TimeSlot {
    TimeSlot::new(id, start, end, format!("menu-{id}"), days.iter().copied())
}

#[test]
fn two_overlapping_slots_detected() {
    // 09:00-10:00 and 09:30-10:30 on weekdays → 30-min overlap
    let slots = vec![
        slot("a", "09:00", "10:00", &WEEKDAYS),
        slot("b", "09:30", "10:30", &WEEKDAYS),
    ];

    let overlaps = detect_all_overlaps(&slots);

    assert_eq!(overlaps.len(), 1, "should detect exactly one overlap");
    assert_eq!((overlaps[0].first, overlaps[0].second), (0, 1));
    assert_eq!(overlaps[0].first_id, "a");
    assert_eq!(overlaps[0].second_id, "b");
    assert_eq!(overlaps[0].overlap_minutes, 30);
}

#[test]
fn adjacent_slots_do_not_overlap() {
    let a = slot("a", "09:00", "10:00", &[]);
    let b = slot("b", "10:00", "11:00", &[]);

    assert!(!time_ranges_overlap(&a, &b));
    assert!(!time_ranges_overlap(&b, &a));
    assert!(detect_all_overlaps(&[a, b]).is_empty());
}

#[test]
fn same_time_on_disjoint_days_is_not_an_overlap() {
    let slots = vec![
        slot("weekday", "09:00", "15:00", &WEEKDAYS),
        slot("weekend", "09:00", "15:00", &WEEKEND),
    ];

    assert!(!has_overlaps(&slots));
}

#[test]
fn wildcard_days_overlap_with_any_day_set() {
    let slots = vec![
        slot("every", "12:00", "13:00", &[]),
        slot("sunday", "12:30", "14:00", &[DayOfWeek::Sunday]),
    ];

    assert!(has_overlaps(&slots));
}

#[test]
fn contained_slot_overlap_is_its_own_length() {
    let slots = vec![
        slot("brunch", "09:00", "15:00", &WEEKEND),
        slot("specials", "10:00", "12:00", &WEEKEND),
    ];

    let overlaps = detect_all_overlaps(&slots);
    assert_eq!(overlaps.len(), 1);
    assert_eq!(overlaps[0].overlap_minutes, 120);
}

#[test]
fn every_pair_reported_in_schedule_order() {
    let slots = vec![
        slot("a", "08:00", "12:00", &[]),
        slot("b", "09:00", "10:00", &[]),
        slot("c", "11:00", "13:00", &[]),
        slot("d", "14:00", "15:00", &[]),
    ];

    let pairs: Vec<(usize, usize)> = detect_all_overlaps(&slots)
        .iter()
        .map(|o| (o.first, o.second))
        .collect();

    assert_eq!(pairs, vec![(0, 1), (0, 2)]);
}

#[test]
fn overnight_slot_uses_literal_minute_comparison() {
    // 22:00-02:00 is compared as start=1320, end=120: against 23:00-23:30
    // the test `1320 < 1410 && 120 > 1380` is false.
    let late = slot("late", "22:00", "02:00", &[]);
    let snack = slot("snack", "23:00", "23:30", &[]);
    assert!(!time_ranges_overlap(&late, &snack));

    // Against 01:00-03:00 it is `1320 < 180 && ...`, also false.
    let early = slot("early", "01:00", "03:00", &[]);
    assert!(!time_ranges_overlap(&late, &early));
}

#[test]
fn fewer_than_two_slots_never_overlap() {
    assert!(detect_all_overlaps(&[]).is_empty());
    assert!(detect_all_overlaps(&[slot("a", "09:00", "10:00", &[])]).is_empty());
}
