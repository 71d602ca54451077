use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use menu_engine::day::DayOfWeek;
use menu_engine::{
    calculate_time_slot_rows, detect_all_overlaps, minutes_to_time, resolve, weekly_layout,
    QueryInstant, Schedule, TimeSlot,
};

/// `n` staggered one-hour slots spread over the day.
fn slots(n: usize) -> Vec<TimeSlot> {
    (0..n)
        .map(|i| {
            let start = (i as u32 * 37) % 1380;
            TimeSlot::new(
                format!("slot-{i}"),
                minutes_to_time(start),
                minutes_to_time(start + 60),
                format!("menu-{}", i % 7),
                [],
            )
        })
        .collect()
}

fn bench_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_packing");
    for n in [10, 100, 1000] {
        let input = slots(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| calculate_time_slot_rows(black_box(input)))
        });
    }
    group.finish();

    let week = slots(200);
    c.bench_function("weekly_layout_200", |b| b.iter(|| weekly_layout(black_box(&week))));
}

fn bench_overlaps(c: &mut Criterion) {
    let input = slots(200);
    c.bench_function("detect_all_overlaps_200", |b| {
        b.iter(|| detect_all_overlaps(black_box(&input)))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let schedule = Schedule::new("main", Some("default")).with_slots(slots(200));
    let instant = QueryInstant::at("12:30", DayOfWeek::Wednesday);
    c.bench_function("resolve_200", |b| {
        b.iter(|| resolve(black_box(&schedule), black_box(&instant)))
    });
}

criterion_group!(benches, bench_packing, bench_overlaps, bench_resolve);
criterion_main!(benches);
