//! Benchmark suite for cardbox-core
//!
//! Run with: cargo bench

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cardbox_core::{MemoryState, Scheduler};

fn bench_first_review(c: &mut Criterion) {
    let scheduler = Scheduler::default();
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let card = MemoryState::new(now);

    c.bench_function("Scheduler::schedule_review/first", |b| {
        b.iter(|| scheduler.schedule_review(black_box(3), black_box(&card), now))
    });
}

fn bench_mature_review(c: &mut Criterion) {
    let scheduler = Scheduler::default();
    let t0 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let mut card = MemoryState::new(t0);
    let mut now = t0;
    for grade in [3u8, 3, 2, 3, 4, 3] {
        now += Duration::days(2);
        card = scheduler.schedule_review(grade, &card, now).unwrap();
    }
    let review_at = now + Duration::days(5);

    c.bench_function("Scheduler::schedule_review/mature", |b| {
        b.iter(|| scheduler.schedule_review(black_box(3), black_box(&card), review_at))
    });
}

criterion_group!(benches, bench_first_review, bench_mature_review);
criterion_main!(benches);
