//! Benchmarks for the time mapping and seek resolution hot path
//!
//! The control surface queries content time/duration on every media time
//! update tick (several per second) and resolves a seek for every step
//! press, so both paths sit on the UI's render loop.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use stitchplay::seek;
use stitchplay::timeline::{BreakList, CuePoint, mapper};

/// Build a break list with evenly spaced breaks across a 2-hour stream
///
/// Every other break is marked completed to exercise both resolver paths.
fn generate_breaks(break_count: usize) -> BreakList {
    let spacing = 7200.0 / (break_count.max(1) as f64);
    let cues: Vec<CuePoint> = (0..break_count)
        .map(|i| {
            let start = i as f64 * spacing;
            CuePoint {
                start,
                end: start + 30.0,
            }
        })
        .collect();

    let mut list = BreakList::from_cue_points(&cues).expect("generated cues are valid");
    for i in (0..break_count).step_by(2) {
        if let Some(ab) = list.get_mut(i) {
            ab.completed = true;
        }
    }
    list
}

fn bench_content_time_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_time_at");
    for break_count in [2, 8, 32] {
        let breaks = generate_breaks(break_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(break_count),
            &breaks,
            |b, breaks| {
                b.iter(|| {
                    // Sweep the whole timeline the way tick handling does.
                    for raw in (0..7200).step_by(60) {
                        black_box(mapper::content_time_at(breaks, black_box(raw as f64), true));
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_raw_time_for_content(c: &mut Criterion) {
    let breaks = generate_breaks(8);
    c.bench_function("raw_time_for_content", |b| {
        b.iter(|| {
            for content in (0..6900).step_by(60) {
                black_box(mapper::raw_time_for_content(
                    &breaks,
                    black_box(content as f64),
                ));
            }
        });
    });
}

fn bench_resolve_seek(c: &mut Criterion) {
    let breaks = generate_breaks(8);
    c.bench_function("resolve_seek_forward", |b| {
        b.iter(|| {
            black_box(seek::resolve(
                &breaks,
                black_box(100.0),
                black_box(6500.0),
                Some(7200.0),
                false,
            ));
        });
    });
    c.bench_function("resolve_seek_backward", |b| {
        b.iter(|| {
            black_box(seek::resolve(
                &breaks,
                black_box(6500.0),
                black_box(100.0),
                Some(7200.0),
                false,
            ));
        });
    });
}

criterion_group!(
    benches,
    bench_content_time_at,
    bench_raw_time_for_content,
    bench_resolve_seek
);
criterion_main!(benches);
