//! Engine benchmark: tick throughput and grapheme splitting.
//!
//! Target: a full character tick (reveal + event dispatch) well under 1µs
//! so the typist thread's cost is dominated by sleeping, never by work.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use echotype::{split_graphemes, EventKind, TypingEngine};
use std::time::Duration;

fn full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_full_run");
    for chars in [10usize, 100, 1_000] {
        let line: String = "abcdefghij".chars().cycle().take(chars).collect();
        group.bench_with_input(BenchmarkId::from_parameter(chars), &line, |b, line| {
            b.iter(|| {
                // Zero speed floors to 1ns, so one advance covers the run.
                let mut engine = TypingEngine::new([line.as_str()], Duration::ZERO);
                engine.start();
                engine.advance(Duration::from_millis(1));
                black_box(engine.completed_lines())
            });
        });
    }
    group.finish();
}

fn full_run_with_listener(c: &mut Criterion) {
    let line: String = "abcdefghij".chars().cycle().take(100).collect();
    c.bench_function("engine_full_run_100_with_listener", |b| {
        b.iter(|| {
            let mut engine = TypingEngine::new([line.as_str()], Duration::ZERO);
            engine.on(EventKind::Update, |event| {
                black_box(event);
            });
            engine.start();
            engine.advance(Duration::from_millis(1));
            black_box(engine.completed_lines())
        });
    });
}

fn advance_without_tick(c: &mut Criterion) {
    c.bench_function("engine_advance_no_tick", |b| {
        let mut engine = TypingEngine::new(["hello world"], Duration::from_secs(3600));
        engine.start();
        b.iter(|| {
            // Never reaches the deadline; measures scheduling arithmetic.
            engine.advance(black_box(Duration::from_nanos(10)));
        });
    });
}

fn grapheme_split(c: &mut Criterion) {
    let ascii: String = "abcdefghij".chars().cycle().take(200).collect();
    let mixed = "Hello! 你好 👋 e\u{301} \u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467} done"
        .repeat(5);

    c.bench_function("split_graphemes_ascii_200", |b| {
        b.iter(|| black_box(split_graphemes(black_box(&ascii))));
    });
    c.bench_function("split_graphemes_mixed", |b| {
        b.iter(|| black_box(split_graphemes(black_box(&mixed))));
    });
}

criterion_group!(
    benches,
    full_run,
    full_run_with_listener,
    advance_without_tick,
    grapheme_split
);
criterion_main!(benches);
