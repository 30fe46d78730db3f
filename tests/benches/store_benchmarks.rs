//! # Campaign Manager Benchmarks
//!
//! | Component | Operation |
//! |-----------|-----------|
//! | cm-02 Prop Tracker | `set_value` with N observers, ignored writes, `snapshot` |
//! | shared-bus | `emit` with N observers |

use cm_02_prop_tracker::PropTracker;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use shared_bus::SignalChannel;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

fn bench_set_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("cm-02-prop-tracker");

    for observers in [0usize, 1, 8, 64] {
        let tracker: PropTracker<Value> = PropTracker::new();
        let hits = Arc::new(AtomicU64::new(0));
        for _ in 0..observers {
            let hits = Arc::clone(&hits);
            tracker.subscribe(move |_| {
                hits.fetch_add(1, Ordering::Relaxed);
            });
        }

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("set_value", observers),
            &observers,
            |b, _| {
                let mut i = 0u64;
                b.iter(|| {
                    i += 1;
                    black_box(tracker.set_value("campaign", json!(i)))
                })
            },
        );
    }

    let tracker: PropTracker<Value> = PropTracker::new();
    tracker.set_ignored_keys(["txSvc"]);
    tracker.subscribe(|_| {});
    group.bench_function("set_value_ignored", |b| {
        b.iter(|| black_box(tracker.set_value("txSvc", json!(null))))
    });

    let tracker: PropTracker<Value> =
        PropTracker::with_initial((0..256).map(|i| (format!("key-{i}"), json!(i))));
    tracker.set_ignored_keys((0..256).step_by(4).map(|i| format!("key-{i}")));
    group.bench_function("snapshot_256", |b| b.iter(|| black_box(tracker.snapshot())));

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-bus");

    for observers in [0usize, 1, 8, 64] {
        let channel = SignalChannel::new("bench");
        for _ in 0..observers {
            channel.subscribe(|signal| {
                black_box(signal.sequence);
            });
        }
        let _listener = channel.listen();

        group.bench_with_input(BenchmarkId::new("emit", observers), &observers, |b, _| {
            b.iter(|| black_box(channel.emit()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_set_value, bench_emit);
criterion_main!(benches);
