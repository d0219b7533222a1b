//! WCET benchmarks for reset monitor operations.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use openracing_reset_switch::prelude::*;

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    group.bench_function("idle", |b| {
        let monitor = ResetMonitor::new(SimulatedInterruptController::new(), SimulatedClock::new());
        b.iter(|| black_box(monitor.reset_switch_state()));
    });

    group.bench_function("level_down", |b| {
        let monitor = ResetMonitor::new(SimulatedInterruptController::new(), SimulatedClock::new());
        monitor.controller().press();
        b.iter(|| black_box(monitor.reset_switch_state()));
    });

    group.bench_function("holding", |b| {
        let monitor = ResetMonitor::new(SimulatedInterruptController::new(), SimulatedClock::new());
        monitor.on_reset_interrupt();
        monitor.reset_switch_state();
        b.iter(|| black_box(monitor.reset_switch_state()));
    });

    group.finish();
}

fn bench_interrupt(c: &mut Criterion) {
    let mut group = c.benchmark_group("interrupt");

    group.bench_function("no_callback", |b| {
        let monitor = ResetMonitor::new(SimulatedInterruptController::new(), SimulatedClock::new());
        b.iter(|| monitor.on_reset_interrupt());
    });

    group.bench_function("rearm_and_fire", |b| {
        let monitor = ResetMonitor::new(SimulatedInterruptController::new(), SimulatedClock::new());
        b.iter(|| {
            monitor.set_reset_handler(|| {});
            monitor.on_reset_interrupt();
        });
    });

    group.finish();
}

fn bench_guard(c: &mut Criterion) {
    let controller = SimulatedInterruptController::new();
    c.bench_function("interrupt_guard", |b| {
        b.iter(|| {
            let guard = InterruptGuard::new(&controller);
            black_box(guard.saved_state())
        });
    });
}

criterion_group!(benches, bench_query, bench_interrupt, bench_guard);
criterion_main!(benches);
