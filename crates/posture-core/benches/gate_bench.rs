// ─────────────────────────────────────────────────────────────────────
// Structural Posture Engine — Gate Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks over the posture step, the decision gate, and
//! full runs at the reference sequence lengths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use posture_core::{posture_step, run_quadrature, run_sequence, DecisionGate, RunState};
use posture_types::PostureConfig;

fn log_spaced(h_max: f64, h_min: f64, steps: usize) -> Vec<f64> {
    let (lo, hi) = (h_min.log10(), h_max.log10());
    (0..steps)
        .map(|k| {
            let t = k as f64 / (steps - 1) as f64;
            10f64.powf(hi + (lo - hi) * t)
        })
        .collect()
}

// ── posture_step ────────────────────────────────────────────────────

fn bench_posture_step(c: &mut Criterion) {
    c.bench_function("posture_step", |b| {
        b.iter(|| posture_step(black_box(1.25), black_box(-1.5), black_box(0.5)))
    });
}

// ── DecisionGate.step ───────────────────────────────────────────────

fn bench_gate_step(c: &mut Criterion) {
    let gate = DecisionGate::new(PostureConfig::default());
    c.bench_function("gate_step", |b| {
        b.iter(|| {
            let (state, _) = gate.step(RunState::new(), black_box(0.1), black_box(1.0));
            gate.step(state, black_box(0.05), black_box(1.05))
        })
    });
}

// ── Full runs at reference lengths ──────────────────────────────────

fn bench_run_15_steps(c: &mut Criterion) {
    let cfg = PostureConfig::default().without_flip_terms();
    let hs = log_spaced(1e-1, 1e-15, 15);
    c.bench_function("run_15_steps", |b| {
        b.iter(|| run_sequence(black_box(&cfg), black_box(&hs), |h| h.sqrt() / h))
    });
}

fn bench_run_200_steps(c: &mut Criterion) {
    let cfg = PostureConfig {
        a_min: 0.0,
        s_max: 1e9,
        ..PostureConfig::default()
    };
    let hs = log_spaced(1e-1, 1e-15, 200);
    c.bench_function("run_200_steps", |b| {
        b.iter(|| run_sequence(black_box(&cfg), black_box(&hs), |h| (1.0 - h.cos()) / h))
    });
}

fn bench_run_1000_step_quadrature(c: &mut Criterion) {
    let cfg = PostureConfig {
        zero_tol: 1e-15,
        gamma_flip: 0.05,
        ..PostureConfig::default()
    };
    let grid: Vec<f64> = (0..=1000).map(|i| i as f64 / 1000.0).collect();
    c.bench_function("run_1000_step_quadrature", |b| {
        b.iter(|| run_quadrature(black_box(&cfg), black_box(&grid), |_| 0.0))
    });
}

criterion_group!(
    benches,
    bench_posture_step,
    bench_gate_step,
    bench_run_15_steps,
    bench_run_200_steps,
    bench_run_1000_step_quadrature,
);
criterion_main!(benches);
