//! Benchmarks for the Smith-Wilson kernel.
//!
//! Run with: cargo bench -p curvebox-math

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use curvebox_math::extrapolation::SmithWilsonCurveFunction;

const ALPHA: f64 = 0.1;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_nodes(n: usize) -> (Vec<f64>, Vec<f64>) {
    let nodes: Vec<f64> = (1..=n).map(|i| i as f64).collect();
    let weights: Vec<f64> = (0..n)
        .map(|i| {
            let scale = if i % 2 == 0 { 0.5 } else { -0.25 };
            scale / (i as f64 + 1.0)
        })
        .collect();
    (nodes, weights)
}

// =============================================================================
// KERNEL BENCHMARKS
// =============================================================================

fn bench_discount_factor(c: &mut Criterion) {
    let sw = SmithWilsonCurveFunction::default();
    let mut group = c.benchmark_group("discount_factor");

    for n in [5, 20, 50] {
        let (nodes, weights) = create_nodes(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| sw.discount_factor(black_box(7.5), ALPHA, &nodes, &weights))
        });
    }

    group.finish();
}

fn bench_weight_sensitivity(c: &mut Criterion) {
    let sw = SmithWilsonCurveFunction::default();
    let mut group = c.benchmark_group("weight_sensitivity");

    for n in [5, 20, 50] {
        let (nodes, weights) = create_nodes(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                sw.discount_factor_weight_sensitivity(black_box(7.5), ALPHA, &nodes, &weights)
            })
        });
    }

    group.finish();
}

fn bench_curve_grid(c: &mut Criterion) {
    let sw = SmithWilsonCurveFunction::default();
    let (nodes, weights) = create_nodes(20);
    let grid: Vec<f64> = (0..=480).map(|m| f64::from(m) / 4.0).collect();

    c.bench_function("discount_factor_grid_120y_quarterly", |b| {
        b.iter(|| {
            grid.iter()
                .map(|&t| sw.discount_factor(t, ALPHA, &nodes, &weights).unwrap_or(f64::NAN))
                .sum::<f64>()
        })
    });
}

// =============================================================================
// CRITERION GROUPS
// =============================================================================

criterion_group!(kernel, bench_discount_factor, bench_weight_sensitivity);

criterion_group!(curve, bench_curve_grid);

criterion_main!(kernel, curve);
