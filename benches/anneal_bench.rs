//! Criterion benchmarks for the annealing driver.
//!
//! Uses synthetic problems (sphere function, permutation sort) to measure
//! pure driver overhead independent of any domain.

use anneal::{AnnealParams, Annealer, Problem};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

// ===========================================================================
// Sphere function: minimize sum(x_i^2)
// ===========================================================================

struct Sphere;

impl Problem for Sphere {
    type State = Vec<f64>;

    fn energy(&mut self, x: &Vec<f64>) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn make_move<R: Rng>(&mut self, x: &mut Vec<f64>, rng: &mut R) -> Option<f64> {
        let i = rng.random_range(0..x.len());
        let nudge = rng.random_range(-0.5..0.5);
        let before = x[i] * x[i];
        x[i] += nudge;
        Some(x[i] * x[i] - before)
    }
}

// ===========================================================================
// Permutation sort: minimize misplaced elements
// ===========================================================================

struct PermSort;

impl Problem for PermSort {
    type State = Vec<usize>;

    fn energy(&mut self, perm: &Vec<usize>) -> f64 {
        perm.iter().enumerate().filter(|&(i, &v)| i != v).count() as f64
    }

    fn make_move<R: Rng>(&mut self, perm: &mut Vec<usize>, rng: &mut R) -> Option<f64> {
        let i = rng.random_range(0..perm.len());
        let j = rng.random_range(0..perm.len());
        perm.swap(i, j);
        None
    }
}

fn bench_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal_sphere");
    for dim in [10usize, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            let params = AnnealParams::default()
                .with_steps(10_000)
                .with_tmax(10.0)
                .with_tmin(0.01)
                .with_updates(0);
            b.iter(|| {
                let mut annealer = Annealer::new(Sphere, vec![3.0; dim]).with_seed(42);
                black_box(annealer.anneal(&params).unwrap())
            });
        });
    }
    group.finish();
}

fn bench_perm_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal_perm_sort");
    for n in [20usize, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let params = AnnealParams::default()
                .with_steps(5_000)
                .with_tmax(5.0)
                .with_tmin(0.01)
                .with_updates(0);
            b.iter(|| {
                let state: Vec<usize> = (0..n).rev().collect();
                let mut annealer = Annealer::new(PermSort, state).with_seed(42);
                black_box(annealer.anneal(&params).unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sphere, bench_perm_sort);
criterion_main!(benches);
