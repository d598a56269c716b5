//! Visibility check benchmarks.
//!
//! Measures the pure evaluation path per dimension, a full check against a
//! decoded scene, and a long scroll sweep.
//!
//! Run with: cargo bench --bench check_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use inviewport::model::{Measurements, Rect};
use inviewport::source::Scene;
use inviewport::visibility::{Dimension, ScrollSweep, ZeroExtentPolicy};

const DEMO_SCENE: &str = include_str!("../demos/scene.json");

fn sample() -> Measurements {
    Measurements::new(
        Rect::new(100.0, 100.0, 50.0, 50.0),
        Rect::new(120.0, 125.0, 200.0, 250.0),
    )
}

fn benchmark_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let measurements = sample();

    for dimension in [Dimension::Vertical, Dimension::Horizontal, Dimension::Both] {
        group.bench_with_input(
            BenchmarkId::from_parameter(dimension.as_str()),
            &dimension,
            |b, dimension| {
                b.iter(|| {
                    dimension.evaluate(black_box(&measurements), ZeroExtentPolicy::Propagate)
                })
            },
        );
    }

    group.finish();
}

fn benchmark_scene_check(c: &mut Criterion) {
    let scene = match Scene::from_json(DEMO_SCENE) {
        Ok(scene) => scene,
        Err(e) => panic!("demo scene must decode: {e}"),
    };

    c.bench_function("scene_check", |b| {
        b.iter(|| black_box(&scene).check().run(&scene))
    });
}

fn benchmark_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    let measurements = sample();

    for steps in [10u32, 100, 1000] {
        let sweep = match ScrollSweep::new(0.0, 1000.0, 1000.0 / f64::from(steps)) {
            Ok(sweep) => sweep,
            Err(e) => panic!("sweep must be valid: {e}"),
        };
        group.bench_with_input(BenchmarkId::from_parameter(steps), &sweep, |b, sweep| {
            b.iter(|| {
                sweep.run(
                    black_box(&measurements),
                    Dimension::Both,
                    ZeroExtentPolicy::Propagate,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_evaluate,
    benchmark_scene_check,
    benchmark_sweep
);
criterion_main!(benches);
