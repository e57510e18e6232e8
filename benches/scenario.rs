//! Pipeline and scenario benchmarks.
//!
//! Measures the one-time engine build (normalize + aggregate + estimate) and
//! the per-request scenario evaluation that runs on every input change.
//!
//! Run with: `cargo bench --bench scenario`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polars::prelude::*;

use water_savings_rust::{EstimatorConfig, PrimaryType, Scenario, WaterSavingsEngine};

const TAGS: &[&str] = &[
    "Ornamental Grass",
    "California Native, Shrub",
    "California Native, Tree",
    "California Native, Ground Cover",
    "California Native, Succulent",
    "Arboretum All-Star, California Native, Perennial",
];

const BUCKETS: &[&str] = &["< 0.10", "0.10-0.30", "0.40-0.60", "0.70-0.90"];

/// Build synthetic plant and ET tables with `plant_rows` plants and a year
/// of daily readings.
fn synthetic_frames(plant_rows: usize) -> (DataFrame, DataFrame) {
    let types: Vec<&str> = (0..plant_rows).map(|i| TAGS[i % TAGS.len()]).collect();
    let factors: Vec<&str> = (0..plant_rows).map(|i| BUCKETS[(i / 3) % BUCKETS.len()]).collect();
    let names: Vec<String> = (0..plant_rows).map(|i| format!("Species {}", i)).collect();
    let readings: Vec<String> = (0..365)
        .map(|day| format!("{:.3}", 0.05 + (day as f64 / 365.0) * 0.15))
        .collect();

    let plants = df![
        "Type(s)" => types,
        "Plant_Factor" => factors,
        "Botanical Name" => names,
    ]
    .expect("synthetic plant frame");
    let et = df![
        "Avg ETo (in)" => readings,
    ]
    .expect("synthetic ET frame");

    (plants, et)
}

fn bench_engine_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_build");
    let config = EstimatorConfig::default();

    for &rows in &[1_000usize, 10_000, 50_000] {
        let (plants, et) = synthetic_frames(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| {
                WaterSavingsEngine::from_frames(plants.clone(), et.clone(), &config)
                    .expect("engine build")
            })
        });
    }

    group.finish();
}

fn bench_scenario(c: &mut Criterion) {
    let (plants, et) = synthetic_frames(10_000);
    let engine = WaterSavingsEngine::from_frames(plants, et, &EstimatorConfig::default())
        .expect("engine build");
    let scenario = Scenario::lawn_conversion(1_000.0, PrimaryType::Shrub).expect("scenario");

    c.bench_function("compare_lawn_to_shrub", |b| {
        b.iter(|| engine.compare(black_box(&scenario)).expect("compare"))
    });

    c.bench_function("evaluate_form_input", |b| {
        b.iter(|| {
            engine
                .evaluate(black_box("1000"), black_box("Succulent"))
                .expect("evaluate")
        })
    });
}

criterion_group!(benches, bench_engine_build, bench_scenario);
criterion_main!(benches);
