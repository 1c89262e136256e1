// Criterion benchmarks for the SWOT engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swot_engine::core::{normalize, score, synthesize, ForestParams, SwotEngine, TrainingParams};
use swot_engine::models::StartupInput;

fn fintech() -> StartupInput {
    StartupInput::new("FinTech", "US", "SMB", "B2B payments")
}

fn bench_synthesize(c: &mut Criterion) {
    let input = fintech();
    c.bench_function("synthesize_metrics", |b| {
        b.iter(|| synthesize(black_box(&input)));
    });
}

fn bench_normalize_and_score(c: &mut Criterion) {
    let raw = synthesize(&fintech());
    c.bench_function("normalize_and_score", |b| {
        b.iter(|| score(&normalize(black_box(&raw))));
    });
}

fn bench_analyze(c: &mut Criterion) {
    let engine = SwotEngine::with_default_params().expect("engine should train");
    let input = fintech();
    c.bench_function("analyze_full_pipeline", |b| {
        b.iter(|| engine.analyze(black_box(&input)));
    });
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("train_predictor");
    group.sample_size(10);

    for n_trees in [10, 50, 100].iter() {
        let params = TrainingParams {
            forest: ForestParams {
                n_trees: *n_trees,
                ..ForestParams::default()
            },
            ..TrainingParams::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(n_trees), &params, |b, params| {
            b.iter(|| SwotEngine::new(black_box(params)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_synthesize,
    bench_normalize_and_score,
    bench_analyze,
    bench_training
);
criterion_main!(benches);
