//! Benchmarks for the single-file analysis pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use modlens_rs::core::config::ModlensConfig;
use modlens_rs::core::pipeline::AnalysisPipeline;
use modlens_rs::detectors::clone_detection::{similarity_ratio, MatchGranularity};

/// Generate a Python module with `count` similar functions
fn generate_module(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                r#"
def function_{i}(param1, param2, param3):
    if param1 > 10:
        for j in range(param2):
            if j % 2 == 0:
                result = param3 * j
            else:
                result = param3 + j
    else:
        result = param1 + param2 + param3
    return helper_{next}(result)

"#,
                next = (i + 1) % count.max(1)
            )
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = AnalysisPipeline::new(ModlensConfig::default());

    for count in [10usize, 50, 150] {
        let source = generate_module(count);
        group.bench_with_input(BenchmarkId::new("run", count), &source, |b, source| {
            b.iter(|| pipeline.run("bench.py", black_box(source)))
        });
    }
    group.finish();
}

fn bench_parallel_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");
    let source = generate_module(150);

    for parallel in [false, true] {
        let mut config = ModlensConfig::default();
        config.similarity.parallel = parallel;
        let pipeline = AnalysisPipeline::new(config);
        group.bench_function(BenchmarkId::new("parallel", parallel), |b| {
            b.iter(|| pipeline.run("bench.py", black_box(&source)))
        });
    }

    let a = generate_module(1);
    let b = a.replace("param3 * j", "param3 - j");
    for granularity in [MatchGranularity::Lines, MatchGranularity::Characters] {
        group.bench_function(BenchmarkId::new("ratio", format!("{granularity:?}")), |bench| {
            bench.iter(|| similarity_ratio(black_box(&a), black_box(&b), granularity))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_parallel_similarity);
criterion_main!(benches);
