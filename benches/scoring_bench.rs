//! Benchmarks for snapshot scoring and source counting

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use debtpilot::config::{FactorConfig, ScoringWeights};
use debtpilot::core::{FileCounts, MetricSnapshot};
use debtpilot::metrics::count_source;
use debtpilot::scoring::QualityScorer;
use std::hint::black_box;
use std::path::PathBuf;

fn snapshot_with_files(files: usize) -> MetricSnapshot {
    let mut builder = MetricSnapshot::builder();
    for i in 0..files {
        builder.push_file(FileCounts {
            path: PathBuf::from(format!("src/file_{i}.rs")),
            functions: (i % 40) as u64,
            classes: (i % 5) as u64,
            lines: (i % 900) as u64,
        });
    }
    builder.add_documented_functions(files as u64 * 3);
    builder.add_test_functions(files as u64);
    builder.add_security_hits(files as u64 / 10);
    builder.build()
}

fn bench_score_snapshot(c: &mut Criterion) {
    let scorer = QualityScorer::new(ScoringWeights::default(), FactorConfig::default()).unwrap();
    let mut group = c.benchmark_group("score_snapshot");

    for files in [10usize, 1_000, 50_000] {
        let snapshot = snapshot_with_files(files);
        group.bench_with_input(BenchmarkId::from_parameter(files), &snapshot, |b, snapshot| {
            b.iter(|| scorer.score(black_box(snapshot)))
        });
    }
    group.finish();
}

fn bench_count_source(c: &mut Criterion) {
    let unit = "/// Loads the user\npub async fn load(id: u64) -> User {\n    let url = \"http://example.com\";\n    cache.get(id).await\n}\n\n";
    let source = unit.repeat(500);

    c.bench_function("count_source_3000_lines", |b| {
        b.iter(|| count_source(black_box(&source)))
    });
}

criterion_group!(benches, bench_score_snapshot, bench_count_source);
criterion_main!(benches);
