//! Performance benchmarks for proxq
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use proxq::analysis::StandardAnalyzer;
use proxq::query::{CompileMode, compile_capitalization, compile_proximity};

const PROXIMITY_EXPRESSIONS: &[&str] = &[
    "fox w4 dog",
    "quick brown fox w4 lazy dog",
    "\"lazy dog\" n3 cat",
    "red green blue yellow n8 cyan magenta black white",
    "w3 report w5 topic",
];

fn bench_loose_terms(c: &mut Criterion) {
    let mut group = c.benchmark_group("loose_terms");
    for expr in PROXIMITY_EXPRESSIONS {
        group.bench_with_input(BenchmarkId::from_parameter(expr), expr, |b, &q| {
            b.iter(|| {
                compile_proximity(
                    "title",
                    black_box(q),
                    &StandardAnalyzer,
                    CompileMode::LooseTerms,
                    75,
                )
            })
        });
    }
    group.finish();
}

fn bench_phrase_aware(c: &mut Criterion) {
    let mut group = c.benchmark_group("phrase_aware");
    for expr in PROXIMITY_EXPRESSIONS {
        group.bench_with_input(BenchmarkId::from_parameter(expr), expr, |b, &q| {
            b.iter(|| {
                compile_proximity(
                    "title",
                    black_box(q),
                    &StandardAnalyzer,
                    CompileMode::PhraseAware,
                    100,
                )
            })
        });
    }
    group.finish();
}

fn bench_capitalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("capitalization");
    for expr in ["firstcap(Trump)", "allcap( NASA )", "cap(iPhone)"] {
        group.bench_with_input(BenchmarkId::from_parameter(expr), &expr, |b, &q| {
            b.iter(|| compile_capitalization("title", black_box(q), &StandardAnalyzer))
        });
    }
    group.finish();
}

fn bench_wide_cross_product(c: &mut Criterion) {
    let left: Vec<String> = (0..16).map(|i| format!("left{}", i)).collect();
    let right: Vec<String> = (0..16).map(|i| format!("right{}", i)).collect();
    let expr = format!("{} n5 {}", left.join(" "), right.join(" "));

    c.bench_function("cross_product_16x16", |b| {
        b.iter(|| {
            compile_proximity(
                "body",
                black_box(&expr),
                &StandardAnalyzer,
                CompileMode::PhraseAware,
                100,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_loose_terms,
    bench_phrase_aware,
    bench_capitalization,
    bench_wide_cross_product,
);

criterion_main!(benches);
