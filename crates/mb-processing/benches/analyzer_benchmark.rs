//! Analyzer throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mb_processing::{top_three_average, ImbalanceAnalyzer};

fn window(size: usize, scale: f64) -> Vec<f64> {
    (0..size).map(|i| ((i * 7919) % 1024) as f64 * scale).collect()
}

/// Benchmark peak averaging over typical recording window sizes
fn bench_top_three_average(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_three_average");

    for &size in &[64, 512, 4096, 32768] {
        let data = window(size, 1.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| top_three_average(black_box(data)))
        });
    }

    group.finish();
}

/// Benchmark a full bilateral analysis including grading
fn bench_process_and_grade(c: &mut Criterion) {
    let left = window(4096, 1.0);
    let right = window(4096, 0.88);

    c.bench_function("process_and_grade_4096", |b| {
        let mut analyzer = ImbalanceAnalyzer::new();
        b.iter(|| {
            analyzer.process_readings(black_box(&left), black_box(&right));
            black_box(analyzer.severity_grade())
        })
    });
}

criterion_group!(benches, bench_top_three_average, bench_process_and_grade);
criterion_main!(benches);
