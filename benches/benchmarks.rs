//! Benchmarks for rollstats accumulators
//!
//! Run with: cargo bench --features full

// Require all features for benchmarks
#[cfg(not(all(feature = "windows", feature = "quantiles")))]
compile_error!("Benchmarks require all features. Run: cargo bench --features full");

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rollstats::histogram::{DensityEstimator, PSquareCumulative};
use rollstats::quantiles::{PSquareQuantile, Quartile, QuartileAccumulator, QuartileMethod};
use rollstats::traits::Accumulator;
use rollstats::window::{RollingMax, SortedRollingWindow, Strategy};

/// Deterministic pseudo-random samples in [0, 1)
fn samples(n: usize) -> Vec<f64> {
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1u64 << 53) as f64
        })
        .collect()
}

// ============================================================================
// Sorted Rolling Window Benchmarks
// ============================================================================

fn bench_sorted_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_window");
    group.throughput(Throughput::Elements(1));
    let data = samples(4_096);

    for window_size in [16, 256, 4_096] {
        group.bench_function(format!("insert_n{}", window_size), |b| {
            let mut window = SortedRollingWindow::new(window_size).unwrap();
            let mut i = 0usize;
            b.iter(|| {
                window.insert(data[i % data.len()]);
                i = i.wrapping_add(1);
            });
        });
    }

    group.bench_function("snapshot_last", |b| {
        let mut window = SortedRollingWindow::new(256).unwrap();
        for &x in &data {
            window.insert(x);
        }
        b.iter(|| black_box(window.snapshot().last()));
    });

    group.finish();
}

// ============================================================================
// Rolling Max Benchmarks
// ============================================================================

fn bench_rolling_max(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_max");
    group.throughput(Throughput::Elements(1));
    let data = samples(4_096);

    for strategy in [Strategy::Lazy, Strategy::Immediate] {
        for window_size in [16, 1_024] {
            let id = BenchmarkId::new(format!("{:?}", strategy), window_size);
            group.bench_with_input(id, &window_size, |b, &n| {
                let mut max = RollingMax::new(n, strategy).unwrap();
                let mut i = 0usize;
                b.iter(|| {
                    max.observe(data[i % data.len()]);
                    i = i.wrapping_add(1);
                    black_box(max.value())
                });
            });
        }
    }

    group.finish();
}

// ============================================================================
// Histogram Benchmarks
// ============================================================================

fn bench_histograms(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");
    group.throughput(Throughput::Elements(1));
    let data = samples(4_096);

    group.bench_function("density_add", |b| {
        let mut density = DensityEstimator::new(100, 20).unwrap();
        let mut i = 0usize;
        b.iter(|| {
            density.add(data[i % data.len()]);
            i = i.wrapping_add(1);
        });
    });

    for num_cells in [10, 100] {
        group.bench_function(format!("psquare_cumulative_add_b{}", num_cells), |b| {
            let mut cdf = PSquareCumulative::new(num_cells).unwrap();
            let mut i = 0usize;
            b.iter(|| {
                cdf.add(data[i % data.len()]);
                i = i.wrapping_add(1);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Quartile Benchmarks
// ============================================================================

fn bench_quartiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("quartile");
    let data = samples(10_000);

    group.bench_function("psquare_add", |b| {
        let mut q1 = PSquareQuantile::new(0.25).unwrap();
        let mut i = 0usize;
        b.iter(|| {
            q1.add(data[i % data.len()]);
            i = i.wrapping_add(1);
        });
    });

    let methods = [
        ("psquare", QuartileMethod::PSquare),
        (
            "density",
            QuartileMethod::Density {
                cache_size: 100,
                num_bins: 20,
            },
        ),
        (
            "cumulative",
            QuartileMethod::CumulativeDistribution { num_cells: 20 },
        ),
    ];

    for (name, method) in methods {
        group.bench_function(format!("observe_then_value_{}", name), |b| {
            let mut q = QuartileAccumulator::new(Quartile::First, method).unwrap();
            for &x in &data {
                q.observe(x);
            }
            let mut i = 0usize;
            b.iter(|| {
                q.observe(data[i % data.len()]);
                i = i.wrapping_add(1);
                black_box(q.value().unwrap())
            });
        });

        group.bench_function(format!("cached_value_{}", name), |b| {
            let mut q = QuartileAccumulator::new(Quartile::First, method).unwrap();
            for &x in &data {
                q.observe(x);
            }
            b.iter(|| black_box(q.value().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sorted_window,
    bench_rolling_max,
    bench_histograms,
    bench_quartiles,
);

criterion_main!(benches);
