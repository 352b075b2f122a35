use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use anms_harris::{
    AnmsConfig, AnmsSelector, BoundaryMode, Convolution, CornerDetector, HarrisResponse, Image,
    KernelBuilder, RankingStrategy,
};

/// Gradient background with a grid of bright squares of varying intensity
fn create_benchmark_image(size: usize) -> Image {
    let mut img = Image::from_fn(size, size, |r, c| {
        ((r + c) as f64 / (2 * size) as f64) * 40.0 + ((r * 3 + c) % 7) as f64
    });
    let step = 24;
    for (i, cv) in (step..size.saturating_sub(step)).step_by(step).enumerate() {
        for (j, cu) in (step..size.saturating_sub(step)).step_by(step).enumerate() {
            let value = 120.0 + ((i * 5 + j * 3) % 11) as f64 * 12.0;
            for v in cv - 3..=cv + 3 {
                for u in cu - 3..=cu + 3 {
                    img.set(v, u, value);
                }
            }
        }
    }
    img
}

/// Benchmark convolution across boundary modes
fn bench_convolution(c: &mut Criterion) {
    let img = create_benchmark_image(256);
    let kernel = KernelBuilder::gaussian(2.0).unwrap();
    let mut group = c.benchmark_group("convolution");

    for mode in [
        BoundaryMode::Valid,
        BoundaryMode::Fill(0.0),
        BoundaryMode::Extend,
        BoundaryMode::Mirror,
        BoundaryMode::Wrap,
    ] {
        group.bench_with_input(BenchmarkId::new("gaussian_11", mode.name()), &mode, |b, &mode| {
            b.iter(|| black_box(Convolution::convolve2d(black_box(&img), &kernel, mode)))
        });
    }

    group.finish();
}

/// Benchmark the Harris response at several image sizes
fn bench_harris_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("harris_response");

    for size in [64, 128, 256, 512] {
        let img = create_benchmark_image(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &img, |b, img| {
            b.iter(|| black_box(HarrisResponse::compute(black_box(img), BoundaryMode::Valid).unwrap()))
        });
    }

    group.finish();
}

/// Brute force against spatial index on the same response maps
fn bench_anms(c: &mut Criterion) {
    let mut group = c.benchmark_group("anms");

    for size in [128, 256, 512] {
        let img = create_benchmark_image(size);
        let response = HarrisResponse::compute(&img, BoundaryMode::Valid).unwrap();

        group.bench_with_input(BenchmarkId::new("brute_force", size), &response, |b, map| {
            b.iter(|| black_box(AnmsSelector::brute_force(black_box(map), 100, 0.9, false).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("spatial_index", size), &response, |b, map| {
            b.iter(|| black_box(AnmsSelector::indexed(black_box(map), 100, 0.9, 10, false).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark full detection pipeline
fn bench_full_detection(c: &mut Criterion) {
    let size = 256;
    let img = create_benchmark_image(size);
    let mut group = c.benchmark_group("full_detection");

    for strategy in [RankingStrategy::BruteForce, RankingStrategy::SpatialIndex] {
        let cfg = AnmsConfig {
            strategy,
            ..AnmsConfig::default()
        };
        let detector = CornerDetector::new(cfg, BoundaryMode::Valid, size, size).unwrap();
        group.bench_with_input(
            BenchmarkId::new(format!("{}x{}", size, size), strategy),
            &detector,
            |b, detector| b.iter(|| black_box(detector.detect(black_box(&img)).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_convolution,
    bench_harris_response,
    bench_anms,
    bench_full_detection
);
criterion_main!(benches);
