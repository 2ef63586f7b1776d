use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba};

use snap_filters::{
    filters::{default_filters, FilterDefinition, SepiaToneParams},
    imaging::{ProcessingContext, SourceImage},
    render::Renderer,
};

fn photo(width: u32, height: u32) -> SourceImage {
    let buffer = ImageBuffer::from_fn(width, height, |x, y| {
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            ((x + y) % 256) as u8,
            255,
        ])
    });
    SourceImage::from_rgba8(buffer)
}

fn bench_single(c: &mut Criterion) {
    let source = photo(640, 480);
    let renderer = Renderer::new(ProcessingContext::new());
    let sepia = FilterDefinition::SepiaTone(SepiaToneParams::new(0.7));

    c.bench_function("render sepia 640x480", |b| {
        b.iter(|| renderer.render(black_box(&source), black_box(&sepia)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let source = photo(640, 480);
    let parallel = Renderer::new(ProcessingContext::new());
    let sequential = parallel.clone().sequential();

    let mut group = c.benchmark_group("default catalog 640x480");
    group.bench_function("parallel", |b| {
        b.iter(|| parallel.render_all(black_box(&source), default_filters()))
    });
    group.bench_function("sequential", |b| {
        b.iter(|| sequential.render_all(black_box(&source), default_filters()))
    });
    group.finish();
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
