use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use magiceye::math::Vec3;
use magiceye::{BiView, StereoBlank};

const EYE_BACK: f64 = 14.0;
const EYE_SEP: f64 = 2.5;

fn scene(width: u32, height: u32) -> BiView {
    let mut views = BiView::new(width, height, EYE_BACK, EYE_SEP);
    views.flatten(8.0);
    views.draw_triangle(
        Vec3::new(-1.5, -1.0, 6.0),
        Vec3::new(1.5, -1.0, 6.0),
        Vec3::new(0.0, 1.2, 4.0),
    );
    views
}

fn benchmark_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");

    for (name, width, height) in [("320x240", 320, 240), ("640x480", 640, 480)] {
        group.bench_with_input(
            BenchmarkId::new("biview", name),
            &(width, height),
            |b, &(w, h)| {
                let mut views = BiView::new(w, h, EYE_BACK, EYE_SEP);
                b.iter(|| views.flatten(black_box(8.0)));
            },
        );
    }

    group.finish();
}

fn benchmark_draw_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_triangle");

    for (name, scale) in [("small", 0.3), ("medium", 1.0), ("large", 2.0)] {
        let tri = [
            Vec3::new(-scale, -scale, 6.0),
            Vec3::new(scale, -scale, 6.0),
            Vec3::new(0.0, scale, 4.0),
        ];
        group.bench_with_input(BenchmarkId::new("filled", name), &tri, |b, tri| {
            let mut views = BiView::new(640, 480, EYE_BACK, EYE_SEP);
            views.flatten(8.0);
            b.iter(|| {
                views.draw_triangle(black_box(tri[0]), black_box(tri[1]), black_box(tri[2]));
            });
        });
    }

    group.finish();
}

fn benchmark_correspondence(c: &mut Criterion) {
    let mut group = c.benchmark_group("correspondence");

    let views = scene(320, 240);
    group.bench_function("pair_maps_320x240", |b| {
        b.iter(|| StereoBlank::from_biview(black_box(&views)));
    });

    let blank = StereoBlank::from_biview(&views);
    group.bench_function("isometric_grid", |b| {
        b.iter(|| black_box(&blank).isometric_grid(black_box(1)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_flatten,
    benchmark_draw_triangle,
    benchmark_correspondence
);
criterion_main!(benches);
