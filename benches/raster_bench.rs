// Raster Benchmarks
// Performance benchmarks for point plotting, line drawing and frame composition

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use vecx_rs::display::{pack_color, PixelBuffer};
use vecx_rs::vector::{BeamGeometry, DrawCommand, FrameCompositor, Rasterizer, ALG_MAX_X, ALG_MAX_Y};

/// A dense starburst of lines through the center plus a grid of dots
fn starburst(lines: u32) -> Vec<DrawCommand> {
    let (cx, cy) = (ALG_MAX_X / 2, ALG_MAX_Y / 2);
    let mut commands = Vec::new();

    for i in 0..lines {
        let angle = i as f32 / lines as f32 * std::f32::consts::TAU;
        let x = cx as f32 + 15_000.0 * angle.cos();
        let y = cy as f32 + 19_000.0 * angle.sin();
        commands.push(DrawCommand::line(cx, cy, x as u32, y as u32, 100));
    }
    for gx in 0..20 {
        for gy in 0..20 {
            commands.push(DrawCommand::dot(gx * 1600 + 500, gy * 2000 + 500, 127));
        }
    }

    commands
}

fn bench_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("line");

    for radius in [1u32, 2, 4] {
        group.bench_with_input(BenchmarkId::new("diagonal", radius), &radius, |b, &radius| {
            let rasterizer = Rasterizer::new(BeamGeometry::new(radius, radius));
            let mut buffer = PixelBuffer::new();
            b.iter(|| {
                rasterizer.line(&mut buffer, 0, 0, 329, 409, pack_color(31));
                black_box(&buffer);
            });
        });
    }

    group.finish();
}

fn bench_dot(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot");

    for radius in [1u32, 3, 8] {
        group.bench_with_input(BenchmarkId::new("radius", radius), &radius, |b, &radius| {
            let rasterizer = Rasterizer::new(BeamGeometry::new(radius, 1));
            let mut buffer = PixelBuffer::new();
            b.iter(|| {
                rasterizer.dot(&mut buffer, black_box(165), black_box(205), pack_color(31));
            });
        });
    }

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    group.sample_size(50);

    let commands = starburst(500);
    for radius in [1u32, 2] {
        group.bench_with_input(
            BenchmarkId::new("starburst_500", radius),
            &radius,
            |b, &radius| {
                let compositor = FrameCompositor::new(BeamGeometry::new(radius, radius));
                let mut buffer = PixelBuffer::new();
                b.iter(|| black_box(compositor.compose(&commands, &mut buffer)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_line, bench_dot, bench_compose);
criterion_main!(benches);
