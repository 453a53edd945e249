//! Benchmarks for the CPU ray tracer and the camera update path.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shaderlab::camera::{FlyCamera, Movement};
use shaderlab::frame::FrameParams;
use shaderlab::options::DisplayOptions;
use shaderlab::renderer::raytrace::{self, RayCamera, TraceScene};

fn params() -> FrameParams {
    let mut camera = FlyCamera::new(800.0 / 600.0);
    camera.set_position(0.0, 1.0, 6.0);
    FrameParams::capture(&camera, 0.0, 0.0, 0, None, DisplayOptions::default())
}

fn shade_benchmark(c: &mut Criterion) {
    let scene = TraceScene::default();
    let camera = RayCamera::from_params(&params());
    let dir = camera.primary_ray(400, 300, 800, 600);

    c.bench_function("shade_single_ray", |b| {
        b.iter(|| {
            black_box(raytrace::shade(
                &scene,
                DisplayOptions::default(),
                black_box(camera.origin),
                black_box(dir),
            ))
        })
    });
}

fn trace_image_benchmark(c: &mut Criterion) {
    let scene = TraceScene::default();
    let camera = RayCamera::from_params(&params());
    let mut group = c.benchmark_group("trace_image");

    for (width, height) in [(160, 120), (320, 240), (800, 600)] {
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        group.bench_function(format!("{width}x{height}"), |b| {
            b.iter(|| {
                raytrace::trace_image(
                    &camera,
                    &scene,
                    DisplayOptions::default(),
                    width,
                    height,
                    &mut pixels,
                );
                black_box(&pixels);
            })
        });
    }
    group.finish();
}

fn camera_update_benchmark(c: &mut Criterion) {
    c.bench_function("camera_frame_update", |b| {
        let mut camera = FlyCamera::default();
        let mut x = 0.0f32;
        b.iter(|| {
            x += 1.0;
            camera.on_pointer_move(black_box(x), black_box(300.0));
            camera.on_keyboard(Movement::Forward, black_box(1.0 / 60.0));
            camera.on_render(1.0 / 60.0);
            if camera.position().length() > 1000.0 {
                camera.set_position(0.0, 0.0, 0.0);
            }
            black_box(camera.view())
        })
    });
}

criterion_group!(
    benches,
    shade_benchmark,
    trace_image_benchmark,
    camera_update_benchmark
);
criterion_main!(benches);
