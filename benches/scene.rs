use criterion::{criterion_group, Criterion};

use spheretrace::*;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("scene/10x10x4", |b| {
        let mut file = demo_scene().unwrap();
        file.render.width = 10;
        file.render.height = 10;
        file.render.samples = 4;
        let Setup {
            scene,
            camera,
            settings,
        } = file.build().unwrap();

        b.iter(|| render_serial(&scene, &camera, &settings));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion::criterion_main!(benches);
