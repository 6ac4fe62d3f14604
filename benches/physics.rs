//! Benchmarks for knotty rope simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use knotty::*;

fn fan_level(ropes: usize, segments: usize) -> RopeWorld<f32> {
    let mut world = RopeWorld::new();
    let config = RopeConfig::new().with_segments(segments);
    for i in 0..ropes {
        let angle = i as f32 * core::f32::consts::PI / ropes as f32;
        let (s, c) = angle.sin_cos();
        let a = world.add_anchor(Vec3::new(-c, 0.01 * i as f32, -s));
        let b = world.add_anchor(Vec3::new(c, 0.01 * i as f32, s));
        let _ = world.create_simulation(a, b, config);
    }
    world
}

fn bench_rope_step(c: &mut Criterion) {
    c.bench_function("rope_50_segments_60_steps", |b| {
        b.iter(|| {
            let mut anchors = AnchorSet::new();
            let start = anchors.insert(Vec3::new(0.0f32, 0.0, 0.0));
            let end = anchors.insert(Vec3::new(2.0, 0.0, 0.0));
            let mut rope =
                RopeSimulation::new(start, end, &anchors, RopeConfig::new().with_segments(50))
                    .unwrap();
            for _ in 0..60 {
                rope.step(1.0 / 60.0, &anchors, &mut NoOpStepObserver);
            }
            rope.positions()
        });
    });
}

fn bench_collision_pass(c: &mut Criterion) {
    let world = fan_level(6, 50);
    c.bench_function("collision_6_ropes_resolve_all", |b| {
        b.iter_batched(
            || world.clone(),
            |mut w| w.resolve_all_collisions(&mut NoOpStepObserver),
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_warm_start(c: &mut Criterion) {
    c.bench_function("warm_start_6_ropes_150_steps", |b| {
        b.iter(|| {
            let mut world = fan_level(6, 30);
            world.warm_start(150, 0.02, &mut NoOpStepObserver)
        });
    });
}

criterion_group!(benches, bench_rope_step, bench_collision_pass, bench_warm_start);
criterion_main!(benches);
