use knotty::{NoOpStepObserver, RopeConfig, RopeWorld, Vec3};

/// Three ropes fanned through one point, warm-started, then dragged around.
fn run_level() -> Vec<Vec<Vec3<f32>>> {
    let mut world = RopeWorld::new();
    let config = RopeConfig::new().with_segments(16).with_collision_radius(0.08);
    let mut handles = Vec::new();
    let mut ends = Vec::new();
    for i in 0..3 {
        let angle = i as f32 * core::f32::consts::PI / 3.0;
        let (s, c) = angle.sin_cos();
        let a = world.add_anchor(Vec3::new(-c, 0.02 * i as f32, -s));
        let b = world.add_anchor(Vec3::new(c, 0.02 * i as f32, s));
        handles.push(world.create_simulation(a, b, config).unwrap());
        ends.push(b);
    }

    world.warm_start(100, 0.02, &mut NoOpStepObserver);
    for t in 0..60 {
        let x = 1.0 + t as f32 * 0.01;
        world.move_anchor(ends[0], Vec3::new(x, 0.5, 0.0)).unwrap();
        world.step(1.0 / 60.0, &mut NoOpStepObserver);
    }

    handles.iter().map(|&h| world.positions(h).unwrap()).collect()
}

#[test]
fn world_deterministic() {
    let results: Vec<_> = (0..5).map(|_| run_level()).collect();

    for r in &results[1..] {
        for (rope_a, rope_b) in results[0].iter().zip(r.iter()) {
            for (a, b) in rope_a.iter().zip(rope_b.iter()) {
                assert_eq!(a.x, b.x);
                assert_eq!(a.y, b.y);
                assert_eq!(a.z, b.z);
            }
        }
    }
}

#[test]
fn any_collisions_is_stable_across_queries() {
    let mut world = RopeWorld::<f64>::new();
    let a0 = world.add_anchor(Vec3::new(-1.0, 0.0, 0.0));
    let a1 = world.add_anchor(Vec3::new(1.0, 0.0, 0.0));
    let b0 = world.add_anchor(Vec3::new(0.0, 0.05, -1.0));
    let b1 = world.add_anchor(Vec3::new(0.0, 0.05, 1.0));
    let config = RopeConfig::new().with_segments(10);
    world.create_simulation(a0, a1, config).unwrap();
    world.create_simulation(b0, b1, config).unwrap();

    let first = world.any_collisions();
    for _ in 0..10 {
        assert_eq!(world.any_collisions(), first);
    }
}
