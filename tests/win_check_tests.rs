use std::cell::Cell;

use knotty::{NoOpStepObserver, RopeConfig, RopeLength, RopeWorld, Vec3, WinCheck, WinCheckConfig, WinStatus};

// Quarter-second ticks keep the timers exact in f32.
const DT: f32 = 0.25;

#[test]
fn nothing_is_polled_while_settling() {
    let mut check = WinCheck::<f32>::default();
    let calls = Cell::new(0);
    for _ in 0..3 {
        let status = check.poll(DT, || {
            calls.set(calls.get() + 1);
            true
        });
        assert_eq!(status, WinStatus::Pending);
    }
    assert_eq!(calls.get(), 0);

    check.poll(DT, || {
        calls.set(calls.get() + 1);
        true
    });
    assert_eq!(calls.get(), 1);
}

#[test]
fn clear_result_must_hold_through_the_window() {
    let mut check = WinCheck::<f32>::default();
    let calls = Cell::new(0);
    let clear = || {
        calls.set(calls.get() + 1);
        true
    };

    let statuses: Vec<_> = (0..6).map(|_| check.poll(DT, &clear)).collect();
    assert_eq!(&statuses[..5], &[WinStatus::Pending; 5]);
    assert_eq!(statuses[5], WinStatus::Won);
    assert_eq!(calls.get(), 2); // first sighting + re-check

    assert_eq!(check.poll(DT, &clear), WinStatus::Won);
    assert_eq!(calls.get(), 2);
}

#[test]
fn failed_recheck_goes_back_to_polling() {
    let config = WinCheckConfig::new().with_settle_delay(0.0).with_stability_window(0.5);
    let mut check = WinCheck::<f32>::new(config);
    // clear, (wait), tangled again, clear, (wait), clear
    let answers = [Some(true), None, Some(false), Some(true), None, Some(true)];
    let mut results = Vec::new();
    for expected in answers {
        let asked = Cell::new(false);
        let status = check.poll(DT, || {
            asked.set(true);
            expected.unwrap_or(true)
        });
        assert_eq!(asked.get(), expected.is_some());
        results.push(status);
    }
    assert_eq!(results[4], WinStatus::Pending);
    assert_eq!(results[5], WinStatus::Won);
}

#[test]
fn cancel_stops_the_check() {
    let mut check = WinCheck::<f32>::default();
    let handle = check.cancel_handle();
    check.poll(DT, || true);

    handle.cancel();
    handle.cancel();
    assert!(handle.is_cancelled());
    assert_eq!(check.status(), WinStatus::Cancelled);

    let called = Cell::new(false);
    for _ in 0..10 {
        let status = check.poll(DT, || {
            called.set(true);
            true
        });
        assert_eq!(status, WinStatus::Cancelled);
    }
    assert!(!called.get());
}

#[test]
fn cancel_after_win_keeps_the_win() {
    let mut check = WinCheck::<f32>::new(WinCheckConfig::new().with_settle_delay(0.0));
    while check.poll(DT, || true) == WinStatus::Pending {}
    check.cancel();
    assert_eq!(check.status(), WinStatus::Won);
    assert_eq!(check.poll(DT, || false), WinStatus::Won);
}

#[test]
fn reset_starts_over() {
    let mut check = WinCheck::<f32>::default();
    check.cancel();
    assert_eq!(check.poll(DT, || true), WinStatus::Cancelled);
    check.reset();
    assert_eq!(check.status(), WinStatus::Pending);
}

#[test]
fn tangled_world_is_never_won() {
    let config = RopeConfig::new()
        .with_segments(10)
        .with_length(RopeLength::Slack(1.1))
        .with_gravity(0.0)
        .with_collision_radius(0.1);
    let mut world = RopeWorld::<f32>::new();
    let a0 = world.add_anchor(Vec3::new(-1.0, 0.0, 0.0));
    let a1 = world.add_anchor(Vec3::new(1.0, 0.0, 0.0));
    let b0 = world.add_anchor(Vec3::new(0.0, 0.05, -1.0));
    let b1 = world.add_anchor(Vec3::new(0.0, 0.05, 1.0));
    world.create_simulation(a0, a1, config).unwrap();
    world.create_simulation(b0, b1, config).unwrap();

    let mut check = WinCheck::default();
    for _ in 0..20 {
        assert_eq!(check.poll_world(DT, &world), WinStatus::Pending);
    }

    world.warm_start(150, 0.02, &mut NoOpStepObserver);
    let mut status = WinStatus::Pending;
    for _ in 0..4 {
        world.step(DT, &mut NoOpStepObserver);
        status = check.poll_world(DT, &world);
    }
    assert_eq!(status, WinStatus::Won);
}
