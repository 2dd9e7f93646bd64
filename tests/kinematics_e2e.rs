//! Kinematics E2E Tests
//!
//! Each test states a property of the integrator and tries to falsify it
//! through the public API only.

use tickphys::prelude::*;

const TOL: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < TOL
}

/// Pushing a 1.3 kg object with 1 N for one second gives a velocity of
/// 1/1.3 ≈ 0.7692 m/s and a position of half that, ≈ 0.3846 m.
#[test]
fn e2e_1_one_newton_push() {
    let mut cart = PhysicsObject::new("cart", 1.3, 1.0).unwrap();
    cart.apply_force(Force::new("push", 1.0, 0.0, 0.0)).unwrap();

    let mut universe = PhysicsManager::new(1.0);
    universe.add_object(cart).unwrap();
    universe.tick(None).unwrap();

    let cart = universe.get("cart").unwrap();
    assert!((cart.get_vel().x - 0.769_230_769).abs() < TOL);
    assert!((cart.get_pos().x - 0.384_615_385).abs() < TOL);
    assert!(close(cart.get_accel().x, 1.0 / 1.3));
}

/// A probe dropped on Mars follows the constant-acceleration formulas
/// tick for tick.
#[test]
fn e2e_2_mars_drop_trace() {
    let mut probe = PhysicsObject::builder("probe")
        .position(Vec3::new(0.0, 100.0, 0.0))
        .velocity(Vec3::new(0.0, 1.0, 0.0))
        .mass(2.0)
        .build()
        .unwrap();
    probe
        .apply_force(Force::gravitational("gravity", MARS_G, 2.0).unwrap())
        .unwrap();

    let mut mars = PhysicsManager::new(1.0);
    mars.add_object(probe).unwrap();

    let accel = -MARS_G;
    let (mut y, mut vy) = (100.0, 1.0);
    for _ in 0..4 {
        mars.tick(None).unwrap();
        y += vy + 0.5 * accel;
        vy += accel;

        let probe = mars.get("probe").unwrap();
        assert!(close(probe.get_pos().y, y), "y {} != {y}", probe.get_pos().y);
        assert!(close(probe.get_vel().y, vy), "vy {} != {vy}", probe.get_vel().y);
        assert!(close(probe.get_accel().y, accel));
    }

    assert!((mars.elapsed() - 4.0).abs() < TOL);
    assert_eq!(mars.tick_count(), 4);
}

/// Zero net force keeps velocity and moves by `velocity * dt`.
#[test]
fn e2e_3_free_motion() {
    for dt in [0.25, 1.0, -0.5, 3.0] {
        let mut drifter = PhysicsObject::builder("drifter")
            .position(Vec3::new(1.0, 2.0, 3.0))
            .velocity(Vec3::new(-2.0, 0.5, 4.0))
            .build()
            .unwrap();

        drifter.tick(dt).unwrap();

        assert_eq!(drifter.get_vel(), Vec3::new(-2.0, 0.5, 4.0));
        assert!(close(drifter.get_pos().x, 1.0 - 2.0 * dt));
        assert!(close(drifter.get_pos().y, 2.0 + 0.5 * dt));
        assert!(close(drifter.get_pos().z, 3.0 + 4.0 * dt));
    }
}

/// A zero-length tick leaves every field bit-identical.
#[test]
fn e2e_4_zero_tick_is_noop() {
    let mut spinner = PhysicsObject::builder("spinner")
        .position(Vec3::new(0.1, 0.2, 0.3))
        .velocity(Vec3::new(1.0, -1.0, 0.5))
        .angular_velocity(Vec3::new(0.0, 0.0, 2.0))
        .mass(0.7)
        .build()
        .unwrap();
    spinner
        .apply_force(
            Force::new("twist", 3.0, 0.0, 0.0)
                .with_lever_arm(Vec3::new(0.2, 0.0, 0.0))
                .with_rot_angle(Vec3::new(0.4, 0.0, 0.0)),
        )
        .unwrap();
    spinner
        .apply_force(Force::new("kick", 0.0, 5.0, 0.0).instantaneous())
        .unwrap();
    let before = serde_json::to_string(&spinner).unwrap();

    spinner.tick(0.0).unwrap();

    assert_eq!(serde_json::to_string(&spinner).unwrap(), before);
    assert_eq!(spinner.force_count(), 2);
}

/// Forward then backward by the same length returns to the start.
#[test]
fn e2e_5_negative_tick_rewinds() {
    let mut ball = PhysicsObject::builder("ball")
        .position(Vec3::new(3.0, 4.0, -1.0))
        .velocity(Vec3::new(0.5, 2.0, 0.0))
        .mass(1.5)
        .build()
        .unwrap();
    ball.apply_force(Force::gravitational("gravity", EARTH_G, 1.5).unwrap())
        .unwrap();
    ball.apply_force(Force::new("wind", 0.3, 0.0, -0.2)).unwrap();

    ball.tick(0.75).unwrap();
    ball.tick(-0.75).unwrap();

    let pos = ball.get_pos();
    let vel = ball.get_vel();
    assert!(close(pos.x, 3.0) && close(pos.y, 4.0) && close(pos.z, -1.0));
    assert!(close(vel.x, 0.5) && close(vel.y, 2.0) && close(vel.z, 0.0));
    assert!(close(ball.time_passed(), 0.0));
}

/// Gravity on a massless parent fails and attaches nothing.
#[test]
fn e2e_6_massless_gravity_rejected() {
    let mut ball = PhysicsObject::new("ball", 1.0, 1.0).unwrap();

    let result = Force::gravitational("gravity", EARTH_G, 0.0).and_then(|f| ball.apply_force(f));

    assert!(matches!(result, Err(SimError::ZeroMass { .. })));
    assert_eq!(ball.force_count(), 0);
}

/// A second force with the same name is rejected and the first is kept.
#[test]
fn e2e_7_duplicate_force_rejected() {
    let mut ball = PhysicsObject::new("ball", 1.0, 1.0).unwrap();
    let first = ball.apply_force(Force::new("push", 1.0, 0.0, 0.0)).unwrap();

    let err = ball.apply_force(Force::new("push", 9.0, 9.0, 9.0)).unwrap_err();

    assert!(matches!(
        err,
        SimError::DuplicateName { kind: NameScope::Force, ref name } if name == "push"
    ));
    assert_eq!(ball.force_count(), 1);
    let kept = ball.force("push").unwrap();
    assert_eq!(kept.id(), first);
    assert_eq!(kept.linear, Vec3::new(1.0, 0.0, 0.0));
}

/// A kick changes velocity but not position in its own tick, then is gone.
#[test]
fn e2e_8_instantaneous_kick() {
    let mut puck = PhysicsObject::new("puck", 2.0, 1.0).unwrap();
    puck.apply_force(Force::new("kick", 4.0, 0.0, 0.0).instantaneous())
        .unwrap();

    puck.tick(1.0).unwrap();
    assert!(close(puck.get_vel().x, 2.0));
    assert_eq!(puck.get_pos().x, 0.0);
    assert_eq!(puck.force_count(), 0);

    puck.tick(1.0).unwrap();
    assert!(close(puck.get_vel().x, 2.0));
    assert!(close(puck.get_pos().x, 2.0));
}

/// Torque from a perpendicular force spins the object without moving it.
#[test]
fn e2e_9_pure_torque() {
    let mut wheel = PhysicsObject::new("wheel", 1.0, 0.5).unwrap();
    wheel
        .apply_force(
            Force::new("crank", 2.0, 0.0, 0.0)
                .with_lever_arm(Vec3::new(0.5, 0.0, 0.0))
                .with_rot_angle(Vec3::new(std::f64::consts::FRAC_PI_2, 0.0, 0.0)),
        )
        .unwrap();

    wheel.tick(1.0).unwrap();

    assert!(close(wheel.net_torque().x, 1.0));
    assert!(close(wheel.get_angular_accel().x, 2.0));
    assert!(close(wheel.get_angular_vel().x, 2.0));
    assert!(close(wheel.get_orientation().x, 1.0));
    assert!(wheel.get_pos().x.abs() < 1e-12);
}
