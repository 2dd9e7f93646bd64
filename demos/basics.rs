//! Basics Example
//!
//! Demonstrates the core tickphys workflow:
//! - Building objects and attaching forces
//! - Ticking a universe forwards, by a fractional step and backwards
//! - Instantaneous forces and torque
//!
//! # Running
//! ```bash
//! RUST_LOG=debug cargo run --example basics
//! ```

use tickphys::prelude::*;

fn print_object(object: &PhysicsObject) {
    let (x, y, z) = object.get_pos().to_tuple();
    let (vx, vy, vz) = object.get_vel().to_tuple();
    println!(
        "   {:<6} pos=({x:>7.3}, {y:>7.3}, {z:>7.3}) vel=({vx:>6.3}, {vy:>6.3}, {vz:>6.3}) t={:.2}",
        object.name(),
        object.time_passed()
    );
}

fn main() -> SimResult<()> {
    env_logger::init();

    println!("=== tickphys basics ===\n");

    // 1. One newton on a 1.3 kg cart
    println!("1. Push a cart:");
    let mut cart = PhysicsObject::new("cart", 1.3, 1.0)?;
    cart.apply_force(Force::new("push", 1.0, 0.0, 0.0))?;

    let mut universe = PhysicsManager::new(1.0);
    universe.add_object(cart)?;
    universe.tick(None)?;
    universe.objects().for_each(print_object);

    // 2. Fractional and negative ticks
    println!("\n2. Half a tick forward, then rewind:");
    universe.tick(Some(0.5))?;
    universe.objects().for_each(print_object);
    universe.tick(Some(-1.5))?;
    universe.objects().for_each(print_object);
    println!("   universe elapsed: {:.2}s over {} ticks", universe.elapsed(), universe.tick_count());

    // 3. A kick changes velocity, not position, in its own tick
    println!("\n3. Kick a puck:");
    let mut puck = PhysicsObject::new("puck", 0.17, 1.0)?;
    puck.apply_force(Force::new("kick", 3.4, 0.0, 0.0).instantaneous())?;
    universe.add_object(puck)?;
    if let Some(puck) = universe.get("puck") {
        print_object(puck);
    }
    universe.tick_object_by_name("puck")?;
    if let Some(puck) = universe.get("puck") {
        print_object(puck);
        println!("   forces left on puck: {}", puck.force_count());
    }

    // 4. Torque
    println!("\n4. Spin a wheel:");
    let mut wheel = PhysicsObject::new("wheel", 2.0, 0.25)?;
    wheel.apply_force(
        Force::new("crank", 2.0, 0.0, 0.0)
            .with_lever_arm(Vec3::new(0.3, 0.0, 0.0))
            .with_rot_angle(Vec3::new(std::f64::consts::FRAC_PI_2, 0.0, 0.0)),
    )?;
    for _ in 0..3 {
        universe.tick_object(&mut wheel)?;
        let (ox, _, _) = wheel.get_orientation().to_tuple();
        let (wx, _, _) = wheel.get_angular_vel().to_tuple();
        println!("   orientation.x={ox:>6.3} rad  angular_vel.x={wx:>6.3} rad/s");
    }

    // 5. Mistakes are errors, not panics
    println!("\n5. Mistakes:");
    let duplicate = PhysicsObject::new("cart", 1.0, 1.0)?;
    match universe.add_object(duplicate) {
        Ok(_) => println!("   duplicate accepted (unexpected!)"),
        Err(e) => println!("   {e}"),
    }
    match Force::gravitational("gravity", EARTH_G, 0.0) {
        Ok(_) => println!("   massless gravity accepted (unexpected!)"),
        Err(e) => println!("   {e}"),
    }

    println!("\nSnapshot: {}", universe.snapshot_json()?);
    Ok(())
}
