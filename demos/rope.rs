//! Rope Example
//!
//! Demonstrates [`SpringLink`]: a small chain of limbs hanging from a heavy
//! anchor, each joint re-applied before every tick.
//!
//! # Running
//! ```bash
//! cargo run --example rope
//! ```

use tickphys::prelude::*;

const LIMBS: usize = 4;

fn main() -> SimResult<()> {
    env_logger::init();

    let mut universe = PhysicsManager::new(0.001);
    universe.add_object(PhysicsObject::new("anchor", 1.0e6, 1.0)?)?;

    let mut links = Vec::new();
    let mut previous = "anchor".to_string();
    for i in 0..LIMBS {
        let name = format!("limb-{i}");
        let mut limb = PhysicsObject::builder(&name)
            .position(Vec3::new(0.5 * (i + 1) as f64, 0.0, 0.0))
            .mass(0.5)
            .build()?;
        limb.apply_force(Force::gravitational("gravity", EARTH_G, 0.5)?)?;
        universe.add_object(limb)?;

        links.push(SpringLink::new(&previous, &name, 0.5, 100.0));
        previous = name;
    }

    println!("=== rope of {LIMBS} limbs ===\n");
    for step in 0..=2000 {
        for link in &mut links {
            link.apply(&mut universe)?;
        }
        if step % 500 == 0 {
            println!("t={:.2}s", universe.elapsed());
            for limb in universe.objects().skip(1) {
                let (x, y, _) = limb.get_pos().to_tuple();
                println!("   {:<7} ({x:>6.3}, {y:>6.3})", limb.name());
            }
        }
        universe.tick(None)?;
    }

    Ok(())
}
