//! Mars Drop Example
//!
//! Loads a scene from YAML and runs it in checked mode:
//! - A probe falling under Mars gravity, nudged once by a thruster
//! - A rover driving along the ground
//!
//! # Running
//! ```bash
//! RUST_LOG=info cargo run --example mars_drop
//! ```

use std::path::Path;

use tickphys::prelude::*;

fn main() -> SimResult<()> {
    env_logger::init();

    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/scenes/mars_drop.yaml");
    let config = UniverseConfig::load(&path)?;
    let mut mars = config.build_manager()?;

    println!("=== {} ({:?} mode) ===\n", config.universe.name, mars.mode());
    println!("{:>4} {:>10} {:>10} {:>10} {:>10}", "t", "probe.y", "probe.vy", "spin", "rover.x");

    while mars.elapsed() < 6.0 {
        mars.tick(None)?;

        let (Some(probe), Some(rover)) = (mars.get("probe"), mars.get("rover")) else {
            break;
        };
        println!(
            "{:>4.1} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
            mars.elapsed(),
            probe.get_pos().y,
            probe.get_vel().y,
            probe.get_angular_vel().x,
            rover.get_pos().x
        );

        if probe.get_pos().y <= 0.0 {
            println!("\nprobe landed after {:.1}s", probe.time_passed());
            break;
        }
    }

    Ok(())
}
