//! # tickphys
//!
//! Tick-driven rigid-body kinematics for games.
//!
//! Objects carry named forces. Every tick, each object sums its forces into a
//! net force and torque, derives linear and angular acceleration from its mass
//! and moment of inertia, and advances position and orientation assuming the
//! acceleration is constant for the tick. A universe
//! ([`PhysicsManager`](engine::PhysicsManager)) ticks its objects in insertion
//! order with a configurable tick length that may be fractional, zero or
//! negative.
//!
//! ## Example
//!
//! ```rust
//! use tickphys::prelude::*;
//!
//! let mut probe = PhysicsObject::builder("probe")
//!     .position(Vec3::new(0.0, 100.0, 0.0))
//!     .mass(2.0)
//!     .build()?;
//! probe.apply_force(Force::gravitational("gravity", MARS_G, 2.0)?)?;
//!
//! let mut mars = PhysicsManager::new(1.0);
//! mars.add_object(probe)?;
//! mars.tick(None)?;
//!
//! let probe = mars.get("probe").ok_or_else(|| SimError::config("missing"))?;
//! assert!(probe.get_pos().y < 100.0);
//! # Ok::<(), SimError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::suboptimal_flops,  // Written as the kinematics formulas read
    clippy::imprecise_flops,
    clippy::float_cmp,         // Exact zero checks on mass, inertia and dt
    clippy::missing_const_for_fn,
)]

pub mod config;
pub mod domains;
pub mod engine;
pub mod error;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ForceConfig, LinkConfig, ObjectConfig, UniverseConfig};
    pub use crate::domains::force::{
        gravitational_force, Force, ForceId, EARTH_G, JUPITER_G, MARS_G, MOON_G, VENUS_G,
    };
    pub use crate::domains::linkage::SpringLink;
    pub use crate::domains::physics::{ObjectId, PhysicsObject};
    pub use crate::engine::jidoka::{JidokaConfig, JidokaGuard};
    pub use crate::engine::state::{Kinematics, Vec3};
    pub use crate::engine::{PhysicsManager, TickMode};
    pub use crate::error::{NameScope, SimError, SimResult};
}

/// Re-export for public API
pub use error::{SimError, SimResult};
