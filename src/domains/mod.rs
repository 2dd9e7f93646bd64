//! What moves and what moves it.
//!
//! - Force: linear push plus optional torque
//! - Physics: objects that integrate their forces tick by tick
//! - Linkage: springs that couple two objects of one universe

pub mod force;
pub mod linkage;
pub mod physics;

pub use force::{gravitational_force, Force, ForceId, EARTH_G, JUPITER_G, MARS_G, MOON_G, VENUS_G};
pub use linkage::SpringLink;
pub use physics::{ObjectId, PhysicsObject, PhysicsObjectBuilder};
