//! Forces applied to physics objects.
//!
//! A [`Force`] carries a linear component per axis (newtons) and, optionally,
//! a lever-arm distance and an angle from the axis of rotation per axis. The
//! lever arm and angle turn part of the force into torque:
//!
//! ```text
//! torque    = lever_arm * linear * sin(angle)
//! projected = linear * cos(angle)
//! ```
//!
//! With an angle of zero the whole force translates the object and none of it
//! rotates it.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::engine::state::Vec3;
use crate::error::{SimError, SimResult};

/// Standard gravity at the surface of Earth (m/s²).
pub const EARTH_G: f64 = 9.806_65;
/// Surface gravity of the Moon (m/s²).
pub const MOON_G: f64 = 1.625;
/// Surface gravity of Mars (m/s²).
pub const MARS_G: f64 = 3.720_76;
/// Surface gravity of Venus (m/s²).
pub const VENUS_G: f64 = 8.87;
/// Surface gravity of Jupiter (m/s²).
pub const JUPITER_G: f64 = 24.79;

/// Magnitude of the gravitational force on `mass` under acceleration `g`.
///
/// The result is not signed: gravity pulls down, so callers building a
/// force by hand negate it (or use [`Force::gravitational`]).
#[must_use]
pub fn gravitational_force(g: f64, mass: f64) -> f64 {
    g * mass
}

static NEXT_FORCE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Force`].
///
/// Assigned once at construction. Clones keep the id of the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ForceId(u64);

impl ForceId {
    fn next() -> Self {
        Self(NEXT_FORCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A named force with optional torque.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Force {
    #[serde(skip)]
    id: ForceId,
    name: String,
    /// Linear component on each axis (N).
    pub linear: Vec3,
    /// Distance from the axis of rotation on each axis (m).
    pub lever_arm: Vec3,
    /// Angle from the axis of rotation on each axis (rad).
    pub rot_angle: Vec3,
    torque: Vec3,
    instantaneous: bool,
}

impl Force {
    /// Create a force with the given linear components and no torque.
    #[must_use]
    pub fn new(name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self::from_linear(name, Vec3::new(x, y, z))
    }

    /// Create a force from a linear vector.
    #[must_use]
    pub fn from_linear(name: impl Into<String>, linear: Vec3) -> Self {
        Self {
            id: ForceId::next(),
            name: name.into(),
            linear,
            lever_arm: Vec3::zero(),
            rot_angle: Vec3::zero(),
            torque: Vec3::zero(),
            instantaneous: false,
        }
    }

    /// Create the weight of a body of `parent_mass` under gravity `g`.
    ///
    /// The force points down: `y = -g * parent_mass`. The value is fixed at
    /// construction, so the force belongs to bodies of that mass only.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ZeroMass`] if `parent_mass` is zero.
    #[allow(clippy::float_cmp)]
    pub fn gravitational(name: impl Into<String>, g: f64, parent_mass: f64) -> SimResult<Self> {
        let name = name.into();
        if parent_mass == 0.0 {
            return Err(SimError::zero_mass(name));
        }
        Ok(Self::from_linear(name, Vec3::new(0.0, -g * parent_mass, 0.0)))
    }

    /// Set the lever-arm distances and recompute the torque.
    #[must_use]
    pub fn with_lever_arm(mut self, lever_arm: Vec3) -> Self {
        self.lever_arm = lever_arm;
        self.recompute_torque();
        self
    }

    /// Set the angles from the axis of rotation and recompute the torque.
    #[must_use]
    pub fn with_rot_angle(mut self, rot_angle: Vec3) -> Self {
        self.rot_angle = rot_angle;
        self.recompute_torque();
        self
    }

    /// Mark the force as instantaneous.
    ///
    /// An instantaneous force changes the velocity of the tick it is applied
    /// in but not the position, and is detached once that tick completes.
    #[must_use]
    pub fn instantaneous(mut self) -> Self {
        self.instantaneous = true;
        self
    }

    /// Recompute the torque from the current linear, lever-arm and angle
    /// values, store it and return it.
    pub fn recompute_torque(&mut self) -> Vec3 {
        self.torque = self.current_torque();
        self.torque
    }

    /// Torque for the current linear, lever-arm and angle values, without
    /// storing it.
    #[must_use]
    pub fn current_torque(&self) -> Vec3 {
        Vec3::new(
            self.lever_arm.x * self.linear.x * self.rot_angle.x.sin(),
            self.lever_arm.y * self.linear.y * self.rot_angle.y.sin(),
            self.lever_arm.z * self.linear.z * self.rot_angle.z.sin(),
        )
    }

    /// Portion of the force that translates the object.
    #[must_use]
    pub fn projected(&self) -> Vec3 {
        self.linear.zip_with(self.rot_angle, |f, angle| f * angle.cos())
    }

    /// Identity of this force.
    #[must_use]
    pub const fn id(&self) -> ForceId {
        self.id
    }

    /// Name of this force.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Torque as of the last recomputation (N·m).
    #[must_use]
    pub const fn torque(&self) -> Vec3 {
        self.torque
    }

    /// Whether the force only lasts one tick.
    #[must_use]
    pub const fn is_instantaneous(&self) -> bool {
        self.instantaneous
    }
}
