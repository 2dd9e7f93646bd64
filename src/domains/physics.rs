//! Physics objects.
//!
//! A [`PhysicsObject`] owns a set of uniquely named forces and advances its
//! translational and rotational state one tick at a time with
//! constant-acceleration kinematics:
//!
//! ```text
//! a   = Σ(F · cos θ) / m          α   = Σ(r · F · sin θ) / I
//! x' = x + v·dt + ½·a·dt²         θ' = θ + ω·dt + ½·α·dt²
//! v' = v + a·dt                   ω' = ω + α·dt
//! ```
//!
//! Accelerations are recomputed from the current force set at the start of
//! every tick and stay as they are until the next one. Time may run backwards:
//! a negative `dt` walks the same formulas in reverse.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use log::{debug, trace};
use serde::Serialize;

use crate::domains::force::{Force, ForceId};
use crate::engine::jidoka::JidokaGuard;
use crate::engine::state::{Kinematics, Vec3};
use crate::error::{NameScope, SimError, SimResult};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`PhysicsObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// An entity that moves and rotates as forces act on it over ticks.
#[derive(Debug, Clone, Serialize)]
pub struct PhysicsObject {
    #[serde(skip)]
    id: ObjectId,
    name: String,
    /// Position (m), velocity (m/s), acceleration (m/s²).
    linear: Kinematics,
    /// Orientation (rad), angular velocity (rad/s), angular acceleration (rad/s²).
    angular: Kinematics,
    mass: f64,
    moment_of_inertia: f64,
    forces: IndexMap<String, Force>,
    time_passed: f64,
}

/// Builder for [`PhysicsObject`].
///
/// Every kinematic value defaults to zero; mass and moment of inertia
/// default to 1.
#[derive(Debug, Clone)]
pub struct PhysicsObjectBuilder {
    name: String,
    position: Vec3,
    velocity: Vec3,
    orientation: Vec3,
    angular_velocity: Vec3,
    mass: f64,
    moment_of_inertia: f64,
    forces: Vec<Force>,
}

impl PhysicsObjectBuilder {
    /// Initial position (m).
    #[must_use]
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Initial velocity (m/s).
    #[must_use]
    pub fn velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Initial orientation (rad).
    #[must_use]
    pub fn orientation(mut self, orientation: Vec3) -> Self {
        self.orientation = orientation;
        self
    }

    /// Initial angular velocity (rad/s).
    #[must_use]
    pub fn angular_velocity(mut self, angular_velocity: Vec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Mass (kg).
    #[must_use]
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Moment of inertia (kg·m²).
    #[must_use]
    pub fn moment_of_inertia(mut self, moment_of_inertia: f64) -> Self {
        self.moment_of_inertia = moment_of_inertia;
        self
    }

    /// Force acting on the object from the start.
    #[must_use]
    pub fn force(mut self, force: Force) -> Self {
        self.forces.push(force);
        self
    }

    /// Build the object and compute its initial accelerations.
    ///
    /// # Errors
    ///
    /// - [`SimError::ZeroMass`] if the mass is zero
    /// - [`SimError::ZeroMomentOfInertia`] if the moment of inertia is zero
    /// - [`SimError::DuplicateName`] if two forces share a name
    pub fn build(self) -> SimResult<PhysicsObject> {
        let mut object = PhysicsObject {
            id: ObjectId::next(),
            name: self.name,
            linear: Kinematics::new(self.position, self.velocity),
            angular: Kinematics::new(self.orientation, self.angular_velocity),
            mass: self.mass,
            moment_of_inertia: self.moment_of_inertia,
            forces: IndexMap::with_capacity(self.forces.len()),
            time_passed: 0.0,
        };
        object.check_invariants()?;

        for force in self.forces {
            object.apply_force(force)?;
        }

        object.calculate_accel()?;
        object.calculate_angular_accel()?;
        Ok(object)
    }
}

impl PhysicsObject {
    /// Start building an object.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> PhysicsObjectBuilder {
        PhysicsObjectBuilder {
            name: name.into(),
            position: Vec3::zero(),
            velocity: Vec3::zero(),
            orientation: Vec3::zero(),
            angular_velocity: Vec3::zero(),
            mass: 1.0,
            moment_of_inertia: 1.0,
            forces: Vec::new(),
        }
    }

    /// Create an object at rest at the origin.
    ///
    /// # Errors
    ///
    /// Returns error if `mass` or `moment_of_inertia` is zero.
    pub fn new(name: impl Into<String>, mass: f64, moment_of_inertia: f64) -> SimResult<Self> {
        Self::builder(name)
            .mass(mass)
            .moment_of_inertia(moment_of_inertia)
            .build()
    }

    // ===== Forces =====

    /// Attach a force.
    ///
    /// Accelerations are not recomputed here; the next tick picks the force up.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DuplicateName`] if a force with the same name is
    /// already attached. The existing force is left untouched.
    pub fn apply_force(&mut self, force: Force) -> SimResult<ForceId> {
        if self.forces.contains_key(force.name()) {
            return Err(SimError::duplicate_name(NameScope::Force, force.name()));
        }
        let id = force.id();
        self.forces.insert(force.name().to_string(), force);
        Ok(id)
    }

    /// Detach the force with the given identity, if attached.
    pub fn remove_force(&mut self, id: ForceId) -> Option<Force> {
        let index = self.forces.values().position(|f| f.id() == id)?;
        self.forces.shift_remove_index(index).map(|(_, force)| force)
    }

    /// Detach the force with the given name, if attached.
    pub fn remove_force_by_name(&mut self, name: &str) -> Option<Force> {
        self.forces.shift_remove(name)
    }

    /// Detach every force, returning them in the order they were applied.
    pub fn clear_forces(&mut self) -> Vec<Force> {
        self.forces.drain(..).map(|(_, force)| force).collect()
    }

    /// Attached forces in application order.
    pub fn forces(&self) -> impl Iterator<Item = &Force> {
        self.forces.values()
    }

    /// Attached force by name.
    #[must_use]
    pub fn force(&self, name: &str) -> Option<&Force> {
        self.forces.get(name)
    }

    /// Mutable access to an attached force by name.
    pub fn force_mut(&mut self, name: &str) -> Option<&mut Force> {
        self.forces.get_mut(name)
    }

    /// Number of attached forces.
    #[must_use]
    pub fn force_count(&self) -> usize {
        self.forces.len()
    }

    /// Sum of the translating components of all forces (N).
    #[must_use]
    pub fn net_force(&self) -> Vec3 {
        self.projected_sum(true)
    }

    /// Sum of the torques of all forces as last recomputed (N·m).
    #[must_use]
    pub fn net_torque(&self) -> Vec3 {
        self.forces.values().map(Force::torque).sum()
    }

    fn projected_sum(&self, include_instantaneous: bool) -> Vec3 {
        self.forces
            .values()
            .filter(|f| include_instantaneous || !f.is_instantaneous())
            .map(Force::projected)
            .sum()
    }

    fn recompute_torques(&mut self) {
        for force in self.forces.values_mut() {
            force.recompute_torque();
        }
    }

    /// Sum of freshly computed torques. Stored torques are left alone.
    fn current_torque_sum(&self, include_instantaneous: bool) -> Vec3 {
        self.forces
            .values()
            .filter(|f| include_instantaneous || !f.is_instantaneous())
            .map(Force::current_torque)
            .sum()
    }

    // ===== Accelerations =====

    #[allow(clippy::float_cmp)]
    fn check_mass(&self) -> SimResult<()> {
        if self.mass == 0.0 {
            return Err(SimError::zero_mass(&self.name));
        }
        Ok(())
    }

    #[allow(clippy::float_cmp)]
    fn check_moment_of_inertia(&self) -> SimResult<()> {
        if self.moment_of_inertia == 0.0 {
            return Err(SimError::zero_moment_of_inertia(&self.name));
        }
        Ok(())
    }

    fn check_invariants(&self) -> SimResult<()> {
        self.check_mass()?;
        self.check_moment_of_inertia()
    }

    /// Recompute, store and return the acceleration from the attached forces.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ZeroMass`] if the mass has been set to zero. The
    /// stored acceleration is left as it was.
    pub fn calculate_accel(&mut self) -> SimResult<Vec3> {
        self.check_mass()?;
        self.linear.acceleration = self.net_force() / self.mass;
        Ok(self.linear.acceleration)
    }

    /// Recompute every force's torque, then store and return the angular
    /// acceleration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ZeroMomentOfInertia`] if the moment of inertia has
    /// been set to zero. Nothing is recomputed in that case.
    pub fn calculate_angular_accel(&mut self) -> SimResult<Vec3> {
        self.check_moment_of_inertia()?;
        self.recompute_torques();
        self.angular.acceleration = self.net_torque() / self.moment_of_inertia;
        Ok(self.angular.acceleration)
    }

    // ===== Ticking =====

    /// Let `dt` seconds pass for this object.
    ///
    /// A `dt` of zero returns immediately without touching any state.
    /// Instantaneous forces count towards the velocity change of this tick
    /// but not the position change, and are detached afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ZeroMass`] or [`SimError::ZeroMomentOfInertia`] if
    /// an invariant was broken through a setter. The object is left unchanged.
    pub fn tick(&mut self, dt: f64) -> SimResult<()> {
        self.tick_guarded(dt, None)
    }

    #[allow(clippy::float_cmp)]
    pub(crate) fn tick_guarded(&mut self, dt: f64, guard: Option<&JidokaGuard>) -> SimResult<()> {
        if dt == 0.0 {
            return Ok(());
        }
        self.check_invariants()?;

        let accel = self.projected_sum(true) / self.mass;
        let drift = self.projected_sum(false) / self.mass;
        let linear = self.linear.advanced(dt, drift, accel);

        let angular_accel = self.current_torque_sum(true) / self.moment_of_inertia;
        let angular_drift = self.current_torque_sum(false) / self.moment_of_inertia;
        let angular = self.angular.advanced(dt, angular_drift, angular_accel);

        if let Some(guard) = guard {
            guard.check_motion(&self.name, &linear, &angular)?;
        }

        self.recompute_torques();
        self.linear = linear;
        self.angular = angular;
        self.time_passed += dt;
        self.consume_instantaneous();

        trace!(
            "{} ticked {dt}s: pos={:?} vel={:?}",
            self.name,
            self.linear.position,
            self.linear.velocity
        );
        Ok(())
    }

    fn consume_instantaneous(&mut self) {
        let before = self.forces.len();
        self.forces.retain(|_, f| !f.is_instantaneous());
        let consumed = before - self.forces.len();
        if consumed > 0 {
            debug!("{}: {consumed} instantaneous force(s) consumed", self.name);
        }
    }

    // ===== Accessors =====

    /// Identity of this object.
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Name of this object.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position (m).
    #[must_use]
    pub const fn get_pos(&self) -> Vec3 {
        self.linear.position
    }

    /// Velocity (m/s).
    #[must_use]
    pub const fn get_vel(&self) -> Vec3 {
        self.linear.velocity
    }

    /// Acceleration as of the last recomputation (m/s²).
    #[must_use]
    pub const fn get_accel(&self) -> Vec3 {
        self.linear.acceleration
    }

    /// Orientation (rad).
    #[must_use]
    pub const fn get_orientation(&self) -> Vec3 {
        self.angular.position
    }

    /// Angular velocity (rad/s).
    #[must_use]
    pub const fn get_angular_vel(&self) -> Vec3 {
        self.angular.velocity
    }

    /// Angular acceleration as of the last recomputation (rad/s²).
    #[must_use]
    pub const fn get_angular_accel(&self) -> Vec3 {
        self.angular.acceleration
    }

    /// Translational state.
    #[must_use]
    pub const fn linear(&self) -> &Kinematics {
        &self.linear
    }

    /// Rotational state.
    #[must_use]
    pub const fn angular(&self) -> &Kinematics {
        &self.angular
    }

    /// Mass (kg).
    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Moment of inertia (kg·m²).
    #[must_use]
    pub const fn moment_of_inertia(&self) -> f64 {
        self.moment_of_inertia
    }

    /// Signed total of every non-zero `dt` this object has been ticked by.
    #[must_use]
    pub const fn time_passed(&self) -> f64 {
        self.time_passed
    }

    // ===== Setters =====
    // None of these validate; the next acceleration calculation does.

    /// Teleport the object.
    pub fn set_position(&mut self, position: Vec3) {
        self.linear.position = position;
    }

    /// Overwrite the velocity.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.linear.velocity = velocity;
    }

    /// Overwrite the orientation.
    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.angular.position = orientation;
    }

    /// Overwrite the angular velocity.
    pub fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.angular.velocity = angular_velocity;
    }

    /// Change the mass.
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
    }

    /// Change the moment of inertia.
    pub fn set_moment_of_inertia(&mut self, moment_of_inertia: f64) {
        self.moment_of_inertia = moment_of_inertia;
    }
}
