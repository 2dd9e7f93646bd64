//! Spring linkage between two objects of one universe.
//!
//! Objects in a universe never act on each other by themselves. A
//! [`SpringLink`] is the opt-in exception: call [`SpringLink::apply`] before
//! each tick and both ends receive an equal and opposite Hooke pull once they
//! drift further apart than the rest length. Compressed links push nothing.
//!
//! The pull is an ordinary [`Force`] named `"<other end> pull"`, so it shows up
//! in [`PhysicsObject::forces`](crate::domains::physics::PhysicsObject::forces)
//! and can be removed like any other.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::domains::force::{Force, ForceId};
use crate::engine::state::Vec3;
use crate::engine::PhysicsManager;
use crate::error::{NameScope, SimError, SimResult};

/// A one-way spring (a rope, really) between two named objects.
///
/// The link remembers the forces it attached and only ever removes those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringLink {
    a: String,
    b: String,
    rest_length: f64,
    stiffness: f64,
    #[serde(skip)]
    attached: Option<(ForceId, ForceId)>,
}

impl SpringLink {
    /// Link objects `a` and `b` with the given rest length (m) and stiffness
    /// (N/m).
    #[must_use]
    pub fn new(a: impl Into<String>, b: impl Into<String>, rest_length: f64, stiffness: f64) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            rest_length,
            stiffness,
            attached: None,
        }
    }

    /// Name of the first end.
    #[must_use]
    pub fn a(&self) -> &str {
        &self.a
    }

    /// Name of the second end.
    #[must_use]
    pub fn b(&self) -> &str {
        &self.b
    }

    /// Rest length (m).
    #[must_use]
    pub const fn rest_length(&self) -> f64 {
        self.rest_length
    }

    /// Stiffness (N/m).
    #[must_use]
    pub const fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// Whether the link currently has pull forces attached.
    #[must_use]
    pub const fn is_pulling(&self) -> bool {
        self.attached.is_some()
    }

    /// Name of the pull force attached to one end on behalf of the other.
    #[must_use]
    pub fn pull_name(other: &str) -> String {
        format!("{other} pull")
    }

    /// Pull on end `a`, toward `b`, for the current positions. Zero while the
    /// link is slack. `None` if either end is missing.
    #[must_use]
    pub fn pull_on_a(&self, manager: &PhysicsManager) -> Option<Vec3> {
        let a = manager.get(&self.a)?;
        let b = manager.get(&self.b)?;

        let separation = b.get_pos() - a.get_pos();
        let distance = separation.magnitude();
        if distance <= self.rest_length {
            return Some(Vec3::zero());
        }
        Some(separation.normalize() * (self.stiffness * (distance - self.rest_length)))
    }

    /// Replace both ends' pull forces to match the current separation.
    ///
    /// Returns `Ok(false)`, changing nothing, if either end is not in the
    /// universe.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if an end already carries a force with the
    /// pull's name that this link did not attach. Neither end is changed
    /// beyond removing this link's previous pulls.
    pub fn apply(&mut self, manager: &mut PhysicsManager) -> SimResult<bool> {
        let Some(pull) = self.pull_on_a(manager) else {
            return Ok(false);
        };
        self.detach(manager);
        if pull == Vec3::zero() {
            trace!("link {}-{}: slack", self.a, self.b);
            return Ok(true);
        }

        let on_a = Self::pull_name(&self.b);
        let on_b = Self::pull_name(&self.a);
        for (end, name) in [(&self.a, &on_a), (&self.b, &on_b)] {
            if manager.get(end).is_some_and(|o| o.force(name).is_some()) {
                return Err(SimError::duplicate_name(NameScope::Force, name.as_str()));
            }
        }

        let Some(a) = manager.get_mut(&self.a) else {
            return Ok(false);
        };
        let id_a = a.apply_force(Force::from_linear(on_a, pull))?;
        let Some(b) = manager.get_mut(&self.b) else {
            return Ok(false);
        };
        let id_b = b.apply_force(Force::from_linear(on_b, -pull))?;
        self.attached = Some((id_a, id_b));

        trace!("link {}-{}: pull {:?}", self.a, self.b, pull.to_tuple());
        Ok(true)
    }

    /// Remove the pull forces this link attached, if they are still there.
    pub fn detach(&mut self, manager: &mut PhysicsManager) {
        let Some((on_a, on_b)) = self.attached.take() else {
            return;
        };
        if let Some(a) = manager.get_mut(&self.a) {
            a.remove_force(on_a);
        }
        if let Some(b) = manager.get_mut(&self.b) {
            b.remove_force(on_b);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domains::physics::PhysicsObject;

    fn universe(bx: f64) -> PhysicsManager {
        let mut manager = PhysicsManager::new(1.0);
        manager.add_object(PhysicsObject::new("anchor", 1.0, 1.0).unwrap()).unwrap();
        manager
            .add_object(
                PhysicsObject::builder("weight")
                    .position(Vec3::new(bx, 0.0, 0.0))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        manager
    }

    #[test]
    fn test_missing_end_is_reported() {
        let mut manager = universe(5.0);
        let mut link = SpringLink::new("anchor", "ghost", 1.0, 2.0);

        assert!(!link.apply(&mut manager).unwrap());
        assert_eq!(manager.get("anchor").unwrap().force_count(), 0);
    }

    #[test]
    fn test_stretched_link_pulls_both_ends() {
        let mut manager = universe(5.0);
        let mut link = SpringLink::new("anchor", "weight", 3.0, 2.0);

        assert!(link.apply(&mut manager).unwrap());

        let anchor = manager.get("anchor").unwrap().force("weight pull").unwrap();
        let weight = manager.get("weight").unwrap().force("anchor pull").unwrap();
        assert!((anchor.linear.x - 4.0).abs() < 1e-12);
        assert!((weight.linear.x + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_slack_link_removes_pull() {
        let mut manager = universe(5.0);
        let mut link = SpringLink::new("anchor", "weight", 3.0, 2.0);
        link.apply(&mut manager).unwrap();

        manager.get_mut("weight").unwrap().set_position(Vec3::new(1.0, 0.0, 0.0));
        assert!(link.apply(&mut manager).unwrap());

        assert!(manager.get("anchor").unwrap().force("weight pull").is_none());
        assert!(manager.get("weight").unwrap().force("anchor pull").is_none());
    }

    #[test]
    fn test_reapply_replaces_previous_pull() {
        let mut manager = universe(5.0);
        let mut link = SpringLink::new("anchor", "weight", 3.0, 2.0);
        link.apply(&mut manager).unwrap();

        manager.get_mut("weight").unwrap().set_position(Vec3::new(4.0, 0.0, 0.0));
        link.apply(&mut manager).unwrap();

        let weight = manager.get("weight").unwrap();
        assert_eq!(weight.force_count(), 1);
        assert!((weight.force("anchor pull").unwrap().linear.x + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_link_brings_ends_together() {
        let mut manager = universe(5.0);
        let mut link = SpringLink::new("anchor", "weight", 3.0, 2.0);

        link.apply(&mut manager).unwrap();
        manager.tick(None).unwrap();

        // 4 N on 1 kg for 1 s: 2 m each way.
        assert!((manager.get("anchor").unwrap().get_pos().x - 2.0).abs() < 1e-12);
        assert!((manager.get("weight").unwrap().get_pos().x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_pull_on_a_direction() {
        let manager = universe(-5.0);
        let link = SpringLink::new("anchor", "weight", 0.0, 1.0);

        let pull = link.pull_on_a(&manager).unwrap();
        assert!((pull.x + 5.0).abs() < 1e-12);
        assert_eq!(SpringLink::pull_name("weight"), "weight pull");
    }

    #[test]
    fn test_accessors() {
        let link = SpringLink::new("anchor", "weight", 0.5, 40.0);
        assert_eq!(link.a(), "anchor");
        assert_eq!(link.b(), "weight");
        assert!((link.rest_length() - 0.5).abs() < f64::EPSILON);
        assert!((link.stiffness() - 40.0).abs() < f64::EPSILON);
        assert!(!link.is_pulling());
    }

    #[test]
    fn test_slack_link_keeps_user_force_with_pull_name() {
        let mut manager = universe(1.0);
        manager
            .get_mut("anchor")
            .unwrap()
            .apply_force(Force::new("weight pull", 0.0, -7.0, 0.0))
            .unwrap();
        let mut link = SpringLink::new("anchor", "weight", 5.0, 2.0);

        assert!(link.apply(&mut manager).unwrap());

        let anchor = manager.get("anchor").unwrap();
        assert_eq!(anchor.force_count(), 1);
        assert_eq!(anchor.force("weight pull").unwrap().linear.y, -7.0);
    }

    #[test]
    fn test_stretched_link_refuses_to_replace_user_force() {
        let mut manager = universe(5.0);
        manager
            .get_mut("anchor")
            .unwrap()
            .apply_force(Force::new("weight pull", 0.0, -7.0, 0.0))
            .unwrap();
        let mut link = SpringLink::new("anchor", "weight", 3.0, 2.0);

        let err = link.apply(&mut manager).unwrap_err();

        assert!(matches!(
            err,
            SimError::DuplicateName { kind: NameScope::Force, ref name } if name == "weight pull"
        ));
        assert!(!link.is_pulling());
        assert_eq!(manager.get("anchor").unwrap().force("weight pull").unwrap().linear.y, -7.0);
        assert_eq!(manager.get("weight").unwrap().force_count(), 0);
    }

    #[test]
    fn test_detach_removes_only_own_pulls() {
        let mut manager = universe(5.0);
        let mut link = SpringLink::new("anchor", "weight", 3.0, 2.0);
        link.apply(&mut manager).unwrap();
        assert!(link.is_pulling());
        manager
            .get_mut("weight")
            .unwrap()
            .apply_force(Force::new("wind", 1.0, 0.0, 0.0))
            .unwrap();

        link.detach(&mut manager);

        assert!(!link.is_pulling());
        assert_eq!(manager.get("anchor").unwrap().force_count(), 0);
        let weight = manager.get("weight").unwrap();
        assert_eq!(weight.force_count(), 1);
        assert!(weight.force("wind").is_some());
    }
}
