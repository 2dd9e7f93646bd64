//! Kinematic state primitives.
//!
//! Implements the per-object state used by the engine:
//! - `Vec3` three-axis values (positions, velocities, forces, torques)
//! - `Kinematics` (position, velocity, acceleration) with the
//!   constant-acceleration advance used by every tick

use serde::{Deserialize, Serialize};

/// 3D vector for positions, velocities, forces and torques.
///
/// Games that only need two dimensions simply leave one axis at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component (east is positive).
    #[serde(default)]
    pub x: f64,
    /// Y component (up is positive).
    #[serde(default)]
    pub y: f64,
    /// Z component (north is positive).
    #[serde(default)]
    pub z: f64,
}

impl Vec3 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Zero vector.
    #[must_use]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Apply `f` to each axis.
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
        }
    }

    /// Combine two vectors axis by axis.
    #[must_use]
    pub fn zip_with(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            x: f(self.x, other.x),
            y: f(self.y, other.y),
            z: f(self.z, other.z),
        }
    }

    /// Magnitude squared.
    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude (length).
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Normalize to unit vector.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag < f64::EPSILON {
            Self::zero()
        } else {
            self.scale(1.0 / mag)
        }
    }

    /// Scale by scalar.
    #[must_use]
    pub fn scale(&self, s: f64) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Check if all components are finite.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // is_finite not const
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Components as an `(x, y, z)` tuple.
    #[must_use]
    pub const fn to_tuple(self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<(f64, f64, f64)> for Vec3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3> for (f64, f64, f64) {
    fn from(v: Vec3) -> Self {
        v.to_tuple()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl std::ops::Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        self.map(|v| v / rhs)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.map(|v| -v)
    }
}

impl std::iter::Sum for Vec3 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + v)
    }
}

/// Position, velocity and acceleration along three axes.
///
/// Used for both the translational state (meters) and the rotational state
/// (radians) of an object.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kinematics {
    /// Position (m) or orientation (rad).
    pub position: Vec3,
    /// Velocity (m/s) or angular velocity (rad/s).
    pub velocity: Vec3,
    /// Acceleration (m/s²) or angular acceleration (rad/s²).
    pub acceleration: Vec3,
}

impl Kinematics {
    /// State at `position` moving with `velocity` and no acceleration yet.
    #[must_use]
    pub const fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::zero(),
        }
    }

    /// Advance by `dt` under constant acceleration.
    ///
    /// ```text
    /// x_{n+1} = x_n + v_n * dt + ½ * a_drift * dt²
    /// v_{n+1} = v_n + a * dt
    /// ```
    ///
    /// `drift` is the acceleration that moves the position and `acceleration`
    /// the one that changes the velocity. They differ only when instantaneous
    /// forces are applied. Both formulas hold for negative `dt`.
    #[must_use]
    pub fn advanced(&self, dt: f64, drift: Vec3, acceleration: Vec3) -> Self {
        let half_dt_sq = 0.5 * dt * dt;
        Self {
            position: self.position + self.velocity * dt + drift * half_dt_sq,
            velocity: self.velocity + acceleration * dt,
            acceleration,
        }
    }

    /// Check if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.acceleration.is_finite()
    }
}
