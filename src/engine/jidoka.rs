//! Jidoka (自働化) - stop-on-error inspection for checked ticks.
//!
//! A universe in [`TickMode::Checked`](crate::engine::TickMode) runs every
//! object's candidate state through a [`JidokaGuard`] before committing it.
//! A NaN or infinite component stops the line: the tick fails with
//! [`SimError::NonFiniteValue`] and the object keeps its previous state.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::engine::state::{Kinematics, Vec3};
use crate::error::{SimError, SimResult};

/// Jidoka configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JidokaConfig {
    /// Reject ticks whose `dt` is NaN or infinite.
    #[serde(default = "default_true")]
    pub check_dt: bool,
    /// Reject states with NaN or infinite components.
    #[serde(default = "default_true")]
    pub check_finite: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for JidokaConfig {
    fn default() -> Self {
        Self {
            check_dt: true,
            check_finite: true,
        }
    }
}

/// Inspects ticks and candidate states.
#[derive(Debug, Clone, Default)]
pub struct JidokaGuard {
    config: JidokaConfig,
}

impl JidokaGuard {
    /// Create a new guard with the given configuration.
    #[must_use]
    pub const fn new(config: JidokaConfig) -> Self {
        Self { config }
    }

    /// Guard configuration.
    #[must_use]
    pub const fn config(&self) -> &JidokaConfig {
        &self.config
    }

    /// Check a tick length before any object is touched.
    ///
    /// # Errors
    ///
    /// Returns `NonFiniteValue` at `"dt"` if `dt` is NaN or infinite.
    pub fn check_dt(&self, dt: f64) -> SimResult<()> {
        if self.config.check_dt && !dt.is_finite() {
            warn!("Jidoka: rejected non-finite tick length {dt}");
            return Err(SimError::NonFiniteValue {
                location: "dt".to_string(),
            });
        }
        Ok(())
    }

    /// Check an object's candidate translational and rotational state.
    ///
    /// # Errors
    ///
    /// Returns `NonFiniteValue` naming the first offending component, e.g.
    /// `"ball.velocity.y"` or `"ball.angular_velocity.z"`.
    pub fn check_motion(&self, object: &str, linear: &Kinematics, angular: &Kinematics) -> SimResult<()> {
        if !self.config.check_finite {
            return Ok(());
        }

        let fields = [
            ("position", linear.position),
            ("velocity", linear.velocity),
            ("acceleration", linear.acceleration),
            ("orientation", angular.position),
            ("angular_velocity", angular.velocity),
            ("angular_acceleration", angular.acceleration),
        ];

        for (field, value) in fields {
            if let Some(axis) = first_non_finite_axis(value) {
                let location = format!("{object}.{field}.{axis}");
                warn!("Jidoka: non-finite value at {location}");
                return Err(SimError::NonFiniteValue { location });
            }
        }
        Ok(())
    }
}

fn first_non_finite_axis(v: Vec3) -> Option<&'static str> {
    [("x", v.x), ("y", v.y), ("z", v.z)]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(axis, _)| axis)
}
