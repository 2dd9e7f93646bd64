//! Error types for tickphys.
//!
//! Every fallible operation returns `Result<T, SimError>` instead of
//! panicking. The engine never retries: each variant signals a programmer or
//! configuration mistake that the caller has to fix.

use std::fmt;

use thiserror::Error;

/// Result type alias for tickphys operations.
pub type SimResult<T> = Result<T, SimError>;

/// Scope in which a name must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameScope {
    /// Force names are unique per object.
    Force,
    /// Object names are unique per universe.
    Object,
}

impl fmt::Display for NameScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Force => f.write_str("force"),
            Self::Object => f.write_str("object"),
        }
    }
}

/// Unified error type for all tickphys operations.
#[derive(Debug, Error)]
pub enum SimError {
    // ===== Engine invariants =====
    /// Mass is, or would become, zero during an acceleration calculation.
    #[error("'{name}' has a mass of zero")]
    ZeroMass {
        /// Object (or force, for gravity-derived forces) that tripped the check.
        name: String,
    },

    /// Moment of inertia is, or would become, zero.
    #[error("'{name}' has a moment of inertia of zero")]
    ZeroMomentOfInertia {
        /// Object that tripped the check.
        name: String,
    },

    /// A name is already in use within its scope.
    #[error("{kind} name '{name}' is already taken")]
    DuplicateName {
        /// Whether the clash is between forces or objects.
        kind: NameScope,
        /// The clashing name.
        name: String,
    },

    // ===== Jidoka violations =====
    /// Non-finite value (NaN or Inf) detected by a checked tick.
    #[error("Jidoka: non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location where the non-finite value was detected.
        location: String,
    },

    // ===== Configuration errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SimError {
    /// Create a zero-mass error for the named entity.
    #[must_use]
    pub fn zero_mass(name: impl Into<String>) -> Self {
        Self::ZeroMass { name: name.into() }
    }

    /// Create a zero-moment-of-inertia error for the named object.
    #[must_use]
    pub fn zero_moment_of_inertia(name: impl Into<String>) -> Self {
        Self::ZeroMomentOfInertia { name: name.into() }
    }

    /// Create a duplicate-name error.
    #[must_use]
    pub fn duplicate_name(kind: NameScope, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error is a broken engine invariant (zero mass, zero
    /// moment of inertia, or a name clash).
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::ZeroMass { .. } | Self::ZeroMomentOfInertia { .. } | Self::DuplicateName { .. }
        )
    }

    /// Check if this error is a Jidoka violation (requires immediate stop).
    #[must_use]
    pub const fn is_jidoka_violation(&self) -> bool {
        matches!(self, Self::NonFiniteValue { .. })
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_classification() {
        assert!(SimError::zero_mass("ball").is_invariant_violation());
        assert!(SimError::zero_moment_of_inertia("ball").is_invariant_violation());
        assert!(SimError::duplicate_name(NameScope::Force, "gravity").is_invariant_violation());

        let non_finite = SimError::NonFiniteValue {
            location: "ball.position.x".to_string(),
        };
        assert!(!non_finite.is_invariant_violation());
        assert!(non_finite.is_jidoka_violation());

        assert!(!SimError::config("bad").is_invariant_violation());
        assert!(!SimError::config("bad").is_jidoka_violation());
    }

    #[test]
    fn test_error_display_zero_mass() {
        let msg = SimError::zero_mass("ball").to_string();
        assert!(msg.contains("ball"));
        assert!(msg.contains("mass of zero"));
    }

    #[test]
    fn test_error_display_zero_moment_of_inertia() {
        let msg = SimError::zero_moment_of_inertia("wheel").to_string();
        assert!(msg.contains("wheel"));
        assert!(msg.contains("moment of inertia"));
    }

    #[test]
    fn test_error_display_duplicate_name() {
        let msg = SimError::duplicate_name(NameScope::Object, "ball").to_string();
        assert_eq!(msg, "object name 'ball' is already taken");

        let msg = SimError::duplicate_name(NameScope::Force, "push").to_string();
        assert_eq!(msg, "force name 'push' is already taken");
    }

    #[test]
    fn test_error_config() {
        let msg = SimError::config("invalid parameter").to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("invalid parameter"));
    }

    #[test]
    fn test_error_serialization() {
        let msg = SimError::serialization("failed to serialize").to_string();
        assert!(msg.contains("Serialization error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<f64>("not json").unwrap_err();
        let err: SimError = json_err.into();
        assert!(matches!(err, SimError::Serialization(_)));
    }

    #[test]
    fn test_error_from_io() {
        let err: SimError = std::io::Error::other("file not found").into();
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_error_debug() {
        let debug = format!("{:?}", SimError::config("test"));
        assert!(debug.contains("Config"));
    }
}
