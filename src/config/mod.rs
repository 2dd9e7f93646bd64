//! Scene configuration with YAML schema and validation.
//!
//! A [`UniverseConfig`] describes a whole universe: its tick length and mode,
//! the objects in it with their initial state and forces, and any spring
//! links between them. Mistakes are caught in three layers:
//! - Unknown keys are rejected by serde
//! - Field constraints are checked with `validator`
//! - Cross-field rules are checked by a semantic pass
//!
//! Engine invariants (zero mass, clashing names) are left to the engine and
//! surface from [`UniverseConfig::build_manager`].

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domains::force::Force;
use crate::domains::linkage::SpringLink;
use crate::domains::physics::PhysicsObject;
use crate::engine::jidoka::JidokaConfig;
use crate::engine::state::Vec3;
use crate::engine::{PhysicsManager, TickMode};
use crate::error::{SimError, SimResult};

/// Top-level scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UniverseConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Universe settings.
    #[serde(default)]
    pub universe: UniverseMeta,

    /// Checks run when `universe.mode` is `checked`.
    #[serde(default)]
    pub jidoka: JidokaConfig,

    /// Objects, in tick order.
    #[validate(nested)]
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,

    /// Spring links between objects.
    #[validate(nested)]
    #[serde(default)]
    pub links: Vec<LinkConfig>,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

const fn default_tick_length() -> f64 {
    1.0
}

const fn default_one() -> f64 {
    1.0
}

impl UniverseConfig {
    /// Load a scene from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a scene from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Serialize the scene back to YAML.
    ///
    /// # Errors
    ///
    /// Returns `YamlParse` if encoding fails.
    pub fn to_yaml(&self) -> SimResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for programmatic construction.
    #[must_use]
    pub fn builder() -> UniverseConfigBuilder {
        UniverseConfigBuilder::default()
    }

    /// Validate rules that span fields.
    ///
    /// # Errors
    ///
    /// Returns `Config` describing the first broken rule.
    pub fn validate_semantic(&self) -> SimResult<()> {
        if !self.universe.tick_length.is_finite() {
            return Err(SimError::config(format!(
                "tick_length must be finite, got {}",
                self.universe.tick_length
            )));
        }

        for object in &self.objects {
            object.validate_semantic()?;
        }

        for link in &self.links {
            for end in [&link.a, &link.b] {
                if !self.objects.iter().any(|o| &o.name == end) {
                    return Err(SimError::config(format!(
                        "link {}-{} refers to unknown object '{end}'",
                        link.a, link.b
                    )));
                }
            }
            if !(link.rest_length.is_finite() && link.rest_length >= 0.0) {
                return Err(SimError::config(format!(
                    "link {}-{}: rest_length must be finite and non-negative",
                    link.a, link.b
                )));
            }
            if !link.stiffness.is_finite() {
                return Err(SimError::config(format!(
                    "link {}-{}: stiffness must be finite",
                    link.a, link.b
                )));
            }
        }

        Ok(())
    }

    /// Build a populated universe.
    ///
    /// # Errors
    ///
    /// Returns the engine's error for zero masses, zero moments of inertia,
    /// zero-mass gravity forces and duplicate names.
    pub fn build_manager(&self) -> SimResult<PhysicsManager> {
        let mut manager = PhysicsManager::new(self.universe.tick_length)
            .with_mode(self.universe.mode)
            .with_jidoka(self.jidoka.clone());

        for object in &self.objects {
            manager.add_object(object.build()?)?;
        }

        info!(
            "universe '{}': built {} object(s), tick_length={}, mode={:?}",
            self.universe.name,
            manager.len(),
            manager.tick_length(),
            manager.mode()
        );
        Ok(manager)
    }

    /// The configured spring links.
    #[must_use]
    pub fn build_links(&self) -> Vec<SpringLink> {
        self.links
            .iter()
            .map(|l| SpringLink::new(&l.a, &l.b, l.rest_length, l.stiffness))
            .collect()
    }
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            universe: UniverseMeta::default(),
            jidoka: JidokaConfig::default(),
            objects: Vec::new(),
            links: Vec::new(),
        }
    }
}

/// Programmatic scene builder.
#[derive(Debug, Default)]
pub struct UniverseConfigBuilder {
    name: Option<String>,
    tick_length: Option<f64>,
    mode: Option<TickMode>,
    jidoka: Option<JidokaConfig>,
    objects: Vec<ObjectConfig>,
    links: Vec<LinkConfig>,
}

impl UniverseConfigBuilder {
    /// Set the universe name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the default tick length in seconds.
    #[must_use]
    pub fn tick_length(mut self, tick_length: f64) -> Self {
        self.tick_length = Some(tick_length);
        self
    }

    /// Set the tick mode.
    #[must_use]
    pub fn mode(mut self, mode: TickMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the checked-mode configuration.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn jidoka(mut self, config: JidokaConfig) -> Self {
        self.jidoka = Some(config);
        self
    }

    /// Append an object.
    #[must_use]
    pub fn object(mut self, object: ObjectConfig) -> Self {
        self.objects.push(object);
        self
    }

    /// Append a spring link.
    #[must_use]
    pub fn link(mut self, link: LinkConfig) -> Self {
        self.links.push(link);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> UniverseConfig {
        let mut config = UniverseConfig::default();

        if let Some(name) = self.name {
            config.universe.name = name;
        }
        if let Some(tick_length) = self.tick_length {
            config.universe.tick_length = tick_length;
        }
        if let Some(mode) = self.mode {
            config.universe.mode = mode;
        }
        if let Some(jidoka) = self.jidoka {
            config.jidoka = jidoka;
        }
        config.objects = self.objects;
        config.links = self.links;

        config
    }
}

/// Universe settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UniverseMeta {
    /// Universe name, used in logs.
    #[serde(default)]
    pub name: String,
    /// Default seconds per tick.
    #[serde(default = "default_tick_length")]
    pub tick_length: f64,
    /// Tick mode.
    #[serde(default)]
    pub mode: TickMode,
}

impl Default for UniverseMeta {
    fn default() -> Self {
        Self {
            name: String::new(),
            tick_length: default_tick_length(),
            mode: TickMode::default(),
        }
    }
}

/// Initial state of one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ObjectConfig {
    /// Object name, unique within the universe.
    #[validate(length(min = 1))]
    pub name: String,
    /// Initial position (m).
    #[serde(default)]
    pub position: Vec3,
    /// Initial velocity (m/s).
    #[serde(default)]
    pub velocity: Vec3,
    /// Initial orientation (rad).
    #[serde(default)]
    pub orientation: Vec3,
    /// Initial angular velocity (rad/s).
    #[serde(default)]
    pub angular_velocity: Vec3,
    /// Mass (kg).
    #[serde(default = "default_one")]
    pub mass: f64,
    /// Moment of inertia (kg·m²).
    #[serde(default = "default_one")]
    pub moment_of_inertia: f64,
    /// Forces attached at start, in order.
    #[validate(nested)]
    #[serde(default)]
    pub forces: Vec<ForceConfig>,
}

impl ObjectConfig {
    /// An object at rest at the origin.
    #[must_use]
    pub fn new(name: impl Into<String>, mass: f64, moment_of_inertia: f64) -> Self {
        Self {
            name: name.into(),
            position: Vec3::zero(),
            velocity: Vec3::zero(),
            orientation: Vec3::zero(),
            angular_velocity: Vec3::zero(),
            mass,
            moment_of_inertia,
            forces: Vec::new(),
        }
    }

    fn validate_semantic(&self) -> SimResult<()> {
        if !self.mass.is_finite() || !self.moment_of_inertia.is_finite() {
            return Err(SimError::config(format!(
                "object '{}': mass and moment_of_inertia must be finite",
                self.name
            )));
        }
        let state = [self.position, self.velocity, self.orientation, self.angular_velocity];
        if !state.iter().all(Vec3::is_finite) {
            return Err(SimError::config(format!(
                "object '{}': initial state must be finite",
                self.name
            )));
        }
        for force in &self.forces {
            force.validate_semantic(&self.name)?;
        }
        Ok(())
    }

    /// Build the object, attaching its forces.
    ///
    /// # Errors
    ///
    /// Returns the engine's invariant errors.
    pub fn build(&self) -> SimResult<PhysicsObject> {
        let mut builder = PhysicsObject::builder(&self.name)
            .position(self.position)
            .velocity(self.velocity)
            .orientation(self.orientation)
            .angular_velocity(self.angular_velocity)
            .mass(self.mass)
            .moment_of_inertia(self.moment_of_inertia);

        for force in &self.forces {
            builder = builder.force(force.build(self.mass)?);
        }
        builder.build()
    }
}

/// One force on an object.
///
/// Either `gravity` (an acceleration, turned into a weight with the object's
/// mass) or `linear` (newtons), not both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ForceConfig {
    /// Force name, unique within the object.
    #[validate(length(min = 1))]
    pub name: String,
    /// Gravitational acceleration (m/s²).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f64>,
    /// Linear components (N).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linear: Option<Vec3>,
    /// Lever-arm distances (m).
    #[serde(default)]
    pub lever_arm: Vec3,
    /// Angles from the axis of rotation (rad).
    #[serde(default)]
    pub rot_angle: Vec3,
    /// Detach after one tick.
    #[serde(default)]
    pub instantaneous: bool,
}

impl ForceConfig {
    /// A plain linear force.
    #[must_use]
    pub fn linear(name: impl Into<String>, linear: Vec3) -> Self {
        Self {
            name: name.into(),
            gravity: None,
            linear: Some(linear),
            lever_arm: Vec3::zero(),
            rot_angle: Vec3::zero(),
            instantaneous: false,
        }
    }

    /// A weight under gravity `g`.
    #[must_use]
    pub fn gravity(name: impl Into<String>, g: f64) -> Self {
        Self {
            name: name.into(),
            gravity: Some(g),
            linear: None,
            lever_arm: Vec3::zero(),
            rot_angle: Vec3::zero(),
            instantaneous: false,
        }
    }

    fn validate_semantic(&self, object: &str) -> SimResult<()> {
        if self.gravity.is_some() && self.linear.is_some() {
            return Err(SimError::config(format!(
                "force '{object}.{}': set either gravity or linear, not both",
                self.name
            )));
        }
        let finite = self.gravity.map_or(true, f64::is_finite)
            && self.linear.map_or(true, |v| v.is_finite())
            && self.lever_arm.is_finite()
            && self.rot_angle.is_finite();
        if !finite {
            return Err(SimError::config(format!(
                "force '{object}.{}': values must be finite",
                self.name
            )));
        }
        Ok(())
    }

    /// Build the force for a parent of mass `parent_mass`.
    ///
    /// # Errors
    ///
    /// Returns `ZeroMass` for a gravity force on a massless parent.
    pub fn build(&self, parent_mass: f64) -> SimResult<Force> {
        let force = match self.gravity {
            Some(g) => Force::gravitational(&self.name, g, parent_mass)?,
            None => Force::from_linear(&self.name, self.linear.unwrap_or_default()),
        };
        let force = force.with_lever_arm(self.lever_arm).with_rot_angle(self.rot_angle);
        Ok(if self.instantaneous { force.instantaneous() } else { force })
    }
}

/// A spring link between two objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    /// First end.
    #[validate(length(min = 1))]
    pub a: String,
    /// Second end.
    #[validate(length(min = 1))]
    pub b: String,
    /// Rest length (m).
    #[serde(default)]
    pub rest_length: f64,
    /// Stiffness (N/m).
    #[serde(default = "default_one")]
    pub stiffness: f64,
}
