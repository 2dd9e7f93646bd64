//! Universe orchestration.
//!
//! A [`PhysicsManager`] is one universe: an insertion-ordered set of uniquely
//! named [`PhysicsObject`]s and a clock. Each tick advances every object by
//! the same `dt`, one after another, with no interaction between them.
//!
//! Universes share nothing. Separate managers can be ticked in any order, or
//! on separate threads.

pub mod clock;
pub mod jidoka;
pub mod state;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

pub use clock::TickClock;
pub use jidoka::{JidokaConfig, JidokaGuard};
pub use state::{Kinematics, Vec3};

use crate::domains::physics::{ObjectId, PhysicsObject};
use crate::error::{NameScope, SimError, SimResult};

/// How much checking a universe does per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TickMode {
    /// Plain arithmetic, no inspection. What games normally want.
    #[default]
    Game,
    /// Reject non-finite tick lengths and non-finite resulting states.
    Checked,
}

/// A universe of independently moving objects.
#[derive(Debug, Clone)]
pub struct PhysicsManager {
    clock: TickClock,
    mode: TickMode,
    guard: JidokaGuard,
    objects: IndexMap<String, PhysicsObject>,
}

#[derive(Serialize)]
struct UniverseSnapshot<'a> {
    elapsed: f64,
    tick_count: u64,
    objects: Vec<&'a PhysicsObject>,
}

impl PhysicsManager {
    /// Create an empty universe in [`TickMode::Game`].
    ///
    /// `tick_length` may be fractional, zero or negative.
    #[must_use]
    pub fn new(tick_length: f64) -> Self {
        Self {
            clock: TickClock::new(tick_length),
            mode: TickMode::default(),
            guard: JidokaGuard::default(),
            objects: IndexMap::new(),
        }
    }

    /// Set the tick mode.
    #[must_use]
    pub fn with_mode(mut self, mode: TickMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the checks run in [`TickMode::Checked`].
    #[must_use]
    pub fn with_jidoka(mut self, config: JidokaConfig) -> Self {
        self.guard = JidokaGuard::new(config);
        self
    }

    /// Checks run in [`TickMode::Checked`].
    #[must_use]
    pub const fn jidoka(&self) -> &JidokaConfig {
        self.guard.config()
    }

    /// Current tick mode.
    #[must_use]
    pub const fn mode(&self) -> TickMode {
        self.mode
    }

    /// Change the tick mode.
    pub fn set_mode(&mut self, mode: TickMode) {
        self.mode = mode;
    }

    /// Default seconds per tick.
    #[must_use]
    pub const fn tick_length(&self) -> f64 {
        self.clock.tick_length()
    }

    /// Change the default seconds per tick.
    pub fn set_tick_length(&mut self, tick_length: f64) {
        self.clock.set_tick_length(tick_length);
    }

    /// Signed seconds this universe has been ticked through.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Completed non-zero ticks.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.clock.tick_count()
    }

    // ===== Registry =====

    /// Add an object at the end of the tick order.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DuplicateName`] if an object with the same name is
    /// already in this universe. The existing object is left untouched.
    pub fn add_object(&mut self, object: PhysicsObject) -> SimResult<ObjectId> {
        if self.objects.contains_key(object.name()) {
            return Err(SimError::duplicate_name(NameScope::Object, object.name()));
        }
        let id = object.id();
        debug!("universe: added '{}'", object.name());
        self.objects.insert(object.name().to_string(), object);
        Ok(id)
    }

    /// Remove the object with the given identity, if present.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<PhysicsObject> {
        let index = self.objects.values().position(|o| o.id() == id)?;
        let (name, object) = self.objects.shift_remove_index(index)?;
        debug!("universe: removed '{name}'");
        Some(object)
    }

    /// Remove the object with the given name, if present.
    pub fn remove_object_by_name(&mut self, name: &str) -> Option<PhysicsObject> {
        let object = self.objects.shift_remove(name)?;
        debug!("universe: removed '{name}'");
        Some(object)
    }

    /// Remove every object, returning them in tick order so they can be
    /// moved to another universe.
    pub fn clear(&mut self) -> Vec<PhysicsObject> {
        debug!("universe: cleared {} object(s)", self.objects.len());
        self.objects.drain(..).map(|(_, object)| object).collect()
    }

    /// Object by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PhysicsObject> {
        self.objects.get(name)
    }

    /// Mutable object by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut PhysicsObject> {
        self.objects.get_mut(name)
    }

    /// Whether an object with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Objects in tick order.
    pub fn objects(&self) -> impl Iterator<Item = &PhysicsObject> {
        self.objects.values()
    }

    /// Mutable objects in tick order.
    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut PhysicsObject> {
        self.objects.values_mut()
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the universe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ===== Ticking =====

    /// Let one tick pass for every object, in insertion order.
    ///
    /// `None` uses the configured tick length. Zero and negative lengths are
    /// valid: zero changes nothing and negative runs time backwards.
    ///
    /// # Errors
    ///
    /// Stops at the first object whose tick fails and returns that error.
    /// Objects earlier in the order keep their new state, the failing object
    /// and those after it keep their old state, and the clock does not move.
    pub fn tick(&mut self, dt: Option<f64>) -> SimResult<()> {
        let dt = self.clock.resolve(dt);
        let guard = match self.mode {
            TickMode::Checked => Some(&self.guard),
            TickMode::Game => None,
        };
        if let Some(guard) = guard {
            guard.check_dt(dt)?;
        }

        for object in self.objects.values_mut() {
            object.tick_guarded(dt, guard)?;
        }

        self.clock.advance(dt);
        trace!(
            "universe: tick {} done (dt={dt}, elapsed={})",
            self.clock.tick_count(),
            self.clock.elapsed()
        );
        Ok(())
    }

    /// Run `count` ticks of the configured length.
    ///
    /// # Errors
    ///
    /// Stops at the first failing tick.
    pub fn run_ticks(&mut self, count: usize) -> SimResult<()> {
        for _ in 0..count {
            self.tick(None)?;
        }
        Ok(())
    }

    /// Tick a single object with this universe's tick length and mode.
    ///
    /// The object need not belong to this universe, and the universe clock
    /// does not move.
    ///
    /// # Errors
    ///
    /// Returns the object's tick error.
    pub fn tick_object(&self, object: &mut PhysicsObject) -> SimResult<()> {
        let dt = self.clock.tick_length();
        match self.mode {
            TickMode::Checked => {
                self.guard.check_dt(dt)?;
                object.tick_guarded(dt, Some(&self.guard))
            }
            TickMode::Game => object.tick(dt),
        }
    }

    /// Tick one owned object by name. Returns `Ok(false)` if there is no
    /// such object.
    ///
    /// # Errors
    ///
    /// Returns the object's tick error.
    pub fn tick_object_by_name(&mut self, name: &str) -> SimResult<bool> {
        let dt = self.clock.tick_length();
        let guard = match self.mode {
            TickMode::Checked => Some(&self.guard),
            TickMode::Game => None,
        };
        let Some(object) = self.objects.get_mut(name) else {
            return Ok(false);
        };
        if let Some(guard) = guard {
            guard.check_dt(dt)?;
        }
        object.tick_guarded(dt, guard)?;
        Ok(true)
    }

    /// Serialize the clock and every object to JSON.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if a value cannot be encoded.
    pub fn snapshot_json(&self) -> SimResult<String> {
        let snapshot = UniverseSnapshot {
            elapsed: self.clock.elapsed(),
            tick_count: self.clock.tick_count(),
            objects: self.objects.values().collect(),
        };
        Ok(serde_json::to_string(&snapshot)?)
    }
}

impl Default for PhysicsManager {
    fn default() -> Self {
        Self::new(1.0)
    }
}
