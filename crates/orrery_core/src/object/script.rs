//! Script trait and factory registry
//!
//! Scripts are user-behavior units attached to an object. Unlike
//! components, several script instances may coexist on one object, keyed
//! by registered type name and per-instance name. The process-wide factory
//! registry maps type names to constructors so deserialization can rebuild
//! script instances without an open type switch.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use thiserror::Error;

use super::entity::{Entity, GlobalId};

/// Errors raised by script construction
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    /// No factory registered under the requested type name
    #[error("no script factory registered for type '{0}'")]
    UnknownType(String),
}

/// State shared by every script implementation
#[derive(Debug, Clone)]
pub struct ScriptState {
    entity: Entity,
    owner: Option<GlobalId>,
    instance_name: String,
    active: bool,
}

impl ScriptState {
    /// Create script state bound to an owner
    pub fn new(type_name: &str, owner: GlobalId) -> Self {
        Self {
            entity: Entity::new(type_name),
            owner: Some(owner),
            instance_name: String::new(),
            active: true,
        }
    }

    /// The script's own identity
    pub fn id(&self) -> GlobalId {
        self.entity.id()
    }

    /// The script's entity
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// The script's entity, mutable
    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    /// The owning object's ID, if currently owned
    pub fn owner(&self) -> Option<GlobalId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<GlobalId>) {
        self.owner = owner;
    }

    /// User-supplied instance name; empty for the default slot
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// Set the user-supplied instance name
    pub fn set_instance_name(&mut self, name: impl Into<String>) {
        self.instance_name = name.into();
    }

    /// Whether the script participates in frame dispatch
    pub fn active(&self) -> bool {
        self.active
    }

    /// Enable or disable frame dispatch for this script
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Rebind the state to a fresh identity and owner, used by clone
    pub(crate) fn clone_for(&self, owner: GlobalId) -> Self {
        Self {
            entity: self.entity.clone_identity(),
            owner: Some(owner),
            instance_name: self.instance_name.clone(),
            active: self.active,
        }
    }
}

/// User-behavior unit attached to an object
pub trait Script: Any + Send + Sync {
    /// Shared script state
    fn state(&self) -> &ScriptState;

    /// Shared script state, mutable
    fn state_mut(&mut self) -> &mut ScriptState;

    /// Downcast support
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The registered type name this script was constructed under
    fn type_name(&self) -> &'static str;

    /// Polymorphic clone hook; deep-copies behavior state and rebinds the
    /// copy to a new owner
    fn clone_boxed(&self, owner: GlobalId) -> Box<dyn Script>;

    /// Called once by the owner after construction
    fn initialize(&mut self) {
        self.state_mut().entity_mut().initialize();
    }

    /// Early per-frame hook
    fn pre_update(&mut self, _dt: f32) {}

    /// Main per-frame hook
    fn update(&mut self, _dt: f32) {}

    /// Pre-render hook
    fn pre_render(&mut self, _dt: f32) {}

    /// Render hook
    fn render(&mut self, _dt: f32) {}

    /// Post-render hook
    fn post_render(&mut self, _dt: f32) {}

    /// Fixed-step hook driven by the physics timeline
    fn fixed_update(&mut self, _dt: f32) {}

    /// Late per-frame hook
    fn post_update(&mut self, _dt: f32) {}

    /// Collision started against the other object's collider
    fn on_collision_enter(&mut self, _other: GlobalId) {}

    /// Collision persists against the other object's collider
    fn on_collision_continue(&mut self, _other: GlobalId) {}

    /// Collision ended against the other object's collider
    fn on_collision_exit(&mut self, _other: GlobalId) {}

    /// Called before the script's fields are persisted
    fn on_serialized(&mut self) {}

    /// Called after the script's fields are restored
    fn on_deserialized(&mut self) {}
}

/// Statically typed script constructor used by `add_script` and the registry
pub trait TypedScript: Script + Sized {
    /// The registry key for this script type
    const TYPE_NAME: &'static str;

    /// Construct an instance bound to the given owner
    fn spawn(owner: GlobalId) -> Self;
}

/// Constructor closure stored in the factory registry
pub type ScriptCtor = fn(GlobalId) -> Box<dyn Script>;

static SCRIPT_FACTORY: OnceLock<RwLock<HashMap<String, ScriptCtor>>> = OnceLock::new();

fn factory() -> &'static RwLock<HashMap<String, ScriptCtor>> {
    SCRIPT_FACTORY.get_or_init(|| RwLock::new(HashMap::new()))
}

fn construct<T: TypedScript>(owner: GlobalId) -> Box<dyn Script> {
    Box::new(T::spawn(owner))
}

/// Register a script type in the process-wide factory
///
/// Must run during the startup phase, before any deserialization.
/// Re-registering the same type is a no-op.
pub fn register<T: TypedScript>() {
    factory()
        .write()
        .expect("script factory lock poisoned")
        .insert(T::TYPE_NAME.to_owned(), construct::<T>);
}

/// Construct a script instance from its registered type name
pub fn instantiate(type_name: &str, owner: GlobalId) -> Result<Box<dyn Script>, ScriptError> {
    let ctor = factory()
        .read()
        .expect("script factory lock poisoned")
        .get(type_name)
        .copied()
        .ok_or_else(|| ScriptError::UnknownType(type_name.to_owned()))?;
    Ok(ctor(owner))
}

/// Names of all registered script types, sorted
pub fn registered_types() -> Vec<String> {
    let mut names: Vec<String> = factory()
        .read()
        .expect("script factory lock poisoned")
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}

#[cfg(test)]
pub(crate) mod test_scripts {
    use super::*;

    /// Counter script used across the crate's tests
    #[derive(Debug)]
    pub struct CounterScript {
        state: ScriptState,
        /// Frames seen by `update`
        pub updates: u32,
        /// Collisions seen by `on_collision_enter`
        pub collisions: u32,
    }

    impl Script for CounterScript {
        fn state(&self) -> &ScriptState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ScriptState {
            &mut self.state
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn type_name(&self) -> &'static str {
            Self::TYPE_NAME
        }

        fn clone_boxed(&self, owner: GlobalId) -> Box<dyn Script> {
            Box::new(Self {
                state: self.state.clone_for(owner),
                updates: self.updates,
                collisions: self.collisions,
            })
        }

        fn update(&mut self, _dt: f32) {
            self.updates += 1;
        }

        fn on_collision_enter(&mut self, _other: GlobalId) {
            self.collisions += 1;
        }
    }

    impl TypedScript for CounterScript {
        const TYPE_NAME: &'static str = "CounterScript";

        fn spawn(owner: GlobalId) -> Self {
            Self {
                state: ScriptState::new(Self::TYPE_NAME, owner),
                updates: 0,
                collisions: 0,
            }
        }
    }

    /// Second script type for bucket-independence tests
    #[derive(Debug)]
    pub struct ToggleScript {
        state: ScriptState,
        /// Flipped by every update
        pub flag: bool,
    }

    impl Script for ToggleScript {
        fn state(&self) -> &ScriptState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ScriptState {
            &mut self.state
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn type_name(&self) -> &'static str {
            Self::TYPE_NAME
        }

        fn clone_boxed(&self, owner: GlobalId) -> Box<dyn Script> {
            Box::new(Self {
                state: self.state.clone_for(owner),
                flag: self.flag,
            })
        }

        fn update(&mut self, _dt: f32) {
            self.flag = !self.flag;
        }
    }

    impl TypedScript for ToggleScript {
        const TYPE_NAME: &'static str = "ToggleScript";

        fn spawn(owner: GlobalId) -> Self {
            Self {
                state: ScriptState::new(Self::TYPE_NAME, owner),
                flag: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_scripts::CounterScript;
    use super::*;

    #[test]
    fn test_registry_instantiates_by_name() {
        register::<CounterScript>();

        let owner = GlobalId::next();
        let script = instantiate("CounterScript", owner).unwrap();
        assert_eq!(script.type_name(), "CounterScript");
        assert_eq!(script.state().owner(), Some(owner));
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let result = instantiate("NoSuchScript", GlobalId::next());
        assert_eq!(
            result.err(),
            Some(ScriptError::UnknownType("NoSuchScript".to_owned()))
        );
    }

    #[test]
    fn test_reregistration_is_idempotent() {
        register::<CounterScript>();
        register::<CounterScript>();
        assert!(registered_types().contains(&"CounterScript".to_owned()));
    }
}
