//! Component trait and shared component state
//!
//! A component is a single-type-per-owner behavior/data module attached to
//! an object. The closed [`ComponentKind`] enum provides cheap type
//! identity without reflection, and [`ComponentSortKey`] defines the total
//! order (kind first, then identity) used for batch processing.

use std::any::Any;

use super::entity::{Entity, GlobalId, LocalComponentId};

/// Closed set of component types
///
/// Declaration order is the batch-processing priority: transforms are
/// updated before everything that reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum ComponentKind {
    /// Position, rotation, and scale
    Transform,
    /// Bounding volume for collision
    Collider,
    /// Dynamics state consumed by the physics solver
    Rigidbody,
    /// Integer state machine
    State,
    /// Sound playback request state
    SoundPlayer,
    /// Animation clip playback state
    Animator,
    /// Mesh/material binding for the renderer
    Renderer,
    /// Script-as-component tag; never stored in the component map
    Delegate,
}

impl ComponentKind {
    /// Human-readable name of the kind
    pub fn name(self) -> &'static str {
        match self {
            Self::Transform => "Transform",
            Self::Collider => "Collider",
            Self::Rigidbody => "Rigidbody",
            Self::State => "State",
            Self::SoundPlayer => "SoundPlayer",
            Self::Animator => "Animator",
            Self::Renderer => "Renderer",
            Self::Delegate => "Delegate",
        }
    }
}

/// Total order key for components: kind first, then identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentSortKey {
    /// Component type tag
    pub kind: ComponentKind,
    /// Component identity
    pub id: GlobalId,
}

/// State shared by every component implementation
#[derive(Debug, Clone)]
pub struct ComponentState {
    entity: Entity,
    kind: ComponentKind,
    owner: Option<GlobalId>,
    local_id: Option<LocalComponentId>,
    active: bool,
    ticked: bool,
}

impl ComponentState {
    /// Create component state bound to an owner
    pub fn new(kind: ComponentKind, owner: GlobalId) -> Self {
        Self {
            entity: Entity::new(kind.name()),
            kind,
            owner: Some(owner),
            local_id: None,
            active: true,
            ticked: false,
        }
    }

    /// The component's own identity
    pub fn id(&self) -> GlobalId {
        self.entity.id()
    }

    /// The component's entity
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// The component's entity, mutable
    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    /// The component type tag
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// The owning object's ID, if currently owned
    pub fn owner(&self) -> Option<GlobalId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<GlobalId>) {
        self.owner = owner;
    }

    /// Local component ID assigned by the owner on attach
    pub fn local_id(&self) -> Option<LocalComponentId> {
        self.local_id
    }

    pub(crate) fn set_local_id(&mut self, id: Option<LocalComponentId>) {
        self.local_id = id;
    }

    /// Whether the component participates in frame dispatch
    pub fn active(&self) -> bool {
        self.active
    }

    /// Enable or disable frame dispatch for this component
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether the component has been processed this frame
    pub fn ticked(&self) -> bool {
        self.ticked
    }

    pub(crate) fn set_ticked(&mut self, ticked: bool) {
        self.ticked = ticked;
    }

    /// Sort key combining kind and identity
    pub fn sort_key(&self) -> ComponentSortKey {
        ComponentSortKey {
            kind: self.kind,
            id: self.id(),
        }
    }

    /// Rebind the state to a fresh identity and owner, used by clone
    pub(crate) fn clone_for(&self, owner: GlobalId) -> Self {
        Self {
            entity: self.entity.clone_identity(),
            kind: self.kind,
            owner: Some(owner),
            local_id: None,
            active: self.active,
            ticked: false,
        }
    }
}

/// Attachable behavior/data unit owned by an object
///
/// Implementations store a [`ComponentState`] and expose it through
/// `state`/`state_mut`; the lifecycle defaults fan out from there. The
/// default `post_update` marks the component ticked, signalling one frame
/// processed.
pub trait Component: Any + Send + Sync {
    /// Shared component state
    fn state(&self) -> &ComponentState;

    /// Shared component state, mutable
    fn state_mut(&mut self) -> &mut ComponentState;

    /// Downcast support
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Polymorphic clone hook; the copy keeps data but gets fresh identity
    fn clone_boxed(&self, owner: GlobalId) -> Box<dyn Component>;

    /// The component type tag
    fn kind(&self) -> ComponentKind {
        self.state().kind()
    }

    /// Called once by the owner after construction
    fn initialize(&mut self) {
        self.state_mut().entity_mut().initialize();
    }

    /// Early per-frame hook
    fn pre_update(&mut self, _dt: f32) {}

    /// Main per-frame hook
    fn update(&mut self, _dt: f32) {}

    /// Fixed-step hook driven by the physics timeline
    fn fixed_update(&mut self, _dt: f32) {}

    /// Late per-frame hook; marks the component ticked by default
    fn post_update(&mut self, _dt: f32) {
        self.state_mut().set_ticked(true);
    }

    /// Called before the component's fields are persisted
    fn on_serialized(&mut self) {}

    /// Called after the component's fields are restored
    fn on_deserialized(&mut self) {}
}

/// Statically typed component constructor used by `add_component`
pub trait TypedComponent: Component + Sized {
    /// The kind tag all instances of this type carry
    const KIND: ComponentKind;

    /// Construct an instance bound to the given owner
    fn attach(owner: GlobalId) -> Self;
}
