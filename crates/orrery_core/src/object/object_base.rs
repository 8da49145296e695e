//! The scene-graph node
//!
//! `ObjectBase` owns components (one per kind), scripts (buckets per
//! registered type), and the parent/child bookkeeping of the scene graph.
//! Parent/child links are stored as scene-local IDs plus a non-serialized
//! global-ID cache; both sides of a link are always updated together by
//! the owning scene.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::actor::Actor;
use super::component::{Component, ComponentKind, ComponentSortKey, TypedComponent};
use super::entity::{Entity, GlobalId, LocalComponentId, LocalId};
use super::script::{Script, TypedScript};

/// Object-type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ObjectKind {
    /// Plain object
    None,
    /// Camera object
    Camera,
    /// Light object
    Light,
    /// Observer object
    Observer,
    /// Text object
    Text,
}

/// Frame lifecycle phases in dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Early frame hook
    PreUpdate,
    /// Main frame hook
    Update,
    /// Pre-render hook
    PreRender,
    /// Render hook
    Render,
    /// Post-render hook
    PostRender,
    /// Fixed-step hook
    FixedUpdate,
    /// Late frame hook
    PostUpdate,
}

impl Phase {
    /// The full per-frame phase sequence
    pub const FRAME_ORDER: [Self; 7] = [
        Self::PreUpdate,
        Self::Update,
        Self::PreRender,
        Self::Render,
        Self::PostRender,
        Self::FixedUpdate,
        Self::PostUpdate,
    ];

    /// Whether components receive this phase (render phases are
    /// script-only; components are not renderables)
    fn reaches_components(self) -> bool {
        matches!(
            self,
            Self::PreUpdate | Self::Update | Self::FixedUpdate | Self::PostUpdate
        )
    }
}

/// A scene-graph node owning components, scripts, and child links
pub struct ObjectBase {
    entity: Entity,
    actor: Actor,
    kind: ObjectKind,
    active: bool,
    culled: bool,
    parent_local_id: Option<LocalId>,
    children_local_ids: Vec<LocalId>,
    components: BTreeMap<ComponentKind, Box<dyn Component>>,
    scripts: BTreeMap<String, Vec<Box<dyn Script>>>,

    // Non-serialized caches
    parent: Option<GlobalId>,
    children_cache: BTreeMap<LocalId, GlobalId>,
    assigned_component_ids: BTreeSet<LocalComponentId>,
    component_order: BTreeSet<ComponentSortKey>,
}

impl ObjectBase {
    /// Create a new object with the given name and type tag
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            entity: Entity::new(name),
            actor: Actor::new(),
            kind,
            active: true,
            culled: true,
            parent_local_id: None,
            children_local_ids: Vec::new(),
            components: BTreeMap::new(),
            scripts: BTreeMap::new(),
            parent: None,
            children_cache: BTreeMap::new(),
            assigned_component_ids: BTreeSet::new(),
            component_order: BTreeSet::new(),
        }
    }

    /// The object's identity
    pub fn id(&self) -> GlobalId {
        self.entity.id()
    }

    /// The object's entity
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// The object's entity, mutable
    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    /// Scene/layer placement
    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub(crate) fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    /// The object-type tag
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Whether the object participates in frame dispatch
    pub fn active(&self) -> bool {
        self.active
    }

    /// Enable or disable frame dispatch for this object
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether the object is subject to visibility culling
    pub fn culled(&self) -> bool {
        self.culled
    }

    /// Enable or disable visibility culling for this object
    pub fn set_culled(&mut self, culled: bool) {
        self.culled = culled;
    }

    // ---- Components ------------------------------------------------------

    /// Add a component of type `T`, or return the existing one
    ///
    /// Idempotent: at most one component per kind exists on an object, and
    /// re-adding a kind returns the already-attached instance without
    /// running `initialize` again.
    pub fn add_component<T: TypedComponent>(&mut self) -> &mut T {
        if !self.components.contains_key(&T::KIND) {
            let mut component = T::attach(self.entity.id());
            component.initialize();
            self.register_component(Box::new(component));
        }

        self.components
            .get_mut(&T::KIND)
            .and_then(|component| component.as_any_mut().downcast_mut::<T>())
            .expect("component registered under a mismatched kind")
    }

    /// Commit an already-constructed component to this object
    ///
    /// Rebinds ownership, assigns the lowest free local component ID, and
    /// records the sort key in the priority cache.
    pub(crate) fn register_component(&mut self, mut component: Box<dyn Component>) {
        component.state_mut().set_owner(Some(self.entity.id()));

        let mut idx: LocalComponentId = 0;
        loop {
            if idx == LocalComponentId::MAX {
                panic!("component ID overflow");
            }
            if !self.assigned_component_ids.contains(&idx) {
                break;
            }
            idx += 1;
        }
        component.state_mut().set_local_id(Some(idx));
        self.assigned_component_ids.insert(idx);

        self.component_order.insert(component.state().sort_key());
        self.components.insert(component.kind(), component);
    }

    /// Get the component of type `T`, if attached
    pub fn get_component<T: TypedComponent>(&self) -> Option<&T> {
        self.components
            .get(&T::KIND)
            .and_then(|component| component.as_any().downcast_ref::<T>())
    }

    /// Get the component of type `T` mutably, if attached
    pub fn get_component_mut<T: TypedComponent>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&T::KIND)
            .and_then(|component| component.as_any_mut().downcast_mut::<T>())
    }

    /// Get the component with the given kind tag, if attached
    pub fn component(&self, kind: ComponentKind) -> Option<&dyn Component> {
        self.components.get(&kind).map(|component| &**component)
    }

    /// Remove the component with the given kind tag
    ///
    /// Safe no-op returning `None` when no such component is attached.
    pub fn remove_component(&mut self, kind: ComponentKind) -> Option<Box<dyn Component>> {
        let component = self.components.remove(&kind)?;
        if let Some(id) = component.state().local_id() {
            self.assigned_component_ids.remove(&id);
        }
        self.component_order.remove(&component.state().sort_key());
        Some(component)
    }

    /// Iterate components in priority order (kind, then identity)
    ///
    /// Served from the sorted-key cache, so the order is not re-derived
    /// per call.
    pub fn components_in_order(&self) -> impl Iterator<Item = &dyn Component> {
        self.component_order
            .iter()
            .filter_map(move |key| self.components.get(&key.kind).map(|component| &**component))
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub(crate) fn components(&self) -> &BTreeMap<ComponentKind, Box<dyn Component>> {
        &self.components
    }

    pub(crate) fn components_mut(&mut self) -> &mut BTreeMap<ComponentKind, Box<dyn Component>> {
        &mut self.components
    }

    // ---- Scripts ---------------------------------------------------------

    /// Add a script of type `T`, or return the first existing instance
    ///
    /// Idempotent per type: when the bucket for `T` already holds an entry
    /// the first one is returned and `name` is ignored. Use
    /// [`add_named_script`](Self::add_named_script) to deliberately stack
    /// multiple instances of one type.
    pub fn add_script<T: TypedScript>(&mut self, name: &str) -> &mut T {
        let owner = self.entity.id();
        let bucket = self.scripts.entry(T::TYPE_NAME.to_owned()).or_default();
        if bucket.is_empty() {
            let mut script = T::spawn(owner);
            script.state_mut().set_instance_name(name);
            script.initialize();
            bucket.push(Box::new(script));
        }

        bucket
            .first_mut()
            .and_then(|script| script.as_any_mut().downcast_mut::<T>())
            .expect("script bucket holds a mismatched type")
    }

    /// Always append a fresh named instance of script type `T`
    pub fn add_named_script<T: TypedScript>(&mut self, name: &str) -> &mut T {
        let owner = self.entity.id();
        let bucket = self.scripts.entry(T::TYPE_NAME.to_owned()).or_default();
        let mut script = T::spawn(owner);
        script.state_mut().set_instance_name(name);
        script.initialize();
        bucket.push(Box::new(script));

        bucket
            .last_mut()
            .and_then(|script| script.as_any_mut().downcast_mut::<T>())
            .expect("script bucket holds a mismatched type")
    }

    /// Commit an already-constructed script to this object
    pub(crate) fn register_script(&mut self, mut script: Box<dyn Script>) {
        script.state_mut().set_owner(Some(self.entity.id()));
        if !script.state().entity().is_initialized() {
            script.initialize();
        }
        self.scripts
            .entry(script.type_name().to_owned())
            .or_default()
            .push(script);
    }

    /// Get a script of type `T`
    ///
    /// An empty `name` matches the first instance in the bucket; otherwise
    /// the instance name must match exactly.
    pub fn get_script<T: TypedScript>(&self, name: &str) -> Option<&T> {
        let bucket = self.scripts.get(T::TYPE_NAME)?;
        let script = if name.is_empty() {
            bucket.first()
        } else {
            bucket
                .iter()
                .find(|script| script.state().instance_name() == name)
        };
        script.and_then(|script| script.as_any().downcast_ref::<T>())
    }

    /// Get a script of type `T` mutably; same matching rules as `get_script`
    pub fn get_script_mut<T: TypedScript>(&mut self, name: &str) -> Option<&mut T> {
        let bucket = self.scripts.get_mut(T::TYPE_NAME)?;
        let script = if name.is_empty() {
            bucket.first_mut()
        } else {
            bucket
                .iter_mut()
                .find(|script| script.state().instance_name() == name)
        };
        script.and_then(|script| script.as_any_mut().downcast_mut::<T>())
    }

    /// Remove a script of type `T`
    ///
    /// An empty `name` removes the first instance in the bucket; otherwise
    /// removal requires an exact instance-name match. Safe no-op returning
    /// `None` when nothing matches.
    pub fn remove_script<T: TypedScript>(&mut self, name: &str) -> Option<Box<dyn Script>> {
        self.remove_script_by_type_name(T::TYPE_NAME, name)
    }

    /// Remove a script by registered type name; same rules as `remove_script`
    pub fn remove_script_by_type_name(
        &mut self,
        type_name: &str,
        name: &str,
    ) -> Option<Box<dyn Script>> {
        let bucket = self.scripts.get_mut(type_name)?;
        let index = if name.is_empty() {
            if bucket.is_empty() {
                None
            } else {
                Some(0)
            }
        } else {
            bucket
                .iter()
                .position(|script| script.state().instance_name() == name)
        }?;

        let script = bucket.remove(index);
        if bucket.is_empty() {
            self.scripts.remove(type_name);
        }
        Some(script)
    }

    /// Iterate every attached script across all buckets
    pub fn all_scripts(&self) -> impl Iterator<Item = &dyn Script> {
        self.scripts
            .values()
            .flat_map(|bucket| bucket.iter().map(|script| &**script))
    }

    /// Number of attached script instances across all buckets
    pub fn script_count(&self) -> usize {
        self.scripts.values().map(Vec::len).sum()
    }

    pub(crate) fn scripts(&self) -> &BTreeMap<String, Vec<Box<dyn Script>>> {
        &self.scripts
    }

    // ---- Parent/child links ---------------------------------------------

    /// The parent object's ID, if this object is attached to one
    pub fn parent(&self) -> Option<GlobalId> {
        self.parent_local_id.and_then(|_| self.parent)
    }

    /// The parent object's scene-local ID, if attached
    pub fn parent_local_id(&self) -> Option<LocalId> {
        self.parent_local_id
    }

    /// Scene-local IDs of attached children, in attach order
    pub fn children_local_ids(&self) -> &[LocalId] {
        &self.children_local_ids
    }

    /// Global IDs of attached children
    pub fn children(&self) -> Vec<GlobalId> {
        self.children_cache.values().copied().collect()
    }

    /// Resolve a child's global ID from its scene-local ID
    pub fn child(&self, local_id: LocalId) -> Option<GlobalId> {
        self.children_cache.get(&local_id).copied()
    }

    pub(crate) fn link_child(&mut self, local_id: LocalId, global_id: GlobalId) {
        self.children_local_ids.push(local_id);
        self.children_cache.insert(local_id, global_id);
    }

    pub(crate) fn unlink_child(&mut self, local_id: LocalId) -> bool {
        if self.children_cache.remove(&local_id).is_some() {
            self.children_local_ids.retain(|id| *id != local_id);
            true
        } else {
            false
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<(LocalId, GlobalId)>) {
        match parent {
            Some((local_id, global_id)) => {
                self.parent_local_id = Some(local_id);
                self.parent = Some(global_id);
            }
            None => {
                self.parent_local_id = None;
                self.parent = None;
            }
        }
    }

    // ---- Clone -----------------------------------------------------------

    /// Produce a copy with fresh identity
    ///
    /// Components and scripts are cloned through their clone hooks and
    /// rebound to the copy. Parent/child relationships are not copied:
    /// children need fresh local IDs once placed into a scene, so cloning
    /// a hierarchy and re-attaching children is the caller's
    /// responsibility.
    pub fn clone_object(&self) -> Self {
        let mut cloned = Self {
            entity: self.entity.clone_identity(),
            actor: Actor::new(),
            kind: self.kind,
            active: self.active,
            culled: self.culled,
            parent_local_id: None,
            children_local_ids: Vec::new(),
            components: BTreeMap::new(),
            scripts: BTreeMap::new(),
            parent: None,
            children_cache: BTreeMap::new(),
            assigned_component_ids: BTreeSet::new(),
            component_order: BTreeSet::new(),
        };
        cloned.entity.initialize();

        let owner = cloned.entity.id();
        for component in self.components.values() {
            cloned.register_component(component.clone_boxed(owner));
        }
        for bucket in self.scripts.values() {
            for script in bucket {
                cloned.register_script(script.clone_boxed(owner));
            }
        }

        cloned
    }

    // ---- Frame dispatch --------------------------------------------------

    /// Fan one lifecycle phase out to attached scripts and components
    ///
    /// Children are not recursed into here: top-level traversal is the
    /// owning layer's job, and parented objects are excluded from it
    /// unless dispatched explicitly.
    pub fn run_phase(&mut self, phase: Phase, dt: f32) {
        for bucket in self.scripts.values_mut() {
            for script in bucket.iter_mut() {
                if !script.state().active() {
                    continue;
                }
                match phase {
                    Phase::PreUpdate => script.pre_update(dt),
                    Phase::Update => script.update(dt),
                    Phase::PreRender => script.pre_render(dt),
                    Phase::Render => script.render(dt),
                    Phase::PostRender => script.post_render(dt),
                    Phase::FixedUpdate => script.fixed_update(dt),
                    Phase::PostUpdate => script.post_update(dt),
                }
            }
        }

        if !phase.reaches_components() {
            return;
        }

        for component in self.components.values_mut() {
            if !component.state().active() {
                continue;
            }
            match phase {
                Phase::PreUpdate => component.pre_update(dt),
                Phase::Update => component.update(dt),
                Phase::FixedUpdate => component.fixed_update(dt),
                Phase::PostUpdate => component.post_update(dt),
                _ => {}
            }
        }
    }

    // ---- Collision events ------------------------------------------------

    /// Forward a collision-start event to every active script
    pub fn on_collision_enter(&mut self, other: GlobalId) {
        debug_assert!(
            self.components.contains_key(&ComponentKind::Collider),
            "collision event delivered to an object without a collider"
        );
        for bucket in self.scripts.values_mut() {
            for script in bucket.iter_mut().filter(|script| script.state().active()) {
                script.on_collision_enter(other);
            }
        }
    }

    /// Forward a collision-continue event to every active script
    pub fn on_collision_continue(&mut self, other: GlobalId) {
        for bucket in self.scripts.values_mut() {
            for script in bucket.iter_mut().filter(|script| script.state().active()) {
                script.on_collision_continue(other);
            }
        }
    }

    /// Forward a collision-end event to every active script
    pub fn on_collision_exit(&mut self, other: GlobalId) {
        for bucket in self.scripts.values_mut() {
            for script in bucket.iter_mut().filter(|script| script.state().active()) {
                script.on_collision_exit(other);
            }
        }
    }

    // ---- Serialization hooks ---------------------------------------------

    /// Run pre-serialization hooks: own fields first, then components and
    /// scripts
    pub fn on_serialized(&mut self) {
        for component in self.components.values_mut() {
            component.on_serialized();
        }
        for bucket in self.scripts.values_mut() {
            for script in bucket.iter_mut() {
                script.on_serialized();
            }
        }
    }

    /// Run post-deserialization hooks and rebuild the non-persisted caches
    pub fn on_deserialized(&mut self) {
        let owner = self.entity.id();

        self.assigned_component_ids.clear();
        self.component_order.clear();
        for component in self.components.values_mut() {
            component.state_mut().set_owner(Some(owner));
            component.on_deserialized();
            if let Some(id) = component.state().local_id() {
                self.assigned_component_ids.insert(id);
            }
            self.component_order.insert(component.state().sort_key());
        }

        for bucket in self.scripts.values_mut() {
            for script in bucket.iter_mut() {
                script.state_mut().set_owner(Some(owner));
                script.on_deserialized();
            }
        }
    }

    /// Overwrite the persisted link lists, used when restoring from records
    pub(crate) fn set_links_raw(&mut self, parent: Option<LocalId>, children: Vec<LocalId>) {
        self.parent_local_id = parent;
        self.children_local_ids = children;
        self.parent = None;
        self.children_cache.clear();
    }

    /// Re-derive the parent/child pointer caches from the persisted local
    /// IDs, dropping links whose target no longer resolves
    pub(crate) fn rebuild_links(&mut self, resolve: &HashMap<LocalId, GlobalId>) {
        self.children_cache.clear();
        self.children_local_ids
            .retain(|local_id| resolve.contains_key(local_id));
        for local_id in &self.children_local_ids {
            if let Some(global_id) = resolve.get(local_id) {
                self.children_cache.insert(*local_id, *global_id);
            }
        }

        self.parent = self
            .parent_local_id
            .and_then(|local_id| resolve.get(&local_id).copied());
        if self.parent.is_none() {
            self.parent_local_id = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::component::ComponentState;
    use crate::object::components::{Collider, Transform};
    use crate::object::script::test_scripts::{CounterScript, ToggleScript};
    use std::any::Any;

    /// Component that counts its own initialize calls
    struct InitCounter {
        state: ComponentState,
        init_calls: u32,
    }

    impl Component for InitCounter {
        fn state(&self) -> &ComponentState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ComponentState {
            &mut self.state
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn clone_boxed(&self, owner: GlobalId) -> Box<dyn Component> {
            Box::new(Self {
                state: self.state.clone_for(owner),
                init_calls: 0,
            })
        }

        fn initialize(&mut self) {
            self.init_calls += 1;
            self.state.entity_mut().initialize();
        }
    }

    impl TypedComponent for InitCounter {
        const KIND: ComponentKind = ComponentKind::State;

        fn attach(owner: GlobalId) -> Self {
            Self {
                state: ComponentState::new(Self::KIND, owner),
                init_calls: 0,
            }
        }
    }

    #[test]
    fn test_add_component_is_idempotent() {
        let mut object = ObjectBase::new("player", ObjectKind::None);

        let first_id = object.add_component::<Transform>().state().id();
        let second_id = object.add_component::<Transform>().state().id();

        assert_eq!(first_id, second_id);
        assert_eq!(object.component_count(), 1);
        assert_eq!(
            object
                .components_in_order()
                .filter(|component| component.kind() == ComponentKind::Transform)
                .count(),
            1
        );
    }

    #[test]
    fn test_readding_does_not_reinitialize() {
        let mut object = ObjectBase::new("player", ObjectKind::None);

        object.add_component::<InitCounter>();
        let counter = object.add_component::<InitCounter>();
        assert_eq!(counter.init_calls, 1);
    }

    #[test]
    fn test_remove_component_is_safe_noop_when_absent() {
        let mut object = ObjectBase::new("player", ObjectKind::None);
        assert!(object.remove_component(ComponentKind::Collider).is_none());

        object.add_component::<Collider>();
        assert!(object.remove_component(ComponentKind::Collider).is_some());
        assert!(object.remove_component(ComponentKind::Collider).is_none());
    }

    #[test]
    fn test_component_order_follows_priority() {
        let mut object = ObjectBase::new("player", ObjectKind::None);
        object.add_component::<Collider>();
        object.add_component::<Transform>();

        let kinds: Vec<ComponentKind> = object
            .components_in_order()
            .map(|component| component.kind())
            .collect();
        assert_eq!(kinds, vec![ComponentKind::Transform, ComponentKind::Collider]);
    }

    #[test]
    fn test_script_buckets_are_independent_per_type() {
        let mut object = ObjectBase::new("player", ObjectKind::None);

        object.add_script::<CounterScript>("a");
        object.add_script::<ToggleScript>("b");
        assert_eq!(object.script_count(), 2);

        // Second add for the same type returns the same instance, even
        // with a different name argument
        let first_id = object.get_script::<CounterScript>("").unwrap().state().id();
        let again_id = object.add_script::<CounterScript>("other").state().id();
        assert_eq!(first_id, again_id);
        assert_eq!(object.script_count(), 2);
    }

    #[test]
    fn test_named_scripts_stack_and_remove_by_name() {
        let mut object = ObjectBase::new("player", ObjectKind::None);

        object.add_script::<CounterScript>("");
        object.add_named_script::<CounterScript>("second");
        assert_eq!(object.script_count(), 2);

        // Empty name removes the first entry in the bucket
        assert!(object.remove_script::<CounterScript>("").is_some());
        assert_eq!(object.script_count(), 1);
        assert!(object.get_script::<CounterScript>("second").is_some());

        // Absent bucket is a safe no-op
        assert!(object.remove_script::<ToggleScript>("").is_none());
    }

    #[test]
    fn test_run_phase_ticks_components() {
        let mut object = ObjectBase::new("player", ObjectKind::None);
        object.add_component::<Transform>();

        object.run_phase(Phase::PostUpdate, 0.016);
        let transform = object.get_component::<Transform>().unwrap();
        assert!(transform.state().ticked());
    }

    #[test]
    fn test_inactive_script_is_skipped() {
        let mut object = ObjectBase::new("player", ObjectKind::None);
        object.add_script::<CounterScript>("");
        object
            .get_script_mut::<CounterScript>("")
            .unwrap()
            .state_mut()
            .set_active(false);

        object.run_phase(Phase::Update, 0.016);
        assert_eq!(object.get_script::<CounterScript>("").unwrap().updates, 0);
    }

    #[test]
    fn test_clone_object_gets_fresh_identity_and_no_links() {
        let mut object = ObjectBase::new("source", ObjectKind::None);
        object.add_component::<Transform>();
        object.add_script::<CounterScript>("");
        object.link_child(4, GlobalId::next());

        let cloned = object.clone_object();
        assert_ne!(cloned.id(), object.id());
        assert_eq!(cloned.entity().name(), "source");
        assert!(cloned.children().is_empty());
        assert!(cloned.parent().is_none());
        assert_eq!(cloned.component_count(), 1);
        assert_eq!(cloned.script_count(), 1);

        // Cloned component is rebound to the clone
        let transform = cloned.get_component::<Transform>().unwrap();
        assert_eq!(transform.state().owner(), Some(cloned.id()));
    }

    #[test]
    fn test_clone_state_is_independent() {
        let mut object = ObjectBase::new("source", ObjectKind::None);
        object
            .add_component::<Transform>()
            .set_position(crate::foundation::math::Vec3::new(1.0, 0.0, 0.0));

        let mut cloned = object.clone_object();
        cloned
            .get_component_mut::<Transform>()
            .unwrap()
            .set_position(crate::foundation::math::Vec3::new(9.0, 9.0, 9.0));

        let original = object.get_component::<Transform>().unwrap();
        assert_eq!(
            original.position(),
            crate::foundation::math::Vec3::new(1.0, 0.0, 0.0)
        );
    }
}
