//! Scene: the owner of all objects and the per-frame dispatch driver
//!
//! The scene is the arena: it holds the only strong references to objects,
//! and every intra-graph link (parent/child, octree membership, caches) is
//! a non-owning ID resolved through it. Layers order top-level traversal;
//! cross-cutting per-kind caches let type-scoped queries and the parallel
//! render gather avoid walking every object.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use thiserror::Error;

use crate::core::config::SceneConfig;
use crate::foundation::collections::{ObjectArena, ObjectKey};
use crate::foundation::math::Aabb;
use crate::object::components::{Collider, Transform};
use crate::object::{
    ComponentKind, Entity, GlobalId, LayerKind, LocalId, ObjectBase, ObjectKind, Phase,
    ScriptError, TypedComponent, TypedScript,
};
use crate::spatial::BoundsProvider;

use super::layer::Layer;

/// Errors raised by scene restoration
#[derive(Error, Debug)]
pub enum SceneError {
    /// Two objects claim the same scene-local actor ID
    #[error("local actor ID {0} already assigned")]
    DuplicateLocalId(LocalId),

    /// Script reconstruction failed
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Aggregate of layers driving per-frame dispatch
pub struct Scene {
    entity: Entity,
    config: SceneConfig,
    objects: ObjectArena<ObjectBase>,
    index: HashMap<GlobalId, ObjectKey>,
    layers: Vec<Layer>,
    assigned_local_ids: HashMap<LocalId, GlobalId>,

    // Read-concurrent caches for type-scoped queries; mutation happens
    // only from the owning update thread between frames
    component_cache: RwLock<HashMap<ComponentKind, BTreeMap<GlobalId, GlobalId>>>,
    script_cache: RwLock<HashMap<String, BTreeMap<GlobalId, GlobalId>>>,
}

impl Scene {
    /// Create an empty scene with default configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, SceneConfig::default())
    }

    /// Create an empty scene with custom configuration
    pub fn with_config(name: impl Into<String>, config: SceneConfig) -> Self {
        let mut entity = Entity::new(name);
        entity.initialize();
        Self {
            entity,
            config,
            objects: ObjectArena::with_key(),
            index: HashMap::new(),
            layers: LayerKind::ALL.iter().map(|kind| Layer::new(*kind)).collect(),
            assigned_local_ids: HashMap::new(),
            component_cache: RwLock::new(HashMap::new()),
            script_cache: RwLock::new(HashMap::new()),
        }
    }

    /// The scene's identity
    pub fn id(&self) -> GlobalId {
        self.entity.id()
    }

    /// The scene's display name
    pub fn name(&self) -> &str {
        self.entity.name()
    }

    /// The scene configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    // ---- Object lifecycle ------------------------------------------------

    /// Create a new object in the given layer and return its ID
    pub fn create_object(
        &mut self,
        name: impl Into<String>,
        kind: ObjectKind,
        layer: LayerKind,
    ) -> GlobalId {
        let mut object = ObjectBase::new(name, kind);
        object.entity_mut().initialize();
        self.add_object(object, layer)
    }

    /// Place an externally built object into the scene
    ///
    /// Assigns the lowest free scene-local actor ID and registers any
    /// already-attached components and scripts in the per-kind caches.
    pub fn add_object(&mut self, mut object: ObjectBase, layer: LayerKind) -> GlobalId {
        if self.objects.len() >= self.config.max_objects {
            log::warn!(
                "scene '{}' exceeds the configured object budget ({})",
                self.entity.name(),
                self.config.max_objects
            );
        }

        let id = object.id();
        object.actor_mut().set_layer(layer);
        object.actor_mut().set_in_scene(true);

        let local_id = self.next_local_id();
        object.actor_mut().set_local_id(local_id);
        self.assigned_local_ids.insert(local_id, id);

        let key = self.objects.insert(object);
        self.index.insert(id, key);
        self.layers[layer.index()].add(id, key);

        self.cache_existing_attachments(key, id);
        id
    }

    pub(crate) fn add_object_with_local_id(
        &mut self,
        mut object: ObjectBase,
        layer: LayerKind,
        local_id: LocalId,
    ) -> Result<GlobalId, SceneError> {
        if self.assigned_local_ids.contains_key(&local_id) {
            return Err(SceneError::DuplicateLocalId(local_id));
        }

        let id = object.id();
        object.actor_mut().set_layer(layer);
        object.actor_mut().set_in_scene(true);
        object.actor_mut().set_local_id(local_id);
        self.assigned_local_ids.insert(local_id, id);

        let key = self.objects.insert(object);
        self.index.insert(id, key);
        self.layers[layer.index()].add(id, key);

        self.cache_existing_attachments(key, id);
        Ok(id)
    }

    fn next_local_id(&self) -> LocalId {
        let mut id: LocalId = 0;
        loop {
            if id == LocalId::MAX {
                panic!("actor ID overflow");
            }
            if !self.assigned_local_ids.contains_key(&id) {
                return id;
            }
            id += 1;
        }
    }

    fn cache_existing_attachments(&mut self, key: ObjectKey, id: GlobalId) {
        let object = &self.objects[key];
        let mut components = self
            .component_cache
            .write()
            .expect("component cache lock poisoned");
        for component in object.components().values() {
            components
                .entry(component.kind())
                .or_default()
                .insert(component.state().id(), id);
        }
        drop(components);

        let mut scripts = self
            .script_cache
            .write()
            .expect("script cache lock poisoned");
        for (type_name, bucket) in object.scripts() {
            let entry = scripts.entry(type_name.clone()).or_default();
            for script in bucket {
                entry.insert(script.state().id(), id);
            }
        }
    }

    /// Remove an object from the scene
    ///
    /// Stale-safe: removing an ID that is not a member is a silent no-op.
    /// The object's caches, local ID, and parent/child links are released
    /// together with the arena entry.
    pub fn remove_object(&mut self, id: GlobalId) -> bool {
        let Some(key) = self.index.get(&id).copied() else {
            return false;
        };
        let layer = self.objects[key].actor().layer();
        let live = self.objects.contains_key(key);
        if self.layers[layer.index()].remove(id, live).is_none() {
            return false;
        }

        // Unlink from the graph before the strong reference goes away
        if let Some(parent_id) = self.objects[key].parent() {
            if let Some(local_id) = self.objects[key].actor().local_id() {
                self.detach_child(parent_id, local_id);
            }
        }
        let children = self.objects[key].children();
        for child_id in children {
            if let Some(child_key) = self.index.get(&child_id).copied() {
                self.objects[child_key].set_parent(None);
            }
        }

        let object = self.objects.remove(key).expect("arena entry vanished");
        self.index.remove(&id);
        if let Some(local_id) = object.actor().local_id() {
            self.assigned_local_ids.remove(&local_id);
        }

        let mut components = self
            .component_cache
            .write()
            .expect("component cache lock poisoned");
        for component in object.components().values() {
            if let Some(entry) = components.get_mut(&component.kind()) {
                entry.remove(&component.state().id());
            }
        }
        drop(components);

        let mut scripts = self
            .script_cache
            .write()
            .expect("script cache lock poisoned");
        for (type_name, bucket) in object.scripts() {
            if let Some(entry) = scripts.get_mut(type_name) {
                for script in bucket {
                    entry.remove(&script.state().id());
                }
            }
        }
        true
    }

    /// Look up an object by its global ID
    pub fn object(&self, id: GlobalId) -> Option<&ObjectBase> {
        self.index.get(&id).and_then(|key| self.objects.get(*key))
    }

    /// Look up an object mutably by its global ID
    pub fn object_mut(&mut self, id: GlobalId) -> Option<&mut ObjectBase> {
        let key = self.index.get(&id).copied()?;
        self.objects.get_mut(key)
    }

    /// Resolve a scene-local actor ID to its global ID
    pub fn object_by_local_id(&self, local_id: LocalId) -> Option<GlobalId> {
        self.assigned_local_ids.get(&local_id).copied()
    }

    /// Look up an object through a layer's cache-first path
    pub fn find_in_layer(&self, layer: LayerKind, id: GlobalId) -> Option<&ObjectBase> {
        let key = self.layers[layer.index()].find(id)?;
        self.objects.get(key)
    }

    /// The layer with the given tag
    pub fn layer(&self, kind: LayerKind) -> &Layer {
        &self.layers[kind.index()]
    }

    /// Iterate all objects in the scene
    pub fn objects(&self) -> impl Iterator<Item = &ObjectBase> {
        self.objects.values()
    }

    /// Number of objects in the scene
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    // ---- Components and scripts through the cache ------------------------

    /// Add a component of type `T` to an object, updating the per-kind cache
    ///
    /// Idempotent like [`ObjectBase::add_component`]. Returns false when
    /// the object is not a member of this scene.
    pub fn add_component<T: TypedComponent>(&mut self, id: GlobalId) -> bool {
        let Some(key) = self.index.get(&id).copied() else {
            return false;
        };
        let component_id = {
            let object = &mut self.objects[key];
            object.add_component::<T>().state().id()
        };
        self.component_cache
            .write()
            .expect("component cache lock poisoned")
            .entry(T::KIND)
            .or_default()
            .insert(component_id, id);
        true
    }

    /// Remove a component from an object, updating the per-kind cache
    ///
    /// Safe no-op when the object or the component is absent.
    pub fn remove_component(&mut self, id: GlobalId, kind: ComponentKind) {
        let Some(key) = self.index.get(&id).copied() else {
            return;
        };
        if let Some(component) = self.objects[key].remove_component(kind) {
            if let Some(entry) = self
                .component_cache
                .write()
                .expect("component cache lock poisoned")
                .get_mut(&kind)
            {
                entry.remove(&component.state().id());
            }
        }
    }

    /// Add a script of type `T` to an object, updating the per-type cache
    pub fn add_script<T: TypedScript>(&mut self, id: GlobalId, name: &str) -> bool {
        let Some(key) = self.index.get(&id).copied() else {
            return false;
        };
        let script_id = {
            let object = &mut self.objects[key];
            object.add_script::<T>(name).state().id()
        };
        self.script_cache
            .write()
            .expect("script cache lock poisoned")
            .entry(T::TYPE_NAME.to_owned())
            .or_default()
            .insert(script_id, id);
        true
    }

    /// Remove a script from an object, updating the per-type cache
    pub fn remove_script<T: TypedScript>(&mut self, id: GlobalId, name: &str) {
        let Some(key) = self.index.get(&id).copied() else {
            return;
        };
        if let Some(script) = self.objects[key].remove_script::<T>(name) {
            if let Some(entry) = self
                .script_cache
                .write()
                .expect("script cache lock poisoned")
                .get_mut(T::TYPE_NAME)
            {
                entry.remove(&script.state().id());
            }
        }
    }

    /// IDs of objects carrying a component of the given kind
    ///
    /// Served from the cache, safe for concurrent reads during a frame.
    pub fn objects_with_component(&self, kind: ComponentKind) -> Vec<GlobalId> {
        let cache = self
            .component_cache
            .read()
            .expect("component cache lock poisoned");
        let Some(entry) = cache.get(&kind) else {
            return Vec::new();
        };
        let mut owners: Vec<GlobalId> = entry.values().copied().collect();
        owners.sort();
        owners.dedup();
        owners
    }

    /// IDs of objects carrying a script of the given registered type
    pub fn objects_with_script(&self, type_name: &str) -> Vec<GlobalId> {
        let cache = self
            .script_cache
            .read()
            .expect("script cache lock poisoned");
        let Some(entry) = cache.get(type_name) else {
            return Vec::new();
        };
        let mut owners: Vec<GlobalId> = entry.values().copied().collect();
        owners.sort();
        owners.dedup();
        owners
    }

    // ---- Parent/child wiring ---------------------------------------------

    /// Attach `child_id` under `parent_id`
    ///
    /// Both sides are updated together: the child's local ID joins the
    /// parent's child list and the child's parent pointer is set. A child
    /// already attached elsewhere is detached from its previous parent
    /// first. Returns false when either object is missing, identical, or
    /// not yet placed in the scene.
    pub fn add_child(&mut self, parent_id: GlobalId, child_id: GlobalId) -> bool {
        if parent_id == child_id {
            return false;
        }
        let (Some(parent_key), Some(child_key)) = (
            self.index.get(&parent_id).copied(),
            self.index.get(&child_id).copied(),
        ) else {
            return false;
        };
        let Some(child_local) = self.objects[child_key].actor().local_id() else {
            return false;
        };
        let Some(parent_local) = self.objects[parent_key].actor().local_id() else {
            return false;
        };

        if let Some(previous) = self.objects[child_key].parent() {
            self.detach_child(previous, child_local);
        }

        let Some([parent, child]) = self.objects.get_disjoint_mut([parent_key, child_key]) else {
            return false;
        };
        parent.link_child(child_local, child_id);
        child.set_parent(Some((parent_local, parent_id)));
        true
    }

    /// Detach the child with the given local ID from `parent_id`
    ///
    /// Returns false and mutates nothing when the ID is not a child of
    /// that parent.
    pub fn detach_child(&mut self, parent_id: GlobalId, child_local: LocalId) -> bool {
        let Some(parent_key) = self.index.get(&parent_id).copied() else {
            return false;
        };
        let child_id = self.objects[parent_key].child(child_local);
        if !self.objects[parent_key].unlink_child(child_local) {
            return false;
        }
        if let Some(child_id) = child_id {
            if let Some(child_key) = self.index.get(&child_id).copied() {
                self.objects[child_key].set_parent(None);
            }
        }
        true
    }

    /// Find a child of `parent_id` by display name
    pub fn find_child(&self, parent_id: GlobalId, name: &str) -> Option<GlobalId> {
        let parent = self.object(parent_id)?;
        parent
            .children()
            .into_iter()
            .find(|child_id| {
                self.object(*child_id)
                    .is_some_and(|child| child.entity().name() == name)
            })
    }

    // ---- Clone -----------------------------------------------------------

    /// Clone an object and register the copy in the same layer
    ///
    /// Children are not cloned; re-attaching a cloned hierarchy is the
    /// caller's responsibility.
    pub fn clone_object(&mut self, id: GlobalId) -> Option<GlobalId> {
        let key = self.index.get(&id).copied()?;
        let layer = self.objects[key].actor().layer();
        let cloned = self.objects[key].clone_object();
        Some(self.add_object(cloned, layer))
    }

    // ---- Frame dispatch --------------------------------------------------

    /// Early frame phase across all layers
    pub fn pre_update(&mut self, dt: f32) {
        self.dispatch(Phase::PreUpdate, dt);
    }

    /// Main frame phase across all layers
    pub fn update(&mut self, dt: f32) {
        self.dispatch(Phase::Update, dt);
    }

    /// Pre-render phase across all layers
    pub fn pre_render(&mut self, dt: f32) {
        self.dispatch(Phase::PreRender, dt);
    }

    /// Render phase across all layers
    pub fn render(&mut self, dt: f32) {
        self.dispatch(Phase::Render, dt);
    }

    /// Post-render phase across all layers
    pub fn post_render(&mut self, dt: f32) {
        self.dispatch(Phase::PostRender, dt);
    }

    /// Fixed-step phase across all layers
    pub fn fixed_update(&mut self, dt: f32) {
        self.dispatch(Phase::FixedUpdate, dt);
    }

    /// Late frame phase across all layers, followed by the garbage sweep
    pub fn post_update(&mut self, dt: f32) {
        self.dispatch(Phase::PostUpdate, dt);
        if self.config.auto_cleanup {
            self.sweep_garbage();
        }
    }

    /// Run a whole frame in the fixed phase order
    pub fn run_frame(&mut self, dt: f32) {
        self.pre_update(dt);
        self.update(dt);
        self.pre_render(dt);
        self.render(dt);
        self.post_render(dt);
        self.fixed_update(dt);
        self.post_update(dt);
    }

    /// Walk the layers in order and fan one phase out to eligible objects
    ///
    /// Inactive objects are skipped, and so is any object that currently
    /// has a parent: children are excluded from top-level dispatch and
    /// only tick when dispatched explicitly.
    fn dispatch(&mut self, phase: Phase, dt: f32) {
        for layer in &self.layers {
            let keys: Vec<ObjectKey> = layer.entries().iter().map(|(_, key)| *key).collect();
            for key in keys {
                let Some(object) = self.objects.get_mut(key) else {
                    continue;
                };
                if !object.active() || object.parent().is_some() {
                    continue;
                }
                object.run_phase(phase, dt);
            }
        }
    }

    /// Remove every object whose entity carries the garbage flag
    pub fn sweep_garbage(&mut self) {
        let garbage: Vec<GlobalId> = self
            .objects
            .values()
            .filter(|object| object.entity().is_garbage())
            .map(ObjectBase::id)
            .collect();
        for id in garbage {
            self.remove_object(id);
        }
    }

    // ---- Deserialization support -----------------------------------------

    /// Rebuild every non-persisted cache after a restore
    ///
    /// Layer ID caches, the per-kind component/script caches, and the
    /// parent/child pointer caches are all derived state; the persisted
    /// local-ID lists are the source of truth for wiring.
    pub(crate) fn rebuild_caches(&mut self) {
        for layer in &self.layers {
            layer.rebuild_cache();
        }

        {
            let mut components = self
                .component_cache
                .write()
                .expect("component cache lock poisoned");
            let mut scripts = self
                .script_cache
                .write()
                .expect("script cache lock poisoned");
            components.clear();
            scripts.clear();
            for object in self.objects.values() {
                let id = object.id();
                for component in object.components().values() {
                    components
                        .entry(component.kind())
                        .or_default()
                        .insert(component.state().id(), id);
                }
                for (type_name, bucket) in object.scripts() {
                    let entry = scripts.entry(type_name.clone()).or_default();
                    for script in bucket {
                        entry.insert(script.state().id(), id);
                    }
                }
            }
        }

        let resolve: HashMap<LocalId, GlobalId> = self.assigned_local_ids.clone();
        for object in self.objects.values_mut() {
            object.rebuild_links(&resolve);
        }
    }
}

impl BoundsProvider for Scene {
    /// Resolve an object's world bound for the octree
    ///
    /// Garbage-flagged and missing objects read as expired. The collider's
    /// world bound wins when present; otherwise the transform-derived box
    /// is used. Objects without a transform have no spatial presence.
    fn bounds_of(&self, id: GlobalId) -> Option<Aabb> {
        let object = self.object(id)?;
        if object.entity().is_garbage() {
            return None;
        }
        let transform = object.get_component::<Transform>()?;
        match object.get_component::<Collider>() {
            Some(collider) => Some(collider.world_bounds(transform.position())),
            None => Some(transform.world_aabb()),
        }
    }
}
