//! Archive records for persisting entity graphs
//!
//! The wire format belongs to the serializer collaborator; this module
//! fixes the contract: which fields persist, and the order of the
//! serialization hooks around them. `on_serialized` runs on every object
//! (and its components and scripts) before its record is produced;
//! `on_deserialized` runs after restore and rebuilds everything that is
//! derived state — layer caches, per-kind caches, parent/child pointers,
//! component ownership. Scripts are re-created through the factory
//! registry from their stored type names.
//!
//! RON is the reference encoding used by the tests.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use thiserror::Error;

use crate::foundation::math::{self, Aabb, Vec3};
use crate::object::components::{
    Animator, Collider, MeshRenderer, Rigidbody, SoundPlayer, StateComponent, Transform,
};
use crate::object::{
    script, Component, ComponentKind, ComponentState, GlobalId, LayerKind, LocalComponentId,
    LocalId, ObjectBase, ObjectKind, TypedComponent,
};
use crate::scene::{Scene, SceneError};

/// Errors raised while encoding or decoding archives
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Restoring the object graph failed
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// RON encoding failed
    #[error("RON encode error: {0}")]
    Encode(#[from] ron::Error),

    /// RON decoding failed
    #[error("RON decode error: {0}")]
    Decode(#[from] ron::error::SpannedError),
}

/// Persisted form of a whole scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneRecord {
    /// Scene display name
    pub name: String,
    /// One record per layer, in dispatch order
    pub layers: Vec<LayerRecord>,
}

/// Persisted form of one layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerRecord {
    /// Layer tag
    pub kind: LayerKind,
    /// Member objects in insertion order
    pub objects: Vec<ObjectRecord>,
}

/// Persisted form of one object
///
/// Parent/child wiring is stored as scene-local IDs; the global-ID caches
/// are rebuilt on restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Display name
    pub name: String,
    /// Optional metadata file path
    pub metadata_path: Option<PathBuf>,
    /// Object-type tag
    pub kind: ObjectKind,
    /// Scene-local actor ID
    pub local_id: LocalId,
    /// Parent's scene-local ID, if attached
    pub parent_local_id: Option<LocalId>,
    /// Children's scene-local IDs, in attach order
    pub children_local_ids: Vec<LocalId>,
    /// Frame-dispatch eligibility flag
    pub active: bool,
    /// Visibility-culling flag
    pub culled: bool,
    /// Attached components
    pub components: Vec<ComponentRecord>,
    /// Attached scripts
    pub scripts: Vec<ScriptRecord>,
}

/// Persisted form of one component, a closed tagged union
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ComponentRecord {
    /// Transform component fields
    Transform {
        /// Owner-local component ID
        local_id: LocalComponentId,
        /// Dispatch eligibility
        active: bool,
        /// Position, rotation, scale
        transform: math::Transform,
    },
    /// Collider component fields
    Collider {
        /// Owner-local component ID
        local_id: LocalComponentId,
        /// Dispatch eligibility
        active: bool,
        /// Local-space bounding box
        local_bounds: Aabb,
    },
    /// Rigidbody component fields
    Rigidbody {
        /// Owner-local component ID
        local_id: LocalComponentId,
        /// Dispatch eligibility
        active: bool,
        /// Linear velocity
        velocity: Vec3,
        /// Gravity participation
        gravity: bool,
        /// Kinematic flag
        kinematic: bool,
    },
    /// State machine component fields
    State {
        /// Owner-local component ID
        local_id: LocalComponentId,
        /// Dispatch eligibility
        active: bool,
        /// Current state value
        current: i32,
        /// Previous state value
        previous: i32,
    },
    /// Sound player component fields
    SoundPlayer {
        /// Owner-local component ID
        local_id: LocalComponentId,
        /// Dispatch eligibility
        active: bool,
        /// Bound sound resource name
        sound_name: String,
        /// Playback request flag
        playing: bool,
    },
    /// Animator component fields
    Animator {
        /// Owner-local component ID
        local_id: LocalComponentId,
        /// Dispatch eligibility
        active: bool,
        /// Bound clip name
        clip_name: String,
        /// Playhead position in seconds
        playhead: f32,
        /// Whether the playhead advances
        playing: bool,
    },
    /// Mesh renderer component fields
    Renderer {
        /// Owner-local component ID
        local_id: LocalComponentId,
        /// Dispatch eligibility
        active: bool,
        /// Bound mesh resource name
        mesh_name: String,
        /// Bound material resource name
        material_name: String,
    },
}

/// Persisted form of one script instance
///
/// Only the registry type name, instance name, and active flag persist;
/// behavior state restoration is the script's own `on_deserialized`
/// business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptRecord {
    /// Factory registry type name
    pub type_name: String,
    /// User-supplied instance name
    pub instance_name: String,
    /// Dispatch eligibility
    pub active: bool,
}

// ---- Saving ---------------------------------------------------------------

/// Produce the archive records for a scene
///
/// Runs every object's `on_serialized` hook (which fans out to components
/// and scripts) before reading its fields.
pub fn save_scene(scene: &mut Scene) -> SceneRecord {
    let mut layers = Vec::new();
    for kind in LayerKind::ALL {
        let ids: Vec<GlobalId> = scene.layer(kind).iter().collect();
        let mut objects = Vec::new();
        for id in ids {
            if let Some(object) = scene.object_mut(id) {
                object.on_serialized();
                objects.push(object_record(object));
            }
        }
        layers.push(LayerRecord { kind, objects });
    }
    SceneRecord {
        name: scene.name().to_owned(),
        layers,
    }
}

fn object_record(object: &ObjectBase) -> ObjectRecord {
    let components = object
        .components()
        .values()
        .filter_map(|component| component_record(&**component))
        .collect();
    let scripts = object
        .scripts()
        .values()
        .flatten()
        .map(|script| ScriptRecord {
            type_name: script.type_name().to_owned(),
            instance_name: script.state().instance_name().to_owned(),
            active: script.state().active(),
        })
        .collect();

    ObjectRecord {
        name: object.entity().name().to_owned(),
        metadata_path: object.entity().metadata_path().cloned(),
        kind: object.kind(),
        local_id: object
            .actor()
            .local_id()
            .expect("serialized object without a scene-local ID"),
        parent_local_id: object.parent_local_id(),
        children_local_ids: object.children_local_ids().to_vec(),
        active: object.active(),
        culled: object.culled(),
        components,
        scripts,
    }
}

fn component_record(component: &dyn Component) -> Option<ComponentRecord> {
    let local_id = component.state().local_id().unwrap_or(0);
    let active = component.state().active();
    match component.kind() {
        ComponentKind::Transform => {
            component
                .as_any()
                .downcast_ref::<Transform>()
                .map(|transform| ComponentRecord::Transform {
                    local_id,
                    active,
                    transform: transform.local.clone(),
                })
        }
        ComponentKind::Collider => {
            component
                .as_any()
                .downcast_ref::<Collider>()
                .map(|collider| ComponentRecord::Collider {
                    local_id,
                    active,
                    local_bounds: collider.local_bounds,
                })
        }
        ComponentKind::Rigidbody => {
            component
                .as_any()
                .downcast_ref::<Rigidbody>()
                .map(|rigidbody| ComponentRecord::Rigidbody {
                    local_id,
                    active,
                    velocity: rigidbody.velocity,
                    gravity: rigidbody.gravity,
                    kinematic: rigidbody.kinematic,
                })
        }
        ComponentKind::State => {
            component
                .as_any()
                .downcast_ref::<StateComponent>()
                .map(|state| ComponentRecord::State {
                    local_id,
                    active,
                    current: state.current(),
                    previous: state.previous(),
                })
        }
        ComponentKind::SoundPlayer => {
            component
                .as_any()
                .downcast_ref::<SoundPlayer>()
                .map(|player| ComponentRecord::SoundPlayer {
                    local_id,
                    active,
                    sound_name: player.sound_name().to_owned(),
                    playing: player.is_playing(),
                })
        }
        ComponentKind::Animator => {
            component
                .as_any()
                .downcast_ref::<Animator>()
                .map(|animator| ComponentRecord::Animator {
                    local_id,
                    active,
                    clip_name: animator.clip_name().to_owned(),
                    playhead: animator.playhead(),
                    playing: animator.is_playing(),
                })
        }
        ComponentKind::Renderer => {
            component
                .as_any()
                .downcast_ref::<MeshRenderer>()
                .map(|renderer| ComponentRecord::Renderer {
                    local_id,
                    active,
                    mesh_name: renderer.mesh_name().to_owned(),
                    material_name: renderer.material_name().to_owned(),
                })
        }
        ComponentKind::Delegate => None,
    }
}

// ---- Loading --------------------------------------------------------------

/// Restore a scene from archive records
///
/// Objects keep their persisted scene-local IDs. After every object is
/// placed, the `on_deserialized` hooks run and the non-persisted caches
/// are rebuilt, including the parent/child wiring resolved through the
/// local-ID table.
pub fn load_scene(record: SceneRecord) -> Result<Scene, ArchiveError> {
    let mut scene = Scene::new(record.name);
    let mut restored = Vec::new();

    for layer_record in record.layers {
        for object_record in layer_record.objects {
            let local_id = object_record.local_id;
            let object = restore_object(object_record)?;
            let id = scene
                .add_object_with_local_id(object, layer_record.kind, local_id)
                .map_err(ArchiveError::Scene)?;
            restored.push(id);
        }
    }

    for id in restored {
        if let Some(object) = scene.object_mut(id) {
            object.on_deserialized();
        }
    }
    scene.rebuild_caches();
    Ok(scene)
}

fn restore_object(record: ObjectRecord) -> Result<ObjectBase, ArchiveError> {
    let mut object = ObjectBase::new(record.name, record.kind);
    if let Some(path) = record.metadata_path {
        object.entity_mut().set_metadata_path(path);
    }
    object.entity_mut().initialize();
    object.set_active(record.active);
    object.set_culled(record.culled);
    object.set_links_raw(record.parent_local_id, record.children_local_ids);

    let owner = object.id();
    for component_record in record.components {
        let component = instantiate_component(component_record, owner);
        object.components_mut().insert(component.kind(), component);
    }
    for script_record in record.scripts {
        let mut script = script::instantiate(&script_record.type_name, owner)
            .map_err(SceneError::Script)?;
        script
            .state_mut()
            .set_instance_name(script_record.instance_name);
        script.state_mut().set_active(script_record.active);
        object.register_script(script);
    }
    Ok(object)
}

fn restore_state(state: &mut ComponentState, local_id: LocalComponentId, active: bool) {
    state.set_local_id(Some(local_id));
    state.set_active(active);
    state.entity_mut().initialize();
}

fn instantiate_component(record: ComponentRecord, owner: GlobalId) -> Box<dyn Component> {
    match record {
        ComponentRecord::Transform {
            local_id,
            active,
            transform,
        } => {
            let mut component = Transform::attach(owner);
            component.local = transform;
            restore_state(component.state_mut(), local_id, active);
            Box::new(component)
        }
        ComponentRecord::Collider {
            local_id,
            active,
            local_bounds,
        } => {
            let mut component = Collider::attach(owner);
            component.local_bounds = local_bounds;
            restore_state(component.state_mut(), local_id, active);
            Box::new(component)
        }
        ComponentRecord::Rigidbody {
            local_id,
            active,
            velocity,
            gravity,
            kinematic,
        } => {
            let mut component = Rigidbody::attach(owner);
            component.velocity = velocity;
            component.gravity = gravity;
            component.kinematic = kinematic;
            restore_state(component.state_mut(), local_id, active);
            Box::new(component)
        }
        ComponentRecord::State {
            local_id,
            active,
            current,
            previous,
        } => {
            let mut component = StateComponent::attach(owner);
            component.restore(current, previous);
            restore_state(component.state_mut(), local_id, active);
            Box::new(component)
        }
        ComponentRecord::SoundPlayer {
            local_id,
            active,
            sound_name,
            playing,
        } => {
            let mut component = SoundPlayer::attach(owner);
            component.restore(sound_name, playing);
            restore_state(component.state_mut(), local_id, active);
            Box::new(component)
        }
        ComponentRecord::Animator {
            local_id,
            active,
            clip_name,
            playhead,
            playing,
        } => {
            let mut component = Animator::attach(owner);
            component.restore(clip_name, playhead, playing);
            restore_state(component.state_mut(), local_id, active);
            Box::new(component)
        }
        ComponentRecord::Renderer {
            local_id,
            active,
            mesh_name,
            material_name,
        } => {
            let mut component = MeshRenderer::attach(owner);
            component.set_resources(mesh_name, material_name);
            restore_state(component.state_mut(), local_id, active);
            Box::new(component)
        }
    }
}

// ---- Reference encoding ---------------------------------------------------

/// Encode a scene as RON text
pub fn scene_to_ron(scene: &mut Scene) -> Result<String, ArchiveError> {
    let record = save_scene(scene);
    Ok(ron::ser::to_string(&record)?)
}

/// Decode a scene from RON text
pub fn scene_from_ron(text: &str) -> Result<Scene, ArchiveError> {
    let record: SceneRecord = ron::de::from_str(text)?;
    load_scene(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::script::Script;
    use crate::object::script::test_scripts::CounterScript;

    fn build_scene() -> (Scene, GlobalId, GlobalId) {
        script::register::<CounterScript>();

        let mut scene = Scene::new("level_1");
        let parent = scene.create_object("parent", ObjectKind::None, LayerKind::Default);
        let child = scene.create_object("child", ObjectKind::None, LayerKind::Default);

        scene.add_component::<Transform>(parent);
        scene
            .object_mut(parent)
            .unwrap()
            .get_component_mut::<Transform>()
            .unwrap()
            .set_position(Vec3::new(3.0, 4.0, 5.0));
        scene.add_component::<Collider>(parent);
        scene.add_script::<CounterScript>(parent, "brain");

        scene.add_child(parent, child);
        (scene, parent, child)
    }

    #[test]
    fn test_round_trip_restores_membership_and_wiring() {
        let (mut scene, parent, child) = build_scene();
        let parent_local = scene.object(parent).unwrap().actor().local_id().unwrap();
        let child_local = scene.object(child).unwrap().actor().local_id().unwrap();

        let text = scene_to_ron(&mut scene).unwrap();
        let restored = scene_from_ron(&text).unwrap();

        assert_eq!(restored.name(), "level_1");
        assert_eq!(restored.object_count(), 2);

        // Wiring is re-resolved through the preserved local IDs
        let new_parent = restored.object_by_local_id(parent_local).unwrap();
        let new_child = restored.object_by_local_id(child_local).unwrap();
        assert_eq!(restored.object(new_child).unwrap().parent(), Some(new_parent));
        assert!(restored
            .object(new_parent)
            .unwrap()
            .children()
            .contains(&new_child));

        // Layer cache works after the rebuild
        assert!(restored
            .find_in_layer(LayerKind::Default, new_parent)
            .is_some());
    }

    #[test]
    fn test_round_trip_restores_component_data_and_caches() {
        let (mut scene, parent, _) = build_scene();
        let parent_local = scene.object(parent).unwrap().actor().local_id().unwrap();

        let text = scene_to_ron(&mut scene).unwrap();
        let restored = scene_from_ron(&text).unwrap();
        let new_parent = restored.object_by_local_id(parent_local).unwrap();

        let object = restored.object(new_parent).unwrap();
        let transform = object.get_component::<Transform>().unwrap();
        assert_eq!(transform.position(), Vec3::new(3.0, 4.0, 5.0));
        assert!(object.get_component::<Collider>().is_some());

        // Scripts come back through the factory registry
        let script = object.get_script::<CounterScript>("brain").unwrap();
        assert_eq!(script.state().instance_name(), "brain");

        // Per-kind caches are rebuilt
        assert_eq!(
            restored.objects_with_component(ComponentKind::Transform),
            vec![new_parent]
        );
        assert_eq!(
            restored.objects_with_script("CounterScript"),
            vec![new_parent]
        );
    }

    #[test]
    fn test_unknown_script_type_fails_restore() {
        let record = SceneRecord {
            name: "broken".to_owned(),
            layers: vec![LayerRecord {
                kind: LayerKind::Default,
                objects: vec![ObjectRecord {
                    name: "obj".to_owned(),
                    metadata_path: None,
                    kind: ObjectKind::None,
                    local_id: 0,
                    parent_local_id: None,
                    children_local_ids: Vec::new(),
                    active: true,
                    culled: true,
                    components: Vec::new(),
                    scripts: vec![ScriptRecord {
                        type_name: "NeverRegistered".to_owned(),
                        instance_name: String::new(),
                        active: true,
                    }],
                }],
            }],
        };

        assert!(load_scene(record).is_err());
    }
}
