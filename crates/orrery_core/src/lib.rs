//! # Orrery Core
//!
//! The entity, scene, and spatial-partitioning core of a modular 3D game
//! engine.
//!
//! ## Features
//!
//! - **Object model**: entities, single-per-kind components, factory-built
//!   scripts, and scene-graph nodes with parent/child wiring
//! - **Scenes and layers**: arena-owned objects, ordered per-layer frame
//!   dispatch, read-concurrent lookup caches
//! - **Dynamic octree**: lazily-rebuilt spatial index with per-tick
//!   re-bucketing, node pruning, and a panic-rebuild recovery path
//! - **Archives**: record types and hook ordering for the serializer
//!   collaborator, with scripts rebuilt by name through the registry
//!
//! The graphics backend, physics solver, audio mixer, and resource manager
//! are external collaborators consumed through narrow interfaces: the
//! renderer reads the scene's caches and flags, the physics solver drives
//! the octree, and the resource manager resolves resources by name.
//!
//! ## Quick Start
//!
//! ```rust
//! use orrery_core::prelude::*;
//!
//! let mut scene = Scene::new("level_1");
//! let player = scene.create_object("player", ObjectKind::None, LayerKind::Default);
//! scene.add_component::<Transform>(player);
//!
//! let mut octree = Octree::new(OctreeConfig::default());
//! octree.enqueue(player);
//! octree.update(&scene);
//!
//! scene.run_frame(1.0 / 60.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod foundation;
pub mod object;
pub mod scene;
pub mod serialization;
pub mod spatial;

/// Common imports for engine users
pub mod prelude {
    pub use crate::core::config::{ConfigError, EngineConfig, OctreeConfig, SceneConfig};
    pub use crate::foundation::{
        math::{Aabb, Mat4, Quat, Vec3},
        time::{FixedTimestep, Timer},
    };
    pub use crate::object::{
        components::{
            Animator, Collider, MeshRenderer, Rigidbody, SoundPlayer, StateComponent, Transform,
        },
        Component, ComponentKind, Entity, GlobalId, LayerKind, ObjectBase, ObjectKind, Script,
        ScriptError, TypedComponent, TypedScript,
    };
    pub use crate::scene::{Layer, Scene, SceneError};
    pub use crate::serialization::{load_scene, save_scene, SceneRecord};
    pub use crate::spatial::{BoundsProvider, Octree};
}
