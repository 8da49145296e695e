//! Scene management
//!
//! The scene owns every object (the arena of strong references), groups
//! top-level objects into layers, and drives the per-frame lifecycle
//! dispatch. Layers carry a read-concurrent ID cache for O(1) lookup; the
//! scene carries per-kind component/script caches for type-scoped queries.

pub mod layer;
#[allow(clippy::module_inception)]
mod scene;

pub use layer::Layer;
pub use scene::{Scene, SceneError};
