//! Object model: entities, components, scripts, and scene-graph nodes

pub mod actor;
pub mod component;
pub mod components;
pub mod entity;
pub mod object_base;
pub mod script;

pub use actor::{Actor, LayerKind};
pub use component::{Component, ComponentKind, ComponentSortKey, ComponentState, TypedComponent};
pub use entity::{Entity, GlobalId, LocalComponentId, LocalId};
pub use object_base::{ObjectBase, ObjectKind, Phase};
pub use script::{Script, ScriptError, ScriptState, TypedScript};
