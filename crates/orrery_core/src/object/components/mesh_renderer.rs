//! Mesh renderer component

use std::any::Any;

use crate::object::component::{Component, ComponentKind, ComponentState, TypedComponent};
use crate::object::entity::GlobalId;

/// Mesh and material binding consumed by the external renderer
///
/// Resources are referenced by name; the resource manager resolves them
/// when the renderer gathers draw submissions.
#[derive(Debug)]
pub struct MeshRenderer {
    state: ComponentState,
    mesh_name: String,
    material_name: String,
}

impl MeshRenderer {
    /// Name of the bound mesh resource
    pub fn mesh_name(&self) -> &str {
        &self.mesh_name
    }

    /// Name of the bound material resource
    pub fn material_name(&self) -> &str {
        &self.material_name
    }

    /// Bind mesh and material resources by name
    pub fn set_resources(&mut self, mesh: impl Into<String>, material: impl Into<String>) {
        self.mesh_name = mesh.into();
        self.material_name = material.into();
    }
}

impl Component for MeshRenderer {
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
            mesh_name: self.mesh_name.clone(),
            material_name: self.material_name.clone(),
        })
    }
}

impl TypedComponent for MeshRenderer {
    const KIND: ComponentKind = ComponentKind::Renderer;

    fn attach(owner: GlobalId) -> Self {
        Self {
            state: ComponentState::new(Self::KIND, owner),
            mesh_name: String::new(),
            material_name: String::new(),
        }
    }
}
