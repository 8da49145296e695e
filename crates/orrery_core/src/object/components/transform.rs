//! Transform component

use std::any::Any;

use crate::foundation::math::{self, Aabb, Vec3};
use crate::object::component::{Component, ComponentKind, ComponentState, TypedComponent};
use crate::object::entity::GlobalId;

/// Position, rotation, and scale of an object
#[derive(Debug)]
pub struct Transform {
    state: ComponentState,
    /// Local transform data
    pub local: math::Transform,
}

impl Transform {
    /// Current world position
    pub fn position(&self) -> Vec3 {
        self.local.position
    }

    /// Move the object to a new world position
    pub fn set_position(&mut self, position: Vec3) {
        self.local.position = position;
    }

    /// Uniform or per-axis scale factors
    pub fn scale(&self) -> Vec3 {
        self.local.scale
    }

    /// World-space bounding box derived from position and scale
    ///
    /// Used as the fallback bound for objects without a collider.
    pub fn world_aabb(&self) -> Aabb {
        Aabb::from_center_extents(self.local.position, self.local.scale * 0.5)
    }
}

impl Component for Transform {
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
            local: self.local.clone(),
        })
    }
}

impl TypedComponent for Transform {
    const KIND: ComponentKind = ComponentKind::Transform;

    fn attach(owner: GlobalId) -> Self {
        Self {
            state: ComponentState::new(Self::KIND, owner),
            local: math::Transform::identity(),
        }
    }
}
