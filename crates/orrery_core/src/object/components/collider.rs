//! Collider component

use std::any::Any;

use crate::foundation::math::{Aabb, Vec3};
use crate::object::component::{Component, ComponentKind, ComponentState, TypedComponent};
use crate::object::entity::GlobalId;

/// Axis-aligned bounding volume used for broad-phase collision
#[derive(Debug)]
pub struct Collider {
    state: ComponentState,
    /// Bounding box in the owner's local space
    pub local_bounds: Aabb,
}

impl Collider {
    /// Replace the local-space bounding box
    pub fn set_local_bounds(&mut self, bounds: Aabb) {
        self.local_bounds = bounds;
    }

    /// World-space bound for an owner at the given position
    pub fn world_bounds(&self, position: Vec3) -> Aabb {
        Aabb::from_center_extents(position + self.local_bounds.center(), self.local_bounds.extents())
    }
}

impl Component for Collider {
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
            local_bounds: self.local_bounds,
        })
    }
}

impl TypedComponent for Collider {
    const KIND: ComponentKind = ComponentKind::Collider;

    fn attach(owner: GlobalId) -> Self {
        Self {
            state: ComponentState::new(Self::KIND, owner),
            local_bounds: Aabb::from_center_extents(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_bounds_offsets_local_center() {
        let mut collider = Collider::attach(GlobalId::next());
        collider.set_local_bounds(Aabb::from_center_extents(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
        ));

        let world = collider.world_bounds(Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(world.center(), Vec3::new(5.0, 1.0, 0.0));
        assert_eq!(world.extents(), Vec3::new(2.0, 2.0, 2.0));
    }
}
