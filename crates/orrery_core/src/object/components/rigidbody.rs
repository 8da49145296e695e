//! Rigidbody component

use std::any::Any;

use crate::foundation::math::Vec3;
use crate::object::component::{Component, ComponentKind, ComponentState, TypedComponent};
use crate::object::entity::GlobalId;

/// Dynamics state consumed by the external physics solver
///
/// The solver owns integration; this component only carries the state the
/// solver reads and writes between fixed steps.
#[derive(Debug)]
pub struct Rigidbody {
    state: ComponentState,
    /// Linear velocity in world units per second
    pub velocity: Vec3,
    /// Whether gravity applies to this body
    pub gravity: bool,
    /// Kinematic bodies are moved by gameplay code, not the solver
    pub kinematic: bool,
}

impl Rigidbody {
    /// Set the linear velocity
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }
}

impl Component for Rigidbody {
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
            velocity: self.velocity,
            gravity: self.gravity,
            kinematic: self.kinematic,
        })
    }
}

impl TypedComponent for Rigidbody {
    const KIND: ComponentKind = ComponentKind::Rigidbody;

    fn attach(owner: GlobalId) -> Self {
        Self {
            state: ComponentState::new(Self::KIND, owner),
            velocity: Vec3::zeros(),
            gravity: true,
            kinematic: false,
        }
    }
}
