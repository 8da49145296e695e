//! State machine component

use std::any::Any;

use crate::object::component::{Component, ComponentKind, ComponentState, TypedComponent};
use crate::object::entity::GlobalId;

/// Small integer state machine
///
/// Gameplay code assigns meaning to the values; the component tracks the
/// current and previous state so transitions are observable for one frame.
#[derive(Debug)]
pub struct StateComponent {
    state: ComponentState,
    current: i32,
    previous: i32,
}

impl StateComponent {
    /// Current state value
    pub fn current(&self) -> i32 {
        self.current
    }

    /// State value before the last transition
    pub fn previous(&self) -> i32 {
        self.previous
    }

    /// Transition to a new state value
    pub fn transition(&mut self, value: i32) {
        self.previous = self.current;
        self.current = value;
    }

    /// Whether the last transition changed the state
    pub fn changed(&self) -> bool {
        self.current != self.previous
    }

    pub(crate) fn restore(&mut self, current: i32, previous: i32) {
        self.current = current;
        self.previous = previous;
    }
}

impl Component for StateComponent {
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
            current: self.current,
            previous: self.previous,
        })
    }

    // Transitions settle at the end of the frame so `changed` holds for
    // exactly one frame.
    fn post_update(&mut self, _dt: f32) {
        self.previous = self.current;
        self.state.set_ticked(true);
    }
}

impl TypedComponent for StateComponent {
    const KIND: ComponentKind = ComponentKind::State;

    fn attach(owner: GlobalId) -> Self {
        Self {
            state: ComponentState::new(Self::KIND, owner),
            current: 0,
            previous: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_is_visible_until_post_update() {
        let mut state = StateComponent::attach(GlobalId::next());
        state.transition(2);
        assert!(state.changed());

        state.post_update(0.016);
        assert!(!state.changed());
        assert_eq!(state.current(), 2);
    }
}
