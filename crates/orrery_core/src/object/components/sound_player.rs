//! Sound player component

use std::any::Any;

use crate::object::component::{Component, ComponentKind, ComponentState, TypedComponent};
use crate::object::entity::GlobalId;

/// Playback request state for the external audio backend
///
/// The backend polls `is_playing`/`sound_name` each frame and performs the
/// actual mixing; this component only records what should be audible.
#[derive(Debug)]
pub struct SoundPlayer {
    state: ComponentState,
    sound_name: String,
    playing: bool,
}

impl SoundPlayer {
    /// Name of the sound resource, resolved by the resource manager
    pub fn sound_name(&self) -> &str {
        &self.sound_name
    }

    /// Bind a sound resource by name
    pub fn set_sound(&mut self, name: impl Into<String>) {
        self.sound_name = name.into();
    }

    /// Request playback
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stop playback
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Whether playback is requested
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub(crate) fn restore(&mut self, name: String, playing: bool) {
        self.sound_name = name;
        self.playing = playing;
    }
}

impl Component for SoundPlayer {
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
            sound_name: self.sound_name.clone(),
            playing: false,
        })
    }
}

impl TypedComponent for SoundPlayer {
    const KIND: ComponentKind = ComponentKind::SoundPlayer;

    fn attach(owner: GlobalId) -> Self {
        Self {
            state: ComponentState::new(Self::KIND, owner),
            sound_name: String::new(),
            playing: false,
        }
    }
}
