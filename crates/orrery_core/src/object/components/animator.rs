//! Animator component

use std::any::Any;

use crate::object::component::{Component, ComponentKind, ComponentState, TypedComponent};
use crate::object::entity::GlobalId;

/// Animation clip playback state
#[derive(Debug)]
pub struct Animator {
    state: ComponentState,
    clip_name: String,
    playhead: f32,
    playing: bool,
}

impl Animator {
    /// Name of the bound animation clip
    pub fn clip_name(&self) -> &str {
        &self.clip_name
    }

    /// Bind a clip by name and rewind the playhead
    pub fn set_clip(&mut self, name: impl Into<String>) {
        self.clip_name = name.into();
        self.playhead = 0.0;
    }

    /// Start advancing the playhead
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stop advancing the playhead
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Current playhead position in seconds
    pub fn playhead(&self) -> f32 {
        self.playhead
    }

    /// Whether the playhead advances each update
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub(crate) fn restore(&mut self, clip_name: String, playhead: f32, playing: bool) {
        self.clip_name = clip_name;
        self.playhead = playhead;
        self.playing = playing;
    }
}

impl Component for Animator {
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
            clip_name: self.clip_name.clone(),
            playhead: self.playhead,
            playing: self.playing,
        })
    }

    fn update(&mut self, dt: f32) {
        if self.playing {
            self.playhead += dt;
        }
    }
}

impl TypedComponent for Animator {
    const KIND: ComponentKind = ComponentKind::Animator;

    fn attach(owner: GlobalId) -> Self {
        Self {
            state: ComponentState::new(Self::KIND, owner),
            clip_name: String::new(),
            playhead: 0.0,
            playing: false,
        }
    }
}
