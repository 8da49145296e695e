//! Actor placement: scene, layer, and local ID assignment

use super::entity::LocalId;

/// Named bucket tags for top-level scene objects
///
/// Declaration order is the per-frame dispatch order across layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum LayerKind {
    /// Unassigned
    None,
    /// Cameras
    Camera,
    /// Light sources
    Light,
    /// Regular gameplay objects
    Default,
    /// Environment geometry
    Environment,
    /// Skybox objects
    Skybox,
    /// UI overlays
    Ui,
}

impl LayerKind {
    /// All layers in dispatch order
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::Camera,
        Self::Light,
        Self::Default,
        Self::Environment,
        Self::Skybox,
        Self::Ui,
    ];

    /// Position of this layer in the dispatch order
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .expect("layer kind missing from dispatch order")
    }
}

/// Scene/layer placement on top of the entity identity
///
/// The local ID is only meaningful once the actor has been assigned to a
/// scene; assignment without a scene is refused, matching the rule that
/// local IDs come from the scene's ID allocator.
#[derive(Debug, Clone)]
pub struct Actor {
    layer: LayerKind,
    local_id: Option<LocalId>,
    in_scene: bool,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor {
    /// Create an unplaced actor
    pub fn new() -> Self {
        Self {
            layer: LayerKind::None,
            local_id: None,
            in_scene: false,
        }
    }

    /// The layer this actor belongs to
    pub fn layer(&self) -> LayerKind {
        self.layer
    }

    pub(crate) fn set_layer(&mut self, layer: LayerKind) {
        self.layer = layer;
    }

    /// The scene-local actor ID, if assigned
    pub fn local_id(&self) -> Option<LocalId> {
        self.local_id
    }

    /// Assign the local ID; ignored unless the actor is in a scene
    pub(crate) fn set_local_id(&mut self, id: LocalId) {
        if self.in_scene {
            self.local_id = Some(id);
        }
    }

    /// Whether the actor currently belongs to a scene
    pub fn in_scene(&self) -> bool {
        self.in_scene
    }

    pub(crate) fn set_in_scene(&mut self, in_scene: bool) {
        self.in_scene = in_scene;
        if !in_scene {
            self.local_id = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_id_requires_scene() {
        let mut actor = Actor::new();
        actor.set_local_id(7);
        assert_eq!(actor.local_id(), None);

        actor.set_in_scene(true);
        actor.set_local_id(7);
        assert_eq!(actor.local_id(), Some(7));
    }

    #[test]
    fn test_leaving_scene_clears_local_id() {
        let mut actor = Actor::new();
        actor.set_in_scene(true);
        actor.set_local_id(3);

        actor.set_in_scene(false);
        assert_eq!(actor.local_id(), None);
    }
}
