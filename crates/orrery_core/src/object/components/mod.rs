//! Built-in component implementations
//!
//! One concrete type per [`ComponentKind`](super::component::ComponentKind)
//! tag, except `Delegate` which only tags scripts.

mod animator;
mod collider;
mod mesh_renderer;
mod rigidbody;
mod sound_player;
mod state;
mod transform;

pub use animator::Animator;
pub use collider::Collider;
pub use mesh_renderer::MeshRenderer;
pub use rigidbody::Rigidbody;
pub use sound_player::SoundPlayer;
pub use state::StateComponent;
pub use transform::Transform;
