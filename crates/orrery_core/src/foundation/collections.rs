//! Specialized collection types

pub use slotmap::{DefaultKey, SlotMap};

slotmap::new_key_type! {
    /// Stable arena key for scene-owned objects
    pub struct ObjectKey;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<DefaultKey, T>;

/// Arena holding the only strong references to scene objects
pub type ObjectArena<T> = SlotMap<ObjectKey, T>;
