//! Entity identity and lifecycle flags
//!
//! The entity is the base identity unit shared by objects, components,
//! and scripts: a process-unique ID, a display name, an optional metadata
//! path, and the `initialized`/`garbage` lifecycle flags.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter backing [`GlobalId`] allocation
static NEXT_GLOBAL_ID: AtomicU64 = AtomicU64::new(1);

/// Globally unique entity identifier, stable for the entity's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlobalId(u64);

impl GlobalId {
    /// Allocate the next unique identifier
    pub fn next() -> Self {
        Self(NEXT_GLOBAL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw numeric value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GlobalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Locally scoped actor identifier, assigned by the owning scene
pub type LocalId = u32;

/// Locally scoped component identifier, assigned by the owning object
pub type LocalComponentId = u32;

/// Base identity and lifecycle unit
#[derive(Debug, Clone)]
pub struct Entity {
    id: GlobalId,
    name: String,
    metadata_path: Option<PathBuf>,
    initialized: bool,
    garbage: bool,
}

impl Entity {
    /// Create a new entity with a fresh identity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GlobalId::next(),
            name: name.into(),
            metadata_path: None,
            initialized: false,
            garbage: false,
        }
    }

    /// Get the unique identifier
    pub fn id(&self) -> GlobalId {
        self.id
    }

    /// Get the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the display name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the metadata file path, if one was assigned
    pub fn metadata_path(&self) -> Option<&PathBuf> {
        self.metadata_path.as_ref()
    }

    /// Set the metadata file path
    pub fn set_metadata_path(&mut self, path: impl Into<PathBuf>) {
        self.metadata_path = Some(path.into());
    }

    /// Mark the entity initialized; idempotent after the first call
    pub fn initialize(&mut self) {
        self.initialized = true;
    }

    /// Whether `initialize` has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Soft-delete marker honored by the owning scene's cleanup sweep
    ///
    /// A garbage entity may still be transiently reachable through weak
    /// handles, so callers must re-check validity after resolving one.
    pub fn mark_garbage(&mut self) {
        self.garbage = true;
    }

    /// Whether the entity is marked for collection
    pub fn is_garbage(&self) -> bool {
        self.garbage
    }

    /// Fresh identity for a cloned entity: same name and metadata path,
    /// new ID, lifecycle flags reset
    pub fn clone_identity(&self) -> Self {
        Self {
            id: GlobalId::next(),
            name: self.name.clone(),
            metadata_path: self.metadata_path.clone(),
            initialized: false,
            garbage: false,
        }
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_ids_are_unique() {
        let a = GlobalId::next();
        let b = GlobalId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_entity_equality_is_identity() {
        let a = Entity::new("same");
        let b = Entity::new("same");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_clone_identity_resets_lifecycle() {
        let mut entity = Entity::new("source");
        entity.initialize();
        entity.mark_garbage();

        let cloned = entity.clone_identity();
        assert_ne!(cloned.id(), entity.id());
        assert_eq!(cloned.name(), "source");
        assert!(!cloned.is_initialized());
        assert!(!cloned.is_garbage());
    }
}
