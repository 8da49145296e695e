//! Scene layer: an ordered bucket of top-level objects
//!
//! The primary storage keeps insertion order for deterministic frame
//! traversal; a read-concurrent ID cache provides O(1) membership lookup
//! independent of it. The two structures always agree on membership, and
//! the cache is rebuilt after deserialization since it is not persisted.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::foundation::collections::ObjectKey;
use crate::object::{GlobalId, LayerKind};

/// A named bucket of top-level scene objects with a fast ID-lookup cache
pub struct Layer {
    kind: LayerKind,
    entries: Vec<(GlobalId, ObjectKey)>,
    cache: RwLock<HashMap<GlobalId, ObjectKey>>,
}

impl Layer {
    /// Create an empty layer with the given tag
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The layer tag
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Register an object in this layer
    ///
    /// The cache is checked first: a second registration of the same ID is
    /// a silent no-op, guarding against double-adds. Returns whether the
    /// object was newly added.
    pub(crate) fn add(&mut self, id: GlobalId, key: ObjectKey) -> bool {
        let mut cache = self.cache.write().expect("layer cache lock poisoned");
        if cache.contains_key(&id) {
            return false;
        }
        self.entries.push((id, key));
        cache.insert(id, key);
        true
    }

    /// Remove an object from this layer
    ///
    /// Stale-safe: when `live` is false the object already expired and
    /// neither the cache nor the primary storage is mutated. Returns the
    /// arena key when an entry was actually removed.
    pub(crate) fn remove(&mut self, id: GlobalId, live: bool) -> Option<ObjectKey> {
        let mut cache = self.cache.write().expect("layer cache lock poisoned");
        let key = *cache.get(&id)?;
        if !live {
            return None;
        }
        self.entries.retain(|(_, entry_key)| *entry_key != key);
        cache.remove(&id);
        Some(key)
    }

    /// Look up an object by ID
    ///
    /// Cache-first; on a miss falls back to a linear scan of the primary
    /// storage, covering the window right after deserialization before the
    /// cache has been rebuilt.
    pub fn find(&self, id: GlobalId) -> Option<ObjectKey> {
        if let Some(key) = self
            .cache
            .read()
            .expect("layer cache lock poisoned")
            .get(&id)
        {
            return Some(*key);
        }
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, key)| *key)
    }

    /// Primary storage in insertion order
    pub fn entries(&self) -> &[(GlobalId, ObjectKey)] {
        &self.entries
    }

    /// Iterate member IDs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = GlobalId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Number of member objects
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the layer holds no objects
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all cache entries; lookups fall back to the primary storage
    pub(crate) fn invalidate_cache(&self) {
        self.cache
            .write()
            .expect("layer cache lock poisoned")
            .clear();
    }

    /// Rebuild the ID cache from the primary storage
    pub(crate) fn rebuild_cache(&self) {
        let mut cache = self.cache.write().expect("layer cache lock poisoned");
        cache.clear();
        for (id, key) in &self.entries {
            cache.insert(*id, *key);
        }
    }
}
