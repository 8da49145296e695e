//! Dynamic, lazily-rebuilt octree over weakly-referenced objects
//!
//! Nodes live in an index-addressed arena: parent links are indices, child
//! slots are lazily filled, and an octant bitset tracks which slots are
//! active. Objects are held as [`GlobalId`]s and resolved through a
//! [`BoundsProvider`] on every pass; an ID the provider no longer knows is
//! an expired weak reference and is dropped silently.
//!
//! Every object directly held by a node must have its bounding volume
//! fully contained by that node's box. When movement breaks containment
//! the object is promoted to the nearest containing ancestor, and if even
//! the root cannot take it the tree performs a panic rebuild: collect
//! every live object, discard the structure, and rebuild from the flat
//! set. The rebuild is the designed recovery path, expensive but
//! correctness-preserving.

use std::collections::VecDeque;

use bitflags::bitflags;

use crate::core::config::OctreeConfig;
use crate::foundation::math::{octant_bounds, Aabb, Vec3};
use crate::object::GlobalId;

/// Resolves an object's current world bound
///
/// Returning `None` means the weak reference expired; the octree treats
/// the object as absent, never as an error.
pub trait BoundsProvider {
    /// The current world-space bound of the object, if it is still alive
    fn bounds_of(&self, id: GlobalId) -> Option<Aabb>;
}

bitflags! {
    /// Bitset marking which of the eight child slots are active
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct OctantMask: u8 {
        /// Top-left-front child
        const TOP_LEFT_FRONT = 1 << 0;
        /// Top-left-back child
        const TOP_LEFT_BACK = 1 << 1;
        /// Top-right-front child
        const TOP_RIGHT_FRONT = 1 << 2;
        /// Top-right-back child
        const TOP_RIGHT_BACK = 1 << 3;
        /// Bottom-left-front child
        const BOTTOM_LEFT_FRONT = 1 << 4;
        /// Bottom-left-back child
        const BOTTOM_LEFT_BACK = 1 << 5;
        /// Bottom-right-front child
        const BOTTOM_RIGHT_FRONT = 1 << 6;
        /// Bottom-right-back child
        const BOTTOM_RIGHT_BACK = 1 << 7;
    }
}

impl OctantMask {
    fn from_index(octant: usize) -> Self {
        Self::from_bits_truncate(1 << octant)
    }
}

const OCTANT_COUNT: usize = 8;
const ROOT: usize = 0;

struct Node {
    bounds: Aabb,
    parent: Option<usize>,
    children: [Option<usize>; OCTANT_COUNT],
    active_children: OctantMask,
    values: Vec<GlobalId>,
    queue: VecDeque<GlobalId>,
    initialized: bool,
    life: i32,
}

impl Node {
    fn new(bounds: Aabb, parent: Option<usize>, lifespan: i32) -> Self {
        Self {
            bounds,
            parent,
            children: [None; OCTANT_COUNT],
            active_children: OctantMask::empty(),
            values: Vec::new(),
            queue: VecDeque::new(),
            initialized: false,
            life: lifespan,
        }
    }
}

/// Read-only view of one octree node, for scans and diagnostics
pub struct NodeView<'a> {
    /// World-space box of the node
    pub bounds: Aabb,
    /// Objects held directly by the node
    pub values: &'a [GlobalId],
    /// Active child slots
    pub active_children: OctantMask,
}

/// Dynamic 8-way spatial partition over axis-aligned bounding boxes
pub struct Octree {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    config: OctreeConfig,
    panic_flag: bool,
    rebuild_count: u64,
}

impl Default for Octree {
    fn default() -> Self {
        Self::new(OctreeConfig::default())
    }
}

impl Octree {
    /// Create an octree whose root spans the configured map size
    pub fn new(config: OctreeConfig) -> Self {
        let root = Node::new(Self::map_bounds(&config), None, config.node_lifespan);
        Self {
            nodes: vec![Some(root)],
            free: Vec::new(),
            config,
            panic_flag: false,
            rebuild_count: 0,
        }
    }

    fn map_bounds(config: &OctreeConfig) -> Aabb {
        let half = config.map_size / 2.0;
        Aabb::from_center_extents(Vec3::zeros(), Vec3::new(half, half, half))
    }

    /// The configuration this tree was built with
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Whether the root box contains a world point
    pub fn contains(&self, point: Vec3) -> bool {
        self.node(ROOT).bounds.contains_point(point)
    }

    /// How many panic rebuilds this tree has performed
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    // ---- Arena plumbing --------------------------------------------------

    fn node(&self, idx: usize) -> &Node {
        self.nodes[idx].as_ref().expect("octree node index out of date")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node {
        self.nodes[idx].as_mut().expect("octree node index out of date")
    }

    fn alloc(&mut self, node: Node) -> usize {
        if let Some(idx) = self.free.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    fn free_subtree(&mut self, idx: usize) {
        let mut stack = vec![idx];
        while let Some(n) = stack.pop() {
            if let Some(node) = self.nodes[n].take() {
                stack.extend(node.children.iter().flatten());
                self.free.push(n);
            }
        }
    }

    // ---- Predicates ------------------------------------------------------

    fn ready(&self, idx: usize) -> bool {
        let node = self.node(idx);
        node.initialized && node.queue.is_empty()
    }

    fn node_empty(&self, idx: usize) -> bool {
        let node = self.node(idx);
        node.values.is_empty() && node.active_children.is_empty()
    }

    fn at_floor(&self, idx: usize) -> bool {
        let scale = self.node(idx).bounds.extents() * 2.0;
        scale.x <= self.config.smallest_scale
            && scale.y <= self.config.smallest_scale
            && scale.z <= self.config.smallest_scale
    }

    // ---- Insert ----------------------------------------------------------

    /// Place an object into the tree
    ///
    /// Returns false when the object's bound is not contained even by the
    /// root box; callers handle that by triggering the panic rebuild. An
    /// expired ID is treated as absent and reported as a failed insert.
    pub fn insert(&mut self, id: GlobalId, provider: &dyn BoundsProvider) -> bool {
        match provider.bounds_of(id) {
            Some(bound) => self.insert_from(ROOT, id, bound, provider),
            None => false,
        }
    }

    /// Queue an object for placement during the next update pass
    ///
    /// The queue absorbs insert requests arriving mid-tick (for example
    /// from a physics callback) without touching the tree structure.
    pub fn enqueue(&mut self, id: GlobalId) {
        self.node_mut(ROOT).queue.push_back(id);
    }

    fn insert_from(
        &mut self,
        start: usize,
        id: GlobalId,
        bound: Aabb,
        provider: &dyn BoundsProvider,
    ) -> bool {
        let mut idx = start;
        loop {
            if !self.node(idx).initialized {
                self.update_internal(idx, provider);
            }

            // Smallest node that can hold anything: stop subdividing
            if self.at_floor(idx) {
                self.node_mut(idx).values.push(id);
                return true;
            }

            // Not contained here: escalate to the parent, or fail at root
            if !self.node(idx).bounds.contains_aabb(&bound) {
                match self.node(idx).parent {
                    Some(parent) => {
                        idx = parent;
                        continue;
                    }
                    None => return false,
                }
            }

            // Descend into the first octant that fully contains the bound,
            // lazily creating the child when the slot is empty
            let (center, extents) = {
                let node = self.node(idx);
                (node.bounds.center(), node.bounds.extents())
            };
            let mut descended = false;
            for octant in 0..OCTANT_COUNT {
                if let Some(child) = self.node(idx).children[octant] {
                    if self.node(child).bounds.contains_aabb(&bound) {
                        self.node_mut(idx).active_children |= OctantMask::from_index(octant);
                        idx = child;
                        descended = true;
                        break;
                    }
                } else {
                    let child_bounds = octant_bounds(center, extents, octant);
                    if child_bounds.contains_aabb(&bound) {
                        let mut child = Node::new(child_bounds, Some(idx), self.config.node_lifespan);
                        child.initialized = true;
                        let child_idx = self.alloc(child);
                        let node = self.node_mut(idx);
                        node.children[octant] = Some(child_idx);
                        node.active_children |= OctantMask::from_index(octant);
                        idx = child_idx;
                        descended = true;
                        break;
                    }
                }
            }

            // Straddles multiple octants at this resolution: keep it here
            if !descended {
                self.node_mut(idx).values.push(id);
                return true;
            }
        }
    }

    // ---- Update ----------------------------------------------------------

    /// Absorb position changes, once per tick
    ///
    /// Re-buckets moved objects, prunes long-empty nodes, and falls back
    /// to a full rebuild when containment cannot be restored. Exceeding
    /// the internal retry budget is an invariant violation and panics.
    pub fn update(&mut self, provider: &dyn BoundsProvider) {
        self.update_node(ROOT, provider);
    }

    fn update_node(&mut self, idx: usize, provider: &dyn BoundsProvider) {
        if !self.node(idx).initialized {
            self.update_internal(idx, provider);
        }

        let mut attempt: u32 = 0;
        while !self.ready(idx) {
            assert!(
                attempt <= self.config.retry_limit,
                "octree update failed: retry budget exhausted"
            );
            self.update_internal(idx, provider);
            attempt += 1;
        }

        // Nodes that stay empty long enough become prunable
        if self.node_empty(idx) {
            self.node_mut(idx).life -= 1;
        } else {
            self.node_mut(idx).life = self.config.node_lifespan;
        }

        // Objects that fit an existing child move down through its queue;
        // the child resolves them in its own pass
        let values = std::mem::take(&mut self.node_mut(idx).values);
        let mut kept = Vec::with_capacity(values.len());
        for id in values {
            let Some(bound) = provider.bounds_of(id) else {
                continue;
            };
            let mut moved = false;
            for octant in 0..OCTANT_COUNT {
                if let Some(child) = self.node(idx).children[octant] {
                    if self.node(child).bounds.contains_aabb(&bound) {
                        self.node_mut(child).queue.push_back(id);
                        moved = true;
                        break;
                    }
                }
            }
            if !moved {
                kept.push(id);
            }
        }
        self.node_mut(idx).values = kept;

        // Update children, then release the ones whose life ran out
        for octant in 0..OCTANT_COUNT {
            let Some(child) = self.node(idx).children[octant] else {
                continue;
            };
            self.update_node(child, provider);
            if self.node(child).life < 0 {
                self.free_subtree(child);
                let node = self.node_mut(idx);
                node.children[octant] = None;
                node.active_children -= OctantMask::from_index(octant);
            }
        }

        // Re-validate containment for everything still held here
        let bounds = self.node(idx).bounds;
        let parent = self.node(idx).parent;
        let values = std::mem::take(&mut self.node_mut(idx).values);
        let mut kept = Vec::with_capacity(values.len());
        let mut iter = values.into_iter();
        loop {
            let Some(id) = iter.next() else {
                break;
            };
            let Some(bound) = provider.bounds_of(id) else {
                continue;
            };
            if bounds.contains_aabb(&bound) {
                kept.push(id);
                continue;
            }
            let escalated = match parent {
                Some(p) => self.insert_from(p, id, bound, provider),
                None => false,
            };
            if escalated {
                continue;
            }
            // Even the root cannot take it: schedule a full rebuild and
            // abort the rest of this pass, the structure is moot now
            self.panic_flag = true;
            kept.push(id);
            kept.extend(iter);
            break;
        }
        self.node_mut(idx).values = kept;

        if idx == ROOT && self.panic_flag {
            self.panic_rebuild_at(ROOT, provider);
        }
    }

    fn update_internal(&mut self, idx: usize, provider: &dyn BoundsProvider) {
        if self.node(idx).initialized {
            // Resolve queued insert requests against the live structure.
            // A request not even the root can place stays in the value
            // list so the pending rebuild collects it.
            while let Some(id) = self.node_mut(idx).queue.pop_front() {
                if let Some(bound) = provider.bounds_of(id) {
                    if !self.insert_from(idx, id, bound, provider) {
                        self.node_mut(idx).values.push(id);
                        self.panic_flag = true;
                    }
                }
            }
        } else {
            // First touch or rebuild: drain the queue into the flat value
            // list and construct the subtree from it
            let node = self.node_mut(idx);
            while let Some(id) = node.queue.pop_front() {
                node.values.push(id);
            }
            self.build(idx, provider);
        }
    }

    // ---- Build -----------------------------------------------------------

    fn build(&mut self, idx: usize, provider: &dyn BoundsProvider) {
        let mut stack = vec![idx];
        while let Some(n) = stack.pop() {
            self.node_mut(n).initialized = true;

            // Degenerate box: fall back to the configured map cube
            if self.node(n).bounds.extents() == Vec3::zeros() {
                self.node_mut(n).bounds = Self::map_bounds(&self.config);
            }

            if self.node(n).values.len() <= 1 && n != ROOT {
                continue;
            }

            // Already below the top-level partition size: leaf
            let scale = self.node(n).bounds.extents() * 2.0;
            if scale.x < self.config.map_size
                && scale.y < self.config.map_size
                && scale.z < self.config.map_size
            {
                continue;
            }

            let (center, extents) = {
                let node = self.node(n);
                (node.bounds.center(), node.bounds.extents())
            };
            let octants: Vec<Aabb> = (0..OCTANT_COUNT)
                .map(|octant| octant_bounds(center, extents, octant))
                .collect();

            // Partition by full containment; straddlers stay on this node
            let values = std::mem::take(&mut self.node_mut(n).values);
            let mut partitions: [Vec<GlobalId>; OCTANT_COUNT] = Default::default();
            let mut remaining = Vec::new();
            for id in values {
                let Some(bound) = provider.bounds_of(id) else {
                    continue;
                };
                match octants.iter().position(|octant| octant.contains_aabb(&bound)) {
                    Some(octant) => partitions[octant].push(id),
                    None => remaining.push(id),
                }
            }
            self.node_mut(n).values = remaining;

            for (octant, partition) in partitions.into_iter().enumerate() {
                if partition.is_empty() {
                    continue;
                }
                let mut child = Node::new(octants[octant], Some(n), self.config.node_lifespan);
                child.values = partition;
                let child_idx = self.alloc(child);
                let node = self.node_mut(n);
                node.children[octant] = Some(child_idx);
                node.active_children |= OctantMask::from_index(octant);
                stack.push(child_idx);
            }
        }
    }

    // ---- Panic rebuild ---------------------------------------------------

    /// Rebuild the whole tree from the flat set of live objects
    ///
    /// This is the recovery path for containment-invariant violations. It
    /// must preserve every still-valid object even when called mid-frame.
    pub fn rebuild(&mut self, provider: &dyn BoundsProvider) {
        self.panic_rebuild_at(ROOT, provider);
    }

    fn panic_rebuild_at(&mut self, idx: usize, provider: &dyn BoundsProvider) {
        assert!(
            idx == ROOT,
            "octree rebuild attempted from a non-root node"
        );

        log::warn!(
            "octree containment invariant broken, rebuilding from {} nodes",
            self.node_count()
        );
        self.panic_flag = false;
        self.rebuild_count += 1;

        // Scan the whole tree with an explicit stack; pathological trees
        // must not overflow the call stack here
        let mut collected = Vec::new();
        let mut stack = vec![idx];
        while let Some(n) = stack.pop() {
            let node = self.node_mut(n);
            collected.append(&mut node.values);
            collected.extend(node.queue.drain(..));
            stack.extend(node.children.iter().flatten());
        }

        // Discard the old structure and requeue everything at the root
        let children: Vec<usize> = self.node(ROOT).children.iter().flatten().copied().collect();
        for child in children {
            self.free_subtree(child);
        }
        let node_lifespan = self.config.node_lifespan;
        let root = self.node_mut(ROOT);
        root.children = [None; OCTANT_COUNT];
        root.active_children = OctantMask::empty();
        root.initialized = false;
        root.life = node_lifespan;
        root.queue = collected.into();

        self.update_internal(ROOT, provider);
    }

    /// Reset the tree to a single empty, uninitialized root
    pub fn clear(&mut self) {
        let children: Vec<usize> = self.node(ROOT).children.iter().flatten().copied().collect();
        for child in children {
            self.free_subtree(child);
        }
        let bounds = Self::map_bounds(&self.config);
        let node_lifespan = self.config.node_lifespan;
        let root = self.node_mut(ROOT);
        root.bounds = bounds;
        root.children = [None; OCTANT_COUNT];
        root.active_children = OctantMask::empty();
        root.values.clear();
        root.queue.clear();
        root.initialized = false;
        root.life = node_lifespan;
        self.panic_flag = false;
    }

    // ---- Read surface ----------------------------------------------------

    /// Iterate every live node
    pub fn iter_nodes(&self) -> impl Iterator<Item = NodeView<'_>> {
        self.nodes.iter().filter_map(|slot| {
            slot.as_ref().map(|node| NodeView {
                bounds: node.bounds,
                values: &node.values,
                active_children: node.active_children,
            })
        })
    }

    /// Number of live nodes, the root included
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of active child slots on the root
    pub fn root_active_children(&self) -> u32 {
        self.node(ROOT).active_children.bits().count_ones()
    }

    /// Total number of objects held or queued anywhere in the tree
    pub fn object_count(&self) -> usize {
        self.nodes
            .iter()
            .flatten()
            .map(|node| node.values.len() + node.queue.len())
            .sum()
    }

    /// Collect every object held or queued anywhere in the tree
    pub fn collect_objects(&self) -> Vec<GlobalId> {
        let mut out = Vec::new();
        for node in self.nodes.iter().flatten() {
            out.extend(node.values.iter().copied());
            out.extend(node.queue.iter().copied());
        }
        out
    }

    /// Full-tree scan for the node directly holding an object
    pub fn node_holding(&self, id: GlobalId) -> Option<NodeView<'_>> {
        self.iter_nodes().find(|view| view.values.contains(&id))
    }

    /// Objects in every node whose box intersects the query bound
    ///
    /// Broad-phase candidate set; exact tests are the collision
    /// collaborator's job.
    pub fn query_aabb(&self, bound: &Aabb) -> Vec<GlobalId> {
        let mut out = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(n) = stack.pop() {
            let node = self.node(n);
            if !node.bounds.intersects(bound) {
                continue;
            }
            out.extend(node.values.iter().copied());
            stack.extend(node.children.iter().flatten());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapProvider {
        bounds: HashMap<GlobalId, Aabb>,
    }

    impl MapProvider {
        fn new() -> Self {
            Self {
                bounds: HashMap::new(),
            }
        }

        fn add(&mut self, bound: Aabb) -> GlobalId {
            let id = GlobalId::next();
            self.bounds.insert(id, bound);
            id
        }

        fn add_point(&mut self, position: Vec3) -> GlobalId {
            self.add(Aabb::from_point(position))
        }

        fn move_to(&mut self, id: GlobalId, bound: Aabb) {
            self.bounds.insert(id, bound);
        }

        fn expire(&mut self, id: GlobalId) {
            self.bounds.remove(&id);
        }
    }

    impl BoundsProvider for MapProvider {
        fn bounds_of(&self, id: GlobalId) -> Option<Aabb> {
            self.bounds.get(&id).copied()
        }
    }

    fn containment_holds(octree: &Octree, provider: &MapProvider) -> bool {
        octree.iter_nodes().all(|view| {
            view.values.iter().all(|id| match provider.bounds_of(*id) {
                Some(bound) => view.bounds.contains_aabb(&bound),
                None => true,
            })
        })
    }

    #[test]
    fn test_insert_places_object_in_containing_node() {
        let mut provider = MapProvider::new();
        let mut octree = Octree::default();
        let id = provider.add(Aabb::from_center_extents(
            Vec3::new(300.0, 300.0, 300.0),
            Vec3::new(1.0, 1.0, 1.0),
        ));

        assert!(octree.insert(id, &provider));
        let view = octree.node_holding(id).unwrap();
        assert!(view.bounds.contains_aabb(&provider.bounds_of(id).unwrap()));
    }

    #[test]
    fn test_insert_fails_outside_the_map() {
        let mut provider = MapProvider::new();
        let mut octree = Octree::default();
        let id = provider.add_point(Vec3::new(5000.0, 0.0, 0.0));

        assert!(!octree.insert(id, &provider));
    }

    #[test]
    fn test_build_partitions_into_octants() {
        // Three objects at (0,0,0), (500,0,0), (-500,0,0), map size 2048
        let mut provider = MapProvider::new();
        let mut octree = Octree::default();
        let origin = provider.add_point(Vec3::zeros());
        let east = provider.add_point(Vec3::new(500.0, 0.0, 0.0));
        let west = provider.add_point(Vec3::new(-500.0, 0.0, 0.0));

        for id in [origin, east, west] {
            octree.enqueue(id);
        }
        octree.update(&provider);

        // Every object ends up in a node whose box contains its position
        for (id, position) in [
            (origin, Vec3::zeros()),
            (east, Vec3::new(500.0, 0.0, 0.0)),
            (west, Vec3::new(-500.0, 0.0, 0.0)),
        ] {
            let view = octree.node_holding(id).unwrap();
            assert!(view.bounds.contains_point(position));
        }

        assert!(octree.root_active_children() >= 2);
        assert_eq!(octree.object_count(), 3);
    }

    #[test]
    fn test_update_rebuckets_moved_object() {
        let mut provider = MapProvider::new();
        let mut octree = Octree::default();
        let id = provider.add(Aabb::from_center_extents(
            Vec3::new(400.0, 400.0, 400.0),
            Vec3::new(1.0, 1.0, 1.0),
        ));
        let other = provider.add(Aabb::from_center_extents(
            Vec3::new(420.0, 400.0, 400.0),
            Vec3::new(1.0, 1.0, 1.0),
        ));

        octree.enqueue(id);
        octree.enqueue(other);
        octree.update(&provider);

        // Move far into the opposite corner of the map
        let target = Aabb::from_center_extents(
            Vec3::new(-400.0, -400.0, -400.0),
            Vec3::new(1.0, 1.0, 1.0),
        );
        provider.move_to(id, target);
        octree.update(&provider);

        let view = octree.node_holding(id).unwrap();
        assert!(view.bounds.contains_aabb(&target));
        assert!(containment_holds(&octree, &provider));
    }

    #[test]
    fn test_containment_invariant_after_update() {
        let mut provider = MapProvider::new();
        let mut octree = Octree::default();
        let positions = [
            Vec3::new(100.0, 200.0, -300.0),
            Vec3::new(-640.0, 12.0, 77.0),
            Vec3::new(3.0, -900.0, 412.0),
            Vec3::new(512.0, 512.0, 512.0),
            Vec3::new(-1.0, -1.0, -1.0),
        ];
        for position in positions {
            let id = provider.add(Aabb::from_center_extents(position, Vec3::new(2.0, 2.0, 2.0)));
            octree.enqueue(id);
        }

        for _ in 0..3 {
            octree.update(&provider);
        }
        assert!(containment_holds(&octree, &provider));
    }

    #[test]
    fn test_expired_objects_are_dropped_silently() {
        let mut provider = MapProvider::new();
        let mut octree = Octree::default();
        let keep = provider.add_point(Vec3::new(10.0, 10.0, 10.0));
        let gone = provider.add_point(Vec3::new(-10.0, -10.0, -10.0));

        octree.enqueue(keep);
        octree.enqueue(gone);
        octree.update(&provider);
        assert_eq!(octree.object_count(), 2);

        provider.expire(gone);
        octree.update(&provider);
        assert_eq!(octree.object_count(), 1);
        assert_eq!(octree.collect_objects(), vec![keep]);
    }

    #[test]
    fn test_panic_rebuild_keeps_every_object() {
        let mut provider = MapProvider::new();
        let mut octree = Octree::default();
        let mut ids = Vec::new();
        for i in 0..8 {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            let offset = 100.0 * (i as f32 + 1.0);
            let id = provider.add(Aabb::from_center_extents(
                Vec3::new(sign * offset, offset, -sign * offset),
                Vec3::new(1.0, 1.0, 1.0),
            ));
            octree.enqueue(id);
            ids.push(id);
        }
        octree.update(&provider);
        assert_eq!(octree.object_count(), 8);

        octree.rebuild(&provider);

        let mut found = octree.collect_objects();
        found.sort();
        let mut expected = ids.clone();
        expected.sort();
        assert_eq!(found, expected);
        assert!(containment_holds(&octree, &provider));
        assert_eq!(octree.rebuild_count(), 1);
    }

    #[test]
    fn test_escape_from_the_map_triggers_panic_rebuild() {
        let mut provider = MapProvider::new();
        let mut octree = Octree::default();
        let runaway = provider.add(Aabb::from_center_extents(
            Vec3::new(700.0, 700.0, 700.0),
            Vec3::new(1.0, 1.0, 1.0),
        ));
        let stays = provider.add(Aabb::from_center_extents(
            Vec3::new(-200.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        ));
        octree.enqueue(runaway);
        octree.enqueue(stays);
        octree.update(&provider);

        // Push the object past the edge of the map
        provider.move_to(
            runaway,
            Aabb::from_center_extents(Vec3::new(4000.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)),
        );
        octree.update(&provider);

        assert_eq!(octree.rebuild_count(), 1);
        // Nothing is lost, including the escapee
        assert_eq!(octree.object_count(), 2);
    }

    #[test]
    fn test_empty_nodes_are_pruned_after_lifespan() {
        let config = OctreeConfig {
            node_lifespan: 3,
            ..OctreeConfig::default()
        };
        let mut provider = MapProvider::new();
        let mut octree = Octree::new(config);

        let a = provider.add_point(Vec3::new(600.0, 600.0, 600.0));
        let b = provider.add_point(Vec3::new(-600.0, -600.0, -600.0));
        octree.enqueue(a);
        octree.enqueue(b);
        octree.update(&provider);
        let populated = octree.node_count();
        assert!(populated > 1);

        provider.expire(a);
        provider.expire(b);
        for _ in 0..6 {
            octree.update(&provider);
        }
        assert!(octree.node_count() < populated);
        assert_eq!(octree.object_count(), 0);
    }

    #[test]
    fn test_query_aabb_returns_nearby_candidates() {
        let mut provider = MapProvider::new();
        let mut octree = Octree::default();
        let near = provider.add(Aabb::from_center_extents(
            Vec3::new(100.0, 100.0, 100.0),
            Vec3::new(1.0, 1.0, 1.0),
        ));
        let far = provider.add(Aabb::from_center_extents(
            Vec3::new(-900.0, -900.0, -900.0),
            Vec3::new(1.0, 1.0, 1.0),
        ));
        octree.enqueue(near);
        octree.enqueue(far);
        octree.update(&provider);

        let hits = octree.query_aabb(&Aabb::from_center_extents(
            Vec3::new(100.0, 100.0, 100.0),
            Vec3::new(50.0, 50.0, 50.0),
        ));
        assert!(hits.contains(&near));
        assert!(!hits.contains(&far));
    }

    #[test]
    fn test_clear_resets_to_a_single_root() {
        let mut provider = MapProvider::new();
        let mut octree = Octree::default();
        for i in 0..4 {
            let id = provider.add_point(Vec3::new(200.0 * (i as f32 + 1.0), 300.0, -150.0));
            octree.enqueue(id);
        }
        octree.update(&provider);
        assert!(octree.node_count() > 1);

        octree.clear();
        assert_eq!(octree.node_count(), 1);
        assert_eq!(octree.object_count(), 0);
        assert_eq!(octree.root_active_children(), 0);
    }
}
