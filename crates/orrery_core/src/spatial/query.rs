//! Broad-phase collision candidate generation
//!
//! Thin query layer over the octree for the physics/collision
//! collaborator: it narrows the candidate set cheaply, and exact
//! intersection tests stay on the collision side.

use crate::foundation::math::Aabb;
use crate::object::GlobalId;

use super::octree::{BoundsProvider, Octree};

/// Candidate pair produced by the broad phase, ordered so `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidatePair {
    /// First object of the pair
    pub a: GlobalId,
    /// Second object of the pair
    pub b: GlobalId,
}

impl CandidatePair {
    fn new(first: GlobalId, second: GlobalId) -> Self {
        if first < second {
            Self { a: first, b: second }
        } else {
            Self { a: second, b: first }
        }
    }
}

/// Objects whose nodes overlap the given object's bound
///
/// The object itself is excluded. Returns an empty set when the object
/// has expired.
pub fn candidates_for(
    octree: &Octree,
    id: GlobalId,
    provider: &dyn BoundsProvider,
) -> Vec<GlobalId> {
    let Some(bound) = provider.bounds_of(id) else {
        return Vec::new();
    };
    octree
        .query_aabb(&bound)
        .into_iter()
        .filter(|candidate| *candidate != id)
        .collect()
}

/// All candidate pairs whose bounds actually overlap
///
/// Deduplicated and ordered; exact narrow-phase testing is left to the
/// collision collaborator.
pub fn candidate_pairs(octree: &Octree, provider: &dyn BoundsProvider) -> Vec<CandidatePair> {
    let mut pairs = Vec::new();
    for id in octree.collect_objects() {
        let Some(bound) = provider.bounds_of(id) else {
            continue;
        };
        for other in octree.query_aabb(&bound) {
            if other == id {
                continue;
            }
            let Some(other_bound) = provider.bounds_of(other) else {
                continue;
            };
            if bound.intersects(&other_bound) {
                pairs.push(CandidatePair::new(id, other));
            }
        }
    }
    pairs.sort_by_key(|pair| (pair.a, pair.b));
    pairs.dedup();
    pairs
}

/// Objects intersecting an arbitrary query volume
pub fn query_volume(octree: &Octree, bound: &Aabb) -> Vec<GlobalId> {
    octree.query_aabb(bound)
}
