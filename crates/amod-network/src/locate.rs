//! Nearest-node lookup.
//!
//! Snaps an arbitrary point to the closest entry of a location table.  The
//! query must be in the same plane as the table: `(lat, long)` order, after
//! the same rotation.
//!
//! # Tie-breaking
//!
//! Among equidistant candidates the lowest index wins.  [`LinearLocator`]
//! gets this from a strict `<` during an index-order scan;
//! [`IndexedLocator`] reproduces it by draining every candidate at the
//! minimum distance from the R-tree and keeping the smallest `NodeId`.
//!
//! The linear scan is O(N) per query.  Prefer the indexed locator when
//! snapping many points against a large network.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use amod_core::{Location, NodeId};

use crate::{NetworkError, NetworkResult};

/// Pluggable nearest-node lookup.
///
/// Implementations must be `Send + Sync` so a locator can be shared across
/// worker threads.
pub trait NodeLocator: Send + Sync {
    /// Index of the location closest to `query`.
    ///
    /// # Errors
    ///
    /// [`NetworkError::EmptyTable`] if there are no candidates.
    fn closest(&self, query: Location) -> NetworkResult<NodeId>;
}

/// Index-order scan over `locations`.
pub fn find_closest_node(query: Location, locations: &[Location]) -> NetworkResult<NodeId> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &loc) in locations.iter().enumerate() {
        let d = query.distance(loc);
        match best {
            Some((_, best_d)) if !(d < best_d) => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| NodeId(i as u32)).ok_or(NetworkError::EmptyTable)
}

// ── Linear ────────────────────────────────────────────────────────────────────

/// Brute-force locator borrowing a location table.
pub struct LinearLocator<'a> {
    locations: &'a [Location],
}

impl<'a> LinearLocator<'a> {
    pub fn new(locations: &'a [Location]) -> Self {
        Self { locations }
    }
}

impl NodeLocator for LinearLocator<'_> {
    fn closest(&self, query: Location) -> NetworkResult<NodeId> {
        find_closest_node(query, self.locations)
    }
}

// ── R-tree ────────────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a `[lat, long]` point and its `NodeId`.
#[derive(Clone)]
struct LocationEntry {
    loc: Location,
    id: NodeId,
}

impl RTreeObject for LocationEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.loc.as_array())
    }
}

impl PointDistance for LocationEntry {
    /// Same arithmetic as the linear scan, so both locators agree on ties.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.loc.distance_2(Location::from(*point))
    }
}

/// R-tree backed locator.  O(log N) per query after an O(N log N) build.
pub struct IndexedLocator {
    tree: RTree<LocationEntry>,
}

impl IndexedLocator {
    /// Bulk-load the tree from a location table.
    pub fn new(locations: &[Location]) -> Self {
        let entries: Vec<LocationEntry> = locations
            .iter()
            .enumerate()
            .map(|(i, &loc)| LocationEntry { loc, id: NodeId(i as u32) })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl NodeLocator for IndexedLocator {
    fn closest(&self, query: Location) -> NetworkResult<NodeId> {
        let mut candidates = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&query.as_array());

        let (first, first_d2) = candidates.next().ok_or(NetworkError::EmptyTable)?;
        let best_d = first_d2.sqrt();
        let mut best = first.id;

        // Candidates arrive in non-decreasing distance; stop once past the tie.
        for (entry, d2) in candidates {
            if d2.sqrt() > best_d {
                break;
            }
            best = best.min(entry.id);
        }
        Ok(best)
    }
}
