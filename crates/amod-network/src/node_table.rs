//! Dense node indexing.
//!
//! The node table is the arena that owns node identity.  Raw ids from the
//! source file are kept only as a lookup key; everything downstream speaks
//! `NodeId`.

use rustc_hash::FxHashMap;

use amod_core::{Location, NodeId};

use crate::source::NodeRecord;
use crate::{NetworkError, NetworkResult};

/// Bijection between raw node ids and `0..N`, plus unprojected locations.
#[derive(Debug, Clone, Default)]
pub struct NodeTable {
    raw_ids: Vec<String>,
    coords: Vec<Location>,
    lookup: FxHashMap<String, NodeId>,
}

impl NodeTable {
    /// Index `nodes` in first-seen order.
    ///
    /// # Errors
    ///
    /// [`NetworkError::DuplicateNode`] if a raw id repeats and
    /// [`NetworkError::Parse`] if a coordinate is not finite.
    pub fn build<I>(nodes: I) -> NetworkResult<Self>
    where
        I: IntoIterator<Item = NodeRecord>,
    {
        let iter = nodes.into_iter();
        let (lower, _) = iter.size_hint();
        let mut table = NodeTable {
            raw_ids: Vec::with_capacity(lower),
            coords: Vec::with_capacity(lower),
            lookup: FxHashMap::with_capacity_and_hasher(lower, Default::default()),
        };

        for node in iter {
            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(NetworkError::Parse {
                    record: format!("node {}", node.id),
                    reason: format!("non-finite coordinate ({}, {})", node.x, node.y),
                });
            }
            if table.lookup.contains_key(&node.id) {
                return Err(NetworkError::DuplicateNode(node.id));
            }
            let id = NodeId::try_from(table.raw_ids.len()).map_err(|_| NetworkError::Parse {
                record: format!("node {}", node.id),
                reason: "node count exceeds u32 index space".into(),
            })?;
            table.lookup.insert(node.id.clone(), id);
            table.raw_ids.push(node.id);
            table.coords.push(Location::from_xy(node.x, node.y));
        }

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.raw_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_ids.is_empty()
    }

    /// Index of a raw id, if present.
    #[inline]
    pub fn get(&self, raw_id: &str) -> Option<NodeId> {
        self.lookup.get(raw_id).copied()
    }

    /// Like [`get`](Self::get), but a miss is an
    /// [`NetworkError::UnknownNodeReference`] attributed to `record`.
    pub fn resolve(&self, raw_id: &str, record: impl FnOnce() -> String) -> NetworkResult<NodeId> {
        self.get(raw_id).ok_or_else(|| NetworkError::UnknownNodeReference {
            record: record(),
            node: raw_id.to_owned(),
        })
    }

    /// Raw id of an index.  Panics if `id` is out of range.
    #[inline]
    pub fn raw_id(&self, id: NodeId) -> &str {
        &self.raw_ids[id.index()]
    }

    /// Unprojected `(lat, long)` of a node.
    #[inline]
    pub fn location(&self, id: NodeId) -> Location {
        self.coords[id.index()]
    }

    /// Unprojected locations in index order.
    pub fn locations(&self) -> &[Location] {
        &self.coords
    }

    /// `(NodeId, raw id, location)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str, Location)> + '_ {
        self.raw_ids
            .iter()
            .zip(&self.coords)
            .enumerate()
            .map(|(i, (raw, &loc))| (NodeId(i as u32), raw.as_str(), loc))
    }

    /// Records equivalent to the ones the table was built from, in index
    /// order.  Written out as the node artifact so route resolution can
    /// rebuild the same indices later.
    pub fn records(&self) -> impl Iterator<Item = NodeRecord> + '_ {
        self.iter().map(|(_, raw, loc)| NodeRecord {
            id: raw.to_owned(),
            x: loc.long,
            y: loc.lat,
        })
    }
}
