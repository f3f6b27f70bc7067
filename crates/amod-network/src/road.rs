//! Links and the road table.
//!
//! A [`LinkTable`] holds every parsed link with its normalized attributes and
//! is what the numeric tables are built from.  A [`RoadTable`] is the
//! topology-only view `(id, start, end)` that route resolution needs; it is
//! persisted as an artifact and can be reloaded without the network file.
//! Both keep link insertion order, and `RoadId` is the position in it.

use serde::{Deserialize, Serialize};

use amod_core::{NodeId, RoadId};

use crate::node_table::NodeTable;
use crate::NetworkResult;

/// Lengths in `(0, TINY_LENGTH)` are rescaled by [`TINY_LENGTH_SCALE`].
pub const TINY_LENGTH: f64 = 0.01;
pub const TINY_LENGTH_SCALE: f64 = 1_000.0;

/// Correct the unit mismatch on very short links.
///
/// Only the open interval `(0, 0.01)` is scaled; zero and everything from
/// `0.01` up pass through unchanged.
#[inline]
pub fn normalize_length(length: f64) -> f64 {
    if length > 0.0 && length < TINY_LENGTH {
        length * TINY_LENGTH_SCALE
    } else {
        length
    }
}

// ── Links ─────────────────────────────────────────────────────────────────────

/// A parsed, validated link.  `length` is already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: String,
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: f64,
    pub freespeed: f64,
    pub length: f64,
}

impl Link {
    /// Free-flow traversal time in seconds.
    #[inline]
    pub fn travel_secs(&self) -> f64 {
        self.length / self.freespeed
    }
}

/// All links in insertion order.
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    links: Vec<Link>,
}

impl LinkTable {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self { links: Vec::with_capacity(n) }
    }

    pub(crate) fn push(&mut self, link: Link) {
        self.links.push(link);
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn get(&self, id: RoadId) -> Option<&Link> {
        self.links.get(id.index())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    /// Topology-only view for route resolution.
    pub fn road_table(&self) -> RoadTable {
        RoadTable {
            roads: self
                .links
                .iter()
                .map(|l| Road { id: l.id.clone(), from: l.from, to: l.to })
                .collect(),
        }
    }
}

// ── Roads ─────────────────────────────────────────────────────────────────────

/// A directed road: link id and indexed endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Road {
    pub id: String,
    pub from: NodeId,
    pub to: NodeId,
}

/// Persisted road artifact row: link id and raw endpoint ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadRecord {
    pub id: String,
    pub start: String,
    pub end: String,
}

/// Immutable, ordered road table.
#[derive(Debug, Clone, Default)]
pub struct RoadTable {
    roads: Vec<Road>,
}

impl RoadTable {
    /// Rebuild from persisted records, resolving endpoints through `nodes`.
    ///
    /// # Errors
    ///
    /// [`NetworkError::UnknownNodeReference`](crate::NetworkError::UnknownNodeReference)
    /// if a record names a node `nodes` does not hold.
    pub fn from_records<I>(records: I, nodes: &NodeTable) -> NetworkResult<Self>
    where
        I: IntoIterator<Item = RoadRecord>,
    {
        let roads = records
            .into_iter()
            .map(|r| {
                let from = nodes.resolve(&r.start, || format!("road {}", r.id))?;
                let to = nodes.resolve(&r.end, || format!("road {}", r.id))?;
                Ok(Road { id: r.id, from, to })
            })
            .collect::<NetworkResult<Vec<_>>>()?;
        Ok(Self { roads })
    }

    /// Artifact rows with raw endpoint ids, in table order.
    pub fn records<'a>(&'a self, nodes: &'a NodeTable) -> impl Iterator<Item = RoadRecord> + 'a {
        self.roads.iter().map(|r| RoadRecord {
            id: r.id.clone(),
            start: nodes.raw_id(r.from).to_owned(),
            end: nodes.raw_id(r.to).to_owned(),
        })
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    pub fn get(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(id.index())
    }

    /// `(RoadId, &Road)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (RoadId, &Road)> + '_ {
        self.roads.iter().enumerate().map(|(i, r)| (RoadId(i as u32), r))
    }
}
