//! Node sequences to link sequences.
//!
//! # Matching
//!
//! Each consecutive pair `(a, b)` of a route maps to the **first** road in
//! table order whose `(start, end)` is `(a, b)`.  Lookup goes through a map
//! built once from the road table, which gives the same answer as scanning
//! the table for every pair.
//!
//! # Strictness
//!
//! | Flag              | Lenient (default)                      | Strict                         |
//! |-------------------|----------------------------------------|--------------------------------|
//! | `strict_segments` | unmatched pair dropped, reported       | route fails, `UnmatchedSegment`|
//! | `strict_capacity` | cell may go negative, reported         | route fails, matrix untouched  |
//!
//! In lenient mode a pair naming a node the node table does not know is an
//! unmatched pair; in strict mode it fails the route with
//! `UnknownNodeReference`.

use rustc_hash::FxHashMap;

use amod_core::{NodeId, ResolveConfig, RoadId};
use amod_network::{NodeTable, RoadTable};

use crate::capacity::CapacityMatrix;
use crate::{RouteError, RouteResult};

/// A route pair that matched no road.  Raw ids, as the route named them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub from: String,
    pub to: String,
}

/// Outcome of resolving one route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Resolved roads in traversal order.
    pub roads: Vec<RoadId>,
    /// Pairs dropped because no road matched (lenient mode only).
    pub unmatched: Vec<Segment>,
    /// Traversals that left their capacity cell below zero.
    pub underflows: usize,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }
}

/// Resolves routes against an immutable road table.
///
/// Borrows the road and node tables, so one resolver can be shared across
/// threads while each batch owns its own capacity matrix.
pub struct RouteResolver<'a> {
    roads: &'a RoadTable,
    nodes: &'a NodeTable,
    mode: ResolveConfig,
    first_road: FxHashMap<(NodeId, NodeId), RoadId>,
}

impl<'a> RouteResolver<'a> {
    pub fn new(roads: &'a RoadTable, nodes: &'a NodeTable, mode: ResolveConfig) -> Self {
        let mut first_road = FxHashMap::with_capacity_and_hasher(roads.len(), Default::default());
        for (id, road) in roads.iter() {
            first_road.entry((road.from, road.to)).or_insert(id);
        }
        Self { roads, nodes, mode, first_road }
    }

    pub fn mode(&self) -> ResolveConfig {
        self.mode
    }

    pub fn roads(&self) -> &'a RoadTable {
        self.roads
    }

    pub fn nodes(&self) -> &'a NodeTable {
        self.nodes
    }

    /// First road from `from` to `to` in table order.
    #[inline]
    pub fn road_between(&self, from: NodeId, to: NodeId) -> Option<RoadId> {
        self.first_road.get(&(from, to)).copied()
    }

    /// Link ids of `resolution`, in order.
    pub fn link_ids<'r>(&'r self, resolution: &'r Resolution) -> impl Iterator<Item = &'a str> + 'r {
        let roads = self.roads;
        resolution
            .roads
            .iter()
            .filter_map(move |&r| roads.get(r))
            .map(|road| road.id.as_str())
    }

    /// Link ids joined by single spaces, ready for embedding in a plan file.
    pub fn link_string(&self, resolution: &Resolution) -> String {
        self.link_ids(resolution).collect::<Vec<_>>().join(" ")
    }

    /// Resolve a route without touching capacity.
    ///
    /// A route of zero or one node resolves to no links.
    pub fn resolve<S: AsRef<str>>(&self, route: &[S]) -> RouteResult<Resolution> {
        let mut res = Resolution::default();

        for pair in route.windows(2) {
            let (a_raw, b_raw) = (pair[0].as_ref(), pair[1].as_ref());

            let road = match (self.nodes.get(a_raw), self.nodes.get(b_raw)) {
                (Some(a), Some(b)) => self.road_between(a, b),
                (a, _) if self.mode.strict_segments => {
                    let missing = if a.is_none() { a_raw } else { b_raw };
                    return Err(RouteError::UnknownNodeReference(missing.to_owned()));
                }
                _ => None,
            };

            match road {
                Some(r) => res.roads.push(r),
                None if self.mode.strict_segments => {
                    return Err(RouteError::UnmatchedSegment {
                        from: a_raw.to_owned(),
                        to: b_raw.to_owned(),
                    });
                }
                None => res.unmatched.push(Segment { from: a_raw.to_owned(), to: b_raw.to_owned() }),
            }
        }

        Ok(res)
    }

    /// Resolve a route and consume one unit of capacity per traversal.
    ///
    /// In strict capacity mode the whole route is checked first and the
    /// matrix is only modified if every cell can absorb its traversals.
    pub fn resolve_with_capacity<S: AsRef<str>>(
        &self,
        route: &[S],
        capacity: &mut CapacityMatrix,
    ) -> RouteResult<Resolution> {
        self.check_shape(capacity)?;
        let mut res = self.resolve(route)?;

        if self.mode.strict_capacity {
            self.check_capacity(&res, capacity)?;
        }

        for &r in &res.roads {
            let Some(road) = self.roads.get(r) else { continue };
            if capacity.decrement(road.from, road.to) < 0.0 {
                res.underflows += 1;
            }
        }
        Ok(res)
    }

    /// `capacity` must be indexed by this resolver's node table.
    pub fn check_shape(&self, capacity: &CapacityMatrix) -> RouteResult<()> {
        if capacity.dim() != self.nodes.len() {
            return Err(RouteError::CapacityShape { matrix: capacity.dim(), nodes: self.nodes.len() });
        }
        Ok(())
    }

    fn check_capacity(&self, res: &Resolution, capacity: &CapacityMatrix) -> RouteResult<()> {
        // Tally per cell: a route may traverse the same pair more than once.
        // Cells keep first-traversal order so the reported cell is stable.
        let mut slot: FxHashMap<(NodeId, NodeId), usize> = FxHashMap::default();
        let mut needed: Vec<((NodeId, NodeId), u32)> = Vec::new();
        for &r in &res.roads {
            let Some(road) = self.roads.get(r) else { continue };
            let cell = (road.from, road.to);
            let i = *slot.entry(cell).or_insert_with(|| {
                needed.push((cell, 0));
                needed.len() - 1
            });
            needed[i].1 += 1;
        }

        for ((from, to), n) in needed {
            let remaining = capacity.get(from, to);
            if remaining - f64::from(n) < 0.0 {
                return Err(RouteError::CapacityUnderflow {
                    from: self.nodes.raw_id(from).to_owned(),
                    to: self.nodes.raw_id(to).to_owned(),
                    remaining,
                    needed: n,
                });
            }
        }
        Ok(())
    }
}
