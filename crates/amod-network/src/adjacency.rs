//! Node adjacency in Compressed Sparse Row form.
//!
//! Given a `NodeId n`, its reachable neighbours occupy the slice:
//!
//! ```text
//! targets[ out_start[n] .. out_start[n+1] ]
//! ```
//!
//! Each neighbour appears once per source even when parallel links connect
//! the pair, and neighbours keep the order their first link was listed in.

use amod_core::NodeId;

/// Directly reachable node indices for every node.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    /// CSR row pointer.  Length = `node_count + 1`.
    out_start: Vec<u32>,
    targets: Vec<NodeId>,
}

impl Adjacency {
    pub fn node_count(&self) -> usize {
        self.out_start.len().saturating_sub(1)
    }

    /// Total distinct `(source, target)` pairs.
    pub fn pair_count(&self) -> usize {
        self.targets.len()
    }

    /// Neighbours of `node` in first-listed order.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        let start = self.out_start[node.index()] as usize;
        let end = self.out_start[node.index() + 1] as usize;
        &self.targets[start..end]
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// `(node, neighbours)` for every node in index order, including nodes
    /// with no outgoing links.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[NodeId])> + '_ {
        (0..self.node_count()).map(|i| {
            let n = NodeId(i as u32);
            (n, self.neighbors(n))
        })
    }
}

/// Collect `(from, to)` pairs, then [`build`](Self::build) the CSR.
pub struct AdjacencyBuilder {
    node_count: usize,
    pairs: Vec<(NodeId, NodeId)>,
}

impl AdjacencyBuilder {
    pub fn new(node_count: usize) -> Self {
        Self { node_count, pairs: Vec::new() }
    }

    pub fn with_capacity(node_count: usize, links: usize) -> Self {
        Self { node_count, pairs: Vec::with_capacity(links) }
    }

    /// Record that `to` is reachable from `from`.
    pub fn add(&mut self, from: NodeId, to: NodeId) {
        debug_assert!(from.index() < self.node_count && to.index() < self.node_count);
        self.pairs.push((from, to));
    }

    /// Time complexity: O(E log E) for the stable sort plus O(E·d) for
    /// per-source de-duplication, where d is the out-degree.
    pub fn build(self) -> Adjacency {
        let mut pairs = self.pairs;
        // Stable: keeps insertion order among a node's targets.
        pairs.sort_by_key(|&(from, _)| from.0);

        let mut out_start = vec![0u32; self.node_count + 1];
        let mut targets: Vec<NodeId> = Vec::with_capacity(pairs.len());

        let mut idx = 0;
        for node in 0..self.node_count {
            let row_start = targets.len();
            while idx < pairs.len() && pairs[idx].0.index() == node {
                let to = pairs[idx].1;
                if !targets[row_start..].contains(&to) {
                    targets.push(to);
                }
                idx += 1;
            }
            out_start[node + 1] = targets.len() as u32;
        }
        debug_assert_eq!(idx, pairs.len());

        Adjacency { out_start, targets }
    }
}
