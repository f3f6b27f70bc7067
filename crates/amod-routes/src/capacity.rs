//! Remaining road capacity.
//!
//! Logically a square `N × N` table indexed by `(start, end)`.  Only pairs
//! joined by at least one road can be non-zero, so cells are stored sparsely:
//! a slot map from pair to a dense `Vec<f64>`.  Reading a pair with no road
//! returns `0.0`.
//!
//! Parallel roads between the same ordered pair share one cell holding the
//! sum of their capacities.
//!
//! Values are not floored: a decrement past zero leaves the cell negative.
//! Callers that must not overcommit check [`CapacityMatrix::get`] first (see
//! strict capacity mode in [`RouteResolver`](crate::RouteResolver)).

use rustc_hash::FxHashMap;

use amod_core::NodeId;
use amod_network::CapacityRow;

type Cell = (NodeId, NodeId);

/// Mutable remaining capacity per directed node pair.
#[derive(Debug, Clone, Default)]
pub struct CapacityMatrix {
    dim: usize,
    slots: FxHashMap<Cell, usize>,
    cells: Vec<Cell>,
    values: Vec<f64>,
}

impl CapacityMatrix {
    /// An all-zero `dim × dim` matrix.
    pub fn new(dim: usize) -> Self {
        Self { dim, ..Self::default() }
    }

    /// Accumulate per-link capacity rows into a `dim × dim` matrix.
    pub fn from_rows(dim: usize, rows: &[CapacityRow]) -> Self {
        let mut m = Self::new(dim);
        for row in rows {
            let slot = m.slot(row.start, row.end);
            m.values[slot] += row.capacity;
        }
        m
    }

    /// Side length `N`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Remaining capacity of `(from, to)`; `0.0` if no road joins them.
    #[inline]
    pub fn get(&self, from: NodeId, to: NodeId) -> f64 {
        self.slots.get(&(from, to)).map_or(0.0, |&s| self.values[s])
    }

    pub fn set(&mut self, from: NodeId, to: NodeId, value: f64) {
        let slot = self.slot(from, to);
        self.values[slot] = value;
    }

    /// Consume one unit of `(from, to)` and return what remains.
    #[inline]
    pub fn decrement(&mut self, from: NodeId, to: NodeId) -> f64 {
        let slot = self.slot(from, to);
        self.values[slot] -= 1.0;
        self.values[slot]
    }

    /// Number of cells currently below zero.
    pub fn negative_cells(&self) -> usize {
        self.values.iter().filter(|&&v| v < 0.0).count()
    }

    /// `(from, to, remaining)` for every stored cell, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.cells.iter().zip(&self.values).map(|(&(a, b), &v)| (a, b, v))
    }

    /// Slot of `(from, to)`, creating a zero cell on first use.
    fn slot(&mut self, from: NodeId, to: NodeId) -> usize {
        debug_assert!(from.index() < self.dim && to.index() < self.dim);
        *self.slots.entry((from, to)).or_insert_with(|| {
            self.cells.push((from, to));
            self.values.push(0.0);
            self.values.len() - 1
        })
    }

    pub(crate) fn ensure_cell(&mut self, from: NodeId, to: NodeId) {
        self.slot(from, to);
    }
}

// ── Shared capacity ───────────────────────────────────────────────────────────

#[cfg(feature = "parallel")]
pub(crate) use shared::SharedCapacity;

#[cfg(feature = "parallel")]
mod shared {
    use std::sync::atomic::{AtomicU64, Ordering};

    use rustc_hash::FxHashMap;

    use amod_core::NodeId;

    use super::{CapacityMatrix, Cell};

    /// Lock-free view of a [`CapacityMatrix`] for concurrent resolution.
    ///
    /// Each cell holds the bit pattern of an `f64`; a decrement is a
    /// compare-and-swap loop, so two workers hitting the same cell never
    /// lose an update.  The cell set is frozen at construction.
    pub(crate) struct SharedCapacity {
        dim: usize,
        slots: FxHashMap<Cell, usize>,
        cells: Vec<Cell>,
        values: Vec<AtomicU64>,
    }

    impl SharedCapacity {
        pub(crate) fn new(matrix: CapacityMatrix) -> Self {
            Self {
                dim: matrix.dim,
                slots: matrix.slots,
                cells: matrix.cells,
                values: matrix.values.into_iter().map(|v| AtomicU64::new(v.to_bits())).collect(),
            }
        }

        /// Consume one unit and return what remains.
        ///
        /// The cell must exist; callers register every road's cell first.
        pub(crate) fn decrement(&self, from: NodeId, to: NodeId) -> f64 {
            let slot = self.slots[&(from, to)];
            let prev = self.values[slot]
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                    Some((f64::from_bits(bits) - 1.0).to_bits())
                })
                .unwrap_or_else(|bits| bits);
            f64::from_bits(prev) - 1.0
        }

        pub(crate) fn into_matrix(self) -> CapacityMatrix {
            CapacityMatrix {
                dim: self.dim,
                slots: self.slots,
                cells: self.cells,
                values: self.values.into_iter().map(|a| f64::from_bits(a.into_inner())).collect(),
            }
        }
    }
}
