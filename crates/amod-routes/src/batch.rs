//! Batch resolution and end-of-run diagnostics.
//!
//! A batch never aborts on a per-route problem.  Failed routes keep their
//! error in [`ResolvedRoute::result`]; dropped segments and capacity
//! underflows are tallied in the [`BatchReport`], which is logged once the
//! batch completes.

use log::{info, warn};

use amod_core::ClockTime;

use crate::capacity::CapacityMatrix;
use crate::resolver::{Resolution, RouteResolver};
use crate::RouteResult;

/// One route as produced by the solver: departure time and raw node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInput {
    pub time: ClockTime,
    pub nodes: Vec<String>,
}

/// A route's departure time and its resolution (or the reason it failed).
#[derive(Debug)]
pub struct ResolvedRoute {
    pub time: ClockTime,
    pub result: RouteResult<Resolution>,
}

/// Counts gathered over one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub routes_total: usize,
    pub routes_resolved: usize,
    pub routes_failed: usize,
    /// Route pairs dropped because no road matched.
    pub unmatched_segments: usize,
    /// Traversals that left a capacity cell below zero.
    pub capacity_underflows: usize,
    /// Cells below zero once the batch finished.
    pub negative_cells: usize,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.routes_failed == 0
            && self.unmatched_segments == 0
            && self.capacity_underflows == 0
            && self.negative_cells == 0
    }

    fn record(&mut self, result: &RouteResult<Resolution>) {
        self.routes_total += 1;
        match result {
            Ok(res) => {
                self.routes_resolved += 1;
                self.unmatched_segments += res.unmatched.len();
                self.capacity_underflows += res.underflows;
            }
            Err(_) => self.routes_failed += 1,
        }
    }

    /// Emit the report through `log`.  Problem counts go out at `warn`.
    pub fn log(&self) {
        info!(
            "resolved {}/{} routes ({} failed)",
            self.routes_resolved, self.routes_total, self.routes_failed
        );
        if self.unmatched_segments > 0 {
            warn!("{} route segments matched no road and were skipped", self.unmatched_segments);
        }
        if self.capacity_underflows > 0 || self.negative_cells > 0 {
            warn!(
                "{} traversals exceeded capacity; {} cells negative at end of run",
                self.capacity_underflows, self.negative_cells
            );
        }
    }
}

/// Every route's outcome, in input order, plus the batch totals.
#[derive(Debug)]
pub struct BatchOutcome {
    pub routes: Vec<ResolvedRoute>,
    pub report: BatchReport,
}

impl RouteResolver<'_> {
    /// Resolve `routes` in order, decrementing `capacity` when given.
    pub fn resolve_batch(
        &self,
        routes: &[RouteInput],
        mut capacity: Option<&mut CapacityMatrix>,
    ) -> BatchOutcome {
        let mut report = BatchReport::default();
        let mut resolved = Vec::with_capacity(routes.len());

        for route in routes {
            let result = match capacity.as_deref_mut() {
                Some(cap) => self.resolve_with_capacity(&route.nodes, cap),
                None => self.resolve(&route.nodes),
            };
            if let Err(e) = &result {
                warn!("route departing {} failed: {e}", route.time);
            }
            report.record(&result);
            resolved.push(ResolvedRoute { time: route.time, result });
        }

        report.negative_cells = capacity.map_or(0, |c| c.negative_cells());
        report.log();
        BatchOutcome { routes: resolved, report }
    }

    /// Resolve `routes` on Rayon's thread pool.
    ///
    /// The road and node tables are shared read-only; capacity cells are
    /// updated atomically so totals match a sequential run.  Which route is
    /// charged with a given underflow may differ from a sequential run.
    ///
    /// Strict capacity mode needs a check-then-apply step per route, which
    /// is not atomic across cells, so that mode falls back to
    /// [`resolve_batch`](Self::resolve_batch).
    #[cfg(feature = "parallel")]
    pub fn resolve_batch_parallel(
        &self,
        routes: &[RouteInput],
        capacity: &mut CapacityMatrix,
    ) -> BatchOutcome {
        use rayon::prelude::*;

        use crate::capacity::SharedCapacity;

        if self.mode().strict_capacity {
            warn!("strict capacity mode: resolving {} routes sequentially", routes.len());
            return self.resolve_batch(routes, Some(capacity));
        }
        if let Err(e) = self.check_shape(capacity) {
            // Every route fails the same way; let the sequential path report it.
            warn!("{e}");
            return self.resolve_batch(routes, Some(capacity));
        }

        // Freeze the cell set: every road's cell must exist before sharing.
        for (_, road) in self.roads().iter() {
            capacity.ensure_cell(road.from, road.to);
        }
        let shared = SharedCapacity::new(std::mem::take(capacity));

        let resolved: Vec<ResolvedRoute> = routes
            .par_iter()
            .map(|route| {
                let result = self.resolve(&route.nodes).map(|mut res| {
                    for &r in &res.roads {
                        if let Some(road) = self.roads().get(r) {
                            if shared.decrement(road.from, road.to) < 0.0 {
                                res.underflows += 1;
                            }
                        }
                    }
                    res
                });
                ResolvedRoute { time: route.time, result }
            })
            .collect();

        *capacity = shared.into_matrix();

        let mut report = BatchReport::default();
        for r in &resolved {
            if let Err(e) = &r.result {
                warn!("route departing {} failed: {e}", r.time);
            }
            report.record(&r.result);
        }
        report.negative_cells = capacity.negative_cells();
        report.log();
        BatchOutcome { routes: resolved, report }
    }
}
