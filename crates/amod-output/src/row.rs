//! Row types that have no home in the network or routes crates.

use amod_core::ClockTime;
use amod_routes::{BatchOutcome, RouteResolver};

/// One resolved route as written to `routes.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRow {
    pub time:  ClockTime,
    /// Link ids in traversal order.
    pub links: Vec<String>,
}

impl RouteRow {
    /// Rows for every route of `outcome` that resolved.  Failed routes are
    /// skipped; they are already counted in the batch report.
    pub fn from_outcome(resolver: &RouteResolver<'_>, outcome: &BatchOutcome) -> Vec<RouteRow> {
        outcome
            .routes
            .iter()
            .filter_map(|route| {
                let res = route.result.as_ref().ok()?;
                Some(RouteRow {
                    time:  route.time,
                    links: resolver.link_ids(res).map(str::to_owned).collect(),
                })
            })
            .collect()
    }
}
