//! Per-link numeric tables handed to the external solver.
//!
//! Both tables have exactly one row per link, in link insertion order, so
//! row `i` always describes `RoadId(i)`.

use amod_core::NodeId;

use crate::road::LinkTable;

/// `(start, end, seconds)`: free-flow traversal time of one link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelTimeRow {
    pub start: NodeId,
    pub end: NodeId,
    pub seconds: f64,
}

/// `(start, end, capacity)`: nominal capacity of one link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityRow {
    pub start: NodeId,
    pub end: NodeId,
    pub capacity: f64,
}

pub fn build_travel_time_matrix(links: &LinkTable) -> Vec<TravelTimeRow> {
    links
        .iter()
        .map(|l| TravelTimeRow { start: l.from, end: l.to, seconds: l.travel_secs() })
        .collect()
}

pub fn build_capacity_matrix(links: &LinkTable) -> Vec<CapacityRow> {
    links
        .iter()
        .map(|l| CapacityRow { start: l.from, end: l.to, capacity: l.capacity })
        .collect()
}
