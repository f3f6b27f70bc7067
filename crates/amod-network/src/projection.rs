//! Location projection and the reference anchor.

use amod_core::Location;

use crate::node_table::NodeTable;
use crate::{NetworkError, NetworkResult};

/// Fraction of each span the reference point sits outside the bounding box.
pub const REFERENCE_MARGIN: f64 = 0.005;

/// Location table in index order, rotated clockwise by `rotation_degrees`.
pub fn project_locations(nodes: &NodeTable, rotation_degrees: f64) -> Vec<Location> {
    nodes
        .locations()
        .iter()
        .map(|loc| loc.rotated(rotation_degrees))
        .collect()
}

/// Anchor slightly south-west of the table's bounding box:
/// `(min_lat − 0.5 %·lat_span, min_long − 0.5 %·long_span)`.
///
/// Degenerate spans (a single row, or all rows sharing a coordinate) give an
/// anchor on the minimum itself.
pub fn reference_location(locations: &[Location]) -> NetworkResult<Location> {
    let first = locations.first().ok_or(NetworkError::EmptyTable)?;

    let (mut min_lat, mut max_lat) = (first.lat, first.lat);
    let (mut min_long, mut max_long) = (first.long, first.long);
    for loc in &locations[1..] {
        min_lat = min_lat.min(loc.lat);
        max_lat = max_lat.max(loc.lat);
        min_long = min_long.min(loc.long);
        max_long = max_long.max(loc.long);
    }

    Ok(Location {
        lat: min_lat - REFERENCE_MARGIN * (max_lat - min_lat),
        long: min_long - REFERENCE_MARGIN * (max_long - min_long),
    })
}
