//! Network loading: records in, indexed numeric structures out.
//!
//! # Phases
//!
//! ```text
//! ① nodes      — NodeTable::build        (dense indices, duplicate check)
//! ② links      — parse_links             (length normalization, endpoint
//!                                         resolution, adjacency)
//! ③ locations  — project_locations       (optional clockwise rotation)
//! ④ reference  — reference_location      (south-west anchor)
//! ```
//!
//! Any failure aborts the load.  The travel-time and capacity tables are
//! derived on demand from the link table.

use log::{debug, info};

use amod_core::{Location, NetworkConfig};

use crate::adjacency::{Adjacency, AdjacencyBuilder};
use crate::matrix::{build_capacity_matrix, build_travel_time_matrix, CapacityRow, TravelTimeRow};
use crate::node_table::NodeTable;
use crate::projection::{project_locations, reference_location};
use crate::road::{normalize_length, Link, LinkTable, RoadTable};
use crate::source::{LinkRecord, NetworkRecords};
use crate::{NetworkError, NetworkResult};

// ── Link parsing ──────────────────────────────────────────────────────────────

/// Validate and index every link, building the adjacency as we go.
///
/// # Errors
///
/// - [`NetworkError::UnknownNodeReference`] if an endpoint is not in `nodes`.
/// - [`NetworkError::Parse`] for negative or non-finite capacity or length,
///   or a non-positive free speed.
pub fn parse_links<I>(links: I, nodes: &NodeTable) -> NetworkResult<(Adjacency, LinkTable)>
where
    I: IntoIterator<Item = LinkRecord>,
{
    let iter = links.into_iter();
    let (lower, _) = iter.size_hint();
    let mut adjacency = AdjacencyBuilder::with_capacity(nodes.len(), lower);
    let mut table = LinkTable::with_capacity(lower);

    for record in iter {
        validate_link(&record)?;

        let from = nodes.resolve(&record.from, || format!("link {}", record.id))?;
        let to = nodes.resolve(&record.to, || format!("link {}", record.id))?;

        let length = normalize_length(record.length);
        if length != record.length {
            debug!("link {}: rescaled tiny length {} -> {}", record.id, record.length, length);
        }

        adjacency.add(from, to);
        table.push(Link {
            id: record.id,
            from,
            to,
            capacity: record.capacity,
            freespeed: record.freespeed,
            length,
        });
    }

    Ok((adjacency.build(), table))
}

fn validate_link(record: &LinkRecord) -> NetworkResult<()> {
    let reason = if !record.capacity.is_finite() || record.capacity < 0.0 {
        format!("capacity must be a non-negative number, got {}", record.capacity)
    } else if !record.freespeed.is_finite() || record.freespeed <= 0.0 {
        format!("freespeed must be a positive number, got {}", record.freespeed)
    } else if !record.length.is_finite() || record.length < 0.0 {
        format!("length must be a non-negative number, got {}", record.length)
    } else {
        return Ok(());
    };
    Err(NetworkError::Parse { record: format!("link {}", record.id), reason })
}

// ── Network ───────────────────────────────────────────────────────────────────

/// Everything the loader produces for one network.
#[derive(Debug, Clone)]
pub struct Network {
    pub nodes: NodeTable,
    pub adjacency: Adjacency,
    pub links: LinkTable,
    roads: RoadTable,
    rotation_degrees: f64,
    locations: Vec<Location>,
    reference: Location,
}

impl Network {
    pub fn roads(&self) -> &RoadTable {
        &self.roads
    }

    /// Projected `(lat, long)` per node, in index order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Anchor for the downstream flat-earth transform.
    pub fn reference(&self) -> Location {
        self.reference
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub fn travel_time_rows(&self) -> Vec<TravelTimeRow> {
        build_travel_time_matrix(&self.links)
    }

    pub fn capacity_rows(&self) -> Vec<CapacityRow> {
        build_capacity_matrix(&self.links)
    }

    /// Re-project with a new rotation.  The reference location is
    /// recomputed from the new table.
    pub fn reproject(&mut self, rotation_degrees: f64) -> NetworkResult<()> {
        let locations = project_locations(&self.nodes, rotation_degrees);
        let reference = reference_location(&locations)?;
        self.locations = locations;
        self.reference = reference;
        self.rotation_degrees = rotation_degrees;
        Ok(())
    }
}

// ── NetworkLoader ─────────────────────────────────────────────────────────────

/// Runs the load phases with a fixed configuration.
pub struct NetworkLoader {
    config: NetworkConfig,
}

impl NetworkLoader {
    pub fn new(config: NetworkConfig) -> Self {
        Self { config }
    }

    pub fn load(&self, records: NetworkRecords) -> NetworkResult<Network> {
        info!("Processing {} nodes...", records.nodes.len());
        let nodes = NodeTable::build(records.nodes)?;

        info!("Processing {} links...", records.links.len());
        let (adjacency, links) = parse_links(records.links, &nodes)?;
        let roads = links.road_table();

        info!("Building locations (rotation {}°)...", self.config.rotation_degrees);
        let locations = project_locations(&nodes, self.config.rotation_degrees);

        let reference = reference_location(&locations)?;
        info!("Reference location {reference}");

        Ok(Network {
            nodes,
            adjacency,
            links,
            roads,
            rotation_degrees: self.config.rotation_degrees,
            locations,
            reference,
        })
    }
}

impl Default for NetworkLoader {
    fn default() -> Self {
        Self::new(NetworkConfig::default())
    }
}
