//! The `TableWriter` trait implemented by artifact writers.

use amod_core::Location;
use amod_network::{Adjacency, CapacityRow, Network, NodeTable, RoadTable, TravelTimeRow};
use amod_routes::{CapacityMatrix, Trip};

use crate::row::RouteRow;
use crate::OutputResult;

/// One method per artifact table.
///
/// Each table is written in one call; writing the same table again replaces
/// it.  Index columns are zero-based on input and translated by the writer.
pub trait TableWriter {
    /// `start,end,seconds`, one row per link.
    fn write_travel_times(&mut self, rows: &[TravelTimeRow]) -> OutputResult<()>;

    /// `start,end,capacity`, one row per link.
    fn write_capacities(&mut self, rows: &[CapacityRow]) -> OutputResult<()>;

    /// `start,end,capacity` for every cell of a consumed capacity matrix.
    fn write_remaining_capacity(&mut self, matrix: &CapacityMatrix) -> OutputResult<()>;

    /// `lat,long`, one row per node in index order.
    fn write_locations(&mut self, locations: &[Location]) -> OutputResult<()>;

    /// `lat,long`, a single row.
    fn write_reference(&mut self, reference: Location) -> OutputResult<()>;

    /// `node,neighbors` with neighbors space-separated.
    fn write_adjacency(&mut self, adjacency: &Adjacency) -> OutputResult<()>;

    /// `id,start,end` with raw node ids.
    fn write_roads(&mut self, roads: &RoadTable, nodes: &NodeTable) -> OutputResult<()>;

    /// `id,x,y` with raw ids and source coordinates, in index order.
    fn write_nodes(&mut self, nodes: &NodeTable) -> OutputResult<()>;

    /// `time,links` with link ids space-separated.
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()>;

    /// `source,sink,time`.
    fn write_trips(&mut self, trips: &[Trip]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;

    /// Write every table derived from `network`.
    fn write_network(&mut self, network: &Network) -> OutputResult<()> {
        self.write_travel_times(&network.travel_time_rows())?;
        self.write_capacities(&network.capacity_rows())?;
        self.write_locations(network.locations())?;
        self.write_reference(network.reference())?;
        self.write_adjacency(&network.adjacency)?;
        self.write_roads(network.roads(), &network.nodes)?;
        self.write_nodes(&network.nodes)
    }
}
