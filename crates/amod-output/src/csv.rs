//! CSV output backend.
//!
//! Every table lands in its own file under the output directory:
//!
//! | File                       | Header               |
//! |----------------------------|----------------------|
//! | `travel_times.csv`         | `start,end,seconds`  |
//! | `capacities.csv`           | `start,end,capacity` |
//! | `remaining_capacity.csv`   | `start,end,capacity` |
//! | `locations.csv`            | `lat,long`           |
//! | `reference.csv`            | `lat,long`           |
//! | `adjacency.csv`            | `node,neighbors`     |
//! | `roads.csv`                | `id,start,end`       |
//! | `nodes.csv`                | `id,x,y`             |
//! | `routes.csv`               | `time,links`         |
//! | `trips.csv`                | `source,sink,time`   |

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::Writer;
use log::debug;

use amod_core::{IndexBase, Location, NodeId, OutputConfig};
use amod_network::{Adjacency, CapacityRow, NodeTable, RoadTable, TravelTimeRow};
use amod_routes::{CapacityMatrix, Trip};

use crate::row::RouteRow;
use crate::writer::TableWriter;
use crate::OutputResult;

pub const TRAVEL_TIMES: &str = "travel_times.csv";
pub const CAPACITIES: &str = "capacities.csv";
pub const REMAINING_CAPACITY: &str = "remaining_capacity.csv";
pub const LOCATIONS: &str = "locations.csv";
pub const REFERENCE: &str = "reference.csv";
pub const ADJACENCY: &str = "adjacency.csv";
pub const ROADS: &str = "roads.csv";
pub const NODES: &str = "nodes.csv";
pub const ROUTES: &str = "routes.csv";
pub const TRIPS: &str = "trips.csv";

/// Writes artifact tables as CSV files in one directory.
pub struct CsvTableWriter {
    dir:        PathBuf,
    index_base: IndexBase,
    open:       Vec<(&'static str, Writer<File>)>,
}

impl CsvTableWriter {
    /// Create `dir` if needed.  Files are created as tables are written.
    pub fn new(dir: &Path, index_base: IndexBase) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf(), index_base, open: Vec::new() })
    }

    pub fn from_config(config: &OutputConfig) -> OutputResult<Self> {
        Self::new(&config.dir, config.index_base)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Open `name` fresh and write its header.
    fn table(&mut self, name: &'static str, header: &[&str]) -> OutputResult<&mut Writer<File>> {
        // Drop any earlier writer for this file before truncating it.
        self.open.retain(|(n, _)| *n != name);
        let mut writer = Writer::from_path(self.dir.join(name))?;
        writer.write_record(header)?;
        let slot = self.open.len();
        self.open.push((name, writer));
        Ok(&mut self.open[slot].1)
    }

    fn index(&self, id: NodeId) -> String {
        self.index_base.apply(id.index()).to_string()
    }

    fn write_pairs<I>(&mut self, name: &'static str, header: &[&str], rows: I) -> OutputResult<()>
    where
        I: IntoIterator<Item = (NodeId, NodeId, f64)>,
    {
        let base = self.index_base;
        let out = self.table(name, header)?;
        let mut n = 0usize;
        for (start, end, value) in rows {
            out.write_record(&[
                base.apply(start.index()).to_string(),
                base.apply(end.index()).to_string(),
                value.to_string(),
            ])?;
            n += 1;
        }
        debug!("wrote {n} rows to {name}");
        Ok(())
    }
}

impl TableWriter for CsvTableWriter {
    fn write_travel_times(&mut self, rows: &[TravelTimeRow]) -> OutputResult<()> {
        self.write_pairs(
            TRAVEL_TIMES,
            &["start", "end", "seconds"],
            rows.iter().map(|r| (r.start, r.end, r.seconds)),
        )
    }

    fn write_capacities(&mut self, rows: &[CapacityRow]) -> OutputResult<()> {
        self.write_pairs(
            CAPACITIES,
            &["start", "end", "capacity"],
            rows.iter().map(|r| (r.start, r.end, r.capacity)),
        )
    }

    fn write_remaining_capacity(&mut self, matrix: &CapacityMatrix) -> OutputResult<()> {
        self.write_pairs(REMAINING_CAPACITY, &["start", "end", "capacity"], matrix.iter())
    }

    fn write_locations(&mut self, locations: &[Location]) -> OutputResult<()> {
        let out = self.table(LOCATIONS, &["lat", "long"])?;
        for loc in locations {
            out.write_record(&[loc.lat.to_string(), loc.long.to_string()])?;
        }
        debug!("wrote {} rows to {LOCATIONS}", locations.len());
        Ok(())
    }

    fn write_reference(&mut self, reference: Location) -> OutputResult<()> {
        let out = self.table(REFERENCE, &["lat", "long"])?;
        out.write_record(&[reference.lat.to_string(), reference.long.to_string()])?;
        Ok(())
    }

    fn write_adjacency(&mut self, adjacency: &Adjacency) -> OutputResult<()> {
        let rows: Vec<[String; 2]> = adjacency
            .iter()
            .map(|(node, neighbors)| {
                let joined = neighbors.iter().map(|&n| self.index(n)).collect::<Vec<_>>().join(" ");
                [self.index(node), joined]
            })
            .collect();

        let out = self.table(ADJACENCY, &["node", "neighbors"])?;
        for row in &rows {
            out.write_record(row)?;
        }
        debug!("wrote {} rows to {ADJACENCY}", rows.len());
        Ok(())
    }

    fn write_roads(&mut self, roads: &RoadTable, nodes: &NodeTable) -> OutputResult<()> {
        let out = self.table(ROADS, &["id", "start", "end"])?;
        for rec in roads.records(nodes) {
            out.write_record(&[rec.id, rec.start, rec.end])?;
        }
        debug!("wrote {} rows to {ROADS}", roads.len());
        Ok(())
    }

    fn write_nodes(&mut self, nodes: &NodeTable) -> OutputResult<()> {
        let out = self.table(NODES, &["id", "x", "y"])?;
        for rec in nodes.records() {
            out.write_record(&[rec.id, rec.x.to_string(), rec.y.to_string()])?;
        }
        debug!("wrote {} rows to {NODES}", nodes.len());
        Ok(())
    }

    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
        let out = self.table(ROUTES, &["time", "links"])?;
        for row in rows {
            out.write_record(&[row.time.to_string(), row.links.join(" ")])?;
        }
        debug!("wrote {} rows to {ROUTES}", rows.len());
        Ok(())
    }

    fn write_trips(&mut self, trips: &[Trip]) -> OutputResult<()> {
        let base = self.index_base;
        let out = self.table(TRIPS, &["source", "sink", "time"])?;
        for trip in trips {
            out.write_record(&[
                base.apply(trip.source.index()).to_string(),
                base.apply(trip.sink.index()).to_string(),
                trip.time.to_string(),
            ])?;
        }
        debug!("wrote {} rows to {TRIPS}", trips.len());
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        for (_, writer) in &mut self.open {
            writer.flush()?;
        }
        self.open.clear();
        Ok(())
    }
}
