//! Network record sources.
//!
//! # CSV format
//!
//! Two files, each with a header row:
//!
//! ```csv
//! id,x,y
//! 100,-73.99,40.75
//! 101,-73.98,40.76
//! ```
//!
//! ```csv
//! id,from,to,capacity,freespeed,length
//! L1,100,101,1800,13.9,250.0
//! ```
//!
//! `x` is longitude and `y` latitude, as in the network source format.
//!
//! # JSON format
//!
//! A single document holding both collections:
//!
//! ```json
//! { "nodes": [ { "id": "100", "x": -73.99, "y": 40.75 } ],
//!   "links": [ { "id": "L1", "from": "100", "to": "101",
//!                "capacity": 1800, "freespeed": 13.9, "length": 250.0 } ] }
//! ```
//!
//! Any malformed row aborts the read with [`NetworkError::Parse`] naming the
//! file and line.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{NetworkError, NetworkResult};

// ── Records ───────────────────────────────────────────────────────────────────

/// A raw node record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// A raw link record.  Endpoints are raw node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: String,
    pub from: String,
    pub to: String,
    pub capacity: f64,
    pub freespeed: f64,
    pub length: f64,
}

/// Both record collections of one network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecords {
    pub nodes: Vec<NodeRecord>,
    pub links: Vec<LinkRecord>,
}

// ── CSV ───────────────────────────────────────────────────────────────────────

/// Read every row of a headed CSV source into `T`.
///
/// `name` labels the source in error messages.
pub fn read_csv_records<T, R>(reader: R, name: &str) -> NetworkResult<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<T>()
        .map(|row| row.map_err(|e| csv_error(name, e)))
        .collect()
}

/// Read nodes and links from two CSV sources.
pub fn read_network_csv<N: Read, L: Read>(nodes: N, links: L) -> NetworkResult<NetworkRecords> {
    Ok(NetworkRecords {
        nodes: read_csv_records(nodes, "nodes")?,
        links: read_csv_records(links, "links")?,
    })
}

/// Read `nodes.csv` and `links.csv` from `dir`.
pub fn read_network_csv_dir(dir: &Path) -> NetworkResult<NetworkRecords> {
    let nodes = File::open(dir.join("nodes.csv"))?;
    let links = File::open(dir.join("links.csv"))?;
    read_network_csv(nodes, links)
}

fn csv_error(name: &str, e: csv::Error) -> NetworkError {
    if e.is_io_error() {
        return NetworkError::Csv(e);
    }
    let record = match e.position() {
        Some(pos) => format!("{name} line {}", pos.line()),
        None => name.to_owned(),
    };
    NetworkError::Parse { record, reason: e.to_string() }
}

// ── JSON ──────────────────────────────────────────────────────────────────────

/// Read a JSON network document.
pub fn read_network_json<R: Read>(reader: R) -> NetworkResult<NetworkRecords> {
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            NetworkError::Json(e)
        } else {
            NetworkError::Parse {
                record: format!("network document line {}", e.line()),
                reason: e.to_string(),
            }
        }
    })
}

pub fn read_network_json_path(path: &Path) -> NetworkResult<NetworkRecords> {
    read_network_json(BufReader::new(File::open(path)?))
}
