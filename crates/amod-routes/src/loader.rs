//! CSV loaders for solver routes and located activities.
//!
//! # Route file
//!
//! One row per route; `nodes` holds raw node ids separated by whitespace.
//!
//! ```csv
//! time,nodes
//! 07:15:00,900 17 4242
//! 07:20:30,17 4242
//! ```
//!
//! # Activity file
//!
//! One row per activity; a person's rows must be contiguous and in plan
//! order.  Each row sets either `end_time` or `dur` (both `HH:MM[:SS]`);
//! `x` is longitude and `y` latitude, as in the network source.  Coordinates
//! must be finite.
//!
//! ```csv
//! person,x,y,end_time,dur
//! p1,-73.99,40.75,07:30:00,
//! p1,-73.95,40.78,,08:00
//! p1,-73.99,40.75,,
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use amod_core::time::parse_duration_secs;
use amod_core::ClockTime;

use crate::batch::RouteInput;
use crate::trips::Activity;
use crate::{RouteError, RouteResult};

#[derive(Deserialize)]
struct RouteRecord {
    time: ClockTime,
    nodes: String,
}

#[derive(Deserialize)]
struct ActivityRecord {
    person: String,
    x: f64,
    y: f64,
    end_time: Option<String>,
    dur: Option<String>,
}

pub fn load_routes_csv(path: &Path) -> RouteResult<Vec<RouteInput>> {
    load_routes_reader(File::open(path)?)
}

/// Like [`load_routes_csv`] but accepts any `Read` source.
pub fn load_routes_reader<R: Read>(reader: R) -> RouteResult<Vec<RouteInput>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<RouteRecord>()
        .map(|row| {
            let row = row.map_err(csv_error)?;
            Ok(RouteInput {
                time: row.time,
                nodes: row.nodes.split_whitespace().map(str::to_owned).collect(),
            })
        })
        .collect()
}

pub fn load_activities_csv(path: &Path) -> RouteResult<Vec<Activity>> {
    load_activities_reader(File::open(path)?)
}

/// Like [`load_activities_csv`] but accepts any `Read` source.
pub fn load_activities_reader<R: Read>(reader: R) -> RouteResult<Vec<Activity>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<ActivityRecord>()
        .enumerate()
        .map(|(i, row)| {
            let row = row.map_err(csv_error)?;
            if !row.x.is_finite() || !row.y.is_finite() {
                return Err(RouteError::Parse(format!(
                    "activity row {} (person {}): non-finite coordinate ({}, {})",
                    i + 1,
                    row.person,
                    row.x,
                    row.y
                )));
            }
            Ok(Activity {
                end_time: non_empty(row.end_time.as_deref()).map(str::parse::<ClockTime>).transpose()?,
                dur_secs: non_empty(row.dur.as_deref()).map(parse_duration_secs).transpose()?,
                person: row.person,
                x: row.x,
                y: row.y,
            })
        })
        .collect()
}

/// I/O failures stay `Csv`; anything wrong with the row itself is `Parse`.
fn csv_error(e: csv::Error) -> RouteError {
    if e.is_io_error() {
        RouteError::Csv(e)
    } else {
        RouteError::Parse(e.to_string())
    }
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}
