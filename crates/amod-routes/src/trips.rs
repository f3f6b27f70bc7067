//! Located activities to origin/destination trips.
//!
//! Consecutive activities of one person form a trip from the node nearest
//! the first activity to the node nearest the second.  The trip departs when
//! the earlier activity ends:
//!
//! - at its `end_time` if set;
//! - otherwise at the previous departure plus its `dur`, wrapping past
//!   midnight;
//! - otherwise at the previous departure.
//!
//! The first departure of each person starts from midnight.

use amod_core::{ClockTime, Location, NodeId};
use amod_network::NodeLocator;

use crate::RouteResult;

/// One located plan step.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub person: String,
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
    pub end_time: Option<ClockTime>,
    pub dur_secs: Option<u64>,
}

impl Activity {
    fn departure_after(&self, previous: ClockTime) -> ClockTime {
        match (self.end_time, self.dur_secs) {
            (Some(end), _) => end,
            (None, Some(dur)) => previous.wrapping_add_secs(dur),
            (None, None) => previous,
        }
    }
}

/// A single origin/destination demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub person: String,
    pub source: NodeId,
    pub sink: NodeId,
    pub time: ClockTime,
}

/// Build trips from activities grouped in contiguous per-person runs.
///
/// Activity coordinates are rotated by `rotation_degrees` before snapping so
/// they land in the same plane as the locator's location table.
pub fn extract_trips(
    activities: &[Activity],
    locator: &dyn NodeLocator,
    rotation_degrees: f64,
) -> RouteResult<Vec<Trip>> {
    let mut trips = Vec::new();

    for plan in activities.chunk_by(|a, b| a.person == b.person) {
        let mut departure = ClockTime::MIDNIGHT;
        let mut last: Option<NodeId> = None;

        for act in plan {
            let query = Location::from_xy(act.x, act.y).rotated(rotation_degrees);
            let node = locator.closest(query)?;
            if let Some(source) = last {
                trips.push(Trip { person: act.person.clone(), source, sink: node, time: departure });
            }
            last = Some(node);
            departure = act.departure_after(departure);
        }
    }

    Ok(trips)
}
