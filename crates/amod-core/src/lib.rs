//! `amod-core` — foundational types shared by every `amod-*` crate.
//!
//! This crate has no `amod-*` dependencies and keeps its external ones to
//! `thiserror`, `serde` and `serde_json`.
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `RoadId`                                        |
//! | [`geo`]      | `Location`, clockwise rotation, planar distance           |
//! | [`time`]     | `ClockTime` (`HH:MM:SS` wall clock), duration parsing     |
//! | [`config`]   | `PipelineConfig` and its sections, `IndexBase`            |
//! | [`error`]    | `CoreError`, `CoreResult`                                 |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{IndexBase, NetworkConfig, OutputConfig, PipelineConfig, ResolveConfig};
pub use error::{CoreError, CoreResult};
pub use geo::Location;
pub use ids::{NodeId, RoadId};
pub use time::ClockTime;
