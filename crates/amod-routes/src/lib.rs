//! `amod-routes` — turning solver routes back into network links.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`resolver`] | `RouteResolver`, `Resolution`, strict / lenient matching    |
//! | [`capacity`] | `CapacityMatrix`, remaining capacity per node pair          |
//! | [`batch`]    | `resolve_batch`, `BatchReport` end-of-run diagnostics       |
//! | [`trips`]    | activity → trip extraction with node snapping               |
//! | [`loader`]   | route and activity CSV loaders                              |
//! | [`error`]    | `RouteError`, `RouteResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Adds `resolve_batch_parallel` on Rayon's thread pool.     |

pub mod batch;
pub mod capacity;
pub mod error;
pub mod loader;
pub mod resolver;
pub mod trips;

#[cfg(test)]
mod tests;

pub use batch::{BatchOutcome, BatchReport, ResolvedRoute, RouteInput};
pub use capacity::CapacityMatrix;
pub use error::{RouteError, RouteResult};
pub use loader::{load_activities_csv, load_activities_reader, load_routes_csv, load_routes_reader};
pub use resolver::{Resolution, RouteResolver, Segment};
pub use trips::{extract_trips, Activity, Trip};
