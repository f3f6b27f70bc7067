//! `amod-network` — network indexing, numeric tables, and node snapping.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`source`]      | `NodeRecord`, `LinkRecord`, CSV / JSON readers            |
//! | [`node_table`]  | `NodeTable`, raw id ↔ dense `NodeId`                     |
//! | [`road`]        | `LinkTable`, `RoadTable`, length normalization            |
//! | [`adjacency`]   | `Adjacency` (CSR), `AdjacencyBuilder`                     |
//! | [`matrix`]      | travel-time and capacity rows                             |
//! | [`projection`]  | location rotation, reference anchor                       |
//! | [`loader`]      | `NetworkLoader`, `Network`, `parse_links`                 |
//! | [`locate`]      | `NodeLocator` trait, linear and R-tree locators           |
//! | [`error`]       | `NetworkError`, `NetworkResult<T>`                        |

pub mod adjacency;
pub mod error;
pub mod loader;
pub mod locate;
pub mod matrix;
pub mod node_table;
pub mod projection;
pub mod road;
pub mod source;


pub use adjacency::{Adjacency, AdjacencyBuilder};
pub use error::{NetworkError, NetworkResult};
pub use loader::{parse_links, Network, NetworkLoader};
pub use locate::{find_closest_node, IndexedLocator, LinearLocator, NodeLocator};
pub use matrix::{CapacityRow, TravelTimeRow};
pub use node_table::NodeTable;
pub use projection::{project_locations, reference_location};
pub use road::{normalize_length, Link, LinkTable, Road, RoadRecord, RoadTable};
pub use source::{LinkRecord, NetworkRecords, NodeRecord};
