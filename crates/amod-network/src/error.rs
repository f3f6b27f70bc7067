//! Network-subsystem error type.
//!
//! Every variant except `EmptyTable` is a load-time failure and aborts the
//! whole load: there is no partial network.

use thiserror::Error;

/// Errors produced by `amod-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// A record was malformed or carried an invalid value.
    #[error("malformed record {record}: {reason}")]
    Parse { record: String, reason: String },

    /// A link (or persisted road) names a node the node table does not hold.
    #[error("{record} references unknown node {node:?}")]
    UnknownNodeReference { record: String, node: String },

    #[error("duplicate node id {0:?}")]
    DuplicateNode(String),

    /// A nearest-node search or reference computation ran on zero locations.
    #[error("location table is empty")]
    EmptyTable,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
