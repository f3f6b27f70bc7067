use thiserror::Error;

use amod_core::CoreError;
use amod_network::NetworkError;

#[derive(Debug, Error)]
pub enum RouteError {
    /// A consecutive node pair with no road between them (strict mode).
    #[error("no road from {from:?} to {to:?}")]
    UnmatchedSegment { from: String, to: String },

    /// Resolving the route would push a capacity cell below zero (strict mode).
    #[error("capacity of {from:?} -> {to:?} exhausted ({remaining} remaining, {needed} needed)")]
    CapacityUnderflow { from: String, to: String, remaining: f64, needed: u32 },

    /// The capacity matrix was sized for a different node table.
    #[error("capacity matrix is {matrix}x{matrix}, network has {nodes} nodes")]
    CapacityShape { matrix: usize, nodes: usize },

    /// A route names a node the node table does not hold (strict mode).
    #[error("route references unknown node {0:?}")]
    UnknownNodeReference(String),

    #[error("route parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type RouteResult<T> = Result<T, RouteError>;
