//! Error type shared by generation, rendering and report writing

use thiserror::Error;

/// Errors that can occur while building, drawing or reporting a network
#[derive(Error, Debug)]
pub enum NetworkError {
    /// More edges were requested than a simple graph on `nodes` nodes can hold
    #[error("cannot place {requested} edges in a simple graph on {nodes} nodes (maximum is {max})")]
    TooManyEdges {
        requested: usize,
        nodes: usize,
        max: usize,
    },

    /// More nodes were requested than the graph index type can address
    #[error("cannot build a network of {requested} nodes (maximum is {max})")]
    TooManyNodes { requested: usize, max: usize },

    /// An edge endpoint does not name a node of the network
    #[error("node {node} is out of range for a network of {nodes} nodes")]
    NodeOutOfRange { node: usize, nodes: usize },

    /// Simple graphs carry no self-loops
    #[error("self-loop on node {0} is not allowed")]
    SelfLoop(usize),

    /// The requested output format has no registered writer
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Drawing a plot failed
    #[error("plot error: {0}")]
    Plot(String),

    /// A serialization/rendering error occurred while writing a report
    #[error("write error: {0}")]
    Write(String),
}

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;
