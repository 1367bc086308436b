//! Error types for brio-core.

use thiserror::Error;

/// Error type for graph, clock, and scheduler operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Scheduler queue is full")]
    SchedulerFull,
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
