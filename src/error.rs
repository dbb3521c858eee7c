//! Error types for bhgrav.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Insertion or summarization recursed past the configured depth limit.
    /// Almost always two bodies at (nearly) the same position.
    #[error("maximum tree depth exceeded: depth {depth} > max_depth {max_depth}")]
    DepthExceeded { depth: usize, max_depth: usize },

    #[error("cannot build a tree over an empty system")]
    EmptySystem,

    #[error("invalid body '{name}': {reason}")]
    InvalidBody { name: String, reason: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
