//! Error types for Sluice Core

use crate::limits::ValidationError;
use thiserror::Error;

/// Result type alias using Sluice's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Sluice error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    #[error("Vertex already exists: {0}")]
    DuplicateVertex(String),

    #[error("Invalid direction: {0} (expected outgoing, incoming or both)")]
    InvalidDirection(String),

    #[error("Invalid comparison: {0} (expected eq, ne, gt, ge, lt or le)")]
    InvalidComparison(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
