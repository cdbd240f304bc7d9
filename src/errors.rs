/*!
 * Error types for the levelgrid library.
 *
 * This module contains custom error types for the grid pipeline and the
 * application layer around it, using the thiserror crate for ergonomic
 * error definitions.
 */

use thiserror::Error;

/// Errors that can occur while turning raw model output into a canonical grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Unknown dialect, or a shape enforcement mode missing its dimension
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input that cannot be interpreted, e.g. an empty vertical encoding
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A normalization stage received a grid without any row
    #[error("Grid has no rows to normalize")]
    EmptyGrid,
}

/// Result type for grid pipeline operations
pub type GridResult<T> = std::result::Result<T, GridError>;

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the grid pipeline
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
