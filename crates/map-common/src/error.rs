//! Error types for map data.

use thiserror::Error;

/// Result type alias using MapError.
pub type MapResult<T> = Result<T, MapError>;

/// Errors raised while building or interpreting map records.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("cell array has {actual} entries, expected {expected}")]
    InvalidCellCount { expected: usize, actual: usize },

    #[error("invalid cell data: {0}")]
    InvalidCellData(String),

    #[error("unknown render kind '{0}', expected 'tiles' or 'heights'")]
    UnknownRenderKind(String),
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        MapError::InvalidCellData(format!("JSON error: {}", err))
    }
}
