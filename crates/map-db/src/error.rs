//! Error types for map database access.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing the map database.
#[derive(Error, Debug)]
pub enum MapDbError {
    /// The database file could not be opened.
    #[error("failed to open map database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// A query failed.
    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// A cell column of a grid row could not be decoded.
    #[error("grid {grid_id}: invalid {column} column: {source}")]
    InvalidGrid {
        grid_id: i64,
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A value does not fit the record type.
    #[error("{table} row {id}: {message}")]
    InvalidRow {
        table: &'static str,
        id: i64,
        message: String,
    },
}

impl MapDbError {
    /// Create an InvalidRow error.
    pub fn invalid_row(table: &'static str, id: i64, message: impl Into<String>) -> Self {
        Self::InvalidRow {
            table,
            id,
            message: message.into(),
        }
    }
}

/// Result type for map database operations.
pub type Result<T> = std::result::Result<T, MapDbError>;
