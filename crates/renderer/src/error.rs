//! Error types for rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while rendering or writing a segment image.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A segment with no grids has no bounds.
    #[error("cannot render a segment without grids")]
    EmptySegment,

    /// The canvas is zero-sized or too large to allocate.
    #[error("cannot allocate a {width}x{height} canvas")]
    CanvasAllocation { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// Writing the image file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
