//! Rasterization of map segments into PNG images.
//!
//! - [`color`]: tile color decoding and the height heat ramp
//! - [`raster`]: segment bounds and cell painting
//! - [`png`]: PNG encoding
//! - [`output`]: file naming and writing

pub mod color;
pub mod error;
pub mod output;
pub mod png;
pub mod raster;

pub use color::{heat_color, rgb_color, Rgb};
pub use error::{RenderError, Result};
pub use output::{segment_image_path, write_segment_image};
pub use raster::{
    render_heights, render_segment, render_tiles, resolve_tile_color, Canvas, CellColor,
    DiagnosticSink, MissingTile, SegmentBounds, TracingSink,
};
