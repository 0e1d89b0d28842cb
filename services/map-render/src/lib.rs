//! Map segment renderer service.
//!
//! Loads a map database, groups its grids by segment and writes one PNG per
//! segment. The binary in `main.rs` only parses arguments and installs the
//! log subscriber; everything else lives here so it can be tested.

pub mod config;
pub mod pipeline;

pub use config::{ConfigError, RenderConfig};
pub use pipeline::{render_snapshot, run, RenderSummary, SegmentReport};
