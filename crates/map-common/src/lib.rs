//! Common types shared across the map-render crates.
//!
//! A map is a set of segments. Each segment is made of square grids of
//! `GRID_SIZE x GRID_SIZE` cells, and every cell carries a height and a
//! tile id.

pub mod error;
pub mod grid;
pub mod kind;
pub mod segment;
pub mod tile;

pub use error::{MapError, MapResult};
pub use grid::{CellGrid, Grid, GridPosition, CELLS_PER_GRID, GRID_SIZE, TILE_SIZE};
pub use kind::RenderKind;
pub use segment::{group_by_segment, Segments};
pub use tile::{index_tiles, Tile, TileMap};
