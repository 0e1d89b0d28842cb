//! Common test fixtures for map-render tests.
//!
//! This module provides pre-defined tiles and grids that represent common
//! scenarios in a recorded map database.

use map_common::{index_tiles, Tile, TileMap};

/// Tile ids used by the fixture tile table.
pub mod tile_ids {
    pub const GRASS: i32 = 1;
    pub const WATER: i32 = 2;
    pub const SAND: i32 = 3;
    pub const ROCK: i32 = 4;

    /// An id that is never present in [`super::tile_table`].
    pub const UNKNOWN: i32 = 9999;
}

/// Packed colors of the fixture tiles.
pub mod colors {
    pub const GRASS: u32 = 0x00FF00;
    pub const WATER: u32 = 0x0000FF;
    pub const SAND: u32 = 0xFFFF00;
    pub const ROCK: u32 = 0x808080;
}

/// The fixture tiles as a list, ordered by id.
pub fn tile_list() -> Vec<Tile> {
    vec![
        Tile::new(tile_ids::GRASS, 1, "gfx/tiles/grass", colors::GRASS),
        Tile::new(tile_ids::WATER, 1, "gfx/tiles/water", colors::WATER),
        Tile::new(tile_ids::SAND, 2, "gfx/tiles/sand", colors::SAND),
        Tile::new(tile_ids::ROCK, 1, "gfx/tiles/rock", colors::ROCK),
    ]
}

/// The fixture tiles keyed by id.
pub fn tile_table() -> TileMap {
    index_tiles(tile_list())
}

/// A fresh temporary directory for rendered output.
///
/// The directory is removed when the returned guard is dropped.
pub fn temp_output_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create temporary directory")
}
