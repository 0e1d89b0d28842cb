//! Tile definitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A categorical cell type with its display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: i32,
    pub version: i64,
    pub name: String,
    /// Packed `0xAARRGGBB`; only the low 24 bits are drawn.
    pub color: u32,
}

/// Tiles keyed by id.
pub type TileMap = HashMap<i32, Tile>;

impl Tile {
    pub fn new(id: i32, version: i64, name: impl Into<String>, color: u32) -> Self {
        Self {
            id,
            version,
            name: name.into(),
            color,
        }
    }
}

/// Index a list of tiles by id. Later duplicates replace earlier ones.
pub fn index_tiles(tiles: impl IntoIterator<Item = Tile>) -> TileMap {
    tiles.into_iter().map(|tile| (tile.id, tile)).collect()
}
