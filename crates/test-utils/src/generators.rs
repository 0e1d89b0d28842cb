//! Test data generators for creating synthetic map grids.
//!
//! These generators create predictable, verifiable grids that can be used
//! across the test suite.

use map_common::{CellGrid, Grid, GridPosition, GRID_SIZE};

/// Builder for [`Grid`] records with sensible defaults.
///
/// Defaults: revision 1, segment 1, position (0, 0), all heights 0 and all
/// tiles set to id 1.
///
/// # Example
///
/// ```
/// use test_utils::GridBuilder;
///
/// let grid = GridBuilder::new(42).segment(7).position(1, 0).uniform_height(50.0).build();
/// assert_eq!(grid.segment_id, 7);
/// assert_eq!(grid.heights[(10, 20)], 50.0);
/// ```
#[derive(Debug, Clone)]
pub struct GridBuilder {
    id: i64,
    revision: i64,
    segment_id: i64,
    position: GridPosition,
    heights: CellGrid<f32>,
    tiles: CellGrid<i32>,
}

impl GridBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            revision: 1,
            segment_id: 1,
            position: GridPosition::new(0, 0),
            heights: CellGrid::filled(0.0),
            tiles: CellGrid::filled(1),
        }
    }

    pub fn revision(mut self, revision: i64) -> Self {
        self.revision = revision;
        self
    }

    pub fn segment(mut self, segment_id: i64) -> Self {
        self.segment_id = segment_id;
        self
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.position = GridPosition::new(x, y);
        self
    }

    pub fn uniform_height(mut self, height: f32) -> Self {
        self.heights = CellGrid::filled(height);
        self
    }

    pub fn heights(mut self, heights: CellGrid<f32>) -> Self {
        self.heights = heights;
        self
    }

    pub fn uniform_tile(mut self, tile_id: i32) -> Self {
        self.tiles = CellGrid::filled(tile_id);
        self
    }

    pub fn tiles(mut self, tiles: CellGrid<i32>) -> Self {
        self.tiles = tiles;
        self
    }

    /// Override the tile of a single cell, keeping every other cell.
    pub fn tile_at(mut self, x: usize, y: usize, tile_id: i32) -> Self {
        let mut values: Vec<i32> = self.tiles.into();
        values[CellGrid::<i32>::flat_index(x, y)] = tile_id;
        self.tiles = CellGrid::from_vec(values).expect("cell count unchanged");
        self
    }

    pub fn build(self) -> Grid {
        Grid {
            id: self.id,
            revision: self.revision,
            segment_id: self.segment_id,
            position: self.position,
            heights: self.heights,
            tiles: self.tiles,
        }
    }
}

/// Heights increasing linearly along x: cell `(x, y)` has height `x * step`.
pub fn create_ramp_heights(step: f32) -> CellGrid<f32> {
    CellGrid::from_fn(|x, _| x as f32 * step)
}

/// Tiles in vertical stripes cycling through `ids`, one id per `width`
/// columns.
pub fn create_striped_tiles(ids: &[i32], width: usize) -> CellGrid<i32> {
    CellGrid::from_fn(|x, _| ids[(x / width.max(1)) % ids.len()])
}

/// Deterministic pseudo-random terrain heights in `[0, max_height)`.
///
/// Uses a simple hash-based approach for reproducibility.
pub fn create_terrain_heights(max_height: f32, seed: u32) -> CellGrid<f32> {
    CellGrid::from_fn(|x, y| {
        let hash = simple_hash(x as u32, y as u32, seed);
        (hash % 10_000) as f32 / 10_000.0 * max_height
    })
}

/// A row of `count` grids of one segment, placed at `(0, 0)`, `(1, 0)`, ...
pub fn create_grid_row(segment_id: i64, first_id: i64, count: usize) -> Vec<Grid> {
    (0..count)
        .map(|i| {
            GridBuilder::new(first_id + i as i64)
                .segment(segment_id)
                .position(i as i32, 0)
                .build()
        })
        .collect()
}

/// The flat JSON text stored in the database for a grid column.
pub fn cells_to_json<T: ToString>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(","))
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
