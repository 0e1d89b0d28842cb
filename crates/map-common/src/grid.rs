//! Grid records and their fixed-size cell storage.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::{MapError, MapResult};

/// Number of cells along one edge of a grid.
pub const GRID_SIZE: usize = 100;

/// Total number of cells in a grid.
pub const CELLS_PER_GRID: usize = GRID_SIZE * GRID_SIZE;

/// Edge length of one cell in pixels.
pub const TILE_SIZE: f64 = 11.0;

/// Position of a grid inside its segment, in grid units (not pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Per-cell values of a single grid.
///
/// Storage is row-major: cell `(x, y)` lives at flat index
/// `x + y * GRID_SIZE`. The length is always exactly [`CELLS_PER_GRID`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<T>", into = "Vec<T>")]
#[serde(bound(
    serialize = "T: Clone + Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct CellGrid<T> {
    values: Vec<T>,
}

impl<T> CellGrid<T> {
    /// Wrap a flat row-major vector, rejecting any length other than
    /// `CELLS_PER_GRID`.
    pub fn from_vec(values: Vec<T>) -> MapResult<Self> {
        if values.len() != CELLS_PER_GRID {
            return Err(MapError::InvalidCellCount {
                expected: CELLS_PER_GRID,
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut values = Vec::with_capacity(CELLS_PER_GRID);
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                values.push(f(x, y));
            }
        }
        Self { values }
    }

    /// Flat index of cell `(x, y)`.
    #[inline]
    pub fn flat_index(x: usize, y: usize) -> usize {
        x + y * GRID_SIZE
    }

    /// Value of cell `(x, y)`, or `None` outside `[0, GRID_SIZE)`.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return None;
        }
        self.values.get(Self::flat_index(x, y))
    }

    /// Iterate `(x, y, value)` in storage order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i % GRID_SIZE, i / GRID_SIZE, v))
    }

    /// Read-only flat view in storage order.
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: Clone> CellGrid<T> {
    /// A grid with every cell set to `value`.
    pub fn filled(value: T) -> Self {
        Self {
            values: vec![value; CELLS_PER_GRID],
        }
    }
}

impl<T> Index<(usize, usize)> for CellGrid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(
            x < GRID_SIZE && y < GRID_SIZE,
            "cell ({}, {}) outside {}x{} grid",
            x,
            y,
            GRID_SIZE,
            GRID_SIZE
        );
        &self.values[Self::flat_index(x, y)]
    }
}

impl<T> TryFrom<Vec<T>> for CellGrid<T> {
    type Error = MapError;

    fn try_from(values: Vec<T>) -> MapResult<Self> {
        Self::from_vec(values)
    }
}

impl<T> From<CellGrid<T>> for Vec<T> {
    fn from(grid: CellGrid<T>) -> Self {
        grid.values
    }
}

/// One 100x100 block of the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub id: i64,
    pub revision: i64,
    pub segment_id: i64,
    pub position: GridPosition,
    pub heights: CellGrid<f32>,
    /// Tile id per cell; ids missing from the tile table are allowed.
    pub tiles: CellGrid<i32>,
}

impl Grid {
    /// Largest height over all cells.
    pub fn max_height(&self) -> f32 {
        self.heights
            .values()
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }
}
