//! Loading tiles and grids from a map database.

use std::path::Path;

use map_common::{index_tiles, CellGrid, Grid, GridPosition, Tile, TileMap};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::{MapDbError, Result};
use crate::schema::{GET_GRIDS, GET_TILES, INSERT_GRID, INSERT_TILE, SCHEMA_SQL};

type TileRow = (i64, i64, String, i64);
type GridRow = (i64, i64, i64, i64, i64, Vec<u8>, Vec<u8>);

/// Everything the renderer needs from one database, loaded at once.
#[derive(Debug, Clone, Default)]
pub struct MapSnapshot {
    pub tiles: TileMap,
    /// Grids in ascending id order.
    pub grids: Vec<Grid>,
}

/// Connection to a map database.
pub struct MapDatabase {
    pool: SqlitePool,
}

impl MapDatabase {
    /// Open an existing database read-only.
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|source| MapDbError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        info!(path = %path.display(), "Opened map database");

        Ok(Self { pool })
    }

    /// Create (or open) a writable database at `path` with the map schema.
    pub async fn create(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|source| MapDbError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Open an in-memory database with the map schema (for testing).
    pub async fn open_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Create the tables and indexes if they do not exist.
    pub async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA_SQL.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed).execute(&self.pool).await?;
            }
        }
        Ok(())
    }

    /// Load all tiles keyed by id.
    pub async fn load_tiles(&self) -> Result<TileMap> {
        let rows: Vec<TileRow> = sqlx::query_as(GET_TILES).fetch_all(&self.pool).await?;

        let tiles = rows
            .into_iter()
            .map(tile_from_row)
            .collect::<Result<Vec<_>>>()?;

        debug!(count = tiles.len(), "Loaded tiles");
        Ok(index_tiles(tiles))
    }

    /// Load all grids in ascending id order.
    pub async fn load_grids(&self) -> Result<Vec<Grid>> {
        let rows: Vec<GridRow> = sqlx::query_as(GET_GRIDS).fetch_all(&self.pool).await?;

        let grids = rows
            .into_iter()
            .map(grid_from_row)
            .collect::<Result<Vec<_>>>()?;

        debug!(count = grids.len(), "Loaded grids");
        Ok(grids)
    }

    /// Load tiles and grids.
    pub async fn load(&self) -> Result<MapSnapshot> {
        let tiles = self.load_tiles().await?;
        let grids = self.load_grids().await?;

        info!(tiles = tiles.len(), grids = grids.len(), "Loaded map snapshot");

        Ok(MapSnapshot { tiles, grids })
    }

    /// Insert a tile row. The color is stored as a signed `i32`, the way the
    /// recorder writes it.
    pub async fn insert_tile(&self, tile: &Tile) -> Result<()> {
        sqlx::query(INSERT_TILE)
            .bind(tile.id)
            .bind(tile.version)
            .bind(&tile.name)
            .bind(tile.color as i32)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert a grid row, storing cells as JSON blobs.
    pub async fn insert_grid(&self, grid: &Grid) -> Result<()> {
        let heights = serde_json::to_vec(&grid.heights).map_err(|source| MapDbError::InvalidGrid {
            grid_id: grid.id,
            column: "heights",
            source,
        })?;
        let tiles = serde_json::to_vec(&grid.tiles).map_err(|source| MapDbError::InvalidGrid {
            grid_id: grid.id,
            column: "tiles",
            source,
        })?;

        sqlx::query(INSERT_GRID)
            .bind(grid.id)
            .bind(grid.revision)
            .bind(grid.segment_id)
            .bind(grid.position.x)
            .bind(grid.position.y)
            .bind(heights)
            .bind(tiles)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Close the connection pool.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

fn tile_from_row((tile_id, version, name, color): TileRow) -> Result<Tile> {
    let id = i32::try_from(tile_id)
        .map_err(|_| MapDbError::invalid_row("tiles", tile_id, "tile_id out of range"))?;
    let color = decode_color(color)
        .ok_or_else(|| MapDbError::invalid_row("tiles", tile_id, format!("invalid color {}", color)))?;

    Ok(Tile {
        id,
        version,
        name,
        color,
    })
}

/// Colors are recorded as signed ARGB `i32`, so opaque colors come back
/// negative. Unsigned values written by other tools are accepted as well.
fn decode_color(value: i64) -> Option<u32> {
    i32::try_from(value)
        .map(|signed| signed as u32)
        .or_else(|_| u32::try_from(value))
        .ok()
}

fn grid_from_row(
    (grid_id, revision, segment_id, position_x, position_y, heights, tiles): GridRow,
) -> Result<Grid> {
    let x = i32::try_from(position_x)
        .map_err(|_| MapDbError::invalid_row("grids", grid_id, "position_x out of range"))?;
    let y = i32::try_from(position_y)
        .map_err(|_| MapDbError::invalid_row("grids", grid_id, "position_y out of range"))?;

    let heights: CellGrid<f32> =
        serde_json::from_slice(&heights).map_err(|source| MapDbError::InvalidGrid {
            grid_id,
            column: "heights",
            source,
        })?;
    let tiles: CellGrid<i32> =
        serde_json::from_slice(&tiles).map_err(|source| MapDbError::InvalidGrid {
            grid_id,
            column: "tiles",
            source,
        })?;

    Ok(Grid {
        id: grid_id,
        revision,
        segment_id,
        position: GridPosition::new(x, y),
        heights,
        tiles,
    })
}
