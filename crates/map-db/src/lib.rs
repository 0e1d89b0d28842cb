//! Map database access.
//!
//! The map database is a SQLite file with two tables:
//!
//! - `tiles(tile_id, version, name, color)`
//! - `grids(grid_id, revision, segment_id, position_x, position_y, heights, tiles)`
//!
//! `heights` and `tiles` hold JSON arrays of `GRID_SIZE * GRID_SIZE` numbers,
//! stored as TEXT or BLOB.

pub mod database;
pub mod error;
pub mod schema;

pub use database::{MapDatabase, MapSnapshot};
pub use error::{MapDbError, Result};
