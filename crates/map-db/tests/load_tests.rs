//! Tests for loading map databases.
//!
//! Databases are created in temporary directories with the map schema,
//! filled with fixture rows and then reopened read-only.

use std::path::{Path, PathBuf};

use map_common::GridPosition;
use map_db::{MapDatabase, MapDbError};
use test_utils::{
    cells_to_json, colors, create_ramp_heights, temp_output_dir, tile_ids, tile_list, GridBuilder,
};

// ============================================================================
// Helper functions
// ============================================================================

async fn write_fixture_db(dir: &Path) -> PathBuf {
    let path = dir.join("map.db");
    let db = MapDatabase::create(&path).await.unwrap();

    for tile in tile_list() {
        db.insert_tile(&tile).await.unwrap();
    }

    // Inserted out of id order on purpose
    let grids = [
        GridBuilder::new(30).segment(2).position(0, 0).build(),
        GridBuilder::new(10)
            .segment(1)
            .position(-1, 2)
            .heights(create_ramp_heights(0.5))
            .uniform_tile(tile_ids::WATER)
            .build(),
        GridBuilder::new(20).segment(1).position(0, 2).build(),
    ];
    for grid in &grids {
        db.insert_grid(grid).await.unwrap();
    }

    db.close().await;
    path
}

// ============================================================================
// Loading tests
// ============================================================================

#[tokio::test]
async fn test_load_tiles_keyed_by_id() {
    let dir = temp_output_dir();
    let path = write_fixture_db(dir.path()).await;

    let db = MapDatabase::open(&path).await.unwrap();
    let tiles = db.load_tiles().await.unwrap();

    assert_eq!(tiles.len(), 4);
    assert_eq!(tiles[&tile_ids::WATER].color, colors::WATER);
    assert_eq!(tiles[&tile_ids::SAND].version, 2);
    assert_eq!(tiles[&tile_ids::GRASS].name, "gfx/tiles/grass");
}

#[tokio::test]
async fn test_load_grids_in_id_order() {
    let dir = temp_output_dir();
    let path = write_fixture_db(dir.path()).await;

    let db = MapDatabase::open(&path).await.unwrap();
    let grids = db.load_grids().await.unwrap();

    let ids: Vec<i64> = grids.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![10, 20, 30]);

    let first = &grids[0];
    assert_eq!(first.segment_id, 1);
    assert_eq!(first.position, GridPosition::new(-1, 2));
    assert_eq!(first.heights[(10, 0)], 5.0);
    assert_eq!(first.tiles[(99, 99)], tile_ids::WATER);
}

#[tokio::test]
async fn test_load_snapshot() {
    let dir = temp_output_dir();
    let path = write_fixture_db(dir.path()).await;

    let db = MapDatabase::open(&path).await.unwrap();
    let snapshot = db.load().await.unwrap();

    assert_eq!(snapshot.tiles.len(), 4);
    assert_eq!(snapshot.grids.len(), 3);
}

#[tokio::test]
async fn test_load_text_columns() {
    let dir = temp_output_dir();
    let path = dir.path().join("text.db");
    let db = MapDatabase::create(&path).await.unwrap();
    db.close().await;

    // Write the cell arrays as TEXT, the way a script would
    let pool = sqlx::SqlitePool::connect(&format!("sqlite://{}", path.display()))
        .await
        .unwrap();
    let heights = cells_to_json(&vec![2; map_common::CELLS_PER_GRID]);
    let tiles = cells_to_json(&vec![3; map_common::CELLS_PER_GRID]);
    sqlx::query(
        "INSERT INTO grids (grid_id, revision, segment_id, position_x, position_y, heights, tiles) \
         VALUES (1, 1, 1, 0, 0, ?, ?)",
    )
    .bind(heights)
    .bind(tiles)
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;

    let db = MapDatabase::open(&path).await.unwrap();
    let grids = db.load_grids().await.unwrap();
    assert_eq!(grids.len(), 1);
    assert_eq!(grids[0].heights[(0, 0)], 2.0);
    assert_eq!(grids[0].tiles[(0, 0)], 3);
}

#[tokio::test]
async fn test_load_signed_argb_colors() {
    let dir = temp_output_dir();
    let path = dir.path().join("argb.db");
    let db = MapDatabase::create(&path).await.unwrap();
    db.close().await;

    // Opaque ARGB colors as written by the recorder: 0xFF00FF00 and 0xFF0000FF
    let pool = sqlx::SqlitePool::connect(&format!("sqlite://{}", path.display()))
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO tiles (tile_id, version, name, color) VALUES \
         (1, 1, 'gfx/tiles/grass', -16711936), (2, 1, 'gfx/tiles/water', -16776961)",
    )
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;

    let db = MapDatabase::open(&path).await.unwrap();
    let tiles = db.load_tiles().await.unwrap();
    assert_eq!(tiles[&1].color & 0xFF_FFFF, colors::GRASS);
    assert_eq!(tiles[&2].color & 0xFF_FFFF, colors::WATER);
}

#[tokio::test]
async fn test_insert_tile_keeps_alpha_byte() {
    let db = MapDatabase::open_memory().await.unwrap();
    let tile = map_common::Tile::new(4, 1, "gfx/tiles/rock", 0xFF80_8080);
    db.insert_tile(&tile).await.unwrap();

    let tiles = db.load_tiles().await.unwrap();
    assert_eq!(tiles[&4], tile);
}

#[tokio::test]
async fn test_memory_database_roundtrip() {
    let db = MapDatabase::open_memory().await.unwrap();
    let grid = GridBuilder::new(5).segment(9).position(3, 4).build();
    db.insert_grid(&grid).await.unwrap();

    let grids = db.load_grids().await.unwrap();
    assert_eq!(grids, vec![grid]);
}

// ============================================================================
// Error tests
// ============================================================================

#[tokio::test]
async fn test_open_missing_file_fails() {
    let dir = temp_output_dir();
    let result = MapDatabase::open(&dir.path().join("missing.db")).await;
    assert!(matches!(result, Err(MapDbError::Open { .. })));
}

#[tokio::test]
async fn test_malformed_cells_fail() {
    // Truncated JSON in the heights column
    let dir = temp_output_dir();
    let path = dir.path().join("bad.db");
    let bad = MapDatabase::create(&path).await.unwrap();
    bad.close().await;
    let pool = sqlx::SqlitePool::connect(&format!("sqlite://{}", path.display()))
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO grids (grid_id, revision, segment_id, position_x, position_y, heights, tiles) \
         VALUES (7, 1, 1, 0, 0, '[1,2', '[1]')",
    )
    .execute(&pool)
    .await
    .unwrap();
    pool.close().await;

    let db = MapDatabase::open(&path).await.unwrap();
    let err = db.load_grids().await.unwrap_err();
    assert!(matches!(err, MapDbError::InvalidGrid { grid_id: 7, .. }));
}
