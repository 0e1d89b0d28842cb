//! SQL used by the map database.

/// Schema of a map database, as created by the recorder.
pub const SCHEMA_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS tiles (
        tile_id INTEGER PRIMARY KEY,
        version INTEGER NOT NULL,
        name TEXT NOT NULL UNIQUE,
        color INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS grids (
        grid_id INTEGER PRIMARY KEY,
        revision INTEGER NOT NULL,
        segment_id INTEGER NOT NULL,
        position_x INTEGER NOT NULL,
        position_y INTEGER NOT NULL,
        heights BLOB NOT NULL,
        tiles BLOB NOT NULL
    );

    CREATE INDEX IF NOT EXISTS i_grids_coord
        ON grids (segment_id, position_x, position_y);

    CREATE INDEX IF NOT EXISTS i_grids_segment
        ON grids (segment_id)
"#;

pub const GET_TILES: &str = r#"
    SELECT tile_id, version, name, color
      FROM tiles
     ORDER BY tile_id
"#;

pub const GET_GRIDS: &str = r#"
    SELECT grid_id, revision, segment_id, position_x, position_y, heights, tiles
      FROM grids
     ORDER BY grid_id
"#;

pub const INSERT_TILE: &str = r#"
    INSERT INTO tiles (tile_id, version, name, color)
    VALUES (?, ?, ?, ?)
"#;

pub const INSERT_GRID: &str = r#"
    INSERT INTO grids (grid_id, revision, segment_id, position_x, position_y, heights, tiles)
    VALUES (?, ?, ?, ?, ?, ?, ?)
"#;
