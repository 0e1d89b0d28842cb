//! End-to-end render run: load, group, render, write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use map_common::group_by_segment;
use map_db::{MapDatabase, MapSnapshot};
use renderer::{render_segment, write_segment_image, TracingSink};
use tracing::{debug, info, warn};

use crate::config::RenderConfig;

/// Outcome of rendering one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentReport {
    pub segment_id: i64,
    pub grids: usize,
    pub width: u32,
    pub height: u32,
    /// Cells painted with the fallback color because their tile is unknown.
    pub missing_tiles: usize,
    pub path: PathBuf,
}

/// Outcome of a whole run, segments in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub segments: Vec<SegmentReport>,
}

impl RenderSummary {
    pub fn images_written(&self) -> usize {
        self.segments.len()
    }

    pub fn missing_tiles(&self) -> usize {
        self.segments.iter().map(|s| s.missing_tiles).sum()
    }
}

/// Read the database named by `config` and render every selected segment.
pub async fn run(config: &RenderConfig) -> Result<RenderSummary> {
    config.validate()?;

    let db = MapDatabase::open(&config.input)
        .await
        .with_context(|| format!("failed to open {}", config.input.display()))?;
    let snapshot = db
        .load()
        .await
        .with_context(|| format!("failed to load {}", config.input.display()))?;
    db.close().await;

    render_snapshot(snapshot, config)
}

/// Render an already loaded snapshot. Segments are processed one at a time;
/// the first failure stops the run and earlier images stay on disk.
pub fn render_snapshot(snapshot: MapSnapshot, config: &RenderConfig) -> Result<RenderSummary> {
    config.prepare_output_dir()?;

    let MapSnapshot { tiles, grids } = snapshot;
    let mut segments = group_by_segment(grids);

    if !config.segments.is_empty() {
        for requested in &config.segments {
            if segments.get(*requested).is_none() {
                warn!(segment_id = *requested, "Requested segment has no grids");
            }
        }
        let wanted: Vec<i64> = config.segments.iter().copied().collect();
        segments.retain_ids(&wanted);
    }

    info!(
        segments = segments.len(),
        grids = segments.grid_count(),
        kind = %config.kind,
        "Rendering segments"
    );

    let mut summary = RenderSummary::default();

    for (segment_id, grids) in segments {
        debug!(segment_id, grids = grids.len(), "Rendering segment");

        let mut sink = TracingSink::new();
        let canvas = render_segment(config.kind, &grids, &tiles, &mut sink)
            .with_context(|| format!("failed to render segment {}", segment_id))?;

        let path = write_segment_image(&config.output_dir, segment_id, config.kind, &canvas)
            .with_context(|| format!("failed to write segment {}", segment_id))?;

        if sink.reported() > 0 {
            warn!(
                segment_id,
                missing_tiles = sink.reported(),
                "Segment rendered with unknown tiles"
            );
        }
        info!(
            segment_id,
            grids = grids.len(),
            width = canvas.width(),
            height = canvas.height(),
            missing_tiles = sink.reported(),
            "Rendered segment"
        );

        summary.segments.push(SegmentReport {
            segment_id,
            grids: grids.len(),
            width: canvas.width(),
            height: canvas.height(),
            missing_tiles: sink.reported(),
            path,
        });
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_common::RenderKind;
    use test_utils::fixtures::{tile_ids, tile_table};
    use test_utils::generators::GridBuilder;

    fn snapshot() -> MapSnapshot {
        MapSnapshot {
            tiles: tile_table(),
            grids: vec![
                GridBuilder::new(1).segment(5).build(),
                GridBuilder::new(2).segment(5).position(1, 0).build(),
                GridBuilder::new(3)
                    .segment(2)
                    .tile_at(4, 4, tile_ids::UNKNOWN)
                    .build(),
            ],
        }
    }

    #[test]
    fn test_render_snapshot_writes_each_segment() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig::new("unused.db", dir.path(), RenderKind::Tiles);

        let summary = render_snapshot(snapshot(), &config).unwrap();

        let ids: Vec<i64> = summary.segments.iter().map(|s| s.segment_id).collect();
        assert_eq!(ids, vec![2, 5]);
        assert_eq!(summary.segments[1].width, 2200);
        assert_eq!(summary.segments[1].height, 1100);
        assert_eq!(summary.missing_tiles(), 1);
        assert!(dir.path().join("2.tiles.png").is_file());
        assert!(dir.path().join("5.tiles.png").is_file());
    }

    #[test]
    fn test_render_snapshot_segment_filter() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            RenderConfig::new("unused.db", dir.path(), RenderKind::Heights).with_segments([5, 42]);

        let summary = render_snapshot(snapshot(), &config).unwrap();

        assert_eq!(summary.images_written(), 1);
        assert!(dir.path().join("5.heights.png").is_file());
        assert!(!dir.path().join("2.heights.png").exists());
    }

    #[test]
    fn test_render_snapshot_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig::new("unused.db", dir.path(), RenderKind::Tiles);

        let summary = render_snapshot(MapSnapshot::default(), &config).unwrap();
        assert_eq!(summary, RenderSummary::default());
    }
}
