//! Writing segment images to disk.

use std::path::{Path, PathBuf};

use map_common::RenderKind;
use tracing::info;

use crate::error::{RenderError, Result};
use crate::raster::Canvas;

/// `<dir>/<segment_id>.<kind>.png`
pub fn segment_image_path(dir: &Path, segment_id: i64, kind: RenderKind) -> PathBuf {
    dir.join(format!("{}.{}.png", segment_id, kind))
}

/// Encode `canvas` as PNG and write it next to the other segment images.
///
/// Returns the path of the written file.
pub fn write_segment_image(
    dir: &Path,
    segment_id: i64,
    kind: RenderKind,
    canvas: &Canvas,
) -> Result<PathBuf> {
    let path = segment_image_path(dir, segment_id, kind);
    let png = canvas.encode_png()?;

    std::fs::write(&path, &png).map_err(|source| RenderError::Write {
        path: path.clone(),
        source,
    })?;

    info!(
        segment_id,
        kind = %kind,
        path = %path.display(),
        bytes = png.len(),
        "Wrote segment image"
    );

    Ok(path)
}
