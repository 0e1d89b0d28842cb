//! Segment rasterization.
//!
//! Every cell of every grid in a segment becomes one `TILE_SIZE x TILE_SIZE`
//! filled rectangle. Grid `(gx, gy)` cell `(x, y)` lands at pixel
//!
//! ```text
//! (((gx - min_x) * GRID_SIZE + x) * TILE_SIZE, ((gy - min_y) * GRID_SIZE + y) * TILE_SIZE)
//! ```
//!
//! where `min_x`/`min_y` are the smallest grid positions of the segment.

use std::fmt;

use map_common::{Grid, GridPosition, RenderKind, TileMap, GRID_SIZE, TILE_SIZE};
use tiny_skia::{Paint, Pixmap, Rect, Transform};
use tracing::{debug, warn};

use crate::color::{heat_color, rgb_color, Rgb};
use crate::error::{RenderError, Result};
use crate::png;

/// Largest canvas edge tiny-skia can address.
const MAX_CANVAS_EDGE: f64 = (i32::MAX / 4) as f64;

/// Extent of a segment in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl SegmentBounds {
    /// Per-axis extremes of the grid positions, `None` for no grids.
    pub fn from_grids(grids: &[Grid]) -> Option<Self> {
        let first = grids.first()?.position;
        let mut bounds = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for grid in &grids[1..] {
            let GridPosition { x, y } = grid.position;
            bounds.min_x = bounds.min_x.min(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_x = bounds.max_x.max(x);
            bounds.max_y = bounds.max_y.max(y);
        }
        Some(bounds)
    }

    /// Number of grid columns covered, both ends included.
    pub fn columns(&self) -> i64 {
        i64::from(self.max_x) - i64::from(self.min_x) + 1
    }

    /// Number of grid rows covered, both ends included.
    pub fn rows(&self) -> i64 {
        i64::from(self.max_y) - i64::from(self.min_y) + 1
    }

    /// Canvas width in pixels.
    pub fn pixel_width(&self) -> f64 {
        (self.columns() as f64 * GRID_SIZE as f64 * TILE_SIZE).ceil()
    }

    /// Canvas height in pixels.
    pub fn pixel_height(&self) -> f64 {
        (self.rows() as f64 * GRID_SIZE as f64 * TILE_SIZE).ceil()
    }

    /// Top-left pixel of cell `(x, y)` of a grid at `position`.
    pub fn cell_origin(&self, position: GridPosition, x: usize, y: usize) -> (f64, f64) {
        let gx = f64::from(position.x - self.min_x);
        let gy = f64::from(position.y - self.min_y);
        (
            (gx * GRID_SIZE as f64 + x as f64) * TILE_SIZE,
            (gy * GRID_SIZE as f64 + y as f64) * TILE_SIZE,
        )
    }
}

/// A cell whose tile id has no entry in the tile table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingTile {
    pub tile_id: i32,
    pub grid_id: i64,
    pub x: usize,
    pub y: usize,
}

impl fmt::Display for MissingTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tile {} is not found at grid_id={} x={} y={}",
            self.tile_id, self.grid_id, self.x, self.y
        )
    }
}

/// Color chosen for one cell in tile mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellColor {
    /// The cell's tile exists.
    Resolved(Rgb),
    /// The tile is unknown; `color` is painted instead.
    Fallback { color: Rgb, missing: MissingTile },
}

impl CellColor {
    pub fn color(&self) -> Rgb {
        match self {
            CellColor::Resolved(color) | CellColor::Fallback { color, .. } => *color,
        }
    }

    pub fn missing(&self) -> Option<&MissingTile> {
        match self {
            CellColor::Resolved(_) => None,
            CellColor::Fallback { missing, .. } => Some(missing),
        }
    }
}

/// Receives rendering diagnostics.
pub trait DiagnosticSink {
    fn report_missing_tile(&mut self, missing: &MissingTile);
}

/// Collects reports, mostly for tests.
impl DiagnosticSink for Vec<MissingTile> {
    fn report_missing_tile(&mut self, missing: &MissingTile) {
        self.push(*missing);
    }
}

/// Logs each report as a warning and counts them.
#[derive(Debug, Default)]
pub struct TracingSink {
    reported: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reports received so far.
    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl DiagnosticSink for TracingSink {
    fn report_missing_tile(&mut self, missing: &MissingTile) {
        self.reported += 1;
        warn!(
            tile_id = missing.tile_id,
            grid_id = missing.grid_id,
            x = missing.x,
            y = missing.y,
            "{}",
            missing
        );
    }
}

/// Color for cell `(x, y)` of `grid` from the tile table, falling back to
/// white for unknown tile ids.
pub fn resolve_tile_color(tiles: &TileMap, grid: &Grid, x: usize, y: usize) -> CellColor {
    let tile_id = grid.tiles[(x, y)];
    match tiles.get(&tile_id) {
        Some(tile) => CellColor::Resolved(rgb_color(tile.color)),
        None => CellColor::Fallback {
            color: Rgb::WHITE,
            missing: MissingTile {
                tile_id,
                grid_id: grid.id,
                x,
                y,
            },
        },
    }
}

/// Largest height over all cells of all grids, with 0 replaced by 1.
pub fn normalization_height(grids: &[Grid]) -> f32 {
    let max_height = grids
        .iter()
        .map(Grid::max_height)
        .fold(f32::NEG_INFINITY, f32::max);
    if max_height == 0.0 {
        1.0
    } else {
        max_height
    }
}

/// A rendered segment image.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Allocate a transparent canvas.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(RenderError::CanvasAllocation { width, height })?;
        Ok(Self { pixmap })
    }

    fn for_bounds(bounds: &SegmentBounds) -> Result<Self> {
        let (width, height) = (bounds.pixel_width(), bounds.pixel_height());
        if width > MAX_CANVAS_EDGE || height > MAX_CANVAS_EDGE {
            return Err(RenderError::CanvasAllocation {
                width: width.min(u32::MAX as f64) as u32,
                height: height.min(u32::MAX as f64) as u32,
            });
        }
        Self::new(width as u32, height as u32)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Straight-alpha RGBA bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    /// Encode as PNG, indexed when the image has few colors.
    ///
    /// The palette is built straight from the pixmap; a flat RGBA copy is
    /// only made for images with more than 256 colors.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let (width, height) = (self.width() as usize, self.height() as usize);
        let pixels = self.pixmap.pixels().iter().map(|pixel| {
            let c = pixel.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        });

        match png::extract_palette_from(pixels) {
            Some((palette, indices)) => png::create_png_indexed(width, height, &palette, &indices),
            None => png::create_png(&self.to_rgba8(), width, height),
        }
        .map_err(RenderError::Encode)
    }

    fn fill_cell(&mut self, left: f64, top: f64, color: Rgb) {
        let Some(rect) = Rect::from_xywh(left as f32, top as f32, TILE_SIZE as f32, TILE_SIZE as f32)
        else {
            return;
        };
        let [r, g, b, a] = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = false;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Paint every cell of every grid with `color_of(grid, x, y)`.
fn paint_segment<F>(grids: &[Grid], mut color_of: F) -> Result<Canvas>
where
    F: FnMut(&Grid, usize, usize) -> Rgb,
{
    let bounds = SegmentBounds::from_grids(grids).ok_or(RenderError::EmptySegment)?;
    let mut canvas = Canvas::for_bounds(&bounds)?;

    debug!(
        grids = grids.len(),
        width = canvas.width(),
        height = canvas.height(),
        "Rasterizing segment"
    );

    for grid in grids {
        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                let color = color_of(grid, x, y);
                let (left, top) = bounds.cell_origin(grid.position, x, y);
                canvas.fill_cell(left, top, color);
            }
        }
    }

    Ok(canvas)
}

/// Render a segment colored by tile type.
///
/// Unknown tile ids are painted white and reported to `sink`; they never
/// abort rendering.
pub fn render_tiles<S>(grids: &[Grid], tiles: &TileMap, sink: &mut S) -> Result<Canvas>
where
    S: DiagnosticSink + ?Sized,
{
    paint_segment(grids, |grid, x, y| {
        let cell = resolve_tile_color(tiles, grid, x, y);
        if let Some(missing) = cell.missing() {
            sink.report_missing_tile(missing);
        }
        cell.color()
    })
}

/// Render a segment as a heat map of heights normalized by the segment
/// maximum.
pub fn render_heights(grids: &[Grid]) -> Result<Canvas> {
    let max_height = normalization_height(grids);
    paint_segment(grids, |grid, x, y| heat_color(grid.heights[(x, y)] / max_height))
}

/// Render a segment in the requested mode.
pub fn render_segment<S>(
    kind: RenderKind,
    grids: &[Grid],
    tiles: &TileMap,
    sink: &mut S,
) -> Result<Canvas>
where
    S: DiagnosticSink + ?Sized,
{
    match kind {
        RenderKind::Tiles => render_tiles(grids, tiles, sink),
        RenderKind::Heights => render_heights(grids),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_common::{CellGrid, Tile};

    fn grid_at(id: i64, x: i32, y: i32) -> Grid {
        Grid {
            id,
            revision: 1,
            segment_id: 1,
            position: GridPosition::new(x, y),
            heights: CellGrid::filled(0.0),
            tiles: CellGrid::filled(1),
        }
    }

    #[test]
    fn test_bounds_are_per_axis() {
        let grids = vec![grid_at(1, 3, -2), grid_at(2, -1, 5), grid_at(3, 0, 0)];
        let bounds = SegmentBounds::from_grids(&grids).unwrap();
        assert_eq!(
            bounds,
            SegmentBounds {
                min_x: -1,
                min_y: -2,
                max_x: 3,
                max_y: 5
            }
        );
        assert_eq!(bounds.columns(), 5);
        assert_eq!(bounds.rows(), 8);
        assert_eq!(bounds.pixel_width(), 5500.0);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(SegmentBounds::from_grids(&[]).is_none());
    }

    #[test]
    fn test_cell_origin() {
        let bounds = SegmentBounds::from_grids(&[grid_at(1, 2, 3), grid_at(2, 4, 3)]).unwrap();
        assert_eq!(bounds.cell_origin(GridPosition::new(2, 3), 0, 0), (0.0, 0.0));
        assert_eq!(bounds.cell_origin(GridPosition::new(2, 3), 1, 2), (11.0, 22.0));
        assert_eq!(bounds.cell_origin(GridPosition::new(4, 3), 0, 0), (2200.0, 0.0));
    }

    #[test]
    fn test_resolve_tile_color() {
        let mut tiles = TileMap::new();
        tiles.insert(1, Tile::new(1, 1, "grass", 0x00FF00));
        let grid = grid_at(7, 0, 0);

        assert_eq!(
            resolve_tile_color(&tiles, &grid, 4, 5),
            CellColor::Resolved(Rgb::new(0.0, 1.0, 0.0))
        );

        let empty = TileMap::new();
        let cell = resolve_tile_color(&empty, &grid, 4, 5);
        assert_eq!(cell.color(), Rgb::WHITE);
        assert_eq!(
            cell.missing(),
            Some(&MissingTile {
                tile_id: 1,
                grid_id: 7,
                x: 4,
                y: 5
            })
        );
    }

    #[test]
    fn test_missing_tile_message() {
        let missing = MissingTile {
            tile_id: 12,
            grid_id: 345,
            x: 6,
            y: 78,
        };
        assert_eq!(
            missing.to_string(),
            "Tile 12 is not found at grid_id=345 x=6 y=78"
        );
    }

    #[test]
    fn test_normalization_height() {
        assert_eq!(normalization_height(&[grid_at(1, 0, 0)]), 1.0);

        let mut high = grid_at(2, 1, 0);
        high.heights = CellGrid::from_fn(|x, y| (x + y) as f32);
        assert_eq!(normalization_height(&[grid_at(1, 0, 0), high]), 198.0);
    }

    #[test]
    fn test_tracing_sink_counts() {
        let mut sink = TracingSink::new();
        let missing = MissingTile {
            tile_id: 1,
            grid_id: 1,
            x: 0,
            y: 0,
        };
        sink.report_missing_tile(&missing);
        sink.report_missing_tile(&missing);
        assert_eq!(sink.reported(), 2);
    }

    #[test]
    fn test_empty_segment_is_an_error() {
        assert!(matches!(render_heights(&[]), Err(RenderError::EmptySegment)));
    }

    #[test]
    fn test_encode_png_matches_flat_encoding() {
        let mut canvas = Canvas::new(23, 11).unwrap();
        canvas.fill_cell(0.0, 0.0, Rgb::new(0.0, 1.0, 0.0));
        canvas.fill_cell(11.0, 0.0, Rgb::WHITE);

        let expected = png::create_png_auto(&canvas.to_rgba8(), 23, 11).unwrap();
        assert_eq!(canvas.encode_png().unwrap(), expected);
    }

    #[test]
    fn test_encode_png_many_colors_uses_rgba() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        for (i, pixel) in canvas.pixmap.pixels_mut().iter_mut().enumerate() {
            *pixel =
                tiny_skia::PremultipliedColorU8::from_rgba(i as u8, (i / 256) as u8, 7, 255).unwrap();
        }

        let encoded = canvas.encode_png().unwrap();
        // IHDR color type
        assert_eq!(encoded[25], 6);
        assert_eq!(encoded, png::create_png(&canvas.to_rgba8(), 20, 20).unwrap());
    }
}
