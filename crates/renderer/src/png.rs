//! PNG encoding for RGBA canvas data.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: used when the image has at most 256
//!   distinct colors. Tile maps almost always qualify.
//! - **RGBA PNG (color type 6)**: fallback for images with more colors,
//!   such as height maps.
//!
//! Use `create_png_auto` for automatic mode selection, or `create_png` for
//! explicit RGBA encoding.

use std::collections::HashMap;
use std::io::Write;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

const COLOR_TYPE_INDEXED: u8 = 3;
const COLOR_TYPE_RGBA: u8 = 6;

/// Palette entries as `(r, g, b, a)`.
pub type Palette = Vec<(u8, u8, u8, u8)>;

/// Create a PNG image with automatic format selection.
///
/// Uses indexed PNG when `pixels` holds at most 256 distinct colors and RGBA
/// otherwise.
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel)
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png_auto(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, String> {
    check_len(pixels.len(), width, height, 4)?;

    match extract_palette(pixels) {
        Some((palette, indices)) => create_png_indexed(width, height, &palette, &indices),
        None => create_png(pixels, width, height),
    }
}

/// Pack RGBA bytes into a u32 for faster hashing and comparison
#[inline(always)]
fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24)
}

/// Build a palette in first-seen order and the per-pixel indices into it.
///
/// Returns `None` as soon as a 257th color shows up.
pub fn extract_palette(pixels: &[u8]) -> Option<(Palette, Vec<u8>)> {
    extract_palette_from(
        pixels
            .chunks_exact(4)
            .map(|chunk| [chunk[0], chunk[1], chunk[2], chunk[3]]),
    )
}

/// Like [`extract_palette`], but over any stream of RGBA pixels so callers
/// do not need a flat copy of their image.
pub fn extract_palette_from<I>(pixels: I) -> Option<(Palette, Vec<u8>)>
where
    I: IntoIterator<Item = [u8; 4]>,
{
    let pixels = pixels.into_iter();
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.size_hint().0);

    // Cells are painted as runs of identical pixels; skip the lookup for those
    let mut last: Option<(u32, u8)> = None;

    for [r, g, b, a] in pixels {
        let packed = pack_color(r, g, b, a);

        let index = match last {
            Some((color, idx)) if color == packed => idx,
            _ => match color_to_index.get(&packed) {
                Some(&idx) => idx,
                None => {
                    if palette.len() >= MAX_PALETTE_SIZE {
                        return None;
                    }
                    let idx = palette.len() as u8;
                    palette.push((r, g, b, a));
                    color_to_index.insert(packed, idx);
                    idx
                }
            },
        };
        last = Some((packed, index));
        indices.push(index);
    }

    Some((palette, indices))
}

/// Create an indexed PNG (color type 3) from palette and indices.
///
/// 1 byte per pixel instead of 4, so less data to compress and a smaller
/// file.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[(u8, u8, u8, u8)],
    indices: &[u8],
) -> Result<Vec<u8>, String> {
    check_len(indices.len(), width, height, 1)?;
    if palette.is_empty() && !indices.is_empty() {
        return Err("indexed PNG needs a non-empty palette".to_string());
    }
    if palette.len() > MAX_PALETTE_SIZE {
        return Err(format!("palette has {} colors, max is {}", palette.len(), MAX_PALETTE_SIZE));
    }

    let mut png = start_png(width, height, COLOR_TYPE_INDEXED);

    // PLTE chunk (palette)
    let plte_data: Vec<u8> = palette.iter().flat_map(|&(r, g, b, _)| [r, g, b]).collect();
    write_chunk(&mut png, b"PLTE", &plte_data);

    // tRNS chunk (transparency) - only if any color has alpha < 255
    if palette.iter().any(|(_, _, _, a)| *a < 255) {
        let trns_data: Vec<u8> = palette.iter().map(|(_, _, _, a)| *a).collect();
        write_chunk(&mut png, b"tRNS", &trns_data);
    }

    let idat_data = deflate_scanlines(indices, width, height, 1)
        .map_err(|e| format!("IDAT compression failed: {}", e))?;
    finish_png(&mut png, &idat_data);

    Ok(png)
}

/// Create a PNG image from RGBA pixel data (color type 6).
///
/// # Arguments
/// - `pixels`: RGBA pixel data (4 bytes per pixel)
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, String> {
    check_len(pixels.len(), width, height, 4)?;

    let mut png = start_png(width, height, COLOR_TYPE_RGBA);
    let idat_data = deflate_scanlines(pixels, width, height, 4)
        .map_err(|e| format!("IDAT compression failed: {}", e))?;
    finish_png(&mut png, &idat_data);

    Ok(png)
}

fn check_len(len: usize, width: usize, height: usize, bytes_per_pixel: usize) -> Result<(), String> {
    let expected = width * height * bytes_per_pixel;
    if len != expected {
        return Err(format!(
            "expected {} bytes for a {}x{} image, got {}",
            expected, width, height, len
        ));
    }
    Ok(())
}

/// Signature plus IHDR chunk for an 8-bit image.
fn start_png(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(color_type);
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    png
}

/// IDAT and IEND chunks.
fn finish_png(png: &mut Vec<u8>, idat_data: &[u8]) {
    write_chunk(png, b"IDAT", idat_data);
    write_chunk(png, b"IEND", &[]);
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix every scanline with filter byte 0 (none) and zlib-compress,
/// streaming rows into the encoder.
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> std::io::Result<Vec<u8>> {
    let stride = width * bytes_per_pixel;
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());

    for row in 0..height {
        encoder.write_all(&[0])?;
        encoder.write_all(&data[row * stride..(row + 1) * stride])?;
    }

    encoder.finish()
}
