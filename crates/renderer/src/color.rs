//! Cell color functions.
//!
//! Two mappings feed the rasterizer: a categorical decode of packed tile
//! colors, and a five-band heat ramp for normalized heights.

/// Color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Opaque 8-bit RGBA, rounding each component to the nearest level.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            255,
        ]
    }
}

#[inline]
fn channel_to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Heat ramp over `[0, 1]`: blue, cyan, green, yellow, red, magenta.
///
/// The input is clamped to `[0, 1]` (NaN maps to 0). Each band of width 0.2
/// is a linear ramp between fixed anchors.
pub fn heat_color(value: f32) -> Rgb {
    let v = value.max(0.0).min(1.0);

    if v < 0.2 {
        return Rgb::new(0.0, 5.0 * v, 1.0);
    }
    if v < 0.4 {
        return Rgb::new(0.0, 1.0, 1.0 - 5.0 * (v - 0.2));
    }
    if v < 0.6 {
        return Rgb::new(5.0 * (v - 0.4), 1.0, 0.0);
    }
    if v < 0.8 {
        return Rgb::new(1.0, 1.0 - 5.0 * (v - 0.6), 0.0);
    }
    Rgb::new(1.0, 0.0, 1.0 - 5.0 * (v - 0.8))
}

/// Decode a packed `0xRRGGBB` color. Bits above the low 24 are ignored.
pub fn rgb_color(packed: u32) -> Rgb {
    Rgb::new(
        color_component(packed, 2),
        color_component(packed, 1),
        color_component(packed, 0),
    )
}

/// Byte `number` of `value` (0 = lowest), scaled to `[0, 1]`.
#[inline]
fn color_component(value: u32, number: u32) -> f32 {
    ((value >> (8 * number)) & 0xFF) as f32 / 255.0
}
