//! Tests for the cell color functions.

use renderer::color::{heat_color, rgb_color, Rgb};
use test_utils::{assert_approx_eq, assert_rgb_approx_eq};

// ============================================================================
// heat_color tests
// ============================================================================

#[test]
fn test_heat_color_components_in_unit_range() {
    for i in 0..=1000 {
        let c = heat_color(i as f32 / 1000.0);
        for component in [c.r, c.g, c.b] {
            assert!(
                (0.0..=1.0).contains(&component),
                "heat_color({}) = {:?}",
                i as f32 / 1000.0,
                c
            );
        }
    }
}

#[test]
fn test_heat_color_endpoints() {
    let low = heat_color(0.0);
    assert_rgb_approx_eq!((low.r, low.g, low.b), (0.0, 0.0, 1.0), 1e-6);

    let high = heat_color(1.0);
    assert_rgb_approx_eq!((high.r, high.g, high.b), (1.0, 0.0, 0.0), 1e-6);
}

#[test]
fn test_heat_color_clamps() {
    assert_eq!(heat_color(-0.5), heat_color(0.0));
    assert_eq!(heat_color(1.5), heat_color(1.0));
    assert_eq!(heat_color(f32::INFINITY), heat_color(1.0));
    assert_eq!(heat_color(f32::NEG_INFINITY), heat_color(0.0));
}

#[test]
fn test_heat_color_continuous_at_band_edges() {
    for edge in [0.2f32, 0.4, 0.6] {
        let below = heat_color(edge - 1e-4);
        let at = heat_color(edge);
        assert_rgb_approx_eq!((below.r, below.g, below.b), (at.r, at.g, at.b), 1e-3);
    }
}

#[test]
fn test_heat_color_last_band_starts_magenta() {
    // The last band ramps magenta -> red, so the ramp jumps at 0.8
    let before = heat_color(0.7999);
    assert_rgb_approx_eq!((before.r, before.g, before.b), (1.0, 0.0, 0.0), 1e-3);
    let at = heat_color(0.8);
    assert_rgb_approx_eq!((at.r, at.g, at.b), (1.0, 0.0, 1.0), 1e-5);
}

#[test]
fn test_heat_color_band_formulas() {
    // One sample from the middle of each band
    let cases = [
        (0.1, (0.0, 0.5, 1.0)),
        (0.3, (0.0, 1.0, 0.5)),
        (0.5, (0.5, 1.0, 0.0)),
        (0.7, (1.0, 0.5, 0.0)),
        (0.9, (1.0, 0.0, 0.5)),
    ];
    for (value, (r, g, b)) in cases {
        let c = heat_color(value);
        assert_rgb_approx_eq!((c.r, c.g, c.b), (r, g, b), 1e-5);
    }
}

// ============================================================================
// rgb_color tests
// ============================================================================

#[test]
fn test_rgb_color_white_and_black() {
    assert_eq!(rgb_color(0xFFFFFF), Rgb::WHITE);
    assert_eq!(rgb_color(0x000000), Rgb::new(0.0, 0.0, 0.0));
}

#[test]
fn test_rgb_color_red_byte_first() {
    let red = rgb_color(0xFF0000);
    assert_eq!((red.r, red.g, red.b), (1.0, 0.0, 0.0));

    let blue = rgb_color(0x0000FF);
    assert_eq!((blue.r, blue.g, blue.b), (0.0, 0.0, 1.0));
}

#[test]
fn test_rgb_color_normalizes_by_255() {
    let c = rgb_color(0x80_40_01);
    assert_approx_eq!(c.r, 128.0 / 255.0, 1e-7);
    assert_approx_eq!(c.g, 64.0 / 255.0, 1e-7);
    assert_approx_eq!(c.b, 1.0 / 255.0, 1e-7);
}
