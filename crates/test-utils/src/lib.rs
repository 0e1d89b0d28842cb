//! Shared test utilities for the map-render workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Grid and tile builders
//! - Deterministic height generators
//! - Approximate float assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures, GridBuilder};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Approximate equality of two `(r, g, b)` triples.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_rgb_approx_eq;
///
/// assert_rgb_approx_eq!((1.0, 0.5, 0.0), (1.0, 0.5001, 0.0), 0.001);
/// ```
#[macro_export]
macro_rules! assert_rgb_approx_eq {
    (($r1:expr, $g1:expr, $b1:expr), ($r2:expr, $g2:expr, $b2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($r1, $r2, $epsilon);
        $crate::assert_approx_eq!($g1, $g2, $epsilon);
        $crate::assert_approx_eq!($b1, $b2, $epsilon);
    }};
}
