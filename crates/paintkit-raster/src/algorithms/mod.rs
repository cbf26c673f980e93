//! Scan-conversion algorithms.
//!
//! Every function here is pure: it maps geometry to the ordered list of
//! pixels the walk visits. Painting those pixels is the job of
//! [`crate::rasterizer`].

pub mod bezier;
pub mod circle;
pub mod ellipse;
pub mod line;

pub use bezier::{
    cubic_bezier_point, flatten_cubic_bezier, flatten_quadratic_bezier, quadratic_bezier_point,
    DEFAULT_BEZIER_STEPS,
};
pub use circle::{bresenham_circle_points, midpoint_circle_points};
pub use ellipse::bresenham_ellipse_points;
pub use line::{bresenham_line_points, dda_line_points};

/// Longest walk (in pixels along the major axis) any algorithm will take.
///
/// Geometry beyond this is reduced to its end points or centre.
pub const MAX_WALK: u32 = 1 << 16;
