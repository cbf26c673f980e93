//! # PaintKit Raster
//!
//! Scan conversion for PaintKit: pure pixel-walk algorithms
//! ([`algorithms`]), the drawing surfaces they paint onto ([`surface`],
//! [`pixmap`]) and per-primitive painting entry points ([`rasterizer`]).

pub mod algorithms;
pub mod pixmap;
pub mod rasterizer;
pub mod surface;

pub use algorithms::{
    bresenham_circle_points, bresenham_ellipse_points, bresenham_line_points,
    cubic_bezier_point, dda_line_points, flatten_cubic_bezier, flatten_quadratic_bezier,
    midpoint_circle_points, quadratic_bezier_point, DEFAULT_BEZIER_STEPS, MAX_WALK,
};
pub use pixmap::PixmapSurface;
pub use rasterizer::{
    draw_circle, draw_cubic_bezier, draw_ellipse, draw_freehand, draw_line, draw_polygon,
    draw_polyline, draw_quadratic_bezier, draw_rectangle, draw_triangle, erase_area,
    erase_freehand, rectangle_corners, Pen, RasterOptions,
};
pub use surface::{PaintOp, RecordingSurface, StrokeStyle, Surface};
