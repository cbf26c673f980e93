//! Per-primitive painting entry points.
//!
//! Each function takes geometry, a [`Pen`] and an [`Algorithm`] and issues
//! paint calls against a [`Surface`]. `Raster` mode walks pixels with the
//! algorithms in [`crate::algorithms`] and stamps a disc (or a pixel, for the
//! midpoint circle) per visited pixel. `Primitive` mode hands the whole path
//! to the surface's native stroker.
//!
//! Nothing here fails. Degenerate geometry paints a single disc.

use paintkit_core::{Algorithm, CircleAlgorithm, Color, LineAlgorithm, PixelPoint, Point};
use serde::{Deserialize, Serialize};

use crate::algorithms::{
    bresenham_circle_points, bresenham_ellipse_points, bresenham_line_points, dda_line_points,
    flatten_cubic_bezier, flatten_quadratic_bezier, midpoint_circle_points, DEFAULT_BEZIER_STEPS,
};
use crate::surface::{StrokeStyle, Surface};

/// Color and stroke width for one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f64,
}

impl Pen {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    /// Radius of the disc stamped per pixel in raster mode.
    pub fn stamp_radius(&self) -> f64 {
        (self.width / 2.0).max(1.0)
    }

    pub fn stroke(&self) -> StrokeStyle {
        StrokeStyle::solid(self.color, self.width)
    }
}

/// Algorithm choices for raster mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterOptions {
    pub line: LineAlgorithm,
    pub circle: CircleAlgorithm,
    pub bezier_steps: usize,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            line: LineAlgorithm::Bresenham,
            circle: CircleAlgorithm::Bresenham,
            bezier_steps: DEFAULT_BEZIER_STEPS,
        }
    }
}

fn stamp<S: Surface + ?Sized>(surface: &mut S, pixels: &[PixelPoint], pen: &Pen) {
    let radius = pen.stamp_radius();
    for p in pixels {
        surface.fill_disc(p.to_point(), radius, pen.color);
    }
}

fn line_pixels(p1: Point, p2: Point, algorithm: LineAlgorithm) -> Vec<PixelPoint> {
    match algorithm {
        LineAlgorithm::Dda => dda_line_points(p1, p2),
        LineAlgorithm::Bresenham => bresenham_line_points(p1, p2),
    }
}

fn dot<S: Surface + ?Sized>(surface: &mut S, at: Point, pen: &Pen) {
    if at.is_finite() {
        surface.fill_disc(at.rounded().to_point(), pen.stamp_radius(), pen.color);
    }
}

/// Draws a straight segment, endpoints inclusive.
pub fn draw_line<S: Surface + ?Sized>(
    surface: &mut S,
    p1: Point,
    p2: Point,
    pen: &Pen,
    algorithm: Algorithm,
    options: &RasterOptions,
) {
    match algorithm {
        Algorithm::Raster => stamp(surface, &line_pixels(p1, p2, options.line), pen),
        Algorithm::Primitive => {
            if p1.rounded() == p2.rounded() {
                dot(surface, p1, pen);
            } else {
                surface.stroke_polyline(&[p1, p2], false, &pen.stroke());
            }
        }
    }
}

/// Draws a circle outline. A radius that rounds to zero paints one disc.
pub fn draw_circle<S: Surface + ?Sized>(
    surface: &mut S,
    center: Point,
    radius: f64,
    pen: &Pen,
    algorithm: Algorithm,
    options: &RasterOptions,
) {
    match algorithm {
        Algorithm::Raster => match options.circle {
            CircleAlgorithm::Bresenham => {
                stamp(surface, &bresenham_circle_points(center, radius), pen)
            }
            CircleAlgorithm::Midpoint => {
                for p in midpoint_circle_points(center, radius) {
                    surface.set_pixel(p.x, p.y, pen.color);
                }
            }
        },
        Algorithm::Primitive => {
            if radius.abs() < 0.5 {
                dot(surface, center, pen);
            } else {
                let r = radius.abs();
                surface.stroke_ellipse(center, r, r, &pen.stroke());
            }
        }
    }
}

/// Draws an axis-aligned ellipse outline around `center`.
pub fn draw_ellipse<S: Surface + ?Sized>(
    surface: &mut S,
    center: Point,
    rx: f64,
    ry: f64,
    pen: &Pen,
    algorithm: Algorithm,
) {
    let (rx, ry) = (rx.abs(), ry.abs());
    match algorithm {
        Algorithm::Raster => stamp(surface, &bresenham_ellipse_points(center, rx, ry), pen),
        Algorithm::Primitive => {
            if rx < 0.5 && ry < 0.5 {
                dot(surface, center, pen);
            } else if rx == 0.0 || ry == 0.0 {
                // A flat ellipse is the segment between its extremes.
                let a = Point::new(center.x - rx, center.y - ry);
                let b = Point::new(center.x + rx, center.y + ry);
                surface.stroke_polyline(&[a, b], false, &pen.stroke());
            } else {
                surface.stroke_ellipse(center, rx, ry, &pen.stroke());
            }
        }
    }
}

/// Corners of the bounding box of two points, clockwise from top-left.
pub fn rectangle_corners(c1: Point, c2: Point) -> [Point; 4] {
    let left = c1.x.min(c2.x);
    let top = c1.y.min(c2.y);
    let right = c1.x.max(c2.x);
    let bottom = c1.y.max(c2.y);
    [
        Point::new(left, top),
        Point::new(right, top),
        Point::new(right, bottom),
        Point::new(left, bottom),
    ]
}

/// Draws the four edges of the box spanned by two opposite corners.
pub fn draw_rectangle<S: Surface + ?Sized>(
    surface: &mut S,
    c1: Point,
    c2: Point,
    pen: &Pen,
    algorithm: Algorithm,
    options: &RasterOptions,
) {
    if c1.rounded() == c2.rounded() {
        dot(surface, c1, pen);
        return;
    }
    draw_polyline(surface, &rectangle_corners(c1, c2), true, pen, algorithm, options);
}

/// Draws connected segments through `points`.
///
/// The closing edge back to the first point is added only when `closed` is
/// set and there are at least three points.
pub fn draw_polyline<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[Point],
    closed: bool,
    pen: &Pen,
    algorithm: Algorithm,
    options: &RasterOptions,
) {
    match points {
        [] => {}
        [only] => dot(surface, *only, pen),
        _ => {
            let close = closed && points.len() >= 3;
            match algorithm {
                Algorithm::Raster => {
                    for pair in points.windows(2) {
                        stamp(surface, &line_pixels(pair[0], pair[1], options.line), pen);
                    }
                    if close {
                        if let (Some(last), Some(first)) = (points.last(), points.first()) {
                            stamp(surface, &line_pixels(*last, *first, options.line), pen);
                        }
                    }
                }
                Algorithm::Primitive => surface.stroke_polyline(points, close, &pen.stroke()),
            }
        }
    }
}

/// Draws a closed polygon through `points`.
pub fn draw_polygon<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[Point],
    pen: &Pen,
    algorithm: Algorithm,
    options: &RasterOptions,
) {
    draw_polyline(surface, points, true, pen, algorithm, options);
}

/// Draws the three edges between the first three points, in order.
///
/// With fewer than three points the available ones are joined as an open
/// path.
pub fn draw_triangle<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[Point],
    pen: &Pen,
    algorithm: Algorithm,
    options: &RasterOptions,
) {
    if points.len() >= 3 {
        draw_polyline(surface, &points[..3], true, pen, algorithm, options);
    } else {
        draw_polyline(surface, points, false, pen, algorithm, options);
    }
}

fn to_points(pixels: Vec<PixelPoint>) -> Vec<Point> {
    pixels.into_iter().map(PixelPoint::to_point).collect()
}

/// Flattens a cubic curve and draws it as a polyline, closed on request.
pub fn draw_cubic_bezier<S: Surface + ?Sized>(
    surface: &mut S,
    control: [Point; 4],
    closed: bool,
    pen: &Pen,
    algorithm: Algorithm,
    options: &RasterOptions,
) {
    let [p0, p1, p2, p3] = control;
    let curve = to_points(flatten_cubic_bezier(p0, p1, p2, p3, options.bezier_steps));
    draw_polyline(surface, &curve, closed, pen, algorithm, options);
}

/// Flattens a quadratic curve and draws it as an open polyline.
pub fn draw_quadratic_bezier<S: Surface + ?Sized>(
    surface: &mut S,
    control: [Point; 3],
    pen: &Pen,
    algorithm: Algorithm,
    options: &RasterOptions,
) {
    let [p0, p1, p2] = control;
    let curve = to_points(flatten_quadratic_bezier(p0, p1, p2, options.bezier_steps));
    draw_polyline(surface, &curve, false, pen, algorithm, options);
}

/// Draws a freehand stroke. Raster mode always joins samples with DDA.
pub fn draw_freehand<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[Point],
    pen: &Pen,
    algorithm: Algorithm,
) {
    let options = RasterOptions {
        line: LineAlgorithm::Dda,
        ..RasterOptions::default()
    };
    draw_polyline(surface, points, false, pen, algorithm, &options);
}

/// Paints the bounding box of two corners in the background color.
pub fn erase_area<S: Surface + ?Sized>(surface: &mut S, c1: Point, c2: Point, background: Color) {
    if !c1.is_finite() || !c2.is_finite() {
        return;
    }
    let [top_left, _, bottom_right, _] = rectangle_corners(c1, c2);
    surface.fill_rect(
        top_left.x,
        top_left.y,
        bottom_right.x - top_left.x,
        bottom_right.y - top_left.y,
        background,
    );
}

/// Strokes an open path in the background color with the given width.
pub fn erase_freehand<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[Point],
    width: f64,
    background: Color,
) {
    match points {
        [] => {}
        [only] => {
            if only.is_finite() {
                surface.fill_disc(*only, (width / 2.0).max(1.0), background);
            }
        }
        _ => surface.stroke_polyline(points, false, &StrokeStyle::solid(background, width)),
    }
}
