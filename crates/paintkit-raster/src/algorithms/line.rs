//! Straight-line pixel walks.

use paintkit_core::{PixelPoint, Point};
use tracing::warn;

use super::MAX_WALK;

/// Digital differential analyzer.
///
/// Takes `trunc(max(|dx|, |dy|))` equal steps from `p1` to `p2` and rounds
/// every sample, yielding `steps + 1` pixels. When both deltas are below one
/// pixel the walk collapses to the rounded start point.
pub fn dda_line_points(p1: Point, p2: Point) -> Vec<PixelPoint> {
    if !p1.is_finite() || !p2.is_finite() {
        warn!("Skipping DDA line with non-finite endpoint {:?} -> {:?}", p1, p2);
        return Vec::new();
    }

    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let span = dx.abs().max(dy.abs());
    if span > MAX_WALK as f64 {
        warn!("DDA line spans {} pixels, stamping endpoints only", span);
        return vec![p1.rounded(), p2.rounded()];
    }

    let steps = span.trunc() as usize;
    if steps == 0 {
        return vec![p1.rounded()];
    }

    let x_inc = dx / steps as f64;
    let y_inc = dy / steps as f64;
    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..steps {
        let t = i as f64;
        points.push(Point::new(p1.x + x_inc * t, p1.y + y_inc * t).rounded());
    }
    // Sample `steps` is the endpoint itself; taking it directly avoids
    // accumulated error flipping its rounding.
    points.push(p2.rounded());
    points
}

/// Integer Bresenham walk between the rounded endpoints, both inclusive.
pub fn bresenham_line_points(p1: Point, p2: Point) -> Vec<PixelPoint> {
    if !p1.is_finite() || !p2.is_finite() {
        warn!("Skipping Bresenham line with non-finite endpoint {:?} -> {:?}", p1, p2);
        return Vec::new();
    }

    let start = p1.rounded();
    let end = p2.rounded();
    let dx = (i64::from(end.x) - i64::from(start.x)).abs();
    let dy = (i64::from(end.y) - i64::from(start.y)).abs();
    if dx.max(dy) > MAX_WALK as i64 {
        warn!("Bresenham line spans {} pixels, stamping endpoints only", dx.max(dy));
        return vec![start, end];
    }

    let sx = if start.x < end.x { 1 } else { -1 };
    let sy = if start.y < end.y { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (start.x, start.y);
    let mut points = Vec::with_capacity((dx.max(dy) + 1) as usize);

    loop {
        points.push(PixelPoint::new(x, y));
        if x == end.x && y == end.y {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    points
}
