//! Bézier evaluation and flattening.

use paintkit_core::{PixelPoint, Point};

/// Default number of parameter steps used to flatten a curve.
pub const DEFAULT_BEZIER_STEPS: usize = 100;

/// Evaluates the cubic Bernstein polynomial at `t`.
pub fn cubic_bezier_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;
    Point::new(
        mt3 * p0.x + 3.0 * mt2 * t * p1.x + 3.0 * mt * t2 * p2.x + t3 * p3.x,
        mt3 * p0.y + 3.0 * mt2 * t * p1.y + 3.0 * mt * t2 * p2.y + t3 * p3.y,
    )
}

/// Evaluates the quadratic Bernstein polynomial at `t`.
pub fn quadratic_bezier_point(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
        mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y,
    )
}

/// Samples `t = i / steps` for `i` in `0..=steps`, rounding each sample.
///
/// `steps` below 1 is treated as 1, so both end points are always present.
fn flatten(steps: usize, eval: impl Fn(f64) -> Point) -> Vec<PixelPoint> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| eval(i as f64 / steps as f64).rounded())
        .collect()
}

pub fn flatten_cubic_bezier(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    steps: usize,
) -> Vec<PixelPoint> {
    flatten(steps, |t| cubic_bezier_point(p0, p1, p2, p3, t))
}

pub fn flatten_quadratic_bezier(p0: Point, p1: Point, p2: Point, steps: usize) -> Vec<PixelPoint> {
    flatten(steps, |t| quadratic_bezier_point(p0, p1, p2, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_midpoint() {
        let p = cubic_bezier_point(
            Point::new(0.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
            Point::new(100.0, 0.0),
            0.5,
        );
        assert_eq!(p, Point::new(50.0, 75.0));
    }

    #[test]
    fn test_quadratic_endpoints_and_midpoint() {
        let (a, b, c) = (Point::new(0.0, 0.0), Point::new(10.0, 20.0), Point::new(20.0, 0.0));
        assert_eq!(quadratic_bezier_point(a, b, c, 0.0), a);
        assert_eq!(quadratic_bezier_point(a, b, c, 1.0), c);
        assert_eq!(quadratic_bezier_point(a, b, c, 0.5), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_flatten_sample_count() {
        let points = flatten_cubic_bezier(
            Point::new(0.0, 0.0),
            Point::new(1.0, 5.0),
            Point::new(9.0, 5.0),
            Point::new(10.0, 0.0),
            DEFAULT_BEZIER_STEPS,
        );
        assert_eq!(points.len(), DEFAULT_BEZIER_STEPS + 1);
        assert_eq!(points[0], PixelPoint::new(0, 0));
        assert_eq!(points[DEFAULT_BEZIER_STEPS], PixelPoint::new(10, 0));
    }

    #[test]
    fn test_zero_steps_still_hits_both_ends() {
        let points = flatten_quadratic_bezier(
            Point::new(1.0, 1.0),
            Point::new(5.0, 9.0),
            Point::new(9.0, 1.0),
            0,
        );
        assert_eq!(points, vec![PixelPoint::new(1, 1), PixelPoint::new(9, 1)]);
    }
}
