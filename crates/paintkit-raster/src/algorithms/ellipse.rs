//! Two-region Bresenham ellipse.

use paintkit_core::{round_half_up, PixelPoint, Point};
use tracing::warn;

use super::circle::offsets_fit;
use super::MAX_WALK;

fn push_quadrants(points: &mut Vec<PixelPoint>, cx: i32, cy: i32, x: i64, y: i64) {
    let (x, y) = (x as i32, y as i32);
    points.extend_from_slice(&[
        PixelPoint::new(cx + x, cy + y),
        PixelPoint::new(cx - x, cy + y),
        PixelPoint::new(cx + x, cy - y),
        PixelPoint::new(cx - x, cy - y),
    ]);
}

/// Walks an axis-aligned ellipse with four-way symmetry.
///
/// Region 1 runs while the x-gradient term is below the y-gradient term,
/// region 2 until `y` drops below zero. Radii are rounded half-up; both
/// radii zero yields the centre alone.
pub fn bresenham_ellipse_points(center: Point, rx: f64, ry: f64) -> Vec<PixelPoint> {
    if !center.is_finite() || !rx.is_finite() || !ry.is_finite() {
        warn!("Skipping ellipse with non-finite geometry {:?} rx={} ry={}", center, rx, ry);
        return Vec::new();
    }

    let c = center.rounded();
    let a = i64::from(round_half_up(rx.abs()));
    let b = i64::from(round_half_up(ry.abs()));
    if a == 0 && b == 0 {
        return vec![c];
    }
    if a.max(b) > MAX_WALK as i64 {
        warn!("Ellipse radii {}x{} too large, stamping centre only", a, b);
        return vec![c];
    }
    if !offsets_fit(c, a as i32, b as i32) {
        warn!("Ellipse at {:?} leaves pixel range, stamping centre only", c);
        return vec![c];
    }

    let a2 = a * a;
    let b2 = b * b;
    let mut points = Vec::new();
    let (mut x, mut y) = (0i64, b);

    let mut d1 = b2 as f64 - (a2 * b) as f64 + 0.25 * a2 as f64;
    let mut dx = 2 * b2 * x;
    let mut dy = 2 * a2 * y;

    while dx < dy {
        push_quadrants(&mut points, c.x, c.y, x, y);
        x += 1;
        dx += 2 * b2;
        if d1 < 0.0 {
            d1 += (dx + b2) as f64;
        } else {
            y -= 1;
            dy -= 2 * a2;
            d1 += (dx - dy + b2) as f64;
        }
    }

    let xf = x as f64 + 0.5;
    let yf = (y - 1) as f64;
    let mut d2 = b2 as f64 * xf * xf + a2 as f64 * yf * yf - (a2 * b2) as f64;

    while y >= 0 {
        push_quadrants(&mut points, c.x, c.y, x, y);
        y -= 1;
        dy -= 2 * a2;
        if d2 > 0.0 {
            d2 += (a2 - dy) as f64;
        } else {
            x += 1;
            dx += 2 * b2;
            d2 += (dx - dy + a2) as f64;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_axis_extremes_present() {
        let points: BTreeSet<_> = bresenham_ellipse_points(Point::new(50.0, 50.0), 20.0, 10.0)
            .into_iter()
            .collect();
        assert!(points.contains(&PixelPoint::new(50, 60)));
        assert!(points.contains(&PixelPoint::new(50, 40)));
        assert!(points.contains(&PixelPoint::new(70, 50)));
        assert!(points.contains(&PixelPoint::new(30, 50)));
    }

    #[test]
    fn test_stays_within_bounding_box() {
        let points = bresenham_ellipse_points(Point::new(0.0, 0.0), 12.0, 5.0);
        assert!(!points.is_empty());
        for p in points {
            assert!(p.x.abs() <= 12, "{:?}", p);
            assert!(p.y.abs() <= 5, "{:?}", p);
        }
    }

    #[test]
    fn test_zero_radii_is_centre() {
        let points = bresenham_ellipse_points(Point::new(3.0, 4.0), 0.0, 0.2);
        assert_eq!(points, vec![PixelPoint::new(3, 4)]);
    }

    #[test]
    fn test_centre_beyond_pixel_range_is_single_point() {
        let far = Point::new(-1.0e10, 0.0);
        assert_eq!(bresenham_ellipse_points(far, 5.0, 3.0), vec![far.rounded()]);

        let edge = Point::new(0.0, -2_147_483_645.0);
        assert_eq!(bresenham_ellipse_points(edge, 2.0, 8.0), vec![edge.rounded()]);
    }

    #[test]
    fn test_flat_ellipse_is_vertical_segment() {
        let points: BTreeSet<_> = bresenham_ellipse_points(Point::new(0.0, 0.0), 0.0, 3.0)
            .into_iter()
            .collect();
        let expected: BTreeSet<_> = (-3..=3).map(|y| PixelPoint::new(0, y)).collect();
        assert_eq!(points, expected);
    }
}
