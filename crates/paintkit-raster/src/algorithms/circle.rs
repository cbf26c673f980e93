//! Circle pixel walks.
//!
//! Both walks produce the same eight-way symmetric outline family but use
//! different decision variables, so their pixel sets differ for most radii.

use paintkit_core::{round_half_up, PixelPoint, Point};
use tracing::warn;

use super::MAX_WALK;

fn push_octants(points: &mut Vec<PixelPoint>, cx: i32, cy: i32, x: i32, y: i32) {
    points.extend_from_slice(&[
        PixelPoint::new(cx + x, cy + y),
        PixelPoint::new(cx - x, cy + y),
        PixelPoint::new(cx + x, cy - y),
        PixelPoint::new(cx - x, cy - y),
        PixelPoint::new(cx + y, cy + x),
        PixelPoint::new(cx - y, cy + x),
        PixelPoint::new(cx + y, cy - x),
        PixelPoint::new(cx - y, cy - x),
    ]);
}

/// Rounds centre and radius, rejecting input no walk can handle.
fn prepare(center: Point, radius: f64) -> Option<(PixelPoint, i32)> {
    if !center.is_finite() || !radius.is_finite() {
        warn!("Skipping circle with non-finite geometry {:?} r={}", center, radius);
        return None;
    }
    let c = center.rounded();
    let r = round_half_up(radius.abs());
    if r > MAX_WALK as i32 {
        warn!("Circle radius {} too large, stamping centre only", r);
        return Some((c, 0));
    }
    if !offsets_fit(c, r, r) {
        warn!("Circle at {:?} r={} leaves pixel range, stamping centre only", c, r);
        return Some((c, 0));
    }
    Some((c, r))
}

/// Whether every point within `rx`/`ry` of `c` is addressable.
pub(super) fn offsets_fit(c: PixelPoint, rx: i32, ry: i32) -> bool {
    c.x.checked_add(rx).is_some()
        && c.x.checked_sub(rx).is_some()
        && c.y.checked_add(ry).is_some()
        && c.y.checked_sub(ry).is_some()
}

/// Bresenham circle with decision variable `d = 3 - 2r`.
///
/// Points are emitted in walk order, eight per step, duplicates included.
pub fn bresenham_circle_points(center: Point, radius: f64) -> Vec<PixelPoint> {
    let Some((c, r)) = prepare(center, radius) else {
        return Vec::new();
    };
    if r == 0 {
        return vec![c];
    }

    let mut points = Vec::new();
    let (mut x, mut y) = (0i32, r);
    let mut d = 3 - 2 * r;
    push_octants(&mut points, c.x, c.y, x, y);

    while y >= x {
        x += 1;
        if d > 0 {
            y -= 1;
            d += 4 * (x - y) + 10;
        } else {
            d += 4 * x + 6;
        }
        push_octants(&mut points, c.x, c.y, x, y);
    }
    points
}

/// Midpoint circle with decision variable `d = 1 - r`, looping while `x < y`.
pub fn midpoint_circle_points(center: Point, radius: f64) -> Vec<PixelPoint> {
    let Some((c, r)) = prepare(center, radius) else {
        return Vec::new();
    };
    if r == 0 {
        return vec![c];
    }

    let mut points = Vec::new();
    let (mut x, mut y) = (0i32, r);
    let mut d = 1 - r;
    push_octants(&mut points, c.x, c.y, x, y);

    while x < y {
        if d < 0 {
            d += 2 * x + 3;
        } else {
            d += 2 * (x - y) + 5;
            y -= 1;
        }
        x += 1;
        push_octants(&mut points, c.x, c.y, x, y);
    }
    points
}
