//! Painting entry points against recording and pixel surfaces.

use paintkit_core::{Algorithm, Color, PixelPoint, Point};
use paintkit_raster::{
    draw_cubic_bezier, draw_rectangle, draw_triangle, erase_area, PaintOp, Pen, PixmapSurface,
    RasterOptions, RecordingSurface, Surface,
};

fn pen() -> Pen {
    Pen::new(Color::rgb(255, 191, 0), 2.0)
}

#[test]
fn test_raster_rectangle_bounds_exact_box() {
    let mut surface = RecordingSurface::new(100, 100);
    draw_rectangle(
        &mut surface,
        Point::new(10.0, 10.0),
        Point::new(50.0, 80.0),
        &pen(),
        Algorithm::Raster,
        &RasterOptions::default(),
    );

    let centers = RecordingSurface::disc_centers(surface.ops());
    assert!(!centers.is_empty());
    for p in &centers {
        assert!((10..=50).contains(&p.x) && (10..=80).contains(&p.y), "{:?}", p);
        assert!(
            p.x == 10 || p.x == 50 || p.y == 10 || p.y == 80,
            "{:?} is not on the outline",
            p
        );
    }
    for corner in [(10, 10), (50, 10), (50, 80), (10, 80)] {
        assert!(centers.contains(&PixelPoint::from(corner)));
    }
    // Every outline pixel is covered.
    for x in 10..=50 {
        assert!(centers.contains(&PixelPoint::new(x, 10)));
        assert!(centers.contains(&PixelPoint::new(x, 80)));
    }
    for y in 10..=80 {
        assert!(centers.contains(&PixelPoint::new(10, y)));
        assert!(centers.contains(&PixelPoint::new(50, y)));
    }
}

#[test]
fn test_primitive_rectangle_is_closed_four_point_path() {
    let mut surface = RecordingSurface::new(100, 100);
    draw_rectangle(
        &mut surface,
        Point::new(50.0, 80.0),
        Point::new(10.0, 10.0),
        &pen(),
        Algorithm::Primitive,
        &RasterOptions::default(),
    );

    match surface.ops() {
        [PaintOp::Polyline { points, closed, .. }] => {
            assert!(*closed);
            assert_eq!(
                points,
                &vec![
                    Point::new(10.0, 10.0),
                    Point::new(50.0, 10.0),
                    Point::new(50.0, 80.0),
                    Point::new(10.0, 80.0),
                ]
            );
        }
        other => panic!("unexpected ops {:?}", other),
    }
}

#[test]
fn test_triangle_closes_back_to_first_point() {
    let mut surface = RecordingSurface::new(100, 100);
    let points = [
        Point::new(0.0, 0.0),
        Point::new(20.0, 0.0),
        Point::new(0.0, 20.0),
    ];
    draw_triangle(
        &mut surface,
        &points,
        &pen(),
        Algorithm::Raster,
        &RasterOptions::default(),
    );
    let centers = RecordingSurface::disc_centers(surface.ops());
    // Closing edge (0,20) -> (0,0) runs down the y axis.
    assert!(centers.contains(&PixelPoint::new(0, 10)));
}

#[test]
fn test_closed_and_open_bezier_differ_only_by_closing_edge() {
    let control = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 40.0),
        Point::new(40.0, 40.0),
        Point::new(50.0, 0.0),
    ];
    let mut open = RecordingSurface::new(100, 100);
    let mut closed = RecordingSurface::new(100, 100);
    let options = RasterOptions::default();
    draw_cubic_bezier(&mut open, control, false, &pen(), Algorithm::Primitive, &options);
    draw_cubic_bezier(&mut closed, control, true, &pen(), Algorithm::Primitive, &options);

    assert!(matches!(&open.ops()[0], PaintOp::Polyline { closed: false, points, .. } if points.len() == 101));
    assert!(matches!(&closed.ops()[0], PaintOp::Polyline { closed: true, points, .. } if points.len() == 101));
}

#[test]
fn test_pixmap_erase_area_restores_background() {
    let background = Color::rgb(26, 26, 36);
    let wide = Pen::new(Color::WHITE, 6.0);
    let mut surface = PixmapSurface::new(60, 60).unwrap();
    surface.clear(background);
    draw_rectangle(
        &mut surface,
        Point::new(10.0, 10.0),
        Point::new(40.0, 40.0),
        &wide,
        Algorithm::Raster,
        &RasterOptions::default(),
    );
    assert_eq!(surface.pixel(25, 10), Some(Color::WHITE));
    assert_eq!(surface.pixel(25, 25), Some(background));

    erase_area(&mut surface, Point::new(0.0, 0.0), Point::new(60.0, 60.0), background);
    assert_eq!(surface.pixel(25, 10), Some(background));
    assert_eq!(surface.pixel(40, 25), Some(background));
}
