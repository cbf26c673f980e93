use paintkit_core::{Algorithm, PixelPoint};
use paintkit_designer::{KeyPress, SceneEvent, ShapeKind};
use paintkit_raster::{PaintOp, RecordingSurface};

use crate::common::{click, controller, drag, p};

#[test]
fn test_freehand_stroke_is_one_completed_shape() {
    let mut c = controller();
    c.pointer_down(p(0.0, 0.0));
    c.pointer_move(p(5.0, 5.0));
    c.pointer_move(p(10.0, 0.0));
    c.pointer_up(p(10.0, 0.0));

    let shapes = c.scene().shapes();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].kind, ShapeKind::Freehand);
    assert_eq!(shapes[0].points, vec![p(0.0, 0.0), p(5.0, 5.0), p(10.0, 0.0)]);
    assert!(shapes[0].completed);
    assert!(!c.scene().can_redo());
    assert!(!c.scene().in_progress());

    let events = c.take_events();
    assert!(matches!(events.as_slice(), [SceneEvent::ShapeCompleted { .. }]));
}

#[test]
fn test_stroke_without_release_is_kept() {
    let mut c = controller();
    c.pointer_down(p(0.0, 0.0));
    c.pointer_move(p(5.0, 5.0));
    // The release was lost; the next press starts a new stroke.
    c.pointer_down(p(50.0, 50.0));
    c.pointer_move(p(60.0, 50.0));
    c.pointer_up(p(60.0, 50.0));

    let shapes = c.scene().shapes();
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[0].points, vec![p(0.0, 0.0), p(5.0, 5.0)]);
    assert!(shapes[0].completed);
    assert_eq!(shapes[1].points, vec![p(50.0, 50.0), p(60.0, 50.0)]);
    assert!(shapes[1].completed);

    let events = c.take_events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| matches!(e, SceneEvent::ShapeCompleted { .. })));
}

#[test]
fn test_moves_without_press_do_not_draw() {
    let mut c = controller();
    c.pointer_move(p(5.0, 5.0));
    c.pointer_up(p(5.0, 5.0));
    assert!(c.scene().shapes().is_empty());
    assert!(c.take_events().is_empty());
}

#[test]
fn test_rectangle_drag_records_two_corners() {
    let mut c = controller();
    c.set_tool(ShapeKind::Rectangle);
    c.pointer_down(p(10.0, 10.0));
    c.pointer_move(p(30.0, 40.0));
    assert!(c.scene().shapes().is_empty(), "drag shapes are listed on release");
    c.pointer_move(p(50.0, 80.0));
    c.pointer_up(p(50.0, 80.0));

    let shapes = c.scene().shapes();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].points, vec![p(10.0, 10.0), p(50.0, 80.0)]);

    // Raster outline: both vertical edges are stamped, the interior is not.
    let centers = RecordingSurface::disc_centers(c.surface().frame());
    assert!(centers.contains(&PixelPoint::new(10, 45)));
    assert!(centers.contains(&PixelPoint::new(50, 45)));
    assert!(centers.contains(&PixelPoint::new(30, 10)));
    assert!(!centers.contains(&PixelPoint::new(30, 45)));
}

#[test]
fn test_primitive_circle_uses_native_stroke() {
    let mut c = controller();
    c.set_algorithm(Algorithm::Primitive);
    drag(&mut c, ShapeKind::Circle, p(50.0, 50.0), p(53.0, 54.0));

    assert!(c.surface().frame().iter().any(|op| matches!(
        op,
        PaintOp::Ellipse { rx, ry, .. } if *rx == 5.0 && *ry == 5.0
    )));
}

#[test]
fn test_triangle_completes_on_third_click() {
    let mut c = controller();
    c.set_tool(ShapeKind::Triangle);
    click(&mut c, p(0.0, 0.0));
    click(&mut c, p(20.0, 0.0));
    assert!(c.scene().in_progress());
    assert!(c.take_events().is_empty());
    click(&mut c, p(10.0, 15.0));

    let shape = &c.scene().shapes()[0];
    assert_eq!(shape.points.len(), 3);
    assert!(shape.completed);
    assert!(!c.scene().in_progress());
    assert_eq!(c.take_events().len(), 1);
}

#[test]
fn test_cubic_bezier_needs_four_clicks() {
    let mut c = controller();
    c.set_tool(ShapeKind::BezierClosed);
    for x in [0.0, 10.0, 20.0] {
        click(&mut c, p(x, 0.0));
    }
    assert!(!c.scene().shapes()[0].completed);
    click(&mut c, p(30.0, 0.0));
    assert!(c.scene().shapes()[0].completed);
    assert_eq!(c.scene().shapes()[0].points.len(), 4);
}

#[test]
fn test_polygon_double_click_adds_no_point() {
    let mut c = controller();
    c.set_tool(ShapeKind::Polygon);
    click(&mut c, p(0.0, 0.0));
    click(&mut c, p(40.0, 0.0));
    click(&mut c, p(20.0, 30.0));
    c.double_click(p(20.0, 30.0));

    let shapes = c.scene().shapes();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].points, vec![p(0.0, 0.0), p(40.0, 0.0), p(20.0, 30.0)]);
    assert!(shapes[0].completed);

    // A new click starts a new polygon.
    click(&mut c, p(100.0, 100.0));
    assert_eq!(c.scene().shapes().len(), 2);
}

#[test]
fn test_polygon_double_click_with_one_point_discards() {
    let mut c = controller();
    c.set_tool(ShapeKind::Polygon);
    click(&mut c, p(0.0, 0.0));
    c.double_click(p(0.0, 0.0));
    assert!(c.scene().shapes().is_empty());
    assert!(c.take_events().is_empty());
}

#[test]
fn test_escape_discards_in_progress_shape() {
    let mut c = controller();
    c.set_tool(ShapeKind::Polygon);
    click(&mut c, p(0.0, 0.0));
    click(&mut c, p(10.0, 0.0));
    c.key(&KeyPress::new("Escape"));

    assert!(c.scene().shapes().is_empty());
    assert!(!c.scene().in_progress());
    assert!(!c.scene().can_redo());
}

#[test]
fn test_tool_switch_cancels_by_default() {
    let mut c = controller();
    c.set_tool(ShapeKind::Triangle);
    click(&mut c, p(0.0, 0.0));
    click(&mut c, p(10.0, 0.0));
    c.key(&KeyPress::new("l"));

    assert_eq!(c.tools().tool, ShapeKind::Line);
    assert!(c.scene().shapes().is_empty());
}

#[test]
fn test_setters_apply_to_new_shapes() {
    let mut c = controller();
    c.set_color("#00ff00".parse().unwrap());
    c.set_stroke_width(6.0);
    c.set_stroke_width(-1.0);
    drag(&mut c, ShapeKind::Line, p(0.0, 0.0), p(10.0, 10.0));

    let shape = &c.scene().shapes()[0];
    assert_eq!(shape.color.to_hex(), "#00ff00");
    assert_eq!(shape.stroke_width, 6.0);
}
