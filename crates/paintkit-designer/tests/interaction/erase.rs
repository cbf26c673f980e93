use paintkit_designer::{KeyPress, SceneEvent, ShapeKind};
use paintkit_raster::PaintOp;
use paintkit_settings::PaintConfig;

use crate::common::{controller, drag, p};

#[test]
fn test_freehand_eraser_reports_each_sample() {
    let mut c = controller();
    c.key(&KeyPress::new("x"));
    assert_eq!(c.tools().tool, ShapeKind::EraseFreehand);

    c.pointer_down(p(5.0, 5.0));
    c.pointer_move(p(6.0, 7.0));
    c.pointer_up(p(6.0, 7.0));

    let events = c.take_events();
    assert_eq!(
        events,
        vec![
            SceneEvent::EraseStroke { point: p(5.0, 5.0), size: 4.0 },
            SceneEvent::EraseStroke { point: p(6.0, 7.0), size: 4.0 },
            SceneEvent::EraseStrokeFinished {
                points: vec![p(5.0, 5.0), p(6.0, 7.0)],
                size: 4.0,
            },
        ]
    );

    let background = PaintConfig::default().canvas.background;
    let shape = &c.scene().shapes()[0];
    assert_eq!(shape.color, background);
    assert_eq!(shape.stroke_width, 4.0);
    assert!(c.surface().frame().iter().any(|op| matches!(
        op,
        PaintOp::Polyline { style, closed: false, .. } if style.color == background && style.width == 4.0
    )));
}

#[test]
fn test_area_eraser_fills_box_with_background() {
    let mut c = controller();
    drag(&mut c, ShapeKind::EraseArea, p(20.0, 30.0), p(0.0, 0.0));

    assert_eq!(
        c.take_events(),
        vec![SceneEvent::EraseArea { start: p(20.0, 30.0), end: p(0.0, 0.0) }]
    );

    let background = PaintConfig::default().canvas.background;
    assert_eq!(
        c.surface().frame(),
        &[PaintOp::Rect { x: 0.0, y: 0.0, width: 20.0, height: 30.0, color: background }]
    );

    // Area erases are listed, so they can be undone.
    c.undo();
    assert!(c.surface().frame().is_empty());
}

#[test]
fn test_area_eraser_preview_is_dashed() {
    let mut c = controller();
    c.set_tool(ShapeKind::EraseArea);
    c.pointer_down(p(10.0, 10.0));
    c.pointer_move(p(40.0, 40.0));

    assert!(c.surface().frame().iter().any(|op| matches!(
        op,
        PaintOp::Polyline { style, closed: true, .. } if style.dash.is_some()
    )));
}
