use paintkit_designer::{KeyPress, SceneEvent, ShapeKind};
use paintkit_settings::{PaintConfig, ToolSwitchPolicy};
use proptest::prelude::*;
use uuid::Uuid;

use crate::common::{click, controller, controller_with, drag, p, Controller};

fn ids(c: &Controller) -> Vec<Uuid> {
    c.scene().shapes().iter().map(|s| s.id).collect()
}

fn draw_lines(c: &mut Controller, n: usize) {
    for i in 0..n {
        let y = i as f64 * 10.0;
        drag(c, ShapeKind::Line, p(0.0, y), p(50.0, y));
    }
}

#[test]
fn test_undo_then_redo_restores_shape() {
    let mut c = controller();
    draw_lines(&mut c, 2);
    let before = ids(&c);

    c.key(&KeyPress::ctrl("z"));
    assert_eq!(c.scene().shapes().len(), 1);
    assert!(c.scene().can_redo());

    c.key(&KeyPress::ctrl("y"));
    assert_eq!(ids(&c), before);
    assert!(!c.scene().can_redo());
}

#[test]
fn test_drawing_after_undo_drops_redo() {
    let mut c = controller();
    draw_lines(&mut c, 2);
    c.undo();
    drag(&mut c, ShapeKind::Circle, p(100.0, 100.0), p(110.0, 100.0));
    let before = ids(&c);

    c.redo();
    assert_eq!(ids(&c), before);
    assert_eq!(c.scene().shapes()[1].kind, ShapeKind::Circle);
}

#[test]
fn test_discarded_click_shape_keeps_redo() {
    let mut c = controller();
    draw_lines(&mut c, 1);
    let line = ids(&c);
    c.undo();

    c.set_tool(ShapeKind::Triangle);
    click(&mut c, p(0.0, 0.0));
    c.key(&KeyPress::new("Escape"));
    assert!(c.scene().shapes().is_empty());
    assert!(c.scene().can_redo());

    c.set_tool(ShapeKind::Polygon);
    click(&mut c, p(5.0, 5.0));
    c.double_click(p(5.0, 5.0));
    assert!(c.scene().can_redo());

    c.key(&KeyPress::ctrl("y"));
    assert_eq!(ids(&c), line);
}

#[test]
fn test_redo_mid_click_shape_drops_it() {
    let mut c = controller();
    draw_lines(&mut c, 1);
    let line = ids(&c);
    c.undo();

    c.set_tool(ShapeKind::BezierOpen);
    click(&mut c, p(0.0, 0.0));
    click(&mut c, p(10.0, 10.0));
    c.redo();
    assert_eq!(ids(&c), line);
    assert!(!c.scene().in_progress());
}

#[test]
fn test_undo_on_empty_scene_is_noop() {
    let mut c = controller();
    let clears = c.surface().clear_count();
    c.undo();
    c.redo();
    assert!(c.scene().shapes().is_empty());
    assert_eq!(c.surface().clear_count(), clears);
}

#[test]
fn test_clear_drops_shapes_and_history() {
    let mut c = controller();
    draw_lines(&mut c, 3);
    c.undo();
    c.take_events();

    c.key(&KeyPress::new("Delete"));
    assert!(c.scene().shapes().is_empty());
    assert!(!c.scene().can_undo());
    assert!(!c.scene().can_redo());
    assert_eq!(c.take_events(), vec![SceneEvent::Cleared]);
}

#[test]
fn test_kept_shape_resumes_on_tool_return() {
    let mut config = PaintConfig::default();
    config.tools.tool_switch = ToolSwitchPolicy::KeepInProgress;
    let mut c = controller_with(&config);

    c.set_tool(ShapeKind::Triangle);
    click(&mut c, p(0.0, 0.0));
    click(&mut c, p(10.0, 0.0));
    c.set_tool(ShapeKind::Line);
    assert_eq!(c.scene().shapes().len(), 1);
    assert!(!c.scene().in_progress());

    c.set_tool(ShapeKind::Triangle);
    click(&mut c, p(5.0, 8.0));
    let shapes = c.scene().shapes();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].points.len(), 3);
    assert!(shapes[0].completed);
}

proptest! {
    #[test]
    fn prop_undo_redo_round_trip(n in 1usize..8, k_seed in 0usize..8) {
        let k = k_seed % (n + 1);
        let mut c = controller();
        draw_lines(&mut c, n);
        let before = ids(&c);

        for _ in 0..k {
            c.undo();
        }
        prop_assert_eq!(c.scene().shapes().len(), n - k);
        for _ in 0..k {
            c.redo();
        }
        prop_assert_eq!(ids(&c), before);
        prop_assert!(!c.scene().can_redo());
    }
}
