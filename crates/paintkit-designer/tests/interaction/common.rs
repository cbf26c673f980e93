use paintkit_core::Point;
use paintkit_designer::{InteractionController, ShapeKind};
use paintkit_raster::RecordingSurface;
use paintkit_settings::PaintConfig;

pub type Controller = InteractionController<RecordingSurface>;

pub fn controller() -> Controller {
    controller_with(&PaintConfig::default())
}

pub fn controller_with(config: &PaintConfig) -> Controller {
    InteractionController::new(RecordingSurface::new(200, 200), config)
}

pub fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Press, move to `to`, release.
pub fn drag(c: &mut Controller, kind: ShapeKind, from: Point, to: Point) {
    c.set_tool(kind);
    c.pointer_down(from);
    c.pointer_move(to);
    c.pointer_up(to);
}

pub fn click(c: &mut Controller, at: Point) {
    c.pointer_down(at);
    c.pointer_up(at);
}
