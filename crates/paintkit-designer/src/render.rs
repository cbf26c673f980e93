//! Redraw driver.
//!
//! A redraw is a total rebuild: clear to the background, paint every listed
//! shape in order, then paint the in-progress shape once more as a preview.

use paintkit_core::{Algorithm, Color, Point};
use paintkit_raster::{
    draw_circle, draw_cubic_bezier, draw_ellipse, draw_freehand, draw_line, draw_polyline,
    draw_quadratic_bezier, draw_rectangle, draw_triangle, erase_area, erase_freehand,
    rectangle_corners, Pen, RasterOptions, StrokeStyle, Surface,
};
use paintkit_settings::PaintConfig;

use crate::model::{Shape, ShapeKind, ToolFamily};
use crate::scene::SceneState;

/// Dash pattern of the erase-area selection outline.
const SELECTION_DASH: (f32, f32) = (5.0, 5.0);

/// Scene-independent rendering parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub background: Color,
    pub raster: RasterOptions,
    /// Radius of the control-point markers drawn on previews.
    pub marker_radius: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from_config(&PaintConfig::default())
    }
}

impl RenderSettings {
    pub fn from_config(config: &PaintConfig) -> Self {
        Self {
            background: config.canvas.background,
            raster: RasterOptions {
                line: config.raster.line,
                circle: config.raster.circle,
                bezier_steps: config.tools.bezier_steps,
            },
            marker_radius: config.tools.marker_radius,
        }
    }
}

/// Transient input to the preview pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Preview {
    /// Last pointer position, used as a provisional extra control point.
    pub hover: Option<Point>,
    /// Color of the control-point markers.
    pub marker_color: Option<Color>,
}

/// Clears `surface` and repaints `scene`.
pub fn redraw<S: Surface + ?Sized>(
    scene: &SceneState,
    preview: &Preview,
    surface: &mut S,
    settings: &RenderSettings,
) {
    surface.clear(settings.background);
    for shape in scene.shapes() {
        render_shape(surface, shape, settings);
    }
    if let Some(current) = scene.current() {
        render_preview(surface, current, preview, settings);
    }
}

/// Paints one shape in its final form.
///
/// Shapes short of the points their kind needs paint what they can: an
/// unfinished polygon or triangle as an open path, drag and curve kinds not
/// at all.
pub fn render_shape<S: Surface + ?Sized>(surface: &mut S, shape: &Shape, settings: &RenderSettings) {
    let pen = Pen::new(shape.color, shape.stroke_width);
    let alg = shape.algorithm;
    let opts = &settings.raster;
    let pts = shape.points.as_slice();

    match shape.kind {
        ShapeKind::Freehand => draw_freehand(surface, pts, &pen, alg),
        ShapeKind::Line => {
            if let [a, .., b] = pts {
                draw_line(surface, *a, *b, &pen, alg, opts);
            }
        }
        ShapeKind::Circle => {
            if let [c, .., edge] = pts {
                draw_circle(surface, *c, c.distance_to(edge), &pen, alg, opts);
            }
        }
        ShapeKind::Ellipse => {
            if let [c, .., edge] = pts {
                draw_ellipse(surface, *c, edge.x - c.x, edge.y - c.y, &pen, alg);
            }
        }
        ShapeKind::Rectangle => {
            if let [a, .., b] = pts {
                draw_rectangle(surface, *a, *b, &pen, alg, opts);
            }
        }
        ShapeKind::Triangle => draw_triangle(surface, pts, &pen, alg, opts),
        ShapeKind::Polygon => draw_polyline(surface, pts, shape.completed, &pen, alg, opts),
        ShapeKind::QuadraticBezier => {
            if let [p0, p1, p2, ..] = pts {
                draw_quadratic_bezier(surface, [*p0, *p1, *p2], &pen, alg, opts);
            }
        }
        ShapeKind::BezierOpen | ShapeKind::BezierClosed => {
            if let [p0, p1, p2, p3, ..] = pts {
                let closed = shape.kind == ShapeKind::BezierClosed;
                draw_cubic_bezier(surface, [*p0, *p1, *p2, *p3], closed, &pen, alg, opts);
            }
        }
        ShapeKind::EraseFreehand => {
            erase_freehand(surface, pts, shape.stroke_width, settings.background)
        }
        ShapeKind::EraseArea => {
            if let [a, .., b] = pts {
                erase_area(surface, *a, *b, settings.background);
            }
        }
    }
}

/// Triangle preview with two points: a third point mirrored along x.
fn provisional_triangle_apex(a: Point, b: Point) -> Point {
    Point::new(a.x + (b.x - a.x) * 2.0, a.y)
}

fn render_preview<S: Surface + ?Sized>(
    surface: &mut S,
    shape: &Shape,
    preview: &Preview,
    settings: &RenderSettings,
) {
    let pen = Pen::new(shape.color, shape.stroke_width);
    let thin = Pen::new(shape.color, 1.0);
    let opts = &settings.raster;
    let family = shape.kind.tool_family();

    // Click-built shapes follow the pointer with a provisional point.
    let mut points = shape.points.clone();
    if matches!(family, ToolFamily::FixedClick(_) | ToolFamily::OpenClick) && !shape.completed {
        if let Some(hover) = preview.hover {
            points.push(hover);
        }
    }

    match shape.kind {
        ShapeKind::EraseArea => {
            if let [a, .., b] = points.as_slice() {
                let style =
                    StrokeStyle::dashed(Color::RED, 1.0, SELECTION_DASH.0, SELECTION_DASH.1);
                surface.stroke_polyline(&rectangle_corners(*a, *b), true, &style);
            }
        }
        ShapeKind::Triangle if points.len() < 3 => {
            if let [a, b] = points.as_slice() {
                let apex = provisional_triangle_apex(*a, *b);
                draw_triangle(surface, &[*a, *b, apex], &pen, shape.algorithm, opts);
            }
        }
        ShapeKind::BezierOpen | ShapeKind::BezierClosed | ShapeKind::QuadraticBezier
            if !shape.has_all_points() =>
        {
            if points.len() >= shape.kind.min_points() {
                let mut provisional = shape.clone();
                provisional.points = points;
                render_shape(surface, &provisional, settings);
            } else {
                draw_polyline(surface, &points, false, &thin, Algorithm::Primitive, opts);
            }
        }
        _ => {
            let mut provisional = shape.clone();
            provisional.points = points;
            render_shape(surface, &provisional, settings);
        }
    }

    if family != ToolFamily::Continuous {
        if let Some(color) = preview.marker_color {
            for p in &shape.points {
                surface.fill_disc(*p, settings.marker_radius, color);
            }
        }
    }
}
