//! Drawing surfaces consumed by the rasterizer.
//!
//! A [`Surface`] is an addressable pixel buffer exposing the handful of paint
//! primitives the scan-conversion code needs. [`RecordingSurface`] keeps the
//! calls as values instead of pixels, which is what the tests inspect.

use image::RgbaImage;
use paintkit_core::{Color, PixelPoint, Point};

/// Stroke parameters for continuous (path) rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    /// Dash pattern as (on, off) lengths.
    pub dash: Option<(f32, f32)>,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f64, on: f32, off: f32) -> Self {
        Self {
            color,
            width,
            dash: Some((on, off)),
        }
    }
}

/// Primitive paint operations offered by a drawing surface.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Paints one 1x1 pixel.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Fills a disc centred on `center`.
    fn fill_disc(&mut self, center: Point, radius: f64, color: Color);

    /// Fills an axis-aligned rectangle. Empty rectangles paint nothing.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    /// Strokes one connected path through `points`.
    fn stroke_polyline(&mut self, points: &[Point], closed: bool, style: &StrokeStyle);

    /// Strokes an axis-aligned ellipse outline.
    fn stroke_ellipse(&mut self, center: Point, rx: f64, ry: f64, style: &StrokeStyle);

    /// Replaces the surface content with `image`, drawn at the origin.
    fn draw_image(&mut self, image: &RgbaImage);
}

/// One recorded paint call.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Clear(Color),
    Pixel {
        x: i32,
        y: i32,
        color: Color,
    },
    Disc {
        center: Point,
        radius: f64,
        color: Color,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Polyline {
        points: Vec<Point>,
        closed: bool,
        style: StrokeStyle,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        style: StrokeStyle,
    },
    Image {
        width: u32,
        height: u32,
    },
}

/// A surface that records paint calls instead of producing pixels.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<PaintOp>,
    clear_count: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            clear_count: 0,
        }
    }

    /// Every call since creation.
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Calls since the most recent `clear`, i.e. the last full frame.
    pub fn frame(&self) -> &[PaintOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, PaintOp::Clear(_)))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.ops[start..]
    }

    /// Number of times the surface was cleared (one per redraw).
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    pub fn take_ops(&mut self) -> Vec<PaintOp> {
        std::mem::take(&mut self.ops)
    }

    /// Rounded centres of the discs in `ops`, in call order.
    pub fn disc_centers(ops: &[PaintOp]) -> Vec<PixelPoint> {
        ops.iter()
            .filter_map(|op| match op {
                PaintOp::Disc { center, .. } => Some(center.rounded()),
                _ => None,
            })
            .collect()
    }

    /// Addresses of the single pixels in `ops`, in call order.
    pub fn pixels(ops: &[PaintOp]) -> Vec<PixelPoint> {
        ops.iter()
            .filter_map(|op| match op {
                PaintOp::Pixel { x, y, .. } => Some(PixelPoint::new(*x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.clear_count += 1;
        self.ops.push(PaintOp::Clear(color));
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.ops.push(PaintOp::Pixel { x, y, color });
    }

    fn fill_disc(&mut self, center: Point, radius: f64, color: Color) {
        self.ops.push(PaintOp::Disc {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.ops.push(PaintOp::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[Point], closed: bool, style: &StrokeStyle) {
        self.ops.push(PaintOp::Polyline {
            points: points.to_vec(),
            closed,
            style: *style,
        });
    }

    fn stroke_ellipse(&mut self, center: Point, rx: f64, ry: f64, style: &StrokeStyle) {
        self.ops.push(PaintOp::Ellipse {
            center,
            rx,
            ry,
            style: *style,
        });
    }

    fn draw_image(&mut self, image: &RgbaImage) {
        self.ops.push(PaintOp::Image {
            width: image.width(),
            height: image.height(),
        });
    }
}
