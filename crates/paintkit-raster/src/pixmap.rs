//! Pixel-backed surface rendered with tiny-skia.
//!
//! Discs and paths are anti-aliased; single pixels and erase rectangles are
//! not, so a raster walk lands on exact pixel addresses.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use paintkit_core::{Color, Error, ImageError, Point, Result};
use tiny_skia::{
    ColorU8, FillRule, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, StrokeDash,
    Transform,
};
use tracing::{debug, warn};

use crate::surface::{StrokeStyle, Surface};

fn paint_for(color: Color, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = anti_alias;
    paint
}

fn stroke_for(style: &StrokeStyle) -> Stroke {
    let mut stroke = Stroke {
        width: style.width.max(0.0) as f32,
        ..Default::default()
    };
    if let Some((on, off)) = style.dash {
        stroke.dash = StrokeDash::new(vec![on, off], 0.0);
    }
    stroke
}

/// An RGBA surface backed by a [`tiny_skia::Pixmap`].
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Creates a transparent surface. Zero-sized surfaces are bumped to 1x1.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            pixmap: blank_pixmap(width, height)?,
        })
    }

    /// Creates a surface holding a copy of `image`.
    pub fn from_image(image: &RgbaImage) -> Result<Self> {
        let mut surface = Self::new(image.width(), image.height())?;
        surface.draw_image(image);
        Ok(surface)
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Reads one pixel, demultiplied. Out-of-range addresses yield `None`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Copies the surface out as a straight-alpha image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let pixels = self.pixmap.pixels();
        RgbaImage::from_fn(width, height, |x, y| {
            let c = pixels[(y * width + x) as usize].demultiply();
            Rgba([c.red(), c.green(), c.blue(), c.alpha()])
        })
    }

    /// Encodes the surface as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(self.to_rgba_image())
            .write_to(&mut bytes, ImageFormat::Png)
            .map_err(|e| ImageError::EncodeFailed {
                reason: e.to_string(),
            })?;
        Ok(bytes.into_inner())
    }

    /// Writes the surface to `path` as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(Error::from)?;
        debug!("Saved {}x{} surface to {}", self.width(), self.height(), path.display());
        Ok(())
    }

    /// Changes the surface size. Content is kept anchored at the top-left.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let mut resized = blank_pixmap(width, height)?;
        resized.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        self.pixmap = resized;
        Ok(())
    }
}

fn blank_pixmap(width: u32, height: u32) -> Result<Pixmap> {
    let width = width.max(1);
    let height = height.max(1);
    Pixmap::new(width, height)
        .ok_or_else(|| Error::other(format!("Cannot allocate a {}x{} surface", width, height)))
}

fn pixmap_from_image(image: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;
    let mut data = Vec::with_capacity(image.as_raw().len());
    for px in image.pixels() {
        let [r, g, b, a] = px.0;
        let p = ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[p.red(), p.green(), p.blue(), p.alpha()]);
    }
    Pixmap::from_vec(data, size)
}

impl Surface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(rect) = Rect::from_xywh(x as f32, y as f32, 1.0, 1.0) {
            self.pixmap
                .fill_rect(rect, &paint_for(color, false), Transform::identity(), None);
        }
    }

    fn fill_disc(&mut self, center: Point, radius: f64, color: Color) {
        if !center.is_finite() || !(radius > 0.0) {
            return;
        }
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        {
            self.pixmap.fill_path(
                &path,
                &paint_for(color, true),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        if let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) {
            self.pixmap
                .fill_rect(rect, &paint_for(color, false), Transform::identity(), None);
        }
    }

    fn stroke_polyline(&mut self, points: &[Point], closed: bool, style: &StrokeStyle) {
        let mut pb = PathBuilder::new();
        let mut finite = points.iter().filter(|p| p.is_finite());
        let Some(first) = finite.next() else {
            return;
        };
        pb.move_to(first.x as f32, first.y as f32);
        for p in finite {
            pb.line_to(p.x as f32, p.y as f32);
        }
        if closed {
            pb.close();
        }
        if let Some(path) = pb.finish() {
            self.pixmap.stroke_path(
                &path,
                &paint_for(style.color, true),
                &stroke_for(style),
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_ellipse(&mut self, center: Point, rx: f64, ry: f64, style: &StrokeStyle) {
        let Some(oval) = Rect::from_xywh(
            (center.x - rx) as f32,
            (center.y - ry) as f32,
            (rx * 2.0) as f32,
            (ry * 2.0) as f32,
        ) else {
            return;
        };
        if let Some(path) = PathBuilder::from_oval(oval) {
            self.pixmap.stroke_path(
                &path,
                &paint_for(style.color, true),
                &stroke_for(style),
                Transform::identity(),
                None,
            );
        }
    }

    fn draw_image(&mut self, image: &RgbaImage) {
        let Some(source) = pixmap_from_image(image) else {
            warn!("Ignoring empty {}x{} image", image.width(), image.height());
            return;
        };
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}
