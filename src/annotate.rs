// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Rasterization of joint markers and paths onto a copy of an image.

use std::path::Path;

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::geometry::PixelPoint;
use crate::visualizer::Color;

/// Appearance of markers and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawStyle {
    /// Marker fill color.
    pub fill: Color,
    /// Marker outline and path color.
    pub stroke: Color,
    /// Marker radius in pixels.
    pub radius: u32,
    /// Outline and path width in pixels.
    pub line_width: u32,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            fill: Color::WHITE,
            stroke: Color::BLUE,
            radius: 5,
            line_width: 2,
        }
    }
}

impl DrawStyle {
    #[must_use]
    pub const fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub const fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    #[must_use]
    pub const fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    #[must_use]
    pub const fn with_line_width(mut self, line_width: u32) -> Self {
        self.line_width = line_width;
        self
    }
}

/// Everything to draw over an image: markers, open polylines and closed polygons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub points: Vec<PixelPoint>,
    pub open_paths: Vec<Vec<PixelPoint>>,
    pub closed_paths: Vec<Vec<PixelPoint>>,
}

impl Overlay {
    /// Overlay with markers only.
    #[must_use]
    pub fn from_points(points: Vec<PixelPoint>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_open_path(mut self, path: Vec<PixelPoint>) -> Self {
        self.open_paths.push(path);
        self
    }

    #[must_use]
    pub fn with_closed_path(mut self, path: Vec<PixelPoint>) -> Self {
        self.closed_paths.push(path);
        self
    }
}

/// Draw `overlay` onto a fresh RGBA copy of `image`.
///
/// Markers come first, then open paths, then closed paths, so paths are drawn on
/// top of markers. The output has the same dimensions as `image`.
#[must_use]
pub fn draw(image: &DynamicImage, overlay: &Overlay, style: &DrawStyle) -> RgbaImage {
    let mut canvas = image.to_rgba8();

    for point in &overlay.points {
        draw_marker(&mut canvas, *point, style);
    }
    for path in &overlay.open_paths {
        draw_path(&mut canvas, path, false, style.stroke.to_rgba(), style.line_width);
    }
    for path in &overlay.closed_paths {
        draw_path(&mut canvas, path, true, style.stroke.to_rgba(), style.line_width);
    }

    canvas
}

/// Filled circle with an outline centered on its edge.
///
/// The outline covers `line_width` pixels straddling `radius`: the stroke disk is
/// painted first and the fill disk on top of it.
#[allow(clippy::cast_possible_wrap)]
fn draw_marker(canvas: &mut RgbaImage, center: PixelPoint, style: &DrawStyle) {
    let radius = style.radius as i32;
    let outer = radius + (style.line_width / 2) as i32;
    if !near_canvas(canvas, center, f64::from(outer)) {
        return;
    }

    let center = center.rounded();
    let inner = radius - (style.line_width - style.line_width / 2) as i32;

    if style.line_width > 0 {
        draw_filled_circle_mut(canvas, center, outer, style.stroke.to_rgba());
    }
    if inner >= 0 {
        draw_filled_circle_mut(canvas, center, inner, style.fill.to_rgba());
    }
}

/// Connect consecutive points; a closed path also returns to its first point.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn draw_path(canvas: &mut RgbaImage, points: &[PixelPoint], closed: bool, color: Rgba<u8>, line_width: u32) {
    if points.len() < 2 {
        return;
    }

    let mut segments: Vec<(PixelPoint, PixelPoint)> = points.windows(2).map(|w| (w[0], w[1])).collect();
    if closed {
        segments.push((points[points.len() - 1], points[0]));
    }

    let width = line_width.max(1) as f32;
    let margin = f64::from(canvas.width().max(canvas.height()));
    for (start, end) in segments {
        if !near_canvas(canvas, start, margin) || !near_canvas(canvas, end, margin) {
            continue;
        }
        let (x0, y0) = (start.x as f32, start.y as f32);
        let (x1, y1) = (end.x as f32, end.y as f32);
        let length = (x1 - x0).hypot(y1 - y0);
        if length <= f32::EPSILON {
            continue;
        }

        // Unit normal; thickness is built from parallel one-pixel lines.
        let (nx, ny) = (-(y1 - y0) / length, (x1 - x0) / length);
        for t in 0..line_width.max(1) {
            let offset = t as f32 - (width - 1.0) / 2.0;
            draw_line_segment_mut(
                canvas,
                (x0 + nx * offset, y0 + ny * offset),
                (x1 + nx * offset, y1 + ny * offset),
                color,
            );
        }
    }
}

/// Whether `point` lies within `margin` pixels of the canvas. NaN never does.
fn near_canvas(canvas: &RgbaImage, point: PixelPoint, margin: f64) -> bool {
    let (w, h) = (f64::from(canvas.width()), f64::from(canvas.height()));
    (-margin..=w + margin).contains(&point.x) && (-margin..=h + margin).contains(&point.y)
}

/// Find the next available run directory (overlay, overlay2, overlay3, etc.)
pub fn find_next_run_dir(base: &str, prefix: &str) -> String {
    let base_path = Path::new(base);

    let first = base_path.join(prefix);
    if !first.exists() {
        return first.to_string_lossy().to_string();
    }

    for i in 2.. {
        let numbered = base_path.join(format!("{prefix}{i}"));
        if !numbered.exists() {
            return numbered.to_string_lossy().to_string();
        }
    }

    base_path.join(prefix).to_string_lossy().to_string()
}
