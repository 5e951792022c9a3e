// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Conversion between normalized and pixel coordinates.

use serde::{Deserialize, Serialize};

use crate::joint::NormalizedPoint;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    /// Dimensions of the bundled `image1` asset.
    pub const BUNDLED_ASSET: Self = Self::new(768, 1536);

    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::BUNDLED_ASSET
    }
}

/// A location in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Nearest integer pixel, as used by the rasterizer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

/// Project a normalized point into an image of `width` × `height` pixels.
#[must_use]
pub fn image_point_for_normalized_point(point: NormalizedPoint, width: u32, height: u32) -> PixelPoint {
    PixelPoint::new(point.x * f64::from(width), point.y * f64::from(height))
}
