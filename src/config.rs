// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Overlay configuration.

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::annotate::DrawStyle;
use crate::assets::{DEFAULT_ASSET, DEFAULT_ASSETS_DIR};
use crate::geometry::ImageSize;

/// Pixel space that normalized joint locations are projected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSpace {
    /// Fixed dimensions, independent of the loaded image.
    Fixed(ImageSize),
    /// The loaded image's own dimensions.
    SourceImage,
}

impl Default for CoordinateSpace {
    fn default() -> Self {
        Self::Fixed(ImageSize::BUNDLED_ASSET)
    }
}

impl CoordinateSpace {
    /// Dimensions to project into for `image`.
    #[must_use]
    pub fn size_for(&self, image: &DynamicImage) -> ImageSize {
        match self {
            Self::Fixed(size) => *size,
            Self::SourceImage => ImageSize::new(image.width(), image.height()),
        }
    }
}

/// Configuration for the pose overlay view.
///
/// # Example
///
/// ```rust
/// use pose_overlay::{CoordinateSpace, OverlayConfig};
///
/// let config = OverlayConfig::new()
///     .with_asset("image1")
///     .with_assets_dir("assets")
///     .with_coordinates(CoordinateSpace::SourceImage)
///     .with_outline(true);
/// ```
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Name of the bundled image asset.
    pub asset: String,
    /// Directory holding the image assets.
    pub assets_dir: PathBuf,
    /// Projection used for joint locations.
    pub coordinates: CoordinateSpace,
    /// Marker and path appearance.
    pub style: DrawStyle,
    /// Also stroke the closed torso outline through the markers.
    pub outline: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            asset: DEFAULT_ASSET.to_string(),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            coordinates: CoordinateSpace::default(),
            style: DrawStyle::default(),
            outline: false,
        }
    }
}

impl OverlayConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = asset.into();
        self
    }

    #[must_use]
    pub fn with_assets_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.assets_dir = dir.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub const fn with_coordinates(mut self, coordinates: CoordinateSpace) -> Self {
        self.coordinates = coordinates;
        self
    }

    #[must_use]
    pub const fn with_style(mut self, style: DrawStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn with_outline(mut self, outline: bool) -> Self {
        self.outline = outline;
        self
    }
}
