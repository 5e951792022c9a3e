// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Bundled image assets.
//!
//! Assets are referenced by name (e.g. `image1`) and resolved inside a root
//! directory, trying the bare name first and then the common raster extensions.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::{OverlayError, Result};

/// Extensions tried, in order, when an asset name has none.
const ASSET_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Default asset directory.
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Default asset name.
pub const DEFAULT_ASSET: &str = "image1";

/// Directory of named image assets.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    root: PathBuf,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_ASSETS_DIR)
    }
}

impl AssetCatalog {
    /// Create a catalog rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the catalog.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an asset name to an existing file.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let direct = self.root.join(name);
        if direct.is_file() {
            return Some(direct);
        }
        ASSET_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{name}.{ext}")))
            .find(|candidate| candidate.is_file())
    }

    /// Load and decode the asset called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::AssetNotFound`] if no file matches and
    /// [`OverlayError::ImageError`] if the file cannot be decoded.
    pub fn load(&self, name: &str) -> Result<DynamicImage> {
        let path = self
            .resolve(name)
            .ok_or_else(|| OverlayError::AssetNotFound(format!("'{name}' in {}", self.root.display())))?;
        load_image(&path).map_err(|e| OverlayError::ImageError(format!("Failed to load image {}: {e}", path.display())))
    }
}

/// Load image helper to bypass zune-jpeg stride issues
pub fn load_image(path: &Path) -> image::ImageResult<DynamicImage> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    if matches!(ext.as_deref(), Some("jpg" | "jpeg"))
        && let Some(image) = decode_jpeg(path)
    {
        return Ok(image);
    }
    // Fallback
    image::open(path)
}

fn decode_jpeg(path: &Path) -> Option<DynamicImage> {
    let file = File::open(path).ok()?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder.decode().ok()?;
    let info = decoder.info()?;
    let (width, height) = (u32::from(info.width), u32::from(info.height));

    match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => {
            image::ImageBuffer::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8)
        }
        jpeg_decoder::PixelFormat::L8 => {
            image::ImageBuffer::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn catalog_with(files: &[&str]) -> (tempfile::TempDir, AssetCatalog) {
        let dir = tempfile::tempdir().unwrap();
        for name in files {
            RgbImage::from_pixel(4, 8, Rgb([10, 20, 30]))
                .save(dir.path().join(name))
                .unwrap();
        }
        let catalog = AssetCatalog::new(dir.path());
        (dir, catalog)
    }

    #[test]
    fn test_load_by_bare_name() {
        let (_dir, catalog) = catalog_with(&["image1.png"]);
        let image = catalog.load("image1").unwrap();
        assert_eq!((image.width(), image.height()), (4, 8));
    }

    #[test]
    fn test_load_jpeg_through_decoder() {
        let (_dir, catalog) = catalog_with(&["photo.jpg"]);
        let image = catalog.load("photo").unwrap();
        assert_eq!((image.width(), image.height()), (4, 8));
    }

    #[test]
    fn test_png_preferred_over_jpeg() {
        let (_dir, catalog) = catalog_with(&["image1.jpg", "image1.png"]);
        let path = catalog.resolve("image1").unwrap();
        assert_eq!(path.extension().unwrap(), "png");
    }

    #[test]
    fn test_missing_asset() {
        let (_dir, catalog) = catalog_with(&[]);
        assert!(matches!(catalog.load("image1"), Err(OverlayError::AssetNotFound(_))));
    }

    #[test]
    fn test_undecodable_asset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not an image").unwrap();
        let catalog = AssetCatalog::new(dir.path());
        assert!(matches!(catalog.load("broken"), Err(OverlayError::ImageError(_))));
    }
}
