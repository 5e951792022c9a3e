// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! The pose-to-overlay pipeline.
//!
//! [`OverlayView`] owns the displayed image. When it appears it loads the bundled
//! asset, runs one body-pose request, and replaces the placeholder with the asset
//! composited with torso markers. Every failure leaves the placeholder in place
//! and is only logged.

use image::{DynamicImage, RgbaImage};

use crate::annotate::{Overlay, draw};
use crate::assets::AssetCatalog;
use crate::config::OverlayConfig;
use crate::detector::PoseDetector;
use crate::error::Result;
use crate::extract::torso_image_points;
use crate::observation::PoseObservation;
use crate::{error, verbose, warn};

/// What the view currently displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayedImage {
    /// Nothing has been composited yet.
    #[default]
    Placeholder,
    /// The asset with torso markers drawn on it.
    Composited(RgbaImage),
}

/// Single view that overlays detected torso joints on a bundled image.
#[derive(Debug, Clone)]
pub struct OverlayView {
    config: OverlayConfig,
    catalog: AssetCatalog,
    source: Option<DynamicImage>,
    displayed: DisplayedImage,
}

impl OverlayView {
    /// Create a view showing the placeholder.
    #[must_use]
    pub fn new(config: OverlayConfig) -> Self {
        let catalog = AssetCatalog::new(&config.assets_dir);
        Self {
            config,
            catalog,
            source: None,
            displayed: DisplayedImage::Placeholder,
        }
    }

    /// Run the pipeline once, as when the view appears.
    pub fn appear<D: PoseDetector + ?Sized>(&mut self, detector: &mut D) -> &DisplayedImage {
        self.detect_pose(detector);
        &self.displayed
    }

    /// Load the asset and submit it to `detector`.
    ///
    /// A missing asset is a no-op.
    pub fn detect_pose<D: PoseDetector + ?Sized>(&mut self, detector: &mut D) {
        let image = match self.catalog.load(&self.config.asset) {
            Ok(image) => image,
            Err(e) => {
                warn!("{e}");
                return;
            }
        };
        verbose!(
            "{}: {}x{}",
            self.config.asset,
            image.width(),
            image.height()
        );

        let result = detector.detect(&image);
        self.source = Some(image);
        self.handle_observations(result);
    }

    /// Completion handler for a body-pose request.
    pub fn handle_observations(&mut self, result: Result<Vec<PoseObservation>>) {
        let observations = match result {
            Ok(observations) => observations,
            Err(e) => {
                error!("Unable to perform the request: {e}.");
                return;
            }
        };

        verbose!(
            "{} pose{} detected",
            observations.len(),
            if observations.len() == 1 { "" } else { "s" }
        );
        for observation in &observations {
            self.process_observation(observation);
        }
    }

    /// Draw the torso points of one observation over a fresh copy of the asset.
    ///
    /// Each processed observation replaces whatever was displayed before.
    pub fn process_observation(&mut self, observation: &PoseObservation) {
        let Some(source) = &self.source else {
            return;
        };

        let size = self.config.coordinates.size_for(source);
        let points = match torso_image_points(observation, size) {
            Ok(points) => points,
            Err(e) => {
                verbose!("Skipping observation: {e}");
                return;
            }
        };

        let mut overlay = Overlay::from_points(points.clone());
        if self.config.outline && points.len() > 1 {
            overlay = overlay.with_closed_path(points);
        }
        self.displayed = DisplayedImage::Composited(draw(source, &overlay, &self.config.style));
    }

    /// The displayed image.
    #[must_use]
    pub const fn displayed(&self) -> &DisplayedImage {
        &self.displayed
    }

    /// Whether a composited image replaced the placeholder.
    #[must_use]
    pub const fn is_composited(&self) -> bool {
        matches!(self.displayed, DisplayedImage::Composited(_))
    }

    /// The loaded asset, if loading succeeded.
    #[must_use]
    pub const fn source(&self) -> Option<&DynamicImage> {
        self.source.as_ref()
    }

    /// Image to present: the composited overlay, or the unmodified asset while the
    /// placeholder is showing. `None` if the asset could not be loaded.
    #[must_use]
    pub fn frame(&self) -> Option<DynamicImage> {
        match &self.displayed {
            DisplayedImage::Composited(image) => Some(DynamicImage::ImageRgba8(image.clone())),
            DisplayedImage::Placeholder => self.source.clone(),
        }
    }

    /// View configuration.
    #[must_use]
    pub const fn config(&self) -> &OverlayConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OverlayError;
    use crate::joint::{JointName, RecognizedPoint};
    use image::{Rgb, RgbImage};

    struct Scripted(Option<Result<Vec<PoseObservation>>>);

    impl PoseDetector for Scripted {
        fn detect(&mut self, _image: &DynamicImage) -> Result<Vec<PoseObservation>> {
            self.0.take().unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn view_with_asset() -> (tempfile::TempDir, OverlayView) {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(768, 1536, Rgb([0, 0, 0]))
            .save(dir.path().join("image1.png"))
            .unwrap();
        let view = OverlayView::new(OverlayConfig::new().with_assets_dir(dir.path()));
        (dir, view)
    }

    fn neck_at(x: f64, y: f64) -> PoseObservation {
        [(JointName::Neck, RecognizedPoint::new(x, y, 0.9))].into_iter().collect()
    }

    #[test]
    fn test_zero_observations_keep_placeholder() {
        let (_dir, mut view) = view_with_asset();
        view.appear(&mut Scripted(Some(Ok(Vec::new()))));
        assert_eq!(view.displayed(), &DisplayedImage::Placeholder);
        // The unmodified asset is still presented.
        assert_eq!(view.frame().unwrap().to_rgb8(), RgbImage::from_pixel(768, 1536, Rgb([0, 0, 0])));
    }

    #[test]
    fn test_request_failure_keeps_placeholder() {
        let (_dir, mut view) = view_with_asset();
        view.appear(&mut Scripted(Some(Err(OverlayError::RequestError("boom".into())))));
        assert!(!view.is_composited());
    }

    #[test]
    fn test_missing_asset_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = OverlayView::new(OverlayConfig::new().with_assets_dir(dir.path()));
        view.appear(&mut Scripted(Some(Ok(vec![neck_at(0.5, 0.5)]))));
        assert!(!view.is_composited());
        assert!(view.source().is_none());
        assert!(view.frame().is_none());
    }

    #[test]
    fn test_observation_without_torso_is_skipped() {
        let (_dir, mut view) = view_with_asset();
        let face: PoseObservation = [(JointName::Nose, RecognizedPoint::new(0.5, 0.1, 0.9))]
            .into_iter()
            .collect();
        view.appear(&mut Scripted(Some(Ok(vec![face]))));
        assert!(!view.is_composited());
    }

    #[test]
    fn test_marker_drawn_at_fixed_coordinates() {
        let (_dir, mut view) = view_with_asset();
        view.appear(&mut Scripted(Some(Ok(vec![neck_at(0.25, 0.5)]))));

        let DisplayedImage::Composited(image) = view.displayed() else {
            panic!("expected composited image");
        };
        // 0.25 * 768 = 192, 0.5 * 1536 = 768
        assert_eq!(image.get_pixel(192, 768).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(10, 10).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_last_observation_wins() {
        let (_dir, mut view) = view_with_asset();
        view.appear(&mut Scripted(Some(Ok(vec![neck_at(0.25, 0.25), neck_at(0.75, 0.75)]))));

        let DisplayedImage::Composited(image) = view.displayed() else {
            panic!("expected composited image");
        };
        assert_eq!(image.get_pixel(192, 384).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(576, 1152).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_confidence_torso_still_composites_plain_copy() {
        let (_dir, mut view) = view_with_asset();
        let obs: PoseObservation = [(JointName::Root, RecognizedPoint::new(0.5, 0.5, 0.0))]
            .into_iter()
            .collect();
        view.appear(&mut Scripted(Some(Ok(vec![obs]))));

        let DisplayedImage::Composited(image) = view.displayed() else {
            panic!("expected composited image");
        };
        assert!(image.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }
}
