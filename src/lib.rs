// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Pose Overlay
//!
//! Detect a human body pose in a still image and mark the torso joints on a copy
//! of it.
//!
//! The pipeline is a single pass:
//!
//! 1. load a bundled image asset by name,
//! 2. submit it to a [`PoseDetector`],
//! 3. take the six torso joints of each observation in clockwise order (neck, right
//!    shoulder, right hip, root, left hip, left shoulder), dropping joints with
//!    non-positive confidence,
//! 4. project their normalized locations into pixels (768×1536 by default),
//! 5. draw a white, blue-outlined circle at each one on a fresh copy of the image.
//!
//! If anything fails along the way the view keeps showing its placeholder.
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use pose_overlay::{OverlayConfig, OverlayView, RecordedDetector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut detector = RecordedDetector::load("poses.json")?;
//!     let mut view = OverlayView::new(OverlayConfig::new().with_assets_dir("assets"));
//!
//!     view.appear(&mut detector);
//!     if let Some(frame) = view.frame() {
//!         frame.save("overlay.png")?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! With the default `onnx` feature, [`PoseModel`] runs a YOLO pose model through
//! ONNX Runtime and can be used in place of the recorded detector:
//!
//! ```no_run
//! # #[cfg(feature = "onnx")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pose_overlay::{OverlayConfig, OverlayView, PoseModel};
//!
//! let mut model = PoseModel::load("yolo11n-pose.onnx")?;
//! let mut view = OverlayView::new(OverlayConfig::default());
//! view.appear(&mut model);
//! println!("composited: {}", view.is_composited());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "onnx"))]
//! # fn main() {}
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Run on assets/image1.png with the stock pose model
//! pose-overlay detect
//!
//! # Replay recorded observations and save the result
//! pose-overlay detect --observations poses.json --output overlay.png
//!
//! # Project into the image's own size and outline the torso
//! pose-overlay detect --asset photo --use-image-size --outline --show
//! ```
//!
//! ## Recorded observations
//!
//! [`RecordedDetector`] reads JSON in the shape of [`PoseObservation`]:
//!
//! ```json
//! [
//!   {
//!     "points": {
//!       "neck": { "location": { "x": 0.5, "y": 0.21 }, "confidence": 0.92 },
//!       "root": { "location": { "x": 0.5, "y": 0.55 }, "confidence": 0.88 }
//!     },
//!     "confidence": 0.9
//!   }
//! ]
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `onnx` | ONNX Runtime pose backend and stock model download (default) |
//! | `visualize` | Window display with `--show` |

// Modules
pub mod annotate;
pub mod assets;
pub mod cli;
pub mod config;
pub mod detector;
#[cfg(feature = "onnx")]
pub mod download;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod inference;
pub mod joint;
#[cfg(feature = "onnx")]
pub mod model;
pub mod observation;
pub mod pipeline;
pub mod postprocessing;
pub mod preprocessing;
pub mod visualizer;

// Re-export main types for convenience
pub use annotate::{DrawStyle, Overlay};
pub use assets::AssetCatalog;
pub use config::{CoordinateSpace, OverlayConfig};
pub use detector::{PoseDetector, RecordedDetector};
pub use error::{OverlayError, Result};
pub use extract::{image_points, torso_image_points};
pub use geometry::{ImageSize, PixelPoint, image_point_for_normalized_point};
pub use inference::InferenceConfig;
pub use joint::{JointName, JointsGroupName, NormalizedPoint, RecognizedPoint, TORSO_JOINT_NAMES};
#[cfg(feature = "onnx")]
pub use model::PoseModel;
pub use observation::PoseObservation;
pub use pipeline::{DisplayedImage, OverlayView};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pose-overlay");
    }
}
