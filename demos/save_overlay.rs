// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Example script demonstrating how to overlay torso joints from the library.
//!
//! This example covers:
//! 1. Replaying a recorded pose against `assets/image1.png`.
//! 2. Running the ONNX pose model on the same asset (with the `onnx` feature).

use std::path::Path;

use pose_overlay::{
    JointName, OverlayConfig, OverlayView, PoseObservation, RecognizedPoint, RecordedDetector,
    Result,
};

fn main() -> Result<()> {
    let config = OverlayConfig::new().with_assets_dir("assets").with_outline(true);
    if !Path::new("assets").exists() {
        println!("Skipping: 'assets/' not found. Put a 768x1536 image1.png there first.");
        return Ok(());
    }

    // 1. Recorded pose
    let observation: PoseObservation = [
        (JointName::Neck, RecognizedPoint::new(0.50, 0.20, 0.9)),
        (JointName::RightShoulder, RecognizedPoint::new(0.38, 0.24, 0.9)),
        (JointName::RightHip, RecognizedPoint::new(0.42, 0.52, 0.8)),
        (JointName::Root, RecognizedPoint::new(0.50, 0.52, 0.8)),
        (JointName::LeftHip, RecognizedPoint::new(0.58, 0.52, 0.8)),
        (JointName::LeftShoulder, RecognizedPoint::new(0.62, 0.24, 0.9)),
    ]
    .into_iter()
    .collect();

    let mut view = OverlayView::new(config.clone());
    view.appear(&mut RecordedDetector::new(vec![observation]));
    if let Some(frame) = view.frame() {
        frame.save("overlay_recorded.png")?;
        println!("Saved overlay_recorded.png (composited: {})", view.is_composited());
    }

    // 2. Pose model
    #[cfg(feature = "onnx")]
    {
        let mut model = pose_overlay::PoseModel::load("yolo11n-pose.onnx")?;
        let mut view = OverlayView::new(config);
        view.appear(&mut model);
        if let Some(frame) = view.frame() {
            frame.save("overlay_model.png")?;
            println!("Saved overlay_model.png (composited: {})", view.is_composited());
        }
    }

    Ok(())
}
