// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use crate::annotate::{DrawStyle, find_next_run_dir};
use crate::cli::args::DetectArgs;
use crate::config::{CoordinateSpace, OverlayConfig};
use crate::detector::{PoseDetector, RecordedDetector};
use crate::error::{OverlayError, Result};
use crate::geometry::ImageSize;
use crate::pipeline::OverlayView;
use crate::{VERSION, error, section, success, verbose, warn};

/// Run the detect command: one pose request, then show and/or save the result.
pub fn run_detect(args: &DetectArgs) {
    println!("pose-overlay {VERSION} 🚀");

    let mut detector = match build_detector(args) {
        Ok(detector) => detector,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let mut view = OverlayView::new(overlay_config(args));
    section!("Detecting pose in '{}'", args.asset);
    view.appear(detector.as_mut());

    if view.is_composited() {
        success!("Torso joints drawn on '{}'", args.asset);
    } else {
        verbose!("No pose overlay; showing the unmodified image");
    }

    let Some(frame) = view.frame() else {
        warn!("Nothing to display: asset '{}' could not be loaded", args.asset);
        return;
    };

    if let Some(path) = save_path(args) {
        match save_frame(&frame, &path) {
            Ok(()) => verbose!("Result saved to {}", path.display()),
            Err(e) => {
                error!("Failed to save result: {e}");
                process::exit(1);
            }
        }
    }

    if args.show {
        show_frame(&frame);
    }
}

/// Map CLI flags onto the overlay configuration.
fn overlay_config(args: &DetectArgs) -> OverlayConfig {
    let coordinates = if args.use_image_size {
        CoordinateSpace::SourceImage
    } else {
        CoordinateSpace::Fixed(ImageSize::new(args.width, args.height))
    };
    let style = DrawStyle::default()
        .with_fill(args.fill)
        .with_stroke(args.stroke)
        .with_radius(args.radius)
        .with_line_width(args.line_width);

    OverlayConfig::new()
        .with_asset(args.asset.clone())
        .with_assets_dir(&args.assets_dir)
        .with_coordinates(coordinates)
        .with_style(style)
        .with_outline(args.outline)
}

/// Recorded observations if given, otherwise the ONNX pose model.
fn build_detector(args: &DetectArgs) -> Result<Box<dyn PoseDetector>> {
    if let Some(path) = &args.observations {
        verbose!("Replaying observations from {}", path.display());
        return Ok(Box::new(RecordedDetector::load(path)?));
    }
    build_model(args)
}

#[cfg(feature = "onnx")]
fn build_model(args: &DetectArgs) -> Result<Box<dyn PoseDetector>> {
    use crate::InferenceConfig;
    use crate::download::DEFAULT_POSE_MODEL;
    use crate::model::PoseModel;

    let model_path = args.model.clone().unwrap_or_else(|| {
        if args.verbose {
            warn!("'model' argument is missing. Using default '--model={DEFAULT_POSE_MODEL}'.");
        }
        DEFAULT_POSE_MODEL.to_string()
    });

    let mut config = InferenceConfig::new()
        .with_confidence(args.conf)
        .with_iou(args.iou)
        .with_keypoint_threshold(args.kpt_conf);
    if let Some(sz) = args.imgsz {
        config = config.with_imgsz(sz, sz);
    }

    Ok(Box::new(PoseModel::load_with_config(model_path, config)?))
}

#[cfg(not(feature = "onnx"))]
fn build_model(_args: &DetectArgs) -> Result<Box<dyn PoseDetector>> {
    Err(OverlayError::FeatureNotEnabled(
        "running a pose model requires the 'onnx' feature; use --observations or compile with --features onnx"
            .to_string(),
    ))
}

/// Explicit --output, or a fresh run directory for --save.
fn save_path(args: &DetectArgs) -> Option<PathBuf> {
    if let Some(path) = &args.output {
        return Some(path.clone());
    }
    args.save.then(|| {
        Path::new(&find_next_run_dir("runs/pose", "overlay")).join(format!("{}.png", args.asset))
    })
}

fn save_frame(frame: &image::DynamicImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    frame
        .save(path)
        .map_err(|e| OverlayError::ImageError(format!("Failed to write {}: {e}", path.display())))
}

#[cfg(feature = "visualize")]
fn show_frame(frame: &image::DynamicImage) {
    use crate::visualizer::Viewer;

    let shown = Viewer::new("Pose Overlay", frame.width() as usize, frame.height() as usize)
        .and_then(|mut viewer| {
            viewer.update(frame)?;
            viewer.wait_until_closed()
        });
    if let Err(e) = shown {
        error!("{e}");
    }
}

#[cfg(not(feature = "visualize"))]
fn show_frame(_frame: &image::DynamicImage) {
    warn!("--show requires the 'visualize' feature. Compile with --features visualize to enable it.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Cli, Commands};
    use clap::Parser;

    fn detect_args(extra: &[&str]) -> DetectArgs {
        let mut argv = vec!["app", "detect"];
        argv.extend_from_slice(extra);
        let Commands::Detect(args) = Cli::parse_from(argv).command;
        args
    }

    #[test]
    fn test_overlay_config_fixed_size() {
        let config = overlay_config(&detect_args(&["--width", "100", "--height", "50", "--radius", "3"]));
        assert_eq!(config.coordinates, CoordinateSpace::Fixed(ImageSize::new(100, 50)));
        assert_eq!(config.style.radius, 3);
    }

    #[test]
    fn test_overlay_config_image_size() {
        let config = overlay_config(&detect_args(&["--use-image-size", "--outline"]));
        assert_eq!(config.coordinates, CoordinateSpace::SourceImage);
        assert!(config.outline);
    }

    #[test]
    fn test_save_path() {
        assert!(save_path(&detect_args(&[])).is_none());
        assert_eq!(
            save_path(&detect_args(&["--output", "out/x.png"])),
            Some(PathBuf::from("out/x.png"))
        );
        let saved = save_path(&detect_args(&["--save"])).unwrap();
        assert!(saved.ends_with("image1.png"));
        assert!(saved.starts_with("runs/pose"));
    }

    #[test]
    fn test_build_detector_from_recording() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poses.json");
        fs::write(&path, "[]").unwrap();
        let path_str = path.to_string_lossy().to_string();

        let mut detector = build_detector(&detect_args(&["--observations", &path_str])).unwrap();
        assert!(detector.detect(&image::DynamicImage::new_rgb8(1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_save_frame_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("frame.png");
        save_frame(&image::DynamicImage::new_rgb8(2, 2), &path).unwrap();
        assert!(path.exists());
    }
}
