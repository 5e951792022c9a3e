// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Integration tests for the overlay pipeline

use image::{DynamicImage, Rgb, RgbImage, Rgba};
use pose_overlay::{
    DisplayedImage, DrawStyle, ImageSize, JointName, Overlay, OverlayConfig, OverlayView, PixelPoint,
    PoseDetector, PoseObservation, RecognizedPoint, RecordedDetector, Result, TORSO_JOINT_NAMES,
    annotate, torso_image_points,
};
use pose_overlay::visualizer::Color;

const GRAY: Rgb<u8> = Rgb([90, 90, 90]);

fn asset_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    RgbImage::from_pixel(768, 1536, GRAY)
        .save(dir.path().join("image1.png"))
        .unwrap();
    dir
}

/// Full torso, listed in reverse of the clockwise order.
fn torso_observation() -> PoseObservation {
    [
        (JointName::LeftShoulder, RecognizedPoint::new(0.625, 0.25, 0.9)),
        (JointName::LeftHip, RecognizedPoint::new(0.625, 0.5, 0.8)),
        (JointName::Root, RecognizedPoint::new(0.5, 0.5, 0.7)),
        (JointName::RightHip, RecognizedPoint::new(0.375, 0.5, 0.8)),
        (JointName::RightShoulder, RecognizedPoint::new(0.375, 0.25, 0.9)),
        (JointName::Neck, RecognizedPoint::new(0.5, 0.125, 0.0)),
        (JointName::Nose, RecognizedPoint::new(0.5, 0.05, 0.9)),
    ]
    .into_iter()
    .collect()
}

struct CountingDetector {
    calls: usize,
    observations: Vec<PoseObservation>,
}

impl PoseDetector for CountingDetector {
    fn detect(&mut self, _image: &DynamicImage) -> Result<Vec<PoseObservation>> {
        self.calls += 1;
        Ok(self.observations.clone())
    }
}

#[test]
fn test_torso_projection_order_and_filtering() {
    let points = torso_image_points(&torso_observation(), ImageSize::BUNDLED_ASSET).unwrap();

    // Neck has zero confidence and is dropped; the rest follow clockwise order.
    assert_eq!(
        points,
        vec![
            PixelPoint::new(0.375 * 768.0, 0.25 * 1536.0),
            PixelPoint::new(0.375 * 768.0, 0.5 * 1536.0),
            PixelPoint::new(0.5 * 768.0, 0.5 * 1536.0),
            PixelPoint::new(0.625 * 768.0, 0.5 * 1536.0),
            PixelPoint::new(0.625 * 768.0, 0.25 * 1536.0),
        ]
    );
    assert_eq!(TORSO_JOINT_NAMES[0], JointName::Neck);
}

#[test]
fn test_pipeline_draws_markers_on_asset() {
    let dir = asset_dir();
    let mut view = OverlayView::new(OverlayConfig::new().with_assets_dir(dir.path()));
    let mut detector = CountingDetector {
        calls: 0,
        observations: vec![torso_observation()],
    };

    view.appear(&mut detector);
    assert_eq!(detector.calls, 1);

    let DisplayedImage::Composited(image) = view.displayed() else {
        panic!("expected composited image");
    };
    assert_eq!(image.dimensions(), (768, 1536));

    let white = Rgba([255, 255, 255, 255]);
    let gray = Rgba([90, 90, 90, 255]);
    // Right shoulder at (288, 384), root at (384, 768)
    assert_eq!(*image.get_pixel(288, 384), white);
    assert_eq!(*image.get_pixel(384, 768), white);
    // Neck at (384, 192) had zero confidence
    assert_eq!(*image.get_pixel(384, 192), gray);
}

#[test]
fn test_pipeline_matches_direct_draw() {
    let dir = asset_dir();
    let mut view = OverlayView::new(OverlayConfig::new().with_assets_dir(dir.path()));
    view.appear(&mut RecordedDetector::new(vec![torso_observation()]));

    let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(768, 1536, GRAY));
    let points = torso_image_points(&torso_observation(), ImageSize::BUNDLED_ASSET).unwrap();
    let expected = annotate::draw(&source, &Overlay::from_points(points), &DrawStyle::default());

    assert_eq!(view.displayed(), &DisplayedImage::Composited(expected));
}

#[test]
fn test_no_observations_keeps_placeholder() {
    let dir = asset_dir();
    let mut view = OverlayView::new(OverlayConfig::new().with_assets_dir(dir.path()));
    view.appear(&mut RecordedDetector::default());

    assert_eq!(view.displayed(), &DisplayedImage::Placeholder);
    assert_eq!(
        view.frame().unwrap().to_rgb8(),
        RgbImage::from_pixel(768, 1536, GRAY)
    );
}

#[test]
fn test_appearing_twice_is_deterministic() {
    let dir = asset_dir();
    let config = OverlayConfig::new().with_assets_dir(dir.path()).with_outline(true);
    let mut view = OverlayView::new(config);
    let mut detector = CountingDetector {
        calls: 0,
        observations: vec![torso_observation()],
    };

    let first = view.appear(&mut detector).clone();
    let second = view.appear(&mut detector).clone();
    assert_eq!(detector.calls, 2);
    assert_eq!(first, second);
}

#[test]
fn test_recorded_json_end_to_end() {
    let dir = asset_dir();
    let json = r#"[
        { "points": { "root": { "location": { "x": 0.5, "y": 0.5 }, "confidence": 0.6 } }, "confidence": 0.6 }
    ]"#;
    let recording = dir.path().join("poses.json");
    std::fs::write(&recording, json).unwrap();

    let mut detector = RecordedDetector::load(&recording).unwrap();
    let mut view = OverlayView::new(OverlayConfig::new().with_assets_dir(dir.path()));
    view.appear(&mut detector);

    let frame = view.frame().unwrap().to_rgba8();
    assert_eq!(*frame.get_pixel(384, 768), Rgba([255, 255, 255, 255]));
}

#[test]
fn test_recording_with_out_of_range_location_does_not_crash() {
    let dir = asset_dir();
    let json = r#"[
        { "points": {
            "neck": { "location": { "x": 0.5, "y": 2000000.0 }, "confidence": 0.9 },
            "root": { "location": { "x": 0.5, "y": 0.5 }, "confidence": 0.9 }
        } }
    ]"#;
    let recording = dir.path().join("poses.json");
    std::fs::write(&recording, json).unwrap();

    let mut detector = RecordedDetector::load(&recording).unwrap();
    let mut view = OverlayView::new(OverlayConfig::new().with_assets_dir(dir.path()).with_outline(true));
    view.appear(&mut detector);

    let frame = view.frame().unwrap().to_rgba8();
    assert_eq!(*frame.get_pixel(384, 768), Rgba([255, 255, 255, 255]));
    assert_eq!(*frame.get_pixel(384, 1535), Rgba([90, 90, 90, 255]));
}

#[test]
fn test_outline_strokes_torso_edges() {
    let mut observation = torso_observation();
    observation
        .points
        .insert(JointName::Neck, RecognizedPoint::new(0.5, 0.125, 0.9));
    let blue = Color::BLUE.to_rgba();

    // Neck (384, 192) to right shoulder (288, 384) crosses row 288 at x = 336.
    let edge_hit = |outline: bool| {
        let dir = asset_dir();
        let config = OverlayConfig::new().with_assets_dir(dir.path()).with_outline(outline);
        let mut view = OverlayView::new(config);
        view.appear(&mut RecordedDetector::new(vec![observation.clone()]));
        let DisplayedImage::Composited(image) = view.displayed() else {
            panic!("expected composited image");
        };
        (332..=340).any(|x| *image.get_pixel(x, 288) == blue)
    };

    assert!(edge_hit(true));
    assert!(!edge_hit(false));
}

#[test]
fn test_bundled_asset_with_bundled_recording() {
    let assets = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let mut detector = RecordedDetector::load(assets.join("image1.json")).unwrap();
    let mut view = OverlayView::new(OverlayConfig::new().with_assets_dir(&assets));
    view.appear(&mut detector);

    let DisplayedImage::Composited(image) = view.displayed() else {
        panic!("expected composited image");
    };
    assert_eq!(image.dimensions(), (768, 1536));
    // Root marker at (384, 799)
    assert_eq!(*image.get_pixel(384, 799), Rgba([255, 255, 255, 255]));
}
