// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Post-processing for pose model outputs.
//!
//! Decodes raw YOLO pose output into people with COCO keypoints, suppresses
//! duplicates, and maps each person onto named body joints.

#![allow(clippy::cast_precision_loss)]

use ndarray::{Array2, s};

use crate::inference::InferenceConfig;
use crate::joint::{JointName, RecognizedPoint};
use crate::observation::PoseObservation;
use crate::preprocessing::{PreprocessResult, clip_coords, scale_coords, scale_point};
use crate::warn;

/// Standard COCO pose has 17 keypoints, each with (x, y, conf)
pub const NUM_KEYPOINTS: usize = 17;

const KPT_DIM: usize = 3;

/// COCO keypoint order.
pub const COCO_KEYPOINTS: [JointName; NUM_KEYPOINTS] = [
    JointName::Nose,
    JointName::LeftEye,
    JointName::RightEye,
    JointName::LeftEar,
    JointName::RightEar,
    JointName::LeftShoulder,
    JointName::RightShoulder,
    JointName::LeftElbow,
    JointName::RightElbow,
    JointName::LeftWrist,
    JointName::RightWrist,
    JointName::LeftHip,
    JointName::RightHip,
    JointName::LeftKnee,
    JointName::RightKnee,
    JointName::LeftAnkle,
    JointName::RightAnkle,
];

/// One person decoded from the model output, in original image pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonDetection {
    /// Bounding box [x1, y1, x2, y2].
    pub bbox: [f32; 4],
    /// Person confidence.
    pub score: f32,
    /// Keypoints as [x, y, confidence] in COCO order.
    pub keypoints: [[f32; 3]; NUM_KEYPOINTS],
}

/// Decode YOLO pose output.
///
/// YOLO pose models output shape is typically [1, 56, 8400] where:
/// - 56 = 4 (bbox) + 1 (class for person) + 51 (17 keypoints × 3)
/// - 8400 = number of predictions (varies by input size)
///
/// Both [1, features, preds] and [1, preds, features] layouts are accepted.
#[must_use]
pub fn decode_pose(
    output: &[f32],
    output_shape: &[usize],
    preprocess: &PreprocessResult,
    config: &InferenceConfig,
) -> Vec<PersonDetection> {
    let kpt_features = NUM_KEYPOINTS * KPT_DIM;
    let min_features = 4 + 1 + kpt_features;

    let (num_preds, is_transposed) = match *output_shape {
        [_, a, b] | [a, b] => {
            if a == min_features || (a < b && a >= min_features) {
                (b, false) // [features, preds]
            } else {
                (a, true) // [preds, features]
            }
        }
        _ => (0, false),
    };

    if output.is_empty() || num_preds == 0 {
        return Vec::new();
    }

    let actual_features = output.len() / num_preds;
    if actual_features < min_features {
        warn!(
            "Pose model has insufficient features ({actual_features}), expected at least {min_features}"
        );
        return Vec::new();
    }

    let output_2d = if is_transposed {
        Array2::from_shape_vec((num_preds, actual_features), output[..num_preds * actual_features].to_vec())
            .unwrap_or_else(|_| Array2::zeros((0, 0)))
    } else {
        Array2::from_shape_vec((actual_features, num_preds), output[..num_preds * actual_features].to_vec())
            .map(|arr| arr.t().to_owned())
            .unwrap_or_else(|_| Array2::zeros((0, 0)))
    };
    if output_2d.is_empty() {
        return Vec::new();
    }

    let num_classes = actual_features - 4 - kpt_features;
    let (oh, ow) = preprocess.orig_shape;

    let mut candidates = Vec::new();
    for i in 0..num_preds {
        let score = output_2d
            .slice(s![i, 4..4 + num_classes])
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(0.0_f32, f32::max);
        if score < config.confidence_threshold {
            continue;
        }

        let (cx, cy, w, h) = (
            output_2d[[i, 0]],
            output_2d[[i, 1]],
            output_2d[[i, 2]],
            output_2d[[i, 3]],
        );
        let xyxy = [cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0];
        let bbox = clip_coords(&scale_coords(&xyxy, preprocess.scale, preprocess.padding), preprocess.orig_shape);

        let kpt_start = 4 + num_classes;
        let mut keypoints = [[0.0_f32; 3]; NUM_KEYPOINTS];
        for (k, kpt) in keypoints.iter_mut().enumerate() {
            let offset = kpt_start + k * KPT_DIM;
            let (x, y) = scale_point(
                output_2d[[i, offset]],
                output_2d[[i, offset + 1]],
                preprocess.scale,
                preprocess.padding,
            );
            *kpt = [x.clamp(0.0, ow as f32), y.clamp(0.0, oh as f32), output_2d[[i, offset + 2]]];
        }

        candidates.push(PersonDetection { bbox, score, keypoints });
    }

    let boxes: Vec<([f32; 4], f32)> = candidates.iter().map(|c| (c.bbox, c.score)).collect();
    nms(&boxes, config.iou_threshold)
        .into_iter()
        .take(config.max_detections)
        .map(|idx| candidates[idx].clone())
        .collect()
}

/// Map a decoded person onto named joints in normalized coordinates.
///
/// Keypoints scored below `keypoint_threshold` are reported with zero confidence.
/// `neck` is the shoulder midpoint and `root` the hip midpoint; each takes the
/// lower confidence of its two sources.
#[must_use]
pub fn to_observation(person: &PersonDetection, orig_shape: (u32, u32), keypoint_threshold: f32) -> PoseObservation {
    let (oh, ow) = (orig_shape.0.max(1) as f64, orig_shape.1.max(1) as f64);

    let normalize = |[x, y, conf]: [f32; 3]| {
        let confidence = if conf >= keypoint_threshold { conf } else { 0.0 };
        RecognizedPoint::new(
            (f64::from(x) / ow).clamp(0.0, 1.0),
            (f64::from(y) / oh).clamp(0.0, 1.0),
            confidence,
        )
    };

    let mut points: std::collections::HashMap<JointName, RecognizedPoint> = COCO_KEYPOINTS
        .iter()
        .zip(person.keypoints)
        .map(|(joint, kpt)| (*joint, normalize(kpt)))
        .collect();

    let midpoint = |a: JointName, b: JointName| {
        let (pa, pb) = (points[&a], points[&b]);
        RecognizedPoint::new(
            (pa.location.x + pb.location.x) / 2.0,
            (pa.location.y + pb.location.y) / 2.0,
            pa.confidence.min(pb.confidence),
        )
    };
    let neck = midpoint(JointName::LeftShoulder, JointName::RightShoulder);
    let root = midpoint(JointName::LeftHip, JointName::RightHip);
    points.insert(JointName::Neck, neck);
    points.insert(JointName::Root, root);

    PoseObservation::new(points, person.score)
}

/// Calculate `IoU` (Intersection over Union) between two boxes [x1, y1, x2, y2].
#[must_use]
pub fn calculate_iou(box1: &[f32; 4], box2: &[f32; 4]) -> f32 {
    let x1 = box1[0].max(box2[0]);
    let y1 = box1[1].max(box2[1]);
    let x2 = box1[2].min(box2[2]);
    let y2 = box1[3].min(box2[3]);

    let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);

    let area1 = (box1[2] - box1[0]) * (box1[3] - box1[1]);
    let area2 = (box2[2] - box2[0]) * (box2[3] - box2[1]);
    let union = area1 + area2 - intersection;

    if union > 0.0 { intersection / union } else { 0.0 }
}

/// Greedy Non-Maximum Suppression; returns kept indices by descending score.
#[must_use]
pub fn nms(boxes: &[([f32; 4], f32)], iou_threshold: f32) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..boxes.len()).collect();
    indices.sort_by(|&a, &b| boxes[b].1.total_cmp(&boxes[a].1));

    let mut keep = Vec::new();
    let mut suppressed = vec![false; boxes.len()];

    for &i in &indices {
        if suppressed[i] {
            continue;
        }
        keep.push(i);
        for &j in &indices {
            if !suppressed[j] && i != j && calculate_iou(&boxes[i].0, &boxes[j].0) > iou_threshold {
                suppressed[j] = true;
            }
        }
    }

    keep
}
