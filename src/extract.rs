// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Joint selection and pixel projection.

use std::collections::HashMap;

use crate::error::Result;
use crate::geometry::{ImageSize, PixelPoint, image_point_for_normalized_point};
use crate::joint::{JointName, JointsGroupName, RecognizedPoint, TORSO_JOINT_NAMES};
use crate::observation::PoseObservation;
use crate::verbose;

/// Project the named joints into pixel space, in the order of `names`.
///
/// Joints that are absent from `points`, whose confidence is not strictly
/// positive, or whose location falls outside the unit square are skipped.
#[must_use]
pub fn image_points(
    points: &HashMap<JointName, RecognizedPoint>,
    names: &[JointName],
    size: ImageSize,
) -> Vec<PixelPoint> {
    names
        .iter()
        .filter_map(|name| {
            let point = points.get(name).filter(|p| p.is_confident())?;
            if !point.location.is_normalized() {
                verbose!("Ignoring {name}: location ({}, {}) is not normalized", point.location.x, point.location.y);
                return None;
            }
            Some(image_point_for_normalized_point(
                point.location,
                size.width,
                size.height,
            ))
        })
        .collect()
}

/// Torso points of `observation` in clockwise order: neck, right shoulder,
/// right hip, root, left hip, left shoulder.
///
/// # Errors
///
/// Fails when the observation holds no torso points at all.
pub fn torso_image_points(observation: &PoseObservation, size: ImageSize) -> Result<Vec<PixelPoint>> {
    let recognized = observation.recognized_points(JointsGroupName::Torso)?;
    Ok(image_points(&recognized, &TORSO_JOINT_NAMES, size))
}
