// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Detected body poses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};
use crate::joint::{JointName, JointsGroupName, RecognizedPoint};

/// One body pose detected in one image.
///
/// Holds the recognized point of every joint the detector reported, keyed by
/// joint name, plus the detector's overall confidence in the pose.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseObservation {
    /// Recognized points keyed by joint name.
    pub points: HashMap<JointName, RecognizedPoint>,
    /// Overall confidence of the pose.
    #[serde(default)]
    pub confidence: f32,
}

impl PoseObservation {
    /// Create an observation from recognized points.
    #[must_use]
    pub fn new(points: HashMap<JointName, RecognizedPoint>, confidence: f32) -> Self {
        Self { points, confidence }
    }

    /// Look up a single joint.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::MissingPoints`] if the joint was not reported.
    pub fn recognized_point(&self, joint: JointName) -> Result<RecognizedPoint> {
        self.points
            .get(&joint)
            .copied()
            .ok_or_else(|| OverlayError::MissingPoints(format!("no point for joint '{joint}'")))
    }

    /// Recognized points belonging to `group`.
    ///
    /// Joints of the group the detector did not report are left out of the map.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::MissingPoints`] if the observation holds no point of
    /// the group at all.
    pub fn recognized_points(
        &self,
        group: JointsGroupName,
    ) -> Result<HashMap<JointName, RecognizedPoint>> {
        let points: HashMap<_, _> = self
            .points
            .iter()
            .filter(|(joint, _)| group.contains(**joint))
            .map(|(joint, point)| (*joint, *point))
            .collect();

        if points.is_empty() {
            return Err(OverlayError::MissingPoints(format!(
                "no recognized points in group '{group}'"
            )));
        }
        Ok(points)
    }

    /// Joint names present in this observation, sorted head to feet.
    #[must_use]
    pub fn available_joint_names(&self) -> Vec<JointName> {
        let mut names: Vec<JointName> = self.points.keys().copied().collect();
        names.sort();
        names
    }

    /// Number of recognized points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the observation holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(JointName, RecognizedPoint)> for PoseObservation {
    fn from_iter<I: IntoIterator<Item = (JointName, RecognizedPoint)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect(), 1.0)
    }
}
