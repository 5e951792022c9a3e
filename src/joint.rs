// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Joint vocabulary for human body poses.
//!
//! A body pose is described by named anatomical landmarks ([`JointName`]) grouped
//! into body regions ([`JointsGroupName`]). Detectors report each landmark as a
//! [`RecognizedPoint`]: a normalized location plus a confidence score.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// Named landmark of a human body pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    Neck,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    Root,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl JointName {
    /// Every joint, head to feet.
    pub const ALL: [Self; 19] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::Neck,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::Root,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// Stable identifier, e.g. `"right_shoulder"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::Neck => "neck",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::Root => "root",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }
}

impl fmt::Display for JointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JointName {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|joint| joint.as_str() == normalized)
            .ok_or_else(|| OverlayError::ObservationFormat(format!("Unknown joint name: {s}")))
    }
}

/// Torso joint names in a clockwise ordering.
pub const TORSO_JOINT_NAMES: [JointName; 6] = [
    JointName::Neck,
    JointName::RightShoulder,
    JointName::RightHip,
    JointName::Root,
    JointName::LeftHip,
    JointName::LeftShoulder,
];

/// Body region used to query a subset of recognized points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointsGroupName {
    Face,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    All,
}

impl JointsGroupName {
    /// Joints that belong to this group.
    #[must_use]
    pub const fn joints(self) -> &'static [JointName] {
        use JointName::*;
        match self {
            Self::Face => &[Nose, LeftEye, RightEye, LeftEar, RightEar],
            Self::Torso => &[Neck, LeftShoulder, RightShoulder, Root, LeftHip, RightHip],
            Self::LeftArm => &[LeftShoulder, LeftElbow, LeftWrist],
            Self::RightArm => &[RightShoulder, RightElbow, RightWrist],
            Self::LeftLeg => &[LeftHip, LeftKnee, LeftAnkle],
            Self::RightLeg => &[RightHip, RightKnee, RightAnkle],
            Self::All => &JointName::ALL,
        }
    }

    /// Whether `joint` belongs to this group.
    #[must_use]
    pub fn contains(self, joint: JointName) -> bool {
        self.joints().contains(&joint)
    }
}

impl fmt::Display for JointsGroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Face => "face",
            Self::Torso => "torso",
            Self::LeftArm => "left_arm",
            Self::RightArm => "right_arm",
            Self::LeftLeg => "left_leg",
            Self::RightLeg => "right_leg",
            Self::All => "all",
        };
        f.write_str(name)
    }
}

/// Location expressed as fractions of image width and height.
///
/// The origin is the top-left corner; `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite and within `[0, 1]`.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// A joint location reported by a detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecognizedPoint {
    pub location: NormalizedPoint,
    pub confidence: f32,
}

impl RecognizedPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64, confidence: f32) -> Self {
        Self {
            location: NormalizedPoint::new(x, y),
            confidence,
        }
    }

    /// Only points with a strictly positive confidence are usable.
    #[must_use]
    pub fn is_confident(&self) -> bool {
        self.confidence > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_torso_order_is_clockwise() {
        assert_eq!(
            TORSO_JOINT_NAMES,
            [
                JointName::Neck,
                JointName::RightShoulder,
                JointName::RightHip,
                JointName::Root,
                JointName::LeftHip,
                JointName::LeftShoulder,
            ]
        );
    }

    #[test]
    fn test_torso_names_are_torso_group() {
        for joint in TORSO_JOINT_NAMES {
            assert!(JointsGroupName::Torso.contains(joint), "{joint} not in torso");
        }
        assert_eq!(JointsGroupName::Torso.joints().len(), TORSO_JOINT_NAMES.len());
        assert!(!JointsGroupName::Torso.contains(JointName::Nose));
    }

    #[test]
    fn test_joint_name_parse() {
        assert_eq!("neck".parse::<JointName>().unwrap(), JointName::Neck);
        assert_eq!(
            "Right-Shoulder".parse::<JointName>().unwrap(),
            JointName::RightShoulder
        );
        assert!("tail".parse::<JointName>().is_err());
    }

    #[test]
    fn test_joint_name_serde_matches_display() {
        let json = serde_json::to_string(&JointName::LeftHip).unwrap();
        assert_eq!(json, "\"left_hip\"");
        assert_eq!(JointName::LeftHip.to_string(), "left_hip");
    }

    #[test]
    fn test_confidence_must_be_positive() {
        assert!(RecognizedPoint::new(0.5, 0.5, 0.1).is_confident());
        assert!(!RecognizedPoint::new(0.5, 0.5, 0.0).is_confident());
        assert!(!RecognizedPoint::new(0.5, 0.5, -1.0).is_confident());
    }
}
