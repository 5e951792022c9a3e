// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose model inference configuration.
//!
//! This module defines the [`InferenceConfig`] struct, which controls how the ONNX
//! pose backend filters people and keypoints, sizes its input, and uses threads.

/// Configuration for pose model inference.
///
/// It uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use pose_overlay::InferenceConfig;
///
/// let config = InferenceConfig::new()
///     .with_confidence(0.5)
///     .with_iou(0.45)
///     .with_max_detections(10)
///     .with_imgsz(640, 640);
/// ```
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Person confidence threshold (0.0 to 1.0).
    /// People scored lower than this value are discarded.
    pub confidence_threshold: f32,
    /// Intersection over Union (IoU) threshold for Non-Maximum Suppression (NMS).
    pub iou_threshold: f32,
    /// Maximum number of people to return per image.
    pub max_detections: usize,
    /// Keypoints scored below this value are reported with zero confidence,
    /// i.e. as not recognized.
    pub keypoint_threshold: f32,
    /// Explicit input image size (height, width).
    /// If `None`, the model's metadata will be used to determine input size.
    pub imgsz: Option<(usize, usize)>,
    /// Number of intra-op threads for ONNX Runtime.
    /// Setting this to `0` allows ONNX Runtime to choose the optimal number.
    pub num_threads: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.25,
            iou_threshold: 0.45,
            max_detections: 300,
            keypoint_threshold: 0.5,
            imgsz: None,
            num_threads: 0,
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the person confidence threshold.
    #[must_use]
    pub const fn with_confidence(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set the IoU threshold for Non-Maximum Suppression (NMS).
    #[must_use]
    pub const fn with_iou(mut self, threshold: f32) -> Self {
        self.iou_threshold = threshold;
        self
    }

    /// Set the maximum number of people to return.
    #[must_use]
    pub const fn with_max_detections(mut self, max: usize) -> Self {
        self.max_detections = max;
        self
    }

    /// Set the keypoint visibility threshold.
    #[must_use]
    pub const fn with_keypoint_threshold(mut self, threshold: f32) -> Self {
        self.keypoint_threshold = threshold;
        self
    }

    /// Set the input image size.
    ///
    /// # Arguments
    ///
    /// * `height` - The target image height.
    /// * `width` - The target image width.
    #[must_use]
    pub const fn with_imgsz(mut self, height: usize, width: usize) -> Self {
        self.imgsz = Some((height, width));
        self
    }

    /// Set the number of threads for inference.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = threads;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = InferenceConfig::default();
        assert!((config.confidence_threshold - 0.25).abs() < f32::EPSILON);
        assert!((config.iou_threshold - 0.45).abs() < f32::EPSILON);
        assert!((config.keypoint_threshold - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.max_detections, 300);
        assert!(config.imgsz.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = InferenceConfig::new()
            .with_confidence(0.5)
            .with_iou(0.6)
            .with_max_detections(1)
            .with_keypoint_threshold(0.3)
            .with_imgsz(640, 480)
            .with_threads(8);

        assert!((config.confidence_threshold - 0.5).abs() < f32::EPSILON);
        assert!((config.iou_threshold - 0.6).abs() < f32::EPSILON);
        assert!((config.keypoint_threshold - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.max_detections, 1);
        assert_eq!(config.imgsz, Some((640, 480)));
        assert_eq!(config.num_threads, 8);
    }
}
