// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! The body-pose request seam.
//!
//! A [`PoseDetector`] takes a decoded image and returns zero or more
//! [`PoseObservation`]s. How the poses are found is up to the implementation;
//! the overlay pipeline treats every detector as a black box.

use std::fs;
use std::path::Path;

use image::DynamicImage;
use serde::Deserialize;

use crate::error::{OverlayError, Result};
use crate::observation::PoseObservation;

/// Human body pose request.
pub trait PoseDetector {
    /// Detect body poses in `image`.
    ///
    /// An empty vector means no person was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be performed.
    fn detect(&mut self, image: &DynamicImage) -> Result<Vec<PoseObservation>>;
}

impl<D: PoseDetector + ?Sized> PoseDetector for Box<D> {
    fn detect(&mut self, image: &DynamicImage) -> Result<Vec<PoseObservation>> {
        (**self).detect(image)
    }
}

/// Replays observations recorded in a JSON file.
///
/// The file holds either a list of observations or an object with an
/// `observations` list. Every request returns the same observations.
#[derive(Debug, Clone, Default)]
pub struct RecordedDetector {
    observations: Vec<PoseObservation>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordedFile {
    List(Vec<PoseObservation>),
    Wrapped { observations: Vec<PoseObservation> },
}

impl RecordedDetector {
    /// Replay `observations` on every request.
    #[must_use]
    pub fn new(observations: Vec<PoseObservation>) -> Self {
        Self { observations }
    }

    /// Parse recorded observations from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::ObservationFormat`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        let observations = match serde_json::from_str::<RecordedFile>(json)? {
            RecordedFile::List(observations) | RecordedFile::Wrapped { observations } => observations,
        };
        Ok(Self::new(observations))
    }

    /// Load recorded observations from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            OverlayError::ObservationFormat(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Recorded observations.
    #[must_use]
    pub fn observations(&self) -> &[PoseObservation] {
        &self.observations
    }
}

impl PoseDetector for RecordedDetector {
    fn detect(&mut self, _image: &DynamicImage) -> Result<Vec<PoseObservation>> {
        Ok(self.observations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::JointName;

    const RECORDED: &str = r#"[
        {
            "points": {
                "neck": { "location": { "x": 0.5, "y": 0.2 }, "confidence": 0.9 },
                "root": { "location": { "x": 0.5, "y": 0.55 }, "confidence": 0.0 }
            },
            "confidence": 0.8
        }
    ]"#;

    #[test]
    fn test_from_json_list() {
        let mut detector = RecordedDetector::from_json(RECORDED).unwrap();
        let observations = detector.detect(&DynamicImage::new_rgb8(1, 1)).unwrap();
        assert_eq!(observations.len(), 1);
        assert!(observations[0].points.contains_key(&JointName::Root));
    }

    #[test]
    fn test_from_json_wrapped() {
        let json = format!(r#"{{ "observations": {RECORDED} }}"#);
        let detector = RecordedDetector::from_json(&json).unwrap();
        assert_eq!(detector.observations().len(), 1);
    }

    #[test]
    fn test_from_json_empty_list() {
        let mut detector = RecordedDetector::from_json("[]").unwrap();
        assert!(detector.detect(&DynamicImage::new_rgb8(1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_from_json_unknown_joint() {
        let json = r#"[{ "points": { "tail": { "location": { "x": 0.1, "y": 0.1 }, "confidence": 1.0 } } }]"#;
        assert!(matches!(
            RecordedDetector::from_json(json),
            Err(OverlayError::ObservationFormat(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(RecordedDetector::load("does-not-exist.json").is_err());
    }

    #[test]
    fn test_boxed_detector() {
        let mut boxed: Box<dyn PoseDetector> = Box::new(RecordedDetector::from_json(RECORDED).unwrap());
        assert_eq!(boxed.detect(&DynamicImage::new_rgb8(1, 1)).unwrap().len(), 1);
    }
}
