// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the overlay library.

use std::fmt;

/// Result type alias for overlay operations.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Main error type for the overlay library.
#[derive(Debug)]
pub enum OverlayError {
    /// A bundled image asset could not be found.
    AssetNotFound(String),
    /// Error decoding or encoding images.
    ImageError(String),
    /// The pose request could not be performed.
    RequestError(String),
    /// Error loading the pose model.
    ModelLoadError(String),
    /// An observation holds no point for the requested joint or group.
    MissingPoints(String),
    /// Recorded observations could not be parsed.
    ObservationFormat(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// Wrapped `std::io::Error`.
    Io(std::io::Error),
    /// Visualizer error.
    VisualizerError(String),
    /// Feature not enabled.
    FeatureNotEnabled(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetNotFound(name) => write!(f, "Asset not found: {name}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::RequestError(msg) => write!(f, "Request error: {msg}"),
            Self::ModelLoadError(msg) => write!(f, "Model load error: {msg}"),
            Self::MissingPoints(msg) => write!(f, "Missing points: {msg}"),
            Self::ObservationFormat(msg) => write!(f, "Observation format error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::VisualizerError(msg) => write!(f, "Visualizer error: {msg}"),
            Self::FeatureNotEnabled(msg) => write!(f, "Feature not enabled: {msg}"),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OverlayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for OverlayError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> Self {
        Self::ObservationFormat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OverlayError::AssetNotFound("image1".to_string());
        assert_eq!(err.to_string(), "Asset not found: image1");

        let err = OverlayError::RequestError("test".to_string());
        assert_eq!(err.to_string(), "Request error: test");
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;

        let err = OverlayError::from(std::io::Error::other("boom"));
        assert!(err.source().is_some());
        assert!(OverlayError::MissingPoints("torso".into()).source().is_none());
    }
}
