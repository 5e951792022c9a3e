// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! ONNX pose model backend.
//!
//! This module provides [`PoseModel`], a [`PoseDetector`] that runs a YOLO pose
//! model through ONNX Runtime and reports each detected person as a
//! [`PoseObservation`].

use std::path::{Path, PathBuf};

use image::DynamicImage;
use ndarray::Array4;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;

use crate::detector::PoseDetector;
use crate::download::try_download_model;
use crate::error::{OverlayError, Result};
use crate::inference::InferenceConfig;
use crate::observation::PoseObservation;
use crate::postprocessing::{decode_pose, to_observation};
use crate::preprocessing::preprocess_image;
use crate::verbose;

/// Input size used when the model carries no `imgsz` metadata.
const DEFAULT_IMGSZ: (usize, usize) = (640, 640);

/// YOLO pose model executed with ONNX Runtime.
///
/// # Example
///
/// ```no_run
/// use pose_overlay::{PoseDetector, PoseModel};
///
/// let mut model = PoseModel::load("yolo11n-pose.onnx")?;
/// let image = image::open("person.jpg")?;
/// let observations = model.detect(&image)?;
/// println!("Found {} poses", observations.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PoseModel {
    session: Session,
    input_name: String,
    output_name: String,
    imgsz: (usize, usize),
    config: InferenceConfig,
    path: PathBuf,
}

impl PoseModel {
    /// Load a pose model from an ONNX file with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the model file doesn't exist or can't be loaded.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_config(path, InferenceConfig::default())
    }

    /// Load a pose model with custom configuration.
    ///
    /// The stock `yolo11n-pose.onnx` is downloaded if it is not found locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the model file doesn't exist and can't be downloaded,
    /// or if ONNX Runtime rejects it.
    pub fn load_with_config<P: AsRef<Path>>(path: P, config: InferenceConfig) -> Result<Self> {
        let mut path = path.as_ref().to_path_buf();
        if !path.exists() {
            path = try_download_model(&path)?;
        }

        let session = Session::builder()
            .map_err(|e| OverlayError::ModelLoadError(format!("Failed to create session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| OverlayError::ModelLoadError(format!("Failed to set optimization level: {e}")))?
            .with_intra_threads(config.num_threads)
            .map_err(|e| OverlayError::ModelLoadError(format!("Failed to set intra-thread count: {e}")))?
            .commit_from_file(&path)
            .map_err(|e| OverlayError::ModelLoadError(format!("Failed to load model: {e}")))?;

        let input_name = session
            .inputs
            .first()
            .map_or_else(|| "images".to_string(), |i| i.name.clone());
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| OverlayError::ModelLoadError("Model has no outputs".to_string()))?;

        let metadata_imgsz = session
            .metadata()
            .ok()
            .and_then(|m| m.custom("imgsz").ok().flatten())
            .and_then(|value| parse_imgsz(&value));
        let imgsz = config.imgsz.or(metadata_imgsz).unwrap_or(DEFAULT_IMGSZ);

        verbose!("Loaded {} (imgsz={}x{})", path.display(), imgsz.0, imgsz.1);

        Ok(Self {
            session,
            input_name,
            output_name,
            imgsz,
            config,
            path,
        })
    }

    /// Model input size (height, width).
    #[must_use]
    pub const fn imgsz(&self) -> (usize, usize) {
        self.imgsz
    }

    /// Path the model was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inference configuration.
    #[must_use]
    pub const fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Run the ONNX session on an NCHW tensor.
    fn run_inference(&mut self, input: &Array4<f32>) -> Result<(Vec<f32>, Vec<usize>)> {
        let input_contiguous = input.as_standard_layout();
        let input_tensor = TensorRef::from_array_view(&input_contiguous)
            .map_err(|e| OverlayError::RequestError(format!("Failed to create input tensor: {e}")))?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| OverlayError::RequestError(format!("Inference failed: {e}")))?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            OverlayError::RequestError(format!("Output '{}' not found", self.output_name))
        })?;

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| OverlayError::RequestError(format!("Failed to extract output: {e}")))?;

        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let shape_vec: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        Ok((data.to_vec(), shape_vec))
    }
}

impl PoseDetector for PoseModel {
    fn detect(&mut self, image: &DynamicImage) -> Result<Vec<PoseObservation>> {
        let preprocess = preprocess_image(image, self.imgsz);
        let (output, shape) = self.run_inference(&preprocess.tensor)?;

        let people = decode_pose(&output, &shape, &preprocess, &self.config);
        Ok(people
            .iter()
            .map(|person| to_observation(person, preprocess.orig_shape, self.config.keypoint_threshold))
            .collect())
    }
}

impl std::fmt::Debug for PoseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoseModel")
            .field("path", &self.path)
            .field("imgsz", &self.imgsz)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Parse an `imgsz` metadata value such as `[640, 640]` or `640`.
fn parse_imgsz(value: &str) -> Option<(usize, usize)> {
    let dims: Vec<usize> = value
        .trim_matches(|c| c == '[' || c == ']' || c == '(' || c == ')')
        .split(',')
        .map(|s| s.trim().parse().ok())
        .collect::<Option<_>>()?;
    match dims.as_slice() {
        [size] => Some((*size, *size)),
        [h, w] => Some((*h, *w)),
        _ => None,
    }
}
