// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Image preprocessing for pose model inference.
//!
//! Letterbox resizing, normalization to [0, 1], and conversion to an NCHW tensor,
//! plus the inverse transform for mapping model coordinates back to the image.

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView};
use ndarray::Array4;

/// Normalized letterbox padding color (114/255 ≈ 0.447).
const LETTERBOX_NORM: f32 = 114.0 / 255.0;

/// Reciprocal of 255 for normalization.
const INV_255: f32 = 1.0 / 255.0;

/// Result of preprocessing an image, containing the tensor and transform info.
#[derive(Debug, Clone)]
pub struct PreprocessResult {
    /// Preprocessed image tensor in NCHW format, normalized to [0, 1].
    pub tensor: Array4<f32>,
    /// Original image dimensions (height, width).
    pub orig_shape: (u32, u32),
    /// Scale factors applied (`scale_y`, `scale_x`).
    pub scale: (f32, f32),
    /// Padding applied (`pad_top`, `pad_left`).
    pub padding: (f32, f32),
}

/// Preprocess an image for inference.
///
/// # Arguments
///
/// * `image` - Input image.
/// * `target_size` - Target size as (height, width).
#[must_use]
pub fn preprocess_image(image: &DynamicImage, target_size: (usize, usize)) -> PreprocessResult {
    let (orig_width, orig_height) = image.dimensions();
    let (new_width, new_height, pad_left, pad_top, scale) =
        calculate_letterbox_params(orig_width, orig_height, target_size);

    let resized = imageops::resize(&image.to_rgb8(), new_width.max(1), new_height.max(1), FilterType::Triangle);

    let (target_h, target_w) = target_size;
    let mut tensor = Array4::from_elem((1, 3, target_h, target_w), LETTERBOX_NORM);
    for (x, y, pixel) in resized.enumerate_pixels() {
        let (tx, ty) = ((x + pad_left) as usize, (y + pad_top) as usize);
        if tx >= target_w || ty >= target_h {
            continue;
        }
        for c in 0..3 {
            tensor[[0, c, ty, tx]] = f32::from(pixel[c]) * INV_255;
        }
    }

    PreprocessResult {
        tensor,
        orig_shape: (orig_height, orig_width),
        scale,
        padding: (pad_top as f32, pad_left as f32),
    }
}

/// Letterbox geometry: resized size, centered padding and scale factors.
fn calculate_letterbox_params(
    orig_width: u32,
    orig_height: u32,
    target_size: (usize, usize),
) -> (u32, u32, u32, u32, (f32, f32)) {
    let (target_h, target_w) = (target_size.0 as f32, target_size.1 as f32);
    let (orig_h, orig_w) = (orig_height as f32, orig_width as f32);

    // Fit within target while maintaining aspect ratio
    let scale = (target_h / orig_h).min(target_w / orig_w);

    let new_w = (orig_w * scale).round() as u32;
    let new_h = (orig_h * scale).round() as u32;

    let pad_w = (target_size.1 as u32).saturating_sub(new_w);
    let pad_h = (target_size.0 as u32).saturating_sub(new_h);

    let pad_left = pad_w / 2;
    let pad_top = pad_h / 2;

    let scale_x = new_w as f32 / orig_w;
    let scale_y = new_h as f32 / orig_h;

    (new_w, new_h, pad_left, pad_top, (scale_y, scale_x))
}

/// Scale a point from model input space back to original image space.
#[must_use]
pub fn scale_point(x: f32, y: f32, scale: (f32, f32), padding: (f32, f32)) -> (f32, f32) {
    let (scale_y, scale_x) = scale;
    let (pad_top, pad_left) = padding;
    ((x - pad_left) / scale_x, (y - pad_top) / scale_y)
}

/// Scale coordinates from model output space back to original image space.
#[must_use]
pub fn scale_coords(coords: &[f32; 4], scale: (f32, f32), padding: (f32, f32)) -> [f32; 4] {
    let (x1, y1) = scale_point(coords[0], coords[1], scale, padding);
    let (x2, y2) = scale_point(coords[2], coords[3], scale, padding);
    [x1, y1, x2, y2]
}

/// Clip box coordinates to image bounds given as (height, width).
#[must_use]
pub const fn clip_coords(coords: &[f32; 4], shape: (u32, u32)) -> [f32; 4] {
    let (h, w) = (shape.0 as f32, shape.1 as f32);
    [
        coords[0].clamp(0.0, w),
        coords[1].clamp(0.0, h),
        coords[2].clamp(0.0, w),
        coords[3].clamp(0.0, h),
    ]
}
