// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Image viewer for displaying the overlay.

use image::DynamicImage;
use minifb::{Key, Window, WindowOptions};

use crate::error::{OverlayError, Result};

/// A simple image viewer using minifb.
pub struct Viewer {
    window: Window,
    pub width: usize,
    pub height: usize,
    buffer: Vec<u32>,
}

impl Viewer {
    /// Create a new viewer window.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| OverlayError::VisualizerError(format!("Failed to create window: {e}")))?;

        window.set_target_fps(60);

        Ok(Self {
            window,
            width,
            height,
            buffer: Vec::new(),
        })
    }

    fn should_close(&self) -> bool {
        !self.window.is_open()
            || self.window.is_key_down(Key::Escape)
            || self.window.is_key_down(Key::Q)
    }

    /// Replace the displayed image.
    pub fn update(&mut self, image: &DynamicImage) -> Result<bool> {
        if self.should_close() {
            return Ok(false);
        }

        let rgb = image.to_rgb8();
        self.width = rgb.width() as usize;
        self.height = rgb.height() as usize;

        // minifb expects 0x00RRGGBB per pixel
        self.buffer = rgb
            .pixels()
            .map(|p| (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2]))
            .collect();

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| OverlayError::VisualizerError(format!("Failed to update window: {e}")))?;

        Ok(true)
    }

    /// Keep the window responsive until it is closed or Escape/Q is pressed.
    pub fn wait_until_closed(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        while !self.should_close() {
            self.window
                .update_with_buffer(&self.buffer, self.width, self.height)
                .map_err(|e| {
                    OverlayError::VisualizerError(format!("Failed to update window: {e}"))
                })?;
        }
        Ok(())
    }
}
