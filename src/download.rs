// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose model downloading.
//!
//! The stock YOLO pose model is fetched from the Ultralytics asset release when it
//! is requested but not present locally.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{OverlayError, Result};

/// Default pose model name.
pub const DEFAULT_POSE_MODEL: &str = "yolo11n-pose.onnx";

/// URL for downloading the default pose model.
const DEFAULT_POSE_MODEL_URL: &str =
    "https://github.com/ultralytics/assets/releases/download/v8.3.0/yolo11n-pose.onnx";

/// Connection timeout in seconds.
const CONNECT_TIMEOUT: u64 = 30;

/// Read timeout in seconds.
const READ_TIMEOUT: u64 = 300;

/// Minimum interval between progress line updates.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Format bytes as human-readable string (e.g., "10.4MB").
#[allow(clippy::cast_precision_loss)]
fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let bytes = bytes as f64;
    if bytes >= MB {
        format!("{:.1}MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.1}KB", bytes / KB)
    } else {
        format!("{bytes:.0}B")
    }
}

/// Progress line for `downloaded` of `total` bytes (total may be unknown).
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn progress_line(desc: &str, downloaded: u64, total: Option<u64>) -> String {
    match total {
        Some(total) if total > 0 => {
            let percent = ((downloaded as f64 / total as f64).min(1.0) * 100.0) as u8;
            format!(
                "{desc}: {percent}% {}/{}",
                format_bytes(downloaded),
                format_bytes(total)
            )
        }
        _ => format!("{desc}: {}", format_bytes(downloaded)),
    }
}

/// Stream `url` into `dest` through a `.part` file that is renamed on success.
fn download_file(url: &str, dest: &Path) -> Result<()> {
    let config = ureq::Agent::config_builder()
        .timeout_connect(Some(Duration::from_secs(CONNECT_TIMEOUT)))
        .timeout_recv_body(Some(Duration::from_secs(READ_TIMEOUT)))
        .build();
    let agent = ureq::Agent::new_with_config(config);

    let response = agent
        .get(url)
        .call()
        .map_err(|e| OverlayError::ModelLoadError(format!("Failed to download {url}: {e}")))?;

    let total: Option<u64> = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok());

    let temp_path = dest.with_extension("part");
    let _ = fs::remove_file(&temp_path);

    let write_all = || -> Result<u64> {
        let mut writer = BufWriter::new(File::create(&temp_path)?);
        let mut reader = response.into_body().into_reader();
        let mut buffer = [0u8; 65536];
        let mut downloaded = 0u64;
        let mut last_update = Instant::now();
        let desc = format!("Downloading {url} to '{}'", dest.display());

        loop {
            let read = reader.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            writer.write_all(&buffer[..read])?;
            downloaded += read as u64;

            if last_update.elapsed() >= PROGRESS_INTERVAL {
                last_update = Instant::now();
                eprint!("\r\x1b[K{}", progress_line(&desc, downloaded, total));
                std::io::stderr().flush().ok();
            }
        }
        writer.flush()?;
        eprintln!("\r\x1b[K{}", progress_line(&desc, downloaded, total.or(Some(downloaded))));
        Ok(downloaded)
    };

    if let Err(e) = write_all() {
        let _ = fs::remove_file(&temp_path);
        return Err(OverlayError::ModelLoadError(format!("Failed to download {url}: {e}")));
    }

    fs::rename(&temp_path, dest).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        OverlayError::ModelLoadError(format!(
            "Failed to move downloaded file to {}: {e}",
            dest.display()
        ))
    })
}

/// Download the model at `model_path` if it is the stock pose model.
///
/// Returns the path to the downloaded model.
///
/// # Errors
///
/// Fails for any other file name, or if the download fails.
pub fn try_download_model<P: AsRef<Path>>(model_path: P) -> Result<PathBuf> {
    let path = model_path.as_ref();
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    if filename != DEFAULT_POSE_MODEL {
        return Err(OverlayError::ModelLoadError(format!(
            "Model file not found: {}. Auto-download is only supported for {DEFAULT_POSE_MODEL}",
            path.display(),
        )));
    }

    download_file(DEFAULT_POSE_MODEL_URL, path)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_returns_error() {
        let result = try_download_model("unknown_model.onnx");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Auto-download is only supported"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500B");
        assert_eq!(format_bytes(1024), "1.0KB");
        assert_eq!(format_bytes(1_048_576), "1.0MB");
    }

    #[test]
    fn test_progress_line() {
        assert_eq!(progress_line("x", 512, Some(1024)), "x: 50% 512B/1.0KB");
        assert_eq!(progress_line("x", 2048, None), "x: 2.0KB");
    }
}
