// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::assets::{DEFAULT_ASSET, DEFAULT_ASSETS_DIR};
use crate::visualizer::Color;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Examples:
    pose-overlay detect
    pose-overlay detect --asset image1 --assets-dir assets --show
    pose-overlay detect --model yolo11n-pose.onnx --conf 0.5 --save
    pose-overlay detect --observations poses.json --output overlay.png
    pose-overlay detect --use-image-size --outline --stroke '#ff6fdd' --save"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect a body pose in a bundled image and overlay the torso joints
    Detect(DetectArgs),
}

/// Arguments for the detect command.
#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct DetectArgs {
    /// Name of the image asset
    #[arg(short, long, default_value = DEFAULT_ASSET)]
    pub asset: String,

    /// Directory holding the image assets
    #[arg(long, default_value = DEFAULT_ASSETS_DIR)]
    pub assets_dir: PathBuf,

    /// Path to ONNX pose model file [default: yolo11n-pose.onnx]
    #[arg(short, long)]
    pub model: Option<String>,

    /// Replay recorded observations from a JSON file instead of running a model
    #[arg(long, conflicts_with = "model")]
    pub observations: Option<PathBuf>,

    /// Person confidence threshold
    #[arg(long, default_value_t = 0.25)]
    pub conf: f32,

    /// `IoU` threshold for NMS
    #[arg(long, default_value_t = 0.45)]
    pub iou: f32,

    /// Keypoints scored below this are treated as not recognized
    #[arg(long, default_value_t = 0.5)]
    pub kpt_conf: f32,

    /// Inference image size
    #[arg(long)]
    pub imgsz: Option<usize>,

    /// Width used to convert normalized joint locations to pixels
    #[arg(long, default_value_t = 768)]
    pub width: u32,

    /// Height used to convert normalized joint locations to pixels
    #[arg(long, default_value_t = 1536)]
    pub height: u32,

    /// Use the loaded image's own dimensions instead of --width/--height
    #[arg(long, default_value_t = false, conflicts_with_all = ["width", "height"])]
    pub use_image_size: bool,

    /// Marker fill color (name or #rrggbb)
    #[arg(long, default_value = "white")]
    pub fill: Color,

    /// Marker outline color (name or #rrggbb)
    #[arg(long, default_value = "blue")]
    pub stroke: Color,

    /// Marker radius in pixels
    #[arg(long, default_value_t = 5)]
    pub radius: u32,

    /// Outline width in pixels
    #[arg(long, default_value_t = 2)]
    pub line_width: u32,

    /// Also draw the closed torso outline
    #[arg(long, default_value_t = false)]
    pub outline: bool,

    /// Save the displayed image to runs/pose/overlay
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Save the displayed image to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Display the result in a window
    #[arg(long, default_value_t = false)]
    pub show: bool,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}
