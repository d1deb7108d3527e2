use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassifierBackend {
    Fake,
    Onnx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CameraBackend {
    Fake,
    V4l,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayBackend {
    Console,
    Gui,
}

/// Classifies waste items from a camera or an image file and tells you
/// which bin they go in.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding model.onnx and metadata.json
    #[arg(long, value_name = "DIR")]
    pub model: Option<String>,

    /// JSON file mapping class names to disposal entries
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "fake")]
    pub classifier: ClassifierBackend,

    #[arg(long, value_enum, default_value = "fake")]
    pub camera: CameraBackend,

    /// V4L device used for the rear camera
    #[arg(long, value_name = "PATH", default_value = "/dev/video0")]
    pub rear_device: String,

    /// V4L device used for the front (user-facing) camera
    #[arg(long, value_name = "PATH")]
    pub front_device: Option<String>,

    /// V4L device used when no facing is requested
    #[arg(long, value_name = "PATH", default_value = "/dev/video0")]
    pub default_device: String,

    #[arg(long, value_enum, default_value = "console")]
    pub display: DisplayBackend,

    /// Refuse to start when the model has classes missing from the catalog
    #[arg(long)]
    pub strict_catalog: bool,
}
