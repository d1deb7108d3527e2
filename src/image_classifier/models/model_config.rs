use crate::error::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const MODEL_FILE: &str = "model.onnx";
pub const METADATA_FILE: &str = "metadata.json";

const DEFAULT_IMAGE_SIZE: u32 = 224;

fn default_image_size() -> u32 {
    DEFAULT_IMAGE_SIZE
}

/// The part of an exported Teachable Machine `metadata.json` that inference
/// depends on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelMetadata {
    pub labels: Vec<String>,
    #[serde(rename = "imageSize", default = "default_image_size")]
    pub image_size: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    pub input_shape: (u32, u32),
    pub labels: Vec<String>,
}

impl ModelConfig {
    pub fn from_metadata(onnx_model_path: PathBuf, metadata: ModelMetadata) -> Self {
        Self {
            onnx_model_path,
            input_shape: (metadata.image_size, metadata.image_size),
            labels: metadata.labels,
        }
    }

    /// `location` is a directory holding `model.onnx` and `metadata.json`.
    pub fn from_location(location: &str) -> Result<Self, Error> {
        let model_load_error = |source: Box<dyn std::error::Error + Send + Sync>| Error::ModelLoad {
            location: location.to_string(),
            source,
        };

        if location.starts_with("http://") || location.starts_with("https://") {
            return Err(model_load_error(
                "remote model locations are not supported, download the export first".into(),
            ));
        }

        let directory = Path::new(location);
        let metadata_json = std::fs::read_to_string(directory.join(METADATA_FILE))
            .map_err(|e| model_load_error(e.into()))?;
        let metadata: ModelMetadata =
            serde_json::from_str(&metadata_json).map_err(|e| model_load_error(e.into()))?;

        if metadata.labels.is_empty() {
            return Err(model_load_error("metadata lists no labels".into()));
        }

        Ok(Self::from_metadata(directory.join(MODEL_FILE), metadata))
    }
}
