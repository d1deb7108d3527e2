use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to load model from {location}: {source}")]
    ModelLoad {
        location: String,
        #[source]
        source: BoxError,
    },
    #[error("camera unavailable: {0}")]
    Device(String),
    #[error("prediction vector is empty")]
    InvalidInput,
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("could not decode image: {0}")]
    ImageDecode(String),
    #[error("disposal catalog: {0}")]
    Catalog(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageDecode(err.to_string())
    }
}
