use crate::device_camera::interface::CameraConfig;
use crate::disposal_catalog::DisposalCatalog;
use crate::result_classifier::Thresholds;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of the exported model, passed through to the classifier.
    pub model_location: String,
    pub thresholds: Thresholds,
    pub catalog: DisposalCatalog,
    /// Refuse to start when the model knows classes the catalog does not.
    pub strict_catalog: bool,
    pub camera: CameraConfig,
    /// Pause between capture loop cycles, about one display refresh.
    pub frame_interval: Duration,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_location: "./model".to_string(),
            thresholds: Thresholds::default(),
            catalog: DisposalCatalog::default(),
            strict_catalog: false,
            camera: CameraConfig::default(),
            frame_interval: Duration::from_millis(16),
            logger_timezone: brasilia_time(),
        }
    }
}

fn brasilia_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(3 * 3600).unwrap()
}
