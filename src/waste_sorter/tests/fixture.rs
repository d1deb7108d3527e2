use crate::config::Config;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::device_input::impl_fake::DeviceInputFake;
use crate::device_input::interface::UserAction;
use crate::image_classifier::impl_fake::{ImageClassifierFake, ImageClassifierFakeLoader};
use crate::library::logger::{impl_console::LoggerConsole, interface::Logger};
use crate::waste_sorter::main::WasteSorter;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[allow(dead_code)]
pub struct Fixture {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub classifier: Arc<ImageClassifierFake>,
    pub device_camera: Arc<DeviceCameraFake>,
    pub device_display: DeviceDisplayFake,
    pub waste_sorter: WasteSorter,
}

fn test_config() -> Config {
    Config {
        frame_interval: Duration::from_millis(5),
        ..Config::default()
    }
}

impl Fixture {
    pub fn new(script: Vec<(Duration, UserAction)>) -> Self {
        Self::build(test_config(), script, false)
    }

    pub fn with_failing_model(script: Vec<(Duration, UserAction)>) -> Self {
        Self::build(test_config(), script, true)
    }

    /// Starts from the test config with `configure` applied on top.
    pub fn with_config(
        configure: impl FnOnce(&mut Config),
        script: Vec<(Duration, UserAction)>,
    ) -> Self {
        let mut config = test_config();
        configure(&mut config);
        Self::build(config, script, false)
    }

    fn build(config: Config, script: Vec<(Duration, UserAction)>, fail_model_load: bool) -> Self {
        let logger: Arc<dyn Logger + Send + Sync> =
            Arc::new(LoggerConsole::new(config.logger_timezone));
        let classifier = Arc::new(ImageClassifierFake::new(logger.clone()));
        let loader = if fail_model_load {
            ImageClassifierFakeLoader::failing(classifier.clone())
        } else {
            ImageClassifierFakeLoader::new(classifier.clone())
        };
        let device_camera = Arc::new(DeviceCameraFake::new(logger.clone()));
        let device_display = DeviceDisplayFake::new(logger.clone());

        let waste_sorter = WasteSorter::new(
            config.clone(),
            logger.clone(),
            Arc::new(loader),
            device_camera.clone(),
            Arc::new(Mutex::new(device_display.clone())),
            Arc::new(DeviceInputFake::new(script)),
        );

        Self {
            config,
            logger,
            classifier,
            device_camera,
            device_display,
            waste_sorter,
        }
    }
}
