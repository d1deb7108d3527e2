use args::{Args, CameraBackend, ClassifierBackend, DisplayBackend};
use clap::Parser;
use config::Config;
use device_camera::{
    impl_fake::DeviceCameraFake,
    impl_v4l::DeviceCameraV4l,
    interface::{DeviceCamera, Facing},
};
use device_display::{
    impl_console::DeviceDisplayConsole, impl_gui::DeviceDisplayGui, interface::DeviceDisplay,
};
use device_input::impl_console::DeviceInputConsole;
use disposal_catalog::DisposalCatalog;
use image_classifier::{
    impl_fake::{ImageClassifierFake, ImageClassifierFakeLoader},
    impl_tract_onnx::ImageClassifierTractOnnxLoader,
    interface::ImageClassifierLoader,
};
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use std::sync::{Arc, Mutex};
use waste_sorter::core::State;
use waste_sorter::main::WasteSorter;

mod args;
mod camera_session;
mod config;
mod device_camera;
mod device_display;
mod device_input;
mod disposal_catalog;
mod error;
mod image_classifier;
mod library;
mod result_classifier;
#[cfg(test)]
mod result_classifier_test;
mod waste_sorter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = Config::default();
    if let Some(model) = &args.model {
        config.model_location = model.clone();
    }
    if let Some(path) = &args.catalog {
        config.catalog = DisposalCatalog::from_json_file(path)?;
    }
    config.strict_catalog = args.strict_catalog;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let classifier_loader: Arc<dyn ImageClassifierLoader + Send + Sync> = match args.classifier
    {
        ClassifierBackend::Fake => Arc::new(ImageClassifierFakeLoader::new(Arc::new(
            ImageClassifierFake::new(logger.clone()),
        ))),
        ClassifierBackend::Onnx => Arc::new(ImageClassifierTractOnnxLoader::new(logger.clone())),
    };

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = match args.camera {
        CameraBackend::Fake => Arc::new(DeviceCameraFake::new(logger.clone())),
        CameraBackend::V4l => {
            let mut camera = DeviceCameraV4l::new(&args.default_device, logger.clone())
                .with_facing_device(Facing::Environment, &args.rear_device);
            if let Some(front_device) = &args.front_device {
                camera = camera.with_facing_device(Facing::User, front_device);
            }
            Arc::new(camera)
        }
    };

    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> = match args.display {
        DisplayBackend::Console => Arc::new(Mutex::new(DeviceDisplayConsole::new())),
        DisplayBackend::Gui => Arc::new(Mutex::new(DeviceDisplayGui::new())),
    };

    let device_input = Arc::new(DeviceInputConsole::new(logger.clone()));

    let waste_sorter = WasteSorter::new(
        config,
        logger.clone(),
        classifier_loader,
        device_camera,
        device_display,
        device_input,
    );

    match waste_sorter.run()? {
        State::LoadFailed { message } => Err(message.into()),
        _ => Ok(()),
    }
}
