use super::main::WasteSorter;
use crate::camera_session::{self, CameraSession};
use crate::error::Error;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::repeating_task::RepeatingTask;
use crate::waste_sorter::core::{CameraAcquired, Effect, Msg};
use std::path::Path;
use std::sync::Arc;

impl WasteSorter {
    pub fn interpret_effect(&self, effect: Effect) {
        match effect {
            Effect::LoadModel { model_location } => {
                let loaded = self.load_model(&model_location);
                let _ = self.event_sender.send(Msg::ModelLoadDone(loaded));
            }
            Effect::SubscribeInput => {
                let events = self.device_input.events();
                while let Ok(action) = events.recv() {
                    if self.event_sender.send(Msg::User(action)).is_err() {
                        break;
                    }
                }
            }
            Effect::AcquireCamera { config } => {
                let acquired = camera_session::acquire(
                    self.device_camera.as_ref(),
                    &config,
                    self.logger.as_ref(),
                )
                .map(|session| {
                    let _ = self
                        .logger
                        .info(&format!("Camera ready: {:?}", session.config()));
                    let fallback_used = session.fallback_used();
                    let replaced = self.camera_session.lock().unwrap().replace(Arc::new(session));
                    if let Some(old) = replaced {
                        let _ = old.close();
                    }
                    CameraAcquired { fallback_used }
                });
                let _ = self.event_sender.send(Msg::CameraAcquireDone(acquired));
            }
            Effect::StartCapture { activation } => {
                if let Err(error) = self.start_capture(activation) {
                    let _ = self
                        .logger
                        .error(&format!("Could not start capture: {}", error));
                    let _ = self
                        .event_sender
                        .send(Msg::CaptureStartFailed { activation, error });
                }
            }
            Effect::StopCapture => {
                self.stop_capture_loop();
                if let Some(session) = self.session() {
                    if let Err(e) = session.pause() {
                        let _ = self.logger.warn(&format!("Could not pause camera: {}", e));
                    }
                }
            }
            Effect::SetCameraPaused(paused) => {
                if let Some(session) = self.session() {
                    let result = if paused {
                        session.pause()
                    } else {
                        session.resume()
                    };
                    if let Err(e) = result {
                        let _ = self.logger.warn(&format!("Could not toggle pause: {}", e));
                    }
                }
            }
            Effect::DecodeImage { path, request } => {
                let decoded = decode_image(&path).map(Arc::new);
                let _ = self
                    .event_sender
                    .send(Msg::ImageDecodeDone { request, result: decoded });
            }
            Effect::PredictUpload { image, request } => {
                let result = match self.loaded_classifier() {
                    Ok(classifier) => classifier
                        .predict(&image)
                        .map_err(|e| Error::Inference(e.to_string())),
                    Err(e) => Err(e),
                };
                let _ = self
                    .event_sender
                    .send(Msg::UploadPredictionDone { request, result });
            }
        }
    }

    fn load_model(&self, model_location: &str) -> Result<Vec<String>, Error> {
        let classifier = self.classifier_loader.load(model_location)?;
        let class_names = classifier.class_names().to_vec();

        let missing = self.config.catalog.missing_classes(&class_names);
        if !missing.is_empty() {
            if self.config.strict_catalog {
                self.config.catalog.validate(&class_names)?;
            }
            let _ = self.logger.warn(&format!(
                "No disposal entry for {}, showing the Background entry instead",
                missing.join(", ")
            ));
        }

        let _ = self.logger.info(&format!(
            "Model ready with {} classes: {}",
            classifier.class_count(),
            class_names.join(", ")
        ));
        *self.classifier.lock().unwrap() = Some(classifier);
        Ok(class_names)
    }

    fn loaded_classifier(&self) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Error> {
        self.classifier
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Inference("model not loaded".to_string()))
    }

    fn session(&self) -> Option<Arc<CameraSession>> {
        self.camera_session.lock().unwrap().clone()
    }

    fn start_capture(&self, activation: u64) -> Result<(), Error> {
        self.stop_capture_loop();

        let session = self
            .session()
            .ok_or_else(|| Error::Device("no camera session".to_string()))?;
        let classifier = self.loaded_classifier()?;
        session.resume()?;

        let sender = self.event_sender.clone();
        let logger = self.logger.with_namespace("capture");
        let task = RepeatingTask::spawn(self.config.frame_interval, move || {
            if session.is_paused() {
                return;
            }
            let result = session.next_frame().and_then(|frame| {
                classifier
                    .predict(&frame)
                    .map_err(|e| Error::Inference(e.to_string()))
            });
            if let Err(e) = &result {
                let _ = logger.warn(&format!("Capture cycle failed: {}", e));
            }
            let _ = sender.send(Msg::WebcamPredictionDone { activation, result });
        });

        *self.capture_loop.lock().unwrap() = Some(task);
        Ok(())
    }

    pub(super) fn stop_capture_loop(&self) {
        if let Some(task) = self.capture_loop.lock().unwrap().take() {
            task.cancel();
        }
    }
}

fn decode_image(path: &Path) -> Result<image::DynamicImage, Error> {
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;
    Ok(reader.decode()?)
}
