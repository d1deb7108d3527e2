use crate::camera_session::CameraSession;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::device_input::interface::DeviceInput;
use crate::image_classifier::interface::{ImageClassifier, ImageClassifierLoader};
use crate::library::logger::interface::Logger;
use crate::library::repeating_task::RepeatingTask;
use crate::waste_sorter::core::{Effect, Msg};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct WasteSorter {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub classifier_loader: Arc<dyn ImageClassifierLoader + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub device_input: Arc<dyn DeviceInput + Send + Sync>,
    pub classifier: Arc<Mutex<Option<Arc<dyn ImageClassifier + Send + Sync>>>>,
    pub camera_session: Arc<Mutex<Option<Arc<CameraSession>>>>,
    pub capture_loop: Arc<Mutex<Option<RepeatingTask>>>,
    pub event_sender: Sender<Msg>,
    pub event_receiver: Arc<Mutex<Receiver<Msg>>>,
}

impl WasteSorter {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        classifier_loader: Arc<dyn ImageClassifierLoader + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        device_input: Arc<dyn DeviceInput + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();

        Self {
            config,
            logger: logger.with_namespace("waste_sorter"),
            classifier_loader,
            device_camera,
            device_display,
            device_input,
            classifier: Arc::new(Mutex::new(None)),
            camera_session: Arc::new(Mutex::new(None)),
            capture_loop: Arc::new(Mutex::new(None)),
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
        }
    }

    pub(super) fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let _ = self
                .logger
                .info(&format!("Running effect: {}", effect.to_display_string()));

            if effect.is_blocking() {
                let self_clone = self.clone();
                std::thread::spawn(move || self_clone.interpret_effect(effect));
            } else {
                self.interpret_effect(effect);
            }
        }
    }
}
