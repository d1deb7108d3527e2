use crate::device_camera::interface::{CameraConfig, CaptureHandle, DeviceCamera};
use crate::error::Error;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A long-lived, opened camera. Pausing freezes capture without releasing
/// the device, so resuming is immediate.
pub struct CameraSession {
    handle: Mutex<Box<dyn CaptureHandle>>,
    config: CameraConfig,
    fallback_used: bool,
    started: AtomicBool,
    paused: AtomicBool,
}

impl std::fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSession")
            .field("config", &self.config)
            .field("fallback_used", &self.fallback_used)
            .field("started", &self.is_started())
            .field("paused", &self.is_paused())
            .finish()
    }
}

/// Opens the preferred camera, falling back once to the device default.
/// Only a failure of both attempts is reported.
pub fn acquire(
    device: &dyn DeviceCamera,
    preferred: &CameraConfig,
    logger: &dyn Logger,
) -> Result<CameraSession, Error> {
    let preferred_error = match device.open(preferred) {
        Ok(handle) => return Ok(CameraSession::new(handle, preferred.clone(), false)),
        Err(e) => e,
    };

    let fallback = preferred.without_facing();
    let _ = logger.warn(&format!(
        "Could not open {:?} camera ({}), trying the default camera",
        preferred.facing, preferred_error
    ));

    match device.open(&fallback) {
        Ok(handle) => {
            let _ = logger.info("Default camera opened");
            Ok(CameraSession::new(handle, fallback, true))
        }
        Err(fallback_error) => Err(Error::Device(format!(
            "preferred camera: {}; default camera: {}",
            preferred_error, fallback_error
        ))),
    }
}

impl CameraSession {
    fn new(handle: Box<dyn CaptureHandle>, config: CameraConfig, fallback_used: bool) -> Self {
        Self {
            handle: Mutex::new(handle),
            config,
            fallback_used,
            started: AtomicBool::new(true),
            paused: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn fallback_used(&self) -> bool {
        self.fallback_used
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn pause(&self) -> Result<(), Error> {
        self.paused.store(true, Ordering::SeqCst);
        self.handle
            .lock()
            .unwrap()
            .pause()
            .map_err(|e| Error::Device(e.to_string()))
    }

    pub fn resume(&self) -> Result<(), Error> {
        self.handle
            .lock()
            .unwrap()
            .resume()
            .map_err(|e| Error::Device(e.to_string()))?;
        self.paused.store(false, Ordering::SeqCst);
        Ok(())
    }

    pub fn next_frame(&self) -> Result<DynamicImage, Error> {
        if !self.is_started() {
            return Err(Error::Device("camera session closed".to_string()));
        }
        self.handle
            .lock()
            .unwrap()
            .next_frame()
            .map_err(|e| Error::Device(e.to_string()))
    }

    pub fn close(&self) -> Result<(), Error> {
        self.started.store(false, Ordering::SeqCst);
        self.handle
            .lock()
            .unwrap()
            .close()
            .map_err(|e| Error::Device(e.to_string()))
    }
}
