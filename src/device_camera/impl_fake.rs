use crate::device_camera::interface::{CameraConfig, CaptureHandle, DeviceCamera};
use crate::library::logger::interface::Logger;
use image::{DynamicImage, Rgb, RgbImage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct DeviceCameraFake {
    reject_facing: bool,
    reject_default: bool,
    open_attempts: AtomicUsize,
    opened: AtomicUsize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            reject_facing: false,
            reject_default: false,
            open_attempts: AtomicUsize::new(0),
            opened: AtomicUsize::new(0),
            logger: logger.with_namespace("camera").with_namespace("fake"),
        }
    }

    /// Fails every open that asks for a specific facing.
    pub fn rejecting_facing(mut self) -> Self {
        self.reject_facing = true;
        self
    }

    /// Fails every open of the unconstrained default camera.
    pub fn rejecting_default(mut self) -> Self {
        self.reject_default = true;
        self
    }

    pub fn open_attempts(&self) -> usize {
        self.open_attempts.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn open(
        &self,
        config: &CameraConfig,
    ) -> Result<Box<dyn CaptureHandle>, Box<dyn std::error::Error + Send + Sync>> {
        self.open_attempts.fetch_add(1, Ordering::SeqCst);
        self.logger.info(&format!("Opening camera {:?}", config))?;

        match config.facing {
            Some(facing) if self.reject_facing => {
                return Err(format!("no camera facing {:?}", facing).into());
            }
            None if self.reject_default => {
                return Err("permission denied".into());
            }
            _ => {}
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CaptureHandleFake {
            config: config.clone(),
            frame_index: 0,
            paused: false,
            closed: false,
        }))
    }
}

pub struct CaptureHandleFake {
    config: CameraConfig,
    frame_index: u8,
    paused: bool,
    closed: bool,
}

impl CaptureHandle for CaptureHandleFake {
    fn next_frame(&mut self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        if self.closed {
            return Err("camera closed".into());
        }
        // a frozen stream keeps returning the last frame
        if !self.paused {
            self.frame_index = self.frame_index.wrapping_add(1);
        }
        let shade = self.frame_index;
        let image = RgbImage::from_pixel(self.config.width, self.config.height, Rgb([shade; 3]));
        Ok(DynamicImage::ImageRgb8(image))
    }

    fn pause(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.paused = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.paused = false;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.closed = true;
        Ok(())
    }
}
