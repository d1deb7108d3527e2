use crate::device_camera::interface::{CameraConfig, CaptureHandle, DeviceCamera, Facing};
use crate::library::logger::interface::Logger;
use image::{DynamicImage, ImageFormat};
use std::collections::HashMap;
use std::sync::Arc;
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, FourCC, Format};

const BUFFER_COUNT: u32 = 4;

/// Video4Linux cameras. A facing is served by the device registered for it;
/// the unconstrained configuration uses the default device.
pub struct DeviceCameraV4l {
    default_device: String,
    facing_devices: HashMap<Facing, String>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraV4l {
    pub fn new(default_device: &str, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            default_device: default_device.to_string(),
            facing_devices: HashMap::new(),
            logger: logger.with_namespace("camera").with_namespace("v4l"),
        }
    }

    pub fn with_facing_device(mut self, facing: Facing, device_path: &str) -> Self {
        self.facing_devices.insert(facing, device_path.to_string());
        self
    }

    fn device_path(&self, config: &CameraConfig) -> Result<&str, Box<dyn std::error::Error + Send + Sync>> {
        match config.facing {
            None => Ok(&self.default_device),
            Some(facing) => self
                .facing_devices
                .get(&facing)
                .map(|path| path.as_str())
                .ok_or_else(|| format!("no device configured for {:?} camera", facing).into()),
        }
    }
}

impl DeviceCamera for DeviceCameraV4l {
    fn open(
        &self,
        config: &CameraConfig,
    ) -> Result<Box<dyn CaptureHandle>, Box<dyn std::error::Error + Send + Sync>> {
        let device_path = self.device_path(config)?;
        self.logger.info(&format!("Opening {}", device_path))?;

        let device = Device::with_path(device_path)?;
        let requested = Format::new(config.width, config.height, FourCC::new(b"MJPG"));
        let format = device.set_format(&requested)?;
        if format.fourcc != FourCC::new(b"MJPG") {
            return Err(format!("{} does not stream MJPG (got {})", device_path, format.fourcc).into());
        }

        self.logger.info(&format!(
            "{} streaming {}x{} {}",
            device_path, format.width, format.height, format.fourcc
        ))?;

        Ok(Box::new(CaptureHandleV4l {
            device: Some(device),
            mirror: config.mirror,
            paused: false,
            last_frame: None,
        }))
    }
}

pub struct CaptureHandleV4l {
    device: Option<Device>,
    mirror: bool,
    paused: bool,
    last_frame: Option<DynamicImage>,
}

impl CaptureHandleV4l {
    fn capture(&mut self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        let device = self.device.as_mut().ok_or("camera closed")?;
        let mut stream = Stream::with_buffers(device, Type::VideoCapture, BUFFER_COUNT)?;
        let (buf, meta) = stream.next()?;
        let used = (meta.bytesused as usize).min(buf.len());

        let frame = image::load_from_memory_with_format(&buf[..used], ImageFormat::Jpeg)?;
        Ok(if self.mirror { frame.fliph() } else { frame })
    }
}

impl CaptureHandle for CaptureHandleV4l {
    fn next_frame(&mut self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        if self.paused {
            if let Some(frame) = &self.last_frame {
                return Ok(frame.clone());
            }
        }
        let frame = self.capture()?;
        self.last_frame = Some(frame.clone());
        Ok(frame)
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
        self.device = None;
        self.last_frame = None;
        Ok(())
    }
}
