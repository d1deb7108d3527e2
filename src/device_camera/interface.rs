use image::DynamicImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Rear camera, pointing away from the user.
    Environment,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraConfig {
    /// `None` lets the device pick its default camera.
    pub facing: Option<Facing>,
    pub width: u32,
    pub height: u32,
    pub mirror: bool,
}

impl CameraConfig {
    pub fn without_facing(&self) -> Self {
        Self {
            facing: None,
            ..self.clone()
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            facing: Some(Facing::Environment),
            width: 300,
            height: 300,
            mirror: true,
        }
    }
}

pub trait CaptureHandle: Send {
    fn next_frame(&mut self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>>;
    fn pause(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn resume(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

pub trait DeviceCamera {
    fn open(
        &self,
        config: &CameraConfig,
    ) -> Result<Box<dyn CaptureHandle>, Box<dyn std::error::Error + Send + Sync>>;
}
