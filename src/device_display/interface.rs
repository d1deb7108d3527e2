use crate::disposal_catalog::Color;
use std::error::Error;

/// Which inputs the user can act on right now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    pub modes_enabled: bool,
    pub webcam_active: bool,
    pub upload_active: bool,
    /// Label of the pause toggle, `None` while it is hidden.
    pub pause_label: Option<String>,
    pub classify_enabled: bool,
}

/// The single result area plus the control bar around it.
pub trait DeviceDisplay: Send + Sync {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Clear all text and reset the text color
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Write text to a specific line (0-based index)
    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn set_color(&mut self, color: Color) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn set_controls(&mut self, controls: &Controls) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn num_lines(&self) -> u8 {
        3
    }
}
