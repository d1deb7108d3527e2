use std::path::PathBuf;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    SelectWebcam,
    SelectUpload,
    TogglePause,
    /// `None` when the selection was cleared.
    SelectFile(Option<PathBuf>),
    Classify,
    Quit,
}

pub trait DeviceInput {
    fn events(&self) -> Receiver<UserAction>;
}
