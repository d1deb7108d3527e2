use super::core::{CameraStatus, Display, Mode, Prompt, Ready, State};
use crate::device_display::interface::{Controls, DeviceDisplay};
use crate::disposal_catalog::Color;
use crate::error::BoxError;
use crate::result_classifier::INCONCLUSIVE_COLOR;
use std::sync::{Arc, Mutex};

pub const DEFAULT_TEXT_COLOR: Color = Color::rgb(0x33, 0x33, 0x33);

const PAUSE_LABEL: &str = "⏸️ Pause";
const RESUME_LABEL: &str = "▶️ Resume";

/// Everything the display shows for one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub lines: Vec<String>,
    pub color: Color,
    pub controls: Controls,
}

pub fn view(state: &State) -> View {
    match state {
        State::LoadingModel => View {
            lines: vec!["Loading AI model...".to_string()],
            color: DEFAULT_TEXT_COLOR,
            controls: Controls::default(),
        },
        State::LoadFailed { message } => View {
            lines: vec![
                "ERROR loading the model.".to_string(),
                "Check the model files and restart.".to_string(),
                message.clone(),
            ],
            color: INCONCLUSIVE_COLOR,
            controls: Controls::default(),
        },
        State::Ready(ready) => {
            let (lines, color) = match &ready.display {
                Display::Result(result) => (result.message_lines(), result.color()),
                Display::Prompt(prompt) => prompt_view(prompt),
            };
            View {
                lines,
                color,
                controls: controls(ready),
            }
        }
    }
}

fn text(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

fn prompt_view(prompt: &Prompt) -> (Vec<String>, Color) {
    match prompt {
        Prompt::ChooseMode => (
            text(&["Model ready!", "Choose an operating mode."]),
            DEFAULT_TEXT_COLOR,
        ),
        Prompt::PreparingMode => (text(&["Preparing mode..."]), DEFAULT_TEXT_COLOR),
        Prompt::CameraStarting => (text(&["Starting camera..."]), DEFAULT_TEXT_COLOR),
        Prompt::CameraStarted => (
            text(&["Camera started.", "Point the object at the camera."]),
            DEFAULT_TEXT_COLOR,
        ),
        Prompt::DefaultCameraUsed => (
            text(&["Default camera in use.", "Point the object at the camera."]),
            DEFAULT_TEXT_COLOR,
        ),
        Prompt::PointCamera => (
            text(&["Point the object at the camera..."]),
            DEFAULT_TEXT_COLOR,
        ),
        Prompt::CameraUnavailable(reason) => (
            vec![
                "Camera unavailable.".to_string(),
                reason.clone(),
                "Try Upload mode.".to_string(),
            ],
            INCONCLUSIVE_COLOR,
        ),
        Prompt::LoadImage => (
            text(&["Load an image to classify."]),
            DEFAULT_TEXT_COLOR,
        ),
        Prompt::ReadingImage => (text(&["Reading image..."]), DEFAULT_TEXT_COLOR),
        Prompt::ImageLoaded => (
            text(&["Image loaded.", "Press Classify."]),
            DEFAULT_TEXT_COLOR,
        ),
        Prompt::ImageUnreadable(reason) => (
            vec![
                "Could not read that image.".to_string(),
                reason.clone(),
            ],
            INCONCLUSIVE_COLOR,
        ),
        Prompt::Classifying => (text(&["Classifying..."]), DEFAULT_TEXT_COLOR),
        Prompt::PredictionFailed(reason) => (
            vec![
                "Classification failed, try again.".to_string(),
                reason.clone(),
            ],
            INCONCLUSIVE_COLOR,
        ),
    }
}

fn controls(ready: &Ready) -> Controls {
    let webcam_active = ready.mode == Mode::Webcam;
    let upload_active = ready.mode == Mode::Upload;

    let pause_label = match (&ready.camera, webcam_active) {
        (CameraStatus::Ready { paused: false, .. }, true) => Some(PAUSE_LABEL.to_string()),
        (CameraStatus::Ready { paused: true, .. }, true) => Some(RESUME_LABEL.to_string()),
        _ => None,
    };

    Controls {
        modes_enabled: true,
        webcam_active,
        upload_active,
        pause_label,
        classify_enabled: upload_active && ready.upload.classify_enabled,
    }
}

/// Writes views to the display, skipping states that look the same as the
/// last one drawn.
#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    last_view: Option<View>,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>) -> Self {
        Self {
            device_display,
            last_view: None,
        }
    }

    pub fn render(&mut self, state: &State) -> Result<(), BoxError> {
        let view = view(state);
        if self.last_view.as_ref() == Some(&view) {
            return Ok(());
        }

        let mut device_display = self.device_display.lock().unwrap();

        device_display.clear()?;
        device_display.set_color(view.color)?;

        let num_lines = device_display.num_lines() as usize;
        for (index, line) in view.lines.iter().take(num_lines).enumerate() {
            device_display.write_line(index as u8, line)?;
        }

        device_display.set_controls(&view.controls)?;
        self.last_view = Some(view);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_display::impl_fake::DeviceDisplayFake;
    use crate::disposal_catalog::DisposalCatalog;
    use crate::library::logger::impl_console::LoggerConsole;
    use crate::image_classifier::interface::Prediction;
    use crate::result_classifier::{classify, Thresholds};

    fn ready() -> Ready {
        Ready::new(vec!["Papel".to_string(), "Background".to_string()])
    }

    #[test]
    fn test_loading_has_no_controls() {
        let view = view(&State::LoadingModel);

        assert_eq!(view.lines, vec!["Loading AI model...".to_string()]);
        assert!(!view.controls.modes_enabled);
    }

    #[test]
    fn test_ready_enables_modes_only() {
        let view = view(&State::Ready(ready()));

        assert_eq!(view.lines[0], "Model ready!");
        assert_eq!(
            view.controls,
            Controls {
                modes_enabled: true,
                ..Controls::default()
            }
        );
    }

    #[test]
    fn test_pause_label_follows_camera() {
        let mut ready = ready();
        ready.mode = Mode::Webcam;
        ready.camera = CameraStatus::Ready {
            paused: false,
            fallback_used: false,
        };
        assert_eq!(
            controls(&ready).pause_label.as_deref(),
            Some("⏸️ Pause")
        );

        ready.camera = CameraStatus::Ready {
            paused: true,
            fallback_used: false,
        };
        assert_eq!(
            controls(&ready).pause_label.as_deref(),
            Some("▶️ Resume")
        );

        ready.mode = Mode::Upload;
        assert_eq!(controls(&ready).pause_label, None);
    }

    #[test]
    fn test_result_uses_tier_color() {
        let mut ready = ready();
        let result = classify(
            &[Prediction::new("Papel", 0.6), Prediction::new("Background", 0.4)],
            &DisposalCatalog::default(),
            &Thresholds::default(),
        )
        .unwrap();
        ready.display = Display::Result(result);

        let view = view(&State::Ready(ready));

        assert_eq!(view.color.to_string(), "#3f93a9");
        assert!(view.lines[0].contains("Papel"));
    }

    #[test]
    fn test_load_failure_is_shown() {
        let view = view(&State::LoadFailed {
            message: "no such file".to_string(),
        });

        assert!(view.lines[0].starts_with("ERROR"));
        assert_eq!(view.lines[2], "no such file");
        assert_eq!(view.color, INCONCLUSIVE_COLOR);
    }

    #[test]
    fn test_unchanged_view_is_not_redrawn() {
        let logger = Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()));
        let display = DeviceDisplayFake::new(logger);
        let mut render = Render::new(Arc::new(Mutex::new(display.clone())));
        let mut ready = ready();
        ready.mode = Mode::Webcam;
        ready.camera = CameraStatus::Ready {
            paused: false,
            fallback_used: false,
        };

        render.render(&State::Ready(ready.clone())).unwrap();
        render.render(&State::Ready(ready.clone())).unwrap();
        assert_eq!(display.history().len(), 1);

        ready.camera = CameraStatus::Ready {
            paused: true,
            fallback_used: false,
        };
        render.render(&State::Ready(ready)).unwrap();
        assert_eq!(display.history().len(), 2);
        assert_eq!(
            display.screen().controls.pause_label.as_deref(),
            Some("▶️ Resume")
        );
    }
}
