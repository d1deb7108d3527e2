use crate::device_input::interface::{DeviceInput, UserAction};
use crate::library::logger::interface::Logger;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

pub struct DeviceInputConsole {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceInputConsole {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("input").with_namespace("console"),
        }
    }
}

pub fn parse_command(line: &str) -> Option<UserAction> {
    let line = line.trim();
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "w" | "webcam" => Some(UserAction::SelectWebcam),
        "u" | "upload" => Some(UserAction::SelectUpload),
        "p" | "pause" | "resume" => Some(UserAction::TogglePause),
        "c" | "classify" => Some(UserAction::Classify),
        "q" | "quit" | "exit" => Some(UserAction::Quit),
        "f" | "file" if argument.is_empty() => Some(UserAction::SelectFile(None)),
        "f" | "file" => Some(UserAction::SelectFile(Some(PathBuf::from(argument)))),
        _ => None,
    }
}

impl DeviceInput for DeviceInputConsole {
    fn events(&self) -> Receiver<UserAction> {
        let (tx, rx) = channel();
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        let _ = logger.error(&format!("Could not read stdin: {}", e));
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(action) => {
                        if tx.send(action).is_err() {
                            break;
                        }
                    }
                    None => {
                        let _ = logger.warn(&format!("Unknown command '{}'", line.trim()));
                    }
                }
            }
            // stdin closed
            let _ = tx.send(UserAction::Quit);
        });

        rx
    }
}
