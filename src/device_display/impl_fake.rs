use crate::device_display::interface::{Controls, DeviceDisplay};
use crate::disposal_catalog::Color;
use crate::library::logger::interface::Logger;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// What the fake display currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    pub lines: Vec<String>,
    pub color: Option<Color>,
    pub controls: Controls,
}

impl Screen {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Clone)]
pub struct DeviceDisplayFake {
    logger: Arc<dyn Logger + Send + Sync>,
    screen: Arc<Mutex<Screen>>,
    history: Arc<Mutex<Vec<Screen>>>,
}

impl DeviceDisplayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("display").with_namespace("fake"),
            screen: Arc::new(Mutex::new(Screen::default())),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen.lock().unwrap().clone()
    }

    /// Every completed frame, oldest first.
    pub fn history(&self) -> Vec<Screen> {
        self.history.lock().unwrap().clone()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger.info("DeviceDisplayFake::init()")?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut screen = self.screen.lock().unwrap();
        screen.lines = vec![String::new(); self.num_lines() as usize];
        screen.color = None;
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.logger
            .info(&format!("DeviceDisplayFake::write_line({}, {})", line, text))?;
        if line >= self.num_lines() {
            return Err("Invalid line number".into());
        }
        let mut screen = self.screen.lock().unwrap();
        if screen.lines.len() <= line as usize {
            screen.lines.resize(line as usize + 1, String::new());
        }
        screen.lines[line as usize] = text.to_string();
        Ok(())
    }

    fn set_color(&mut self, color: Color) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screen.lock().unwrap().color = Some(color);
        Ok(())
    }

    fn set_controls(&mut self, controls: &Controls) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut screen = self.screen.lock().unwrap();
        screen.controls = controls.clone();
        self.history.lock().unwrap().push(screen.clone());
        Ok(())
    }
}
