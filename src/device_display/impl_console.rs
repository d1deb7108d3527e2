use crate::device_display::interface::{Controls, DeviceDisplay};
use crate::disposal_catalog::Color;
use crate::waste_sorter::render::DEFAULT_TEXT_COLOR;
use std::error::Error;

const WIDTH: usize = 48;

pub struct DeviceDisplayConsole {
    lines: Vec<String>,
    color: Color,
    controls: Controls,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new(); 3],
            color: DEFAULT_TEXT_COLOR,
            controls: Controls::default(),
        }
    }

    fn controls_line(&self) -> String {
        let mut parts = Vec::new();
        if self.controls.modes_enabled {
            let mark = |active: bool| if active { "*" } else { " " };
            parts.push(format!("[{}w]ebcam", mark(self.controls.webcam_active)));
            parts.push(format!("[{}u]pload", mark(self.controls.upload_active)));
        }
        if let Some(label) = &self.controls.pause_label {
            parts.push(format!("[p] {}", label));
        }
        if self.controls.upload_active {
            parts.push("[f]ile <path>".to_string());
            if self.controls.classify_enabled {
                parts.push("[c]lassify".to_string());
            }
        }
        parts.push("[q]uit".to_string());
        parts.join("  ")
    }

    fn render_display(&self) {
        println!("┌{}┐ {}", "─".repeat(WIDTH), self.color);
        for line in &self.lines {
            let text: String = line.chars().take(WIDTH).collect();
            let padding = WIDTH.saturating_sub(text.chars().count());
            println!("│{}{}│", text, " ".repeat(padding));
        }
        println!("└{}┘", "─".repeat(WIDTH));
        println!("{}", self.controls_line());
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.render_display();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.lines = vec![String::new(); self.num_lines() as usize];
        self.color = DEFAULT_TEXT_COLOR;
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        if line >= self.num_lines() {
            return Err("Invalid line number".into());
        }
        self.lines[line as usize] = text.to_string();
        Ok(())
    }

    fn set_color(&mut self, color: Color) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.color = color;
        Ok(())
    }

    // controls are written last by the renderer, so the frame is drawn here
    fn set_controls(&mut self, controls: &Controls) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.controls = controls.clone();
        self.render_display();
        Ok(())
    }
}
