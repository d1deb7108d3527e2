use crate::device_display::interface::{Controls, DeviceDisplay};
use crate::disposal_catalog::Color;
use crate::waste_sorter::render::DEFAULT_TEXT_COLOR;
use eframe::egui;
#[cfg(target_os = "linux")]
use winit::platform::x11::EventLoopBuilderExtX11;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Clone)]
struct Panel {
    lines: Vec<String>,
    color: Color,
    controls: Controls,
}

#[derive(Clone)]
struct DisplayWindow {
    panel: Arc<Mutex<Panel>>,
}

fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let panel = match self.panel.lock() {
            Ok(panel) => panel.clone(),
            Err(_) => return,
        };

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mode = |ui: &mut egui::Ui, label: &str, active: bool| {
                    ui.add_enabled(
                        panel.controls.modes_enabled,
                        egui::SelectableLabel::new(active, label),
                    );
                };
                mode(ui, "📷 Webcam", panel.controls.webcam_active);
                mode(ui, "🖼 Upload", panel.controls.upload_active);
                if let Some(label) = &panel.controls.pause_label {
                    ui.label(label);
                }
                if panel.controls.upload_active {
                    ui.add_enabled(panel.controls.classify_enabled, egui::Button::new("Classify"));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);

                let rect = ui.available_rect_before_wrap();
                ui.painter()
                    .rect_stroke(rect, 4.0, egui::Stroke::new(2.0, to_color32(panel.color)));

                for (i, line) in panel.lines.iter().enumerate() {
                    let size = if i == 0 { 22.0 } else { 17.0 };
                    ui.label(
                        egui::RichText::new(line)
                            .color(to_color32(panel.color))
                            .size(size),
                    );
                }
            });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

/// Mirrors the result area in a native window. Input still comes from the
/// console.
pub struct DeviceDisplayGui {
    panel: Arc<Mutex<Panel>>,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            panel: Arc::new(Mutex::new(Panel {
                lines: vec![String::new(); 3],
                color: DEFAULT_TEXT_COLOR,
                controls: Controls::default(),
            })),
        }
    }
}

/// The window runs off the main thread, which winit refuses on Linux unless
/// the event loop is built with `any_thread`.
fn native_options() -> eframe::NativeOptions {
    #[allow(unused_mut)]
    let mut options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 260.0])
            .with_resizable(true),
        ..Default::default()
    };

    #[cfg(target_os = "linux")]
    {
        options.event_loop_builder = Some(Box::new(|builder| {
            // the flag is shared by the X11 and Wayland backends
            builder.with_any_thread(true);
        }));
    }

    options
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let panel = self.panel.clone();

        // Spawn the window in a separate thread
        thread::spawn(move || {
            let options = native_options();
            let window = DisplayWindow { panel };

            // This will block in the new thread until the window is closed
            let _ = eframe::run_native("Waste Sorter", options, Box::new(|_cc| Box::new(window)));
        });

        Ok(())
    }

    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut panel = self.panel.lock().map_err(|e| e.to_string())?;
        panel.lines = vec![String::new(); self.num_lines() as usize];
        panel.color = DEFAULT_TEXT_COLOR;
        Ok(())
    }

    fn write_line(&mut self, line: u8, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        if line >= self.num_lines() {
            return Err("Invalid line number".into());
        }

        let mut panel = self.panel.lock().map_err(|e| e.to_string())?;
        panel.lines[line as usize] = text.to_string();
        Ok(())
    }

    fn set_color(&mut self, color: Color) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.panel.lock().map_err(|e| e.to_string())?.color = color;
        Ok(())
    }

    fn set_controls(&mut self, controls: &Controls) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.panel.lock().map_err(|e| e.to_string())?.controls = controls.clone();
        Ok(())
    }
}
