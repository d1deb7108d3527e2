use super::main::WasteSorter;
use super::render::Render;
use crate::device_input::interface::UserAction;
use crate::error::Error;
use crate::waste_sorter::core::{init, transition, Msg, State};

impl WasteSorter {
    /// Runs the controller until the user quits. Returns the last state.
    pub fn run(&self) -> Result<State, Error> {
        let mut render = Render::new(self.device_display.clone());
        self.device_display
            .lock()
            .unwrap()
            .init()
            .map_err(|e| Error::Device(format!("display: {}", e)))?;

        let (mut current_state, effects) = init(&self.config);
        self.render_logged(&mut render, &current_state);
        self.execute_effects(effects);

        loop {
            let msg = match self.event_receiver.lock().unwrap().recv() {
                Ok(msg) => msg,
                Err(_) => break,
            };

            if matches!(msg, Msg::User(UserAction::Quit)) {
                let _ = self.logger.info("Quit requested");
                break;
            }

            if !msg.is_routine() {
                let _ = self
                    .logger
                    .info(&format!("msg: {}", msg.to_display_string()));
            }

            let (new_state, effects) = transition(&self.config, current_state, msg);
            current_state = new_state;

            self.render_logged(&mut render, &current_state);
            self.execute_effects(effects);
        }

        self.shutdown();
        Ok(current_state)
    }

    fn render_logged(&self, render: &mut Render, state: &State) {
        if let Err(e) = render.render(state) {
            let _ = self.logger.error(&format!("Render failed: {}", e));
        }
    }

    fn shutdown(&self) {
        self.stop_capture_loop();
        if let Some(session) = self.camera_session.lock().unwrap().take() {
            if let Err(e) = session.close() {
                let _ = self.logger.warn(&format!("Could not close camera: {}", e));
            }
        }
        let _ = self.logger.info("Stopped");
    }
}
