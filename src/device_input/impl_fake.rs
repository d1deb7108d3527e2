use crate::device_input::interface::{DeviceInput, UserAction};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Mutex;
use std::time::Duration;

/// Replays a fixed script of actions, each after its own delay.
pub struct DeviceInputFake {
    script: Mutex<Vec<(Duration, UserAction)>>,
}

impl DeviceInputFake {
    pub fn new(script: Vec<(Duration, UserAction)>) -> Self {
        Self {
            script: Mutex::new(script),
        }
    }
}

impl DeviceInput for DeviceInputFake {
    fn events(&self) -> Receiver<UserAction> {
        let (tx, rx) = channel();
        let script = std::mem::take(&mut *self.script.lock().unwrap());

        std::thread::spawn(move || {
            for (delay, action) in script {
                std::thread::sleep(delay);
                if tx.send(action).is_err() {
                    break;
                }
            }
        });

        rx
    }
}
