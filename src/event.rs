use crossterm::event::{self, Event, KeyEvent};

pub enum AppEvent {
    Key(KeyEvent),
    Resize(#[allow(dead_code)] u16, #[allow(dead_code)] u16),
}

/// Blocking terminal event source. Events other than keys and resizes are
/// skipped.
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        loop {
            match event::read()? {
                Event::Key(key) => return Ok(AppEvent::Key(key)),
                Event::Resize(w, h) => return Ok(AppEvent::Resize(w, h)),
                _ => {}
            }
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
