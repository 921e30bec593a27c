use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::io;

/// Terminal event the editor reacts to
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press (or auto-repeat)
    Key(KeyEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Anything else (mouse, focus, paste, key release)
    Other,
}

/// Block until the next terminal event.
pub fn next() -> io::Result<Event> {
    Ok(match event::read()? {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Event::Key(key),
        CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
        _ => Event::Other,
    })
}
