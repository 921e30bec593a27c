//! The real terminal: frame output and blocking chord input.

use std::io::{self, Stdout, Write};

use log::debug;
use quill_core::{ChordSource, Session};
use quill_keyboard::{chord_from_key_event, Chord};
use quill_ui_render::{redisplay, BufferTerm, Cursor};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, Frame, Terminal};

use crate::event::{self, Event};

/// Top-level input, read before a command starts.
pub enum Input {
    Chord(Chord),
    Resize(u16, u16),
}

pub struct Screen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Cells of the last full redisplay, repainted under echo prompts
    last_frame: Buffer,
    /// Chord read at top level, handed to the next `read_chord`
    queued: Option<Chord>,
    /// Size change seen while a command was reading input
    resized: Option<(u16, u16)>,
}

impl Screen {
    pub fn new(terminal: Terminal<CrosstermBackend<Stdout>>) -> Self {
        Self {
            terminal,
            last_frame: Buffer::empty(Rect::default()),
            queued: None,
            resized: None,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Redraw the whole screen from `session`.
    pub fn draw_session(&mut self, session: &Session) -> io::Result<()> {
        let completed = self.terminal.draw(|frame| {
            let cursor = redisplay(&mut BufferTerm::new(frame.buffer_mut()), session, None);
            place_cursor(frame, cursor);
        })?;
        self.last_frame = completed.buffer.clone();
        Ok(())
    }

    /// Repaint the last frame with `prompt` in the echo area.
    fn draw_prompt(&mut self, prompt: &str) -> io::Result<()> {
        let last = &self.last_frame;
        self.terminal.draw(|frame| {
            let shared = frame.area().intersection(last.area);
            let buf = frame.buffer_mut();
            for y in shared.top()..shared.bottom() {
                for x in shared.left()..shared.right() {
                    buf[(x, y)] = last[(x, y)].clone();
                }
            }
            let cursor = quill_ui_render::echo(&mut BufferTerm::new(buf), prompt);
            place_cursor(frame, cursor);
        })?;
        Ok(())
    }

    /// Ring the terminal bell.
    pub fn ding(&mut self) -> io::Result<()> {
        let backend = self.terminal.backend_mut();
        backend.write_all(b"\x07")?;
        Write::flush(backend)
    }

    /// Wait for the chord that starts the next command, or a resize.
    pub fn next_input(&mut self) -> io::Result<Input> {
        loop {
            match event::next()? {
                Event::Key(key) => {
                    if let Some(chord) = chord_from_key_event(key) {
                        return Ok(Input::Chord(chord));
                    }
                    debug!("ignoring key {:?}", key.code);
                }
                Event::Resize(width, height) => return Ok(Input::Resize(width, height)),
                Event::Other => {}
            }
        }
    }

    /// Make `chord` the next chord returned by `read_chord`.
    pub fn queue(&mut self, chord: Chord) {
        self.queued = Some(chord);
    }

    /// Size change seen during the last command, if any.
    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }
}

impl ChordSource for Screen {
    fn read_chord(&mut self, echo: &str) -> quill_core::Result<Chord> {
        if let Some(chord) = self.queued.take() {
            return Ok(chord);
        }
        if !echo.is_empty() {
            self.draw_prompt(echo)?;
        }

        loop {
            match event::next()? {
                Event::Key(key) => {
                    if let Some(chord) = chord_from_key_event(key) {
                        return Ok(chord);
                    }
                }
                Event::Resize(width, height) => {
                    self.resized = Some((width, height));
                    if !echo.is_empty() {
                        self.draw_prompt(echo)?;
                    }
                }
                Event::Other => {}
            }
        }
    }
}

fn place_cursor(frame: &mut Frame, cursor: Cursor) {
    frame.set_cursor_position((cursor.col as u16, cursor.row as u16));
}
