//! Keyboard handling for quill.
//!
//! This crate provides the [`Chord`] value type, the textual chord grammar
//! used by binding tables (`"C-x C-f"`, `"M-%"`), and translation of
//! crossterm key events into chords.

mod chord;
mod parse;

pub use chord::{is_printable, sequence_to_string, Chord};
pub use parse::{parse_chord, parse_sequence, KeyParseError};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Translate a terminal key event into a chord.
///
/// Returns `None` for keys that have no chord code (non-ASCII characters,
/// media keys, function keys past F12).
pub fn chord_from_key_event(key: KeyEvent) -> Option<Chord> {
    let mut chord = match key.code {
        KeyCode::Char(ch) if ch.is_ascii() => {
            let byte = ch as u8;
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                Chord::ctrl(byte)
            } else {
                Chord::key(byte)
            }
        }
        KeyCode::Tab => Chord::TAB,
        KeyCode::Enter => Chord::RET,
        KeyCode::Esc => Chord::ESC,
        KeyCode::Backspace => Chord::BACKSPACE,
        KeyCode::Delete => Chord::DELETE,
        KeyCode::Insert => Chord::INSERT,
        KeyCode::Home => Chord::HOME,
        KeyCode::End => Chord::END,
        KeyCode::PageUp => Chord::PAGE_UP,
        KeyCode::PageDown => Chord::PAGE_DOWN,
        KeyCode::Left => Chord::LEFT,
        KeyCode::Right => Chord::RIGHT,
        KeyCode::Up => Chord::UP,
        KeyCode::Down => Chord::DOWN,
        KeyCode::F(n) if (1..=12).contains(&n) => Chord::function(n),
        _ => return None,
    };

    // Char keys already carry CTRL through Chord::ctrl
    if key.modifiers.contains(KeyModifiers::CONTROL) && !matches!(key.code, KeyCode::Char(_)) {
        chord = chord.with_ctrl();
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        chord = chord.with_meta();
    }

    Some(chord)
}
