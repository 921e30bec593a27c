//! Blocking chord input.

use std::collections::VecDeque;

use quill_keyboard::Chord;

use crate::Result;

/// A source of chords.
///
/// `read_chord` blocks until a chord is available. `echo` is the text the
/// echo area should show while waiting (empty for none).
pub trait ChordSource {
    fn read_chord(&mut self, echo: &str) -> Result<Chord>;
}

/// Scripted input. An exhausted queue yields [`Chord::CANCEL`], so a
/// command waiting for more input aborts instead of blocking.
impl ChordSource for VecDeque<Chord> {
    fn read_chord(&mut self, _echo: &str) -> Result<Chord> {
        Ok(self.pop_front().unwrap_or(Chord::CANCEL))
    }
}
