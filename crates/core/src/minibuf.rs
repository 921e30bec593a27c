//! Line reads in the echo area.

use quill_keyboard::Chord;

use crate::{ChordSource, Result, Session};

impl Session {
    /// Read a line after `prompt`, starting from `initial`.
    ///
    /// `RET` accepts, `DEL` and `<backspace>` erase, and the cancel chord
    /// gives up with "Quit" (`Ok(None)`).
    pub fn read_string(
        &mut self,
        input: &mut dyn ChordSource,
        prompt: &str,
        initial: &str,
    ) -> Result<Option<String>> {
        let mut text = initial.to_string();
        loop {
            let echo = format!("{}{}", prompt, text);
            match self.read_key(input, &echo)? {
                Chord::RET => return Ok(Some(text)),
                Chord::CANCEL => {
                    self.set_error("Quit");
                    return Ok(None);
                }
                Chord::BACKSPACE => {
                    text.pop();
                }
                key if key == Chord::key(0x7f) => {
                    text.pop();
                }
                key => {
                    if let Some(byte) = key.printable() {
                        text.push(char::from(byte));
                    }
                }
            }
        }
    }

    /// Ask a y/n question with a single chord. `Ok(None)` when cancelled.
    pub fn read_y_or_n(&mut self, input: &mut dyn ChordSource, prompt: &str) -> Result<Option<bool>> {
        let mut echo = prompt.to_string();
        loop {
            let key = self.read_key(input, &echo)?;
            if key == Chord::CANCEL {
                self.set_error("Quit");
                return Ok(None);
            }
            match key.printable() {
                Some(b'y' | b'Y') => return Ok(Some(true)),
                Some(b'n' | b'N') => return Ok(Some(false)),
                _ => echo = format!("Please answer y or n.  {}", prompt),
            }
        }
    }

    /// Ask a question that must be answered `yes` or `no` in full.
    pub fn read_yes_or_no(&mut self, input: &mut dyn ChordSource, prompt: &str) -> Result<Option<bool>> {
        let mut question = format!("{}(yes or no) ", prompt);
        loop {
            match self.read_string(input, &question, "")?.as_deref() {
                None => return Ok(None),
                Some("yes") => return Ok(Some(true)),
                Some("no") => return Ok(Some(false)),
                Some(_) => question = format!("Please answer yes or no.  {}(yes or no) ", prompt),
            }
        }
    }
}
