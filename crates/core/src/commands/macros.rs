//! Keyboard macros.

use std::collections::VecDeque;

use quill_keyboard::Chord;

use crate::{ChordSource, Error, Result, Session};

pub(crate) fn start_kbd_macro(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    if session.this_flags.defining_macro {
        return Err(Error::user("Already defining keyboard macro"));
    }
    session.macro_keys.clear();
    session.this_flags.defining_macro = true;
    session.set_message("Defining keyboard macro...");
    log::debug!("macro recording started");
    Ok(())
}

pub(crate) fn end_kbd_macro(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    if !session.this_flags.defining_macro {
        return Err(Error::user("Not defining kbd macro"));
    }
    session.this_flags.defining_macro = false;
    let keys = std::mem::take(&mut session.macro_keys);
    log::debug!("macro recorded ({} chords)", keys.len());
    session.last_macro = Some(keys);
    Ok(())
}

/// Replay the last macro `n` times through the normal dispatch cycle.
pub(crate) fn call_last_kbd_macro(session: &mut Session, _input: &mut dyn ChordSource, n: i32) -> Result<()> {
    if session.this_flags.defining_macro {
        return Err(Error::user("Can't execute anonymous macro while defining one"));
    }
    if session.executing_macro {
        return Err(Error::user("Keyboard macro is already executing"));
    }
    let keys = session
        .last_macro
        .clone()
        .ok_or_else(|| Error::user("No kbd macro has been defined"))?;

    session.executing_macro = true;
    let result = replay(session, &keys, n.max(1));
    session.executing_macro = false;
    result
}

fn replay(session: &mut Session, keys: &[Chord], times: i32) -> Result<()> {
    for _ in 0..times {
        let mut replay: VecDeque<Chord> = keys.iter().copied().collect();
        while !replay.is_empty() || session.has_pending_keys() {
            session.step(&mut replay)?;
            if session.should_quit() {
                return Ok(());
            }
        }
    }
    Ok(())
}
