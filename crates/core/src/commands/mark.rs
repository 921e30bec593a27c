//! The mark.

use crate::{ChordSource, Error, Result, Session};

pub(crate) fn set_mark_command(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let buffer = session.current_buffer_mut();
    buffer.set_mark(buffer.point());
    buffer.activate_mark();
    session.set_message("Mark set");
    Ok(())
}

pub(crate) fn exchange_point_and_mark(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let buffer = session.current_buffer_mut();
    let mark = buffer
        .mark()
        .ok_or_else(|| Error::user("No mark set in this buffer"))?;
    let point = buffer.point();
    buffer.set_mark(point);
    buffer.set_point(mark);
    buffer.activate_mark();
    Ok(())
}

pub(crate) fn mark_whole_buffer(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let buffer = session.current_buffer_mut();
    buffer.set_mark(buffer.size());
    buffer.set_point(0);
    buffer.activate_mark();
    session.set_message("Mark set");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use quill_buffer::EncodedText;
    use quill_config::EditorSettings;
    use quill_keyboard::{parse_sequence, Chord};

    use super::*;

    fn run(session: &mut Session, s: &str) {
        let mut input: VecDeque<Chord> = parse_sequence(s).unwrap().into();
        while !input.is_empty() || session.has_pending_keys() {
            session.step(&mut input).unwrap();
        }
    }

    #[test]
    fn test_exchange_point_and_mark() {
        let mut session = Session::new(EditorSettings::default(), 80, 24).unwrap();
        session.current_buffer_mut().set_text(EncodedText::new("abcdef"));

        run(&mut session, "C-x C-x");
        assert_eq!(session.message().unwrap().text, "No mark set in this buffer");

        run(&mut session, "C-f C-SPC C-e");
        assert_eq!(session.message().unwrap().text, "Mark set");
        run(&mut session, "C-x C-x");
        let buffer = session.current_buffer();
        assert_eq!((buffer.point(), buffer.mark()), (1, Some(6)));
        assert!(buffer.mark_active());
    }

    #[test]
    fn test_mark_whole_buffer() {
        let mut session = Session::new(EditorSettings::default(), 80, 24).unwrap();
        session.current_buffer_mut().set_text(EncodedText::new("one\ntwo"));
        run(&mut session, "C-e C-x h");

        let region = session.current_buffer().region().unwrap();
        assert_eq!((region.start, region.end, region.lines), (0, 7, 1));
        assert_eq!(session.current_buffer().point(), 0);
    }
}
