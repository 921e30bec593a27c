//! Point motion.

use quill_buffer::{Buffer, EncodedText};

use crate::display::{char_width, string_width};
use crate::{ChordSource, Error, Result, Session};

/// Offset one character after `offset`, treating a line marker as one
/// character. `None` at the end of the text.
pub(crate) fn next_char(text: &EncodedText, offset: usize) -> Option<usize> {
    if offset >= text.len() {
        None
    } else if offset == text.end_of_line(offset) {
        Some(text.next_line(offset).unwrap_or(text.len()))
    } else {
        Some(offset + 1)
    }
}

/// Offset one character before `offset`. `None` at the start.
pub(crate) fn prev_char(text: &EncodedText, offset: usize) -> Option<usize> {
    if offset == 0 {
        None
    } else if offset == text.start_of_line(offset) {
        Some(text.end_of_line(offset.saturating_sub(text.eol().len())))
    } else {
        Some(offset - 1)
    }
}

/// Offset `n` characters away from `offset` (backwards when negative),
/// or the boundary error if the text ends first.
pub(crate) fn char_offset(text: &EncodedText, offset: usize, n: i32) -> Result<usize> {
    let step: fn(&EncodedText, usize) -> Option<usize> = if n >= 0 { next_char } else { prev_char };
    (0..n.unsigned_abs()).try_fold(offset, |at, _| step(text, at).ok_or_else(|| boundary_error(n >= 0)))
}

fn step_point(buffer: &mut Buffer, step: fn(&EncodedText, usize) -> Option<usize>) -> bool {
    match step(buffer.text(), buffer.point()) {
        Some(offset) => {
            buffer.set_point(offset);
            true
        }
        None => false,
    }
}

/// Display column of point.
pub(crate) fn current_column(buffer: &Buffer) -> usize {
    let text = buffer.text();
    let point = buffer.point();
    let start = text.start_of_line(point);
    string_width(&text.as_bytes()[start..point], buffer.tab_width)
}

/// Put point on its line at the first offset reaching `goal` columns.
fn goto_column(buffer: &mut Buffer, goal: usize) {
    let offset = {
        let text = buffer.text();
        let start = text.start_of_line(buffer.point());
        let mut column = 0;
        let mut offset = start;
        for &byte in text.line(start) {
            if column >= goal {
                break;
            }
            column += char_width(byte, column, buffer.tab_width);
            offset += 1;
        }
        offset
    };
    buffer.set_point(offset);
}

fn boundary_error(forward: bool) -> Error {
    Error::user(if forward {
        "End of buffer"
    } else {
        "Beginning of buffer"
    })
}

fn move_chars(session: &mut Session, n: i32) -> Result<()> {
    let buffer = session.current_buffer_mut();
    for _ in 0..n.unsigned_abs() {
        let moved = if n >= 0 {
            step_point(buffer, next_char)
        } else {
            step_point(buffer, prev_char)
        };
        if !moved {
            return Err(boundary_error(n >= 0));
        }
    }
    Ok(())
}

fn move_lines(session: &mut Session, n: i32) -> Result<()> {
    if !session.last_flags.line_motion {
        session.goal_column = current_column(session.current_buffer());
    }
    session.this_flags.line_motion = true;

    let goal = session.goal_column;
    let buffer = session.current_buffer_mut();
    let mut moved = 0;
    let mut blocked = false;
    for _ in 0..n.unsigned_abs() {
        let point = buffer.point();
        let target = if n >= 0 {
            buffer.text().next_line(point)
        } else {
            buffer.text().prev_line(point)
        };
        match target {
            Some(offset) => {
                buffer.set_point(offset);
                moved += 1;
            }
            None => {
                blocked = true;
                break;
            }
        }
    }

    if moved > 0 {
        goto_column(buffer, goal);
    }
    if blocked {
        return Err(boundary_error(n >= 0));
    }
    Ok(())
}

pub(crate) fn forward_char(session: &mut Session, _input: &mut dyn ChordSource, n: i32) -> Result<()> {
    move_chars(session, n)
}

pub(crate) fn backward_char(session: &mut Session, _input: &mut dyn ChordSource, n: i32) -> Result<()> {
    move_chars(session, n.saturating_neg())
}

pub(crate) fn next_line(session: &mut Session, _input: &mut dyn ChordSource, n: i32) -> Result<()> {
    move_lines(session, n)
}

pub(crate) fn previous_line(session: &mut Session, _input: &mut dyn ChordSource, n: i32) -> Result<()> {
    move_lines(session, n.saturating_neg())
}

pub(crate) fn beginning_of_line(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let buffer = session.current_buffer_mut();
    let start = buffer.text().start_of_line(buffer.point());
    buffer.set_point(start);
    Ok(())
}

pub(crate) fn end_of_line(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let buffer = session.current_buffer_mut();
    let end = buffer.text().end_of_line(buffer.point());
    buffer.set_point(end);
    Ok(())
}

pub(crate) fn beginning_of_buffer(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    session.current_buffer_mut().set_point(0);
    Ok(())
}

pub(crate) fn end_of_buffer(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let buffer = session.current_buffer_mut();
    buffer.set_point(buffer.size());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use quill_buffer::EncodedText;
    use quill_config::EditorSettings;
    use quill_keyboard::{parse_sequence, Chord};

    use super::*;

    fn session_with(text: &[u8]) -> Session {
        let mut session = Session::new(EditorSettings::default(), 80, 24).unwrap();
        session.current_buffer_mut().set_text(EncodedText::new(text.to_vec()));
        session
    }

    fn run(session: &mut Session, s: &str) {
        let mut input: VecDeque<Chord> = parse_sequence(s).unwrap().into();
        while !input.is_empty() || session.has_pending_keys() {
            session.step(&mut input).unwrap();
        }
    }

    fn point(session: &Session) -> usize {
        session.current_buffer().point()
    }

    #[test]
    fn test_char_motion_crosses_crlf() {
        let mut session = session_with(b"ab\r\ncd");
        run(&mut session, "C-e");
        assert_eq!(point(&session), 2);
        run(&mut session, "C-f");
        assert_eq!(point(&session), 4);
        run(&mut session, "C-b");
        assert_eq!(point(&session), 2);
    }

    #[test]
    fn test_char_motion_stops_at_edges() {
        let mut session = session_with(b"ab");
        run(&mut session, "C-b");
        assert_eq!(point(&session), 0);
        assert_eq!(session.message().unwrap().text, "Beginning of buffer");

        run(&mut session, "C-u 5 C-f");
        assert_eq!(point(&session), 2);
        assert_eq!(session.message().unwrap().text, "End of buffer");
    }

    #[test]
    fn test_line_motion_keeps_goal_column() {
        let mut session = session_with(b"abcdef\nab\nabcdef");
        run(&mut session, "C-f C-f C-f C-f");
        run(&mut session, "C-n");
        assert_eq!(point(&session), 9);
        run(&mut session, "C-n");
        assert_eq!(point(&session), 14);
        run(&mut session, "C-p C-p");
        assert_eq!(point(&session), 4);
    }

    #[test]
    fn test_line_motion_over_tab() {
        let mut session = session_with(b"\tx\nabcdefghij");
        run(&mut session, "C-n C-e C-b C-b C-p");
        // Column 8 on the first line is just past the tab
        assert_eq!(point(&session), 1);
    }

    #[test]
    fn test_line_motion_at_last_line() {
        let mut session = session_with(b"one\ntwo");
        run(&mut session, "C-n C-f C-n");
        assert_eq!(point(&session), 5);
        assert_eq!(session.message().unwrap().text, "End of buffer");
    }

    #[test]
    fn test_line_and_buffer_edges() {
        let mut session = session_with(b"one\ntwo\nthree");
        run(&mut session, "C-n C-e");
        assert_eq!(point(&session), 7);
        run(&mut session, "C-a");
        assert_eq!(point(&session), 4);
        run(&mut session, "M->");
        assert_eq!(point(&session), 13);
        run(&mut session, "M-<");
        assert_eq!(point(&session), 0);
    }
}
