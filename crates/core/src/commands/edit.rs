//! Insertion, deletion and buffer mode toggles.

use quill_buffer::Buffer;
use quill_keyboard::Chord;

use crate::display::char_width;
use crate::{ChordSource, Error, Result, Session};

use super::{check_writable, motion};

/// Byte a chord stands for when inserted literally.
fn chord_byte(chord: Chord) -> Option<u8> {
    match chord {
        Chord::TAB => Some(b'\t'),
        Chord::RET => Some(b'\r'),
        _ if chord.is_meta() => None,
        _ if chord.is_ctrl() => {
            let base = chord.base();
            (base < 0x100).then(|| (base as u8) & 0x1f)
        }
        _ => (chord.code() < 0x100).then(|| chord.low_byte()),
    }
}

/// Break the current line at the last space before `fill_column`.
fn fill_break_line(buffer: &mut Buffer, fill_column: usize) {
    let point = buffer.point();
    let start = buffer.text().start_of_line(point);
    let mut column = 0;
    let mut break_at = None;
    for (i, &byte) in buffer.text().as_bytes()[start..point].iter().enumerate() {
        if byte == b' ' && i > 0 && column <= fill_column {
            break_at = Some(start + i);
        }
        column += char_width(byte, column, buffer.tab_width);
    }

    if column <= fill_column {
        return;
    }
    if let Some(pos) = break_at {
        let tail = point - pos - 1;
        buffer.delete(pos, 1);
        buffer.set_point(pos);
        buffer.insert_newline();
        let after = buffer.point() + tail;
        buffer.set_point(after);
    }
}

fn insert_char(buffer: &mut Buffer, byte: u8) {
    if buffer.flags.overwrite {
        let point = buffer.point();
        if point != buffer.text().end_of_line(point) {
            buffer.delete(point, 1);
        }
    }
    buffer.insert_bytes(&[byte]);
}

pub(crate) fn self_insert_command(session: &mut Session, _input: &mut dyn ChordSource, n: i32) -> Result<()> {
    check_writable(session)?;
    let Some(key) = session.last_key() else {
        return Ok(());
    };
    let byte = if key == Chord::TAB {
        b'\t'
    } else {
        let code = key.code() & !Chord::CTRL;
        if code > 0xff {
            return Ok(());
        }
        code as u8
    };

    let fill_column = session.settings.fill_column;
    let buffer = session.current_buffer_mut();
    buffer.deactivate_mark();
    for _ in 0..n.max(0) {
        if byte == b' ' && buffer.flags.auto_fill {
            fill_break_line(buffer, fill_column);
        }
        insert_char(buffer, byte);
    }
    Ok(())
}

pub(crate) fn newline(session: &mut Session, _input: &mut dyn ChordSource, n: i32) -> Result<()> {
    check_writable(session)?;
    let buffer = session.current_buffer_mut();
    buffer.deactivate_mark();
    for _ in 0..n.max(0) {
        buffer.insert_newline();
    }
    Ok(())
}

/// Delete `n` characters after point (before it when negative). A line
/// marker counts as one character. Nothing is deleted unless all `n` are
/// there.
fn delete_chars(session: &mut Session, n: i32) -> Result<()> {
    check_writable(session)?;
    let buffer = session.current_buffer_mut();
    let point = buffer.point();
    let other = motion::char_offset(buffer.text(), point, n)?;
    buffer.deactivate_mark();
    buffer.delete(point.min(other), point.abs_diff(other));
    Ok(())
}

pub(crate) fn delete_char(session: &mut Session, _input: &mut dyn ChordSource, n: i32) -> Result<()> {
    delete_chars(session, n)
}

pub(crate) fn backward_delete_char(session: &mut Session, _input: &mut dyn ChordSource, n: i32) -> Result<()> {
    delete_chars(session, n.saturating_neg())
}

pub(crate) fn delete_region(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let region = session
        .current_buffer()
        .region()
        .ok_or_else(|| Error::user("The mark is not set now"))?;
    check_writable(session)?;

    let buffer = session.current_buffer_mut();
    buffer.delete(region.start, region.len());
    buffer.deactivate_mark();
    Ok(())
}

fn octal_digit(chord: Chord) -> Option<u8> {
    match chord.printable() {
        Some(byte @ b'0'..=b'7') => Some(byte - b'0'),
        _ => None,
    }
}

pub(crate) fn quoted_insert(session: &mut Session, input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    check_writable(session)?;

    let first = session.read_key(input, "C-q-")?;
    let byte = match octal_digit(first) {
        None => chord_byte(first),
        Some(c1) => {
            let second = session.read_key(input, &format!("C-q {}-", c1))?;
            match octal_digit(second) {
                None => {
                    session.unread_key(second);
                    Some(c1)
                }
                Some(c2) => {
                    let third = session.read_key(input, &format!("C-q {} {}-", c1, c2))?;
                    match octal_digit(third) {
                        None => {
                            session.unread_key(third);
                            Some(c1 * 8 + c2)
                        }
                        // Three digits can exceed a byte; the high bit is dropped
                        Some(c3) => Some(((u32::from(c1) * 64 + u32::from(c2) * 8 + u32::from(c3)) & 0xff) as u8),
                    }
                }
            }
        }
    };

    if let Some(byte) = byte {
        let buffer = session.current_buffer_mut();
        buffer.deactivate_mark();
        insert_char(buffer, byte);
    }
    Ok(())
}

pub(crate) fn toggle_read_only(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let flags = &mut session.current_buffer_mut().flags;
    flags.read_only = !flags.read_only;
    Ok(())
}

pub(crate) fn overwrite_mode(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let flags = &mut session.current_buffer_mut().flags;
    flags.overwrite = !flags.overwrite;
    Ok(())
}

pub(crate) fn auto_fill_mode(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let flags = &mut session.current_buffer_mut().flags;
    flags.auto_fill = !flags.auto_fill;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use quill_buffer::EncodedText;
    use quill_config::EditorSettings;
    use quill_keyboard::parse_sequence;

    use super::*;

    fn session_with(settings: EditorSettings, text: &[u8]) -> Session {
        let mut session = Session::new(settings, 80, 24).unwrap();
        session.current_buffer_mut().set_text(EncodedText::new(text.to_vec()));
        session
    }

    fn run(session: &mut Session, s: &str) {
        let mut input: VecDeque<Chord> = parse_sequence(s).unwrap().into();
        while !input.is_empty() || session.has_pending_keys() {
            session.step(&mut input).unwrap();
        }
    }

    fn text(session: &Session) -> &[u8] {
        session.current_buffer().text().as_bytes()
    }

    #[test]
    fn test_chord_byte() {
        assert_eq!(chord_byte(Chord::ctrl(b'a')), Some(1));
        assert_eq!(chord_byte(Chord::ctrl(b'@')), Some(0));
        assert_eq!(chord_byte(Chord::TAB), Some(9));
        assert_eq!(chord_byte(Chord::key(b'x')), Some(b'x'));
        assert_eq!(chord_byte(Chord::LEFT), None);
        assert_eq!(chord_byte(Chord::key(b'x').with_meta()), None);
    }

    #[test]
    fn test_tab_inserts_tab() {
        let mut session = session_with(EditorSettings::default(), b"");
        run(&mut session, "TAB x");
        assert_eq!(text(&session), b"\tx");
    }

    #[test]
    fn test_delete_char_removes_whole_marker() {
        let mut session = session_with(EditorSettings::default(), b"ab\r\ncd");
        run(&mut session, "C-e C-d");
        assert_eq!(text(&session), b"abcd");

        let mut session = session_with(EditorSettings::default(), b"ab\r\ncd");
        run(&mut session, "C-n DEL");
        assert_eq!(text(&session), b"abcd");
        assert_eq!(session.current_buffer().point(), 2);
    }

    #[test]
    fn test_delete_at_edges() {
        let mut session = session_with(EditorSettings::default(), b"ab");
        run(&mut session, "DEL");
        assert_eq!(session.message().unwrap().text, "Beginning of buffer");
        run(&mut session, "M-> C-d");
        assert_eq!(session.message().unwrap().text, "End of buffer");
        assert_eq!(text(&session), b"ab");
    }

    #[test]
    fn test_delete_past_edge_deletes_nothing() {
        let mut session = session_with(EditorSettings::default(), b"abcd");
        run(&mut session, "C-f C-f C-u 5 C-d");
        assert_eq!(session.message().unwrap().text, "End of buffer");
        assert_eq!(text(&session), b"abcd");

        run(&mut session, "C-u 3 DEL");
        assert_eq!(session.message().unwrap().text, "Beginning of buffer");
        assert_eq!(text(&session), b"abcd");

        run(&mut session, "C-u 2 C-d");
        assert_eq!(text(&session), b"ab");
        assert_eq!(session.current_buffer().point(), 2);
    }

    #[test]
    fn test_delete_region() {
        let mut session = session_with(EditorSettings::default(), b"hello world");
        run(&mut session, "C-w");
        assert_eq!(session.message().unwrap().text, "The mark is not set now");

        run(&mut session, "C-SPC C-f C-f C-f C-f C-f C-f C-w");
        assert_eq!(text(&session), b"world");
        assert_eq!(session.current_buffer().point(), 0);
    }

    #[test]
    fn test_quoted_insert() {
        let mut session = session_with(EditorSettings::default(), b"");
        run(&mut session, "C-q C-a");
        assert_eq!(text(&session), b"\x01");

        let mut session = session_with(EditorSettings::default(), b"");
        run(&mut session, "C-q 1 0 1");
        assert_eq!(text(&session), b"A");

        // A non-digit ends the code and is then processed normally
        let mut session = session_with(EditorSettings::default(), b"");
        run(&mut session, "C-q 1 2 z");
        assert_eq!(text(&session), b"\nz");
    }

    #[test]
    fn test_overwrite_mode() {
        let mut session = session_with(EditorSettings::default(), b"abc\ndef");
        run(&mut session, "<insert> x y z w");
        assert_eq!(text(&session), b"xyzw\ndef");
        run(&mut session, "<insert> C-n v");
        assert_eq!(text(&session), b"xyzw\ndefv");
    }

    #[test]
    fn test_auto_fill_breaks_at_last_space() {
        let settings = EditorSettings {
            fill_column: 10,
            ..EditorSettings::default()
        };
        let mut session = session_with(settings, b"");
        session.current_buffer_mut().flags.auto_fill = true;
        run(&mut session, "a a a a SPC b b b b SPC c c c c SPC d");
        assert_eq!(text(&session), b"aaaa bbbb\ncccc d");
        assert_eq!(session.current_buffer().point(), 16);
    }

    #[test]
    fn test_mode_toggles() {
        let mut session = session_with(EditorSettings::default(), b"");
        let mut input: VecDeque<Chord> = VecDeque::new();
        session.execute("auto-fill-mode", &mut input, 1).unwrap();
        assert!(session.current_buffer().flags.auto_fill);
        session.execute("auto-fill-mode", &mut input, 1).unwrap();
        assert!(!session.current_buffer().flags.auto_fill);

        run(&mut session, "C-x C-q");
        assert!(session.current_buffer().flags.read_only);
        run(&mut session, "C-x C-q a");
        assert_eq!(text(&session), b"a");
    }
}
