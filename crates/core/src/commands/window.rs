//! Window commands.

use crate::{ChordSource, Error, Result, Session};

pub(crate) fn split_window(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let buffer = session.current_buffer();
    let point = buffer.point();
    let line = buffer.text().line_number(point);

    match session.layout.split(line) {
        Ok(index) => {
            session.layout.window_mut(index).saved_point = point;
            Ok(())
        }
        Err(Error::TooSmallWindow { height, .. }) => Err(Error::user(format!(
            "Window height {} too small for splitting",
            height
        ))),
        Err(e) => Err(e),
    }
}

pub(crate) fn delete_window(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let focus = session.layout.focus();
    if session.layout.delete(focus).is_none() {
        return Err(Error::user("Attempt to delete sole ordinary window"));
    }
    session.adopt_window_point();
    Ok(())
}

pub(crate) fn delete_other_windows(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    session.layout.delete_others();
    Ok(())
}

pub(crate) fn other_window(session: &mut Session, _input: &mut dyn ChordSource, n: i32) -> Result<()> {
    let target = session.layout.cycle(session.layout.focus(), n);
    session.set_focus(target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use quill_config::EditorSettings;
    use quill_keyboard::{parse_sequence, Chord};

    use super::*;

    fn run(session: &mut Session, s: &str) {
        let mut input: VecDeque<Chord> = parse_sequence(s).unwrap().into();
        while !input.is_empty() || session.has_pending_keys() {
            session.step(&mut input).unwrap();
        }
    }

    fn heights(session: &Session) -> Vec<usize> {
        session.windows().iter().map(|w| w.fheight).collect()
    }

    #[test]
    fn test_split_until_too_small() {
        let mut session = Session::new(EditorSettings::default(), 80, 9).unwrap();
        assert_eq!(heights(&session), vec![8]);

        run(&mut session, "C-x 2");
        assert_eq!(heights(&session), vec![4, 4]);
        run(&mut session, "C-x 2");
        assert_eq!(heights(&session), vec![2, 2, 4]);
        run(&mut session, "C-x 2");
        assert_eq!(heights(&session), vec![2, 2, 4]);
        assert_eq!(
            session.message().unwrap().text,
            "Window height 2 too small for splitting"
        );
    }

    #[test]
    fn test_delete_window_gives_rows_up() {
        let mut session = Session::new(EditorSettings::default(), 80, 25).unwrap();
        run(&mut session, "C-x 0");
        assert_eq!(
            session.message().unwrap().text,
            "Attempt to delete sole ordinary window"
        );

        run(&mut session, "C-x 2 C-x o C-x 0");
        assert_eq!(heights(&session), vec![24]);
        assert_eq!(session.focus(), 0);
    }

    #[test]
    fn test_delete_other_windows() {
        let mut session = Session::new(EditorSettings::default(), 80, 25).unwrap();
        run(&mut session, "C-x 2 C-x 2 C-x o C-x 1");
        assert_eq!(heights(&session), vec![24]);
        assert_eq!(session.focus(), 0);
    }

    #[test]
    fn test_other_window_wraps() {
        let mut session = Session::new(EditorSettings::default(), 80, 25).unwrap();
        run(&mut session, "C-x 2 C-x 2");
        run(&mut session, "C-u 2 C-x o");
        assert_eq!(session.focus(), 2);
        run(&mut session, "C-x o");
        assert_eq!(session.focus(), 0);
        run(&mut session, "C-u - C-x o");
        assert_eq!(session.focus(), 2);
    }
}
