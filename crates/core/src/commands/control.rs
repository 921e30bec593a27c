//! Numeric arguments, quitting and running commands by name.

use quill_keyboard::Chord;

use crate::{ChordSource, Result, Session};

/// Read a numeric argument for the next command.
///
/// The chord that invoked the command is processed first, so `M-<digit>`
/// contributes its digit. The first chord that is not part of the
/// argument is pushed back for the next command.
pub(crate) fn universal_argument(session: &mut Session, input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    if let Some(key) = session.last_key() {
        session.unread_key(key);
    }
    session.this_flags.uniarg_empty = true;

    let mut echo = String::new();
    let mut arg: i32 = 1;
    let mut digits = 0;
    let mut negative = false;

    loop {
        let key = session.read_key(input, &echo)?;

        if key == Chord::CANCEL {
            session.this_flags.uniarg_empty = false;
            return keyboard_quit(session, input, 1);
        }

        if let Some(digit) = key.digit().filter(|_| !key.is_ctrl()) {
            session.this_flags.uniarg_empty = false;
            if key.is_meta() {
                if !echo.is_empty() {
                    echo.push(' ');
                }
                echo.push_str("ESC");
            }
            echo.push_str(&format!(" {}", digit));

            let digit = digit as i32;
            arg = if digits == 0 {
                digit
            } else {
                arg.saturating_mul(10).saturating_add(digit)
            };
            digits += 1;
        } else if key == Chord::ctrl(b'u') {
            if !echo.is_empty() {
                echo.push(' ');
            }
            echo.push_str("C-u");
            if digits > 0 {
                break;
            }
            arg = arg.saturating_mul(4);
        } else if key == Chord::key(b'-') && digits == 0 {
            if !negative {
                negative = true;
                echo.push_str(" -");
                // A bare minus means -1, not -4
                arg = 1;
                session.this_flags.uniarg_empty = false;
            }
        } else {
            session.unread_key(key);
            break;
        }
    }

    session.uniarg = if negative { -arg } else { arg };
    session.this_flags.set_uniarg = true;
    session.clear_message();
    log::debug!("numeric argument {}", session.uniarg);
    Ok(())
}

pub(crate) fn keyboard_quit(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    session.current_buffer_mut().deactivate_mark();
    session.set_error("Quit");
    Ok(())
}

pub(crate) fn execute_extended_command(session: &mut Session, input: &mut dyn ChordSource, n: i32) -> Result<()> {
    let prompt = format!("{}M-x ", session.echo_prefix());
    let Some(name) = session.read_string(input, &prompt, "")? else {
        return Ok(());
    };
    let name = name.trim();
    if name.is_empty() {
        return Ok(());
    }
    session.execute(name, input, n)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use quill_config::EditorSettings;
    use quill_keyboard::parse_sequence;

    use super::*;

    fn run(session: &mut Session, s: &str) {
        let mut input: VecDeque<Chord> = parse_sequence(s).unwrap().into();
        while !input.is_empty() || session.has_pending_keys() {
            session.step(&mut input).unwrap();
        }
    }

    fn text(session: &Session) -> String {
        String::from_utf8_lossy(session.current_buffer().text().as_bytes()).into_owned()
    }

    #[test]
    fn test_meta_digits_accumulate() {
        let mut session = Session::new(EditorSettings::default(), 80, 24).unwrap();
        run(&mut session, "M-1 M-2 x");
        assert_eq!(text(&session), "x".repeat(12));
    }

    #[test]
    fn test_digits_after_minus() {
        let mut session = Session::new(EditorSettings::default(), 80, 24).unwrap();
        run(&mut session, "a a a a");
        run(&mut session, "C-u - 3 C-f");
        assert_eq!(session.current_buffer().point(), 1);
    }

    #[test]
    fn test_keyboard_quit_deactivates_mark() {
        let mut session = Session::new(EditorSettings::default(), 80, 24).unwrap();
        run(&mut session, "a C-SPC C-g");
        assert!(!session.current_buffer().mark_active());
        let shown = session.message().unwrap();
        assert_eq!(shown.text, "Quit");
        assert!(shown.error);
    }

    #[test]
    fn test_execute_extended_command() {
        let mut session = Session::new(EditorSettings::default(), 80, 24).unwrap();
        run(&mut session, "a b c");
        run(&mut session, "M-x b e g i n n i n g - o f - b u f f e r RET");
        assert_eq!(session.current_buffer().point(), 0);

        run(&mut session, "C-u 2 M-x f o r w a r d - c h a r RET");
        assert_eq!(session.current_buffer().point(), 2);

        run(&mut session, "M-x n o p e RET");
        assert_eq!(session.message().unwrap().text, "No such function `nope'");
    }

    #[test]
    fn test_extended_command_prompt_shows_argument() {
        struct Recorder {
            keys: VecDeque<Chord>,
            echoes: Vec<String>,
        }
        impl ChordSource for Recorder {
            fn read_chord(&mut self, echo: &str) -> Result<Chord> {
                self.echoes.push(echo.to_string());
                Ok(self.keys.pop_front().unwrap_or(Chord::CANCEL))
            }
        }

        let mut session = Session::new(EditorSettings::default(), 80, 24).unwrap();
        let mut input = Recorder {
            keys: parse_sequence("C-u 4 M-x C-g").unwrap().into(),
            echoes: Vec::new(),
        };
        session.step(&mut input).unwrap();
        session.step(&mut input).unwrap();
        assert_eq!(input.echoes.last().map(String::as_str), Some("C-u 4 M-x "));
        assert_eq!(session.message().unwrap().text, "Quit");
    }
}
