//! Binding inspection and runtime rebinding.

use quill_keyboard::sequence_to_string;
use quill_keymap::Resolution;

use crate::{ChordSource, Error, Result, Session};

const HELP_BUFFER: &str = "*Help*";

pub(crate) fn where_is(session: &mut Session, input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let Some(name) = session.read_string(input, "Where is command: ", "")? else {
        return Ok(());
    };
    let name = name.trim();
    let command = session
        .registry()
        .lookup(name)
        .ok_or_else(|| Error::user(format!("No such function `{}'", name)))?;

    let bindings = session.bindings_of(command);
    if bindings.is_empty() {
        session.set_message(format!("{} is not on any key", name));
    } else {
        session.set_message(format!("{} is on {}", name, bindings.join(", ")));
    }
    Ok(())
}

pub(crate) fn describe_key(session: &mut Session, input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    match session.read_key_sequence(input, "Describe key: ")? {
        Resolution::Command { command, keys } => {
            let entry = session.registry().get(command);
            let (name, doc) = (entry.name, entry.doc);
            let sequence = sequence_to_string(&keys);

            session.write_temp_buffer(HELP_BUFFER, |text| {
                text.push_str(&format!("{} runs the command `{}'.\n\n{}\n", sequence, name, doc));
            });
            session.set_message(format!("{} runs the command `{}'", sequence, name));
            Ok(())
        }
        Resolution::Undefined(keys) => Err(Error::user(format!(
            "{} is undefined",
            sequence_to_string(&keys)
        ))),
        Resolution::Cancelled(_) => {
            session.set_error("Quit");
            Ok(())
        }
    }
}

pub(crate) fn describe_bindings(session: &mut Session, _input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let bindings = session.enumerate_bindings();
    session.write_temp_buffer(HELP_BUFFER, |text| {
        text.push_str("Key translations:\n");
        text.push_str(&format!("{:<15} {}\n", "key", "binding"));
        text.push_str(&format!("{:<15} {}\n", "---", "-------"));
        for (keys, name) in &bindings {
            text.push_str(&format!("{:<15} {}\n", keys, name));
        }
    });
    Ok(())
}

pub(crate) fn global_set_key(session: &mut Session, input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let keys = match session.read_key_sequence(input, "Set key globally: ")? {
        Resolution::Command { keys, .. } | Resolution::Undefined(keys) => keys,
        Resolution::Cancelled(_) => {
            session.set_error("Quit");
            return Ok(());
        }
    };

    let sequence = sequence_to_string(&keys);
    let prompt = format!("Set key {} to command: ", sequence);
    let Some(name) = session.read_string(input, &prompt, "")? else {
        return Ok(());
    };
    let name = name.trim();
    let command = session
        .registry()
        .lookup(name)
        .ok_or_else(|| Error::user(format!("No such function `{}'", name)))?;

    session.bind(&keys, command);
    log::info!("bound {} to {}", sequence, name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use quill_config::EditorSettings;
    use quill_keyboard::{parse_sequence, Chord};

    use super::*;

    fn session() -> Session {
        Session::new(EditorSettings::default(), 80, 24).unwrap()
    }

    fn run(session: &mut Session, chords: Vec<Chord>) {
        let mut input: VecDeque<Chord> = chords.into();
        while !input.is_empty() || session.has_pending_keys() {
            session.step(&mut input).unwrap();
        }
    }

    fn with_text(prefix: &str, typed: &str) -> Vec<Chord> {
        let mut chords = parse_sequence(prefix).unwrap();
        chords.extend(typed.bytes().map(Chord::key));
        chords.push(Chord::RET);
        chords
    }

    fn message(session: &Session) -> String {
        session.message().map(|m| m.text.clone()).unwrap_or_default()
    }

    fn help_text(session: &Session) -> String {
        let index = session.find_buffer(HELP_BUFFER).unwrap();
        String::from_utf8_lossy(session.buffer(index).text().as_bytes()).into_owned()
    }

    #[test]
    fn test_where_is() {
        let mut session = session();
        run(&mut session, with_text("C-h w", "find-file"));
        assert_eq!(message(&session), "find-file is on C-x C-f");

        run(&mut session, with_text("C-h w", "auto-fill-mode"));
        assert_eq!(message(&session), "auto-fill-mode is not on any key");

        run(&mut session, with_text("C-h w", "bogus"));
        assert_eq!(message(&session), "No such function `bogus'");
    }

    #[test]
    fn test_describe_key() {
        let mut session = session();
        run(&mut session, parse_sequence("C-h k C-x C-s").unwrap());
        assert_eq!(message(&session), "C-x C-s runs the command `save-buffer'");
        assert!(help_text(&session).contains("Save current buffer"));

        run(&mut session, parse_sequence("C-h k C-x C-q").unwrap());
        assert_eq!(message(&session), "C-x C-q runs the command `toggle-read-only'");
        assert!(!session.current_buffer().flags.read_only);

        run(&mut session, parse_sequence("C-h k C-c").unwrap());
        assert_eq!(message(&session), "C-c is undefined");

        run(&mut session, parse_sequence("C-h k C-x C-g").unwrap());
        assert_eq!(message(&session), "Quit");
    }

    #[test]
    fn test_describe_bindings_lists_every_binding() {
        let mut session = session();
        run(&mut session, parse_sequence("C-h b").unwrap());

        let text = help_text(&session);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Key translations:"));
        assert_eq!(lines.next(), Some("key             binding"));
        assert_eq!(lines.next(), Some("---             -------"));
        assert!(text.contains("\nC-x C-f         find-file\n"));
        assert_eq!(text.lines().count(), session.enumerate_bindings().len() + 3);
        assert_eq!(session.focus(), 0);
    }

    #[test]
    fn test_global_set_key() {
        let mut session = session();
        let chords = [
            with_text("M-x", "global-set-key"),
            with_text("C-z", "end-of-buffer"),
        ]
        .concat();
        run(&mut session, chords);
        let end = session.registry().lookup("end-of-buffer").unwrap();
        assert_eq!(session.lookup_exact(&parse_sequence("C-z").unwrap()), Some(end));

        run(&mut session, parse_sequence("x y C-a C-z").unwrap());
        assert_eq!(session.current_buffer().point(), 2);
    }
}
