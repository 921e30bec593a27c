//! Visiting and saving files.

use std::env;
use std::path::{Path, PathBuf};

use quill_buffer::Buffer;

use crate::{ChordSource, Error, Result, Session};

/// Directory offered as the start of a file name prompt.
fn initial_directory(session: &Session) -> String {
    let dir = session
        .current_buffer()
        .path()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .or_else(|| env::current_dir().ok());
    match dir {
        Some(dir) if dir.as_os_str().is_empty() => String::new(),
        Some(dir) => format!("{}/", dir.display()).replace("//", "/"),
        None => String::new(),
    }
}

/// `name`, or `name<2>`, `name<3>`, ... if the name is taken.
fn unique_buffer_name(session: &Session, name: &str) -> String {
    if session.find_buffer(name).is_none() {
        return name.to_string();
    }
    (2..)
        .map(|i| format!("{}<{}>", name, i))
        .find(|candidate| session.find_buffer(candidate).is_none())
        .unwrap_or_else(|| name.to_string())
}

/// Turn prompt text into a path. A doubled slash starts over from the
/// root, so an absolute name can be typed after the offered directory.
fn expand_file_name(name: &str) -> PathBuf {
    match name.rfind("//") {
        Some(pos) => PathBuf::from(&name[pos + 1..]),
        None => PathBuf::from(name),
    }
}

/// Visit `path` in the focused window.
pub fn visit_file(session: &mut Session, path: &Path) -> Result<()> {
    if let Some(index) = session.find_buffer_by_path(path) {
        session.switch_to_buffer(index);
        return Ok(());
    }

    let exists = path.exists();
    let mut buffer = Buffer::visit(path)
        .map_err(|e| Error::user(format!("{}: {}", path.display(), e)))?;
    buffer.tab_width = session.settings.tab_width;
    let name = unique_buffer_name(session, buffer.name());
    buffer.set_name(name);

    log::info!("visiting {} ({} bytes)", path.display(), buffer.size());
    let index = session.add_buffer(buffer);
    session.switch_to_buffer(index);
    if !exists {
        session.set_message("(New file)");
    }
    Ok(())
}

pub(crate) fn find_file(session: &mut Session, input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    let initial = initial_directory(session);
    let Some(name) = session.read_string(input, "Find file: ", &initial)? else {
        return Ok(());
    };
    if name.is_empty() || name.ends_with('/') {
        return Ok(());
    }
    visit_file(session, &expand_file_name(&name))
}

fn save_buffer_at(session: &mut Session, index: usize) -> Result<()> {
    let buffer = &mut session.buffers[index];
    let wrote = match buffer.save().map(|path| path.display().to_string()) {
        Ok(wrote) => wrote,
        Err(e) => {
            log::error!("failed to save {}: {}", buffer.name(), e);
            return Err(Error::user(format!("{}: {}", buffer.name(), e)));
        }
    };
    log::info!("wrote {}", wrote);
    session.set_message(format!("Wrote {}", wrote));
    Ok(())
}

pub(crate) fn save_buffer(session: &mut Session, input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    if !session.current_buffer().flags.modified {
        session.set_message("(No changes need to be saved)");
        return Ok(());
    }

    if session.current_buffer().path().is_none() {
        let initial = initial_directory(session);
        let Some(name) = session.read_string(input, "File to save in: ", &initial)? else {
            return Ok(());
        };
        if name.is_empty() || name.ends_with('/') {
            return Ok(());
        }
        let path = expand_file_name(&name);
        let buffer_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let buffer_name = unique_buffer_name(session, &buffer_name);
        let buffer = session.current_buffer_mut();
        buffer.set_path(path);
        buffer.set_name(buffer_name);
    }

    let index = session.layout.focused().buffer;
    save_buffer_at(session, index)
}

/// Buffers holding unsaved changes to a file.
fn unsaved_buffers(session: &Session) -> Vec<usize> {
    session
        .buffers()
        .iter()
        .enumerate()
        .filter(|(_, b)| b.flags.modified && !b.flags.temporary && b.path().is_some())
        .map(|(i, _)| i)
        .collect()
}

pub(crate) fn save_buffers_kill_emacs(session: &mut Session, input: &mut dyn ChordSource, _n: i32) -> Result<()> {
    for index in unsaved_buffers(session) {
        let prompt = match session.buffer(index).path() {
            Some(path) => format!("Save file {}? (y or n) ", path.display()),
            None => continue,
        };
        match session.read_y_or_n(input, &prompt)? {
            None => return Ok(()),
            Some(true) => save_buffer_at(session, index)?,
            Some(false) => {}
        }
    }

    if !unsaved_buffers(session).is_empty() {
        match session.read_yes_or_no(input, "Modified buffers exist; exit anyway? ")? {
            Some(true) => {}
            _ => return Ok(()),
        }
    }

    log::info!("exiting");
    session.this_flags.quit = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::fs;

    use quill_buffer::Eol;
    use quill_config::EditorSettings;
    use quill_keyboard::{parse_sequence, Chord};

    use super::*;

    fn keys(s: &str) -> Vec<Chord> {
        parse_sequence(s).unwrap()
    }

    fn typed(s: &str) -> Vec<Chord> {
        s.bytes().map(Chord::key).collect()
    }

    fn run(session: &mut Session, chords: Vec<Chord>) {
        let mut input: VecDeque<Chord> = chords.into();
        while !input.is_empty() || session.has_pending_keys() {
            session.step(&mut input).unwrap();
        }
    }

    fn find_file_keys(name: &str) -> Vec<Chord> {
        [keys("C-x C-f"), typed(name), keys("RET")].concat()
    }

    /// Session whose scratch buffer lives in `dir`, so file prompts start there.
    fn session_in(dir: &Path) -> Session {
        let mut session = Session::new(EditorSettings::default(), 80, 24).unwrap();
        session.current_buffer_mut().set_path(dir.join("scratch"));
        session
    }

    #[test]
    fn test_visit_edit_and_save_dos_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, b"hello\r\nworld\r\n").unwrap();

        let mut session = session_in(dir.path());
        run(&mut session, find_file_keys("a.txt"));
        assert_eq!(session.current_buffer().name(), "a.txt");
        assert_eq!(session.current_buffer().text().eol(), Eol::CrLf);

        run(&mut session, keys("C-e ! C-x C-s"));
        assert_eq!(fs::read(&path).unwrap(), b"hello!\r\nworld\r\n");
        assert_eq!(
            session.message().unwrap().text,
            format!("Wrote {}", path.display())
        );

        run(&mut session, keys("C-x C-s"));
        assert_eq!(
            session.message().unwrap().text,
            "(No changes need to be saved)"
        );
    }

    #[test]
    fn test_find_file_reuses_and_names_buffers() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.txt"), b"top").unwrap();
        fs::write(dir.path().join("sub").join("a.txt"), b"nested").unwrap();

        let mut session = session_in(dir.path());
        run(&mut session, find_file_keys("a.txt"));
        run(&mut session, find_file_keys("sub/a.txt"));
        assert_eq!(session.current_buffer().name(), "a.txt<2>");
        assert_eq!(session.current_buffer().text().as_bytes(), b"nested");

        let top = session.find_buffer("a.txt").unwrap();
        visit_file(&mut session, &dir.path().join("a.txt")).unwrap();
        assert_eq!(session.layout().focused().buffer, top);
        assert_eq!(session.buffers().len(), 3);
    }

    #[test]
    fn test_expand_file_name() {
        assert_eq!(expand_file_name("/home/me/a.txt"), PathBuf::from("/home/me/a.txt"));
        assert_eq!(expand_file_name("/home/me//etc/hosts"), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn test_find_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(dir.path());
        run(&mut session, find_file_keys("new.txt"));
        assert_eq!(session.message().unwrap().text, "(New file)");
        assert!(session.current_buffer().text().is_empty());
        assert!(!dir.path().join("new.txt").exists());
    }

    #[test]
    fn test_save_prompts_for_a_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(EditorSettings::default(), 80, 24).unwrap();
        let mut fresh = Buffer::new("*unnamed*");
        fresh.insert_bytes(b"notes");
        let index = session.add_buffer(fresh);
        session.switch_to_buffer(index);

        let target = dir.path().join("out.txt");
        let name = format!("/{}", target.display());
        let chords = [keys("C-x C-s"), typed(&name), keys("RET")].concat();
        run(&mut session, chords);
        assert_eq!(fs::read(dir.path().join("out.txt")).unwrap(), b"notes");
        assert_eq!(session.current_buffer().name(), "out.txt");
    }

    #[test]
    fn test_kill_offers_to_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, b"x").unwrap();

        let mut session = session_in(dir.path());
        run(&mut session, find_file_keys("a.txt"));
        run(&mut session, keys("y C-x C-c y"));
        assert!(session.should_quit());
        assert_eq!(fs::read(&path).unwrap(), b"yx");
    }

    #[test]
    fn test_kill_asks_before_discarding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let mut session = session_in(dir.path());
        run(&mut session, find_file_keys("a.txt"));
        run(&mut session, keys("z"));

        run(&mut session, [keys("C-x C-c n"), typed("no"), keys("RET")].concat());
        assert!(!session.should_quit());

        run(&mut session, [keys("C-x C-c n"), typed("yes"), keys("RET")].concat());
        assert!(session.should_quit());
        assert!(!path.exists());
    }
}
