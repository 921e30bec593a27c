mod event;
mod screen;

use anyhow::{Context, Result};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;

use quill_config::Config;
use quill_core::{visit_file, Error, Session};
use quill_logger::LogLevel;

use screen::{Input, Screen};

/// Entries kept in the in-memory log ring
const LOG_ENTRIES: usize = 1000;

fn main() -> Result<()> {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let level = config.logging.min_level.parse().unwrap_or(LogLevel::Info);
    quill_logger::init(
        config
            .log_file_path()
            .context("Failed to determine log file path")?,
        LOG_ENTRIES,
        level,
    );
    log::info!("quill {} starting", env!("CARGO_PKG_VERSION"));
    match config_error {
        Some(e) => log::warn!("using default configuration: {:#}", e),
        None => log::info!("configuration loaded"),
    }

    let (width, height) = terminal::size().context("Failed to query terminal size")?;
    let mut session = match Session::new(config.editor.clone(), width as usize, height as usize) {
        Ok(session) => session,
        Err(Error::Config(message)) => {
            eprintln!("quill: invalid default binding: {}", message);
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Failed to start editor"),
    };

    let applied = session.apply_user_bindings(&config.bindings);
    if !config.bindings.is_empty() {
        log::info!("applied {} of {} user bindings", applied, config.bindings.len());
    }
    for arg in std::env::args().skip(1) {
        if let Err(e) = visit_file(&mut session, Path::new(&arg)) {
            session.set_error(e.to_string());
        }
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    execute!(stdout, EnterAlternateScreen)?;
    if keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut screen = Screen::new(Terminal::new(backend)?);

    let result = run(&mut screen, &mut session);

    // Restore terminal
    disable_raw_mode()?;
    let terminal = screen.terminal_mut();
    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => log::info!("quill exiting"),
        Err(err) => {
            log::error!("editor loop failed: {:#}", err);
            for entry in quill_logger::get_entries()
                .iter()
                .filter(|e| e.level >= LogLevel::Warn)
            {
                eprintln!("[{}] {}: {}", entry.timestamp, entry.level.to_str(), entry.message);
            }
            eprintln!("Error: {:?}", err);
        }
    }

    Ok(())
}

/// Read, dispatch and redisplay until a command asks to quit.
fn run(screen: &mut Screen, session: &mut Session) -> Result<()> {
    loop {
        screen.draw_session(session)?;
        if session.should_quit() {
            return Ok(());
        }

        // Chords pushed back by the last command are dispatched first
        if !session.has_pending_keys() {
            match screen.next_input()? {
                Input::Chord(chord) => screen.queue(chord),
                Input::Resize(width, height) => {
                    resize(session, width, height);
                    continue;
                }
            }
        }

        session.step(screen)?;
        if session.message().is_some_and(|m| m.error) {
            screen.ding()?;
        }
        if let Some((width, height)) = screen.take_resize() {
            resize(session, width, height);
        }
    }
}

fn resize(session: &mut Session, width: u16, height: u16) {
    if let Err(e) = session.resize(width as usize, height as usize) {
        log::warn!("keeping the old layout: {}", e);
    }
}
