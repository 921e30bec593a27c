//! Full-frame redisplay for quill.
//!
//! Every call recomputes all geometry from the session: the horizontal
//! scroll of the focused window, each window's text rows and status line,
//! the echo area and the cursor. Nothing is cached between frames.

mod status_bar;
mod term;
mod window_rendering;

pub use status_bar::status_text;
pub use term::{Attr, BufferTerm, Term};
pub use window_rendering::{start_column, DrawnWindow};

use quill_core::Session;

/// Where the terminal cursor goes after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

/// Draw the whole screen.
///
/// `prompt` is the echo text of a pending read (a key prefix such as
/// `C-x-` or a minibuffer prompt); when present the cursor goes after it,
/// otherwise to point in the focused window.
pub fn redisplay(term: &mut dyn Term, session: &Session, prompt: Option<&str>) -> Cursor {
    let focus = session.focus();
    let focused = session.layout().focused();
    let buffer = session.current_buffer();
    let point = buffer.point();
    let line_start = buffer.text().start_of_line(point);
    let (start_col, point_col) = start_column(
        &buffer.text().as_bytes()[line_start..point],
        focused.ewidth,
        buffer.tab_width,
    );

    let mut topline = 0;
    let mut cursor_row = 0;
    for (index, window) in session.windows().iter().enumerate() {
        debug_assert!(
            window.ewidth > 0 && window.eheight > 0,
            "window {} has no text area",
            index
        );
        if window.ewidth == 0 || window.eheight == 0 {
            topline += window.fheight;
            continue;
        }

        let scroll = if index == focus { start_col } else { 0 };
        if index == focus {
            cursor_row = topline + window.topdelta;
        }
        let drawn = window_rendering::draw_window(term, session, index, topline, scroll);
        if window.fheight > window.eheight {
            status_bar::draw_status_line(term, session, index, topline + window.eheight, drawn);
        }
        topline += window.fheight;
    }

    match status_bar::draw_echo_area(term, session, prompt) {
        Some(col) => Cursor {
            row: term.height().saturating_sub(1),
            col,
        },
        None => Cursor {
            row: cursor_row,
            col: point_col,
        },
    }
}

/// Redraw only the echo area with `prompt`, leaving the rest of the
/// screen as it is. Used while a command blocks for more input.
pub fn echo(term: &mut dyn Term, prompt: &str) -> Cursor {
    let col = status_bar::draw_prompt(term, prompt);
    Cursor {
        row: term.height().saturating_sub(1),
        col,
    }
}
