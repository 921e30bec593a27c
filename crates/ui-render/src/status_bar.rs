//! Window status lines and the echo area.

use quill_buffer::{Buffer, Eol};
use quill_core::{string_width, Session};

use crate::term::{Attr, Term};
use crate::window_rendering::DrawnWindow;

fn eol_tag(eol: Eol) -> &'static str {
    match eol {
        Eol::Cr => "(Mac)",
        Eol::CrLf => "(DOS)",
        Eol::Lf => ":",
    }
}

fn mode_line_flags(buffer: &Buffer) -> &'static str {
    match (buffer.flags.modified, buffer.flags.read_only) {
        (true, true) => "%*",
        (true, false) => "**",
        (false, true) => "%%",
        (false, false) => "--",
    }
}

/// `All`, `Top`, `Bot`, or the share of the buffer above the window.
fn screen_position(drawn: DrawnWindow, size: usize) -> String {
    let top_visible = drawn.top == 0;
    match (top_visible, drawn.all_displayed) {
        (true, true) => "All".to_string(),
        (true, false) => "Top".to_string(),
        (false, true) => "Bot".to_string(),
        (false, false) => format!("{:2}%", drawn.top * 100 / size.max(1)),
    }
}

/// Status text of window `index`, without the trailing dash fill.
pub fn status_text(session: &Session, index: usize, drawn: DrawnWindow) -> String {
    let window = session.layout().window(index);
    let buffer = session.buffer(window.buffer);
    let text = buffer.text();
    let point = session.window_point(index);
    let start = text.start_of_line(point);
    let column = string_width(&text.as_bytes()[start..point], buffer.tab_width);
    let position = format!("({},{})", text.line_number(point) + 1, column);

    let mut status = format!(
        "--{}{:>2}  {:<15}   {} {:<9} (Fundamental",
        eol_tag(text.eol()),
        mode_line_flags(buffer),
        buffer.name(),
        screen_position(drawn, buffer.size()),
        position
    );
    if buffer.flags.auto_fill {
        status.push_str(" Fill");
    }
    if buffer.flags.overwrite {
        status.push_str(" Ovwrt");
    }
    if session.is_defining_macro() {
        status.push_str(" Def");
    }
    if buffer.flags.isearch {
        status.push_str(" Isearch");
    }
    status.push(')');
    status
}

/// Draw the reverse-video status line of window `index` on `row`.
pub(crate) fn draw_status_line(
    term: &mut dyn Term,
    session: &Session,
    index: usize,
    row: usize,
    drawn: DrawnWindow,
) {
    let ewidth = session.layout().window(index).ewidth;
    term.set_attr(Attr::Reverse);
    term.move_to(row, 0);
    term.add_str(&"-".repeat(ewidth));

    let status = status_text(session, index, drawn);
    term.move_to(row, 0);
    term.add_str(&status.chars().take(ewidth).collect::<String>());
    term.set_attr(Attr::Normal);
}

/// Draw the echo area on the last row. Returns the column just past the
/// prompt when one is shown.
pub(crate) fn draw_echo_area(term: &mut dyn Term, session: &Session, prompt: Option<&str>) -> Option<usize> {
    let row = term.height().saturating_sub(1);
    term.set_attr(Attr::Normal);
    term.move_to(row, 0);
    term.clear_to_eol();

    match prompt.filter(|p| !p.is_empty()) {
        Some(prompt) => Some(write_prompt(term, prompt)),
        None => {
            if let Some(message) = session.message() {
                term.add_str(&message.text);
            }
            None
        }
    }
}

/// Write `prompt` on the cleared echo row; returns the cursor column.
pub(crate) fn write_prompt(term: &mut dyn Term, prompt: &str) -> usize {
    term.add_str(prompt);
    prompt.chars().count().min(term.width().saturating_sub(1))
}

/// Redraw only the echo row with `prompt`.
pub(crate) fn draw_prompt(term: &mut dyn Term, prompt: &str) -> usize {
    let row = term.height().saturating_sub(1);
    term.set_attr(Attr::Normal);
    term.move_to(row, 0);
    term.clear_to_eol();
    write_prompt(term, prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_line_flags() {
        let mut buffer = Buffer::new("b");
        assert_eq!(mode_line_flags(&buffer), "--");
        buffer.flags.read_only = true;
        assert_eq!(mode_line_flags(&buffer), "%%");
        buffer.flags.modified = true;
        assert_eq!(mode_line_flags(&buffer), "%*");
        buffer.flags.read_only = false;
        assert_eq!(mode_line_flags(&buffer), "**");
    }

    #[test]
    fn test_screen_position() {
        let drawn = |top, all_displayed| DrawnWindow { top, all_displayed };
        assert_eq!(screen_position(drawn(0, true), 10), "All");
        assert_eq!(screen_position(drawn(0, false), 10), "Top");
        assert_eq!(screen_position(drawn(5, true), 10), "Bot");
        assert_eq!(screen_position(drawn(50, false), 200), "25%");
        assert_eq!(screen_position(drawn(1, false), 200), " 0%");
    }
}
