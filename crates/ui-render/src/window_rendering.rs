//! Window body rendering and horizontal scrolling.

use quill_buffer::{EncodedText, Region};
use quill_core::{make_char_printable, string_width, Session};

use crate::term::{Attr, Term};

/// Geometry of one drawn window, needed by its status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawnWindow {
    /// Offset of the first displayed line.
    pub top: usize,
    /// Nothing of the buffer lies below the last row.
    pub all_displayed: bool,
}

/// Horizontal scroll for the line at point.
///
/// `prefix` is the part of the line before point. Returns the first byte
/// of the line to draw and point's screen column from there. Start
/// columns are searched backwards from point; one is taken as soon as
/// point would reach the last column, or the start falls more than two
/// blocks (a third of the width each) behind point's block, which keeps
/// small cursor moves from making large jumps.
pub fn start_column(prefix: &[u8], ewidth: usize, tab_width: usize) -> (usize, usize) {
    let point = prefix.len();
    let block = (ewidth / 3).max(1);
    let limit = ewidth.saturating_sub(1).max(1);

    let mut lastcol = 0;
    for lp in (0..=point).rev() {
        let col = string_width(&prefix[lp..], tab_width);
        if col >= limit || lp / block + 2 < point / block {
            return (lp + 1, lastcol);
        }
        lastcol = col;
    }
    (0, lastcol)
}

/// Region to highlight in window `index`, if any.
pub(crate) fn highlight_region(session: &Session, index: usize) -> Option<Region> {
    let window = session.layout().window(index);
    if index != session.focus() && !session.settings().highlight_nonselected_windows {
        return None;
    }
    let buffer = session.buffer(window.buffer);
    if !buffer.mark_active() {
        return None;
    }
    let mark = buffer.mark()?;
    Some(Region::new(session.window_point(index), mark, buffer.text()))
}

/// Draw the line starting at `line_start` on `row`, from byte `start_col`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_line(
    term: &mut dyn Term,
    row: usize,
    text: &EncodedText,
    line_start: usize,
    start_col: usize,
    ewidth: usize,
    region: Option<Region>,
    tab_width: usize,
) {
    term.move_to(row, 0);
    let line = text.line(line_start);
    let in_region = |i: usize| region.is_some_and(|r| r.contains(line_start + i));

    let mut x = 0;
    let mut i = start_col;
    loop {
        term.set_attr(if in_region(i) { Attr::Reverse } else { Attr::Normal });
        if i >= line.len() || x >= ewidth {
            break;
        }
        let s = make_char_printable(line[i], x, tab_width);
        term.add_str(&s);
        x += s.len();
        i += 1;
    }

    // Cut text, or an expansion that ran past the edge
    if x >= ewidth && (i < line.len() || x > ewidth) {
        term.move_to(row, ewidth - 1);
        term.set_attr(Attr::Normal);
        term.add_str("$");
    } else if x < ewidth {
        term.add_str(&" ".repeat(ewidth - x));
    }
    term.set_attr(Attr::Normal);
}

/// Draw the text rows of window `index` from screen row `topline`.
pub(crate) fn draw_window(
    term: &mut dyn Term,
    session: &Session,
    index: usize,
    topline: usize,
    start_col: usize,
) -> DrawnWindow {
    let window = session.layout().window(index);
    let buffer = session.buffer(window.buffer);
    let text = buffer.text();
    let region = highlight_region(session, index);

    let mut top = text.start_of_line(session.window_point(index));
    for _ in 0..window.topdelta {
        match text.prev_line(top) {
            Some(prev) => top = prev,
            None => break,
        }
    }

    let mut line = Some(top);
    for row in topline..topline + window.eheight {
        term.move_to(row, 0);
        term.clear_to_eol();

        let Some(offset) = line else {
            continue;
        };
        draw_line(
            term,
            row,
            text,
            offset,
            start_col,
            window.ewidth,
            region,
            buffer.tab_width,
        );
        if start_col > 0 {
            term.move_to(row, 0);
            term.add_str("$");
        }
        line = text.next_line(offset);
    }

    DrawnWindow {
        top,
        all_displayed: line.map_or(true, |next| next >= text.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitting_line_starts_at_zero() {
        assert_eq!(start_column(b"hello", 80, 8), (0, 5));
        assert_eq!(start_column(b"", 80, 8), (0, 0));
    }

    #[test]
    fn test_long_line_scrolls_by_blocks() {
        let line = b"0123456789".repeat(3);
        assert_eq!(start_column(&line[..25], 20, 8), (12, 13));

        // Point's screen column stays inside the window
        for point in 0..line.len() {
            let (start, col) = start_column(&line[..point], 20, 8);
            assert!(col < 20);
            assert_eq!(start + col, point);
        }
    }

    #[test]
    fn test_tabs_count_by_display_width() {
        let line = b"\t\t\t\tx";
        let (start, col) = start_column(line, 20, 8);
        assert!(start > 0);
        assert_eq!(col, string_width(&line[start..], 8));
        assert!(col < 19);
    }

    #[test]
    fn test_narrow_window_keeps_point_visible() {
        assert_eq!(start_column(b"abc", 1, 8), (3, 0));
        assert_eq!(start_column(b"abc", 3, 8), (2, 1));
    }
}
