//! Terminal drawing primitives.
//!
//! The redisplay engine only needs to move, pick an attribute, write text
//! and clear to the end of the row. [`BufferTerm`] provides those over a
//! ratatui [`Buffer`], which the binary hands over inside `Terminal::draw`.

use ratatui::{
    buffer::Buffer,
    style::{Modifier, Style},
};

/// Character attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Attr {
    #[default]
    Normal,
    Reverse,
}

impl Attr {
    fn style(self) -> Style {
        match self {
            Attr::Normal => Style::default(),
            Attr::Reverse => Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// Cursor-addressed output.
pub trait Term {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn move_to(&mut self, row: usize, col: usize);
    fn set_attr(&mut self, attr: Attr);
    /// Write at the cursor and advance it. Output past the right edge is
    /// dropped.
    fn add_str(&mut self, s: &str);
    fn clear_to_eol(&mut self);
}

/// [`Term`] over a ratatui buffer.
pub struct BufferTerm<'a> {
    buf: &'a mut Buffer,
    row: usize,
    col: usize,
    attr: Attr,
}

impl<'a> BufferTerm<'a> {
    pub fn new(buf: &'a mut Buffer) -> Self {
        Self {
            buf,
            row: 0,
            col: 0,
            attr: Attr::Normal,
        }
    }

    fn put(&mut self, ch: char) {
        if self.row < self.height() && self.col < self.width() {
            let area = self.buf.area;
            let x = area.x + self.col as u16;
            let y = area.y + self.row as u16;
            let cell = &mut self.buf[(x, y)];
            cell.reset();
            cell.set_char(ch).set_style(self.attr.style());
        }
        self.col += 1;
    }
}

impl Term for BufferTerm<'_> {
    fn width(&self) -> usize {
        self.buf.area.width as usize
    }

    fn height(&self) -> usize {
        self.buf.area.height as usize
    }

    fn move_to(&mut self, row: usize, col: usize) {
        self.row = row;
        self.col = col;
    }

    fn set_attr(&mut self, attr: Attr) {
        self.attr = attr;
    }

    fn add_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.put(ch);
        }
    }

    fn clear_to_eol(&mut self) {
        let (row, col, attr) = (self.row, self.col, self.attr);
        self.attr = Attr::Normal;
        while self.col < self.width() {
            self.put(' ');
        }
        self.row = row;
        self.col = col;
        self.attr = attr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_writes_are_clipped() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 2));
        let mut term = BufferTerm::new(&mut buf);
        term.move_to(1, 2);
        term.set_attr(Attr::Reverse);
        term.add_str("xyz");

        assert_eq!(buf[(2, 1)].symbol(), "x");
        assert_eq!(buf[(3, 1)].symbol(), "y");
        assert!(buf[(3, 1)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_clear_to_eol_keeps_cursor() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        let mut term = BufferTerm::new(&mut buf);
        term.add_str("hello");
        term.move_to(0, 2);
        term.set_attr(Attr::Reverse);
        term.clear_to_eol();
        term.add_str("y");

        assert_eq!(buf[(1, 0)].symbol(), "e");
        assert_eq!(buf[(2, 0)].symbol(), "y");
        assert_eq!(buf[(3, 0)].symbol(), " ");
        assert!(!buf[(4, 0)].modifier.contains(Modifier::REVERSED));
    }
}
