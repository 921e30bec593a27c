use crate::EncodedText;

/// Half-open span `[start, end)` between point and mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub end: usize,
    /// Number of line markers inside the span
    pub lines: usize,
}

impl Region {
    /// Region between two offsets, in either order.
    pub fn new(a: usize, b: usize, text: &EncodedText) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let end = end.min(text.len());
        let start = start.min(end);
        let lines = text.line_number(end) - text.line_number(start);
        Self { start, end, lines }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}
