//! Minimal editable buffer: text, point, mark and mode flags.

use std::io;
use std::path::{Path, PathBuf};

use crate::{EncodedText, Region};

/// Default tab width for new buffers.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Buffer mode flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferFlags {
    pub modified: bool,
    pub read_only: bool,
    pub overwrite: bool,
    pub auto_fill: bool,
    pub isearch: bool,
    /// Scratch/help buffers that are never saved
    pub temporary: bool,
}

/// A named text with point and an optional mark.
#[derive(Debug, Clone)]
pub struct Buffer {
    name: String,
    path: Option<PathBuf>,
    text: EncodedText,
    point: usize,
    mark: Option<usize>,
    mark_active: bool,
    pub flags: BufferFlags,
    pub tab_width: usize,
}

impl Buffer {
    /// Empty buffer.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_text(name, EncodedText::default())
    }

    /// Buffer over existing text, point at the start.
    pub fn with_text(name: impl Into<String>, text: EncodedText) -> Self {
        Self {
            name: name.into(),
            path: None,
            text,
            point: 0,
            mark: None,
            mark_active: false,
            flags: BufferFlags::default(),
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    /// Visit `path`. A missing file gives an empty buffer bound to the path.
    pub fn visit(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let text = match EncodedText::read_file(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => EncodedText::default(),
            Err(e) => return Err(e),
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut buffer = Self::with_text(name, text);
        buffer.path = Some(path.to_path_buf());
        Ok(buffer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    pub fn text(&self) -> &EncodedText {
        &self.text
    }

    /// Byte length of the text.
    pub fn size(&self) -> usize {
        self.text.len()
    }

    pub fn point(&self) -> usize {
        self.point
    }

    /// Move point, clamped to the text.
    pub fn set_point(&mut self, offset: usize) {
        self.point = offset.min(self.text.len());
    }

    pub fn mark(&self) -> Option<usize> {
        self.mark
    }

    /// Set the mark (without activating it).
    pub fn set_mark(&mut self, offset: usize) {
        self.mark = Some(offset.min(self.text.len()));
    }

    pub fn mark_active(&self) -> bool {
        self.mark_active && self.mark.is_some()
    }

    pub fn activate_mark(&mut self) {
        self.mark_active = true;
    }

    pub fn deactivate_mark(&mut self) {
        self.mark_active = false;
    }

    /// Span between point and mark, if a mark is set.
    pub fn region(&self) -> Option<Region> {
        self.mark
            .map(|mark| Region::new(self.point, mark, &self.text))
    }

    /// Replace the whole content, resetting point and mark.
    pub fn set_text(&mut self, text: EncodedText) {
        self.text = text;
        self.point = 0;
        self.mark = None;
        self.mark_active = false;
    }

    /// Insert bytes (already in this buffer's convention) at point.
    pub fn insert_bytes(&mut self, bytes: &[u8]) {
        let pos = self.point;
        let end = self.text.insert_bytes(pos, bytes);
        self.shift_mark_after_insert(pos, end - pos);
        self.point = end;
        self.flags.modified = true;
    }

    /// Insert text from another convention at point.
    pub fn insert_text(&mut self, text: &EncodedText) {
        let pos = self.point;
        let end = self.text.replace(pos, 0, text);
        self.shift_mark_after_insert(pos, end - pos);
        self.point = end;
        self.flags.modified = true;
    }

    /// Insert one line break at point.
    pub fn insert_newline(&mut self) {
        let marker = self.text.eol().as_bytes();
        self.insert_bytes(marker);
    }

    /// Delete `len` bytes at `pos`, keeping point and mark on the same text.
    pub fn delete(&mut self, pos: usize, len: usize) -> Vec<u8> {
        let removed = self.text.delete(pos, len);
        let end = pos + removed.len();
        let adjust = |offset: usize| {
            if offset > end {
                offset - removed.len()
            } else if offset > pos {
                pos
            } else {
                offset
            }
        };
        self.point = adjust(self.point);
        self.mark = self.mark.map(adjust);
        if !removed.is_empty() {
            self.flags.modified = true;
        }
        removed
    }

    /// Write the text to its file and clear the modified flag.
    pub fn save(&mut self) -> io::Result<&Path> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "buffer has no file"))?;
        self.text.write_file(path)?;
        self.flags.modified = false;
        Ok(path)
    }

    fn shift_mark_after_insert(&mut self, pos: usize, len: usize) {
        if let Some(mark) = self.mark.as_mut() {
            if *mark > pos {
                *mark += len;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Eol;

    #[test]
    fn test_insert_moves_point_and_mark() {
        let mut buffer = Buffer::with_text("t", EncodedText::new("ac"));
        buffer.set_mark(2);
        buffer.set_point(1);
        buffer.insert_bytes(b"b");

        assert_eq!(buffer.text().as_bytes(), b"abc");
        assert_eq!(buffer.point(), 2);
        assert_eq!(buffer.mark(), Some(3));
        assert!(buffer.flags.modified);
    }

    #[test]
    fn test_newline_uses_buffer_convention() {
        let mut buffer = Buffer::with_text("t", EncodedText::new("a\r\nb"));
        buffer.set_point(1);
        buffer.insert_newline();
        assert_eq!(buffer.text().as_bytes(), b"a\r\n\r\nb");
        assert_eq!(buffer.point(), 3);
    }

    #[test]
    fn test_insert_text_converts() {
        let mut buffer = Buffer::with_text("t", EncodedText::with_eol("", Eol::Cr));
        buffer.insert_text(&EncodedText::new("x\ny"));
        assert_eq!(buffer.text().as_bytes(), b"x\ry");
    }

    #[test]
    fn test_delete_adjusts_offsets() {
        let mut buffer = Buffer::with_text("t", EncodedText::new("abcdef"));
        buffer.set_point(5);
        buffer.set_mark(3);
        let removed = buffer.delete(2, 2);

        assert_eq!(removed, b"cd".to_vec());
        assert_eq!(buffer.text().as_bytes(), b"abef");
        assert_eq!(buffer.point(), 3);
        assert_eq!(buffer.mark(), Some(2));
    }

    #[test]
    fn test_region_needs_mark() {
        let mut buffer = Buffer::with_text("t", EncodedText::new("abc"));
        assert!(buffer.region().is_none());
        assert!(!buffer.mark_active());

        buffer.set_mark(0);
        buffer.set_point(2);
        buffer.activate_mark();
        let region = buffer.region().unwrap();
        assert_eq!((region.start, region.end), (0, 2));
        assert!(buffer.mark_active());
    }

    #[test]
    fn test_visit_missing_file_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");

        let mut buffer = Buffer::visit(&path).unwrap();
        assert_eq!(buffer.name(), "new.txt");
        assert_eq!(buffer.size(), 0);

        buffer.insert_bytes(b"hello");
        buffer.save().unwrap();
        assert!(!buffer.flags.modified);
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut buffer = Buffer::new("*scratch*");
        assert!(buffer.save().is_err());
    }
}
