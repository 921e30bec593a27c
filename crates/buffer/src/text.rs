//! Byte text with a fixed end-of-line convention.
//!
//! Line boundaries are occurrences of the detected marker string only. In a
//! document with mixed line endings, markers of the other kinds are ordinary
//! line content.

use std::fs;
use std::io;
use std::path::Path;

use memchr::memmem;

/// Maximum number of line endings inspected when detecting the convention.
const MAX_EOL_CHECK_COUNT: usize = 3;

/// End-of-line convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Eol {
    /// Unix `\n`
    #[default]
    Lf,
    /// Classic Mac `\r`
    Cr,
    /// DOS `\r\n`
    CrLf,
}

impl Eol {
    /// Marker bytes.
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Eol::Lf => b"\n",
            Eol::Cr => b"\r",
            Eol::CrLf => b"\r\n",
        }
    }

    /// Marker length in bytes.
    pub fn len(self) -> usize {
        self.as_bytes().len()
    }

    /// Detect the convention of `bytes`.
    ///
    /// Looks at up to three line endings. The first one fixes the
    /// convention; a later one of a different kind falls back to LF.
    /// Text without line endings is LF.
    pub fn detect(bytes: &[u8]) -> Eol {
        let mut detected: Option<Eol> = None;
        let mut seen = 0;
        let mut i = 0;

        while i < bytes.len() && seen < MAX_EOL_CHECK_COUNT {
            let this = match bytes[i] {
                b'\n' => Eol::Lf,
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    i += 1;
                    Eol::CrLf
                }
                b'\r' => Eol::Cr,
                _ => {
                    i += 1;
                    continue;
                }
            };
            seen += 1;
            i += 1;

            match detected {
                None => detected = Some(this),
                Some(eol) if eol != this => return Eol::Lf,
                Some(_) => {}
            }
        }

        detected.unwrap_or_default()
    }
}

/// A byte sequence plus the line-ending marker that delimits its lines.
///
/// The marker is fixed at construction; [`replace`](Self::replace) converts
/// inserted text to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedText {
    bytes: Vec<u8>,
    eol: Eol,
}

impl EncodedText {
    /// Wrap `bytes`, detecting their line-ending convention.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let eol = Eol::detect(&bytes);
        Self { bytes, eol }
    }

    /// Wrap `bytes` with an explicit convention.
    pub fn with_eol(bytes: impl Into<Vec<u8>>, eol: Eol) -> Self {
        Self {
            bytes: bytes.into(),
            eol,
        }
    }

    /// Read a file and detect its convention.
    pub fn read_file(path: impl AsRef<Path>) -> io::Result<Self> {
        fs::read(path).map(Self::new)
    }

    /// Write the raw bytes to a file.
    pub fn write_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, &self.bytes)
    }

    pub fn eol(&self) -> Eol {
        self.eol
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte at `offset`.
    pub fn get(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    /// Start of the line containing `offset`: just past the nearest
    /// preceding marker, or 0.
    pub fn start_of_line(&self, offset: usize) -> usize {
        let offset = offset.min(self.bytes.len());
        let marker = self.eol.as_bytes();
        memmem::rfind(&self.bytes[..offset], marker)
            .map(|pos| pos + marker.len())
            .unwrap_or(0)
    }

    /// End of the line containing `offset`: the nearest following marker,
    /// or the text length.
    pub fn end_of_line(&self, offset: usize) -> usize {
        let offset = offset.min(self.bytes.len());
        memmem::find(&self.bytes[offset..], self.eol.as_bytes())
            .map(|pos| offset + pos)
            .unwrap_or(self.bytes.len())
    }

    /// Start of the line before the one containing `offset`, or `None` on
    /// the first line.
    pub fn prev_line(&self, offset: usize) -> Option<usize> {
        let start = self.start_of_line(offset);
        if start == 0 {
            None
        } else {
            Some(self.start_of_line(start - self.eol.len()))
        }
    }

    /// Start of the line after the one containing `offset`, or `None` on
    /// the last line.
    pub fn next_line(&self, offset: usize) -> Option<usize> {
        let end = self.end_of_line(offset);
        if end == self.bytes.len() {
            None
        } else {
            Some(end + self.eol.len())
        }
    }

    /// Length of the line containing `offset`, excluding its marker.
    pub fn line_len(&self, offset: usize) -> usize {
        self.end_of_line(offset) - self.start_of_line(offset)
    }

    /// Bytes of the line containing `offset`, excluding its marker.
    pub fn line(&self, offset: usize) -> &[u8] {
        &self.bytes[self.start_of_line(offset)..self.end_of_line(offset)]
    }

    /// Zero-based number of the line containing `offset`.
    pub fn line_number(&self, offset: usize) -> usize {
        let start = self.start_of_line(offset);
        memmem::find_iter(&self.bytes[..start], self.eol.as_bytes()).count()
    }

    /// Offset of the start of line `n`, clamped to the last line.
    pub fn line_start(&self, n: usize) -> usize {
        let mut offset = 0;
        for _ in 0..n {
            match self.next_line(offset) {
                Some(next) => offset = next,
                None => break,
            }
        }
        offset
    }

    /// Remove `delete` bytes at `pos`, then insert `insertion` there.
    ///
    /// The insertion is split at its own marker and re-joined with this
    /// text's marker, so each line's payload is copied unchanged while the
    /// separators follow this text's convention. Returns the offset just
    /// past the inserted bytes.
    pub fn replace(&mut self, pos: usize, delete: usize, insertion: &EncodedText) -> usize {
        let pos = pos.min(self.bytes.len());
        let end = (pos + delete).min(self.bytes.len());

        let converted = if insertion.eol == self.eol {
            insertion.bytes.clone()
        } else {
            convert_eol(&insertion.bytes, insertion.eol, self.eol)
        };

        let inserted = converted.len();
        self.bytes.splice(pos..end, converted);
        pos + inserted
    }

    /// Append `src` (converted to this text's convention).
    pub fn cat(&mut self, src: &EncodedText) {
        self.replace(self.bytes.len(), 0, src);
    }

    /// Insert raw bytes at `pos`. The bytes are taken as already using
    /// this text's convention.
    pub fn insert_bytes(&mut self, pos: usize, bytes: &[u8]) -> usize {
        let pos = pos.min(self.bytes.len());
        self.bytes.splice(pos..pos, bytes.iter().copied());
        pos + bytes.len()
    }

    /// Insert one line break at `pos`.
    pub fn insert_newline(&mut self, pos: usize) -> usize {
        self.insert_bytes(pos, self.eol.as_bytes())
    }

    /// Remove `len` bytes at `pos`, returning them.
    pub fn delete(&mut self, pos: usize, len: usize) -> Vec<u8> {
        let pos = pos.min(self.bytes.len());
        let end = (pos + len).min(self.bytes.len());
        self.bytes.drain(pos..end).collect()
    }
}

fn convert_eol(bytes: &[u8], from: Eol, to: Eol) -> Vec<u8> {
    let from = from.as_bytes();
    let to = to.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut last = 0;

    for pos in memmem::find_iter(bytes, from) {
        out.extend_from_slice(&bytes[last..pos]);
        out.extend_from_slice(to);
        last = pos + from.len();
    }
    out.extend_from_slice(&bytes[last..]);
    out
}
