//! Textual chord grammar.
//!
//! ```text
//! sequence  = chord (whitespace chord)*
//! chord     = modifier* key
//! modifier  = "C-" | "M-"
//! key       = special-name | printable-ascii-char
//! ```
//!
//! Examples: `"C-x C-f"`, `"M-%"`, `"C-x 4 <f1>"`.

use thiserror::Error;

use crate::chord::{is_printable, Chord, SPECIAL_KEYS};

/// A literal that does not describe a valid key sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid key sequence `{literal}` at position {position}: {message}")]
pub struct KeyParseError {
    /// The full literal being parsed.
    pub literal: String,
    /// Byte offset of the offending chord.
    pub position: usize,
    /// Human-readable description.
    pub message: String,
}

/// Parse a single chord such as `"C-x"` or `"<home>"`.
pub fn parse_chord(s: &str) -> Result<Chord, KeyParseError> {
    parse_chord_at(s, s, 0)
}

/// Parse a whitespace-separated chord sequence.
///
/// An empty (or all-whitespace) literal is an error.
pub fn parse_sequence(s: &str) -> Result<Vec<Chord>, KeyParseError> {
    let mut keys = Vec::new();
    let mut rest = s;

    loop {
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        let position = s.len() - trimmed.len();
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        keys.push(parse_chord_at(s, &trimmed[..end], position)?);
        rest = &trimmed[end..];
    }

    if keys.is_empty() {
        return Err(KeyParseError {
            literal: s.to_string(),
            position: 0,
            message: "empty key sequence".to_string(),
        });
    }

    Ok(keys)
}

fn parse_chord_at(literal: &str, token: &str, position: usize) -> Result<Chord, KeyParseError> {
    let error = |message: String| KeyParseError {
        literal: literal.to_string(),
        position,
        message,
    };

    let mut ctrl = false;
    let mut meta = false;
    let mut rest = token;

    // A bare "C-" or "M-" is a key name attempt, not a modifier
    while rest.len() > 2 {
        if let Some(tail) = rest.strip_prefix("C-") {
            ctrl = true;
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("M-") {
            meta = true;
            rest = tail;
        } else {
            break;
        }
    }

    let mut chord = parse_key(rest).ok_or_else(|| {
        if rest.is_empty() {
            error("missing key".to_string())
        } else if rest == "C-" || rest == "M-" {
            error(format!("modifier `{rest}` without a key"))
        } else {
            error(format!("unknown key `{rest}`"))
        }
    })?;

    if ctrl {
        chord = match chord.printable() {
            Some(byte) => Chord::ctrl(byte),
            None => chord.with_ctrl(),
        };
    }
    if meta {
        chord = chord.with_meta();
    }

    Ok(chord)
}

fn parse_key(s: &str) -> Option<Chord> {
    if let Some((_, chord)) = SPECIAL_KEYS.iter().find(|(name, _)| *name == s) {
        return Some(*chord);
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii() && is_printable(ch as u8) => Some(Chord::key(ch as u8)),
        _ => None,
    }
}
