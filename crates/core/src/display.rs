//! Display widths of buffer bytes.
//!
//! Tabs expand to the next tab stop, `^@`..`^Z` stand for NUL and the
//! control letters, and any other unprintable byte is shown as
//! backslash-octal.

use quill_keyboard::is_printable;

/// Screen representation of `byte` when drawn at display column `column`.
pub fn make_char_printable(byte: u8, column: usize, tab_width: usize) -> String {
    match byte {
        b'\t' => " ".repeat(tab_advance(column, tab_width)),
        b if is_printable(b) => char::from(b).to_string(),
        0 => "^@".to_string(),
        1..=26 => format!("^{}", char::from(b'A' + byte - 1)),
        _ => format!("\\{:o}", byte),
    }
}

/// Columns taken by `byte` drawn at `column`.
pub fn char_width(byte: u8, column: usize, tab_width: usize) -> usize {
    match byte {
        b'\t' => tab_advance(column, tab_width),
        b if is_printable(b) => 1,
        0..=26 => 2,
        _ => 1 + format!("{:o}", byte).len(),
    }
}

/// Columns taken by `bytes` drawn from column 0.
pub fn string_width(bytes: &[u8], tab_width: usize) -> usize {
    bytes
        .iter()
        .fold(0, |column, &byte| column + char_width(byte, column, tab_width))
}

fn tab_advance(column: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    tab_width - column % tab_width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_forms() {
        assert_eq!(make_char_printable(b'a', 0, 8), "a");
        assert_eq!(make_char_printable(0, 0, 8), "^@");
        assert_eq!(make_char_printable(1, 0, 8), "^A");
        assert_eq!(make_char_printable(26, 0, 8), "^Z");
        assert_eq!(make_char_printable(27, 0, 8), "\\33");
        assert_eq!(make_char_printable(0xff, 0, 8), "\\377");
    }

    #[test]
    fn test_tab_expands_to_stop() {
        assert_eq!(make_char_printable(b'\t', 0, 8), " ".repeat(8));
        assert_eq!(make_char_printable(b'\t', 3, 8), " ".repeat(5));
        assert_eq!(make_char_printable(b'\t', 4, 4), " ".repeat(4));
        assert_eq!(make_char_printable(b'\t', 2, 0), " ");
    }

    #[test]
    fn test_widths_match_forms() {
        for byte in 0..=255u8 {
            for column in [0, 5] {
                assert_eq!(
                    char_width(byte, column, 8),
                    make_char_printable(byte, column, 8).len()
                );
            }
        }
        assert_eq!(string_width(b"a\tb", 8), 9);
    }
}
