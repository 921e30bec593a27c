//! Chord codes.
//!
//! A chord is one logical keypress: a key code in the low nine bits plus
//! the control and meta modifier bits. Codes below 0x100 are bytes; codes
//! from 0o402 upward are special keys (arrows, function keys, ...).

use std::fmt;

/// One keypress including modifier bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chord(u32);

impl Chord {
    /// Control modifier bit
    pub const CTRL: u32 = 0o1000;
    /// Meta modifier bit
    pub const META: u32 = 0o2000;

    const KEY_MASK: u32 = 0o777;

    pub const TAB: Chord = Chord(0o402);
    pub const RET: Chord = Chord(0o403);
    pub const PAGE_UP: Chord = Chord(0o404);
    pub const PAGE_DOWN: Chord = Chord(0o405);
    pub const HOME: Chord = Chord(0o406);
    pub const END: Chord = Chord(0o407);
    pub const DELETE: Chord = Chord(0o410);
    pub const BACKSPACE: Chord = Chord(0o411);
    pub const INSERT: Chord = Chord(0o412);
    pub const LEFT: Chord = Chord(0o413);
    pub const RIGHT: Chord = Chord(0o414);
    pub const UP: Chord = Chord(0o415);
    pub const DOWN: Chord = Chord(0o416);
    pub const F1: Chord = Chord(0o420);

    /// Escape; as the first chord of a sequence it stands for meta.
    pub const ESC: Chord = Chord(0x1b);

    /// The reserved chord that aborts any multi-chord read (`C-g`).
    pub const CANCEL: Chord = Chord(Self::CTRL | b'g' as u32);

    /// Build a chord from a raw code.
    pub const fn from_code(code: u32) -> Self {
        Chord(code)
    }

    /// Unmodified byte key.
    pub const fn key(byte: u8) -> Self {
        Chord(byte as u32)
    }

    /// Control + byte. Letters are stored lowercase.
    pub const fn ctrl(byte: u8) -> Self {
        Chord(Self::CTRL | byte.to_ascii_lowercase() as u32)
    }

    /// Function key `n` (1-12).
    pub const fn function(n: u8) -> Self {
        Chord(Self::F1.0 + (n as u32 - 1))
    }

    /// Same chord with the control bit added.
    pub const fn with_ctrl(self) -> Self {
        Chord(self.0 | Self::CTRL)
    }

    /// Same chord with the meta bit added.
    pub const fn with_meta(self) -> Self {
        Chord(self.0 | Self::META)
    }

    /// Raw code.
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Key code without modifier bits.
    pub const fn base(self) -> u32 {
        self.0 & Self::KEY_MASK
    }

    pub const fn is_ctrl(self) -> bool {
        self.0 & Self::CTRL != 0
    }

    pub const fn is_meta(self) -> bool {
        self.0 & Self::META != 0
    }

    /// Low byte of the code.
    pub const fn low_byte(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Decimal digit value of the low byte, if it is one.
    pub fn digit(self) -> Option<u32> {
        let byte = self.low_byte();
        byte.is_ascii_digit().then(|| u32::from(byte - b'0'))
    }

    /// The byte to insert for an unmodified printable key.
    pub fn printable(self) -> Option<u8> {
        if self.0 < 0x100 && is_printable(self.0 as u8) {
            Some(self.0 as u8)
        } else {
            None
        }
    }
}

/// Printing ASCII character (space through tilde).
pub fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

/// Special key names, shared by the parser and the formatter.
pub(crate) const SPECIAL_KEYS: &[(&str, Chord)] = &[
    ("TAB", Chord::TAB),
    ("RET", Chord::RET),
    ("SPC", Chord::key(b' ')),
    ("ESC", Chord::ESC),
    ("DEL", Chord::key(0x7f)),
    ("<prior>", Chord::PAGE_UP),
    ("<next>", Chord::PAGE_DOWN),
    ("<home>", Chord::HOME),
    ("<end>", Chord::END),
    ("<delete>", Chord::DELETE),
    ("<backspace>", Chord::BACKSPACE),
    ("<insert>", Chord::INSERT),
    ("<left>", Chord::LEFT),
    ("<right>", Chord::RIGHT),
    ("<up>", Chord::UP),
    ("<down>", Chord::DOWN),
    ("<f1>", Chord::function(1)),
    ("<f2>", Chord::function(2)),
    ("<f3>", Chord::function(3)),
    ("<f4>", Chord::function(4)),
    ("<f5>", Chord::function(5)),
    ("<f6>", Chord::function(6)),
    ("<f7>", Chord::function(7)),
    ("<f8>", Chord::function(8)),
    ("<f9>", Chord::function(9)),
    ("<f10>", Chord::function(10)),
    ("<f11>", Chord::function(11)),
    ("<f12>", Chord::function(12)),
];

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ctrl() {
            f.write_str("C-")?;
        }
        if self.is_meta() {
            f.write_str("M-")?;
        }

        let base = Chord(self.base());
        if let Some((name, _)) = SPECIAL_KEYS.iter().find(|(_, chord)| *chord == base) {
            return f.write_str(name);
        }

        match base.printable() {
            Some(byte) => write!(f, "{}", byte as char),
            None => write!(f, "\\{:o}", base.0),
        }
    }
}

/// Space-joined human-readable names of a chord sequence.
pub fn sequence_to_string(keys: &[Chord]) -> String {
    keys.iter()
        .map(|chord| chord.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_lowercases_letters() {
        assert_eq!(Chord::ctrl(b'X'), Chord::ctrl(b'x'));
        assert!(Chord::ctrl(b'x').is_ctrl());
        assert!(!Chord::ctrl(b'x').is_meta());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Chord::ctrl(b'x').to_string(), "C-x");
        assert_eq!(Chord::key(b'%').with_meta().to_string(), "M-%");
        assert_eq!(Chord::key(b' ').to_string(), "SPC");
        assert_eq!(Chord::RET.to_string(), "RET");
        assert_eq!(Chord::function(12).to_string(), "<f12>");
        assert_eq!(Chord::LEFT.with_ctrl().with_meta().to_string(), "C-M-<left>");
        assert_eq!(Chord::key(0x01).to_string(), "\\1");
    }

    #[test]
    fn test_sequence_to_string() {
        let keys = [Chord::ctrl(b'x'), Chord::ctrl(b'q')];
        assert_eq!(sequence_to_string(&keys), "C-x C-q");
        assert_eq!(sequence_to_string(&[]), "");
    }

    #[test]
    fn test_digit_and_printable() {
        assert_eq!(Chord::key(b'7').with_meta().digit(), Some(7));
        assert_eq!(Chord::key(b'a').digit(), None);
        assert_eq!(Chord::key(b'a').printable(), Some(b'a'));
        assert_eq!(Chord::ctrl(b'a').printable(), None);
        assert_eq!(Chord::TAB.printable(), None);
    }

    #[test]
    fn test_ordering_follows_code() {
        assert!(Chord::key(b'a') < Chord::key(b'b'));
        assert!(Chord::key(b'z') < Chord::TAB);
        assert!(Chord::TAB < Chord::ctrl(b'a'));
        assert!(Chord::ctrl(b'a') < Chord::key(b'a').with_meta());
    }
}
