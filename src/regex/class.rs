//! Character classes: membership sets, the named POSIX and shorthand sets,
//! and the resolver for bracket expressions.

use core::fmt;

use crate::regex::error::{ErrorKind, ParseError};
use crate::regex::token::{Lexeme, Token, TokenKind};

/// Highest character value a pattern may describe.
pub const CHAR_MAX: u8 = 0x7f;

/// Membership set over `0..=CHAR_MAX`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ClassSet {
    bits: u128,
}

impl ClassSet {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    pub const fn full() -> Self {
        Self { bits: u128::MAX }
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub const fn contains(&self, b: u8) -> bool {
        b <= CHAR_MAX && self.bits & (1 << b) != 0
    }

    pub fn insert(&mut self, b: u8) {
        if b <= CHAR_MAX {
            self.bits |= 1 << b;
        }
    }

    /// Inserts `low..=high`, both ends clamped to `CHAR_MAX`.
    pub fn insert_range(&mut self, low: u8, high: u8) {
        for b in low..=high.min(CHAR_MAX) {
            self.insert(b);
        }
    }

    pub fn union_with(&mut self, other: &ClassSet) {
        self.bits |= other.bits;
    }

    pub const fn complement(&self) -> ClassSet {
        ClassSet { bits: !self.bits }
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=CHAR_MAX).filter(|&b| self.contains(b))
    }

    /// Maximal runs of consecutive members, as inclusive ranges.
    pub fn ranges(&self) -> Vec<(u8, u8)> {
        let mut out: Vec<(u8, u8)> = Vec::new();
        for b in self.iter() {
            match out.last_mut() {
                Some((_, high)) if *high + 1 == b => *high = b,
                _ => out.push((b, b)),
            }
        }
        out
    }

    fn from_fn(f: impl Fn(u8) -> bool) -> ClassSet {
        let mut set = ClassSet::new();
        for b in 0..=CHAR_MAX {
            if f(b) {
                set.insert(b);
            }
        }
        set
    }
}

impl fmt::Debug for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (low, high) in self.ranges() {
            write_class_char(f, low)?;
            if high > low {
                write!(f, "-")?;
                write_class_char(f, high)?;
            }
        }
        write!(f, "]")
    }
}

pub(crate) fn write_class_char(f: &mut impl fmt::Write, b: u8) -> fmt::Result {
    match b {
        b'\\' | b']' | b'-' | b'^' => write!(f, "\\{}", b as char),
        0x21..=0x7e => write!(f, "{}", b as char),
        _ => write!(f, "\\x{b:02x}"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosixClass {
    Alnum,
    Alpha,
    Ascii,
    Blank,
    Cntrl,
    Digit,
    Graph,
    Lower,
    Print,
    Punct,
    Space,
    Upper,
    Word,
    Xdigit,
}

impl PosixClass {
    pub fn name(self) -> &'static str {
        match self {
            PosixClass::Alnum => "alnum",
            PosixClass::Alpha => "alpha",
            PosixClass::Ascii => "ascii",
            PosixClass::Blank => "blank",
            PosixClass::Cntrl => "cntrl",
            PosixClass::Digit => "digit",
            PosixClass::Graph => "graph",
            PosixClass::Lower => "lower",
            PosixClass::Print => "print",
            PosixClass::Punct => "punct",
            PosixClass::Space => "space",
            PosixClass::Upper => "upper",
            PosixClass::Word => "word",
            PosixClass::Xdigit => "xdigit",
        }
    }

    pub fn set(self) -> ClassSet {
        match self {
            PosixClass::Alnum => ClassSet::from_fn(|b| b.is_ascii_alphanumeric()),
            PosixClass::Alpha => ClassSet::from_fn(|b| b.is_ascii_alphabetic()),
            PosixClass::Ascii => ClassSet::full(),
            PosixClass::Blank => ClassSet::from_fn(|b| b == b' ' || b == b'\t'),
            PosixClass::Cntrl => ClassSet::from_fn(|b| b.is_ascii_control()),
            PosixClass::Digit => ClassSet::from_fn(|b| b.is_ascii_digit()),
            PosixClass::Graph => ClassSet::from_fn(|b| b.is_ascii_graphic()),
            PosixClass::Lower => ClassSet::from_fn(|b| b.is_ascii_lowercase()),
            PosixClass::Print => ClassSet::from_fn(|b| b.is_ascii_graphic() || b == b' '),
            PosixClass::Punct => ClassSet::from_fn(|b| b.is_ascii_punctuation()),
            // includes vertical tab, unlike u8::is_ascii_whitespace
            PosixClass::Space => ClassSet::from_fn(|b| matches!(b, b' ' | b'\t'..=b'\r')),
            PosixClass::Upper => ClassSet::from_fn(|b| b.is_ascii_uppercase()),
            PosixClass::Word => ClassSet::from_fn(|b| b.is_ascii_alphanumeric() || b == b'_'),
            PosixClass::Xdigit => ClassSet::from_fn(|b| b.is_ascii_hexdigit()),
        }
    }
}

/// `\d \D \w \W \s \S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shorthand {
    Digit,
    NonDigit,
    Word,
    NonWord,
    Space,
    NonSpace,
}

impl Shorthand {
    /// The named set this shorthand refers to, and whether it is inverted.
    pub fn base(self) -> (PosixClass, bool) {
        match self {
            Shorthand::Digit => (PosixClass::Digit, false),
            Shorthand::NonDigit => (PosixClass::Digit, true),
            Shorthand::Word => (PosixClass::Word, false),
            Shorthand::NonWord => (PosixClass::Word, true),
            Shorthand::Space => (PosixClass::Space, false),
            Shorthand::NonSpace => (PosixClass::Space, true),
        }
    }

    pub fn class(self) -> CharClass {
        let (posix, inverted) = self.base();
        CharClass {
            set: posix.set(),
            inverted,
        }
    }

    /// Members of this shorthand with the inversion applied.
    pub fn members(self) -> ClassSet {
        self.class().effective()
    }
}

/// A resolved bracket expression or shorthand class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharClass {
    pub set: ClassSet,
    pub inverted: bool,
}

impl CharClass {
    pub fn matches(&self, b: u8) -> bool {
        b <= CHAR_MAX && self.set.contains(b) != self.inverted
    }

    /// The set of characters this class accepts.
    pub fn effective(&self) -> ClassSet {
        if self.inverted {
            self.set.complement()
        } else {
            self.set
        }
    }
}

/// Resolves the bracket expression opened by `tokens[open]`.
///
/// Returns the class and the index of its closing `]`.
pub fn resolve(tokens: &[Token], open: usize) -> Result<(CharClass, usize), ParseError> {
    let open_pos = tokens[open].pos();
    let close = tokens[open + 1..]
        .iter()
        .position(|t| t.kind == TokenKind::ClassClose)
        .map(|i| open + 1 + i)
        .ok_or(ParseError::new(ErrorKind::NoClosingBracket, open_pos))?;

    let mut at = open + 1;
    let mut inverted = false;
    if at < close && tokens[at].lexeme == Lexeme::Caret {
        inverted = true;
        at += 1;
    }
    if at == close {
        return Err(ParseError::new(ErrorKind::InvalidCharClass, open_pos));
    }

    let mut set = ClassSet::new();
    while at < close {
        let tok = &tokens[at];
        match tok.kind {
            TokenKind::Shorthand(s) => set.union_with(&s.members()),
            TokenKind::Posix(p) => set.union_with(&p.set()),
            TokenKind::GroupRef => {
                return Err(ParseError::new(ErrorKind::IllegalEscape, tok.pos()));
            }
            _ => {
                let Some(low) = tok.literal() else {
                    return Err(ParseError::new(ErrorKind::IllegalChar, tok.pos()));
                };
                if let Some(high) = range_end(tokens, at, close) {
                    if low > high {
                        return Err(ParseError::new(ErrorKind::InvalidCharRange, tok.pos()));
                    }
                    set.insert_range(low, high);
                    at += 3;
                    continue;
                }
                set.insert(low);
            }
        }
        at += 1;
    }

    Ok((CharClass { set, inverted }, close))
}

/// Upper bound of a `low-high` range starting at `tokens[at]`, if there is one.
fn range_end(tokens: &[Token], at: usize, close: usize) -> Option<u8> {
    if at + 2 >= close || !tokens[at + 1].is_ordinary(b'-') {
        return None;
    }
    tokens[at + 2].literal()
}

#[cfg(test)]
#[path = "class_tests.rs"]
mod class_tests;
