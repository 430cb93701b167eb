use std::ops::Range;

use crate::regex::class::{PosixClass, Shorthand};

/// Lexical tag of a token: which table spelling (or resolved escape form)
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    StarLazy,
    PlusLazy,
    QmarkLazy,
    Star,
    Plus,
    Qmark,
    Caret,
    Dollar,
    Dot,
    Bar,
    Posix(PosixClass),
    Shorthand(Shorthand),
    WordBoundary,
    /// `\x` lead-in; resolved to [`Lexeme::Hex`] once the digits are read.
    HexLead,
    Hex,
    Octal,
    GroupRef,
    /// Backslash-escaped literal, e.g. `\.` or `\n`.
    Escaped(u8),
    /// Bare `\`; only valid when followed by a digit.
    Backslash,
    Ordinary,
}

impl Lexeme {
    /// The literal byte this lexeme stands for when a character class turns
    /// it into an ordinary character.
    fn class_literal(self) -> Option<u8> {
        let b = match self {
            Lexeme::LParen => b'(',
            Lexeme::RParen => b')',
            Lexeme::LBracket => b'[',
            Lexeme::LBrace => b'{',
            Lexeme::RBrace => b'}',
            Lexeme::Star => b'*',
            Lexeme::Plus => b'+',
            Lexeme::Qmark => b'?',
            Lexeme::Caret => b'^',
            Lexeme::Dollar => b'$',
            Lexeme::Dot => b'.',
            Lexeme::Bar => b'|',
            // backspace
            Lexeme::WordBoundary => 0x08,
            _ => return None,
        };
        Some(b)
    }

    pub fn is_lazy_quantifier(self) -> bool {
        matches!(self, Lexeme::StarLazy | Lexeme::PlusLazy | Lexeme::QmarkLazy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    ZeroOrMore,
    OneOrMore,
    ZeroOrOne,
}

impl Quantifier {
    pub fn bounds(self) -> (u32, u32) {
        match self {
            Quantifier::ZeroOrMore => (0, crate::regex::ast::UNBOUNDED),
            Quantifier::OneOrMore => (1, crate::regex::ast::UNBOUNDED),
            Quantifier::ZeroOrOne => (0, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assertion {
    Start,
    End,
    WordBoundary,
}

/// What a token means to the graph builder, after the character-class
/// context has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Literal,
    Any,
    Shorthand(Shorthand),
    Posix(PosixClass),
    GroupRef,
    Quantifier { kind: Quantifier, lazy: bool },
    Assertion(Assertion),
    Alternation,
    GroupOpen,
    GroupClose,
    ClassOpen,
    ClassClose,
    BraceOpen,
    BraceClose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub lexeme: Lexeme,
    pub kind: TokenKind,
    /// Character code for literals, group number for group references.
    pub value: u32,
    pub span: Range<usize>,
}

impl Token {
    pub fn pos(&self) -> usize {
        self.span.start
    }

    pub fn text<'p>(&self, pattern: &'p [u8]) -> &'p [u8] {
        &pattern[self.span.clone()]
    }

    /// An unescaped character from the pattern, e.g. a digit inside braces.
    pub fn is_ordinary(&self, b: u8) -> bool {
        self.lexeme == Lexeme::Ordinary && self.value == u32::from(b)
    }

    pub fn literal(&self) -> Option<u8> {
        match self.kind {
            TokenKind::Literal => u8::try_from(self.value).ok(),
            _ => None,
        }
    }
}

/// Semantic kind of `lexeme` in or out of a character class.
pub fn classify(lexeme: Lexeme, in_class: bool) -> TokenKind {
    if in_class {
        return match lexeme {
            Lexeme::RBracket => TokenKind::ClassClose,
            Lexeme::Shorthand(s) => TokenKind::Shorthand(s),
            Lexeme::Posix(p) => TokenKind::Posix(p),
            Lexeme::GroupRef => TokenKind::GroupRef,
            _ => TokenKind::Literal,
        };
    }

    match lexeme {
        Lexeme::LParen => TokenKind::GroupOpen,
        Lexeme::RParen => TokenKind::GroupClose,
        Lexeme::LBracket => TokenKind::ClassOpen,
        Lexeme::LBrace => TokenKind::BraceOpen,
        Lexeme::RBrace => TokenKind::BraceClose,
        Lexeme::StarLazy => quantifier(Quantifier::ZeroOrMore, true),
        Lexeme::PlusLazy => quantifier(Quantifier::OneOrMore, true),
        Lexeme::QmarkLazy => quantifier(Quantifier::ZeroOrOne, true),
        Lexeme::Star => quantifier(Quantifier::ZeroOrMore, false),
        Lexeme::Plus => quantifier(Quantifier::OneOrMore, false),
        Lexeme::Qmark => quantifier(Quantifier::ZeroOrOne, false),
        Lexeme::Caret => TokenKind::Assertion(Assertion::Start),
        Lexeme::Dollar => TokenKind::Assertion(Assertion::End),
        Lexeme::WordBoundary => TokenKind::Assertion(Assertion::WordBoundary),
        Lexeme::Dot => TokenKind::Any,
        Lexeme::Bar => TokenKind::Alternation,
        Lexeme::Posix(p) => TokenKind::Posix(p),
        Lexeme::Shorthand(s) => TokenKind::Shorthand(s),
        Lexeme::GroupRef => TokenKind::GroupRef,
        Lexeme::RBracket
        | Lexeme::HexLead
        | Lexeme::Hex
        | Lexeme::Octal
        | Lexeme::Escaped(_)
        | Lexeme::Backslash
        | Lexeme::Ordinary => TokenKind::Literal,
    }
}

/// Value carried by a token of `lexeme` spelled `text`.
pub fn literal_value(lexeme: Lexeme, text: &[u8]) -> u32 {
    match lexeme {
        Lexeme::Escaped(b) => u32::from(b),
        other => match other.class_literal() {
            Some(b) => u32::from(b),
            None => text.first().copied().map(u32::from).unwrap_or(0),
        },
    }
}

fn quantifier(kind: Quantifier, lazy: bool) -> TokenKind {
    TokenKind::Quantifier { kind, lazy }
}

/// Longest spelling in [`TOKEN_TABLE`].
pub const MAX_TOKEN_LEN: usize = 10;

/// Recognized spellings, matched by prefix in order. A spelling must come
/// before any of its own prefixes.
pub static TOKEN_TABLE: &[(&str, Lexeme)] = &[
    ("[:alnum:]", Lexeme::Posix(PosixClass::Alnum)),
    ("[:alpha:]", Lexeme::Posix(PosixClass::Alpha)),
    ("[:ascii:]", Lexeme::Posix(PosixClass::Ascii)),
    ("[:blank:]", Lexeme::Posix(PosixClass::Blank)),
    ("[:cntrl:]", Lexeme::Posix(PosixClass::Cntrl)),
    ("[:digit:]", Lexeme::Posix(PosixClass::Digit)),
    ("[:graph:]", Lexeme::Posix(PosixClass::Graph)),
    ("[:lower:]", Lexeme::Posix(PosixClass::Lower)),
    ("[:print:]", Lexeme::Posix(PosixClass::Print)),
    ("[:punct:]", Lexeme::Posix(PosixClass::Punct)),
    ("[:space:]", Lexeme::Posix(PosixClass::Space)),
    ("[:upper:]", Lexeme::Posix(PosixClass::Upper)),
    ("[:word:]", Lexeme::Posix(PosixClass::Word)),
    ("[:xdigit:]", Lexeme::Posix(PosixClass::Xdigit)),
    ("(", Lexeme::LParen),
    (")", Lexeme::RParen),
    ("[", Lexeme::LBracket),
    ("]", Lexeme::RBracket),
    ("{", Lexeme::LBrace),
    ("}", Lexeme::RBrace),
    ("*?", Lexeme::StarLazy),
    ("+?", Lexeme::PlusLazy),
    ("??", Lexeme::QmarkLazy),
    ("*", Lexeme::Star),
    ("+", Lexeme::Plus),
    ("?", Lexeme::Qmark),
    ("^", Lexeme::Caret),
    ("$", Lexeme::Dollar),
    (".", Lexeme::Dot),
    ("|", Lexeme::Bar),
    ("\\x", Lexeme::HexLead),
    ("\\d", Lexeme::Shorthand(Shorthand::Digit)),
    ("\\D", Lexeme::Shorthand(Shorthand::NonDigit)),
    ("\\w", Lexeme::Shorthand(Shorthand::Word)),
    ("\\W", Lexeme::Shorthand(Shorthand::NonWord)),
    ("\\s", Lexeme::Shorthand(Shorthand::Space)),
    ("\\S", Lexeme::Shorthand(Shorthand::NonSpace)),
    ("\\b", Lexeme::WordBoundary),
    ("\\\\", Lexeme::Escaped(b'\\')),
    ("\\.", Lexeme::Escaped(b'.')),
    ("\\*", Lexeme::Escaped(b'*')),
    ("\\+", Lexeme::Escaped(b'+')),
    ("\\?", Lexeme::Escaped(b'?')),
    ("\\(", Lexeme::Escaped(b'(')),
    ("\\)", Lexeme::Escaped(b')')),
    ("\\[", Lexeme::Escaped(b'[')),
    ("\\]", Lexeme::Escaped(b']')),
    ("\\{", Lexeme::Escaped(b'{')),
    ("\\}", Lexeme::Escaped(b'}')),
    ("\\|", Lexeme::Escaped(b'|')),
    ("\\^", Lexeme::Escaped(b'^')),
    ("\\$", Lexeme::Escaped(b'$')),
    ("\\-", Lexeme::Escaped(b'-')),
    ("\\/", Lexeme::Escaped(b'/')),
    ("\\n", Lexeme::Escaped(b'\n')),
    ("\\t", Lexeme::Escaped(b'\t')),
    ("\\r", Lexeme::Escaped(b'\r')),
    ("\\f", Lexeme::Escaped(0x0c)),
    ("\\v", Lexeme::Escaped(0x0b)),
    ("\\", Lexeme::Backslash),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longer_spellings_precede_their_prefixes() {
        for (i, (spelling, lexeme)) in TOKEN_TABLE.iter().enumerate() {
            for (earlier, _) in &TOKEN_TABLE[..i] {
                assert!(
                    !spelling.starts_with(earlier) || spelling == earlier,
                    "{spelling:?} is shadowed by {earlier:?}"
                );
            }
            assert!(spelling.len() <= MAX_TOKEN_LEN);
            if let Lexeme::Posix(class) = lexeme {
                assert_eq!(*spelling, format!("[:{}:]", class.name()));
            }
        }
    }

    #[test]
    fn metachars_lose_meaning_in_class() {
        assert_eq!(classify(Lexeme::Star, true), TokenKind::Literal);
        assert_eq!(classify(Lexeme::RBracket, true), TokenKind::ClassClose);
        assert_eq!(
            classify(Lexeme::WordBoundary, false),
            TokenKind::Assertion(Assertion::WordBoundary)
        );
        assert_eq!(literal_value(Lexeme::WordBoundary, b"\\b"), 8);
    }
}
