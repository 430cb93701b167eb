//! Pattern tokenizer.
//!
//! Matches the pattern against [`TOKEN_TABLE`] by prefix, resolves numeric
//! escapes and tracks whether the cursor is inside a bracket expression,
//! where most metacharacters are plain characters.

use crate::regex::class::CHAR_MAX;
use crate::regex::error::{ErrorKind, ParseError};
use crate::regex::scan::{self, DIGITS, parse_int};
use crate::regex::token::{
    Lexeme, MAX_TOKEN_LEN, TOKEN_TABLE, Token, TokenKind, classify, literal_value,
};

pub fn tokenize(pattern: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(pattern.as_bytes()).run()
}

struct Lexer<'p> {
    pattern: &'p [u8],
    at: usize,
    in_class: bool,
    tokens: Vec<Token>,
}

impl<'p> Lexer<'p> {
    fn new(pattern: &'p [u8]) -> Self {
        Self {
            pattern,
            at: 0,
            in_class: false,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        // never more tokens than bytes
        self.tokens
            .try_reserve_exact(self.pattern.len())
            .map_err(|e| ParseError::new(e.into(), 0))?;

        while self.at < self.pattern.len() {
            let tok = self.next_token()?;
            match tok.kind {
                TokenKind::ClassOpen => self.in_class = true,
                TokenKind::ClassClose => self.in_class = false,
                _ => {}
            }
            self.tokens.push(tok);
        }

        Ok(self.tokens)
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let start = self.at;
        let rest = scan::substr(self.pattern, start, start + MAX_TOKEN_LEN);

        if rest[0] > CHAR_MAX {
            return Err(ParseError::new(ErrorKind::IllegalChar, start));
        }

        let Some((spelling, lexeme)) = self.lookup(rest) else {
            self.at += 1;
            return Ok(self.token(Lexeme::Ordinary, u32::from(rest[0]), start));
        };
        self.at += spelling.len();

        match lexeme {
            Lexeme::HexLead => self.hex_escape(start),
            Lexeme::Backslash => self.digit_escape(start),
            _ => {
                if self.in_class && lexeme == Lexeme::LBracket {
                    self.check_posix_name(start)?;
                }
                let text = &self.pattern[start..self.at];
                Ok(self.token(lexeme, literal_value(lexeme, text), start))
            }
        }
    }

    /// First table entry whose spelling prefixes `rest`. Inside a class the
    /// lazy quantifier spellings do not apply: `*?` is two literals there.
    fn lookup(&self, rest: &[u8]) -> Option<(&'static str, Lexeme)> {
        TOKEN_TABLE
            .iter()
            .copied()
            .filter(|(_, lexeme)| !(self.in_class && lexeme.is_lazy_quantifier()))
            .find(|(spelling, _)| scan::starts_with(rest, spelling))
    }

    fn token(&self, lexeme: Lexeme, value: u32, start: usize) -> Token {
        Token {
            lexeme,
            kind: classify(lexeme, self.in_class),
            value,
            span: start..self.at,
        }
    }

    /// `\xHH`: exactly two hex digits.
    fn hex_escape(&mut self, start: usize) -> Result<Token, ParseError> {
        const NDIGS: usize = 2;
        let digits = scan::substr(self.pattern, self.at, self.at + NDIGS);
        let hex = parse_int(digits, 16);

        if !hex.is_complete(NDIGS) {
            return Err(ParseError::new(ErrorKind::InvalidHex, start));
        }
        if hex.value > u32::from(CHAR_MAX) {
            return Err(ParseError::new(ErrorKind::HexTooBig, start));
        }

        self.at += NDIGS;
        Ok(self.token(Lexeme::Hex, hex.value, start))
    }

    /// `\` followed by digits: an octal character code when the first digit
    /// is `0` or three octal digits follow, a group reference otherwise.
    fn digit_escape(&mut self, start: usize) -> Result<Token, ParseError> {
        let Some(&first) = self.pattern.get(self.at) else {
            return Err(ParseError::new(ErrorKind::TrailingBackslash, start));
        };
        if !scan::has_byte(DIGITS, first) {
            return Err(ParseError::new(ErrorKind::IllegalEscape, start));
        }

        let oct = parse_int(scan::substr(self.pattern, self.at, self.at + 3), 8);
        let dec = parse_int(scan::substr(self.pattern, self.at, self.at + 2), 10);

        if first == b'0' || oct.end == 3 {
            if oct.value > u32::from(CHAR_MAX) {
                return Err(ParseError::new(ErrorKind::OctTooBig, start));
            }
            self.at += oct.end;
            return Ok(self.token(Lexeme::Octal, oct.value, start));
        }

        if dec.end == 0 {
            return Err(ParseError::new(ErrorKind::IllegalEscape, start));
        }
        if !(1..=99).contains(&dec.value) {
            return Err(ParseError::new(ErrorKind::InvalidGroup, start));
        }
        self.at += dec.end;
        Ok(self.token(Lexeme::GroupRef, dec.value, start))
    }

    /// Rejects `[:name:]` inside a class when `name` is not a POSIX class.
    /// Known names never get here, the table matches them first.
    fn check_posix_name(&self, start: usize) -> Result<(), ParseError> {
        let rest = &self.pattern[start..];
        let Some(body) = rest.strip_prefix(b"[:") else {
            return Ok(());
        };
        let name_len = body.iter().take_while(|b| b.is_ascii_alphabetic()).count();
        if name_len > 0 && body[name_len..].starts_with(b":]") {
            return Err(ParseError::new(ErrorKind::InvalidPosixClass, start));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod lexer_tests;
