use super::tokenize;
use crate::regex::class::{PosixClass, Shorthand};
use crate::regex::error::ErrorKind;
use crate::regex::token::{Assertion, Lexeme, Quantifier, Token, TokenKind};

fn kinds(pattern: &str) -> Vec<TokenKind> {
    tokenize(pattern)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn single(pattern: &str) -> Token {
    let tokens = tokenize(pattern).unwrap();
    assert_eq!(tokens.len(), 1, "{tokens:?}");
    tokens.into_iter().next().unwrap()
}

fn error(pattern: &str) -> ErrorKind {
    tokenize(pattern).unwrap_err().kind
}

#[test]
fn tokens_cover_the_whole_pattern() {
    let pattern = r"^(a|b)*?[^\d[:alpha:]x-z]{2,}\x41\101\0\12.$";
    let tokens = tokenize(pattern).unwrap();

    let mut end = 0;
    for tok in &tokens {
        assert_eq!(tok.span.start, end);
        end = tok.span.end;
    }
    assert_eq!(end, pattern.len());
}

#[test]
fn lazy_quantifier_wins_over_plain() {
    assert_eq!(
        kinds("a*?"),
        [
            TokenKind::Literal,
            TokenKind::Quantifier {
                kind: Quantifier::ZeroOrMore,
                lazy: true
            },
        ]
    );
    assert_eq!(
        kinds("a+"),
        [
            TokenKind::Literal,
            TokenKind::Quantifier {
                kind: Quantifier::OneOrMore,
                lazy: false
            },
        ]
    );
}

#[test]
fn hex_escape() {
    let tok = single(r"\x41");
    assert_eq!(tok.kind, TokenKind::Literal);
    assert_eq!(tok.lexeme, Lexeme::Hex);
    assert_eq!(tok.value, 65);
    assert_eq!(tok.span, 0..4);

    assert_eq!(error(r"\xZZ"), ErrorKind::InvalidHex);
    assert_eq!(error(r"\x4"), ErrorKind::InvalidHex);
    assert_eq!(error(r"\xFF"), ErrorKind::HexTooBig);
}

#[test]
fn digit_escapes() {
    let group = single(r"\12");
    assert_eq!(group.kind, TokenKind::GroupRef);
    assert_eq!(group.value, 12);

    let octal = single(r"\101");
    assert_eq!(octal.kind, TokenKind::Literal);
    assert_eq!(octal.lexeme, Lexeme::Octal);
    assert_eq!(octal.value, 65);

    let nul = single(r"\0");
    assert_eq!(nul.lexeme, Lexeme::Octal);
    assert_eq!(nul.value, 0);

    // '8' is not octal, so two decimal digits name a group
    assert_eq!(single(r"\18").value, 18);
    assert_eq!(error(r"\400"), ErrorKind::OctTooBig);
}

#[test]
fn group_reference_takes_at_most_two_digits() {
    let tokens = tokenize(r"\19a").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::GroupRef);
    assert_eq!(tokens[0].value, 19);
    assert_eq!(tokens[1].value, u32::from(b'a'));
}

#[test]
fn bad_backslashes() {
    assert_eq!(error(r"\q"), ErrorKind::IllegalEscape);
    assert_eq!(error("a\\"), ErrorKind::TrailingBackslash);
}

#[test]
fn escaped_metachars_are_literals() {
    let tok = single(r"\*");
    assert_eq!(tok.kind, TokenKind::Literal);
    assert_eq!(tok.value, u32::from(b'*'));
    assert_eq!(single(r"\n").value, u32::from(b'\n'));
}

#[test]
fn class_context_turns_metachars_into_literals() {
    assert_eq!(
        kinds("[*?(]"),
        [
            TokenKind::ClassOpen,
            TokenKind::Literal,
            TokenKind::Literal,
            TokenKind::Literal,
            TokenKind::ClassClose,
        ]
    );
    assert_eq!(
        kinds("[a]*"),
        [
            TokenKind::ClassOpen,
            TokenKind::Literal,
            TokenKind::ClassClose,
            TokenKind::Quantifier {
                kind: Quantifier::ZeroOrMore,
                lazy: false
            },
        ]
    );
}

#[test]
fn word_boundary_depends_on_context() {
    assert_eq!(
        single(r"\b").kind,
        TokenKind::Assertion(Assertion::WordBoundary)
    );

    let tokens = tokenize(r"[\b]").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Literal);
    assert_eq!(tokens[1].value, 0x08);
}

#[test]
fn posix_and_shorthand_names() {
    assert_eq!(
        kinds(r"[[:alpha:]\D]"),
        [
            TokenKind::ClassOpen,
            TokenKind::Posix(PosixClass::Alpha),
            TokenKind::Shorthand(Shorthand::NonDigit),
            TokenKind::ClassClose,
        ]
    );
    assert_eq!(error("[[:bogus:]]"), ErrorKind::InvalidPosixClass);
}

#[test]
fn stray_close_bracket_is_literal() {
    assert_eq!(kinds("]"), [TokenKind::Literal]);
}

#[test]
fn non_ascii_is_rejected() {
    let err = tokenize("ab\u{e9}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::IllegalChar);
    assert_eq!(err.pos, 2);
}
