use thiserror::Error;

/// Every way a pattern can fail to compile. Codes are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[repr(u8)]
pub enum ErrorKind {
    // lexical
    #[error("Illegal character")]
    IllegalChar = 1,
    #[error("Illegal escape sequence")]
    IllegalEscape,
    #[error("Unescaped backslash")]
    TrailingBackslash,
    #[error("Invalid hex")]
    InvalidHex,
    #[error("Hex bigger than CHAR_MAX")]
    HexTooBig,
    #[error("Oct bigger than CHAR_MAX")]
    OctTooBig,
    #[error("Non existent capture group number")]
    InvalidGroup,
    #[error("Invalid digit sequence")]
    InvalidDigitSequence,

    // structural
    #[error("Extra parenthesis")]
    ExtraParen,
    #[error("Unclosed parenthesis")]
    NoClosingParen,
    #[error("No closing bracket ]")]
    NoClosingBracket,
    #[error("Invalid or empty character class")]
    InvalidCharClass,
    #[error("Invalid char range in character class")]
    InvalidCharRange,
    #[error("Invalid range")]
    InvalidRange,
    #[error("Posix character class must be inside a char class")]
    PosixClassOutside,
    #[error("Invalid POSIX character class")]
    InvalidPosixClass,
    #[error("Non existent extension prefix")]
    InvalidExtension,

    // resource
    #[error("Memory allocation error")]
    NoMem,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 18] = [
        ErrorKind::IllegalChar,
        ErrorKind::IllegalEscape,
        ErrorKind::TrailingBackslash,
        ErrorKind::InvalidHex,
        ErrorKind::HexTooBig,
        ErrorKind::OctTooBig,
        ErrorKind::InvalidGroup,
        ErrorKind::InvalidDigitSequence,
        ErrorKind::ExtraParen,
        ErrorKind::NoClosingParen,
        ErrorKind::NoClosingBracket,
        ErrorKind::InvalidCharClass,
        ErrorKind::InvalidCharRange,
        ErrorKind::InvalidRange,
        ErrorKind::PosixClassOutside,
        ErrorKind::InvalidPosixClass,
        ErrorKind::InvalidExtension,
        ErrorKind::NoMem,
    ];

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<ErrorKind> {
        let idx = usize::try_from(code).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::IllegalChar => "Illegal character",
            ErrorKind::IllegalEscape => "Illegal escape sequence",
            ErrorKind::TrailingBackslash => "Unescaped backslash",
            ErrorKind::InvalidHex => "Invalid hex",
            ErrorKind::HexTooBig => "Hex bigger than CHAR_MAX",
            ErrorKind::OctTooBig => "Oct bigger than CHAR_MAX",
            ErrorKind::InvalidGroup => "Non existent capture group number",
            ErrorKind::InvalidDigitSequence => "Invalid digit sequence",
            ErrorKind::ExtraParen => "Extra parenthesis",
            ErrorKind::NoClosingParen => "Unclosed parenthesis",
            ErrorKind::NoClosingBracket => "No closing bracket ]",
            ErrorKind::InvalidCharClass => "Invalid or empty character class",
            ErrorKind::InvalidCharRange => "Invalid char range in character class",
            ErrorKind::InvalidRange => "Invalid range",
            ErrorKind::PosixClassOutside => "Posix character class must be inside a char class",
            ErrorKind::InvalidPosixClass => "Invalid POSIX character class",
            ErrorKind::InvalidExtension => "Non existent extension prefix",
            ErrorKind::NoMem => "Memory allocation error",
        }
    }
}

/// Message for a raw error code; unknown codes get a generic string.
pub fn message(code: u32) -> &'static str {
    match ErrorKind::from_code(code) {
        Some(kind) => kind.message(),
        None => "Unknown error",
    }
}

/// A compile failure and the byte offset in the pattern where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {pos}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub pos: usize,
}

impl ParseError {
    pub fn new(kind: ErrorKind, pos: usize) -> Self {
        Self { kind, pos }
    }

    pub fn code(&self) -> u32 {
        self.kind.code()
    }
}

impl From<std::collections::TryReserveError> for ErrorKind {
    fn from(_: std::collections::TryReserveError) -> Self {
        ErrorKind::NoMem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_the_table() {
        for kind in ErrorKind::ALL {
            assert_eq!(ErrorKind::from_code(kind.code()), Some(kind));
            assert_eq!(message(kind.code()), kind.to_string());
        }
    }

    #[test]
    fn out_of_range_codes_fall_back() {
        assert_eq!(message(0), "Unknown error");
        assert_eq!(message(19), "Unknown error");
        assert_eq!(message(u32::MAX), "Unknown error");
    }

    #[test]
    fn kind_is_a_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(ErrorKind::NoClosingBracket);
        assert_eq!(err.to_string(), "No closing bracket ]");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::new(ErrorKind::ExtraParen, 3);
        assert_eq!(err.to_string(), "Extra parenthesis at offset 3");
        assert_eq!(err.code(), 9);
    }
}
