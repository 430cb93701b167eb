//! Byte-slice helpers shared by the lexer, the brace parser and the class
//! resolver.

pub const DIGITS: &[u8] = b"0123456789";

/// Result of [`parse_int`]: the value of the leading digits and the index of
/// the first byte that is not a digit in the requested radix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedInt {
    pub value: u32,
    pub end: usize,
}

impl ParsedInt {
    /// True when every byte of the input was a digit.
    pub fn is_complete(&self, len: usize) -> bool {
        self.end == len
    }
}

/// Parses the longest run of `radix` digits at the start of `s`.
///
/// Never fails: an empty run gives `end == 0`. The value saturates at
/// `u32::MAX`, callers enforce their own limits.
pub fn parse_int(s: &[u8], radix: u32) -> ParsedInt {
    let mut value: u32 = 0;
    let mut end = 0;

    for &b in s {
        let Some(d) = (b as char).to_digit(radix) else {
            break;
        };
        value = value.saturating_mul(radix).saturating_add(d);
        end += 1;
    }

    ParsedInt { value, end }
}

/// `s[start..end]`, with both bounds clamped to the slice.
pub fn substr(s: &[u8], start: usize, end: usize) -> &[u8] {
    let end = end.min(s.len());
    let start = start.min(end);
    &s[start..end]
}

pub fn starts_with(s: &[u8], prefix: &str) -> bool {
    s.starts_with(prefix.as_bytes())
}

pub fn has_byte(set: &[u8], b: u8) -> bool {
    set.contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_int_stops_at_first_invalid_digit() {
        assert_eq!(parse_int(b"178", 8), ParsedInt { value: 0o17, end: 2 });
        assert_eq!(parse_int(b"4Fz", 16), ParsedInt { value: 0x4f, end: 2 });
        assert_eq!(parse_int(b"", 10), ParsedInt { value: 0, end: 0 });
    }

    #[test]
    fn parse_int_saturates() {
        let parsed = parse_int(b"99999999999999", 10);
        assert_eq!(parsed.value, u32::MAX);
        assert!(parsed.is_complete(14));
    }

    #[test]
    fn substr_is_bounded() {
        assert_eq!(substr(b"abc", 1, 10), b"bc");
        assert_eq!(substr(b"abc", 5, 10), b"");
    }
}
