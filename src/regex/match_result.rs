use std::ops::Range;

use bytes::Bytes;

use crate::regex::ast::ExecGraph;

/// A span of subject text matched by a compiled pattern, as reported by a
/// matcher walking an [`ExecGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    span: Range<usize>,
    group_name: Option<String>,
    text: Bytes,
    pattern: Bytes,
}

impl Match {
    /// Records `subject[span]` as matched by `graph`.
    ///
    /// Panics if `span` is out of bounds for `subject`, like slicing does.
    pub fn new(
        subject: &Bytes,
        span: Range<usize>,
        group_name: Option<String>,
        graph: &ExecGraph,
    ) -> Self {
        Self {
            text: subject.slice(span.clone()),
            span,
            group_name,
            pattern: graph.pattern().clone(),
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn range(&self) -> Range<usize> {
        self.span.clone()
    }

    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    pub fn pattern(&self) -> &Bytes {
        &self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::parse_regex;

    #[test]
    fn match_shares_subject_and_pattern_buffers() {
        let graph = parse_regex("(?P<year>\\d{4})").unwrap();
        let subject = Bytes::from_static(b"born 1984.");
        let m = Match::new(&subject, 5..9, Some("year".to_owned()), &graph);

        assert_eq!(m.start(), 5);
        assert_eq!(m.end(), 9);
        assert_eq!(&subject[m.range()], m.as_bytes());
        assert_eq!(m.as_bytes(), b"1984");
        assert_eq!(m.group_name(), Some("year"));
        assert_eq!(&m.pattern()[..], b"(?P<year>\\d{4})");
        assert!(graph.named_group("year").is_some());
    }
}
