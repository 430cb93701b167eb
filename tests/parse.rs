use regraph::regex::error::message;
use regraph::regex::{ErrorKind, NodeKind, UNBOUNDED, parse_regex, tokenize};

#[test]
fn tokenizing_consumes_everything_or_fails() {
    let patterns = [
        "abc", "a*?b+?c??", r"\x41\x4", r"[a-z\d]+", r"\", r"(?>x)", "[[:foo:]]", "\u{263a}",
        r"\101\12\0", "{}}{",
    ];
    for pattern in patterns {
        match tokenize(pattern) {
            Ok(tokens) => {
                let covered: usize = tokens.iter().map(|t| t.span.len()).sum();
                assert_eq!(covered, pattern.len(), "{pattern}");
            }
            Err(err) => assert!(err.pos < pattern.len(), "{pattern}: {err}"),
        }
    }
}

#[test]
fn error_catalogue() {
    let cases = [
        ("a**", ErrorKind::IllegalChar),
        (r"\q", ErrorKind::IllegalEscape),
        ("ab\\", ErrorKind::TrailingBackslash),
        (r"\xZZ", ErrorKind::InvalidHex),
        (r"\x80", ErrorKind::HexTooBig),
        (r"\777", ErrorKind::OctTooBig),
        (r"(a)\3", ErrorKind::InvalidGroup),
        ("a{99999}", ErrorKind::InvalidDigitSequence),
        ("a)", ErrorKind::ExtraParen),
        ("(a(b)c", ErrorKind::NoClosingParen),
        ("[", ErrorKind::NoClosingBracket),
        ("[]", ErrorKind::InvalidCharClass),
        ("[z-a]", ErrorKind::InvalidCharRange),
        ("a{3,2}", ErrorKind::InvalidRange),
        ("[:digit:]", ErrorKind::PosixClassOutside),
        ("[[:nope:]]", ErrorKind::InvalidPosixClass),
        ("(?<a)", ErrorKind::InvalidExtension),
    ];
    for (pattern, kind) in cases {
        let err = parse_regex(pattern).unwrap_err();
        assert_eq!(err.kind, kind, "{pattern}");
        assert_eq!(message(err.code()), kind.message());
    }
}

#[test]
fn graph_shape() {
    let graph = parse_regex("(a(b)c)").unwrap();
    let root = graph.root();
    let outer = graph.children(root);
    assert_eq!(outer.len(), 1);

    let inner = graph.children(outer[0]);
    let kinds: Vec<_> = inner.iter().map(|&id| graph.node(id).is_group()).collect();
    assert_eq!(kinds, [false, true, false]);
    assert_eq!(graph.node(inner[0]).kind, NodeKind::Literal(b'a'));
    assert_eq!(
        graph.node(graph.children(inner[1])[0]).kind,
        NodeKind::Literal(b'b')
    );
    assert_eq!(graph.node(inner[2]).kind, NodeKind::Literal(b'c'));
}

#[test]
fn min_never_exceeds_max() {
    let graph = parse_regex(r"a?b*c+d{2}e{3,}f{4,9}(g|h)??").unwrap();
    for id in graph.preorder() {
        let node = graph.node(id);
        assert!(node.min <= node.max);
        if node.is_unbounded() {
            assert_eq!(node.max, UNBOUNDED);
        }
    }
}
