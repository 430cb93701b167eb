//! Human-readable renderings of tokens and graphs.

use std::fmt::Write;

use crate::regex::ast::{Assertion, ExecGraph, GroupKind, Node, NodeId, NodeKind, UNBOUNDED};
use crate::regex::class::{CharClass, write_class_char};
use crate::regex::token::Token;

/// One line per token: position, value, kind and source text.
pub fn render_tokens(pattern: &str, tokens: &[Token]) -> String {
    let mut out = String::from("POS VAL KIND TEXT\n");
    for tok in tokens {
        let text = String::from_utf8_lossy(tok.text(pattern.as_bytes()));
        let _ = writeln!(
            out,
            "{:>3} {:>3} {:?} {}",
            tok.pos(),
            tok.value,
            tok.kind,
            text
        );
    }
    out
}

/// Indented tree, two spaces per level, root first.
pub fn render_tree(graph: &ExecGraph) -> String {
    let mut out = String::new();
    let mut stack: Vec<(NodeId, usize)> = vec![(graph.root(), 0)];
    while let Some((id, depth)) = stack.pop() {
        let node = graph.node(id);
        let _ = writeln!(out, "{:indent$}{}", "", describe(node), indent = depth * 2);
        stack.extend(graph.children(id).iter().rev().map(|&child| (child, depth + 1)));
    }
    out
}

/// Graphviz digraph with one vertex per node.
pub fn render_dot(graph: &ExecGraph) -> String {
    let mut out = String::from("digraph {\n");
    for id in graph.preorder() {
        let label = describe(graph.node(id)).replace('\\', "\\\\").replace('"', "\\\"");
        let _ = writeln!(out, "  n{} [label=\"{label}\"];", id.index());
        if let Some(parent) = graph.parent(id) {
            let _ = writeln!(out, "  n{} -> n{};", parent.index(), id.index());
        }
    }
    out.push_str("}\n");
    out
}

/// Single-line description of a node, quantifier included.
pub fn describe(node: &Node) -> String {
    let mut s = match &node.kind {
        NodeKind::Literal(b) => format!("literal {}", char_repr(*b)),
        NodeKind::Any => "any".to_owned(),
        NodeKind::Class(cc) => format!("class {}", class_repr(cc)),
        NodeKind::Backref(n) => format!("backref \\{n}"),
        NodeKind::Assertion(a) => match a {
            Assertion::Start => "assert start".to_owned(),
            Assertion::End => "assert end".to_owned(),
            Assertion::WordBoundary => "assert word-boundary".to_owned(),
        },
        NodeKind::Group(g) => match &g.kind {
            GroupKind::Root => "root".to_owned(),
            GroupKind::Capture { index, name: None } => format!("capture #{index}"),
            GroupKind::Capture {
                index,
                name: Some(name),
            } => format!("capture #{index} <{name}>"),
            GroupKind::Atomic => "atomic".to_owned(),
            GroupKind::Branch => "branch".to_owned(),
        },
    };

    match (node.min, node.max) {
        (1, 1) => {}
        (min, UNBOUNDED) => {
            let _ = write!(s, " {{{min},}}");
        }
        (min, max) if min == max => {
            let _ = write!(s, " {{{min}}}");
        }
        (min, max) => {
            let _ = write!(s, " {{{min},{max}}}");
        }
    }
    if node.lazy {
        s.push('?');
    }
    s
}

fn char_repr(b: u8) -> String {
    match b {
        b'\'' => "'\\''".to_owned(),
        0x20..=0x7e => format!("'{}'", b as char),
        _ => format!("0x{b:02x}"),
    }
}

fn class_repr(cc: &CharClass) -> String {
    let mut s = String::from("[");
    if cc.inverted {
        s.push('^');
    }
    for (low, high) in cc.set.ranges() {
        let _ = write_class_char(&mut s, low);
        if high > low {
            s.push('-');
            let _ = write_class_char(&mut s, high);
        }
    }
    s.push(']');
    s
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::regex::{parse_regex, tokenize};

    #[test]
    fn quantifier_suffixes() {
        let graph = parse_regex("a*b+?c{2}d{3,}e{1,4}?").unwrap();
        let lines: Vec<String> = graph
            .children(graph.root())
            .iter()
            .map(|&id| describe(graph.node(id)))
            .collect();

        assert_eq!(
            lines,
            [
                "literal 'a' {0,}",
                "literal 'b' {1,}?",
                "literal 'c' {2}",
                "literal 'd' {3,}",
                "literal 'e' {1,4}?",
            ]
        );
    }

    #[test]
    fn dot_output_lists_edges() {
        let graph = parse_regex("(a)").unwrap();
        assert_eq!(
            render_dot(&graph),
            indoc! {r#"
                digraph {
                  n0 [label="root"];
                  n1 [label="capture #1"];
                  n0 -> n1;
                  n2 [label="literal 'a'"];
                  n1 -> n2;
                }
            "#}
        );
    }

    #[test]
    fn deep_nesting_renders_without_recursion() {
        let depth = 100_000;
        let pattern = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        let graph = parse_regex(&pattern).unwrap();
        assert_eq!(graph.node_count(), depth + 2);

        let tree = render_tree(&graph);
        assert_eq!(tree.lines().count(), depth + 2);
        let last = tree.lines().last().unwrap();
        assert_eq!(last.trim_start(), "literal 'a'");
        assert_eq!(last.len() - last.trim_start().len(), (depth + 1) * 2);

        let dot = render_dot(&graph);
        assert!(dot.contains(&format!("n{depth} -> n{};", depth + 1)));
    }

    #[test]
    fn token_table_dump() {
        let pattern = r"a\x41";
        let tokens = tokenize(pattern).unwrap();
        assert_eq!(
            render_tokens(pattern, &tokens),
            indoc! {r"
                POS VAL KIND TEXT
                  0  97 Literal a
                  1  65 Literal \x41
            "}
        );
    }
}
