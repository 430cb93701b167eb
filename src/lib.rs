//! Compiles regular-expression patterns into execution graphs.
//!
//! ```
//! use regraph::regex::{NodeKind, parse_regex};
//!
//! let graph = parse_regex("a{2,5}").unwrap();
//! let atom = graph.node(graph.children(graph.root())[0]);
//! assert_eq!(atom.kind, NodeKind::Literal(b'a'));
//! assert_eq!((atom.min, atom.max), (2, 5));
//! ```

pub mod regex;
