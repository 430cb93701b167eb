pub mod ast;
pub mod class;
pub mod dump;
pub mod error;
pub mod lexer;
pub mod match_result;
pub mod parser;
pub mod scan;
pub mod token;

pub use ast::{ExecGraph, Node, NodeId, NodeKind, UNBOUNDED};
pub use error::{ErrorKind, ParseError};
pub use lexer::tokenize;
pub use match_result::Match;
pub use parser::{build, parse_regex};
pub use token::Token;
