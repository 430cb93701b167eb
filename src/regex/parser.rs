use bytes::Bytes;

use crate::regex::ast::{ExecGraph, Group, GroupKind, NodeId, NodeKind, UNBOUNDED};
use crate::regex::class;
use crate::regex::error::{ErrorKind, ParseError};
use crate::regex::lexer::tokenize;
use crate::regex::scan::parse_int;
use crate::regex::token::{Lexeme, Token, TokenKind};

/// Largest repetition count accepted inside braces.
pub const REPEAT_LIMIT: u32 = 65_535;

/// Compiles `pattern` into an execution graph.
pub fn parse_regex(pattern: &str) -> Result<ExecGraph, ParseError> {
    let tokens = tokenize(pattern)?;
    build(Bytes::copy_from_slice(pattern.as_bytes()), &tokens)
}

/// Builds the graph for an already tokenized `pattern`.
pub fn build(pattern: Bytes, tokens: &[Token]) -> Result<ExecGraph, ParseError> {
    Builder::new(pattern, tokens).run()
}

/// One open group.
struct Frame {
    group: NodeId,
    /// Alternative currently receiving nodes, once the group has seen `|`.
    branch: Option<NodeId>,
    open_pos: usize,
}

impl Frame {
    fn container(&self) -> NodeId {
        self.branch.unwrap_or(self.group)
    }
}

struct Builder<'t> {
    tokens: &'t [Token],
    at: usize,
    graph: ExecGraph,
    frames: Vec<Frame>,
    /// Node the next quantifier applies to.
    current: Option<NodeId>,
    /// Quantifiers seen since the last node; starts at 1 so a leading
    /// quantifier is rejected.
    nmods: u32,
    backrefs: Vec<(u32, usize)>,
}

impl<'t> Builder<'t> {
    fn new(pattern: Bytes, tokens: &'t [Token]) -> Self {
        let graph = ExecGraph::new(pattern);
        let root = Frame {
            group: graph.root(),
            branch: None,
            open_pos: 0,
        };
        Self {
            tokens,
            at: 0,
            graph,
            frames: vec![root],
            current: None,
            nmods: 1,
            backrefs: Vec::new(),
        }
    }

    fn run(mut self) -> Result<ExecGraph, ParseError> {
        while self.at < self.tokens.len() {
            self.step()?;
        }

        if self.frames.len() > 1 {
            let innermost = &self.frames[self.frames.len() - 1];
            return Err(ParseError::new(ErrorKind::NoClosingParen, innermost.open_pos));
        }

        let captures = self.graph.capture_count();
        if let Some(&(_, pos)) = self.backrefs.iter().find(|(n, _)| *n > captures) {
            return Err(ParseError::new(ErrorKind::InvalidGroup, pos));
        }

        Ok(self.graph)
    }

    fn step(&mut self) -> Result<(), ParseError> {
        let tokens = self.tokens;
        let tok = &tokens[self.at];
        let pos = tok.pos();

        match tok.kind {
            TokenKind::Literal => self.atom(NodeKind::Literal(tok.value as u8), pos)?,
            TokenKind::Any => self.atom(NodeKind::Any, pos)?,
            TokenKind::Shorthand(s) => self.atom(NodeKind::Class(s.class()), pos)?,
            TokenKind::GroupRef => {
                self.backrefs.push((tok.value, pos));
                self.atom(NodeKind::Backref(tok.value as u8), pos)?;
            }
            TokenKind::Assertion(a) => {
                self.append(NodeKind::Assertion(a), pos)?;
                self.current = None;
                self.nmods = 1;
            }
            TokenKind::Quantifier { kind, lazy } => {
                let (min, max) = kind.bounds();
                self.quantify(min, max, lazy, pos)?;
            }
            TokenKind::BraceOpen => return self.braces(),
            TokenKind::BraceClose => self.atom(NodeKind::Literal(b'}'), pos)?,
            TokenKind::GroupOpen => return self.open_group(),
            TokenKind::GroupClose => self.close_group(pos)?,
            TokenKind::Alternation => self.alternate(pos)?,
            TokenKind::ClassOpen => {
                let (cc, close) = class::resolve(self.tokens, self.at)?;
                self.atom(NodeKind::Class(cc), pos)?;
                self.at = close;
            }
            TokenKind::Posix(_) => {
                return Err(ParseError::new(ErrorKind::PosixClassOutside, pos));
            }
            // only produced inside a class, which `class::resolve` consumes whole
            TokenKind::ClassClose => {
                return Err(ParseError::new(ErrorKind::IllegalChar, pos));
            }
        }

        self.at += 1;
        Ok(())
    }

    fn append(&mut self, kind: NodeKind, pos: usize) -> Result<NodeId, ParseError> {
        let container = self.frame().container();
        self.graph
            .push(container, kind)
            .map_err(|e| ParseError::new(e, pos))
    }

    /// Appends a quantifiable node.
    fn atom(&mut self, kind: NodeKind, pos: usize) -> Result<(), ParseError> {
        let id = self.append(kind, pos)?;
        self.current = Some(id);
        self.nmods = 0;
        Ok(())
    }

    fn quantify(&mut self, min: u32, max: u32, lazy: bool, pos: usize) -> Result<(), ParseError> {
        self.nmods += 1;
        let Some(id) = self.current.filter(|_| self.nmods <= 1) else {
            return Err(ParseError::new(ErrorKind::IllegalChar, pos));
        };

        let node = self.graph.node_mut(id);
        node.min = min;
        node.max = max;
        node.lazy = lazy;
        Ok(())
    }

    /// `{N}`, `{N,}`, `{M,N}` with an optional lazy `?`. Anything else makes
    /// the `{` an ordinary character.
    fn braces(&mut self) -> Result<(), ParseError> {
        let pos = self.tokens[self.at].pos();

        let Some((min, max, close)) = self.brace_bounds()? else {
            self.atom(NodeKind::Literal(b'{'), pos)?;
            self.at += 1;
            return Ok(());
        };

        let lazy = self
            .tokens
            .get(close + 1)
            .is_some_and(|t| t.lexeme == Lexeme::Qmark);
        self.quantify(min, max, lazy, pos)?;
        self.at = close + 1 + usize::from(lazy);
        Ok(())
    }

    fn brace_bounds(&self) -> Result<Option<(u32, u32, usize)>, ParseError> {
        let open = self.at;
        let close = self.tokens[open + 1..]
            .iter()
            .position(|t| {
                matches!(
                    t.kind,
                    TokenKind::BraceClose
                        | TokenKind::BraceOpen
                        | TokenKind::GroupOpen
                        | TokenKind::GroupClose
                        | TokenKind::Alternation
                        | TokenKind::ClassOpen
                )
            })
            .map(|i| open + 1 + i)
            .filter(|&i| self.tokens[i].kind == TokenKind::BraceClose);

        let Some(close) = close else {
            return Ok(None);
        };
        let interior = &self.tokens[open + 1..close];
        if interior.is_empty() {
            return Ok(None);
        }

        let well_formed = interior.iter().all(|t| {
            (t.lexeme == Lexeme::Ordinary && (t.value as u8).is_ascii_digit())
                || t.is_ordinary(b',')
        });
        let commas = interior.iter().filter(|t| t.is_ordinary(b',')).count();
        if !well_formed || commas > 1 || interior[0].is_ordinary(b',') {
            return Ok(None);
        }

        let digits: Vec<u8> = interior.iter().map(|t| t.value as u8).collect();
        let pos = self.tokens[open].pos();
        let bound = |s: &[u8]| {
            let n = parse_int(s, 10);
            if n.value > REPEAT_LIMIT {
                Err(ParseError::new(ErrorKind::InvalidDigitSequence, pos))
            } else {
                Ok(n.value)
            }
        };

        let (min, max) = match digits.iter().position(|&b| b == b',') {
            None => {
                let n = bound(&digits[..])?;
                (n, n)
            }
            Some(sep) if sep == digits.len() - 1 => (bound(&digits[..sep])?, UNBOUNDED),
            Some(sep) => {
                let min = bound(&digits[..sep])?;
                let max = bound(&digits[sep + 1..])?;
                if min > max {
                    return Err(ParseError::new(ErrorKind::InvalidRange, pos));
                }
                (min, max)
            }
        };

        Ok(Some((min, max, close)))
    }

    fn open_group(&mut self) -> Result<(), ParseError> {
        let pos = self.tokens[self.at].pos();
        let (kind, consumed) = self.group_kind()?;

        let group = self.append(
            NodeKind::Group(Group {
                kind,
                alternates: false,
            }),
            pos,
        )?;
        self.frames.push(Frame {
            group,
            branch: None,
            open_pos: pos,
        });
        self.current = None;
        self.nmods = 1;
        self.at += 1 + consumed;
        Ok(())
    }

    /// Reads an extension prefix after `(`, returning the group kind and the
    /// number of tokens it spans.
    fn group_kind(&mut self) -> Result<(GroupKind, usize), ParseError> {
        let tokens = self.tokens;
        let ext = &tokens[self.at + 1..];
        let Some(first) = ext.first() else {
            return Ok((self.capture(None), 0));
        };
        if first.lexeme == Lexeme::QmarkLazy {
            return Err(ParseError::new(ErrorKind::InvalidExtension, first.pos()));
        }
        if first.lexeme != Lexeme::Qmark {
            return Ok((self.capture(None), 0));
        }

        let invalid = ParseError::new(ErrorKind::InvalidExtension, first.pos());
        match ext.get(1) {
            Some(t) if t.is_ordinary(b'>') => Ok((GroupKind::Atomic, 2)),
            Some(t) if t.is_ordinary(b'P') => {
                let name = group_name(&ext[2..]).ok_or(invalid)?;
                let consumed = 2 + name.len() + 2;
                Ok((self.capture(Some(name)), consumed))
            }
            _ => Err(invalid),
        }
    }

    fn capture(&mut self, name: Option<String>) -> GroupKind {
        GroupKind::Capture {
            index: self.graph.next_capture_index(),
            name,
        }
    }

    fn close_group(&mut self, pos: usize) -> Result<(), ParseError> {
        if self.frames.len() == 1 {
            return Err(ParseError::new(ErrorKind::ExtraParen, pos));
        }
        if let Some(frame) = self.frames.pop() {
            self.current = Some(frame.group);
        }
        self.nmods = 0;
        Ok(())
    }

    fn alternate(&mut self, pos: usize) -> Result<(), ParseError> {
        let group = self.frame().group;
        if self.frame().branch.is_none() {
            self.graph
                .split_into_branch(group)
                .map_err(|e| ParseError::new(e, pos))?;
        }
        let branch = self
            .graph
            .push_branch(group)
            .map_err(|e| ParseError::new(e, pos))?;

        self.frame_mut().branch = Some(branch);
        self.current = None;
        self.nmods = 1;
        Ok(())
    }

    fn frame(&self) -> &Frame {
        &self.frames[self.frames.len() - 1]
    }

    fn frame_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}

/// `<name>` after a `(?P` prefix: ordinary word characters between angle
/// brackets.
fn group_name(tokens: &[Token]) -> Option<String> {
    if !tokens.first()?.is_ordinary(b'<') {
        return None;
    }
    let name: String = tokens[1..]
        .iter()
        .take_while(|t| t.lexeme == Lexeme::Ordinary && is_name_char(t.value as u8))
        .map(|t| t.value as u8 as char)
        .collect();
    let close = tokens.get(1 + name.len())?;
    if name.is_empty() || !close.is_ordinary(b'>') {
        return None;
    }
    Some(name)
}

fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod parser_tests;
