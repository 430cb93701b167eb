use bytes::Bytes;

use crate::regex::class::CharClass;
use crate::regex::error::ErrorKind;
pub use crate::regex::token::Assertion;

/// `max` of a node that may repeat without limit.
pub const UNBOUNDED: u32 = u32::MAX;

/// Stable handle of a node inside its [`ExecGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKind {
    /// The implicit group around the whole pattern.
    Root,
    Capture { index: u32, name: Option<String> },
    /// `(?>...)`
    Atomic,
    /// One alternative of a group containing `|`.
    Branch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub kind: GroupKind,
    /// Children are [`GroupKind::Branch`] groups, one per alternative.
    pub alternates: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Literal(u8),
    Any,
    Class(CharClass),
    Group(Group),
    Backref(u8),
    Assertion(Assertion),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub min: u32,
    pub max: u32,
    pub lazy: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            min: 1,
            max: 1,
            lazy: false,
            parent,
            children: Vec::new(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group(_))
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, NodeKind::Class(_))
    }

    pub fn is_class_inverted(&self) -> bool {
        matches!(&self.kind, NodeKind::Class(c) if c.inverted)
    }

    pub fn is_capturing(&self) -> bool {
        matches!(
            &self.kind,
            NodeKind::Group(Group {
                kind: GroupKind::Capture { .. },
                ..
            })
        )
    }

    pub fn is_atomic(&self) -> bool {
        matches!(
            &self.kind,
            NodeKind::Group(Group {
                kind: GroupKind::Atomic,
                ..
            })
        )
    }

    /// Atoms match one input position per repetition.
    pub fn is_atom(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Literal(_) | NodeKind::Any | NodeKind::Class(_)
        )
    }

    pub fn is_unbounded(&self) -> bool {
        self.max == UNBOUNDED
    }

    pub fn group(&self) -> Option<&Group> {
        match &self.kind {
            NodeKind::Group(g) => Some(g),
            _ => None,
        }
    }
}

/// A compiled pattern: an arena of nodes rooted at a [`GroupKind::Root`] group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecGraph {
    nodes: Vec<Node>,
    captures: u32,
    pattern: Bytes,
}

impl ExecGraph {
    pub(crate) fn new(pattern: Bytes) -> Self {
        let root = Node::new(
            NodeKind::Group(Group {
                kind: GroupKind::Root,
                alternates: false,
            }),
            None,
        );
        Self {
            nodes: vec![root],
            captures: 0,
            pattern,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Arena size, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when the root has no children, as for the empty pattern.
    pub fn is_empty(&self) -> bool {
        self.children(self.root()).is_empty()
    }

    /// Number of capture groups, which are numbered from 1.
    pub fn capture_count(&self) -> u32 {
        self.captures
    }

    pub fn pattern(&self) -> &Bytes {
        &self.pattern
    }

    /// Depth-first walk from the root, parents before children, children in
    /// pattern order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            graph: self,
            stack: vec![self.root()],
        }
    }

    /// Capture group named `name`, if any.
    pub fn named_group(&self, name: &str) -> Option<NodeId> {
        self.preorder().find(|&id| {
            matches!(
                self.node(id).group(),
                Some(Group { kind: GroupKind::Capture { name: Some(n), .. }, .. }) if n == name
            )
        })
    }

    /// Appends a new node as the last child of `parent`.
    pub(crate) fn push(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, ErrorKind> {
        let id = NodeId(u32::try_from(self.nodes.len()).map_err(|_| ErrorKind::NoMem)?);
        self.nodes.try_reserve(1)?;
        self.node_mut(parent).children.try_reserve(1)?;
        self.nodes.push(Node::new(kind, Some(parent)));
        self.node_mut(parent).children.push(id);
        Ok(id)
    }

    /// Moves every child of `group` under a new branch node, which becomes
    /// the only child of `group`.
    pub(crate) fn split_into_branch(&mut self, group: NodeId) -> Result<NodeId, ErrorKind> {
        let moved = std::mem::take(&mut self.node_mut(group).children);
        let branch = self.push(group, branch_kind())?;
        for &child in &moved {
            self.node_mut(child).parent = Some(branch);
        }
        self.node_mut(branch).children = moved;
        if let NodeKind::Group(g) = &mut self.node_mut(group).kind {
            g.alternates = true;
        }
        Ok(branch)
    }

    pub(crate) fn push_branch(&mut self, group: NodeId) -> Result<NodeId, ErrorKind> {
        self.push(group, branch_kind())
    }

    pub(crate) fn next_capture_index(&mut self) -> u32 {
        self.captures += 1;
        self.captures
    }
}

fn branch_kind() -> NodeKind {
    NodeKind::Group(Group {
        kind: GroupKind::Branch,
        alternates: false,
    })
}

pub struct Preorder<'g> {
    graph: &'g ExecGraph,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.graph.children(id).iter().rev().copied());
        Some(id)
    }
}
