//! Closed-variant syntax tree consumed by the rule engine.
//!
//! The classifiers only ever inspect a small, fixed set of node shapes, so the
//! tree is a tagged sum over exactly those shapes rather than an open-ended
//! host AST. Anything else lowers to [`NodeKind::Other`], which still carries
//! its children and span so chain peeling and ancestor walks keep working.
//!
//! Nodes live in an arena and refer to each other by id. Parent links are
//! back-references only; ownership always flows root-down.

use id_arena::{Arena, Id};
use serde::Serialize;

pub type NodeId = Id<Node>;

/// A half-open byte range `[start, end)` into the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// True if the two spans share at least one byte, or are both zero-width
    /// at the same position.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
            || (self.start == other.start && self.end == other.end)
    }
}

/// A single node in the tree.
#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
}

/// How a function was written. Only arrows and function expressions are
/// eligible for the `async` promotion fix; declarations are skipped over when
/// searching for the enclosing function, matching what the await rule needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Arrow,
    Expression,
    Declaration,
}

/// The key of an object-literal property, when statically known.
#[derive(Debug, Clone)]
pub enum PropertyKey {
    /// `{ sync: true }`
    Identifier { name: String, span: Span },
    /// `{ "sync": true }` (also covers numeric keys)
    Literal { value: String, span: Span },
    /// `{ [expr]: true }` — cannot classify, always skipped.
    Computed,
}

impl PropertyKey {
    /// The statically-known key name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            PropertyKey::Identifier { name, .. } => Some(name),
            PropertyKey::Literal { value, .. } => Some(value),
            PropertyKey::Computed => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            PropertyKey::Identifier { span, .. } | PropertyKey::Literal { span, .. } => Some(*span),
            PropertyKey::Computed => None,
        }
    }
}

/// The closed set of node shapes the rules consult.
#[derive(Debug)]
pub enum NodeKind {
    Program {
        body: Vec<NodeId>,
    },
    Call {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    Member {
        object: NodeId,
        property: NodeId,
        /// `foo[bar]` style access; the property is never a plain name.
        computed: bool,
    },
    Identifier(String),
    /// A string literal with its unquoted value.
    Str(String),
    /// Any other literal (number, boolean, template, regex, ...).
    Literal,
    Object {
        /// Property / spread / method members, in source order.
        members: Vec<NodeId>,
    },
    /// One keyed member of an object literal.
    Property {
        key: PropertyKey,
        value: NodeId,
    },
    /// `...expr` inside an object or argument list.
    Spread {
        argument: NodeId,
    },
    Function {
        kind: FunctionKind,
        is_async: bool,
        params: Vec<NodeId>,
        body: NodeId,
    },
    Await {
        argument: NodeId,
    },
    /// Any construct the rules never match on directly.
    Other {
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    /// Child ids in source order, for generic traversal.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Program { body } => body.clone(),
            NodeKind::Call { callee, args } => {
                let mut out = vec![*callee];
                out.extend(args);
                out
            }
            NodeKind::Member { object, property, .. } => vec![*object, *property],
            NodeKind::Identifier(_) | NodeKind::Str(_) | NodeKind::Literal => vec![],
            NodeKind::Object { members } => members.clone(),
            NodeKind::Property { value, .. } => vec![*value],
            NodeKind::Spread { argument } => vec![*argument],
            NodeKind::Function { params, body, .. } => {
                let mut out = params.clone();
                out.push(*body);
                out
            }
            NodeKind::Await { argument } => vec![*argument],
            NodeKind::Other { children } => children.clone(),
        }
    }
}

/// An immutable parsed tree: arena plus root.
#[derive(Debug)]
pub struct SyntaxTree {
    arena: Arena<Node>,
    root: NodeId,
}

impl SyntaxTree {
    pub(crate) fn new(arena: Arena<Node>, root: NodeId) -> Self {
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.arena[id]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.arena[id].kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.arena[id].span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent
    }

    /// The identifier name of the node, if it is a plain identifier.
    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Enclosing nodes from the immediate parent outward to the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// All nodes in pre-order starting at the root.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.arena.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let children = self.kind(id).children();
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
        out
    }
}

pub struct Ancestors<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
