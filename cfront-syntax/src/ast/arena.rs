//! Node storage for one compilation unit
//!
//! The identity of a node is its slot in the arena. Slots are handed out
//! sequentially and never freed, so an identity is never reused while the
//! arena lives. Dropping the arena releases the whole graph at once.

use super::{Comments, Decl, Expr, Init, Label, Literal, Node, Prefix, Prog, Stmt, Syntax, TypeNode};
use crate::printer;
use cfront_common::{HasSpan, NodeId, NodeIdGenerator, SourceSpan, StructuralError};
use log::trace;
use std::fmt;

#[derive(Debug, Clone, Default)]
pub struct SyntaxArena {
    nodes: Vec<Node>,
    ids: NodeIdGenerator,
}

macro_rules! typed_accessor {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty, $expected:literal) => {
        $(#[$doc])*
        pub fn $name(&self, id: NodeId) -> &$ty {
            match &self.node(id).kind {
                Syntax::$variant(inner) => inner,
                other => mismatch(id, $expected, other),
            }
        }
    };
}

#[track_caller]
fn mismatch(id: NodeId, expected: &'static str, found: &Syntax) -> ! {
    StructuralError::KindMismatch {
        id,
        expected,
        found: found.kind_name(),
    }
    .raise()
}

impl SyntaxArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a node and mint its identity
    pub fn alloc(&mut self, kind: Syntax) -> NodeId {
        self.alloc_spanned(kind, SourceSpan::dummy())
    }

    pub fn alloc_spanned(&mut self, kind: Syntax, span: SourceSpan) -> NodeId {
        let id = self.ids.next();
        debug_assert_eq!(id.index(), self.nodes.len());
        trace!("alloc {} {}", id, kind.kind_name());
        self.nodes.push(Node {
            id,
            span,
            comments: Comments::default(),
            kind,
        });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Look up a node. A dangling id is a structural error.
    #[track_caller]
    pub fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.index()) {
            Some(node) => node,
            None => StructuralError::DanglingNode { id }.raise(),
        }
    }

    #[track_caller]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes.get_mut(id.index()) {
            Some(node) => node,
            None => StructuralError::DanglingNode { id }.raise(),
        }
    }

    #[track_caller]
    pub fn node_ref(&self, id: NodeId) -> NodeRef<'_> {
        self.node(id);
        NodeRef { arena: self, id }
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).children()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    typed_accessor!(literal, Literal, Literal, "literal");
    typed_accessor!(prefix, Prefix, Prefix, "prefix");
    typed_accessor!(init, Init, Init, "initializer");
    typed_accessor!(
        /// Expression at `id`; panics if the slot holds another kind
        expr, Expr, Expr, "expression"
    );
    typed_accessor!(type_node, Type, TypeNode, "type");
    typed_accessor!(decl, Decl, Decl, "declaration");
    typed_accessor!(stmt, Stmt, Stmt, "statement");
    typed_accessor!(label, Label, Label, "label");
    typed_accessor!(prog, Prog, Prog, "program");

    pub fn set_span(&mut self, id: NodeId, span: SourceSpan) {
        self.node_mut(id).span = span;
    }

    pub fn set_comments(&mut self, id: NodeId, comments: Comments) {
        self.node_mut(id).comments = comments;
    }

    // Derived fields. These are the only mutations allowed after
    // construction: operator tags and child slots never change.

    /// Record the declaration an expression resolves to
    #[track_caller]
    pub fn resolve_decl(&mut self, expr: NodeId, decl: NodeId) {
        self.decl(decl);
        match &mut self.node_mut(expr).kind {
            Syntax::Expr(e) => e.decl = Some(decl),
            other => mismatch(expr, "expression", other),
        }
    }

    /// Record an expression's inferred type
    #[track_caller]
    pub fn set_expr_type(&mut self, expr: NodeId, ty: NodeId) {
        self.type_node(ty);
        match &mut self.node_mut(expr).kind {
            Syntax::Expr(e) => e.ty = Some(ty),
            other => mismatch(expr, "expression", other),
        }
    }

    #[track_caller]
    pub fn set_init_type(&mut self, init: NodeId, ty: NodeId) {
        self.type_node(ty);
        match &mut self.node_mut(init).kind {
            Syntax::Init(i) => i.ty = Some(ty),
            other => mismatch(init, "initializer", other),
        }
    }

    /// Record the field a `.field` designator names
    #[track_caller]
    pub fn resolve_field(&mut self, prefix: NodeId, decl: NodeId) {
        self.decl(decl);
        match &mut self.node_mut(prefix).kind {
            Syntax::Prefix(p) => p.decl = Some(decl),
            other => mismatch(prefix, "prefix", other),
        }
    }
}

/// Borrowed handle to one node of an arena
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    arena: &'a SyntaxArena,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn arena(self) -> &'a SyntaxArena {
        self.arena
    }

    pub fn node(self) -> &'a Node {
        self.arena.node(self.id)
    }

    pub fn kind(self) -> &'a Syntax {
        &self.node().kind
    }

    pub fn children(self) -> Vec<NodeRef<'a>> {
        self.node()
            .children()
            .into_iter()
            .map(|id| self.arena.node_ref(id))
            .collect()
    }

    pub fn as_expr(self) -> Option<&'a Expr> {
        match self.kind() {
            Syntax::Expr(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn as_type(self) -> Option<&'a TypeNode> {
        match self.kind() {
            Syntax::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_decl(self) -> Option<&'a Decl> {
        match self.kind() {
            Syntax::Decl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_stmt(self) -> Option<&'a Stmt> {
        match self.kind() {
            Syntax::Stmt(stmt) => Some(stmt),
            _ => None,
        }
    }

    /// Source text of this node with comments dropped
    pub fn render(self) -> String {
        printer::render(self.arena, self.id)
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({} {})", self.id, self.kind().describe())
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl HasSpan for NodeRef<'_> {
    fn span(&self) -> SourceSpan {
        self.node().span.clone()
    }
}
