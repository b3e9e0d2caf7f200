//! Syntax graph definitions for C
//!
//! The parser builds a graph of nodes inside a `SyntaxArena`. Children are
//! referenced by `NodeId`, so a sub-node may be shared by several parents,
//! and type resolution adds back-references (expression to declaration,
//! expression to type) that can close cycles. Back-references are kept in
//! dedicated fields and never appear in `children()`.

pub mod arena;
pub mod expressions;
pub mod literals;
pub mod ops;
pub mod statements;
pub mod types;

// Re-export commonly used types at module level
pub use arena::{NodeRef, SyntaxArena};
pub use expressions::{Designator, Expr, ExprKind, Init, InitValue, MemberOp, Prefix};
pub use literals::Literal;
pub use ops::{Arity, BinaryOp, ExprOp, Precedence, UnaryOp};
pub use statements::{Decl, Label, Prog, StmtKind, Stmt, StorageClass};
pub use types::{Qualifiers, TypeKind, TypeNode};

use cfront_common::{NodeId, SourceSpan};
use serde::{Deserialize, Serialize};

/// Comment text attached to a node, delimiters included
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comments {
    /// Whole-line comments preceding the node
    pub before: Vec<String>,
    /// Comments trailing the node on its last line
    pub suffix: Vec<String>,
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.suffix.is_empty()
    }
}

/// The closed set of node variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Syntax {
    Literal(Literal),
    Prefix(Prefix),
    Init(Init),
    Expr(Expr),
    Type(TypeNode),
    Decl(Decl),
    Stmt(Stmt),
    Label(Label),
    Prog(Prog),
}

impl Syntax {
    /// Semantic children, in source order
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Syntax::Literal(_) => Vec::new(),
            Syntax::Prefix(prefix) => prefix.children(),
            Syntax::Init(init) => init.children(),
            Syntax::Expr(expr) => expr.kind.children(),
            Syntax::Type(ty) => ty.children(),
            Syntax::Decl(decl) => decl.children(),
            Syntax::Stmt(stmt) => stmt.children(),
            Syntax::Label(label) => label.children(),
            Syntax::Prog(prog) => prog.children(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Syntax::Literal(_) => "literal",
            Syntax::Prefix(_) => "prefix",
            Syntax::Init(_) => "initializer",
            Syntax::Expr(_) => "expression",
            Syntax::Type(_) => "type",
            Syntax::Decl(_) => "declaration",
            Syntax::Stmt(_) => "statement",
            Syntax::Label(_) => "label",
            Syntax::Prog(_) => "program",
        }
    }

    /// Short description for dumps: the operator tag for expressions,
    /// the statement or type kind otherwise
    pub fn describe(&self) -> String {
        match self {
            Syntax::Literal(lit) => format!("{} {}", lit.describe(), lit),
            Syntax::Expr(expr) => format!("expr {}", expr.op()),
            Syntax::Type(ty) => ty.kind.describe().to_string(),
            Syntax::Stmt(stmt) => stmt.kind.describe().to_string(),
            Syntax::Decl(Decl { name: Some(name), .. }) => format!("declaration {}", name),
            other => other.kind_name().to_string(),
        }
    }
}

/// A node stored in the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub span: SourceSpan,
    pub comments: Comments,
    pub kind: Syntax,
}

impl Node {
    pub fn children(&self) -> Vec<NodeId> {
        self.kind.children()
    }
}
