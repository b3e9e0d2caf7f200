//! C translator front end - syntax graph
//!
//! This crate provides the in-memory program model of the front end:
//! - AST: node kinds, operator tags and the arena that owns a graph
//! - Builder: construction API for parsers and tests
//! - Walk: identity-aware traversal that tolerates sharing and cycles
//! - Printer: precedence-driven rendering back to C text
//! - Codec: JSON encoding of the kind-tagged wire records

pub mod ast;
pub mod builder;
pub mod codec;
pub mod printer;
pub mod walk;

pub use ast::{
    BinaryOp, Decl, Expr, ExprKind, ExprOp, Init, Label, Literal, Node, NodeRef, Precedence, Prog,
    Stmt, StmtKind, Syntax, SyntaxArena, TypeKind, TypeNode, UnaryOp,
};
pub use builder::SyntaxBuilder;
pub use codec::{decode, encode, AssignOp, WireExpr, WireRef, WireType};
pub use printer::{render, Printer};
pub use walk::{postorder, preorder, walk, walk_with, Visitor, Walkable};
