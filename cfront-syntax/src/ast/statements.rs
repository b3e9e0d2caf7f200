//! Declaration, statement and label nodes
//!
//! Statement children follow one fixed slot order regardless of kind:
//! pre-expression, condition, post-expression, declaration, body, else
//! branch, label text, nested block, case labels. Each `StmtKind` only
//! fills the slots it has.

use cfront_common::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageClass {
    Auto,
    Static,
    Extern,
    Register,
    Typedef,
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class_str = match self {
            StorageClass::Auto => "auto",
            StorageClass::Static => "static",
            StorageClass::Extern => "extern",
            StorageClass::Register => "register",
            StorageClass::Typedef => "typedef",
        };
        write!(f, "{}", class_str)
    }
}

/// Variable, function, parameter, field or enumerator declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decl {
    /// Absent for unnamed parameters and anonymous members
    pub name: Option<String>,
    pub storage: Option<StorageClass>,
    pub ty: Option<NodeId>,
    pub init: Option<NodeId>,
    /// Function body (a block statement)
    pub body: Option<NodeId>,
}

impl Decl {
    pub fn children(&self) -> Vec<NodeId> {
        [self.ty, self.init, self.body].into_iter().flatten().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    /// `case`, `default` and named labels in front of the statement
    pub labels: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    /// `;`
    Empty,

    /// `expr;`
    Expr(NodeId),

    /// Local declaration
    Decl(NodeId),

    /// `{ ... }`
    Block(Vec<NodeId>),

    If {
        cond: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },

    While {
        cond: NodeId,
        body: NodeId,
    },

    DoWhile {
        body: NodeId,
        cond: NodeId,
    },

    /// `for (pre | decl; cond; post) body`
    For {
        pre: Option<NodeId>,
        decl: Option<NodeId>,
        cond: Option<NodeId>,
        post: Option<NodeId>,
        body: NodeId,
    },

    Switch {
        expr: NodeId,
        body: NodeId,
    },

    Return(Option<NodeId>),

    Break,

    Continue,

    /// `goto target;` with the target as a symbol literal
    Goto(NodeId),
}

/// Slot view of a statement, in traversal order
#[derive(Debug, Default)]
struct Slots<'a> {
    pre: Option<NodeId>,
    expr: Option<NodeId>,
    post: Option<NodeId>,
    decl: Option<NodeId>,
    body: Option<NodeId>,
    else_branch: Option<NodeId>,
    text: Option<NodeId>,
    block: &'a [NodeId],
}

impl StmtKind {
    fn slots(&self) -> Slots<'_> {
        match self {
            StmtKind::Empty | StmtKind::Break | StmtKind::Continue => Slots::default(),
            StmtKind::Expr(expr) => Slots { expr: Some(*expr), ..Slots::default() },
            StmtKind::Decl(decl) => Slots { decl: Some(*decl), ..Slots::default() },
            StmtKind::Block(block) => Slots { block: block.as_slice(), ..Slots::default() },
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => Slots {
                expr: Some(*cond),
                body: Some(*then_branch),
                else_branch: *else_branch,
                ..Slots::default()
            },
            StmtKind::While { cond, body } | StmtKind::DoWhile { body, cond } => Slots {
                expr: Some(*cond),
                body: Some(*body),
                ..Slots::default()
            },
            StmtKind::For {
                pre,
                decl,
                cond,
                post,
                body,
            } => Slots {
                pre: *pre,
                expr: *cond,
                post: *post,
                decl: *decl,
                body: Some(*body),
                ..Slots::default()
            },
            StmtKind::Switch { expr, body } => Slots {
                expr: Some(*expr),
                body: Some(*body),
                ..Slots::default()
            },
            StmtKind::Return(value) => Slots { expr: *value, ..Slots::default() },
            StmtKind::Goto(target) => Slots { text: Some(*target), ..Slots::default() },
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            StmtKind::Empty => "empty statement",
            StmtKind::Expr(_) => "expression statement",
            StmtKind::Decl(_) => "declaration statement",
            StmtKind::Block(_) => "block",
            StmtKind::If { .. } => "if statement",
            StmtKind::While { .. } => "while loop",
            StmtKind::DoWhile { .. } => "do-while loop",
            StmtKind::For { .. } => "for loop",
            StmtKind::Switch { .. } => "switch statement",
            StmtKind::Return(_) => "return statement",
            StmtKind::Break => "break statement",
            StmtKind::Continue => "continue statement",
            StmtKind::Goto(_) => "goto statement",
        }
    }
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Self { kind, labels: Vec::new() }
    }

    pub fn children(&self) -> Vec<NodeId> {
        let slots = self.kind.slots();
        let mut children: Vec<NodeId> = [
            slots.pre,
            slots.expr,
            slots.post,
            slots.decl,
            slots.body,
            slots.else_branch,
            slots.text,
        ]
        .into_iter()
        .flatten()
        .collect();
        children.extend(slots.block.iter().copied());
        children.extend(self.labels.iter().copied());
        children
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Label {
    /// `case expr:`
    Case(NodeId),
    /// `default:`
    Default,
    /// `name:` with the name as a symbol literal
    Named(NodeId),
}

impl Label {
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Label::Case(expr) => vec![*expr],
            Label::Default => Vec::new(),
            Label::Named(name) => vec![*name],
        }
    }
}

/// Translation unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prog {
    pub decls: Vec<NodeId>,
}

impl Prog {
    pub fn children(&self) -> Vec<NodeId> {
        self.decls.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    #[test]
    fn test_for_slots_follow_fixed_order() {
        let stmt = Stmt {
            kind: StmtKind::For {
                pre: None,
                decl: Some(NodeId(1)),
                cond: Some(NodeId(2)),
                post: Some(NodeId(3)),
                body: NodeId(4),
            },
            labels: ids(&[5]),
        };
        // condition, post, declaration, body, then labels
        assert_eq!(stmt.children(), ids(&[2, 3, 1, 4, 5]));
    }

    #[test]
    fn test_if_else_children() {
        let stmt = Stmt::new(StmtKind::If {
            cond: NodeId(1),
            then_branch: NodeId(2),
            else_branch: Some(NodeId(3)),
        });
        assert_eq!(stmt.children(), ids(&[1, 2, 3]));

        let no_else = Stmt::new(StmtKind::If {
            cond: NodeId(1),
            then_branch: NodeId(2),
            else_branch: None,
        });
        assert_eq!(no_else.children(), ids(&[1, 2]));
    }

    #[test]
    fn test_do_while_uses_condition_slot_first() {
        let stmt = Stmt::new(StmtKind::DoWhile { body: NodeId(8), cond: NodeId(9) });
        assert_eq!(stmt.children(), ids(&[9, 8]));
    }

    #[test]
    fn test_block_and_goto_children() {
        let block = Stmt::new(StmtKind::Block(ids(&[4, 5, 6])));
        assert_eq!(block.children(), ids(&[4, 5, 6]));

        let goto = Stmt::new(StmtKind::Goto(NodeId(12)));
        assert_eq!(goto.children(), ids(&[12]));
        assert!(Stmt::new(StmtKind::Break).children().is_empty());
    }

    #[test]
    fn test_decl_children_skip_absent_slots() {
        let decl = Decl {
            name: Some("x".to_string()),
            storage: Some(StorageClass::Static),
            ty: Some(NodeId(1)),
            init: None,
            body: Some(NodeId(3)),
        };
        assert_eq!(decl.children(), ids(&[1, 3]));
        assert_eq!(StorageClass::Static.to_string(), "static");
    }
}
