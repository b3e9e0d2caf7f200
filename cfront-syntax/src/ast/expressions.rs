//! Expression and initializer nodes
//!
//! Every `ExprKind` variant carries exactly the operands its operator uses,
//! so the child shape of an expression is fixed by its variant.

use super::ops::{BinaryOp, ExprOp, UnaryOp};
use cfront_common::NodeId;
use serde::{Deserialize, Serialize};

/// An expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    /// Declaration this expression resolves to. Filled by type resolution,
    /// never traversed.
    pub decl: Option<NodeId>,
    /// Inferred type. Filled by type resolution, never traversed.
    pub ty: Option<NodeId>,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            decl: None,
            ty: None,
        }
    }

    pub fn op(&self) -> ExprOp {
        self.kind.op()
    }
}

/// `.` or `->`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberOp {
    Dot,
    Arrow,
}

impl MemberOp {
    pub fn symbol(self) -> &'static str {
        match self {
            MemberOp::Dot => ".",
            MemberOp::Arrow => "->",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// `left op right`, including assignment and compound assignment
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },

    /// Prefix or postfix unary operator
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },

    /// `object.member` or `object->member`. The member name is payload, not a child.
    Member {
        op: MemberOp,
        object: NodeId,
        member: String,
    },

    /// `func(args)`
    Call {
        func: NodeId,
        args: Vec<NodeId>,
    },

    /// `func<<<launch>>>(args)`
    KernelCall {
        func: NodeId,
        launch: Vec<NodeId>,
        args: Vec<NodeId>,
    },

    /// `(ty) operand`
    Cast {
        ty: NodeId,
        operand: NodeId,
    },

    /// Compound literal `(ty){...}`; `init` is an initializer node
    CastInit {
        ty: NodeId,
        init: NodeId,
    },

    /// `a, b, c`
    Comma(Vec<NodeId>),

    /// `cond ? then_branch : else_branch`
    Cond {
        cond: NodeId,
        then_branch: NodeId,
        else_branch: NodeId,
    },

    /// `base[index]`
    Index {
        base: NodeId,
        index: NodeId,
    },

    /// `offsetof(ty, member)`
    Offsetof {
        ty: NodeId,
        member: NodeId,
    },

    /// Explicit parentheses kept from the source
    Paren(NodeId),

    SizeofExpr(NodeId),

    SizeofType(NodeId),

    /// `va_arg(list, ty)`
    VaArg {
        list: NodeId,
        ty: NodeId,
    },

    /// Function, variable, or enumerator name
    Name(String),

    /// Numeric or character constant, as written
    Number(String),

    /// Other literal token, as written
    Literal(String),

    /// Quoted string pieces; adjacent pieces concatenate
    String(Vec<String>),

    LaunchOpen,

    LaunchClose,
}

impl ExprKind {
    pub fn op(&self) -> ExprOp {
        match self {
            ExprKind::Binary { op, .. } => ExprOp::Binary(*op),
            ExprKind::Unary { op, .. } => ExprOp::Unary(*op),
            ExprKind::Member { op: MemberOp::Dot, .. } => ExprOp::Dot,
            ExprKind::Member { op: MemberOp::Arrow, .. } => ExprOp::Arrow,
            ExprKind::Call { .. } => ExprOp::Call,
            ExprKind::KernelCall { .. } => ExprOp::KernelCall,
            ExprKind::Cast { .. } => ExprOp::Cast,
            ExprKind::CastInit { .. } => ExprOp::CastInit,
            ExprKind::Comma(_) => ExprOp::Comma,
            ExprKind::Cond { .. } => ExprOp::Cond,
            ExprKind::Index { .. } => ExprOp::Index,
            ExprKind::Offsetof { .. } => ExprOp::Offsetof,
            ExprKind::Paren(_) => ExprOp::Paren,
            ExprKind::SizeofExpr(_) => ExprOp::SizeofExpr,
            ExprKind::SizeofType(_) => ExprOp::SizeofType,
            ExprKind::VaArg { .. } => ExprOp::VaArg,
            ExprKind::Name(_) => ExprOp::Name,
            ExprKind::Number(_) => ExprOp::Number,
            ExprKind::Literal(_) => ExprOp::Literal,
            ExprKind::String(_) => ExprOp::String,
            ExprKind::LaunchOpen => ExprOp::LaunchOpen,
            ExprKind::LaunchClose => ExprOp::LaunchClose,
        }
    }

    /// Semantic children in source order. Text payloads and derived
    /// back-references are never included.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            ExprKind::Binary { left, right, .. } => vec![*left, *right],
            ExprKind::Unary { operand, .. } => vec![*operand],
            ExprKind::Member { object, .. } => vec![*object],
            ExprKind::Call { func, args } => {
                let mut children = Vec::with_capacity(args.len() + 1);
                children.push(*func);
                children.extend(args.iter().copied());
                children
            }
            ExprKind::KernelCall { func, launch, args } => {
                let mut children = Vec::with_capacity(launch.len() + args.len() + 1);
                children.push(*func);
                children.extend(launch.iter().copied());
                children.extend(args.iter().copied());
                children
            }
            ExprKind::Cast { ty, operand } => vec![*ty, *operand],
            ExprKind::CastInit { ty, init } => vec![*ty, *init],
            ExprKind::Comma(list) => list.clone(),
            ExprKind::Cond {
                cond,
                then_branch,
                else_branch,
            } => vec![*cond, *then_branch, *else_branch],
            ExprKind::Index { base, index } => vec![*base, *index],
            ExprKind::Offsetof { ty, member } => vec![*ty, *member],
            ExprKind::Paren(inner) | ExprKind::SizeofExpr(inner) | ExprKind::SizeofType(inner) => {
                vec![*inner]
            }
            ExprKind::VaArg { list, ty } => vec![*list, *ty],
            ExprKind::Name(_)
            | ExprKind::Number(_)
            | ExprKind::Literal(_)
            | ExprKind::String(_)
            | ExprKind::LaunchOpen
            | ExprKind::LaunchClose => Vec::new(),
        }
    }
}

/// Initializer: optional designator prefixes, then a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Init {
    pub prefixes: Vec<NodeId>,
    pub value: InitValue,
    /// Type the initializer was checked against. Derived, never traversed.
    pub ty: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InitValue {
    /// Single expression
    Expr(NodeId),

    /// `{...}` list of nested initializers
    Braced(Vec<NodeId>),
}

impl Init {
    pub fn children(&self) -> Vec<NodeId> {
        let mut children = self.prefixes.clone();
        match &self.value {
            InitValue::Expr(expr) => children.push(*expr),
            InitValue::Braced(items) => children.extend(items.iter().copied()),
        }
        children
    }
}

/// Designator prefix of an initializer: `.field =` or `[index] =`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prefix {
    pub designator: Designator,
    /// Field declaration a `.field` designator resolves to. Derived.
    pub decl: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Designator {
    Field(String),
    Index(NodeId),
}

impl Prefix {
    pub fn children(&self) -> Vec<NodeId> {
        match &self.designator {
            Designator::Field(_) => Vec::new(),
            Designator::Index(index) => vec![*index],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    #[test]
    fn test_cond_children_are_positional() {
        let cond = ExprKind::Cond {
            cond: NodeId(7),
            then_branch: NodeId(3),
            else_branch: NodeId(5),
        };
        assert_eq!(cond.children(), ids(&[7, 3, 5]));
        assert_eq!(cond.op(), ExprOp::Cond);
    }

    #[test]
    fn test_member_name_is_not_a_child() {
        let arrow = ExprKind::Member {
            op: MemberOp::Arrow,
            object: NodeId(1),
            member: "next".to_string(),
        };
        assert_eq!(arrow.children(), ids(&[1]));
        assert_eq!(arrow.op(), ExprOp::Arrow);
    }

    #[test]
    fn test_type_operand_order() {
        let cast = ExprKind::Cast { ty: NodeId(2), operand: NodeId(1) };
        assert_eq!(cast.children(), ids(&[2, 1]));

        let offsetof = ExprKind::Offsetof { ty: NodeId(4), member: NodeId(9) };
        assert_eq!(offsetof.children(), ids(&[4, 9]));

        let va_arg = ExprKind::VaArg { list: NodeId(9), ty: NodeId(4) };
        assert_eq!(va_arg.children(), ids(&[9, 4]));
    }

    #[test]
    fn test_kernel_call_children() {
        let call = ExprKind::KernelCall {
            func: NodeId(0),
            launch: ids(&[1, 2]),
            args: ids(&[3]),
        };
        assert_eq!(call.children(), ids(&[0, 1, 2, 3]));
    }

    #[test]
    fn test_init_children() {
        let init = Init {
            prefixes: ids(&[10]),
            value: InitValue::Braced(ids(&[11, 12])),
            ty: Some(NodeId(99)),
        };
        assert_eq!(init.children(), ids(&[10, 11, 12]));

        let field = Prefix { designator: Designator::Field("x".to_string()), decl: None };
        assert!(field.children().is_empty());
    }
}
