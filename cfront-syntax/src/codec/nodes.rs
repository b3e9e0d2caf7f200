//! Wire node family
//!
//! Self-contained owned trees, one record per node. The `kind` discriminant
//! is produced by serde from the variant name when a node is encoded; it is
//! not a field of the node.

use crate::ast::{BinaryOp, Precedence, UnaryOp};
use crate::printer::fuses;
use cfront_common::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Assignment operator tag carried by a cast record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignOp {
    Eq,
    AddEq,
    SubEq,
    MulEq,
    DivEq,
    ModEq,
    AndEq,
    OrEq,
    XorEq,
    LshEq,
    RshEq,
}

impl AssignOp {
    /// The binary assignment operator with the same meaning
    pub fn to_binary(self) -> BinaryOp {
        match self {
            AssignOp::Eq => BinaryOp::Assign,
            AssignOp::AddEq => BinaryOp::AddAssign,
            AssignOp::SubEq => BinaryOp::SubAssign,
            AssignOp::MulEq => BinaryOp::MulAssign,
            AssignOp::DivEq => BinaryOp::DivAssign,
            AssignOp::ModEq => BinaryOp::ModAssign,
            AssignOp::AndEq => BinaryOp::BitAndAssign,
            AssignOp::OrEq => BinaryOp::BitOrAssign,
            AssignOp::XorEq => BinaryOp::BitXorAssign,
            AssignOp::LshEq => BinaryOp::LeftShiftAssign,
            AssignOp::RshEq => BinaryOp::RightShiftAssign,
        }
    }

    pub fn from_binary(op: BinaryOp) -> Option<AssignOp> {
        let op = match op {
            BinaryOp::Assign => AssignOp::Eq,
            BinaryOp::AddAssign => AssignOp::AddEq,
            BinaryOp::SubAssign => AssignOp::SubEq,
            BinaryOp::MulAssign => AssignOp::MulEq,
            BinaryOp::DivAssign => AssignOp::DivEq,
            BinaryOp::ModAssign => AssignOp::ModEq,
            BinaryOp::BitAndAssign => AssignOp::AndEq,
            BinaryOp::BitOrAssign => AssignOp::OrEq,
            BinaryOp::BitXorAssign => AssignOp::XorEq,
            BinaryOp::LeftShiftAssign => AssignOp::LshEq,
            BinaryOp::RightShiftAssign => AssignOp::RshEq,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        self.to_binary().symbol()
    }
}

/// Expression records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum WireExpr {
    Ident {
        #[serde(default)]
        id: NodeId,
        name: String,
    },
    /// Literal token as written
    BasicLit {
        #[serde(default)]
        id: NodeId,
        value: String,
    },
    BinaryExpr {
        #[serde(default)]
        id: NodeId,
        op: BinaryOp,
        x: Box<WireExpr>,
        y: Box<WireExpr>,
    },
    UnaryExpr {
        #[serde(default)]
        id: NodeId,
        op: UnaryOp,
        x: Box<WireExpr>,
    },
    ParenExpr {
        #[serde(default)]
        id: NodeId,
        x: Box<WireExpr>,
    },
    CallExpr {
        #[serde(default)]
        id: NodeId,
        func: Box<WireExpr>,
        #[serde(default)]
        args: Vec<WireExpr>,
    },
    IndexExpr {
        #[serde(default)]
        id: NodeId,
        x: Box<WireExpr>,
        index: Box<WireExpr>,
    },
    /// `x.sel`, or `x->sel` when `arrow` is set
    SelectorExpr {
        #[serde(default)]
        id: NodeId,
        x: Box<WireExpr>,
        sel: String,
        #[serde(default)]
        arrow: bool,
    },
    /// Pointer dereference
    StarExpr {
        #[serde(default)]
        id: NodeId,
        x: Box<WireExpr>,
    },
    CastExpr {
        #[serde(default)]
        id: NodeId,
        op: AssignOp,
        #[serde(rename = "type")]
        ty: WireType,
        expr: Box<WireExpr>,
    },
}

/// Type records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum WireType {
    NamedType {
        #[serde(default)]
        id: NodeId,
        name: String,
    },
    PointerType {
        #[serde(default)]
        id: NodeId,
        elem: Box<WireType>,
    },
    ArrayType {
        #[serde(default)]
        id: NodeId,
        elem: Box<WireType>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        len: Option<Box<WireExpr>>,
    },
}

impl WireExpr {
    pub const KINDS: [&'static str; 10] = [
        "Ident",
        "BasicLit",
        "BinaryExpr",
        "UnaryExpr",
        "ParenExpr",
        "CallExpr",
        "IndexExpr",
        "SelectorExpr",
        "StarExpr",
        "CastExpr",
    ];

    /// The discriminant this record is encoded with
    pub fn kind(&self) -> &'static str {
        match self {
            WireExpr::Ident { .. } => "Ident",
            WireExpr::BasicLit { .. } => "BasicLit",
            WireExpr::BinaryExpr { .. } => "BinaryExpr",
            WireExpr::UnaryExpr { .. } => "UnaryExpr",
            WireExpr::ParenExpr { .. } => "ParenExpr",
            WireExpr::CallExpr { .. } => "CallExpr",
            WireExpr::IndexExpr { .. } => "IndexExpr",
            WireExpr::SelectorExpr { .. } => "SelectorExpr",
            WireExpr::StarExpr { .. } => "StarExpr",
            WireExpr::CastExpr { .. } => "CastExpr",
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            WireExpr::Ident { id, .. }
            | WireExpr::BasicLit { id, .. }
            | WireExpr::BinaryExpr { id, .. }
            | WireExpr::UnaryExpr { id, .. }
            | WireExpr::ParenExpr { id, .. }
            | WireExpr::CallExpr { id, .. }
            | WireExpr::IndexExpr { id, .. }
            | WireExpr::SelectorExpr { id, .. }
            | WireExpr::StarExpr { id, .. }
            | WireExpr::CastExpr { id, .. } => *id,
        }
    }

    /// Child records in field order
    pub fn children(&self) -> Vec<WireRef<'_>> {
        match self {
            WireExpr::Ident { .. } | WireExpr::BasicLit { .. } => Vec::new(),
            WireExpr::BinaryExpr { x, y, .. } => vec![WireRef::Expr(x), WireRef::Expr(y)],
            WireExpr::UnaryExpr { x, .. } | WireExpr::ParenExpr { x, .. } | WireExpr::StarExpr { x, .. } => {
                vec![WireRef::Expr(x)]
            }
            WireExpr::SelectorExpr { x, .. } => vec![WireRef::Expr(x)],
            WireExpr::CallExpr { func, args, .. } => std::iter::once(WireRef::Expr(func))
                .chain(args.iter().map(WireRef::Expr))
                .collect(),
            WireExpr::IndexExpr { x, index, .. } => vec![WireRef::Expr(x), WireRef::Expr(index)],
            WireExpr::CastExpr { ty, expr, .. } => vec![WireRef::Type(ty), WireRef::Expr(expr)],
        }
    }

    /// Equality of discriminants, scalar fields and children, ignoring identities
    pub fn structurally_eq(&self, other: &WireExpr) -> bool {
        let (mut a, mut b) = (self.clone(), other.clone());
        a.for_each_id_mut(&mut |id: &mut NodeId| *id = NodeId::default());
        b.for_each_id_mut(&mut |id: &mut NodeId| *id = NodeId::default());
        a == b
    }

    /// Visit every identity in the tree, this node's first
    pub fn for_each_id_mut(&mut self, f: &mut impl FnMut(&mut NodeId)) {
        match self {
            WireExpr::Ident { id, .. } | WireExpr::BasicLit { id, .. } => f(id),
            WireExpr::BinaryExpr { id, x, y, .. } => {
                f(id);
                x.for_each_id_mut(f);
                y.for_each_id_mut(f);
            }
            WireExpr::UnaryExpr { id, x, .. }
            | WireExpr::ParenExpr { id, x }
            | WireExpr::StarExpr { id, x }
            | WireExpr::SelectorExpr { id, x, .. } => {
                f(id);
                x.for_each_id_mut(f);
            }
            WireExpr::CallExpr { id, func, args } => {
                f(id);
                func.for_each_id_mut(f);
                for arg in args {
                    arg.for_each_id_mut(f);
                }
            }
            WireExpr::IndexExpr { id, x, index } => {
                f(id);
                x.for_each_id_mut(f);
                index.for_each_id_mut(f);
            }
            WireExpr::CastExpr { id, ty, expr, .. } => {
                f(id);
                ty.for_each_id_mut(f);
                expr.for_each_id_mut(f);
            }
        }
    }

    fn precedence(&self) -> Precedence {
        match self {
            WireExpr::Ident { .. } | WireExpr::BasicLit { .. } | WireExpr::ParenExpr { .. } => {
                Precedence::Primary
            }
            WireExpr::CallExpr { .. } | WireExpr::IndexExpr { .. } | WireExpr::SelectorExpr { .. } => {
                Precedence::Postfix
            }
            WireExpr::UnaryExpr { op, .. } if op.is_postfix() => Precedence::Postfix,
            WireExpr::UnaryExpr { .. } | WireExpr::StarExpr { .. } | WireExpr::CastExpr { .. } => {
                Precedence::Unary
            }
            WireExpr::BinaryExpr { op, .. } => op.precedence(),
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, min: Precedence) -> fmt::Result {
        let wrap = self.precedence() < min;
        if wrap {
            f.write_str("(")?;
        }
        match self {
            WireExpr::Ident { name, .. } => f.write_str(name)?,
            WireExpr::BasicLit { value, .. } => f.write_str(value)?,
            WireExpr::BinaryExpr { op, x, y, .. } if op.is_assignment() => {
                x.fmt_at(f, Precedence::Unary)?;
                write!(f, " {} ", op.symbol())?;
                y.fmt_at(f, Precedence::Assign)?;
            }
            WireExpr::BinaryExpr { op, x, y, .. } => {
                let prec = op.precedence();
                x.fmt_at(f, prec)?;
                write!(f, " {} ", op.symbol())?;
                y.fmt_at(f, prec.tighter())?;
            }
            WireExpr::UnaryExpr { op, x, .. } if op.is_postfix() => {
                x.fmt_at(f, Precedence::Postfix)?;
                f.write_str(op.symbol())?;
            }
            WireExpr::UnaryExpr { op, x, .. } => prefix(f, op.symbol(), x)?,
            WireExpr::ParenExpr { x, .. } => {
                f.write_str("(")?;
                x.fmt_at(f, Precedence::Comma)?;
                f.write_str(")")?;
            }
            WireExpr::CallExpr { func, args, .. } => {
                func.fmt_at(f, Precedence::Postfix)?;
                f.write_str("(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    arg.fmt_at(f, Precedence::Assign)?;
                }
                f.write_str(")")?;
            }
            WireExpr::IndexExpr { x, index, .. } => {
                x.fmt_at(f, Precedence::Postfix)?;
                f.write_str("[")?;
                index.fmt_at(f, Precedence::Comma)?;
                f.write_str("]")?;
            }
            WireExpr::SelectorExpr { x, sel, arrow, .. } => {
                x.fmt_at(f, Precedence::Postfix)?;
                f.write_str(if *arrow { "->" } else { "." })?;
                f.write_str(sel)?;
            }
            WireExpr::StarExpr { x, .. } => prefix(f, "*", x)?,
            WireExpr::CastExpr { ty, expr, .. } => {
                write!(f, "({}) ", ty)?;
                expr.fmt_at(f, Precedence::Unary)?;
            }
        }
        if wrap {
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Expression rendered at a minimum precedence
struct At<'e>(&'e WireExpr, Precedence);

impl fmt::Display for At<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_at(f, self.1)
    }
}

/// Prefix operator and operand, spaced apart where they would lex as one
/// token (`- -x`, `& &p`)
fn prefix(f: &mut fmt::Formatter<'_>, symbol: &str, operand: &WireExpr) -> fmt::Result {
    let text = At(operand, Precedence::Unary).to_string();
    f.write_str(symbol)?;
    if let (Some(prev), Some(next)) = (symbol.chars().next_back(), text.chars().next()) {
        if fuses(prev, next) {
            f.write_str(" ")?;
        }
    }
    f.write_str(&text)
}

impl fmt::Display for WireExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, Precedence::Comma)
    }
}

impl WireType {
    pub const KINDS: [&'static str; 3] = ["NamedType", "PointerType", "ArrayType"];

    pub fn kind(&self) -> &'static str {
        match self {
            WireType::NamedType { .. } => "NamedType",
            WireType::PointerType { .. } => "PointerType",
            WireType::ArrayType { .. } => "ArrayType",
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            WireType::NamedType { id, .. } | WireType::PointerType { id, .. } | WireType::ArrayType { id, .. } => *id,
        }
    }

    pub fn children(&self) -> Vec<WireRef<'_>> {
        match self {
            WireType::NamedType { .. } => Vec::new(),
            WireType::PointerType { elem, .. } => vec![WireRef::Type(elem)],
            WireType::ArrayType { elem, len, .. } => {
                let mut children = vec![WireRef::Type(elem)];
                children.extend(len.as_deref().map(WireRef::Expr));
                children
            }
        }
    }

    pub fn structurally_eq(&self, other: &WireType) -> bool {
        let (mut a, mut b) = (self.clone(), other.clone());
        a.for_each_id_mut(&mut |id: &mut NodeId| *id = NodeId::default());
        b.for_each_id_mut(&mut |id: &mut NodeId| *id = NodeId::default());
        a == b
    }

    pub fn for_each_id_mut(&mut self, f: &mut impl FnMut(&mut NodeId)) {
        match self {
            WireType::NamedType { id, .. } => f(id),
            WireType::PointerType { id, elem } => {
                f(id);
                elem.for_each_id_mut(f);
            }
            WireType::ArrayType { id, elem, len } => {
                f(id);
                elem.for_each_id_mut(f);
                if let Some(len) = len {
                    len.for_each_id_mut(f);
                }
            }
        }
    }

    /// C declarator text with `inner` as the declared part
    fn declarator(&self, inner: String) -> String {
        match self {
            WireType::NamedType { name, .. } if inner.is_empty() => name.clone(),
            WireType::NamedType { name, .. } => format!("{} {}", name, inner),
            WireType::PointerType { elem, .. } => elem.declarator(format!("*{}", inner)),
            WireType::ArrayType { elem, len, .. } => {
                let inner = if inner.starts_with('*') { format!("({})", inner) } else { inner };
                let len = len.as_ref().map(|len| len.to_string()).unwrap_or_default();
                elem.declarator(format!("{}[{}]", inner, len))
            }
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.declarator(String::new()))
    }
}

/// Borrowed handle to any wire record
#[derive(Debug, Clone, Copy)]
pub enum WireRef<'a> {
    Expr(&'a WireExpr),
    Type(&'a WireType),
}

impl<'a> WireRef<'a> {
    pub fn kind(self) -> &'static str {
        match self {
            WireRef::Expr(expr) => expr.kind(),
            WireRef::Type(ty) => ty.kind(),
        }
    }

    pub fn id(self) -> NodeId {
        match self {
            WireRef::Expr(expr) => expr.id(),
            WireRef::Type(ty) => ty.id(),
        }
    }

    pub fn children(self) -> Vec<WireRef<'a>> {
        match self {
            WireRef::Expr(expr) => expr.children(),
            WireRef::Type(ty) => ty.children(),
        }
    }
}

impl fmt::Display for WireRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireRef::Expr(expr) => fmt::Display::fmt(expr, f),
            WireRef::Type(ty) => fmt::Display::fmt(ty, f),
        }
    }
}
