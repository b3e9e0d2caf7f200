//! Operator definitions
//!
//! `ExprOp` is the closed set of expression operator tags. Binary and unary
//! forms share a generic node shape and carry a `BinaryOp` / `UnaryOp`
//! sub-tag; every other tag has its own `ExprKind` variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add, Sub, Mul, Div, Mod,

    // Bitwise
    BitAnd, BitOr, BitXor, LeftShift, RightShift,

    // Logical
    LogicalAnd, LogicalOr,

    // Comparison
    Equal, NotEqual, Less, Greater, LessEqual, GreaterEqual,

    // Assignment
    Assign,
    AddAssign, SubAssign, MulAssign, DivAssign, ModAssign,
    BitAndAssign, BitOrAssign, BitXorAssign, LeftShiftAssign, RightShiftAssign,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 29] = [
        BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div, BinaryOp::Mod,
        BinaryOp::BitAnd, BinaryOp::BitOr, BinaryOp::BitXor, BinaryOp::LeftShift, BinaryOp::RightShift,
        BinaryOp::LogicalAnd, BinaryOp::LogicalOr,
        BinaryOp::Equal, BinaryOp::NotEqual, BinaryOp::Less, BinaryOp::Greater,
        BinaryOp::LessEqual, BinaryOp::GreaterEqual,
        BinaryOp::Assign,
        BinaryOp::AddAssign, BinaryOp::SubAssign, BinaryOp::MulAssign, BinaryOp::DivAssign,
        BinaryOp::ModAssign, BinaryOp::BitAndAssign, BinaryOp::BitOrAssign, BinaryOp::BitXorAssign,
        BinaryOp::LeftShiftAssign, BinaryOp::RightShiftAssign,
    ];

    /// Source token
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Assign => "=",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubAssign => "-=",
            BinaryOp::MulAssign => "*=",
            BinaryOp::DivAssign => "/=",
            BinaryOp::ModAssign => "%=",
            BinaryOp::BitAndAssign => "&=",
            BinaryOp::BitOrAssign => "|=",
            BinaryOp::BitXorAssign => "^=",
            BinaryOp::LeftShiftAssign => "<<=",
            BinaryOp::RightShiftAssign => ">>=",
        }
    }

    /// Operator tag name, as used in debug dumps
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "Add",
            BinaryOp::Sub => "Sub",
            BinaryOp::Mul => "Mul",
            BinaryOp::Div => "Div",
            BinaryOp::Mod => "Mod",
            BinaryOp::BitAnd => "And",
            BinaryOp::BitOr => "Or",
            BinaryOp::BitXor => "Xor",
            BinaryOp::LeftShift => "Lsh",
            BinaryOp::RightShift => "Rsh",
            BinaryOp::LogicalAnd => "AndAnd",
            BinaryOp::LogicalOr => "OrOr",
            BinaryOp::Equal => "EqEq",
            BinaryOp::NotEqual => "NotEq",
            BinaryOp::Less => "Lt",
            BinaryOp::Greater => "Gt",
            BinaryOp::LessEqual => "LtEq",
            BinaryOp::GreaterEqual => "GtEq",
            BinaryOp::Assign => "Eq",
            BinaryOp::AddAssign => "AddEq",
            BinaryOp::SubAssign => "SubEq",
            BinaryOp::MulAssign => "MulEq",
            BinaryOp::DivAssign => "DivEq",
            BinaryOp::ModAssign => "ModEq",
            BinaryOp::BitAndAssign => "AndEq",
            BinaryOp::BitOrAssign => "OrEq",
            BinaryOp::BitXorAssign => "XorEq",
            BinaryOp::LeftShiftAssign => "LshEq",
            BinaryOp::RightShiftAssign => "RshEq",
        }
    }

    pub fn is_assignment(self) -> bool {
        self.precedence() == Precedence::Assign
    }

    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => Precedence::Multiplicative,
            BinaryOp::Add | BinaryOp::Sub => Precedence::Additive,
            BinaryOp::LeftShift | BinaryOp::RightShift => Precedence::Shift,
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEqual | BinaryOp::GreaterEqual => {
                Precedence::Relational
            }
            BinaryOp::Equal | BinaryOp::NotEqual => Precedence::Equality,
            BinaryOp::BitAnd => Precedence::BitAnd,
            BinaryOp::BitXor => Precedence::BitXor,
            BinaryOp::BitOr => Precedence::BitOr,
            BinaryOp::LogicalAnd => Precedence::AndAnd,
            BinaryOp::LogicalOr => Precedence::OrOr,
            BinaryOp::Assign
            | BinaryOp::AddAssign
            | BinaryOp::SubAssign
            | BinaryOp::MulAssign
            | BinaryOp::DivAssign
            | BinaryOp::ModAssign
            | BinaryOp::BitAndAssign
            | BinaryOp::BitOrAssign
            | BinaryOp::BitXorAssign
            | BinaryOp::LeftShiftAssign
            | BinaryOp::RightShiftAssign => Precedence::Assign,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    // Arithmetic
    Plus, Minus,

    // Bitwise
    BitNot,

    // Logical
    LogicalNot,

    // Pointer/address
    Dereference, AddressOf,

    // Pre/post increment/decrement
    PreIncrement, PostIncrement,
    PreDecrement, PostDecrement,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 10] = [
        UnaryOp::Plus, UnaryOp::Minus, UnaryOp::BitNot, UnaryOp::LogicalNot,
        UnaryOp::Dereference, UnaryOp::AddressOf,
        UnaryOp::PreIncrement, UnaryOp::PostIncrement,
        UnaryOp::PreDecrement, UnaryOp::PostDecrement,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::BitNot => "~",
            UnaryOp::LogicalNot => "!",
            UnaryOp::Dereference => "*",
            UnaryOp::AddressOf => "&",
            UnaryOp::PreIncrement | UnaryOp::PostIncrement => "++",
            UnaryOp::PreDecrement | UnaryOp::PostDecrement => "--",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Plus => "Plus",
            UnaryOp::Minus => "Minus",
            UnaryOp::BitNot => "Twid",
            UnaryOp::LogicalNot => "Not",
            UnaryOp::Dereference => "Indir",
            UnaryOp::AddressOf => "Addr",
            UnaryOp::PreIncrement => "PreInc",
            UnaryOp::PostIncrement => "PostInc",
            UnaryOp::PreDecrement => "PreDec",
            UnaryOp::PostDecrement => "PostDec",
        }
    }

    /// `x++` and `x--` bind as postfix operators
    pub fn is_postfix(self) -> bool {
        matches!(self, UnaryOp::PostIncrement | UnaryOp::PostDecrement)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Binding strength of an expression's top-level operator, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Comma,
    Assign,
    Cond,
    OrOr,
    AndAnd,
    BitOr,
    BitXor,
    BitAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Postfix,
    Primary,
}

impl Precedence {
    /// The next tighter level. Used for the right operand of a
    /// left-associative operator.
    pub fn tighter(self) -> Precedence {
        match self {
            Precedence::Comma => Precedence::Assign,
            Precedence::Assign => Precedence::Cond,
            Precedence::Cond => Precedence::OrOr,
            Precedence::OrOr => Precedence::AndAnd,
            Precedence::AndAnd => Precedence::BitOr,
            Precedence::BitOr => Precedence::BitXor,
            Precedence::BitXor => Precedence::BitAnd,
            Precedence::BitAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Shift,
            Precedence::Shift => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            Precedence::Unary => Precedence::Postfix,
            Precedence::Postfix | Precedence::Primary => Precedence::Primary,
        }
    }
}

/// How many children a tag produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn admits(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

/// Expression operator tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExprOp {
    Binary(BinaryOp),
    Unary(UnaryOp),
    Arrow,
    Dot,
    Call,
    /// Kernel launch: `f<<<grid, block>>>(args)`
    KernelCall,
    Cast,
    /// Compound literal: `(Type){Init}`
    CastInit,
    Comma,
    Cond,
    Index,
    Offsetof,
    Paren,
    SizeofExpr,
    SizeofType,
    VaArg,
    Name,
    Number,
    Literal,
    String,
    /// `<<<` marker
    LaunchOpen,
    /// `>>>` marker
    LaunchClose,
}

impl ExprOp {
    const SPECIAL: [ExprOp; 20] = [
        ExprOp::Arrow, ExprOp::Dot, ExprOp::Call, ExprOp::KernelCall, ExprOp::Cast,
        ExprOp::CastInit, ExprOp::Comma, ExprOp::Cond, ExprOp::Index, ExprOp::Offsetof,
        ExprOp::Paren, ExprOp::SizeofExpr, ExprOp::SizeofType, ExprOp::VaArg, ExprOp::Name,
        ExprOp::Number, ExprOp::Literal, ExprOp::String, ExprOp::LaunchOpen, ExprOp::LaunchClose,
    ];

    /// Every operator tag
    pub fn all() -> Vec<ExprOp> {
        BinaryOp::ALL
            .iter()
            .map(|op| ExprOp::Binary(*op))
            .chain(UnaryOp::ALL.iter().map(|op| ExprOp::Unary(*op)))
            .chain(Self::SPECIAL)
            .collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            ExprOp::Binary(op) => op.name(),
            ExprOp::Unary(op) => op.name(),
            ExprOp::Arrow => "Arrow",
            ExprOp::Dot => "Dot",
            ExprOp::Call => "Call",
            ExprOp::KernelCall => "KernelCall",
            ExprOp::Cast => "Cast",
            ExprOp::CastInit => "CastInit",
            ExprOp::Comma => "Comma",
            ExprOp::Cond => "Cond",
            ExprOp::Index => "Index",
            ExprOp::Offsetof => "Offsetof",
            ExprOp::Paren => "Paren",
            ExprOp::SizeofExpr => "SizeofExpr",
            ExprOp::SizeofType => "SizeofType",
            ExprOp::VaArg => "VaArg",
            ExprOp::Name => "Name",
            ExprOp::Number => "Number",
            ExprOp::Literal => "Literal",
            ExprOp::String => "String",
            ExprOp::LaunchOpen => "LaunchOpen",
            ExprOp::LaunchClose => "LaunchClose",
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            ExprOp::Binary(op) => op.precedence(),
            ExprOp::Unary(op) if op.is_postfix() => Precedence::Postfix,
            ExprOp::Unary(_) | ExprOp::Cast | ExprOp::SizeofExpr | ExprOp::SizeofType => {
                Precedence::Unary
            }
            ExprOp::Arrow
            | ExprOp::Dot
            | ExprOp::Call
            | ExprOp::KernelCall
            | ExprOp::CastInit
            | ExprOp::Index => Precedence::Postfix,
            ExprOp::Comma => Precedence::Comma,
            ExprOp::Cond => Precedence::Cond,
            ExprOp::Offsetof
            | ExprOp::Paren
            | ExprOp::VaArg
            | ExprOp::Name
            | ExprOp::Number
            | ExprOp::Literal
            | ExprOp::String
            | ExprOp::LaunchOpen
            | ExprOp::LaunchClose => Precedence::Primary,
        }
    }

    /// Child count every node carrying this tag must produce
    pub fn arity(self) -> Arity {
        match self {
            ExprOp::Binary(_) => Arity::Exactly(2),
            ExprOp::Unary(_) => Arity::Exactly(1),
            ExprOp::Arrow | ExprOp::Dot | ExprOp::Paren | ExprOp::SizeofExpr | ExprOp::SizeofType => {
                Arity::Exactly(1)
            }
            ExprOp::Call | ExprOp::KernelCall => Arity::AtLeast(1),
            ExprOp::Cast | ExprOp::CastInit | ExprOp::Index | ExprOp::Offsetof | ExprOp::VaArg => {
                Arity::Exactly(2)
            }
            ExprOp::Comma => Arity::AtLeast(1),
            ExprOp::Cond => Arity::Exactly(3),
            ExprOp::Name
            | ExprOp::Number
            | ExprOp::Literal
            | ExprOp::String
            | ExprOp::LaunchOpen
            | ExprOp::LaunchClose => Arity::Exactly(0),
        }
    }
}

impl fmt::Display for ExprOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_binary_op_display() {
        assert_eq!(format!("{}", BinaryOp::Add), "+");
        assert_eq!(format!("{}", BinaryOp::Equal), "==");
        assert_eq!(format!("{}", BinaryOp::LogicalAnd), "&&");
        assert_eq!(format!("{}", BinaryOp::RightShiftAssign), ">>=");
    }

    #[test]
    fn test_unary_op_display() {
        assert_eq!(format!("{}", UnaryOp::Minus), "-");
        assert_eq!(format!("{}", UnaryOp::Dereference), "*");
        assert_eq!(format!("{}", UnaryOp::LogicalNot), "!");
        assert_eq!(format!("{}", UnaryOp::PostDecrement), "--");
    }

    #[test]
    fn test_tag_names_are_unique() {
        let all = ExprOp::all();
        let names: HashSet<&str> = all.iter().map(|op| op.name()).collect();
        assert_eq!(names.len(), all.len());
        assert_eq!(ExprOp::Binary(BinaryOp::Assign).to_string(), "Eq");
        assert_eq!(ExprOp::CastInit.to_string(), "CastInit");
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(Precedence::Multiplicative > Precedence::Additive);
        assert!(Precedence::Assign < Precedence::Cond);
        assert!(Precedence::Comma < Precedence::Assign);
        assert_eq!(Precedence::Additive.tighter(), Precedence::Multiplicative);
        assert_eq!(Precedence::Primary.tighter(), Precedence::Primary);
    }

    #[test]
    fn test_assignment_ops() {
        let assigns: Vec<_> = BinaryOp::ALL.iter().filter(|op| op.is_assignment()).collect();
        assert_eq!(assigns.len(), 11);
        assert!(assigns.iter().all(|op| op.symbol().ends_with('=')));
        assert!(!BinaryOp::Equal.is_assignment());
    }

    #[test]
    fn test_postfix_unary_precedence() {
        assert_eq!(ExprOp::Unary(UnaryOp::PostIncrement).precedence(), Precedence::Postfix);
        assert_eq!(ExprOp::Unary(UnaryOp::PreIncrement).precedence(), Precedence::Unary);
    }
}
