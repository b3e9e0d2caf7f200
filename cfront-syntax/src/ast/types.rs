//! Type nodes
//!
//! A type is a chain of declarator modifiers ending in a named base:
//! `int *p[4]` is `Array(width 4) -> Pointer -> Named("int")`. Struct,
//! union and function types list their members or parameters as `Decl`
//! nodes in `decls`.

use cfront_common::NodeId;
use serde::{Deserialize, Serialize};

/// cv-qualifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qualifiers {
    pub is_const: bool,
    pub is_volatile: bool,
}

impl Qualifiers {
    pub const CONST: Qualifiers = Qualifiers { is_const: true, is_volatile: false };

    pub fn is_empty(&self) -> bool {
        !self.is_const && !self.is_volatile
    }

    /// Keywords in source order, e.g. `["const", "volatile"]`
    pub fn keywords(&self) -> Vec<&'static str> {
        let mut words = Vec::new();
        if self.is_const {
            words.push("const");
        }
        if self.is_volatile {
            words.push("volatile");
        }
        words
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeKind {
    /// Builtin or typedef name: `int`, `unsigned long`, `size_t`
    Named(String),

    /// Pointer to `base`
    Pointer,

    /// Array of `base`; `width` holds the length when known
    Array,

    /// Function returning `base` with parameters `decls`
    Function { variadic: bool },

    Struct { tag: Option<String> },

    Union { tag: Option<String> },

    /// Enumeration; `decls` are the enumerators
    Enum { tag: Option<String> },
}

impl TypeKind {
    pub fn describe(&self) -> &'static str {
        match self {
            TypeKind::Named(_) => "named type",
            TypeKind::Pointer => "pointer type",
            TypeKind::Array => "array type",
            TypeKind::Function { .. } => "function type",
            TypeKind::Struct { .. } => "struct type",
            TypeKind::Union { .. } => "union type",
            TypeKind::Enum { .. } => "enum type",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeNode {
    pub kind: TypeKind,
    pub qualifiers: Qualifiers,
    pub base: Option<NodeId>,
    pub decls: Vec<NodeId>,
    /// Array length, or bit-field width on a member's type
    pub width: Option<NodeId>,
}

impl TypeNode {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            qualifiers: Qualifiers::default(),
            base: None,
            decls: Vec::new(),
            width: None,
        }
    }

    /// Base, then declarator list, then width
    pub fn children(&self) -> Vec<NodeId> {
        let mut children = Vec::with_capacity(self.decls.len() + 2);
        children.extend(self.base);
        children.extend(self.decls.iter().copied());
        children.extend(self.width);
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_children_order() {
        let mut func = TypeNode::new(TypeKind::Function { variadic: false });
        func.base = Some(NodeId(1));
        func.decls = vec![NodeId(2), NodeId(3)];
        assert_eq!(func.children(), vec![NodeId(1), NodeId(2), NodeId(3)]);

        let mut field = TypeNode::new(TypeKind::Named("unsigned".to_string()));
        field.width = Some(NodeId(8));
        assert_eq!(field.children(), vec![NodeId(8)]);
    }

    #[test]
    fn test_qualifier_keywords() {
        assert!(Qualifiers::default().is_empty());
        assert_eq!(Qualifiers::CONST.keywords(), vec!["const"]);
        let cv = Qualifiers { is_const: true, is_volatile: true };
        assert_eq!(cv.keywords(), vec!["const", "volatile"]);
    }
}
