//! Type and declarator rendering
//!
//! Types print inside-out the way C declarators read: the declared name (or
//! nothing, for an abstract type) is wrapped by each modifier in turn until
//! the named base is reached, so `Pointer -> Array(4) -> int` prints as
//! `int (*p)[4]`.

use super::Printer;
use crate::ast::{Precedence, TypeKind, TypeNode};
use cfront_common::{NodeId, StructuralError};

impl<'a> Printer<'a> {
    /// Abstract type name, as in a cast or `sizeof`
    pub(super) fn type_name(&self, id: NodeId) -> String {
        self.declarator(id, String::new())
    }

    /// Wrap `inner` (a declarator built so far) with the type at `id`
    pub(super) fn declarator(&self, id: NodeId, inner: String) -> String {
        let arena = self.arena;
        let ty = arena.type_node(id);
        let quals = ty.qualifiers.keywords().join(" ");

        match &ty.kind {
            TypeKind::Named(name) => {
                let mut text = specifier(&quals, name, &inner);
                if let Some(width) = ty.width {
                    text.push(':');
                    text.push_str(&self.expr_string(width, Precedence::Cond));
                }
                text
            }
            TypeKind::Struct { tag } => {
                let head = self.aggregate("struct", tag.as_deref(), ty, "; ");
                specifier(&quals, &head, &inner)
            }
            TypeKind::Union { tag } => {
                let head = self.aggregate("union", tag.as_deref(), ty, "; ");
                specifier(&quals, &head, &inner)
            }
            TypeKind::Enum { tag } => {
                let head = self.aggregate("enum", tag.as_deref(), ty, ",");
                specifier(&quals, &head, &inner)
            }
            TypeKind::Pointer => {
                let mut text = String::from("*");
                if !quals.is_empty() {
                    text.push_str(&quals);
                    if !inner.is_empty() {
                        text.push(' ');
                    }
                }
                text.push_str(&inner);
                self.declarator(base(id, ty), text)
            }
            TypeKind::Array => {
                let len = ty
                    .width
                    .map(|width| self.expr_string(width, Precedence::Assign))
                    .unwrap_or_default();
                let text = format!("{}[{}]", group(inner), len);
                self.declarator(base(id, ty), text)
            }
            TypeKind::Function { variadic } => {
                let mut params: Vec<String> = ty.decls.iter().map(|d| self.decl_string(*d)).collect();
                if *variadic {
                    params.push("...".to_string());
                }
                let text = format!("{}({})", group(inner), params.join(","));
                self.declarator(base(id, ty), text)
            }
        }
    }

    /// `struct tag`, followed by the member list when there is one
    fn aggregate(&self, keyword: &str, tag: Option<&str>, ty: &TypeNode, sep: &str) -> String {
        let mut text = keyword.to_string();
        if let Some(tag) = tag {
            text.push(' ');
            text.push_str(tag);
        }
        if ty.decls.is_empty() {
            return text;
        }
        let members: Vec<String> = ty.decls.iter().map(|d| self.decl_string(*d)).collect();
        text.push_str(" {");
        text.push_str(&members.join(sep));
        if keyword != "enum" {
            text.push(';');
        }
        text.push('}');
        text
    }
}

#[track_caller]
fn base(id: NodeId, ty: &TypeNode) -> NodeId {
    match ty.base {
        Some(base) => base,
        None => StructuralError::MissingSlot {
            id,
            what: ty.kind.describe(),
            slot: "base type",
        }
        .raise(),
    }
}

/// A pointer declarator must be grouped before an array or function suffix
/// applies to it: `(*p)[4]`, not `*p[4]`
fn group(inner: String) -> String {
    if inner.starts_with('*') {
        format!("({})", inner)
    } else {
        inner
    }
}

fn specifier(quals: &str, name: &str, inner: &str) -> String {
    let mut text = String::new();
    if !quals.is_empty() {
        text.push_str(quals);
        text.push(' ');
    }
    text.push_str(name);
    let needs_space = inner
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '*' || c == '(');
    if needs_space {
        text.push(' ');
    }
    text.push_str(inner);
    text
}

#[cfg(test)]
mod tests {
    use crate::ast::Qualifiers;
    use crate::builder::SyntaxBuilder;
    use crate::printer::render;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_abstract_types() {
        let mut b = SyntaxBuilder::new();
        let int = b.named_type("int");
        let ptr = b.pointer_to(int);
        let ten = b.number("10");
        let ptr_array = b.array_of(ptr, Some(ten));
        let array = b.array_of(int, Some(ten));
        let array_ptr = b.pointer_to(array);
        let arena = b.finish();
        assert_eq!(render(&arena, int), "int");
        assert_eq!(render(&arena, ptr), "int *");
        assert_eq!(render(&arena, ptr_array), "int *[10]");
        assert_eq!(render(&arena, array_ptr), "int (*)[10]");
    }

    #[test]
    fn test_function_pointer_declarator() {
        let mut b = SyntaxBuilder::new();
        let int = b.named_type("int");
        let char_ty = b.named_type("char");
        let char_ptr = b.pointer_to(char_ty);
        let fmt = b.param(Some("fmt"), char_ptr);
        let func = b.function_type(int, vec![fmt], true);
        let func_ptr = b.pointer_to(func);
        let decl = b.decl("log", func_ptr, None);
        let arena = b.finish();
        assert_eq!(render(&arena, decl), "int (*log)(char *fmt,...)");
    }

    #[test]
    fn test_qualified_pointer() {
        let mut b = SyntaxBuilder::new();
        let c = b.qualified_type("char", Qualifiers::CONST);
        let ptr = b.pointer_to(c);
        let decl = b.decl("s", ptr, None);
        let arena = b.finish();
        assert_eq!(render(&arena, decl), "const char *s");
    }

    #[test]
    fn test_struct_and_enum_bodies() {
        let mut b = SyntaxBuilder::new();
        let int = b.named_type("int");
        let x = b.decl("x", int, None);
        let y = b.decl("y", int, None);
        let point = b.struct_type(Some("P"), vec![x, y]);
        let two = b.number("2");
        let a = b.enumerator("A", None);
        let bb = b.enumerator("B", Some(two));
        let color = b.enum_type(Some("E"), vec![a, bb]);
        let three = b.number("3");
        let flags = b.bitfield("unsigned", three);
        let field = b.decl("flags", flags, None);
        let arena = b.finish();
        assert_eq!(render(&arena, point), "struct P {int x; int y;}");
        assert_eq!(render(&arena, color), "enum E {A,B=2}");
        assert_eq!(render(&arena, field), "unsigned flags:3");
    }

    #[test]
    #[should_panic(expected = "pointer type #0 has no base type")]
    fn test_pointer_without_base_is_structural_error() {
        let mut b = SyntaxBuilder::new();
        let ptr = b.type_node(crate::ast::TypeNode::new(crate::ast::TypeKind::Pointer));
        let arena = b.finish();
        render(&arena, ptr);
    }
}
