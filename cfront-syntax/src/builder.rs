//! Syntax graph builder
//!
//! Construction API used by the parser and by tests. Each method allocates
//! one node, mints its identity and returns it.

use crate::ast::{
    Comments, Decl, Designator, Expr, ExprKind, Init, InitValue, Label, Literal, MemberOp, Prefix,
    Prog, Qualifiers, Stmt, StmtKind, StorageClass, Syntax, SyntaxArena, TypeKind, TypeNode,
    BinaryOp, UnaryOp,
};
use cfront_common::{NodeId, SourceSpan, StructuralError};

/// Builder for constructing syntax graphs
#[derive(Debug, Default)]
pub struct SyntaxBuilder {
    arena: SyntaxArena,
}

impl SyntaxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arena(&self) -> &SyntaxArena {
        &self.arena
    }

    pub fn finish(self) -> SyntaxArena {
        self.arena
    }

    pub fn with_span(&mut self, id: NodeId, span: SourceSpan) -> NodeId {
        self.arena.set_span(id, span);
        id
    }

    pub fn with_comments(&mut self, id: NodeId, comments: Comments) -> NodeId {
        self.arena.set_comments(id, comments);
        id
    }

    pub fn resolve_decl(&mut self, expr: NodeId, decl: NodeId) {
        self.arena.resolve_decl(expr, decl);
    }

    pub fn set_expr_type(&mut self, expr: NodeId, ty: NodeId) {
        self.arena.set_expr_type(expr, ty);
    }

    // Literals

    pub fn literal(&mut self, literal: Literal) -> NodeId {
        self.arena.alloc(Syntax::Literal(literal))
    }

    pub fn symbol(&mut self, text: &str) -> NodeId {
        self.literal(Literal::Symbol(text.to_string()))
    }

    // Expressions

    pub fn expr(&mut self, kind: ExprKind) -> NodeId {
        self.arena.alloc(Syntax::Expr(Expr::new(kind)))
    }

    pub fn name(&mut self, text: &str) -> NodeId {
        self.expr(ExprKind::Name(text.to_string()))
    }

    pub fn number(&mut self, text: &str) -> NodeId {
        self.expr(ExprKind::Number(text.to_string()))
    }

    pub fn literal_token(&mut self, text: &str) -> NodeId {
        self.expr(ExprKind::Literal(text.to_string()))
    }

    /// String literal from already-quoted pieces
    pub fn string(&mut self, pieces: &[&str]) -> NodeId {
        self.expr(ExprKind::String(pieces.iter().map(|p| p.to_string()).collect()))
    }

    pub fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        self.expr(ExprKind::Binary { op, left, right })
    }

    pub fn assign(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.binary(BinaryOp::Assign, left, right)
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.expr(ExprKind::Unary { op, operand })
    }

    pub fn paren(&mut self, inner: NodeId) -> NodeId {
        self.expr(ExprKind::Paren(inner))
    }

    pub fn dot(&mut self, object: NodeId, member: &str) -> NodeId {
        self.expr(ExprKind::Member {
            op: MemberOp::Dot,
            object,
            member: member.to_string(),
        })
    }

    pub fn arrow(&mut self, object: NodeId, member: &str) -> NodeId {
        self.expr(ExprKind::Member {
            op: MemberOp::Arrow,
            object,
            member: member.to_string(),
        })
    }

    pub fn call(&mut self, func: NodeId, args: Vec<NodeId>) -> NodeId {
        self.expr(ExprKind::Call { func, args })
    }

    pub fn kernel_call(&mut self, func: NodeId, launch: Vec<NodeId>, args: Vec<NodeId>) -> NodeId {
        self.expr(ExprKind::KernelCall { func, launch, args })
    }

    pub fn cast(&mut self, ty: NodeId, operand: NodeId) -> NodeId {
        self.expr(ExprKind::Cast { ty, operand })
    }

    /// Compound literal `(ty){...}`
    pub fn cast_init(&mut self, ty: NodeId, init: NodeId) -> NodeId {
        self.expr(ExprKind::CastInit { ty, init })
    }

    /// Comma expression; the list must hold at least one operand
    pub fn comma(&mut self, list: Vec<NodeId>) -> NodeId {
        let empty = list.is_empty();
        let id = self.expr(ExprKind::Comma(list));
        if empty {
            StructuralError::MissingSlot {
                id,
                what: "comma expression",
                slot: "operand",
            }
            .raise();
        }
        id
    }

    pub fn cond(&mut self, cond: NodeId, then_branch: NodeId, else_branch: NodeId) -> NodeId {
        self.expr(ExprKind::Cond {
            cond,
            then_branch,
            else_branch,
        })
    }

    pub fn index(&mut self, base: NodeId, index: NodeId) -> NodeId {
        self.expr(ExprKind::Index { base, index })
    }

    pub fn offsetof(&mut self, ty: NodeId, member: NodeId) -> NodeId {
        self.expr(ExprKind::Offsetof { ty, member })
    }

    pub fn sizeof_expr(&mut self, operand: NodeId) -> NodeId {
        self.expr(ExprKind::SizeofExpr(operand))
    }

    pub fn sizeof_type(&mut self, ty: NodeId) -> NodeId {
        self.expr(ExprKind::SizeofType(ty))
    }

    pub fn va_arg(&mut self, list: NodeId, ty: NodeId) -> NodeId {
        self.expr(ExprKind::VaArg { list, ty })
    }

    // Types

    pub fn type_node(&mut self, ty: TypeNode) -> NodeId {
        self.arena.alloc(Syntax::Type(ty))
    }

    pub fn named_type(&mut self, name: &str) -> NodeId {
        self.type_node(TypeNode::new(TypeKind::Named(name.to_string())))
    }

    pub fn qualified_type(&mut self, name: &str, qualifiers: Qualifiers) -> NodeId {
        let mut ty = TypeNode::new(TypeKind::Named(name.to_string()));
        ty.qualifiers = qualifiers;
        self.type_node(ty)
    }

    pub fn pointer_to(&mut self, base: NodeId) -> NodeId {
        let mut ty = TypeNode::new(TypeKind::Pointer);
        ty.base = Some(base);
        self.type_node(ty)
    }

    pub fn array_of(&mut self, base: NodeId, len: Option<NodeId>) -> NodeId {
        let mut ty = TypeNode::new(TypeKind::Array);
        ty.base = Some(base);
        ty.width = len;
        self.type_node(ty)
    }

    pub fn function_type(&mut self, ret: NodeId, params: Vec<NodeId>, variadic: bool) -> NodeId {
        let mut ty = TypeNode::new(TypeKind::Function { variadic });
        ty.base = Some(ret);
        ty.decls = params;
        self.type_node(ty)
    }

    pub fn struct_type(&mut self, tag: Option<&str>, fields: Vec<NodeId>) -> NodeId {
        let mut ty = TypeNode::new(TypeKind::Struct { tag: tag.map(str::to_string) });
        ty.decls = fields;
        self.type_node(ty)
    }

    pub fn union_type(&mut self, tag: Option<&str>, fields: Vec<NodeId>) -> NodeId {
        let mut ty = TypeNode::new(TypeKind::Union { tag: tag.map(str::to_string) });
        ty.decls = fields;
        self.type_node(ty)
    }

    pub fn enum_type(&mut self, tag: Option<&str>, enumerators: Vec<NodeId>) -> NodeId {
        let mut ty = TypeNode::new(TypeKind::Enum { tag: tag.map(str::to_string) });
        ty.decls = enumerators;
        self.type_node(ty)
    }

    /// Bit-field member type `name : width`
    pub fn bitfield(&mut self, name: &str, width: NodeId) -> NodeId {
        let mut ty = TypeNode::new(TypeKind::Named(name.to_string()));
        ty.width = Some(width);
        self.type_node(ty)
    }

    // Initializers

    pub fn init_expr(&mut self, expr: NodeId) -> NodeId {
        self.init(Vec::new(), InitValue::Expr(expr))
    }

    pub fn braced(&mut self, items: Vec<NodeId>) -> NodeId {
        self.init(Vec::new(), InitValue::Braced(items))
    }

    pub fn init(&mut self, prefixes: Vec<NodeId>, value: InitValue) -> NodeId {
        self.arena.alloc(Syntax::Init(Init { prefixes, value, ty: None }))
    }

    pub fn field_prefix(&mut self, field: &str) -> NodeId {
        self.arena.alloc(Syntax::Prefix(Prefix {
            designator: Designator::Field(field.to_string()),
            decl: None,
        }))
    }

    pub fn index_prefix(&mut self, index: NodeId) -> NodeId {
        self.arena.alloc(Syntax::Prefix(Prefix {
            designator: Designator::Index(index),
            decl: None,
        }))
    }

    // Declarations

    pub fn decl_node(&mut self, decl: Decl) -> NodeId {
        self.arena.alloc(Syntax::Decl(decl))
    }

    pub fn decl(&mut self, name: &str, ty: NodeId, init: Option<NodeId>) -> NodeId {
        self.decl_node(Decl {
            name: Some(name.to_string()),
            storage: None,
            ty: Some(ty),
            init,
            body: None,
        })
    }

    pub fn storage_decl(&mut self, storage: StorageClass, name: &str, ty: NodeId, init: Option<NodeId>) -> NodeId {
        self.decl_node(Decl {
            name: Some(name.to_string()),
            storage: Some(storage),
            ty: Some(ty),
            init,
            body: None,
        })
    }

    pub fn param(&mut self, name: Option<&str>, ty: NodeId) -> NodeId {
        self.decl_node(Decl {
            name: name.map(str::to_string),
            storage: None,
            ty: Some(ty),
            init: None,
            body: None,
        })
    }

    /// Enumerator `name` or `name = value`
    pub fn enumerator(&mut self, name: &str, value: Option<NodeId>) -> NodeId {
        let init = value.map(|expr| self.init_expr(expr));
        self.decl_node(Decl {
            name: Some(name.to_string()),
            storage: None,
            ty: None,
            init,
            body: None,
        })
    }

    /// Function definition; `ty` is a function type, `body` a block
    pub fn function(&mut self, name: &str, ty: NodeId, body: NodeId) -> NodeId {
        self.decl_node(Decl {
            name: Some(name.to_string()),
            storage: None,
            ty: Some(ty),
            init: None,
            body: Some(body),
        })
    }

    // Statements

    pub fn stmt(&mut self, kind: StmtKind) -> NodeId {
        self.arena.alloc(Syntax::Stmt(Stmt::new(kind)))
    }

    pub fn labeled(&mut self, kind: StmtKind, labels: Vec<NodeId>) -> NodeId {
        self.arena.alloc(Syntax::Stmt(Stmt { kind, labels }))
    }

    pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        self.stmt(StmtKind::Expr(expr))
    }

    pub fn decl_stmt(&mut self, decl: NodeId) -> NodeId {
        self.stmt(StmtKind::Decl(decl))
    }

    pub fn block(&mut self, stmts: Vec<NodeId>) -> NodeId {
        self.stmt(StmtKind::Block(stmts))
    }

    pub fn if_stmt(&mut self, cond: NodeId, then_branch: NodeId, else_branch: Option<NodeId>) -> NodeId {
        self.stmt(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    pub fn return_stmt(&mut self, value: Option<NodeId>) -> NodeId {
        self.stmt(StmtKind::Return(value))
    }

    pub fn goto(&mut self, target: &str) -> NodeId {
        let target = self.symbol(target);
        self.stmt(StmtKind::Goto(target))
    }

    // Labels

    pub fn case_label(&mut self, value: NodeId) -> NodeId {
        self.arena.alloc(Syntax::Label(Label::Case(value)))
    }

    pub fn default_label(&mut self) -> NodeId {
        self.arena.alloc(Syntax::Label(Label::Default))
    }

    pub fn named_label(&mut self, name: &str) -> NodeId {
        let name = self.symbol(name);
        self.arena.alloc(Syntax::Label(Label::Named(name)))
    }

    pub fn prog(&mut self, decls: Vec<NodeId>) -> NodeId {
        self.arena.alloc(Syntax::Prog(Prog { decls }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "comma expression #0 has no operand")]
    fn test_empty_comma_is_rejected() {
        let mut b = SyntaxBuilder::new();
        b.comma(vec![]);
    }

    #[test]
    fn test_builder_shares_nodes_by_id() {
        let mut b = SyntaxBuilder::new();
        let x = b.name("x");
        let sum = b.binary(BinaryOp::Add, x, x);
        let arena = b.finish();
        assert_eq!(arena.children(sum), vec![x, x]);
    }

    #[test]
    fn test_goto_target_is_symbol_child() {
        let mut b = SyntaxBuilder::new();
        let goto = b.goto("done");
        let arena = b.finish();
        let children = arena.children(goto);
        assert_eq!(children.len(), 1);
        assert_eq!(arena.literal(children[0]), &Literal::Symbol("done".to_string()));
    }

    #[test]
    fn test_enumerator_wraps_value_in_initializer() {
        let mut b = SyntaxBuilder::new();
        let two = b.number("2");
        let e = b.enumerator("B", Some(two));
        let arena = b.finish();
        let init = arena.decl(e).init.expect("enumerator value");
        assert_eq!(arena.init(init).value, InitValue::Expr(two));
    }
}
