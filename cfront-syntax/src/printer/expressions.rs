//! Expression and initializer rendering

use super::Printer;
use crate::ast::{Designator, ExprKind, InitValue, Precedence};
use cfront_common::NodeId;

impl<'a> Printer<'a> {
    /// Print `id` in a position that requires at least precedence `min`,
    /// adding parentheses if the expression binds more loosely
    pub(super) fn expr(&mut self, id: NodeId, min: Precedence) {
        let arena = self.arena;
        let expr = arena.expr(id);
        let prec = expr.op().precedence();
        let wrap = prec < min;
        if wrap {
            self.word("(");
        }

        match &expr.kind {
            ExprKind::Binary { op, left, right } if op.is_assignment() => {
                self.expr(*left, Precedence::Unary);
                self.word(op.symbol());
                self.expr(*right, Precedence::Assign);
            }
            ExprKind::Binary { op, left, right } => {
                self.expr(*left, prec);
                self.word(op.symbol());
                self.expr(*right, prec.tighter());
            }
            ExprKind::Unary { op, operand } if op.is_postfix() => {
                self.expr(*operand, Precedence::Postfix);
                self.word(op.symbol());
            }
            ExprKind::Unary { op, operand } => {
                self.word(op.symbol());
                self.expr(*operand, Precedence::Unary);
            }
            ExprKind::Member { op, object, member } => {
                self.expr(*object, Precedence::Postfix);
                self.word(op.symbol());
                self.word(member);
            }
            ExprKind::Call { func, args } => {
                self.expr(*func, Precedence::Postfix);
                self.args(args);
            }
            ExprKind::KernelCall { func, launch, args } => {
                self.expr(*func, Precedence::Postfix);
                self.word("<<<");
                self.list(launch);
                self.word(">>>");
                self.args(args);
            }
            ExprKind::Cast { ty, operand } => {
                self.parenthesized_type(*ty);
                self.raw(" ");
                self.expr(*operand, Precedence::Unary);
            }
            ExprKind::CastInit { ty, init } => {
                self.parenthesized_type(*ty);
                self.init(*init);
            }
            ExprKind::Comma(list) => {
                for (i, item) in list.iter().enumerate() {
                    if i == 0 {
                        self.expr(*item, Precedence::Comma);
                    } else {
                        self.word(",");
                        self.expr(*item, Precedence::Assign);
                    }
                }
            }
            ExprKind::Cond {
                cond,
                then_branch,
                else_branch,
            } => {
                self.expr(*cond, Precedence::OrOr);
                self.word("?");
                self.expr(*then_branch, Precedence::Comma);
                self.word(":");
                self.expr(*else_branch, Precedence::Cond);
            }
            ExprKind::Index { base, index } => {
                self.expr(*base, Precedence::Postfix);
                self.word("[");
                self.expr(*index, Precedence::Comma);
                self.word("]");
            }
            ExprKind::Offsetof { ty, member } => {
                self.word("offsetof");
                self.word("(");
                let text = self.type_name(*ty);
                self.word(&text);
                self.word(",");
                self.expr(*member, Precedence::Assign);
                self.word(")");
            }
            ExprKind::Paren(inner) => {
                self.word("(");
                self.expr(*inner, Precedence::Comma);
                self.word(")");
            }
            ExprKind::SizeofExpr(inner) => {
                self.word("sizeof");
                self.word("(");
                self.expr(*inner, Precedence::Comma);
                self.word(")");
            }
            ExprKind::SizeofType(ty) => {
                self.word("sizeof");
                self.parenthesized_type(*ty);
            }
            ExprKind::VaArg { list, ty } => {
                self.word("va_arg");
                self.word("(");
                self.expr(*list, Precedence::Assign);
                self.word(",");
                let text = self.type_name(*ty);
                self.word(&text);
                self.word(")");
            }
            ExprKind::Name(text) | ExprKind::Number(text) | ExprKind::Literal(text) => {
                self.word(text)
            }
            ExprKind::String(pieces) => {
                for (i, piece) in pieces.iter().enumerate() {
                    if i > 0 {
                        self.raw(" ");
                    }
                    self.word(piece);
                }
            }
            ExprKind::LaunchOpen => self.word("<<<"),
            ExprKind::LaunchClose => self.word(">>>"),
        }

        if wrap {
            self.word(")");
        }
    }

    fn list(&mut self, items: &[NodeId]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.word(",");
            }
            self.expr(*item, Precedence::Assign);
        }
    }

    fn args(&mut self, args: &[NodeId]) {
        self.word("(");
        self.list(args);
        self.word(")");
    }

    fn parenthesized_type(&mut self, ty: NodeId) {
        self.word("(");
        let text = self.type_name(ty);
        self.word(&text);
        self.word(")");
    }

    pub(super) fn init(&mut self, id: NodeId) {
        let arena = self.arena;
        let init = arena.init(id);
        for prefix in &init.prefixes {
            self.prefix(*prefix);
        }
        if !init.prefixes.is_empty() {
            self.word("=");
        }
        match &init.value {
            InitValue::Expr(expr) => self.expr(*expr, Precedence::Assign),
            InitValue::Braced(items) => {
                self.word("{");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.word(",");
                    }
                    self.init(*item);
                }
                self.word("}");
            }
        }
    }

    pub(super) fn prefix(&mut self, id: NodeId) {
        let arena = self.arena;
        match &arena.prefix(id).designator {
            Designator::Field(name) => {
                self.word(".");
                self.word(name);
            }
            Designator::Index(index) => {
                self.word("[");
                self.expr(*index, Precedence::Comma);
                self.word("]");
            }
        }
    }

    /// Render an expression to a string at the given minimum precedence
    pub(super) fn expr_string(&self, id: NodeId, min: Precedence) -> String {
        let mut fragment = self.fragment();
        fragment.expr(id, min);
        fragment.finish()
    }

    pub(super) fn init_string(&self, id: NodeId) -> String {
        let mut fragment = self.fragment();
        fragment.init(id);
        fragment.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOp, UnaryOp};
    use crate::builder::SyntaxBuilder;
    use crate::printer::render;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_precedence_parens() {
        let mut b = SyntaxBuilder::new();
        let (a, x, c) = (b.name("a"), b.name("b"), b.name("c"));
        let mul = b.binary(BinaryOp::Mul, x, c);
        let sum = b.binary(BinaryOp::Add, a, mul);
        let sum2 = b.binary(BinaryOp::Add, a, x);
        let prod = b.binary(BinaryOp::Mul, sum2, c);
        let arena = b.finish();
        assert_eq!(render(&arena, sum), "a+b*c");
        assert_eq!(render(&arena, prod), "(a+b)*c");
    }

    #[test]
    fn test_left_associativity() {
        let mut b = SyntaxBuilder::new();
        let (a, x, c) = (b.name("a"), b.name("b"), b.name("c"));
        let left = b.binary(BinaryOp::Sub, a, x);
        let nested_left = b.binary(BinaryOp::Sub, left, c);
        let right = b.binary(BinaryOp::Sub, x, c);
        let nested_right = b.binary(BinaryOp::Sub, a, right);
        let arena = b.finish();
        assert_eq!(render(&arena, nested_left), "a-b-c");
        assert_eq!(render(&arena, nested_right), "a-(b-c)");
    }

    #[test]
    fn test_unary_spacing() {
        let mut b = SyntaxBuilder::new();
        let x = b.name("x");
        let neg = b.unary(UnaryOp::Minus, x);
        let negneg = b.unary(UnaryOp::Minus, neg);
        let a = b.name("a");
        let sub = b.binary(BinaryOp::Sub, a, neg);
        let inc = b.unary(UnaryOp::PostIncrement, x);
        let arena = b.finish();
        assert_eq!(render(&arena, negneg), "- -x");
        assert_eq!(render(&arena, sub), "a- -x");
        assert_eq!(render(&arena, inc), "x++");
    }

    #[test]
    fn test_assignment_chains_right() {
        let mut b = SyntaxBuilder::new();
        let (x, y, z) = (b.name("x"), b.name("y"), b.name("z"));
        let inner = b.assign(y, z);
        let outer = b.assign(x, inner);
        let add = b.binary(BinaryOp::AddAssign, x, z);
        let arena = b.finish();
        assert_eq!(render(&arena, outer), "x=y=z");
        assert_eq!(render(&arena, add), "x+=z");
    }

    #[test]
    fn test_postfix_forms() {
        let mut b = SyntaxBuilder::new();
        let p = b.name("p");
        let arrow = b.arrow(p, "next");
        let field = b.dot(arrow, "val");
        let i = b.name("i");
        let index = b.index(p, i);
        let f = b.name("f");
        let one = b.number("1");
        let call = b.call(f, vec![index, one]);
        let arena = b.finish();
        assert_eq!(render(&arena, field), "p->next.val");
        assert_eq!(render(&arena, call), "f(p[i],1)");
    }

    #[test]
    fn test_cond_and_comma() {
        let mut b = SyntaxBuilder::new();
        let (c, x, y) = (b.name("c"), b.name("x"), b.name("y"));
        let cond = b.cond(c, x, y);
        let comma = b.comma(vec![x, y]);
        let f = b.name("f");
        let call = b.call(f, vec![comma]);
        let arena = b.finish();
        assert_eq!(render(&arena, cond), "c?x:y");
        assert_eq!(render(&arena, call), "f((x,y))");
    }

    #[test]
    fn test_string_pieces() {
        let mut b = SyntaxBuilder::new();
        let s = b.string(&["\"ab\"", "\"cd\""]);
        let arena = b.finish();
        assert_eq!(render(&arena, s), "\"ab\" \"cd\"");
    }
}
