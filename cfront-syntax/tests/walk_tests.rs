//! Tests for identity-aware traversal over syntax graphs

use cfront_common::NodeId;
use cfront_syntax::ast::{BinaryOp, Expr, ExprKind, StmtKind, Syntax};
use cfront_syntax::walk::{postorder_ids, preorder_ids, walk, walk_with, Visitor};
use cfront_syntax::{NodeRef, SyntaxArena, SyntaxBuilder};
use std::collections::HashSet;

#[test]
fn test_shared_subexpression_visited_once() {
    // x*x + f(x), with a single `x` node
    let mut b = SyntaxBuilder::new();
    let x = b.name("x");
    let square = b.binary(BinaryOp::Mul, x, x);
    let f = b.name("f");
    let call = b.call(f, vec![x]);
    let sum = b.binary(BinaryOp::Add, square, call);
    let arena = b.finish();

    let pre = preorder_ids(arena.node_ref(sum));
    let post = postorder_ids(arena.node_ref(sum));
    assert_eq!(pre, vec![sum, square, x, call, f]);
    assert_eq!(post, vec![x, square, f, call, sum]);

    let distinct: HashSet<NodeId> = pre.iter().copied().collect();
    assert_eq!(distinct.len(), pre.len());
}

#[test]
fn test_preorder_subtrees_are_contiguous() {
    // g(a+b, c)
    let mut b = SyntaxBuilder::new();
    let g = b.name("g");
    let a = b.name("a");
    let bb = b.name("b");
    let c = b.name("c");
    let add = b.binary(BinaryOp::Add, a, bb);
    let call = b.call(g, vec![add, c]);
    let arena = b.finish();

    assert_eq!(preorder_ids(arena.node_ref(call)), vec![call, g, add, a, bb, c]);
    assert_eq!(postorder_ids(arena.node_ref(call)), vec![g, a, bb, add, c, call]);
}

#[test]
fn test_enter_exit_nesting() {
    let mut b = SyntaxBuilder::new();
    let (p, q, r) = (b.name("p"), b.name("q"), b.name("r"));
    let and = b.binary(BinaryOp::LogicalAnd, p, q);
    let or = b.binary(BinaryOp::LogicalOr, and, r);
    let stmt = b.expr_stmt(or);
    let arena = b.finish();

    let mut open: Vec<NodeId> = Vec::new();
    let mut entered = 0;
    let mut exited = 0;
    let events = std::cell::RefCell::new(Vec::new());
    walk(
        arena.node_ref(stmt),
        |node: NodeRef| events.borrow_mut().push((true, node.id())),
        |node: NodeRef| events.borrow_mut().push((false, node.id())),
    );
    for (is_enter, id) in events.into_inner() {
        if is_enter {
            entered += 1;
            open.push(id);
        } else {
            exited += 1;
            assert_eq!(open.pop(), Some(id), "exit of {} does not match innermost enter", id);
        }
    }
    assert!(open.is_empty());
    assert_eq!(entered, 6);
    assert_eq!(exited, 6);
}

#[test]
fn test_child_cycle_terminates() {
    let mut arena = SyntaxArena::new();
    let first = arena.alloc(Syntax::Expr(Expr::new(ExprKind::Paren(NodeId(1)))));
    let second = arena.alloc(Syntax::Expr(Expr::new(ExprKind::Paren(first))));
    assert_eq!(second, NodeId(1));

    assert_eq!(preorder_ids(arena.node_ref(first)), vec![first, second]);
    assert_eq!(postorder_ids(arena.node_ref(second)), vec![first, second]);
}

#[test]
fn test_back_references_are_not_followed() {
    // int x = y; with y resolved back to the declaration of x
    let mut b = SyntaxBuilder::new();
    let int = b.named_type("int");
    let y = b.name("y");
    let init = b.init_expr(y);
    let decl = b.decl("x", int, Some(init));
    b.resolve_decl(y, decl);
    b.set_expr_type(y, int);
    let arena = b.finish();

    assert_eq!(preorder_ids(arena.node_ref(y)), vec![y]);
    assert_eq!(preorder_ids(arena.node_ref(decl)), vec![decl, int, init, y]);
}

#[test]
fn test_cond_children_order() {
    let mut b = SyntaxBuilder::new();
    let (c, t, e) = (b.name("c"), b.name("t"), b.name("e"));
    let cond = b.cond(c, t, e);
    let arena = b.finish();

    assert_eq!(arena.children(cond), vec![c, t, e]);
    assert_eq!(preorder_ids(arena.node_ref(cond)), vec![cond, c, t, e]);
}

#[test]
fn test_for_loop_slot_order() {
    let mut b = SyntaxBuilder::new();
    let int = b.named_type("int");
    let zero = b.number("0");
    let init = b.init_expr(zero);
    let i_decl = b.decl("i", int, Some(init));
    let i = b.name("i");
    let ten = b.number("10");
    let cond = b.binary(BinaryOp::Less, i, ten);
    let post = b.unary(cfront_syntax::UnaryOp::PostIncrement, i);
    let body = b.block(vec![]);
    let stmt = b.stmt(StmtKind::For {
        pre: None,
        decl: Some(i_decl),
        cond: Some(cond),
        post: Some(post),
        body,
    });
    let arena = b.finish();

    assert_eq!(arena.children(stmt), vec![cond, post, i_decl, body]);
    assert_eq!(
        preorder_ids(arena.node_ref(stmt)),
        vec![stmt, cond, i, ten, post, i_decl, int, init, zero, body]
    );
}

#[test]
fn test_visitor_sees_depth() {
    struct Depths {
        depth: usize,
        max: usize,
        names: Vec<String>,
    }

    impl<'a> Visitor<NodeRef<'a>> for Depths {
        fn enter(&mut self, node: NodeRef<'a>) {
            self.depth += 1;
            self.max = self.max.max(self.depth);
            if let Some(Expr { kind: ExprKind::Name(name), .. }) = node.as_expr() {
                self.names.push(name.clone());
            }
        }

        fn exit(&mut self, _node: NodeRef<'a>) {
            self.depth -= 1;
        }
    }

    let mut b = SyntaxBuilder::new();
    let p = b.name("p");
    let next = b.arrow(p, "next");
    let deref = b.unary(cfront_syntax::UnaryOp::Dereference, next);
    let arena = b.finish();

    let mut depths = Depths { depth: 0, max: 0, names: Vec::new() };
    walk_with(arena.node_ref(deref), &mut depths);
    assert_eq!(depths.depth, 0);
    assert_eq!(depths.max, 3);
    assert_eq!(depths.names, vec!["p"]);
}
