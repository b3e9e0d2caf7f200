//! Declaration, statement, label and program rendering

use super::Printer;
use crate::ast::{Label, Precedence, StmtKind, Syntax};
use cfront_common::NodeId;

impl<'a> Printer<'a> {
    /// Declaration text without the trailing `;`. A function definition is
    /// followed by its body.
    pub(super) fn decl(&mut self, id: NodeId) {
        let arena = self.arena;
        let text = self.decl_string(id);
        self.word(&text);
        if let Some(body) = arena.decl(id).body {
            self.raw(" ");
            self.stmt(body);
        }
    }

    /// Declarator with storage class and initializer, body excluded
    pub(super) fn decl_string(&self, id: NodeId) -> String {
        let decl = self.arena.decl(id);
        let mut text = String::new();
        if let Some(storage) = decl.storage {
            text.push_str(&storage.to_string());
            text.push(' ');
        }
        let name = decl.name.clone().unwrap_or_default();
        match decl.ty {
            Some(ty) => text.push_str(&self.declarator(ty, name)),
            None => text.push_str(&name),
        }
        if let Some(init) = decl.init {
            text.push('=');
            text.push_str(&self.init_string(init));
        }
        text
    }

    pub(super) fn stmt(&mut self, id: NodeId) {
        let arena = self.arena;
        let node = arena.node(id);
        let stmt = arena.stmt(id);
        self.comments_before(&node.comments);
        for label in &stmt.labels {
            self.label(*label);
            self.newline();
        }

        match &stmt.kind {
            StmtKind::Empty => self.word(";"),
            StmtKind::Expr(expr) => {
                self.expr(*expr, Precedence::Comma);
                self.word(";");
            }
            StmtKind::Decl(decl) => {
                self.decl(*decl);
                if arena.decl(*decl).body.is_none() {
                    self.word(";");
                }
            }
            StmtKind::Block(stmts) if stmts.is_empty() => self.word("{}"),
            StmtKind::Block(stmts) => {
                self.word("{");
                self.indent += 1;
                for stmt in stmts {
                    self.newline();
                    self.stmt(*stmt);
                }
                self.indent -= 1;
                self.newline();
                self.word("}");
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.keyword_cond("if", *cond);
                let grouped = else_branch.is_some() && self.ends_in_open_if(*then_branch);
                if grouped {
                    self.braced(*then_branch);
                } else {
                    self.body(*then_branch);
                }
                if let Some(else_branch) = else_branch {
                    if grouped {
                        self.raw(" ");
                    } else {
                        self.continuation(*then_branch);
                    }
                    self.word("else");
                    if matches!(arena.stmt(*else_branch).kind, StmtKind::If { .. }) {
                        self.raw(" ");
                        self.stmt(*else_branch);
                    } else {
                        self.body(*else_branch);
                    }
                }
            }
            StmtKind::While { cond, body } => {
                self.keyword_cond("while", *cond);
                self.body(*body);
            }
            StmtKind::DoWhile { body, cond } => {
                self.word("do");
                self.body(*body);
                self.continuation(*body);
                self.keyword_cond("while", *cond);
                self.word(";");
            }
            StmtKind::For {
                pre,
                decl,
                cond,
                post,
                body,
            } => {
                self.word("for");
                self.raw(" (");
                if let Some(pre) = pre {
                    self.expr(*pre, Precedence::Comma);
                } else if let Some(decl) = decl {
                    self.decl(*decl);
                }
                self.word(";");
                if let Some(cond) = cond {
                    self.raw(" ");
                    self.expr(*cond, Precedence::Comma);
                }
                self.word(";");
                if let Some(post) = post {
                    self.raw(" ");
                    self.expr(*post, Precedence::Comma);
                }
                self.word(")");
                self.body(*body);
            }
            StmtKind::Switch { expr, body } => {
                self.keyword_cond("switch", *expr);
                self.body(*body);
            }
            StmtKind::Return(value) => {
                self.word("return");
                if let Some(value) = value {
                    self.raw(" ");
                    self.expr(*value, Precedence::Comma);
                }
                self.word(";");
            }
            StmtKind::Break => self.word("break;"),
            StmtKind::Continue => self.word("continue;"),
            StmtKind::Goto(target) => {
                self.word("goto");
                self.raw(" ");
                self.print(*target);
                self.word(";");
            }
        }

        self.comments_suffix(&node.comments);
    }

    /// `keyword (expr)`
    fn keyword_cond(&mut self, keyword: &str, cond: NodeId) {
        self.word(keyword);
        self.raw(" (");
        self.expr(cond, Precedence::Comma);
        self.word(")");
    }

    /// Controlled statement: a block stays on the keyword's line, anything
    /// else goes on its own indented line
    fn body(&mut self, id: NodeId) {
        if self.is_block(id) {
            self.raw(" ");
            self.stmt(id);
        } else {
            self.indent += 1;
            self.newline();
            self.stmt(id);
            self.indent -= 1;
        }
    }

    /// Non-block statement wrapped in braces, for an `else` that must not
    /// bind to a nested `if`
    fn braced(&mut self, id: NodeId) {
        self.raw(" {");
        self.indent += 1;
        self.newline();
        self.stmt(id);
        self.indent -= 1;
        self.newline();
        self.word("}");
    }

    /// Whether a following `else` would attach inside this statement
    fn ends_in_open_if(&self, id: NodeId) -> bool {
        match &self.arena.stmt(id).kind {
            StmtKind::If { else_branch: None, .. } => true,
            StmtKind::If {
                else_branch: Some(else_branch),
                ..
            } => self.ends_in_open_if(*else_branch),
            StmtKind::While { body, .. } | StmtKind::For { body, .. } | StmtKind::Switch { body, .. } => {
                self.ends_in_open_if(*body)
            }
            _ => false,
        }
    }

    /// Separator before `else` or the `while` of a do loop
    fn continuation(&mut self, previous: NodeId) {
        if self.is_block(previous) {
            self.raw(" ");
        } else {
            self.newline();
        }
    }

    fn is_block(&self, id: NodeId) -> bool {
        matches!(self.arena.stmt(id).kind, StmtKind::Block(_))
    }

    pub(super) fn label(&mut self, id: NodeId) {
        let arena = self.arena;
        match arena.label(id) {
            Label::Case(value) => {
                self.word("case");
                self.raw(" ");
                self.expr(*value, Precedence::Cond);
            }
            Label::Default => self.word("default"),
            Label::Named(name) => self.print(*name),
        }
        self.word(":");
    }

    pub(super) fn prog(&mut self, id: NodeId) {
        let arena = self.arena;
        for (i, decl) in arena.prog(id).decls.iter().enumerate() {
            if i > 0 {
                self.newline();
            }
            let node = arena.node(*decl);
            self.comments_before(&node.comments);
            match &node.kind {
                Syntax::Decl(d) => {
                    self.decl(*decl);
                    if d.body.is_none() {
                        self.word(";");
                    }
                }
                _ => self.print(*decl),
            }
            self.comments_suffix(&node.comments);
        }
    }
}
