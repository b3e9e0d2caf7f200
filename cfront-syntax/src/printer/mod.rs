//! Source renderer
//!
//! Reconstructs C text from any node of a syntax graph. Expressions are
//! parenthesized only where operator precedence requires it; explicit
//! `Paren` nodes are kept. Output is compact: a space is emitted only where
//! two tokens would otherwise fuse (`a- -b`, `x&& &y`, `int x`), plus the
//! fixed space after a cast.
//!
//! Rendering never mutates the graph and does not depend on derived fields,
//! so it works on graphs that were never type-checked.

mod expressions;
mod statements;
mod types;

use crate::ast::{Comments, Precedence, Syntax, SyntaxArena};
use cfront_common::NodeId;

/// Render `id` without comments
pub fn render(arena: &SyntaxArena, id: NodeId) -> String {
    let mut printer = Printer::new(arena);
    printer.print(id);
    printer.finish()
}

/// Stateful renderer over one arena
#[derive(Debug, Clone)]
pub struct Printer<'a> {
    arena: &'a SyntaxArena,
    buf: String,
    indent: usize,
    show_comments: bool,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a SyntaxArena) -> Self {
        Self {
            arena,
            buf: String::new(),
            indent: 0,
            show_comments: false,
        }
    }

    /// Emit attached comments as well
    pub fn with_comments(mut self) -> Self {
        self.show_comments = true;
        self
    }

    /// Append the rendering of `id`
    pub fn print(&mut self, id: NodeId) {
        let arena = self.arena;
        match &arena.node(id).kind {
            Syntax::Literal(literal) => self.word(&literal.to_string()),
            Syntax::Prefix(_) => self.prefix(id),
            Syntax::Init(_) => self.init(id),
            Syntax::Expr(_) => self.expr(id, Precedence::Comma),
            Syntax::Type(_) => {
                let text = self.type_name(id);
                self.word(&text);
            }
            Syntax::Decl(_) => self.decl(id),
            Syntax::Stmt(_) => self.stmt(id),
            Syntax::Label(_) => self.label(id),
            Syntax::Prog(_) => self.prog(id),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn finish(self) -> String {
        self.buf
    }

    /// Fresh printer sharing this one's settings, for rendering a fragment
    /// to a string
    fn fragment(&self) -> Printer<'a> {
        Printer {
            arena: self.arena,
            buf: String::new(),
            indent: self.indent,
            show_comments: self.show_comments,
        }
    }

    /// Append a token, separating it from the previous one if they would
    /// otherwise lex as a single token
    fn word(&mut self, text: &str) {
        if let (Some(prev), Some(next)) = (self.buf.chars().next_back(), text.chars().next()) {
            if fuses(prev, next) {
                self.buf.push(' ');
            }
        }
        self.buf.push_str(text);
    }

    fn raw(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    fn newline(&mut self) {
        self.buf.push('\n');
        for _ in 0..self.indent {
            self.buf.push('\t');
        }
    }

    fn comments_before(&mut self, comments: &Comments) {
        if !self.show_comments {
            return;
        }
        for comment in &comments.before {
            self.raw(comment);
            self.newline();
        }
    }

    fn comments_suffix(&mut self, comments: &Comments) {
        if !self.show_comments {
            return;
        }
        for comment in &comments.suffix {
            self.raw(" ");
            self.raw(comment);
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether `prev` followed directly by `next` would merge two tokens
pub(crate) fn fuses(prev: char, next: char) -> bool {
    if is_ident_char(prev) && is_ident_char(next) {
        return true;
    }
    matches!(
        (prev, next),
        ('+', '+')
            | ('-', '-')
            | ('-', '>')
            | ('&', '&')
            | ('|', '|')
            | ('<', '<')
            | ('>', '>')
            | ('/', '*')
            | ('/', '/')
            | ('+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '<' | '>' | '=' | '!', '=')
    )
}
