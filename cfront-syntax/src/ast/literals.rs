//! Literal leaves
//!
//! Literals have no children. They appear where a text token is itself a
//! node: goto targets, label names, keyword markers.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Empty,
    Bool(bool),
    Integer(i64),
    Char(char),
    Real(f64),
    String(String),
    Symbol(String),
    Keyword(String),
}

impl Literal {
    pub fn describe(&self) -> &'static str {
        match self {
            Literal::Empty => "empty literal",
            Literal::Bool(_) => "boolean literal",
            Literal::Integer(_) => "integer literal",
            Literal::Char(_) => "character literal",
            Literal::Real(_) => "real literal",
            Literal::String(_) => "string literal",
            Literal::Symbol(_) => "symbol",
            Literal::Keyword(_) => "keyword",
        }
    }
}

/// C escape for a character inside a `quote`-delimited literal
pub(crate) fn escape_char(c: char, quote: char, out: &mut String) {
    match c {
        '\n' => out.push_str("\\n"),
        '\t' => out.push_str("\\t"),
        '\r' => out.push_str("\\r"),
        '\0' => out.push_str("\\0"),
        '\\' => out.push_str("\\\\"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
        c => out.push(c),
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Empty => Ok(()),
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Char(c) => {
                let mut text = String::from("'");
                escape_char(*c, '\'', &mut text);
                text.push('\'');
                f.write_str(&text)
            }
            Literal::Real(value) => write!(f, "{:?}", value),
            Literal::String(value) => {
                let mut text = String::from("\"");
                for c in value.chars() {
                    escape_char(c, '"', &mut text);
                }
                text.push('"');
                f.write_str(&text)
            }
            Literal::Symbol(text) | Literal::Keyword(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::Empty.to_string(), "");
        assert_eq!(Literal::Integer(-42).to_string(), "-42");
        assert_eq!(Literal::Real(2.0).to_string(), "2.0");
        assert_eq!(Literal::Char('\n').to_string(), "'\\n'");
        assert_eq!(Literal::Char('\'').to_string(), "'\\''");
        assert_eq!(Literal::String("say \"hi\"\n".to_string()).to_string(), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(Literal::Symbol("done".to_string()).to_string(), "done");
    }
}
