//! Lexer tokens as seen by the syntax tree.

use std::fmt;

use crate::Literal;

/// A token produced by the lexer.
///
/// Nodes keep the token they were built from for diagnostics only. The
/// tree never reads anything but [`Token::value`], and only while a node
/// is being constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub value: Literal,
    pub line: u32,
    pub col: u32,
}

impl Token {
    /// Creates a token with no source position.
    pub fn new(value: impl Into<Literal>) -> Self {
        Self::at(value, 0, 0)
    }

    /// Creates a token at a 1-based line and column.
    pub fn at(value: impl Into<Literal>, line: u32, col: u32) -> Self {
        Token {
            value: value.into(),
            line,
            col,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.col, self.value)
    }
}
