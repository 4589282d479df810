//! Scanner errors.
//!
//! Every error renders to a fixed message; the span points at the offending
//! character or at the region that was left open.

use std::fmt;

use cap_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// `{@`, `{:` or a block comment still open at end of input.
    UnclosedRegion,
    /// `@` inside a statement region not followed by `}`.
    SingleAt,
    UnterminatedString,
    UnsupportedChar(char),
    /// Integer literal that does not fit in 64 bits.
    IntegerTooLarge,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnclosedRegion => f.write_str("not closed by block"),
            LexErrorKind::SingleAt => f.write_str("invalid syntax. single '@' is not supported"),
            LexErrorKind::UnterminatedString => f.write_str("not closed by double quote"),
            LexErrorKind::UnsupportedChar(c) => {
                write!(f, "syntax error. unsupported character \"{c}\"")
            }
            LexErrorKind::IntegerTooLarge => f.write_str("integer literal is too large"),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for LexError {}
