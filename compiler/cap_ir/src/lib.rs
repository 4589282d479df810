//! Cap IR - shared data types for the Cap template engine.
//!
//! - [`Span`] / [`LineIndex`]: source locations
//! - [`Token`], [`TokenKind`], [`TokenList`]: scanner output
//! - [`ast`]: parser output, consumed by the evaluator

pub mod ast;
mod span;
mod token;

pub use ast::*;
pub use span::{LineIndex, Span};
pub use token::{Token, TokenKind, TokenList};
