//! Scanner and compiler phase tests.
//!
//! - `lexer` - token streams and scan errors
//! - `compiler` - compile errors surfaced through the pipeline

mod compiler;
mod lexer;
