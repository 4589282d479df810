//! Recursive descent compiler for Cap.
//!
//! Turns a [`TokenList`] into a [`Program`]. Every grammar rule is a parser
//! method returning `Result<Option<T>, ParseError>`:
//!
//! - `Ok(Some(node))`: the construct was parsed
//! - `Ok(None)`: the construct is not here; the cursor is back where it was
//! - `Err(error)`: the construct started but is malformed; parsing stops
//!
//! There is no error recovery. The first syntax error ends the parse, and
//! the segments completed before it are kept as a partial program.

/// `Err(ParseError)` at the current token, tagged with the calling rule.
macro_rules! syntax_error {
    ($parser:expr, $message:expr) => {
        Err($crate::ParseError::new(
            file!(),
            line!(),
            cap_diagnostic::function_name!(),
            $message,
            $parser.cursor.current_span(),
        ))
    };
}

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::ParseError;

use cap_ir::{Blocks, Program, TokenList};
use tracing::debug;

/// Result of one grammar rule. See the crate docs.
type ParseResult<T> = Result<Option<T>, ParseError>;

/// Output of [`compile`].
#[derive(Debug)]
pub struct ParseOutput {
    /// `None` for input without any segment. After an error this holds the
    /// segments parsed before it, if any.
    pub program: Option<Program>,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn first_error_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    /// Inside a `def` body, where `block` and `inject` are allowed.
    in_def: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            in_def: false,
        }
    }
}

/// Compile a token list into a program.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn compile(tokens: &TokenList) -> ParseOutput {
    let mut parser = Parser::new(tokens);
    let mut segments = Vec::new();
    let result = parser.parse_program(&mut segments);
    debug!(segments = segments.len(), ok = result.is_ok(), "compiled");

    let program = (!segments.is_empty()).then(|| Program {
        blocks: Blocks { segments },
    });
    ParseOutput {
        program,
        errors: result.err().into_iter().collect(),
    }
}

#[cfg(test)]
mod tests;
