//! Parse error type.

use std::fmt;
use std::rc::Rc;

use cap_diagnostic::{ErrorRecord, ProgramLocation, SourceFile};
use cap_ir::Span;

/// A syntax error with the parser rule that raised it.
///
/// Built with the crate's `syntax_error!` macro, which fills in the
/// engine-internal location the same way `push_error!` does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl ParseError {
    pub fn new(
        file: &'static str,
        line: u32,
        function: &'static str,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        ParseError {
            message: message.into(),
            span,
            file,
            line,
            function,
        }
    }

    /// Convert into an error-stack record, attaching the program location
    /// when the source is known.
    pub fn into_record(self, source: Option<&Rc<SourceFile>>) -> ErrorRecord {
        let location = source.map(|source| ProgramLocation::at(source, self.span));
        ErrorRecord::new(self.file, self.line, self.function, self.message).with_location(location)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}
