//! Scanner for the Cap template engine.
//!
//! Source text is literal text with two kinds of embedded code regions:
//! `{@ ... @}` for statements and `{: ... :}` for inline expressions.
//! [`scan`] turns it into a [`TokenList`] in one left-to-right pass and
//! stops at the first lexical error.

mod cursor;
mod lex_error;
mod scanner;

use cap_ir::TokenList;
use tracing::debug;

pub use lex_error::{LexError, LexErrorKind};

use scanner::Scanner;

/// Scan `source` into a fresh token list.
///
/// Empty input yields an empty list.
pub fn scan(source: &str) -> Result<TokenList, LexError> {
    let mut tokens = TokenList::new();
    scan_into(source, &mut tokens)?;
    Ok(tokens)
}

/// Scan `source` into `tokens`, clearing whatever it held before.
///
/// On error `tokens` holds everything scanned before the failure.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn scan_into(source: &str, tokens: &mut TokenList) -> Result<(), LexError> {
    tokens.clear();
    let result = Scanner::new(source, tokens).run();
    match &result {
        Ok(()) => debug!(tokens = tokens.len(), "scanned"),
        Err(err) => debug!(error = %err, "scan failed"),
    }
    result
}

#[cfg(test)]
mod tests;
