//! Debug commands: `lex` and `parse` for inspecting the front end.

use std::io::{self, Write};
use std::rc::Rc;

use cap_diagnostic::{push_error, ErrorStack, ProgramLocation, SourceFile};

use super::read_file;
use crate::CliError;

/// Scan a file and print its token stream.
pub fn lex_file(path: &str) -> Result<i32, CliError> {
    let text = read_file(path)?;
    let source = Rc::new(SourceFile::new(Some(path.to_string()), text));

    let tokens = match cap_lexer::scan(source.text()) {
        Ok(tokens) => tokens,
        Err(err) => {
            let mut errors = ErrorStack::new();
            push_error!(errors, err.message(), ProgramLocation::at(&source, err.span));
            errors.trace(&mut io::stderr().lock())?;
            return Ok(1);
        }
    };

    let mut out = io::stdout().lock();
    writeln!(out, "Tokens for '{path}' ({} tokens):", tokens.len())?;
    for token in &tokens {
        writeln!(out, "  {:?} @ {}", token.kind, token.span)?;
    }
    Ok(0)
}

/// Scan and compile a file and print its AST.
pub fn parse_file(path: &str) -> Result<i32, CliError> {
    let text = read_file(path)?;
    let source = Rc::new(SourceFile::new(Some(path.to_string()), text));

    let mut errors = ErrorStack::new();
    let tokens = match cap_lexer::scan(source.text()) {
        Ok(tokens) => tokens,
        Err(err) => {
            push_error!(errors, err.message(), ProgramLocation::at(&source, err.span));
            errors.trace(&mut io::stderr().lock())?;
            return Ok(1);
        }
    };

    let output = cap_parse::compile(&tokens);
    if output.has_errors() {
        for err in output.errors {
            errors.push(err.into_record(Some(&source)));
        }
        errors.trace(&mut io::stderr().lock())?;
        return Ok(1);
    }

    let mut out = io::stdout().lock();
    match &output.program {
        Some(program) => writeln!(out, "{program:#?}")?,
        None => writeln!(out, "(empty program)")?,
    }
    Ok(0)
}
