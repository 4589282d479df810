//! Shared test utilities for phase tests.

use cap_eval::{RunOutput, RunStatus};
use cap_ir::TokenKind;

/// Token kinds of `source`, panicking on a scan error.
pub fn lex(source: &str) -> Vec<TokenKind> {
    cap_lexer::scan(source).expect("scan failed").kinds()
}

/// Message of the scan error for `source`.
pub fn lex_error(source: &str) -> String {
    cap_lexer::scan(source).unwrap_err().message()
}

/// First compile error for `source`, which must scan cleanly.
pub fn compile_error(source: &str) -> Option<String> {
    let tokens = cap_lexer::scan(source).expect("scan failed");
    cap_parse::compile(&tokens)
        .first_error_message()
        .map(str::to_string)
}

/// Run `source` the way `cap run main.cap args...` would.
pub fn run_with_args(source: &str, args: &[&str]) -> RunOutput {
    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
    capc::commands::run_source("main.cap", source, &args)
}

pub fn run(source: &str) -> RunOutput {
    run_with_args(source, &[])
}

/// Stdout of a program that must complete.
pub fn stdout_of(source: &str) -> String {
    let output = run(source);
    assert_eq!(
        output.status,
        RunStatus::Completed,
        "{source:?} failed: {:?}",
        output.first_error_message()
    );
    output.stdout
}

/// First error message of a program that must fail.
pub fn error_of(source: &str) -> String {
    let output = run(source);
    assert_eq!(output.status, RunStatus::Failed, "{source:?} should fail");
    output.first_error_message().unwrap().to_string()
}
