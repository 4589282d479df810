//! Program-level tests: source text in, output and errors out.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests")]

mod binding_tests;
mod builtins_tests;
mod control_tests;
mod import_tests;
mod inheritance_tests;

use crate::{run, EvalConfig, RunOutput, RunStatus};

fn run_default(source: &str) -> RunOutput {
    run(source, &EvalConfig::default())
}

/// Stdout of a program that must complete.
fn run_ok(source: &str) -> String {
    let output = run_default(source);
    assert_eq!(
        output.status,
        RunStatus::Completed,
        "unexpected failure for {source:?}: {:?}",
        output.first_error_message()
    );
    output.stdout
}

/// First error message of a program that must fail.
fn run_err(source: &str) -> String {
    let output = run_default(source);
    assert_eq!(output.status, RunStatus::Failed, "expected {source:?} to fail");
    output
        .first_error_message()
        .expect("failed run has an error")
        .to_string()
}
