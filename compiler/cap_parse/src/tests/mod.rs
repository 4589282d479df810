//! Parser tests.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

mod errors;

use crate::{compile, ParseOutput};
use cap_ir::{Elem, Program, Segment};

fn parse_source(source: &str) -> ParseOutput {
    let tokens = cap_lexer::scan(source).unwrap();
    compile(&tokens)
}

/// Parse a program that must compile cleanly.
fn parse_ok(source: &str) -> Program {
    let output = parse_source(source);
    assert!(
        !output.has_errors(),
        "unexpected error for {source:?}: {:?}",
        output.first_error_message()
    );
    output.program.expect("program")
}

/// The first error message of a program that must fail.
fn parse_err(source: &str) -> String {
    let output = parse_source(source);
    output
        .first_error_message()
        .unwrap_or_else(|| panic!("expected an error for {source:?}"))
        .to_string()
}

/// Elems of a program made of exactly one code block.
fn code_elems(source: &str) -> Vec<Elem> {
    let program = parse_ok(source);
    match program.blocks.segments.as_slice() {
        [Segment::Code(elems, _)] => elems.clone(),
        other => panic!("expected one code block, got {other:?}"),
    }
}
