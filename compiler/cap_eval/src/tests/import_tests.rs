use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{run, EvalConfig, MemoryLoader, RunOutput, RunStatus};

fn run_with(loader: MemoryLoader, source: &str) -> RunOutput {
    let config = EvalConfig::builder()
        .program_name("main.cap")
        .loader(Rc::new(loader))
        .build();
    run(source, &config)
}

fn library() -> MemoryLoader {
    MemoryLoader::new().with_file(
        "lib.cap",
        "{@ x = 1\ndef double(n): return n * 2 end\nstruct P:\n v = 7\nend @}",
    )
}

#[test]
fn test_import_as_module() {
    let output = run_with(library(), "{@ import \"lib.cap\" as lib @}{: lib.x :}{: lib.double(4) :}{: lib.P().v :}");
    assert_eq!(output.status, RunStatus::Completed);
    assert_eq!(output.stdout, "187");
}

#[test]
fn test_from_import_names() {
    let output = run_with(
        library(),
        "{@ from \"lib.cap\" import (x, double as twice) @}{: twice(x) :}",
    );
    assert_eq!(output.status, RunStatus::Completed);
    assert_eq!(output.stdout, "2");
}

#[test]
fn test_from_import_missing_name() {
    let output = run_with(library(), "{@ from \"lib.cap\" import nope @}");
    assert_eq!(output.status, RunStatus::Failed);
    assert_eq!(
        output.first_error_message(),
        Some("\"nope\" is not defined in \"lib.cap\"")
    );
}

#[test]
fn test_import_not_found() {
    let output = run_with(MemoryLoader::new(), "{@ import \"gone.cap\" as g @}");
    assert_eq!(output.status, RunStatus::Failed);
    assert_eq!(output.first_error_message(), Some("\"gone.cap\" is not found"));
}

#[test]
fn test_circular_import() {
    let loader = MemoryLoader::new()
        .with_file("a.cap", "{@ import \"b.cap\" as b @}")
        .with_file("b.cap", "{@ import \"a.cap\" as a @}");
    let output = run_with(loader, "{@ import \"a.cap\" as a @}");
    assert_eq!(output.status, RunStatus::Failed);
    assert_eq!(output.first_error_message(), Some("circular import of \"a.cap\""));
}

#[test]
fn test_failing_import_keeps_its_trace() {
    let loader = MemoryLoader::new().with_file("bad.cap", "{@ y = nope @}");
    let output = run_with(loader, "{@ import \"bad.cap\" as bad @}");
    assert_eq!(output.status, RunStatus::Failed);
    assert_eq!(output.first_error_message(), Some("not defined \"nope\""));
    let trace = output.errors.trace_to_string();
    assert!(trace.contains("bad.cap: 1: not defined \"nope\""), "{trace}");
    assert!(trace.contains("failed to import \"bad.cap\""), "{trace}");
}

#[test]
fn test_imported_program_shares_output() {
    let loader = MemoryLoader::new().with_file("hello.cap", "hello {@ puts(1) @}");
    let output = run_with(loader, "{@ import \"hello.cap\" as h @}done");
    assert_eq!(output.status, RunStatus::Completed);
    assert_eq!(output.stdout, "hello 1\ndone");
}

#[test]
fn test_import_same_module_twice() {
    let output = run_with(
        library(),
        "{@ import \"lib.cap\" as a\nimport \"lib.cap\" as b\na.x = 5 @}{: b.x :}",
    );
    assert_eq!(output.status, RunStatus::Completed);
    assert_eq!(output.stdout, "1");
}
