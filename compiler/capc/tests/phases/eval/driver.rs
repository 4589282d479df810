use cap_eval::RunStatus;
use pretty_assertions::assert_eq;

use crate::common::{run, run_with_args};

#[test]
fn trailing_arguments_become_opts() {
    let source = "{: opts.args(0) :} {: opts.args(1) :} {: opts.get(\"title\") :} {: opts.has(\"v\") :}";
    let output = run_with_args(source, &["--title", "Home", "out.html", "-v"]);
    assert_eq!(output.status, RunStatus::Completed);
    assert_eq!(output.stdout, "main.cap out.html Home true");
}

#[test]
fn failure_trace_names_program_file() {
    let output = run("ok\n{@\n x = nope @}");
    assert_eq!(output.status, RunStatus::Failed);
    assert_eq!(output.exit_code(), 1);
    let trace = output.errors.trace_to_string();
    assert!(trace.starts_with("Stack trace:\n"), "{trace}");
    assert!(trace.contains("main.cap: 3: not defined \"nope\""), "{trace}");
    assert!(trace.contains('^'), "{trace}");
}

#[test]
fn exit_code_is_reported() {
    let output = run("{@ exit(7) @}");
    assert_eq!(output.status, RunStatus::Exited(7));
    assert_eq!(output.exit_code(), 7);
}

#[test]
fn missing_import_is_an_error() {
    let output = run("{@ import \"definitely-missing.cap\" as m @}");
    assert_eq!(output.status, RunStatus::Failed);
    assert_eq!(
        output.first_error_message(),
        Some("\"definitely-missing.cap\" is not found")
    );
}

#[test]
fn stdout_and_stderr_are_captured_separately() {
    let output = run("a{@ eputs(\"warn\") @}b");
    assert_eq!(output.stdout, "ab");
    assert_eq!(output.stderr, "warn\n");
}
