//! The `run` command: execute a program file.

use std::io::{self, Write};
use std::path::Path;

use cap_eval::{EvalConfig, RunOutput, RunStatus};
use tracing::debug;

use super::read_file;
use crate::{parse_opts, CliError};

/// Run the program at `path`. `args` are the arguments after the file and
/// become the program's `opts`.
///
/// Captured stdout is printed first, then stderr, then the error trace if
/// the program failed.
pub fn run_file(path: &str, args: &[String]) -> Result<i32, CliError> {
    let text = read_file(path)?;
    let output = run_source(path, &text, args);

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;

    let mut stderr = io::stderr().lock();
    stderr.write_all(output.stderr.as_bytes())?;
    if output.status == RunStatus::Failed {
        output.errors.trace(&mut stderr)?;
    }
    stderr.flush()?;

    Ok(output.exit_code())
}

/// Run `text` as if it were the file at `path`: imports resolve against the
/// file's directory and errors name it.
pub fn run_source(path: &str, text: &str, args: &[String]) -> RunOutput {
    let root = Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let config = EvalConfig::builder()
        .program_name(path)
        .import_root(root)
        .opts(parse_opts(path, args))
        .build();

    let output = cap_eval::run(text, &config);
    debug!(status = ?output.status, aliases = output.aliases.len(), "run finished");
    output
}
