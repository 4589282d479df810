//! Command implementations for the `cap` binary.
//!
//! Each command returns the process exit code, or a [`CliError`] when the
//! driver itself fails (unreadable file, closed output stream).

mod debug;
mod run;

pub use debug::{lex_file, parse_file};
pub use run::{run_file, run_source};

use std::io;

use crate::CliError;

pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| {
        let path = path.to_string();
        match e.kind() {
            io::ErrorKind::NotFound => CliError::NotFound { path },
            io::ErrorKind::PermissionDenied => CliError::PermissionDenied { path },
            io::ErrorKind::InvalidData => CliError::InvalidUtf8 { path },
            _ => CliError::Read { path, source: e },
        }
    })
}
