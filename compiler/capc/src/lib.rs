//! Cap command-line driver.
//!
//! The binary (`cap`) is a thin dispatcher over [`commands`]. Everything a
//! command needs beyond the engine lives here: reading the program file,
//! turning trailing arguments into [`Opts`](cap_eval::Opts), and installing
//! a tracing subscriber when `RUST_LOG` is set.

pub mod commands;
pub mod opts;
mod tracing_setup;

pub use opts::parse_opts;
pub use tracing_setup::init_tracing;

/// Failures of the driver itself, as opposed to errors in the program it
/// runs.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },
    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },
    #[error("error reading '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
