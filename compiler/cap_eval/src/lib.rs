//! Evaluator for the Cap template language.
//!
//! Runs a program through the whole pipeline: scanning (`cap_lexer`),
//! compiling (`cap_parse`) and walking the tree here. Literal text between
//! regions is written to stdout as it is reached; `{: ... :}` writes the
//! first value of its formula; `{@ ... @}` runs statements.
//!
//! # Embedding
//!
//! ```text
//! let config = EvalConfig::builder()
//!     .binding("name", ObjectRef::string("world"))
//!     .build();
//! let output = cap_eval::run("hello {: name :}", &config);
//! assert_eq!(output.stdout, "hello world");
//! ```
//!
//! For repeated runs or finer control, build a [`Context`] and an
//! [`Interpreter`] directly.

pub mod binding;
pub mod builtins;
pub mod config;
pub mod context;
pub mod environment;
pub mod errors;
pub mod importer;
pub mod interpreter;
pub mod methods;
pub mod object;
pub mod operators;
pub mod print_handler;

use std::rc::Rc;

pub use binding::BindingKind;
pub use cap_diagnostic::ErrorStack;
pub use config::{EvalConfig, EvalConfigBuilder, Opts, OutputMode};
pub use context::{AliasEntry, AliasTable, Context};
pub use errors::{ControlAction, EvalError, EvalErrorKind, EvalResult};
pub use importer::{FsLoader, ImportError, LoadedSource, MemoryLoader, SourceLoader};
pub use interpreter::{Interpreter, InterpreterBuilder, RunStatus};
pub use object::{Object, ObjectDict, ObjectKind, ObjectRef};
pub use print_handler::{PrintHandlerImpl, SharedPrintHandler};

/// Everything a run produced.
#[derive(Debug)]
pub struct RunOutput {
    pub status: RunStatus,
    /// Captured stdout. Empty with [`OutputMode::Stream`].
    pub stdout: String,
    /// Captured stderr. Empty with [`OutputMode::Stream`].
    pub stderr: String,
    pub errors: ErrorStack,
    /// Aliases recorded by `alias.set`.
    pub aliases: AliasTable,
}

impl RunOutput {
    /// Process exit code for this run: 0, the `exit` code, or 1 on error.
    pub fn exit_code(&self) -> i32 {
        match self.status {
            RunStatus::Completed => 0,
            RunStatus::Exited(code) => code,
            RunStatus::Failed => 1,
        }
    }

    pub fn first_error_message(&self) -> Option<&str> {
        self.errors.first_error_message()
    }
}

/// Run `source` with `config` in a fresh context.
pub fn run(source: &str, config: &EvalConfig) -> RunOutput {
    let context = Rc::new(Context::from_config(config));
    let mut interpreter = Interpreter::builder(Rc::clone(&context))
        .bindings(config.bindings.iter().map(|(name, value)| (name.as_str(), value.clone())))
        .build();
    let status = interpreter.execute(config.program_name.as_deref(), source);
    let aliases = context.aliases().clone();
    RunOutput {
        status,
        stdout: interpreter.stdout_text(),
        stderr: interpreter.stderr_text(),
        errors: interpreter.take_errors(),
        aliases,
    }
}

#[cfg(test)]
mod tests;
