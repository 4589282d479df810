//! Run configuration.
//!
//! [`EvalConfig`] carries everything a host decides before running a
//! program: the name used in error traces, command-line options for the
//! `opts` module, initial bindings, where output goes, and how imports are
//! loaded.

use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::importer::{FsLoader, SourceLoader};
use crate::object::ObjectRef;

/// Command-line options as seen by the `opts` module.
///
/// `args[0]` is the program file, followed by the positional arguments.
/// Flags given without a value map to the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Opts {
    flags: FxHashMap<String, String>,
    args: Vec<String>,
}

impl Opts {
    pub fn new() -> Self {
        Opts::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.flags.get(name).map(String::as_str)
    }

    pub fn has(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Positional argument `index`; `None` when negative or out of range.
    pub fn arg(&self, index: i64) -> Option<&str> {
        let index = usize::try_from(index).ok()?;
        self.args.get(index).map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn set_flag(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.flags.insert(name.into(), value.into());
    }

    pub fn push_arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }
}

/// Where `puts`, `eputs` and template text go.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Buffer both streams; read them from the run output.
    #[default]
    Capture,
    /// Write straight to the process stdout and stderr.
    Stream,
}

pub struct EvalConfig {
    pub program_name: Option<String>,
    pub opts: Opts,
    pub bindings: Vec<(String, ObjectRef)>,
    pub output: OutputMode,
    pub loader: Rc<dyn SourceLoader>,
}

impl EvalConfig {
    pub fn builder() -> EvalConfigBuilder {
        EvalConfigBuilder::new()
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfigBuilder::new().build()
    }
}

impl fmt::Debug for EvalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalConfig")
            .field("program_name", &self.program_name)
            .field("opts", &self.opts)
            .field("bindings", &self.bindings)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// Builder for [`EvalConfig`].
pub struct EvalConfigBuilder {
    program_name: Option<String>,
    opts: Opts,
    bindings: Vec<(String, ObjectRef)>,
    output: OutputMode,
    loader: Option<Rc<dyn SourceLoader>>,
    import_root: Option<PathBuf>,
}

impl EvalConfigBuilder {
    pub fn new() -> Self {
        EvalConfigBuilder {
            program_name: None,
            opts: Opts::new(),
            bindings: Vec::new(),
            output: OutputMode::default(),
            loader: None,
            import_root: None,
        }
    }

    /// Name of the program file, shown in error traces.
    #[must_use]
    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    /// Directory imports are resolved against. Ignored when a custom
    /// loader is set.
    #[must_use]
    pub fn import_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.import_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn loader(mut self, loader: Rc<dyn SourceLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    #[must_use]
    pub fn opts(mut self, opts: Opts) -> Self {
        self.opts = opts;
        self
    }

    /// Define `name` in the global scope before the program runs.
    #[must_use]
    pub fn binding(mut self, name: impl Into<String>, value: ObjectRef) -> Self {
        self.bindings.push((name.into(), value));
        self
    }

    #[must_use]
    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn build(self) -> EvalConfig {
        let loader = match (self.loader, self.import_root) {
            (Some(loader), _) => loader,
            (None, Some(root)) => Rc::new(FsLoader::new(root)),
            (None, None) => Rc::new(FsLoader::default()),
        };
        EvalConfig {
            program_name: self.program_name,
            opts: self.opts,
            bindings: self.bindings,
            output: self.output,
            loader,
        }
    }
}

impl Default for EvalConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_opts_lookup() {
        let mut opts = Opts::new();
        opts.push_arg("main.cap");
        opts.push_arg("extra");
        opts.set_flag("name", "cap");
        opts.set_flag("v", "");
        assert_eq!(opts.get("name"), Some("cap"));
        assert_eq!(opts.get("v"), Some(""));
        assert!(opts.has("v"));
        assert!(!opts.has("missing"));
        assert_eq!(opts.arg(0), Some("main.cap"));
        assert_eq!(opts.arg(1), Some("extra"));
        assert_eq!(opts.arg(2), None);
        assert_eq!(opts.arg(-1), None);
    }

    #[test]
    fn test_builder_defaults() {
        let config = EvalConfig::builder().build();
        assert_eq!(config.program_name, None);
        assert_eq!(config.output, OutputMode::Capture);
        assert!(config.bindings.is_empty());
    }

    #[test]
    fn test_builder_setters() {
        let config = EvalConfig::builder()
            .program_name("main.cap")
            .output(OutputMode::Stream)
            .binding("x", ObjectRef::int(1))
            .build();
        assert_eq!(config.program_name.as_deref(), Some("main.cap"));
        assert_eq!(config.output, OutputMode::Stream);
        assert_eq!(config.bindings.len(), 1);
    }
}
