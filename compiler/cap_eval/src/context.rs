//! State shared by every interpreter of one run.
//!
//! An `import` runs the imported file in a child interpreter with its own
//! scopes but the same [`Context`]: the same options, alias table, output
//! handlers, loader, and the stack of files being imported.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::config::{EvalConfig, Opts, OutputMode};
use crate::importer::SourceLoader;
use crate::print_handler::{buffer_handler, stream_handler, SharedPrintHandler, Stream};

/// One `alias.set(...)` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasEntry {
    pub name: String,
    pub command: String,
    pub description: Option<String>,
}

/// Aliases recorded by the `alias` module, in first-definition order.
/// The engine only records them; running commands is up to the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    pub fn new() -> Self {
        AliasTable::default()
    }

    /// Record an alias, replacing an earlier one with the same name.
    pub fn set(&mut self, name: &str, command: &str, description: Option<&str>) {
        let entry = AliasEntry {
            name: name.to_string(),
            command: command.to_string(),
            description: description.map(str::to_string),
        };
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AliasEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AliasEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub struct Context {
    opts: Opts,
    aliases: RefCell<AliasTable>,
    loader: Rc<dyn SourceLoader>,
    /// Keys of the files whose import is in progress, outermost first.
    importing: RefCell<Vec<String>>,
    stdout: SharedPrintHandler,
    stderr: SharedPrintHandler,
}

impl Context {
    pub fn new(
        opts: Opts,
        loader: Rc<dyn SourceLoader>,
        stdout: SharedPrintHandler,
        stderr: SharedPrintHandler,
    ) -> Self {
        Context {
            opts,
            aliases: RefCell::new(AliasTable::new()),
            loader,
            importing: RefCell::new(Vec::new()),
            stdout,
            stderr,
        }
    }

    pub fn from_config(config: &EvalConfig) -> Self {
        let (stdout, stderr) = match config.output {
            OutputMode::Capture => (buffer_handler(), buffer_handler()),
            OutputMode::Stream => (stream_handler(Stream::Stdout), stream_handler(Stream::Stderr)),
        };
        Context::new(config.opts.clone(), Rc::clone(&config.loader), stdout, stderr)
    }

    /// A fresh capturing context that loads imports the same way as `self`.
    /// Used by `dance`.
    pub fn detached(&self) -> Self {
        Context::new(
            Opts::new(),
            Rc::clone(&self.loader),
            buffer_handler(),
            buffer_handler(),
        )
    }

    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    pub fn aliases(&self) -> Ref<'_, AliasTable> {
        self.aliases.borrow()
    }

    pub fn set_alias(&self, name: &str, command: &str, description: Option<&str>) {
        self.aliases.borrow_mut().set(name, command, description);
    }

    pub fn loader(&self) -> &dyn SourceLoader {
        &*self.loader
    }

    pub fn stdout(&self) -> &SharedPrintHandler {
        &self.stdout
    }

    pub fn stderr(&self) -> &SharedPrintHandler {
        &self.stderr
    }

    /// Mark `key` as being imported. Returns `false` if it already is.
    pub(crate) fn begin_import(&self, key: &str) -> bool {
        let mut importing = self.importing.borrow_mut();
        if importing.iter().any(|k| k == key) {
            return false;
        }
        importing.push(key.to_string());
        true
    }

    pub(crate) fn end_import(&self) {
        self.importing.borrow_mut().pop();
    }

    /// Forget captured output and aliases so the context can be reused.
    pub fn reset(&self) {
        self.stdout.clear();
        self.stderr.clear();
        self.aliases.borrow_mut().clear();
        self.importing.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::importer::MemoryLoader;

    fn context() -> Context {
        Context::new(
            Opts::new(),
            Rc::new(MemoryLoader::new()),
            buffer_handler(),
            buffer_handler(),
        )
    }

    #[test]
    fn test_alias_set_replaces_in_place() {
        let mut table = AliasTable::new();
        table.set("a", "ls", None);
        table.set("b", "pwd", Some("print dir"));
        table.set("a", "ls -l", Some("long"));
        let names: Vec<&str> = table.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(table.get("a").map(|e| e.command.as_str()), Some("ls -l"));
        assert_eq!(
            table.get("b").and_then(|e| e.description.as_deref()),
            Some("print dir")
        );
    }

    #[test]
    fn test_import_stack_detects_cycles() {
        let ctx = context();
        assert!(ctx.begin_import("a"));
        assert!(ctx.begin_import("b"));
        assert!(!ctx.begin_import("a"));
        ctx.end_import();
        ctx.end_import();
        assert!(ctx.begin_import("a"));
    }

    #[test]
    fn test_reset_clears_output_and_aliases() {
        let ctx = context();
        ctx.stdout().print("x");
        ctx.set_alias("a", "ls", None);
        ctx.reset();
        assert_eq!(ctx.stdout().get_output(), "");
        assert!(ctx.aliases().is_empty());
    }
}
