//! `import "path" as name` and `from "path" import a, b as c`.
//!
//! The imported program runs to completion in a child interpreter over
//! the same [`Context`](crate::context::Context): it shares output, opts
//! and aliases, but starts with an empty global scope. Its top-level
//! bindings are what the importer sees.

use std::rc::Rc;

use cap_ir::{Ident, ImportName};
use tracing::debug;

use super::{Interpreter, RunStatus};
use crate::errors::{import_error, import_failed, ControlAction, EvalResult};
use crate::importer::ImportError;
use crate::object::{Module, Object, ObjectDict, ObjectRef};

impl Interpreter {
    pub(crate) fn exec_import(&mut self, path: &str, alias: &Ident) -> EvalResult<()> {
        let bindings = self.load_module(path)?;
        let module = Module {
            name: alias.name.clone(),
            bindings,
        };
        self.env
            .define(alias.name.as_str(), ObjectRef::new(Object::Module(module)));
        Ok(())
    }

    pub(crate) fn exec_from_import(&mut self, path: &str, names: &[ImportName]) -> EvalResult<()> {
        let bindings = self.load_module(path)?;
        for name in names {
            let Some(value) = bindings.get(&name.name.name) else {
                let err = import_error(ImportError::NotDefined {
                    name: name.name.name.clone(),
                    path: path.to_string(),
                });
                return Err(err.with_span(name.name.span).into());
            };
            self.env.define(name.bound_name(), value.clone());
        }
        Ok(())
    }

    /// Load and run `path`, returning its global bindings.
    #[tracing::instrument(level = "debug", skip(self))]
    fn load_module(&mut self, path: &str) -> EvalResult<ObjectDict> {
        let source = self.context.loader().load(path).map_err(import_error)?;
        if !self.context.begin_import(&source.key) {
            return Err(import_error(ImportError::Circular {
                path: path.to_string(),
            })
            .into());
        }
        debug!(key = %source.key, "running imported program");

        let mut child = Interpreter::builder(Rc::clone(&self.context)).build();
        let status = child.execute(Some(&source.name), &source.text);
        self.context.end_import();

        match status {
            RunStatus::Completed => {
                let bindings = child.env.global().borrow().bindings().clone();
                Ok(bindings)
            }
            RunStatus::Exited(code) => Err(ControlAction::Exit(code)),
            RunStatus::Failed => {
                self.errors.extend(child.take_errors());
                Err(import_failed(path).into())
            }
        }
    }
}
