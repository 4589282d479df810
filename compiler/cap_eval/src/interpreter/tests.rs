#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests")]

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::{Interpreter, RunStatus};
use crate::config::EvalConfig;
use crate::context::Context;
use crate::object::ObjectRef;

fn interpreter() -> Interpreter {
    let context = Rc::new(Context::from_config(&EvalConfig::default()));
    Interpreter::builder(context).build()
}

#[test]
fn test_scope_guard_pops_on_drop() {
    let mut interp = interpreter();
    let global = interp.env.global().clone();
    let depth = interp.env.depth();
    {
        let mut scoped = interp.scoped(&global);
        scoped.env.define("inner", ObjectRef::int(1));
        assert_eq!(scoped.env.depth(), depth + 1);
        assert!(scoped.env.lookup("inner").is_some());
    }
    assert_eq!(interp.env.depth(), depth);
    assert!(interp.env.lookup("inner").is_none());
}

#[test]
fn test_with_scope_pops_on_error() {
    let mut interp = interpreter();
    let global = interp.env.global().clone();
    let depth = interp.env.depth();
    let result: Result<(), &str> = interp.with_scope(&global, |scoped| {
        scoped.env.define("x", ObjectRef::int(1));
        Err("stop")
    });
    assert_eq!(result, Err("stop"));
    assert_eq!(interp.env.depth(), depth);
}

#[test]
fn test_builder_defines_bindings() {
    let context = Rc::new(Context::from_config(&EvalConfig::default()));
    let mut interp = Interpreter::builder(context)
        .binding("a", ObjectRef::int(1))
        .bindings([("b", ObjectRef::string("two"))])
        .build();
    assert_eq!(interp.execute(None, "{: a :}{: b :}"), RunStatus::Completed);
    assert_eq!(interp.stdout_text(), "1two");
}

#[test]
fn test_globals_visible_after_run() {
    let mut interp = interpreter();
    assert_eq!(interp.execute(None, "{@ x = 40 + 2 @}"), RunStatus::Completed);
    let x = interp.global("x").unwrap();
    assert_eq!(x.as_number(), Some(42));
    assert!(interp.global("y").is_none());
}

#[test]
fn test_execute_statuses() {
    let mut interp = interpreter();
    assert_eq!(interp.execute(None, ""), RunStatus::Completed);
    assert_eq!(interp.execute(None, "{@ exit(4) @}"), RunStatus::Exited(4));
    assert_eq!(interp.execute(None, "{: nope :}"), RunStatus::Failed);
    assert_eq!(interp.execute(None, "{: 1 "), RunStatus::Failed);
    assert!(interp.errors().len() >= 2);
}

#[test]
fn test_execute_keeps_partial_output() {
    let mut interp = interpreter();
    assert_eq!(interp.execute(Some("page.cap"), "a{: 1 / 0 :}b"), RunStatus::Failed);
    assert_eq!(interp.stdout_text(), "a");
    let trace = interp.errors().trace_to_string();
    assert!(trace.contains("page.cap: 1: zero division error"), "{trace}");
}

#[test]
fn test_reset_clears_state() {
    let mut interp = interpreter();
    interp.execute(None, "{@ x = 1\nalias.set(\"a\", \"b\") @}out{: nope :}");
    assert!(interp.errors().has_errors());
    assert_eq!(interp.context().aliases().len(), 1);

    interp.reset();
    assert!(interp.errors().is_empty());
    assert!(interp.global("x").is_none());
    assert_eq!(interp.stdout_text(), "");
    assert!(interp.context().aliases().is_empty());

    assert_eq!(interp.execute(None, "{: 2 :}"), RunStatus::Completed);
    assert_eq!(interp.stdout_text(), "2");
}
