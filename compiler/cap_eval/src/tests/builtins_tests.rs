use pretty_assertions::assert_eq;

use super::{run_default, run_err, run_ok};
use crate::{run, EvalConfig, ObjectRef, Opts, RunStatus};

#[test]
fn test_puts_returns_argument_count() {
    assert_eq!(run_ok("{@ n = puts(1, \"a\", nil) @}{: n :}"), "1 a nil\n3");
    assert_eq!(run_ok("{@ puts() @}"), "\n");
}

#[test]
fn test_eputs_writes_stderr() {
    let output = run_default("{@ eputs(\"oops\") @}ok");
    assert_eq!(output.status, RunStatus::Completed);
    assert_eq!(output.stdout, "ok");
    assert_eq!(output.stderr, "oops\n");
}

#[test]
fn test_len() {
    assert_eq!(run_ok("{: len(\"héllo\") :}"), "5");
    assert_eq!(run_ok("{: len([1, 2]) :}"), "2");
    assert_eq!(run_ok("{: len({\"a\": 1}) :}"), "1");
    assert_eq!(run_err("{: len(1) :}"), "unsupported object");
    assert_eq!(run_err("{: len() :}"), "len function need one argument");
}

#[test]
fn test_copy_and_deepcopy() {
    let source = "{@ a = [[1]]
b = copy(a)
c = deepcopy(a)
a[0].push(2)
a.push(3) @}{: len(a) :}{: len(b) :}{: len(b[0]) :}{: len(c[0]) :}";
    assert_eq!(run_ok(source), "2121");
}

#[test]
fn test_assert() {
    assert_eq!(run_ok("{@ assert(1 == 1) @}ok"), "ok");
    assert_eq!(run_err("{@ assert(0) @}"), "assertion error");
    assert_eq!(run_err("{@ assert() @}"), "invalid arguments length for assert");
}

#[test]
fn test_extract_defines_entries() {
    let source = "{@ extract({\"x\": 1, \"y\": 2}) @}{: x + y :}";
    assert_eq!(run_ok(source), "3");
    assert_eq!(run_err("{@ extract(1) @}"), "unsupported object");
}

#[test]
fn test_setattr_and_getattr() {
    let source = "{@ struct S:\n a = 1\nend
s = S()
setattr(s, \"b\", 5) @}{: getattr(s, \"a\") :}{: s.b :}{: getattr(s, \"zzz\") :}";
    assert_eq!(run_ok(source), "15nil");
    assert_eq!(run_err("{@ setattr(1, \"a\", 2) @}"), "unsupported object type");
}

#[test]
fn test_ord_and_chr() {
    assert_eq!(run_ok("{: ord(\"a\") :}"), "97");
    assert_eq!(run_ok("{: chr(98) :}"), "b");
    assert_eq!(run_err("{: ord(\"\") :}"), "empty strings");
    assert_eq!(run_err("{: chr(-1) :}"), "invalid code point");
}

#[test]
fn test_id_tracks_identity() {
    assert_eq!(run_ok("{@ a = [] \n b = a @}{: id(a) == id(b) :}"), "true");
    assert_eq!(run_ok("{@ a = [] \n b = [] @}{: id(a) == id(b) :}"), "false");
}

#[test]
fn test_id_of_temporaries_differs() {
    assert_eq!(run_ok("{: id([1]) == id([2]) :}{: id(1) == id(2) :}"), "falsefalse");
}

#[test]
fn test_dance_runs_nested_program() {
    let source = "{@ r = dance(\"{: x :}{@ eputs(1) @}\", {\"x\": \"hi\"}) @}{: r[0] :}|{: r[1] :}";
    assert_eq!(run_ok(source), "hi|1\n");

    let source = "{@ r = dance(\"plain\") @}{: r[0] :}|{: r[1] :}";
    assert_eq!(run_ok(source), "plain|nil");

    let source = "{@ r = dance(\"{: nope :}\") @}{: r[0] :}|{: r[1] :}";
    assert_eq!(run_ok(source), "nil|not defined \"nope\"");
}

#[test]
fn test_dance_output_stays_separate() {
    let output = run_default("{@ r = dance(\"{@ puts(1) @}\") @}done");
    assert_eq!(output.stdout, "done");
}

#[test]
fn test_exit_stops_with_code() {
    let output = run_default("before{@ exit(3) @}after");
    assert_eq!(output.status, RunStatus::Exited(3));
    assert_eq!(output.exit_code(), 3);
    assert_eq!(output.stdout, "before");
    assert!(output.errors.is_empty());
}

#[test]
fn test_exit_from_function() {
    let output = run_default("{@ def f(): exit(0) end\nf() @}after");
    assert_eq!(output.status, RunStatus::Exited(0));
    assert_eq!(output.stdout, "");
}

#[test]
fn test_die_writes_stderr_and_exits() {
    let output = run_default("{@ die(\"bad\", 1) @}after");
    assert_eq!(output.status, RunStatus::Exited(1));
    assert_eq!(output.stderr, "bad 1\n");
    assert_eq!(output.stdout, "");
}

#[test]
fn test_builtins_can_be_shadowed() {
    assert_eq!(run_ok("{@ len = 3 @}{: len :}"), "3");
}

#[test]
fn test_opts_module() {
    let mut opts = Opts::new();
    opts.push_arg("main.cap");
    opts.push_arg("first");
    opts.set_flag("name", "cap");
    opts.set_flag("verbose", "");
    let config = EvalConfig::builder().opts(opts).build();

    let source = "{: opts.get(\"name\") :} {: opts.has(\"verbose\") :} {: opts.has(\"quiet\") :} \
{: opts.get(\"quiet\") :} {: opts.args(0) :} {: opts.args(1) :} {: opts.args(2) :}";
    let output = run(source, &config);
    assert_eq!(output.status, RunStatus::Completed);
    assert_eq!(output.stdout, "cap true false nil main.cap first nil");
}

#[test]
fn test_opts_errors() {
    assert_eq!(run_err("{: opts.get(1) :}"), "can't invoke opts.get. argument is not string");
    assert_eq!(run_err("{: opts.has() :}"), "can't invoke opts.has. need one argument");
    assert_eq!(run_err("{: opts.args(\"0\") :}"), "invalid argument type. argument is not int");
}

#[test]
fn test_alias_module_records_entries() {
    let source = "{@ alias.set(\"ll\", \"ls -l\")\nalias.set(\"gs\", \"git status\", \"status\") @}";
    let output = run_default(source);
    assert_eq!(output.status, RunStatus::Completed);
    assert_eq!(output.aliases.len(), 2);

    let ll = output.aliases.get("ll").unwrap();
    assert_eq!(ll.command, "ls -l");
    assert_eq!(ll.description, None);
    let gs = output.aliases.get("gs").unwrap();
    assert_eq!(gs.description.as_deref(), Some("status"));

    assert_eq!(run_err("{@ alias.set(\"a\") @}"), "can't invoke alias.set. too few arguments");
    assert_eq!(run_err("{@ alias.set(\"a\", 1) @}"), "can't invoke alias.set. value is not string");
}

#[test]
fn test_host_bindings() {
    let config = EvalConfig::builder()
        .binding("name", ObjectRef::string("world"))
        .build();
    let output = run("hello {: name :}", &config);
    assert_eq!(output.stdout, "hello world");
}
