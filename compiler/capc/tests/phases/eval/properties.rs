use pretty_assertions::assert_eq;

use crate::common::{error_of, stdout_of};

#[test]
fn scalar_assignment_copies() {
    assert_eq!(
        stdout_of("{@ a = 1\nb = a @}{: id(a) != id(b) :}{: a == b :}"),
        "truetrue"
    );
    assert_eq!(
        stdout_of("{@ a = \"s\"\nb = a @}{: id(a) != id(b) :}{: a == b :}"),
        "truetrue"
    );
}

#[test]
fn chained_assignment_shares() {
    assert_eq!(stdout_of("{@ a = b = 1 @}{: id(a) == id(b) :}"), "true");
}

#[test]
fn containers_keep_identity() {
    let source = "{@ def pass(x): return x end
struct S:\n v = 1\nend
a = []
d = {}
s = S()
holder = [a, d, s] @}\
{: id(pass(a)) == id(a) :}{: id(pass(d)) == id(d) :}{: id(pass(s)) == id(s) :}\
{: id(holder[0]) == id(a) :}{: id(holder[1]) == id(d) :}{: id(holder[2]) == id(s) :}";
    assert_eq!(stdout_of(source), "truetruetruetruetruetrue");
}

#[test]
fn string_case_round_trips() {
    assert_eq!(
        stdout_of("{: \"abc\".upper().lower() == \"abc\" :}{: \"abc_def\".camel() == \"abcDef\" :}{: \"abcDef\".snake() == \"abc_def\" :}"),
        "truetruetrue"
    );
}

#[test]
fn division_by_zero_or_false() {
    assert_eq!(stdout_of("{: 1 / 2 :}"), "0");
    assert_eq!(error_of("{@ x = 1\nx /= 0 @}"), "zero division error");
    assert_eq!(error_of("{@ x = 1\nx /= false @}"), "zero division error");
}

#[test]
fn string_repeat() {
    assert_eq!(stdout_of("{: \"ab\" * 3 == \"ababab\" :}"), "true");
    assert_eq!(error_of("{: \"ab\" * (-1) :}"), "can't mul string by negative value");
}

#[test]
fn counting_loop() {
    let source = "{@ a = 0\nfor i=0; i!=4; i+=1:\n a += 1\nend @}{: a :}";
    assert_eq!(stdout_of(source), "4");
}

#[test]
fn super_runs_parent_after_child() {
    let source = "{@ def f1(): puts(1) end\n def f2() extends f1: puts(2)\n super() end\n f2() @}";
    assert_eq!(stdout_of(source), "2\n1\n");
}

#[test]
fn struct_instances_are_independent() {
    let source = "{@ struct A:\n a = 1\nend\n x = A()\n x.a = 2 @}{: x.a :}";
    assert_eq!(stdout_of(source), "2");
    let source = "{@ struct A:\n a = 1\nend\n x = A()\n x.a = 2\n y = A() @}{: y.a :}";
    assert_eq!(stdout_of(source), "1");
}

#[test]
fn inject_replaces_parent_block() {
    let source = "{@ def base():\n block h:\n puts(1)\n end\nend\n def child() extends base:\n inject h:\n puts(2)\n end\n super()\nend\n child() @}";
    assert_eq!(stdout_of(source), "2\n");
}
