use pretty_assertions::assert_eq;

use super::{run_err, run_ok};

#[test]
fn test_scalar_rebinding_copies() {
    let source = "{@ a = 1\n b = a @}{: id(a) != id(b) :}{: a == b :}";
    assert_eq!(run_ok(source), "truetrue");
}

#[test]
fn test_chained_assignment_shares() {
    assert_eq!(run_ok("{@ a = b = 1 @}{: id(a) == id(b) :}"), "true");
    assert_eq!(run_ok("{@ a = b = \"s\" @}{: id(a) == id(b) :}{: b :}"), "trues");
}

#[test]
fn test_containers_keep_identity() {
    let source = "{@ a = [1]
def f(x): return x end
b = f(a)
c = [a]
d = {\"k\": a} @}{: id(a) == id(b) :}{: id(c[0]) == id(a) :}{: id(d[\"k\"]) == id(a) :}";
    assert_eq!(run_ok(source), "truetruetrue");
}

#[test]
fn test_mutation_through_alias() {
    let source = "{@ a = [1]\n b = a\n b.push(2) @}{: len(a) :}";
    assert_eq!(run_ok(source), "2");
}

#[test]
fn test_assign_list_and_multi_assign() {
    assert_eq!(run_ok("{@ a = 1, b = 2 @}{: a + b :}"), "3");
    assert_eq!(run_ok("{@ a, b = 1, 2 @}{: a :}{: b :}"), "12");
    assert_eq!(run_ok("{@ a = 1, 2 @}{: len(a) :}"), "2");
    assert_eq!(run_ok("{@ a, b = [3, 4] @}{: a + b :}"), "7");
    assert_eq!(run_ok("{@ a, b = c, d = 1, 2 @}{: a + b + c + d :}"), "6");
    assert_eq!(
        run_err("{@ a, b = 1, 2, 3 @}"),
        "can't assign array to array. not same length"
    );
}

#[test]
fn test_compound_assignment() {
    assert_eq!(run_ok("{@ s = \"a\"\n s += \"b\" @}{: s :}"), "ab");
    assert_eq!(run_ok("{@ n = 1\n n += true @}{: n :}"), "2");
    assert_eq!(run_ok("{@ s = \"ab\"\n s *= 2 @}{: s :}"), "abab");
    assert_eq!(run_ok("{@ a = [1, 2]\n a[1] += 5 @}{: a[1] :}"), "7");
    assert_eq!(
        run_err("{@ s = \"a\"\n s += 1 @}"),
        "unsupported operand types for +: string and int"
    );
    assert_eq!(run_err("{@ 1 += 2 @}"), "invalid left hand operand");
    assert_eq!(run_err("{@ q += 1 @}"), "not defined \"q\"");
}

#[test]
fn test_index_reads() {
    assert_eq!(run_ok("{@ a = [1, 2] @}{: a[1] :}"), "2");
    assert_eq!(run_ok("{@ s = \"abc\" @}{: s[1] :}"), "b");
    assert_eq!(run_ok("{@ d = {\"a\": 1} @}{: d[\"a\"] :}"), "1");
    assert_eq!(run_err("{@ a = [1, 2] @}{: a[2] :}"), "index out of range");
    assert_eq!(run_err("{@ a = [1, 2] @}{: a[-1] :}"), "index out of range");
    assert_eq!(run_err("{@ s = \"abc\" @}{: s[3] :}"), "index out of range");
    assert_eq!(run_err("{@ d = {\"a\": 1} @}{: d[\"b\"] :}"), "not found key \"b\"");
    assert_eq!(run_err("{@ d = {\"a\": 1} @}{: d[0] :}"), "can't index dict by int");
}

#[test]
fn test_index_writes() {
    assert_eq!(run_ok("{@ d = {}\n d[\"k\"] = 5 @}{: d[\"k\"] :}"), "5");
    assert_eq!(run_ok("{@ a = [1, 2]\n a[0] = 9 @}{: a[0] :}"), "9");
    assert_eq!(run_err("{@ a = [1]\n a[1] = 9 @}"), "index out of range");
    assert_eq!(
        run_err("{@ s = \"abc\"\n s[0] = \"x\" @}"),
        "can't assign to string index"
    );
    assert_eq!(
        run_err("{@ k = 1\n d = {k: 2} @}"),
        "key is not string in dict elem"
    );
}

#[test]
fn test_attribute_errors() {
    assert_eq!(run_err("{@ a = 1\n a.b = 2 @}"), "can't set attribute \"b\" on int");
    assert_eq!(run_err("{@ a = [1] @}{: a.b :}"), "not found attribute \"b\"");
}

#[test]
fn test_global_declaration() {
    let source = "{@ x = 1
def f():
 global x
 x = 2
end
def g():
 x = 5
end
f()
g() @}{: x :}";
    assert_eq!(run_ok(source), "2");
}

#[test]
fn test_nonlocal_declaration() {
    let source = "{@ def outer():
 n = 1
 def inner():
  nonlocal n
  n = 2
 end
 inner()
 return n
end @}{: outer() :}";
    assert_eq!(run_ok(source), "2");
}

#[test]
fn test_nonlocal_without_binding() {
    let source = "{@ def h():\n nonlocal q\n q = 1\nend\nh() @}";
    assert_eq!(run_err(source), "not found \"q\" in enclosing scope");
}
