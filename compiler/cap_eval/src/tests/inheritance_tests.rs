use pretty_assertions::assert_eq;

use super::{run_err, run_ok};

#[test]
fn test_super_calls_parent() {
    let source = "{@ def f1(): puts(1) end\n def f2() extends f1: puts(2)\n super() end\n f2() @}";
    assert_eq!(run_ok(source), "2\n1\n");
}

#[test]
fn test_super_passes_arguments() {
    let source = "{@ def base(x): return x * 10 end
def child(x) extends base: return super(x) + 1 end @}{: child(4) :}";
    assert_eq!(run_ok(source), "41");
}

#[test]
fn test_inject_replaces_block() {
    let source = "{@ def base():\n block h:\n puts(1)\n end\nend\n def child() extends base:\n inject h:\n puts(2)\n end\n super()\nend\n child() @}";
    assert_eq!(run_ok(source), "2\n");
}

#[test]
fn test_block_without_injection_runs_own_body() {
    let source = "{@ def base():\n block h:\n puts(1)\n end\nend\n def child() extends base:\n super()\nend\n child()\n base() @}";
    assert_eq!(run_ok(source), "1\n1\n");
}

#[test]
fn test_outermost_injection_wins() {
    let source = "{@ def a():
 block h: puts(\"a\") end
end
def b() extends a:
 inject h: puts(\"b\") end
 super()
end
def c() extends b:
 inject h: puts(\"c\") end
 super()
end
c()
b() @}";
    assert_eq!(run_ok(source), "c\nb\n");
}

#[test]
fn test_injection_sees_child_scope() {
    let source = "{@ def page():
 @}<{@ block body: end @}>{@
end
def home() extends page:
 title = \"home\"
 inject body: @}{: title :}{@ end
 super()
end
home() @}";
    assert_eq!(run_ok(source), "<home>");
}

#[test]
fn test_inject_without_extends() {
    let source = "{@ def f():\n inject h:\n puts(1)\n end\nend\nf() @}";
    assert_eq!(run_err(source), "can't inject. not found extended function");
}
