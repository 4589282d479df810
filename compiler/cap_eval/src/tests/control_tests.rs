use pretty_assertions::assert_eq;

use super::{run_default, run_err, run_ok};

#[test]
fn test_text_and_reference_blocks() {
    assert_eq!(run_ok("hello"), "hello");
    assert_eq!(run_ok("a{@ x = 1 @}b{: x :}c"), "ab1c");
    assert_eq!(run_ok("{: nil :}{: true :}{: [1] :}{: {} :}"), "niltrue(array)(dict)");
}

#[test]
fn test_reference_block_writes_first_value() {
    assert_eq!(run_ok("{: 1, 2 :}"), "1");
}

#[test]
fn test_for_loop_counts() {
    let source = "{@ a = 0\nfor i=0; i!=4; i+=1:\n a += 1\nend @}{: a :}";
    assert_eq!(run_ok(source), "4");
}

#[test]
fn test_for_body_text_repeats() {
    assert_eq!(
        run_ok("{@ for i = 0; i < 3; i += 1: @}[{: i :}]{@ end @}"),
        "[0][1][2]"
    );
}

#[test]
fn test_for_with_condition_only() {
    let source = "{@ n = 3\nfor n > 0:\n puts(n)\n n -= 1\nend @}";
    assert_eq!(run_ok(source), "3\n2\n1\n");
}

#[test]
fn test_break_and_continue() {
    let source = "{@ for i = 0; i < 5; i += 1:
 if i == 3: break end
 if i == 1: continue end
 puts(i)
end @}";
    assert_eq!(run_ok(source), "0\n2\n");
}

#[test]
fn test_infinite_loop_with_break() {
    let source = "{@ n = 0\nfor:\n n += 1\n if n == 5: break end\nend @}{: n :}";
    assert_eq!(run_ok(source), "5");
}

#[test]
fn test_if_elif_else() {
    let source = "{@ def pick(n):
 if n == 0:
  return \"zero\"
 elif n == 1:
  return \"one\"
 else:
  return \"many\"
 end
end @}{: pick(0) :} {: pick(1) :} {: pick(7) :}";
    assert_eq!(run_ok(source), "zero one many");
}

#[test]
fn test_if_with_text_body() {
    assert_eq!(run_ok("{@ a = 1\nif a: @}yes{@ else: @}no{@ end @}"), "yes");
    assert_eq!(run_ok("{@ a = 0\nif a: @}yes{@ else: @}no{@ end @}"), "no");
}

#[test]
fn test_misplaced_control_statements() {
    assert_eq!(run_err("{@ break @}"), "invalid break statement. not in loop");
    assert_eq!(run_err("{@ continue @}"), "invalid continue statement. not in loop");
    assert_eq!(run_err("{@ return 1 @}"), "invalid return statement. not in function");
}

#[test]
fn test_break_cannot_escape_function() {
    let source = "{@ def f(): break end\nfor i = 0; i < 1; i += 1:\n f()\nend @}";
    assert_eq!(run_err(source), "invalid break statement. not in loop");
}

#[test]
fn test_output_before_error_is_kept() {
    let output = run_default("before{: nope :}after");
    assert_eq!(output.stdout, "before");
    assert_eq!(output.first_error_message(), Some("not defined \"nope\""));
    assert_eq!(output.exit_code(), 1);
}

#[test]
fn test_short_circuit_returns_operands() {
    assert_eq!(run_ok("{: 0 or \"x\" :}"), "x");
    assert_eq!(run_ok("{: 1 and nil :}"), "nil");
    assert_eq!(run_ok("{: \"\" and undefined_name :}"), "");
    assert_eq!(run_ok("{: not \"\" :}"), "true");
}

#[test]
fn test_comparisons() {
    assert_eq!(run_ok("{: 1 == true :}"), "true");
    assert_eq!(run_ok("{: \"1\" == 1 :}"), "false");
    assert_eq!(run_ok("{: nil == nil :}"), "true");
    assert_eq!(run_ok("{: [1, [2]] == [1, [2]] :}"), "true");
    assert_eq!(run_ok("{: 2 >= 2 :}{: 1 < false :}"), "truefalse");
}

#[test]
fn test_arithmetic() {
    assert_eq!(run_ok("{: 1 + 2 * 3 :}"), "7");
    assert_eq!(run_ok("{: 7 / 2 :}{: 7 % 3 :}"), "31");
    assert_eq!(run_ok("{: -(2 + 3) :}"), "-5");
    assert_eq!(run_ok("{: \"ab\" * 3 :}"), "ababab");
    assert_eq!(run_ok("{: \"a\" + \"b\" :}"), "ab");
}

#[test]
fn test_arithmetic_errors() {
    assert_eq!(run_err("{: 1 / 0 :}"), "zero division error");
    assert_eq!(run_err("{@ x = 1\n x /= 0 @}"), "zero division error");
    assert_eq!(run_err("{@ x = 1\n x %= false @}"), "zero division error");
    assert_eq!(run_err("{: \"ab\" * (-1) :}"), "can't mul string by negative value");
    assert_eq!(
        run_err("{: \"a\" + 1 :}"),
        "unsupported operand types for +: string and int"
    );
}

#[test]
fn test_undefined_name_and_lex_and_compile_errors() {
    assert_eq!(run_err("{: nope :}"), "not defined \"nope\"");
    assert_eq!(run_err("{@@"), "invalid syntax. single '@' is not supported");
    assert_eq!(
        run_err("{@ import \"x\" @}"),
        "not found keyword 'as' in compile import as statement"
    );
}

#[test]
fn test_error_trace_points_at_program_line() {
    let output = run_default("{@ a = 1\nb = nope @}");
    let trace = output.errors.trace_to_string();
    assert!(trace.contains("(unknown module): 2: not defined \"nope\""), "{trace}");
}
