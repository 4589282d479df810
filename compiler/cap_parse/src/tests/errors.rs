//! Fixed syntax error messages.

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_import_without_as() {
    assert_eq!(
        parse_err("{@ import \"x\" @}"),
        "not found keyword 'as' in compile import as statement"
    );
}

#[test]
fn test_import_errors() {
    assert_eq!(
        parse_err("{@ import x as y @}"),
        "not found path in compile import as statement"
    );
    assert_eq!(
        parse_err("{@ import \"x\" as @}"),
        "not found alias in compile import as statement"
    );
    assert_eq!(
        parse_err("{@ import \"x\" as y z @}"),
        "syntax error. invalid token identifier in compile import statement"
    );
    assert_eq!(
        parse_err("{@ from x import y @}"),
        "not found path in compile from import statement"
    );
    assert_eq!(
        parse_err("{@ from \"x\" y @}"),
        "not found import in compile from import statement"
    );
    assert_eq!(
        parse_err("{@ from \"x\" import @}"),
        "not found import variables in compile from import statement"
    );
    assert_eq!(
        parse_err("{@ from \"x\" import a as @}"),
        "not found second identifier in compile import variable"
    );
    assert_eq!(
        parse_err("{@ from \"x\" import (a b) @}"),
        "invalid token identifier in compile import variables"
    );
    assert_eq!(
        parse_err("{@ from \"x\" import () @}"),
        "not found import variable in compile import variables"
    );
}

#[test]
fn test_reference_block_errors() {
    assert_eq!(parse_err("{: a b :}"), "syntax error. not found \":}\"");
    assert_eq!(
        parse_err("{: :}"),
        "syntax error. not found formula in reference block"
    );
}

#[test]
fn test_leftover_tokens() {
    assert_eq!(parse_err("{@ end @}"), "syntax error. unsupported token \"end\"");
}

#[test]
fn test_partial_program_survives_error() {
    let output = parse_source("before{@ a = 1 @}{: :}");
    assert!(output.has_errors());
    let program = output.program.unwrap();
    assert_eq!(program.blocks.segments.len(), 2);
}

#[test]
fn test_expression_errors() {
    assert_eq!(
        parse_err("{: a or :}"),
        "syntax error. not found rhs operand in 'or' operator"
    );
    assert_eq!(
        parse_err("{: a and :}"),
        "syntax error. not found rhs operand in 'and' operator"
    );
    assert_eq!(
        parse_err("{: not :}"),
        "syntax error. not found operand in not operator"
    );
    assert_eq!(
        parse_err("{: a < :}"),
        "syntax error. not found rhs operand in comparison"
    );
    assert_eq!(
        parse_err("{: a += :}"),
        "syntax error. not found rhs operand in asscalc"
    );
    assert_eq!(
        parse_err("{: a + :}"),
        "syntax error. not found rhs operand in expr"
    );
    assert_eq!(
        parse_err("{: a * :}"),
        "syntax error. not found rhs operand in term"
    );
    assert_eq!(parse_err("{: () :}"), "syntax error. not found content of ( )");
    assert_eq!(parse_err("{: (a :}"), "syntax error. not found ) in factor");
    assert_eq!(parse_err("{: a. :}"), "not found identifier after '.'");
    assert_eq!(parse_err("{: a[] :}"), "not found expression");
    assert_eq!(parse_err("{: a[1 :}"), "not found ']'");
    assert_eq!(parse_err("{: f(1 :}"), "not found ')'");
    assert_eq!(
        parse_err("{@ a = @}"),
        "syntax error. not found rhs test in assign list"
    );
    assert_eq!(
        parse_err("{@ a, b = @}"),
        "syntax error. not found rhs in multi assign"
    );
    assert_eq!(
        parse_err("{: a, :}"),
        "syntax error. not found test in test list"
    );
}

#[test]
fn test_array_and_dict_errors() {
    assert_eq!(parse_err("{: [1 2] :}"), "not found ']' in array");
    assert_eq!(parse_err("{: {\"a\" 1} :}"), "not found colon in parse dict elem");
    assert_eq!(parse_err("{: {\"a\": } :}"), "not found value in parse dict elem");
    assert_eq!(parse_err("{: {\"a\": 1 \"b\"} :}"), "not found right brace in parse dict");
    assert_eq!(parse_err("{: {1: 2} :}"), "key is not string in dict elem");
    assert_eq!(parse_err("{: {nil: 2} :}"), "key is not string in dict elem");
}

#[test]
fn test_if_errors() {
    assert_eq!(
        parse_err("{@ if: end @}"),
        "syntax error. not found test in if statement"
    );
    assert_eq!(
        parse_err("{@ if a end @}"),
        "syntax error. not found colon in if statement"
    );
    assert_eq!(
        parse_err("{@ if a:\n b = 1\n@}"),
        "reached EOF in if statement"
    );
    assert_eq!(
        parse_err("{@ if a: else end @}"),
        "syntax error. not found colon in else statement"
    );
    assert_eq!(
        parse_err("{@ if a: @}x"),
        "reached EOF in if statement"
    );
}

#[test]
fn test_for_errors() {
    assert_eq!(
        parse_err("{@ for i = 0 end @}"),
        "syntax error. unsupported token type (end) in for statement"
    );
    assert_eq!(
        parse_err("{@ for i = 0; i < 1 end @}"),
        "syntax error. not found semicolon (2)"
    );
    assert_eq!(
        parse_err("{@ for i = 0; i < 1; i += 1 end @}"),
        "syntax error. not found colon in for statement"
    );
    assert_eq!(
        parse_err("{@ for ) : end @}"),
        "syntax error. not found initialize assign list in for statement"
    );
    assert_eq!(
        parse_err("{@ for:\n a = 1\n@}"),
        "reached EOF in for statement"
    );
}

#[test]
fn test_def_errors() {
    assert_eq!(
        parse_err("{@ def f(a,): end @}"),
        "syntax error. not found identifier in func def args"
    );
    assert_eq!(
        parse_err("{@ def f(a b): end @}"),
        "syntax error. not found ')' in func def params"
    );
    assert_eq!(
        parse_err("{@ def f() extends: end @}"),
        "not found identifier in function extends"
    );
    assert_eq!(
        parse_err("{@ def f():\n a = 1\n ) @}"),
        "not found 'end' in parse func def"
    );
}

#[test]
fn test_block_and_inject_errors() {
    assert_eq!(parse_err("{@ block a: end @}"), "block statement needs function");
    assert_eq!(parse_err("{@ inject a: end @}"), "inject statement needs function");
    assert_eq!(
        parse_err("{@ def f(): block: end end @}"),
        "not found identifier in block statement"
    );
    assert_eq!(
        parse_err("{@ def f(): block a end end @}"),
        "not found colon in block statement"
    );
    assert_eq!(
        parse_err("{@ def f(): inject a end end @}"),
        "not found colon in inject statement"
    );
    assert_eq!(
        parse_err("{@ def f(): inject: end end @}"),
        "not found identifier in inject statement"
    );
    assert_eq!(
        parse_err("{@ def f(): @}x{: y :}"),
        "syntax error. reached EOF in parse func def"
    );
}

#[test]
fn test_struct_errors() {
    assert_eq!(parse_err("{@ struct: end @}"), "not found identifier");
    assert_eq!(parse_err("{@ struct A end @}"), "not found colon in struct");
    assert_eq!(parse_err("{@ struct A:\n a = 1\n) @}"), "not found 'end' in struct");
}

#[test]
fn test_scope_declaration_errors() {
    assert_eq!(parse_err("{@ global @}"), "not found identifier");
    assert_eq!(parse_err("{@ nonlocal a, @}"), "not found identifier");
}

#[test]
fn test_error_carries_rule_name() {
    let output = parse_source("{@ struct A end @}");
    let error = &output.errors[0];
    assert_eq!(error.function, "parse_struct");
    assert!(error.file.ends_with("item.rs"));
}
