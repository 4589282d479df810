use pretty_assertions::assert_eq;

use crate::common::{compile_error, error_of};

#[test]
fn import_requires_as() {
    assert_eq!(
        compile_error("{@ import \"x\" @}").as_deref(),
        Some("not found keyword 'as' in compile import as statement")
    );
}

#[test]
fn valid_program_has_no_compile_error() {
    assert_eq!(compile_error("a{@ x = 1 @}{: x :}"), None);
}

#[test]
fn compile_errors_stop_the_run() {
    let output = crate::common::run("before{@ import \"x\" @}");
    assert_eq!(output.stdout, "");
    assert_eq!(
        output.first_error_message(),
        Some("not found keyword 'as' in compile import as statement")
    );
}

#[test]
fn literal_dict_keys_must_be_strings() {
    assert_eq!(error_of("{: {1: 2} :}"), "key is not string in dict elem");
}
