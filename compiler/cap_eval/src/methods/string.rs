//! String methods.

use super::{require_args, MethodResult};
use crate::errors::{empty_separator, invalid_argument, no_such_method, wrong_arg_count, EvalError};
use crate::object::ObjectRef;

const DEFAULT_STRIP: &str = " \r\n\t";

pub(super) fn dispatch(text: &str, method: &str, args: &[ObjectRef]) -> MethodResult {
    match method {
        "lower" => unary(args, || text.to_lowercase()),
        "upper" => unary(args, || text.to_uppercase()),
        "capitalize" => unary(args, || capitalize(text)),
        "snake" => unary(args, || snake(text)),
        "camel" => unary(args, || camel(text)),
        "hacker" => unary(args, || hacker(text)),
        "split" => split(text, args),
        "strip" => strip_with(args, |chars| text.trim_matches(|c: char| chars.contains(&c))),
        "lstrip" => strip_with(args, |chars| text.trim_start_matches(|c: char| chars.contains(&c))),
        "rstrip" => strip_with(args, |chars| text.trim_end_matches(|c: char| chars.contains(&c))),
        "isdigit" => predicate(args, || text.chars().all(|c| c.is_ascii_digit())),
        "isalpha" => predicate(args, || text.chars().all(char::is_alphabetic)),
        "isspace" => predicate(args, || text.chars().all(char::is_whitespace)),
        _ => Err(no_such_method(method, "string")),
    }
}

fn unary(args: &[ObjectRef], f: impl FnOnce() -> String) -> MethodResult {
    require_args(0, args)?;
    Ok(ObjectRef::string(f()))
}

fn predicate(args: &[ObjectRef], f: impl FnOnce() -> bool) -> MethodResult {
    require_args(0, args)?;
    Ok(ObjectRef::bool(f()))
}

fn string_arg(arg: &ObjectRef) -> Result<String, EvalError> {
    arg.string_value().ok_or_else(invalid_argument)
}

fn strip_with<'t>(args: &[ObjectRef], f: impl FnOnce(&[char]) -> &'t str) -> MethodResult {
    let chars: Vec<char> = match args {
        [] => DEFAULT_STRIP.chars().collect(),
        [chars] => string_arg(chars)?.chars().collect(),
        _ => return Err(wrong_arg_count()),
    };
    Ok(ObjectRef::string(f(&chars)))
}

fn split(text: &str, args: &[ObjectRef]) -> MethodResult {
    require_args(1, args)?;
    let sep = string_arg(&args[0])?;
    if sep.is_empty() {
        return Err(empty_separator());
    }
    let parts = text
        .split(sep.as_str())
        .filter(|part| !part.is_empty())
        .map(ObjectRef::string)
        .collect();
    Ok(ObjectRef::array(parts))
}

fn is_separator(c: char) -> bool {
    c == '-' || c == '_'
}

fn push_lower(out: &mut String, c: char) {
    out.extend(c.to_lowercase());
}

fn push_upper(out: &mut String, c: char) {
    out.extend(c.to_uppercase());
}

/// Uppercase the first character only.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    let mut out = String::with_capacity(text.len());
    if let Some(first) = chars.next() {
        push_upper(&mut out, first);
    }
    out.extend(chars);
    out
}

/// `abcDef`, `abc-def`, `Abc__def` all become `abc_def`.
pub(crate) fn snake(text: &str) -> String {
    #[derive(Copy, Clone)]
    enum State {
        Start,
        Separator,
        Word,
    }

    let mut out = String::with_capacity(text.len() + 4);
    let mut state = State::Start;
    for c in text.chars() {
        state = match state {
            State::Start | State::Separator if is_separator(c) => state,
            State::Start | State::Separator => {
                push_lower(&mut out, c);
                State::Word
            }
            State::Word if c.is_uppercase() => {
                out.push('_');
                push_lower(&mut out, c);
                State::Word
            }
            State::Word if is_separator(c) => {
                out.push('_');
                State::Separator
            }
            State::Word => {
                out.push(c);
                State::Word
            }
        };
    }
    out
}

/// `abc_def`, `abc-def`, `AbcDef` all become `abcDef`.
pub(crate) fn camel(text: &str) -> String {
    #[derive(Copy, Clone)]
    enum State {
        Start,
        /// Separators before the first word character.
        Leading,
        /// Separators inside the word; the next character is capitalized.
        Inner,
        Word,
    }

    let mut out = String::with_capacity(text.len());
    let mut state = State::Start;
    for c in text.chars() {
        state = match state {
            State::Start | State::Leading if is_separator(c) => State::Leading,
            State::Start | State::Leading => {
                push_lower(&mut out, c);
                State::Word
            }
            State::Inner if is_separator(c) => State::Inner,
            State::Inner => {
                push_upper(&mut out, c);
                State::Word
            }
            State::Word if is_separator(c) => State::Inner,
            State::Word => {
                out.push(c);
                State::Word
            }
        };
    }
    out
}

/// Drop `-` and `_` and lowercase the rest: `Abc_Def` becomes `abcdef`.
pub(crate) fn hacker(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().filter(|&c| !is_separator(c)) {
        push_lower(&mut out, c);
    }
    out
}
