//! Command-line options for the `opts` module.
//!
//! Everything after the program file is split into flags and positional
//! arguments:
//!
//! - `--name value` and `-n value` set a flag to the next argument
//! - `--name=value` sets it inline
//! - a flag followed by another flag, or by nothing, maps to `""`
//! - anything else is positional
//!
//! The program file itself is positional argument 0.

use cap_eval::Opts;

pub fn parse_opts(program: &str, args: &[String]) -> Opts {
    let mut opts = Opts::new();
    opts.push_arg(program);

    let mut pending: Option<&str> = None;
    for arg in args {
        match flag_name(arg) {
            Some(name) => {
                if let Some(prev) = pending.take() {
                    opts.set_flag(prev, "");
                }
                match name.split_once('=') {
                    Some((key, value)) if arg.starts_with("--") => opts.set_flag(key, value),
                    _ => pending = Some(name),
                }
            }
            None => match pending.take() {
                Some(name) => opts.set_flag(name, arg.as_str()),
                None => opts.push_arg(arg.as_str()),
            },
        }
    }
    if let Some(name) = pending {
        opts.set_flag(name, "");
    }
    opts
}

/// `--name` or `-n` without its dashes. A lone `-` is positional.
fn flag_name(arg: &str) -> Option<&str> {
    arg.strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_program_is_first_argument() {
        let opts = parse_opts("main.cap", &[]);
        assert_eq!(opts.args(), ["main.cap"]);
    }

    #[test]
    fn test_flags_take_next_argument() {
        let opts = parse_opts("main.cap", &args(&["--name", "cap", "-v", "2"]));
        assert_eq!(opts.get("name"), Some("cap"));
        assert_eq!(opts.get("v"), Some("2"));
        assert_eq!(opts.args(), ["main.cap"]);
    }

    #[test]
    fn test_bare_flags_map_to_empty() {
        let opts = parse_opts("main.cap", &args(&["--verbose", "--quiet"]));
        assert_eq!(opts.get("verbose"), Some(""));
        assert_eq!(opts.get("quiet"), Some(""));
    }

    #[test]
    fn test_inline_value() {
        let opts = parse_opts("main.cap", &args(&["--out=dist", "file"]));
        assert_eq!(opts.get("out"), Some("dist"));
        assert_eq!(opts.args(), ["main.cap", "file"]);
    }

    #[test]
    fn test_positionals_keep_order() {
        let opts = parse_opts("main.cap", &args(&["a", "-", "b"]));
        assert_eq!(opts.args(), ["main.cap", "a", "-", "b"]);
        assert!(!opts.has("a"));
    }
}
