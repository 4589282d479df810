//! Error stack for the Cap template engine.
//!
//! Scanning, compiling and evaluating all report into an [`ErrorStack`].
//! Each [`ErrorRecord`] carries two locations:
//!
//! - the engine-internal one (`file!()`, `line!()`, enclosing function),
//!   captured by [`push_error!`] and printed by [`ErrorStack::trace_debug`]
//! - the program one ([`ProgramLocation`]), used by [`ErrorStack::trace`]
//!   to print the offending source line with a caret
//!
//! Callers usually only need [`ErrorStack::first_error_message`].

mod source;
mod stack;

pub use source::{ProgramLocation, SourceFile};
pub use stack::{ErrorRecord, ErrorStack};

/// Name of the enclosing function, without its module path.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn here() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(here);
        let name = name.strip_suffix("::here").unwrap_or(name);
        let name = name.trim_end_matches("::{{closure}}");
        name.rsplit("::").next().unwrap_or(name)
    }};
}

/// Push an [`ErrorRecord`] tagged with the caller's source location.
///
/// ```text
/// push_error!(errors, "zero division error");
/// push_error!(errors, message, location);
/// ```
#[macro_export]
macro_rules! push_error {
    ($stack:expr, $message:expr) => {
        $stack.push($crate::ErrorRecord::new(
            file!(),
            line!(),
            $crate::function_name!(),
            $message,
        ))
    };
    ($stack:expr, $message:expr, $location:expr) => {
        $stack.push(
            $crate::ErrorRecord::new(file!(), line!(), $crate::function_name!(), $message)
                .with_location($location),
        )
    };
}
