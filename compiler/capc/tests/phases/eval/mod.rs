//! Evaluator phase tests.
//!
//! - `properties` - identity, aliasing, arithmetic and inheritance behavior
//! - `driver` - what `cap run` adds on top: opts, error traces, exit codes

mod driver;
mod properties;
