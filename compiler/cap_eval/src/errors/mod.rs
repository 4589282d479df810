//! Evaluation errors and control signals.
//!
//! [`EvalErrorKind`] names every failure the evaluator raises. Factory
//! functions (e.g. [`zero_division()`]) are the public API for building an
//! [`EvalError`]: they fill in the kind and its message and record the
//! engine location that raised the error, which becomes the internal
//! location of the [`ErrorRecord`] pushed onto the error stack.
//!
//! `break`, `continue`, `return` and `exit()` unwind through the same
//! `Result` channel as errors, as [`ControlAction`] variants.

use std::fmt;
use std::panic::Location;
use std::rc::Rc;

use cap_diagnostic::{ErrorRecord, ProgramLocation, SourceFile};
use cap_ir::Span;

use crate::importer::ImportError;
use crate::object::ObjectRef;

/// Result of evaluating a node.
pub type EvalResult<T = ObjectRef> = Result<T, ControlAction>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Arithmetic
    ZeroDivision,
    IntegerOverflow {
        op: &'static str,
    },
    NegativeRepeat,
    UnsupportedOperands {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    UnsupportedOperand {
        op: &'static str,
        operand: &'static str,
    },

    // Names and assignment
    NotDefined {
        name: String,
    },
    NonlocalNotFound {
        name: String,
    },
    InvalidLeftHandOperand,
    ArrayLengthMismatch,
    StringIndexAssign,
    ReadOnlyAttribute {
        name: String,
        type_name: &'static str,
    },

    // Access
    IndexOutOfRange,
    KeyNotFound {
        key: String,
    },
    InvalidIndex {
        owner: &'static str,
        index: &'static str,
    },
    DictKeyNotString,
    NoAttribute {
        name: String,
    },
    NoSuchMethod {
        method: String,
        type_name: &'static str,
    },
    MethodUsage {
        usage: &'static str,
    },
    MissingKey,
    InvalidKey,
    InvalidArgument,
    EmptySeparator,

    // Calls and definitions
    NotCallable,
    ArgumentCount,
    NotAFunction {
        name: String,
    },
    NotAStruct {
        name: String,
    },

    // Control flow
    InvalidBreak,
    InvalidContinue,
    InvalidReturn,
    InjectWithoutExtends,

    // Builtins and imports
    AssertionFailed,
    Import(ImportError),
    ImportFailed {
        path: String,
    },

    Custom {
        message: String,
    },
}

impl EvalErrorKind {
    /// Variant name, used as the function tag of error records.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::ZeroDivision => "ZeroDivision",
            Self::IntegerOverflow { .. } => "IntegerOverflow",
            Self::NegativeRepeat => "NegativeRepeat",
            Self::UnsupportedOperands { .. } => "UnsupportedOperands",
            Self::UnsupportedOperand { .. } => "UnsupportedOperand",
            Self::NotDefined { .. } => "NotDefined",
            Self::NonlocalNotFound { .. } => "NonlocalNotFound",
            Self::InvalidLeftHandOperand => "InvalidLeftHandOperand",
            Self::ArrayLengthMismatch => "ArrayLengthMismatch",
            Self::StringIndexAssign => "StringIndexAssign",
            Self::ReadOnlyAttribute { .. } => "ReadOnlyAttribute",
            Self::IndexOutOfRange => "IndexOutOfRange",
            Self::KeyNotFound { .. } => "KeyNotFound",
            Self::InvalidIndex { .. } => "InvalidIndex",
            Self::DictKeyNotString => "DictKeyNotString",
            Self::NoAttribute { .. } => "NoAttribute",
            Self::NoSuchMethod { .. } => "NoSuchMethod",
            Self::MethodUsage { .. } => "MethodUsage",
            Self::MissingKey => "MissingKey",
            Self::InvalidKey => "InvalidKey",
            Self::InvalidArgument => "InvalidArgument",
            Self::EmptySeparator => "EmptySeparator",
            Self::NotCallable => "NotCallable",
            Self::ArgumentCount => "ArgumentCount",
            Self::NotAFunction { .. } => "NotAFunction",
            Self::NotAStruct { .. } => "NotAStruct",
            Self::InvalidBreak => "InvalidBreak",
            Self::InvalidContinue => "InvalidContinue",
            Self::InvalidReturn => "InvalidReturn",
            Self::InjectWithoutExtends => "InjectWithoutExtends",
            Self::AssertionFailed => "AssertionFailed",
            Self::Import(_) => "Import",
            Self::ImportFailed { .. } => "ImportFailed",
            Self::Custom { .. } => "Custom",
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDivision => f.write_str("zero division error"),
            Self::IntegerOverflow { op } => write!(f, "integer overflow in {op}"),
            Self::NegativeRepeat => f.write_str("can't mul string by negative value"),
            Self::UnsupportedOperands { op, left, right } => {
                write!(f, "unsupported operand types for {op}: {left} and {right}")
            }
            Self::UnsupportedOperand { op, operand } => {
                write!(f, "unsupported operand type for {op}: {operand}")
            }
            Self::NotDefined { name } => write!(f, "not defined \"{name}\""),
            Self::NonlocalNotFound { name } => {
                write!(f, "not found \"{name}\" in enclosing scope")
            }
            Self::InvalidLeftHandOperand => f.write_str("invalid left hand operand"),
            Self::ArrayLengthMismatch => {
                f.write_str("can't assign array to array. not same length")
            }
            Self::StringIndexAssign => f.write_str("can't assign to string index"),
            Self::ReadOnlyAttribute { name, type_name } => {
                write!(f, "can't set attribute \"{name}\" on {type_name}")
            }
            Self::IndexOutOfRange => f.write_str("index out of range"),
            Self::KeyNotFound { key } => write!(f, "not found key \"{key}\""),
            Self::InvalidIndex { owner, index } => write!(f, "can't index {owner} by {index}"),
            Self::DictKeyNotString => f.write_str("key is not string in dict elem"),
            Self::NoAttribute { name } => write!(f, "not found attribute \"{name}\""),
            Self::NoSuchMethod { method, type_name } => {
                write!(f, "not found method \"{method}\" in {type_name}")
            }
            Self::MethodUsage { usage } => f.write_str(usage),
            Self::MissingKey => f.write_str("key is not found"),
            Self::InvalidKey => f.write_str("invalid key"),
            Self::InvalidArgument => f.write_str("invalid argument"),
            Self::EmptySeparator => f.write_str("empty separator"),
            Self::NotCallable => f.write_str("operand is not callable"),
            Self::ArgumentCount => f.write_str("arguments not same length"),
            Self::NotAFunction { name } => write!(f, "\"{name}\" is not a function"),
            Self::NotAStruct { name } => write!(f, "\"{name}\" is not a struct"),
            Self::InvalidBreak => f.write_str("invalid break statement. not in loop"),
            Self::InvalidContinue => f.write_str("invalid continue statement. not in loop"),
            Self::InvalidReturn => f.write_str("invalid return statement. not in function"),
            Self::InjectWithoutExtends => {
                f.write_str("can't inject. not found extended function")
            }
            Self::AssertionFailed => f.write_str("assertion error"),
            Self::Import(err) => err.fmt(f),
            Self::ImportFailed { path } => write!(f, "failed to import \"{path}\""),
            Self::Custom { message } => f.write_str(message),
        }
    }
}

/// An evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
    /// Program span of the innermost expression that failed.
    pub span: Option<Span>,
    /// Engine location that raised the error.
    origin: &'static Location<'static>,
}

impl EvalError {
    /// Create an error with just a message.
    ///
    /// Prefer a factory function when a structured kind exists.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    #[track_caller]
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
            origin: Location::caller(),
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn origin(&self) -> &'static Location<'static> {
        self.origin
    }

    /// Error-stack record for this error, located in `source` when known.
    pub fn to_record(&self, source: Option<&Rc<SourceFile>>) -> ErrorRecord {
        let origin = self.origin;
        let location = source
            .zip(self.span)
            .map(|(source, span)| ProgramLocation::at(source, span));
        ErrorRecord::new(
            origin.file(),
            origin.line(),
            self.kind.variant_name(),
            self.message.clone(),
        )
        .with_location(location)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

/// Everything that unwinds evaluation.
#[derive(Debug)]
pub enum ControlAction {
    Error(EvalError),
    /// `break`, caught by the nearest loop.
    Break,
    /// `continue`, caught by the nearest loop.
    Continue,
    /// `return`, caught by the function boundary.
    Return(ObjectRef),
    /// `exit(code)` or `die(...)`, caught by the top-level run.
    Exit(i32),
}

impl ControlAction {
    pub fn is_error(&self) -> bool {
        matches!(self, ControlAction::Error(_))
    }

    /// Attach a span to an error that does not have one yet. Control
    /// signals pass through unchanged.
    #[must_use]
    pub fn with_span_if_error(self, span: Span) -> Self {
        match self {
            ControlAction::Error(err) if err.span.is_none() => {
                ControlAction::Error(err.with_span(span))
            }
            other => other,
        }
    }

    /// The error this action stands for when it escapes every construct
    /// that could catch it.
    #[track_caller]
    pub fn into_eval_error(self) -> EvalError {
        match self {
            ControlAction::Error(err) => err,
            ControlAction::Break => invalid_break(),
            ControlAction::Continue => invalid_continue(),
            ControlAction::Return(_) => invalid_return(),
            ControlAction::Exit(code) => EvalError::new(format!("exit with code {code}")),
        }
    }
}

impl From<EvalError> for ControlAction {
    fn from(err: EvalError) -> Self {
        ControlAction::Error(err)
    }
}

// Arithmetic

#[cold]
#[track_caller]
pub fn zero_division() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ZeroDivision)
}

#[cold]
#[track_caller]
pub fn integer_overflow(op: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { op })
}

#[cold]
#[track_caller]
pub fn negative_repeat() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeRepeat)
}

#[cold]
#[track_caller]
pub fn unsupported_operands(op: &'static str, left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperands { op, left, right })
}

#[cold]
#[track_caller]
pub fn unsupported_operand(op: &'static str, operand: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperand { op, operand })
}

// Names and assignment

#[cold]
#[track_caller]
pub fn not_defined(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotDefined {
        name: name.to_string(),
    })
}

#[cold]
#[track_caller]
pub fn nonlocal_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonlocalNotFound {
        name: name.to_string(),
    })
}

#[cold]
#[track_caller]
pub fn invalid_left_hand_operand() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidLeftHandOperand)
}

#[cold]
#[track_caller]
pub fn array_length_mismatch() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArrayLengthMismatch)
}

#[cold]
#[track_caller]
pub fn string_index_assign() -> EvalError {
    EvalError::from_kind(EvalErrorKind::StringIndexAssign)
}

#[cold]
#[track_caller]
pub fn read_only_attribute(name: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReadOnlyAttribute {
        name: name.to_string(),
        type_name,
    })
}

// Access

#[cold]
#[track_caller]
pub fn index_out_of_range() -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange)
}

#[cold]
#[track_caller]
pub fn key_not_found(key: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}

#[cold]
#[track_caller]
pub fn invalid_index(owner: &'static str, index: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidIndex { owner, index })
}

#[cold]
#[track_caller]
pub fn dict_key_not_string() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DictKeyNotString)
}

#[cold]
#[track_caller]
pub fn no_attribute(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoAttribute {
        name: name.to_string(),
    })
}

#[cold]
#[track_caller]
pub fn no_such_method(method: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchMethod {
        method: method.to_string(),
        type_name,
    })
}

/// Wrong arity for a method. `usage` is the full message shown to the user.
#[cold]
#[track_caller]
pub fn method_usage(usage: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MethodUsage { usage })
}

#[cold]
#[track_caller]
pub fn missing_key() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingKey)
}

#[cold]
#[track_caller]
pub fn invalid_key() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidKey)
}

#[cold]
#[track_caller]
pub fn invalid_argument() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument)
}

#[cold]
#[track_caller]
pub fn empty_separator() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptySeparator)
}

// Calls and definitions

#[cold]
#[track_caller]
pub fn not_callable() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable)
}

#[cold]
#[track_caller]
pub fn wrong_arg_count() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentCount)
}

#[cold]
#[track_caller]
pub fn not_a_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAFunction {
        name: name.to_string(),
    })
}

#[cold]
#[track_caller]
pub fn not_a_struct(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAStruct {
        name: name.to_string(),
    })
}

// Control flow

#[cold]
#[track_caller]
pub fn invalid_break() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBreak)
}

#[cold]
#[track_caller]
pub fn invalid_continue() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidContinue)
}

#[cold]
#[track_caller]
pub fn invalid_return() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidReturn)
}

#[cold]
#[track_caller]
pub fn inject_without_extends() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InjectWithoutExtends)
}

// Builtins and imports

#[cold]
#[track_caller]
pub fn assertion_failed() -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssertionFailed)
}

#[cold]
#[track_caller]
pub fn import_error(err: ImportError) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Import(err))
}

#[cold]
#[track_caller]
pub fn import_failed(path: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImportFailed {
        path: path.to_string(),
    })
}
