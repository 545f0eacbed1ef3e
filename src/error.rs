//! Centralised error hierarchy for the **Monkey interpreter**.
//!
//! There are two independent channels:
//!
//! * parse‑time diagnostics, a list of strings accumulated by the parser and
//!   surfaced here as [`MonkeyError::Parse`];
//! * evaluation‑time failures, a single [`RuntimeError`] that propagates out
//!   of the evaluator with `?`. The first one raised during the depth‑first
//!   walk is the only one reported.
//!
//! The module **does not** print diagnostics itself.

use std::io;
use thiserror::Error;

use log::debug;

use crate::ast::{InfixOperator, PrefixOperator};
use crate::object::ObjectType;

/// Failure raised while evaluating a program. The `Display` text of each
/// variant is the user‑facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Infix operands of different kinds.
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },

    /// Prefix operator not defined for the operand kind.
    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        right: ObjectType,
    },

    /// Infix operator not defined for two operands of the same kind.
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },

    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),

    #[error("not a function: {0}")]
    NotAFunction(ObjectType),

    #[error("unusable as hash key: {0}")]
    UnusableHashKey(ObjectType),

    #[error("index operator not supported: {left}[{index}]")]
    IndexNotSupported { left: ObjectType, index: ObjectType },

    #[error("division by zero")]
    DivisionByZero,

    /// Arity mismatch for a user function or a built‑in.
    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArgumentCount { got: usize, want: String },

    /// A built‑in received an argument kind it cannot handle.
    #[error("argument to `{builtin}` not supported, got {got}")]
    ArgumentNotSupported {
        builtin: &'static str,
        got: ObjectType,
    },
}

impl RuntimeError {
    /// Helper constructor for arity failures with an exact expected count.
    pub fn arity(got: usize, want: usize) -> Self {
        debug!("Creating arity error: got={}, want={}", got, want);

        RuntimeError::WrongArgumentCount {
            got,
            want: want.to_string(),
        }
    }

    /// Helper constructor for arity failures with a lower bound only.
    pub fn arity_at_least(got: usize, min: usize) -> Self {
        debug!("Creating arity error: got={}, want>={}", got, min);

        RuntimeError::WrongArgumentCount {
            got,
            want: format!("{}+", min),
        }
    }
}

/// Canonical crate‑wide error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MonkeyError {
    /// One or more parser diagnostics, one per line.
    #[error("{}", .0.join("\n"))]
    Parse(Vec<String>),

    /// Evaluation failure.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, MonkeyError>;

/// `Result` alias for the evaluator.
pub type EvalResult<T> = std::result::Result<T, RuntimeError>;
