//! Error types.
//!
//! [`LogicError`] covers everything the expression language can reject:
//! malformed text, forbidden constructs, unbound variables and oversized
//! truth tables. [`CatalogError`] is what flat-file loading and saving
//! return; a [`LogicError`] converts into it with `?`.

use std::io;

use thiserror::Error;

/// Failure while parsing, validating or evaluating a boolean expression.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum LogicError {
    /// The text does not parse under the boolean grammar.
    #[error("syntax error at offset {position}: {message}")]
    Syntax { position: usize, message: String },

    /// The text is well-formed but uses something other than variables,
    /// `and`/`or`/`not`, boolean constants and parentheses.
    #[error("unsupported construct at offset {position}: {construct} (only variables, and/or/not, true/false and parentheses are allowed)")]
    UnsupportedConstruct { position: usize, construct: String },

    /// The expression references a name absent from the environment.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// Truth-table enumeration was refused.
    #[error("expression has {count} variables, truth tables are limited to {limit}")]
    TooManyVariables { count: usize, limit: usize },
}

impl LogicError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        LogicError::Syntax {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(position: usize, construct: impl Into<String>) -> Self {
        LogicError::UnsupportedConstruct {
            position,
            construct: construct.into(),
        }
    }
}

/// Failure in the recipe catalog layer.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed flat file; `line` is 1-based.
    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error(transparent)]
    Logic(#[from] LogicError),
}
