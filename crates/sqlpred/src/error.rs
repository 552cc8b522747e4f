//! Error types for the compiler crate.

use sqlpred_dialect::DialectError;
use thiserror::Error;

/// Errors that abort a compile.
///
/// No partial fragment survives an error: the caller gets either the
/// whole predicate or one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// The dialect rejected a literal or a pagination parameter.
    #[error(transparent)]
    Dialect(#[from] DialectError),

    /// Operator name outside the supported set.
    #[error("unsupported operator: '{0}'")]
    UnsupportedOperator(String),

    /// Method name outside the supported set.
    #[error("unsupported method: '{0}'")]
    UnsupportedMethod(String),

    /// Node shape the compiler has no translation for.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// Ordinal compared against an enum column has no member name.
    #[error("{enum_name} has no member with ordinal {ordinal}")]
    UnknownEnumOrdinal {
        enum_name: &'static str,
        ordinal: i64,
    },

    /// Folding a constant sub-expression failed.
    #[error("cannot evaluate constant expression: {0}")]
    Evaluation(String),

    /// The configuration document could not be read.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CompileError {
    /// Returns `true` for a rejected skip or limit.
    pub fn is_invalid_pagination(&self) -> bool {
        matches!(
            self,
            CompileError::Dialect(DialectError::InvalidPagination { .. })
        )
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;
