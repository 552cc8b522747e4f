//! Error types for the dialect crate.

use thiserror::Error;

/// Errors raised while rendering literals or pagination clauses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    /// Skip or limit resolved to a negative row count.
    #[error("{name} value '{value}' must be >= 0")]
    InvalidPagination { name: &'static str, value: i64 },

    /// The value cannot be rendered as a literal of the requested type.
    #[error("cannot render {value_type} value as a {sql_type} literal")]
    UnsupportedLiteral {
        value_type: &'static str,
        sql_type: &'static str,
    },

    /// No dialect is registered under the given name.
    #[error("unknown dialect: '{0}'")]
    UnknownDialect(String),
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
