//! The dialect contract.
//!
//! A [`Dialect`] is a stateless formatting strategy: it renders literal
//! values, spells booleans and writes the pagination clause for one
//! database backend. The expression compiler consults it for every
//! literal it emits.

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::{DialectError, Result};
use crate::firebird::FirebirdDialect;
use crate::sqlite::SqliteDialect;
use crate::sql_type::SqlType;
use crate::value::{Number, Value};

/// Which end(s) of a string a trim applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimSide {
    /// Both ends.
    Both,
    /// Leading characters only.
    Leading,
    /// Trailing characters only.
    Trailing,
}

/// Backend-specific literal quoting, boolean spelling and pagination.
///
/// Implementors provide [`quote`](Dialect::quote), the two boolean
/// literals and [`pagination_clause`](Dialect::pagination_clause). The
/// remaining methods have ANSI defaults.
///
/// # Example
///
/// ```
/// use sqlpred_dialect::{Dialect, FirebirdDialect, SqlType, Value};
///
/// let dialect = FirebirdDialect;
/// assert_eq!(dialect.quote(&Value::from("it's"), SqlType::Text).unwrap(), "'it''s'");
/// assert_eq!(dialect.true_literal(), "1");
/// assert_eq!(dialect.pagination_clause(Some(0), Some(4)).unwrap(), "ROWS 1 TO 4");
/// ```
pub trait Dialect: Send + Sync + std::fmt::Debug {
    /// Short name of the backend, used in logs.
    fn name(&self) -> &'static str;

    /// Renders `value` as a literal of semantic type `sql_type`.
    ///
    /// Pairs the dialect cannot render are
    /// [`DialectError::UnsupportedLiteral`], never an unquoted fallback.
    fn quote(&self, value: &Value, sql_type: SqlType) -> Result<String>;

    /// The literal spelling of boolean true.
    fn true_literal(&self) -> String;

    /// The literal spelling of boolean false.
    fn false_literal(&self) -> String;

    /// Renders the "skip N, take M" clause. Empty when `skip` is absent.
    fn pagination_clause(&self, skip: Option<i64>, limit: Option<i64>) -> Result<String>;

    /// Quotes `value` using its own semantic type.
    fn quote_value(&self, value: &Value) -> Result<String> {
        match value.sql_type() {
            Some(sql_type) => self.quote(value, sql_type),
            None => Err(DialectError::UnsupportedLiteral {
                value_type: value.type_name(),
                sql_type: "any",
            }),
        }
    }

    /// Quotes a column identifier.
    fn quote_column(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Renders a trim of an already-rendered column expression.
    fn trim_clause(&self, side: TrimSide, column: &str) -> String {
        match side {
            TrimSide::Both => format!("trim({})", column),
            TrimSide::Leading => format!("trim(leading from {})", column),
            TrimSide::Trailing => format!("trim(trailing from {})", column),
        }
    }
}

/// Quotes `value` with the rules most dialects share.
///
/// Dialects call this from [`Dialect::quote`], supplying their own
/// boolean spellings and date format.
pub fn quote_standard(
    value: &Value,
    sql_type: SqlType,
    literals: (&str, &str),
    datetime_format: &str,
) -> Result<String> {
    let unsupported = || DialectError::UnsupportedLiteral {
        value_type: value.type_name(),
        sql_type: sql_type.as_str(),
    };

    match (value, sql_type) {
        (Value::Null, _) => Ok("null".to_string()),
        (Value::Text(s), SqlType::Text | SqlType::EnumName) => Ok(quote_text(s)),
        (Value::Number(n), SqlType::Integer) if n.is_integral() => Ok(n.to_string()),
        (Value::Number(n), SqlType::Float) => format_float(*n).ok_or_else(unsupported),
        (Value::Bool(b), SqlType::Boolean) => {
            let (t, f) = literals;
            let literal = if *b { t } else { f };
            Ok(literal.to_string())
        }
        (Value::DateTime(dt), SqlType::DateTime) => Ok(quote_datetime(dt, datetime_format)),
        _ => Err(unsupported()),
    }
}

/// Single-quotes text, doubling embedded quotes.
pub fn quote_text(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn quote_datetime(dt: &NaiveDateTime, format: &str) -> String {
    format!("'{}'", dt.format(format))
}

// Non-finite floats have no literal form.
fn format_float(n: Number) -> Option<String> {
    match n {
        Number::F64(f) if !f.is_finite() => None,
        other => Some(other.to_string()),
    }
}

/// Selects one of the built-in dialects by name.
///
/// Deserializes from lowercase names, so configuration files can say
/// `dialect: sqlite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// [`FirebirdDialect`].
    #[default]
    Firebird,
    /// [`SqliteDialect`].
    Sqlite,
}

impl DialectKind {
    /// Returns a shared instance of the selected dialect.
    pub fn dialect(self) -> Arc<dyn Dialect> {
        match self {
            DialectKind::Firebird => Arc::new(FirebirdDialect),
            DialectKind::Sqlite => Arc::new(SqliteDialect),
        }
    }

    /// Returns the lowercase name of this dialect.
    pub fn as_str(self) -> &'static str {
        match self {
            DialectKind::Firebird => "firebird",
            DialectKind::Sqlite => "sqlite",
        }
    }
}

impl FromStr for DialectKind {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firebird" => Ok(DialectKind::Firebird),
            "sqlite" => Ok(DialectKind::Sqlite),
            _ => Err(DialectError::UnknownDialect(s.to_string())),
        }
    }
}

impl std::fmt::Display for DialectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
