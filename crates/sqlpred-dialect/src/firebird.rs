//! Firebird dialect.

use crate::dialect::{quote_standard, Dialect};
use crate::error::Result;
use crate::pagination::RowWindow;
use crate::sql_type::SqlType;
use crate::value::Value;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Firebird: booleans stored as `SMALLINT`, `ROWS m TO n` pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirebirdDialect;

impl Dialect for FirebirdDialect {
    fn name(&self) -> &'static str {
        "firebird"
    }

    fn quote(&self, value: &Value, sql_type: SqlType) -> Result<String> {
        quote_standard(value, sql_type, ("1", "0"), DATETIME_FORMAT)
    }

    fn true_literal(&self) -> String {
        "1".to_string()
    }

    fn false_literal(&self) -> String {
        "0".to_string()
    }

    /// `ROWS <from> TO <to>`, or `ROWS <from> ` when unbounded.
    fn pagination_clause(&self, skip: Option<i64>, limit: Option<i64>) -> Result<String> {
        let Some(window) = RowWindow::resolve(skip, limit)? else {
            return Ok(String::new());
        };
        let to_row = window
            .to_row()
            .map(|row| format!("TO {}", row))
            .unwrap_or_default();
        Ok(format!("ROWS {} {}", window.from_row(), to_row))
    }
}
