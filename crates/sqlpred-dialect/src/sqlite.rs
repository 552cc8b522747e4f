//! SQLite dialect.

use crate::dialect::{quote_standard, Dialect, TrimSide};
use crate::error::Result;
use crate::pagination::RowWindow;
use crate::sql_type::SqlType;
use crate::value::Value;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// SQLite: integer booleans, `LIMIT`/`OFFSET` pagination, function-style trims.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
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

    fn pagination_clause(&self, skip: Option<i64>, limit: Option<i64>) -> Result<String> {
        let Some(window) = RowWindow::resolve(skip, limit)? else {
            return Ok(String::new());
        };
        // SQLite has no OFFSET without LIMIT; -1 means unbounded.
        let limit = window.limit().unwrap_or(-1);
        Ok(format!("LIMIT {} OFFSET {}", limit, window.skip()))
    }

    fn trim_clause(&self, side: TrimSide, column: &str) -> String {
        match side {
            TrimSide::Both => format!("trim({})", column),
            TrimSide::Leading => format!("ltrim({})", column),
            TrimSide::Trailing => format!("rtrim({})", column),
        }
    }
}
