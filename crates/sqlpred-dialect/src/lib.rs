//! sqlpred-dialect - the SQL dialect contract used by the sqlpred compiler.
//!
//! A dialect knows how one database backend spells things:
//!
//! - literal values (text escaping, numbers, dates, booleans, `null`)
//! - the boolean true/false literals
//! - the pagination clause ("skip N, take M")
//! - column quoting and trim syntax
//!
//! Two dialects ship with the crate, [`FirebirdDialect`] and
//! [`SqliteDialect`]. Both paginate over the same validated [`RowWindow`],
//! so only the surface syntax differs:
//!
//! ```rust
//! use sqlpred_dialect::{Dialect, FirebirdDialect, SqliteDialect};
//!
//! assert_eq!(FirebirdDialect.pagination_clause(Some(10), Some(5)).unwrap(), "ROWS 11 TO 15");
//! assert_eq!(SqliteDialect.pagination_clause(Some(10), Some(5)).unwrap(), "LIMIT 5 OFFSET 10");
//! ```
//!
//! # Literal Types
//!
//! | Value | Renders as |
//! |-------|------------|
//! | `Text` | `'...'` with `'` doubled (also for `EnumName`) |
//! | `Number` | decimal digits; non-finite floats are rejected |
//! | `Bool` | the dialect's true/false literal |
//! | `DateTime` | quoted, dialect date format |
//! | `Null` | `null` |
//! | `Record` | never; an error |

mod dialect;
mod error;
mod firebird;
mod pagination;
mod sql_type;
mod sqlite;
mod value;

pub use dialect::{quote_standard, quote_text, Dialect, DialectKind, TrimSide};
pub use error::{DialectError, Result};
pub use firebird::FirebirdDialect;
pub use pagination::RowWindow;
pub use sql_type::SqlType;
pub use sqlite::SqliteDialect;
pub use value::{Number, Value};
