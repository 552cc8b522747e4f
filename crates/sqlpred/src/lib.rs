//! sqlpred - compile typed predicate trees into dialect-correct SQL.
//!
//! A query-builder layer describes a filter as an expression tree
//! ([`Expr`]). sqlpred turns that tree into the text of a `WHERE` clause
//! and, separately, a pagination clause, for one SQL [`Dialect`]. Along
//! the way it:
//!
//! - keeps SQL's three-valued logic (`= null` becomes `is null`)
//! - folds column-free sub-expressions in the host before emitting SQL
//! - tells column references apart from ordinary values
//! - stores enum members by name while comparing them by ordinal
//! - adapts quoting, boolean literals and pagination syntax per dialect
//!
//! # Quick Start
//!
//! ```rust
//! use sqlpred::{col, lit, Compiler, FirebirdDialect, SqliteDialect, Value};
//!
//! let filter = lit(Value::record([("min_age", 18)]));
//! let expr = col("name").starts_with("A")
//!     .and(col("age").gte(filter.member("min_age")))
//!     .and(col("deleted_at").is_null());
//!
//! let firebird = Compiler::new(&FirebirdDialect);
//! assert_eq!(
//!     firebird.compile(&expr).unwrap(),
//!     "((\"name\" like 'A%' AND (\"age\" >= 18)) AND (\"deleted_at\" is null))"
//! );
//! assert_eq!(firebird.compile_pagination(Some(20), Some(10)).unwrap(), "ROWS 21 TO 30");
//!
//! let sqlite = Compiler::new(&SqliteDialect);
//! assert_eq!(sqlite.compile_pagination(Some(20), Some(10)).unwrap(), "LIMIT 10 OFFSET 20");
//! ```
//!
//! # Constant Predicates
//!
//! A predicate that folds to a constant renders as a sentinel built from
//! the dialect's boolean literals, `(1=1)` for true and `(1=0)` for
//! false, so it can still be combined with `AND`/`OR`:
//!
//! ```rust
//! use sqlpred::{col, lit, Compiler, FirebirdDialect};
//!
//! let compiler = Compiler::new(&FirebirdDialect);
//! assert_eq!(compiler.compile(&lit(1).lt(2)).unwrap(), "(1=1)");
//! assert_eq!(
//!     compiler.compile(&col("age").gt(3).or(false)).unwrap(),
//!     "((\"age\" > 3) OR (1=0))"
//! );
//! ```
//!
//! # Supported Nodes
//!
//! | Node | Translation |
//! |------|-------------|
//! | Column | `"name"` (a bare boolean column is `"name"=1`) |
//! | `= <>` | `(l = r)`, `(l is null)`, `(l is not null)` |
//! | `> >= < <=` `+ - * /` | `(l op r)` |
//! | `MOD` `COALESCE` | `MOD(l,r)`, `COALESCE(l,r)` |
//! | `AND` `OR` | `(l AND r)`, `(l OR r)` |
//! | `Not` | `NOT x`, or `"name"=0` for a bare column |
//! | `Trim` `TrimStart` `TrimEnd` | dialect trim syntax |
//! | `ToUpper` `ToLower` | `upper(x)`, `lower(x)` |
//! | `StartsWith` `EndsWith` `Contains` | `x like 'p%'`, `'%p'`, `'%p%'` |
//!
//! Anything else is an error rather than a guess.
//!
//! # Active Dialect
//!
//! [`compile`], [`compile_pagination`] and [`SqlQuery::compile`] use the
//! process-wide active dialect; see [`set_active_dialect`] and
//! [`CompilerConfig`].

mod compiler;
mod config;
mod error;
mod expr;
mod fold;
mod fragment;
mod op;
mod query;
mod traits;

pub use compiler::Compiler;
pub use config::{
    active_dialect, reset_active_dialect, set_active_dialect, CompilerConfig, DIALECT_ENV,
};
pub use error::{CompileError, Result};
pub use expr::{col, enum_col, lit, Expr, Member};
pub use op::BinaryOp;
pub use query::{CompiledQuery, SqlQuery};
pub use traits::{EnumType, SqlEnum};

pub use sqlpred_dialect::{
    Dialect, DialectError, DialectKind, FirebirdDialect, Number, RowWindow, SqlType,
    SqliteDialect, TrimSide, Value,
};

// Derive macro, same name as the trait.
pub use sqlpred_macros::SqlEnum;

/// Compiles a predicate with the active dialect.
pub fn compile(expr: &Expr) -> Result<String> {
    Compiler::new(active_dialect().as_ref()).compile(expr)
}

/// Renders the pagination clause with the active dialect.
pub fn compile_pagination(skip: Option<i64>, limit: Option<i64>) -> Result<String> {
    Compiler::new(active_dialect().as_ref()).compile_pagination(skip, limit)
}
