//! Query builder.
//!
//! [`SqlQuery`] collects predicates and a row window with a fluent API,
//! then compiles them in one go into a [`CompiledQuery`].

use sqlpred_dialect::Dialect;

use crate::compiler::Compiler;
use crate::config::active_dialect;
use crate::error::Result;
use crate::expr::Expr;

/// A filter plus pagination, ready to be compiled.
///
/// Filters are AND-combined in the order they were added.
///
/// # Example
///
/// ```
/// use sqlpred::{col, FirebirdDialect, SqlQuery};
///
/// let compiled = SqlQuery::new()
///     .filter(col("status").equals("open"))
///     .filter(col("priority").gte(5))
///     .skip(20)
///     .limit(10)
///     .build()
///     .to_sql(&FirebirdDialect)
///     .unwrap();
///
/// assert_eq!(
///     compiled.where_clause,
///     "((\"status\" = 'open') AND (\"priority\" >= 5))"
/// );
/// assert_eq!(compiled.pagination, "ROWS 21 TO 30");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlQuery {
    filters: Vec<Expr>,
    skip: Option<i64>,
    limit: Option<i64>,
}

/// The SQL produced for a [`SqlQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledQuery {
    /// The predicate, without the `WHERE` keyword. Empty when the query
    /// has no filters.
    pub where_clause: String,
    /// The pagination clause. Empty when no skip was set.
    pub pagination: String,
}

impl SqlQuery {
    /// Creates an empty query.
    ///
    /// An empty query has no predicate and no pagination.
    pub fn new() -> Self {
        SqlQuery::default()
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Adds a predicate. All predicates must hold.
    pub fn filter(mut self, expr: impl Into<Expr>) -> Self {
        self.filters.push(expr.into());
        self
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// Sets the number of rows to skip.
    ///
    /// Negative values are accepted here and rejected at compile time.
    pub fn skip(mut self, n: i64) -> Self {
        self.skip = Some(n);
        self
    }

    /// Sets the maximum number of rows.
    ///
    /// Only takes effect together with [`skip`](SqlQuery::skip).
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    // ========================================================================
    // Finalization
    // ========================================================================

    /// Finalizes the builder.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the predicates in insertion order.
    pub fn filters(&self) -> &[Expr] {
        &self.filters
    }

    /// Returns the skip count, if set.
    pub fn get_skip(&self) -> Option<i64> {
        self.skip
    }

    /// Returns the limit, if set.
    pub fn get_limit(&self) -> Option<i64> {
        self.limit
    }

    /// Returns `true` if the query has no predicates and no pagination.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.skip.is_none() && self.limit.is_none()
    }

    /// The combined predicate, if any filter was added.
    pub fn predicate(&self) -> Option<Expr> {
        self.filters.iter().cloned().reduce(|acc, expr| acc.and(expr))
    }

    // ========================================================================
    // Compilation
    // ========================================================================

    /// Compiles the query for `dialect`.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> Result<CompiledQuery> {
        let compiler = Compiler::new(dialect);
        let where_clause = match self.predicate() {
            Some(expr) => compiler.compile(&expr)?,
            None => String::new(),
        };
        let pagination = compiler.compile_pagination(self.skip, self.limit)?;
        Ok(CompiledQuery {
            where_clause,
            pagination,
        })
    }

    /// Compiles the query for the active dialect.
    pub fn compile(&self) -> Result<CompiledQuery> {
        self.to_sql(active_dialect().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;
    use crate::expr::col;
    use sqlpred_dialect::{FirebirdDialect, SqliteDialect};

    #[test]
    fn empty_query() {
        let query = SqlQuery::new().build();
        assert!(query.is_empty());
        assert!(query.predicate().is_none());
        assert_eq!(query.to_sql(&FirebirdDialect).unwrap(), CompiledQuery::default());
    }

    #[test]
    fn single_filter_is_not_wrapped() {
        let compiled = SqlQuery::new()
            .filter(col("a").gt(1))
            .to_sql(&FirebirdDialect)
            .unwrap();
        assert_eq!(compiled.where_clause, "(\"a\" > 1)");
        assert_eq!(compiled.pagination, "");
    }

    #[test]
    fn filters_combine_left_to_right() {
        let query = SqlQuery::new()
            .filter(col("a").gt(1))
            .filter(col("b").lt(2))
            .filter(col("c").is_null());
        assert_eq!(
            query.predicate().unwrap(),
            col("a").gt(1).and(col("b").lt(2)).and(col("c").is_null())
        );
        assert_eq!(
            query.to_sql(&FirebirdDialect).unwrap().where_clause,
            "(((\"a\" > 1) AND (\"b\" < 2)) AND (\"c\" is null))"
        );
    }

    #[test]
    fn bare_boolean_filter() {
        let compiled = SqlQuery::new()
            .filter(col("active"))
            .to_sql(&FirebirdDialect)
            .unwrap();
        assert_eq!(compiled.where_clause, "\"active\"=1");
    }

    #[test]
    fn getters() {
        let query = SqlQuery::new().filter(col("a").gt(1)).skip(5).limit(10).build();
        assert_eq!(query.filters().len(), 1);
        assert_eq!(query.get_skip(), Some(5));
        assert_eq!(query.get_limit(), Some(10));
        assert!(!query.is_empty());
        assert!(!SqlQuery::new().limit(3).is_empty());
    }

    #[test]
    fn pagination_per_dialect() {
        let query = SqlQuery::new().skip(10).limit(5);
        assert_eq!(query.to_sql(&FirebirdDialect).unwrap().pagination, "ROWS 11 TO 15");
        assert_eq!(query.to_sql(&SqliteDialect).unwrap().pagination, "LIMIT 5 OFFSET 10");
    }

    #[test]
    fn invalid_pagination_fails_whole_query() {
        let err = SqlQuery::new()
            .filter(col("a").gt(1))
            .skip(-3)
            .to_sql(&FirebirdDialect)
            .unwrap_err();
        assert!(err.is_invalid_pagination());
    }

    #[test]
    fn predicate_errors_propagate() {
        let err = SqlQuery::new()
            .filter(col("a").call("Reverse", vec![]).equals("x"))
            .to_sql(&FirebirdDialect)
            .unwrap_err();
        assert_eq!(err, CompileError::UnsupportedMethod("Reverse".to_string()));
    }
}
