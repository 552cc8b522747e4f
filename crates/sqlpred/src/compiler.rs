//! The expression-tree-to-SQL compiler.
//!
//! [`Compiler`] walks an [`Expr`] bottom-up. Each node resolves to either
//! a raw host value or an SQL fragment, and parent nodes combine their
//! children according to which of the two they got:
//!
//! - two raw values fold in the host (no SQL is emitted for them)
//! - a raw value next to a fragment is quoted by the dialect
//! - two fragments are composed as SQL text
//!
//! Constant booleans stay tagged until the very end, so `AND`/`OR` can
//! combine them as sentinels (`(1=1)`) while `=`/`<>` can collapse them
//! back to the plain literal (`1`).

use sqlpred_dialect::{Dialect, SqlType, TrimSide, Value};

use crate::error::{CompileError, Result};
use crate::expr::{Expr, Member};
use crate::fold;
use crate::fragment::{BoolLiterals, Resolved, SqlFragment};
use crate::op::BinaryOp;
use crate::traits::EnumType;

/// Compiles predicate trees for one dialect.
///
/// A compiler holds no state between calls: compiling the same tree twice
/// gives byte-identical output, and one compiler can be shared across
/// threads.
///
/// # Example
///
/// ```
/// use sqlpred::{col, Compiler, FirebirdDialect};
///
/// let compiler = Compiler::new(&FirebirdDialect);
///
/// let sql = compiler.compile(&col("name").equals("bob").and(col("age").gte(21))).unwrap();
/// assert_eq!(sql, "((\"name\" = 'bob') AND (\"age\" >= 21))");
///
/// assert_eq!(compiler.compile(&col("deleted_at").is_null()).unwrap(), "(\"deleted_at\" is null)");
/// assert_eq!(compiler.compile_pagination(Some(0), Some(4)).unwrap(), "ROWS 1 TO 4");
/// ```
#[derive(Debug)]
pub struct Compiler<'d> {
    dialect: &'d dyn Dialect,
    literals: BoolLiterals,
}

impl<'d> Compiler<'d> {
    /// Creates a compiler for `dialect`.
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Compiler {
            dialect,
            literals: BoolLiterals::new(dialect),
        }
    }

    /// The dialect this compiler renders for.
    pub fn dialect(&self) -> &'d dyn Dialect {
        self.dialect
    }

    /// Compiles a predicate into text for a `WHERE` clause.
    ///
    /// A bare column is read as `column = true`; a constant
    /// predicate renders as the dialect's true/false sentinel. A root that
    /// is `null` or folds to a non-boolean value is not a predicate and is
    /// rejected.
    pub fn compile(&self, expr: &Expr) -> Result<String> {
        let resolved = match expr.as_column() {
            Some(member) => self.column_is_true(member),
            _ => self.visit(expr)?,
        };

        let sql = match resolved {
            Resolved::Sql(SqlFragment::Null) => {
                return Err(CompileError::UnsupportedExpression(
                    "predicate is null, not a boolean".to_string(),
                ))
            }
            Resolved::Sql(fragment) => fragment.render(&self.literals).to_string(),
            Resolved::Value(Value::Bool(b)) => self.literals.sentinel(b).to_string(),
            Resolved::Value(other) => {
                return Err(CompileError::UnsupportedExpression(format!(
                    "predicate evaluates to a {} value, not a boolean",
                    other.type_name()
                )))
            }
        };

        tracing::debug!(dialect = self.dialect.name(), sql = %sql, "compiled predicate");
        Ok(sql)
    }

    /// Renders the pagination clause for `skip`/`limit`.
    pub fn compile_pagination(&self, skip: Option<i64>, limit: Option<i64>) -> Result<String> {
        let clause = self.dialect.pagination_clause(skip, limit)?;
        tracing::debug!(
            dialect = self.dialect.name(),
            ?skip,
            ?limit,
            clause = %clause,
            "compiled pagination"
        );
        Ok(clause)
    }

    fn visit(&self, expr: &Expr) -> Result<Resolved> {
        match expr {
            Expr::Parameter => Err(CompileError::UnsupportedExpression(
                "the filtered row cannot be used as a value".to_string(),
            )),
            Expr::Constant(value) => Ok(visit_constant(value)),
            Expr::Member { object, member } => self.visit_member(object, member),
            Expr::Binary { op, left, right } if op.is_logical() => {
                self.visit_logical(*op, left, right)
            }
            Expr::Binary { op, left, right } => self.visit_binary(*op, left, right),
            Expr::Call {
                receiver,
                method,
                args,
            } => self.visit_call(receiver, method, args),
            Expr::Not(inner) => self.visit_not(inner),
        }
    }

    fn visit_member(&self, object: &Expr, member: &Member) -> Result<Resolved> {
        if matches!(object, Expr::Parameter) {
            let column = self.dialect.quote_column(&member.name);
            let fragment = match member.enum_type {
                Some(enum_type) => SqlFragment::EnumColumn { column, enum_type },
                None => SqlFragment::Column(column),
            };
            return Ok(Resolved::Sql(fragment));
        }

        match self.visit(object)? {
            Resolved::Value(value) => fold::member(&value, &member.name).map(Resolved::Value),
            Resolved::Sql(_) => Err(CompileError::UnsupportedExpression(format!(
                "member '{}' read from an SQL expression",
                member.name
            ))),
        }
    }

    // ========================================================================
    // AND / OR
    // ========================================================================

    fn visit_logical(&self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<Resolved> {
        let left = self.visit_logical_operand(left)?;
        let right = self.visit_logical_operand(right)?;

        // Constant on both sides: the result is known now.
        if let (Some(a), Some(b)) = (constant_bool(&left), constant_bool(&right)) {
            let folded = fold::apply(op, &Value::Bool(a), &Value::Bool(b))?;
            return Ok(Resolved::Sql(SqlFragment::ConstantBoolean(
                folded.as_bool() == Some(true),
            )));
        }

        let (left, right) = match (left, right) {
            (Resolved::Value(a), Resolved::Value(b)) => {
                // Fails on non-boolean operands.
                let folded = fold::apply(op, &a, &b)?;
                return Ok(Resolved::Sql(SqlFragment::ConstantBoolean(
                    folded.as_bool() == Some(true),
                )));
            }
            (left, right) => (
                self.as_boolean_fragment(op, left)?,
                self.as_boolean_fragment(op, right)?,
            ),
        };

        Ok(Resolved::Sql(SqlFragment::Raw(format!(
            "({} {} {})",
            left.render(&self.literals),
            op.as_sql(),
            right.render(&self.literals)
        ))))
    }

    /// A bare column used as a predicate becomes `column=true`, enum
    /// columns included.
    fn visit_logical_operand(&self, expr: &Expr) -> Result<Resolved> {
        match expr.as_column() {
            Some(member) => Ok(self.column_is_true(member)),
            _ => self.visit(expr),
        }
    }

    fn column_is_true(&self, member: &Member) -> Resolved {
        Resolved::Sql(SqlFragment::Raw(format!(
            "{}={}",
            self.dialect.quote_column(&member.name),
            self.literals.literal(true)
        )))
    }

    fn as_boolean_fragment(&self, op: BinaryOp, resolved: Resolved) -> Result<SqlFragment> {
        match resolved {
            Resolved::Sql(fragment) => Ok(fragment),
            Resolved::Value(Value::Bool(b)) => Ok(SqlFragment::ConstantBoolean(b)),
            Resolved::Value(other) => Err(CompileError::UnsupportedExpression(format!(
                "operand of {} must be boolean, got {}",
                op,
                other.type_name()
            ))),
        }
    }

    // ========================================================================
    // Comparison, arithmetic, MOD / COALESCE
    // ========================================================================

    fn visit_binary(&self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<Resolved> {
        let left = self.visit(left)?;
        let right = self.visit(right)?;

        let (mut left, mut right) = match (left, right) {
            (Resolved::Sql(SqlFragment::EnumColumn { column, enum_type }), other) => (
                SqlFragment::EnumColumn { column, enum_type },
                self.enum_operand(enum_type, other)?,
            ),
            (other, Resolved::Sql(SqlFragment::EnumColumn { column, enum_type })) => (
                self.enum_operand(enum_type, other)?,
                SqlFragment::EnumColumn { column, enum_type },
            ),
            (Resolved::Value(a), Resolved::Value(b)) => {
                return fold::apply(op, &a, &b).map(Resolved::Value);
            }
            (left, right) => (self.quoted(left)?, self.quoted(right)?),
        };

        let mut sql_op = op.as_sql();
        if op.is_equality() {
            if matches!(left, SqlFragment::Null) && !matches!(right, SqlFragment::Null) {
                std::mem::swap(&mut left, &mut right);
            }
            if matches!(right, SqlFragment::Null) {
                sql_op = if op == BinaryOp::Eq { "is" } else { "is not" };
            } else {
                left = self.collapse_constant(left);
                right = self.collapse_constant(right);
            }
        }

        let l = left.render(&self.literals);
        let r = right.render(&self.literals);
        let sql = if op.is_function() {
            format!("{}({},{})", sql_op, l, r)
        } else {
            format!("({} {} {})", l, sql_op, r)
        };
        Ok(Resolved::Sql(SqlFragment::Raw(sql)))
    }

    /// Reinterprets the operand compared against an enum column.
    ///
    /// Raw ordinals become the quoted member name; other raw values quote
    /// with their own type; fragments are left alone.
    fn enum_operand(&self, enum_type: &'static EnumType, resolved: Resolved) -> Result<SqlFragment> {
        let value = match resolved {
            Resolved::Sql(fragment) => return Ok(fragment),
            Resolved::Value(value) => value,
        };

        match value.as_number().and_then(|n| n.as_i64()) {
            Some(ordinal) => {
                let name = enum_type
                    .name_of(ordinal)
                    .ok_or(CompileError::UnknownEnumOrdinal {
                        enum_name: enum_type.name(),
                        ordinal,
                    })?;
                let quoted = self
                    .dialect
                    .quote(&Value::Text(name.to_string()), SqlType::EnumName)?;
                Ok(SqlFragment::Raw(quoted))
            }
            None => self.quoted(Resolved::Value(value)),
        }
    }

    fn quoted(&self, resolved: Resolved) -> Result<SqlFragment> {
        match resolved {
            Resolved::Sql(fragment) => Ok(fragment),
            Resolved::Value(Value::Null) => Ok(SqlFragment::Null),
            Resolved::Value(value) => Ok(SqlFragment::Raw(self.dialect.quote_value(&value)?)),
        }
    }

    /// Inside `=`/`<>` a constant boolean is the plain literal, not a sentinel.
    fn collapse_constant(&self, fragment: SqlFragment) -> SqlFragment {
        match fragment {
            SqlFragment::ConstantBoolean(b) => SqlFragment::Raw(self.literals.literal(b).to_string()),
            other => other,
        }
    }

    // ========================================================================
    // Method calls
    // ========================================================================

    fn visit_call(&self, receiver: &Expr, method: &str, args: &[Expr]) -> Result<Resolved> {
        let receiver = self.visit(receiver)?;
        let args = args
            .iter()
            .map(|arg| self.visit(arg))
            .collect::<Result<Vec<_>>>()?;

        match receiver {
            Resolved::Sql(fragment) if fragment.is_column_like() => {
                let column = fragment.render(&self.literals);
                self.column_method(column, method, &args)
                    .map(|sql| Resolved::Sql(SqlFragment::Raw(sql)))
            }
            Resolved::Sql(_) => Err(CompileError::UnsupportedExpression(format!(
                "method '{}' called on a constant",
                method
            ))),
            Resolved::Value(value) => {
                let args = args
                    .into_iter()
                    .map(|arg| match arg {
                        Resolved::Value(v) => Ok(v),
                        Resolved::Sql(_) => Err(CompileError::UnsupportedExpression(format!(
                            "column passed as argument to '{}' on a constant",
                            method
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                fold::call(&value, method, &args).map(Resolved::Value)
            }
        }
    }

    fn column_method(&self, column: &str, method: &str, args: &[Resolved]) -> Result<String> {
        let side = match method {
            "Trim" => Some(TrimSide::Both),
            "TrimStart" | "LTrim" => Some(TrimSide::Leading),
            "TrimEnd" | "RTrim" => Some(TrimSide::Trailing),
            _ => None,
        };
        match side {
            Some(side) if args.is_empty() => Ok(self.dialect.trim_clause(side, column)),
            Some(_) => Err(CompileError::UnsupportedMethod(method.to_string())),
            None => self.generic_column_method(column, method, args),
        }
    }

    /// Column methods every dialect spells the same way.
    fn generic_column_method(&self, column: &str, method: &str, args: &[Resolved]) -> Result<String> {
        let pattern = |arg: &str| -> Result<String> {
            Ok(self.dialect.quote(&Value::Text(arg.to_string()), SqlType::Text)?)
        };

        match (method, args) {
            ("ToUpper", []) => Ok(format!("upper({})", column)),
            ("ToLower", []) => Ok(format!("lower({})", column)),
            ("StartsWith", [Resolved::Value(Value::Text(s))]) => {
                Ok(format!("{} like {}", column, pattern(&format!("{}%", s))?))
            }
            ("EndsWith", [Resolved::Value(Value::Text(s))]) => {
                Ok(format!("{} like {}", column, pattern(&format!("%{}", s))?))
            }
            ("Contains", [Resolved::Value(Value::Text(s))]) => {
                Ok(format!("{} like {}", column, pattern(&format!("%{}%", s))?))
            }
            _ => Err(CompileError::UnsupportedMethod(method.to_string())),
        }
    }

    // ========================================================================
    // NOT
    // ========================================================================

    fn visit_not(&self, inner: &Expr) -> Result<Resolved> {
        if let Some(member) = inner.as_column() {
            return Ok(Resolved::Sql(SqlFragment::Raw(format!(
                "{}={}",
                self.dialect.quote_column(&member.name),
                self.literals.literal(false)
            ))));
        }

        match self.visit(inner)? {
            Resolved::Value(value) => fold::not(&value).map(Resolved::Value),
            Resolved::Sql(SqlFragment::ConstantBoolean(b)) => {
                Ok(Resolved::Sql(SqlFragment::ConstantBoolean(!b)))
            }
            Resolved::Sql(SqlFragment::Null) => Err(CompileError::UnsupportedExpression(
                "cannot negate null".to_string(),
            )),
            Resolved::Sql(fragment) => Ok(Resolved::Sql(SqlFragment::Raw(format!(
                "NOT {}",
                fragment.render(&self.literals)
            )))),
        }
    }
}

fn visit_constant(value: &Value) -> Resolved {
    match value {
        Value::Null => Resolved::Sql(SqlFragment::Null),
        Value::Bool(b) => Resolved::Sql(SqlFragment::ConstantBoolean(*b)),
        other => Resolved::Value(other.clone()),
    }
}

fn constant_bool(resolved: &Resolved) -> Option<bool> {
    match resolved {
        Resolved::Value(Value::Bool(b)) | Resolved::Sql(SqlFragment::ConstantBoolean(b)) => Some(*b),
        _ => None,
    }
}
