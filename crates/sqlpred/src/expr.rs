//! Expression trees for query predicates.
//!
//! An [`Expr`] is the immutable tree a query-builder hands to the
//! compiler. The builder methods here are a thin convenience layer; any
//! layer that can produce the node variants can drive the compiler.

use sqlpred_dialect::Value;

use crate::error::Result;
use crate::op::BinaryOp;
use crate::traits::{EnumType, SqlEnum};

/// A node of a predicate expression tree.
///
/// # Example
///
/// ```
/// use sqlpred::{col, lit, Expr};
///
/// // name = 'bob' AND age >= 21
/// let expr = col("name").equals("bob").and(col("age").gte(21));
///
/// // A captured host value folds away before reaching SQL
/// let limit = Expr::lit(sqlpred::Value::record([("min_age", 21)])).member("min_age");
/// let same = col("age").gte(limit);
/// # let _ = (expr, same);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The row being filtered. Members of it are columns.
    Parameter,
    /// A host literal.
    Constant(Value),
    /// Field access on a sub-expression.
    Member { object: Box<Expr>, member: Member },
    /// Binary operation.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Method call on a receiver.
    Call {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// Boolean negation.
    Not(Box<Expr>),
}

/// Field identifier of a member access.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// Field or column name.
    pub name: String,
    /// Set when the field holds enum members.
    pub enum_type: Option<&'static EnumType>,
}

impl Member {
    /// Creates an untyped member.
    pub fn new(name: impl Into<String>) -> Self {
        Member {
            name: name.into(),
            enum_type: None,
        }
    }

    /// Creates a member holding members of `E`.
    pub fn of_enum<E: SqlEnum>(name: impl Into<String>) -> Self {
        Member {
            name: name.into(),
            enum_type: Some(E::enum_type()),
        }
    }
}

impl Expr {
    // ========================================================================
    // Leaves
    // ========================================================================

    /// A column of the filtered row.
    pub fn column(name: impl Into<String>) -> Expr {
        Expr::Parameter.member_of(Member::new(name))
    }

    /// A column holding members of enum `E`.
    pub fn enum_column<E: SqlEnum>(name: impl Into<String>) -> Expr {
        Expr::Parameter.member_of(Member::of_enum::<E>(name))
    }

    /// A host literal.
    pub fn lit(value: impl Into<Value>) -> Expr {
        Expr::Constant(value.into())
    }

    /// The `null` literal.
    pub fn null() -> Expr {
        Expr::Constant(Value::Null)
    }

    /// An enum member, as its ordinal.
    pub fn enum_lit<E: SqlEnum>(member: &E) -> Expr {
        Expr::Constant(Value::from(member.ordinal()))
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Field access on this expression.
    pub fn member(self, name: impl Into<String>) -> Expr {
        self.member_of(Member::new(name))
    }

    fn member_of(self, member: Member) -> Expr {
        Expr::Member {
            object: Box::new(self),
            member,
        }
    }

    /// A binary node.
    pub fn binary(op: BinaryOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// A binary node whose operator arrives by name.
    ///
    /// Fails with [`CompileError::UnsupportedOperator`](crate::CompileError::UnsupportedOperator)
    /// for names outside [`BinaryOp::from_symbol`].
    pub fn binary_named(
        symbol: &str,
        left: impl Into<Expr>,
        right: impl Into<Expr>,
    ) -> Result<Expr> {
        Ok(Expr::binary(BinaryOp::from_symbol(symbol)?, left, right))
    }

    /// A method call on this expression.
    pub fn call(self, method: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call {
            receiver: Box::new(self),
            method: method.into(),
            args,
        }
    }

    // ========================================================================
    // Comparison shorthands
    // ========================================================================

    /// `self = rhs`.
    pub fn equals(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Eq, self, rhs)
    }

    /// `self <> rhs`.
    pub fn not_equals(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Ne, self, rhs)
    }

    /// `self > rhs`.
    pub fn gt(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Gt, self, rhs)
    }

    /// `self >= rhs`.
    pub fn gte(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Gte, self, rhs)
    }

    /// `self < rhs`.
    pub fn lt(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Lt, self, rhs)
    }

    /// `self <= rhs`.
    pub fn lte(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Lte, self, rhs)
    }

    /// `self is null`.
    pub fn is_null(self) -> Expr {
        self.equals(Expr::null())
    }

    /// `self is not null`.
    pub fn is_not_null(self) -> Expr {
        self.not_equals(Expr::null())
    }

    // ========================================================================
    // Logical shorthands
    // ========================================================================

    /// `self AND rhs`.
    pub fn and(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::And, self, rhs)
    }

    /// `self OR rhs`.
    pub fn or(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Or, self, rhs)
    }

    // ========================================================================
    // Arithmetic shorthands
    // ========================================================================

    /// `self + rhs`.
    pub fn add(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Add, self, rhs)
    }

    /// `self - rhs`.
    pub fn sub(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Sub, self, rhs)
    }

    /// `self * rhs`.
    pub fn mul(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Mul, self, rhs)
    }

    /// `self / rhs`.
    pub fn div(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Div, self, rhs)
    }

    /// `MOD(self, rhs)`.
    pub fn modulo(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Mod, self, rhs)
    }

    /// `COALESCE(self, rhs)`.
    pub fn coalesce(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Coalesce, self, rhs)
    }

    // ========================================================================
    // String method shorthands
    // ========================================================================

    /// `Trim()` on this expression.
    pub fn trim(self) -> Expr {
        self.call("Trim", Vec::new())
    }

    /// `TrimStart()` on this expression.
    pub fn trim_start(self) -> Expr {
        self.call("TrimStart", Vec::new())
    }

    /// `TrimEnd()` on this expression.
    pub fn trim_end(self) -> Expr {
        self.call("TrimEnd", Vec::new())
    }

    /// `ToUpper()` on this expression.
    pub fn to_upper(self) -> Expr {
        self.call("ToUpper", Vec::new())
    }

    /// `ToLower()` on this expression.
    pub fn to_lower(self) -> Expr {
        self.call("ToLower", Vec::new())
    }

    /// `StartsWith(prefix)` on this expression.
    pub fn starts_with(self, prefix: &str) -> Expr {
        self.call("StartsWith", vec![Expr::lit(prefix)])
    }

    /// `EndsWith(suffix)` on this expression.
    pub fn ends_with(self, suffix: &str) -> Expr {
        self.call("EndsWith", vec![Expr::lit(suffix)])
    }

    /// `Contains(needle)` on this expression.
    pub fn contains(self, needle: &str) -> Expr {
        self.call("Contains", vec![Expr::lit(needle)])
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The member, if this is a column of the filtered row.
    pub fn as_column(&self) -> Option<&Member> {
        match self {
            Expr::Member { object, member } if matches!(**object, Expr::Parameter) => Some(member),
            _ => None,
        }
    }
}

impl std::ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Constant(value)
    }
}

macro_rules! expr_from_literal {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Expr {
                fn from(v: $t) -> Self {
                    Expr::Constant(Value::from(v))
                }
            }
        )*
    };
}

expr_from_literal!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, &str, String);

/// A column of the filtered row. Shorthand for [`Expr::column`].
pub fn col(name: impl Into<String>) -> Expr {
    Expr::column(name)
}

/// A column holding members of `E`. Shorthand for [`Expr::enum_column`].
pub fn enum_col<E: SqlEnum>(name: impl Into<String>) -> Expr {
    Expr::enum_column::<E>(name)
}

/// A host literal. Shorthand for [`Expr::lit`].
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::lit(value)
}
