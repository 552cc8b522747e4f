//! Binary operators for predicate expressions.
//!
//! The [`BinaryOp`] enum is the closed set of operators the compiler
//! translates. Operators arriving by name (from a query-builder layer) go
//! through [`BinaryOp::from_symbol`], which refuses anything it does not
//! know rather than passing it through to SQL.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::{CompileError, Result};

/// Binary operator of an expression node.
///
/// Operators fall into three groups:
/// - **Logical**: `And`, `Or`, combined as SQL boolean connectives
/// - **Comparison**: `Eq`, `Ne`, `Gt`, `Gte`, `Lt`, `Lte`
/// - **Value**: `Add`, `Sub`, `Mul`, `Div`, `Mod`, `Coalesce`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Logical operators
    /// Logical conjunction.
    And,
    /// Logical disjunction.
    Or,

    // Comparison operators
    /// Equal. Rendered `is` against `null`.
    Eq,
    /// Not equal. Rendered `is not` against `null`.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,

    // Value operators
    /// Addition (concatenation for text when folded).
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Remainder, rendered as `MOD(l,r)`.
    Mod,
    /// First non-null operand, rendered as `COALESCE(l,r)`.
    Coalesce,
}

impl BinaryOp {
    /// Returns `true` for `And` and `Or`.
    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    /// Returns `true` for `Eq` and `Ne`.
    pub fn is_equality(self) -> bool {
        matches!(self, BinaryOp::Eq | BinaryOp::Ne)
    }

    /// Returns `true` if the operator renders as `NAME(left,right)`.
    pub fn is_function(self) -> bool {
        matches!(self, BinaryOp::Mod | BinaryOp::Coalesce)
    }

    /// Evaluates a comparison given an ordering result.
    ///
    /// Used when folding constant comparisons. Non-comparison operators
    /// never hold.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            BinaryOp::Eq => ordering == Ordering::Equal,
            BinaryOp::Ne => ordering != Ordering::Equal,
            BinaryOp::Gt => ordering == Ordering::Greater,
            BinaryOp::Gte => ordering != Ordering::Less,
            BinaryOp::Lt => ordering == Ordering::Less,
            BinaryOp::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// The SQL spelling of this operator.
    pub fn as_sql(self) -> &'static str {
        match self {
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Gt => ">",
            BinaryOp::Gte => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Lte => "<=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "MOD",
            BinaryOp::Coalesce => "COALESCE",
        }
    }

    /// Parses an operator from its SQL or host-language spelling.
    ///
    /// Word operators are case-insensitive. Unknown symbols are
    /// [`CompileError::UnsupportedOperator`].
    pub fn from_symbol(symbol: &str) -> Result<BinaryOp> {
        let op = match symbol {
            "&&" => BinaryOp::And,
            "||" => BinaryOp::Or,
            "=" | "==" => BinaryOp::Eq,
            "<>" | "!=" => BinaryOp::Ne,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::Gte,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::Lte,
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Mod,
            "??" => BinaryOp::Coalesce,
            word => match word.to_ascii_uppercase().as_str() {
                "AND" => BinaryOp::And,
                "OR" => BinaryOp::Or,
                "MOD" => BinaryOp::Mod,
                "COALESCE" => BinaryOp::Coalesce,
                _ => return Err(CompileError::UnsupportedOperator(symbol.to_string())),
            },
        };
        Ok(op)
    }
}

impl FromStr for BinaryOp {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self> {
        BinaryOp::from_symbol(s)
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_groups() {
        assert!(BinaryOp::And.is_logical());
        assert!(BinaryOp::Or.is_logical());
        assert!(!BinaryOp::Eq.is_logical());

        assert!(BinaryOp::Eq.is_equality());
        assert!(BinaryOp::Ne.is_equality());
        assert!(!BinaryOp::Gt.is_equality());

        assert!(BinaryOp::Mod.is_function());
        assert!(BinaryOp::Coalesce.is_function());
        assert!(!BinaryOp::Div.is_function());
    }

    #[test]
    fn op_eval_ordering() {
        assert!(BinaryOp::Eq.eval_ordering(Ordering::Equal));
        assert!(!BinaryOp::Eq.eval_ordering(Ordering::Less));

        assert!(BinaryOp::Ne.eval_ordering(Ordering::Greater));
        assert!(!BinaryOp::Ne.eval_ordering(Ordering::Equal));

        assert!(BinaryOp::Gt.eval_ordering(Ordering::Greater));
        assert!(!BinaryOp::Gt.eval_ordering(Ordering::Equal));

        assert!(BinaryOp::Gte.eval_ordering(Ordering::Equal));
        assert!(!BinaryOp::Gte.eval_ordering(Ordering::Less));

        assert!(BinaryOp::Lt.eval_ordering(Ordering::Less));
        assert!(!BinaryOp::Lt.eval_ordering(Ordering::Greater));

        assert!(BinaryOp::Lte.eval_ordering(Ordering::Less));
        assert!(!BinaryOp::Lte.eval_ordering(Ordering::Greater));

        // Not an ordering-based operator
        assert!(!BinaryOp::Add.eval_ordering(Ordering::Equal));
    }

    #[test]
    fn from_symbol_accepts_both_spellings() {
        assert_eq!(BinaryOp::from_symbol("==").unwrap(), BinaryOp::Eq);
        assert_eq!(BinaryOp::from_symbol("=").unwrap(), BinaryOp::Eq);
        assert_eq!(BinaryOp::from_symbol("!=").unwrap(), BinaryOp::Ne);
        assert_eq!(BinaryOp::from_symbol("<>").unwrap(), BinaryOp::Ne);
        assert_eq!(BinaryOp::from_symbol("&&").unwrap(), BinaryOp::And);
        assert_eq!(BinaryOp::from_symbol("and").unwrap(), BinaryOp::And);
        assert_eq!(BinaryOp::from_symbol("Or").unwrap(), BinaryOp::Or);
        assert_eq!(BinaryOp::from_symbol("%").unwrap(), BinaryOp::Mod);
        assert_eq!(BinaryOp::from_symbol("mod").unwrap(), BinaryOp::Mod);
        assert_eq!(BinaryOp::from_symbol("??").unwrap(), BinaryOp::Coalesce);
        assert_eq!("coalesce".parse::<BinaryOp>().unwrap(), BinaryOp::Coalesce);
    }

    #[test]
    fn from_symbol_rejects_unknown() {
        assert_eq!(
            BinaryOp::from_symbol("^").unwrap_err(),
            CompileError::UnsupportedOperator("^".to_string())
        );
        assert!(BinaryOp::from_symbol("<<").is_err());
        assert!(BinaryOp::from_symbol("LIKE").is_err());
        assert!(BinaryOp::from_symbol("").is_err());
    }

    #[test]
    fn op_display() {
        assert_eq!(BinaryOp::Ne.to_string(), "<>");
        assert_eq!(BinaryOp::And.to_string(), "AND");
        assert_eq!(BinaryOp::Mod.to_string(), "MOD");
    }
}
