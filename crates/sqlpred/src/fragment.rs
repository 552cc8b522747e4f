//! Intermediate results of visiting a node.
//!
//! Every node resolves either to a raw host [`Value`] (still foldable, not
//! yet quoted) or to an [`SqlFragment`] (already SQL, never re-quoted).
//! Constant booleans and `null` keep their own variants so later rewrites
//! can recognise them without re-reading rendered text.

use sqlpred_dialect::{Dialect, Value};

use crate::traits::EnumType;

/// What a node visit produced.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Resolved {
    Value(Value),
    Sql(SqlFragment),
}

/// Text that is already valid SQL.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SqlFragment {
    /// A quoted column reference.
    Column(String),
    /// A quoted column reference holding enum members.
    EnumColumn {
        column: String,
        enum_type: &'static EnumType,
    },
    /// Any composed SQL text.
    Raw(String),
    /// A constant boolean; renders as its sentinel.
    ConstantBoolean(bool),
    /// The `null` literal.
    Null,
}

impl SqlFragment {
    pub(crate) fn render<'a>(&'a self, literals: &'a BoolLiterals) -> &'a str {
        match self {
            SqlFragment::Column(text) | SqlFragment::Raw(text) => text.as_str(),
            SqlFragment::EnumColumn { column, .. } => column.as_str(),
            SqlFragment::ConstantBoolean(b) => literals.sentinel(*b),
            SqlFragment::Null => "null",
        }
    }

    /// Column references and composed SQL; the things a column method can wrap.
    pub(crate) fn is_column_like(&self) -> bool {
        matches!(
            self,
            SqlFragment::Column(_) | SqlFragment::EnumColumn { .. } | SqlFragment::Raw(_)
        )
    }
}

/// Boolean spellings of one dialect, derived once per compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BoolLiterals {
    true_literal: String,
    false_literal: String,
    true_sentinel: String,
    false_sentinel: String,
}

impl BoolLiterals {
    pub(crate) fn new(dialect: &dyn Dialect) -> Self {
        let t = dialect.true_literal();
        let f = dialect.false_literal();
        BoolLiterals {
            true_sentinel: format!("({}={})", t, t),
            false_sentinel: format!("({}={})", t, f),
            true_literal: t,
            false_literal: f,
        }
    }

    /// The plain literal, e.g. `1`.
    pub(crate) fn literal(&self, b: bool) -> &str {
        if b {
            &self.true_literal
        } else {
            &self.false_literal
        }
    }

    /// The sentinel, e.g. `(1=1)` / `(1=0)`.
    pub(crate) fn sentinel(&self, b: bool) -> &str {
        if b {
            &self.true_sentinel
        } else {
            &self.false_sentinel
        }
    }
}
