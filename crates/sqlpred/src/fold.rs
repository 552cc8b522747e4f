//! Host evaluation of column-free sub-expressions.
//!
//! When both operands of a node resolved to raw values, the node has no
//! column dependency and is evaluated here instead of being emitted as
//! SQL. Evaluation is structural over [`Value`]s; nothing is generated or
//! executed.

use std::cmp::Ordering;

use sqlpred_dialect::{Number, Value};

use crate::error::{CompileError, Result};
use crate::op::BinaryOp;

/// Applies `op` to two host values.
///
/// Comparisons involving `null` are lifted: ordering comparisons are
/// false, `null = null` is true. Arithmetic with `null` yields `null`.
pub(crate) fn apply(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    match op {
        BinaryOp::And | BinaryOp::Or => logical(op, left, right),
        BinaryOp::Eq => equals(left, right).map(Value::Bool),
        BinaryOp::Ne => equals(left, right).map(|eq| Value::Bool(!eq)),
        BinaryOp::Gt | BinaryOp::Gte | BinaryOp::Lt | BinaryOp::Lte => compare(op, left, right),
        BinaryOp::Coalesce => Ok(if left.is_null() {
            right.clone()
        } else {
            left.clone()
        }),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            arithmetic(op, left, right)
        }
    }
}

/// Negates a host boolean.
pub(crate) fn not(value: &Value) -> Result<Value> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        other => Err(CompileError::Evaluation(format!(
            "cannot negate a {} value",
            other.type_name()
        ))),
    }
}

/// Reads a field of a captured record.
pub(crate) fn member(object: &Value, name: &str) -> Result<Value> {
    match object {
        Value::Record(_) => object
            .field(name)
            .cloned()
            .ok_or_else(|| CompileError::Evaluation(format!("record has no member '{}'", name))),
        Value::Null => Err(CompileError::Evaluation(format!(
            "member '{}' read from null",
            name
        ))),
        other => Err(CompileError::Evaluation(format!(
            "{} value has no member '{}'",
            other.type_name(),
            name
        ))),
    }
}

/// Calls a string method on a host value.
pub(crate) fn call(receiver: &Value, method: &str, args: &[Value]) -> Result<Value> {
    let s = match receiver {
        Value::Text(s) => s,
        Value::Null => {
            return Err(CompileError::Evaluation(format!(
                "method '{}' called on null",
                method
            )))
        }
        _ => return Err(CompileError::UnsupportedMethod(method.to_string())),
    };

    let result = match (method, args) {
        ("Trim", []) => Value::Text(s.trim().to_string()),
        ("TrimStart" | "LTrim", []) => Value::Text(s.trim_start().to_string()),
        ("TrimEnd" | "RTrim", []) => Value::Text(s.trim_end().to_string()),
        ("ToUpper", []) => Value::Text(s.to_uppercase()),
        ("ToLower", []) => Value::Text(s.to_lowercase()),
        ("StartsWith", [Value::Text(p)]) => Value::Bool(s.starts_with(p.as_str())),
        ("EndsWith", [Value::Text(p)]) => Value::Bool(s.ends_with(p.as_str())),
        ("Contains", [Value::Text(p)]) => Value::Bool(s.contains(p.as_str())),
        _ => return Err(CompileError::UnsupportedMethod(method.to_string())),
    };
    Ok(result)
}

fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> CompileError {
    CompileError::Evaluation(format!(
        "operator '{}' cannot combine {} and {}",
        op,
        left.type_name(),
        right.type_name()
    ))
}

fn logical(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    match (left.as_bool(), right.as_bool()) {
        (Some(a), Some(b)) if op == BinaryOp::And => Ok(Value::Bool(a && b)),
        (Some(a), Some(b)) => Ok(Value::Bool(a || b)),
        _ => Err(mismatch(op, left, right)),
    }
}

fn equals(left: &Value, right: &Value) -> Result<bool> {
    match (left, right) {
        (Value::Null, Value::Null) => Ok(true),
        (Value::Null, _) | (_, Value::Null) => Ok(false),
        (Value::Number(a), Value::Number(b)) => Ok(a.compare(*b) == Some(Ordering::Equal)),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Text(a), Value::Text(b)) => Ok(a == b),
        (Value::DateTime(a), Value::DateTime(b)) => Ok(a == b),
        _ => Err(mismatch(BinaryOp::Eq, left, right)),
    }
}

fn compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    let ordering = match (left, right) {
        (Value::Null, _) | (_, Value::Null) => return Ok(Value::Bool(false)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
        _ => return Err(mismatch(op, left, right)),
    };
    // NaN compares false
    Ok(Value::Bool(ordering.is_some_and(|o| op.eval_ordering(o))))
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
        (Value::Text(a), Value::Text(b)) if op == BinaryOp::Add => {
            Ok(Value::Text(format!("{}{}", a, b)))
        }
        (Value::Number(a), Value::Number(b)) => number_op(op, *a, *b).map(Value::Number),
        _ => Err(mismatch(op, left, right)),
    }
}

fn number_op(op: BinaryOp, a: Number, b: Number) -> Result<Number> {
    let division_by_zero = || CompileError::Evaluation("division by zero".to_string());

    if !a.is_integral() || !b.is_integral() {
        let (x, y) = (a.to_f64(), b.to_f64());
        let v = match op {
            BinaryOp::Add => x + y,
            BinaryOp::Sub => x - y,
            BinaryOp::Mul => x * y,
            BinaryOp::Div | BinaryOp::Mod if y == 0.0 => return Err(division_by_zero()),
            BinaryOp::Div => x / y,
            BinaryOp::Mod => x % y,
            _ => return Err(CompileError::UnsupportedOperator(op.to_string())),
        };
        return Ok(Number::F64(v));
    }

    let (x, y) = (wide(a), wide(b));
    let v = match op {
        BinaryOp::Add => x.checked_add(y),
        BinaryOp::Sub => x.checked_sub(y),
        BinaryOp::Mul => x.checked_mul(y),
        BinaryOp::Div | BinaryOp::Mod if y == 0 => return Err(division_by_zero()),
        BinaryOp::Div => x.checked_div(y),
        BinaryOp::Mod => x.checked_rem(y),
        _ => return Err(CompileError::UnsupportedOperator(op.to_string())),
    };

    let unsigned = matches!((a, b), (Number::U64(_), Number::U64(_)));
    v.and_then(|v| narrow(v, unsigned)).ok_or_else(|| {
        CompileError::Evaluation(format!("integer overflow in {} {} {}", a, op, b))
    })
}

fn wide(n: Number) -> i128 {
    match n {
        Number::I64(v) => i128::from(v),
        Number::U64(v) => i128::from(v),
        Number::F64(v) => v as i128,
    }
}

fn narrow(v: i128, unsigned: bool) -> Option<Number> {
    if unsigned {
        if let Ok(u) = u64::try_from(v) {
            return Some(Number::U64(u));
        }
    }
    i64::try_from(v).ok().map(Number::I64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64) -> Value {
        Value::from(v)
    }

    #[test]
    fn logical_operators() {
        let t = Value::Bool(true);
        let f = Value::Bool(false);
        assert_eq!(apply(BinaryOp::And, &t, &f).unwrap(), f);
        assert_eq!(apply(BinaryOp::And, &t, &t).unwrap(), t);
        assert_eq!(apply(BinaryOp::Or, &f, &t).unwrap(), t);
        assert_eq!(apply(BinaryOp::Or, &f, &f).unwrap(), f);
        assert!(apply(BinaryOp::And, &t, &n(1)).is_err());
    }

    #[test]
    fn equality_handles_null_and_mixed_numbers() {
        assert_eq!(apply(BinaryOp::Eq, &Value::Null, &Value::Null).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::Eq, &n(1), &Value::Null).unwrap(), Value::Bool(false));
        assert_eq!(apply(BinaryOp::Ne, &n(1), &Value::Null).unwrap(), Value::Bool(true));
        assert_eq!(
            apply(BinaryOp::Eq, &n(2), &Value::from(2.0f64)).unwrap(),
            Value::Bool(true)
        );
        assert!(apply(BinaryOp::Eq, &n(1), &Value::from("1")).is_err());
    }

    #[test]
    fn ordering_comparisons() {
        assert_eq!(apply(BinaryOp::Lt, &n(1), &n(2)).unwrap(), Value::Bool(true));
        assert_eq!(apply(BinaryOp::Gte, &n(1), &n(2)).unwrap(), Value::Bool(false));
        assert_eq!(
            apply(BinaryOp::Gt, &Value::from("b"), &Value::from("a")).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(apply(BinaryOp::Gt, &n(1), &Value::Null).unwrap(), Value::Bool(false));
        assert_eq!(
            apply(BinaryOp::Lt, &Value::from(f64::NAN), &n(1)).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn integer_arithmetic() {
        assert_eq!(apply(BinaryOp::Add, &n(2), &n(3)).unwrap(), n(5));
        assert_eq!(apply(BinaryOp::Sub, &n(2), &n(3)).unwrap(), n(-1));
        assert_eq!(apply(BinaryOp::Mul, &n(4), &n(3)).unwrap(), n(12));
        assert_eq!(apply(BinaryOp::Div, &n(7), &n(2)).unwrap(), n(3));
        assert_eq!(apply(BinaryOp::Mod, &n(7), &n(2)).unwrap(), n(1));
        assert_eq!(
            apply(BinaryOp::Add, &Value::from(2u32), &Value::from(3u32)).unwrap(),
            Value::from(5u64)
        );
    }

    #[test]
    fn float_arithmetic() {
        assert_eq!(
            apply(BinaryOp::Div, &n(1), &Value::from(4.0f64)).unwrap(),
            Value::from(0.25f64)
        );
    }

    #[test]
    fn division_by_zero_fails() {
        assert!(apply(BinaryOp::Div, &n(1), &n(0)).is_err());
        assert!(apply(BinaryOp::Mod, &n(1), &n(0)).is_err());
        assert!(apply(BinaryOp::Div, &Value::from(1.0f64), &Value::from(0.0f64)).is_err());
    }

    #[test]
    fn overflow_fails() {
        let err = apply(BinaryOp::Add, &n(i64::MAX), &n(1)).unwrap_err();
        assert!(matches!(err, CompileError::Evaluation(_)));
    }

    #[test]
    fn null_propagates_through_arithmetic() {
        assert_eq!(apply(BinaryOp::Add, &n(1), &Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn coalesce_picks_first_non_null() {
        assert_eq!(apply(BinaryOp::Coalesce, &Value::Null, &n(4)).unwrap(), n(4));
        assert_eq!(apply(BinaryOp::Coalesce, &n(3), &n(4)).unwrap(), n(3));
    }

    #[test]
    fn text_concatenation() {
        assert_eq!(
            apply(BinaryOp::Add, &Value::from("ab"), &Value::from("cd")).unwrap(),
            Value::from("abcd")
        );
        assert!(apply(BinaryOp::Sub, &Value::from("ab"), &Value::from("cd")).is_err());
    }

    #[test]
    fn record_members() {
        let rec = Value::record([("age", 30i64)]);
        assert_eq!(member(&rec, "age").unwrap(), n(30));
        assert!(member(&rec, "name").is_err());
        assert!(member(&Value::Null, "age").is_err());
        assert!(member(&n(1), "age").is_err());
    }

    #[test]
    fn string_methods() {
        let s = Value::from("  Hi  ");
        assert_eq!(call(&s, "Trim", &[]).unwrap(), Value::from("Hi"));
        assert_eq!(call(&s, "TrimStart", &[]).unwrap(), Value::from("Hi  "));
        assert_eq!(call(&s, "RTrim", &[]).unwrap(), Value::from("  Hi"));
        assert_eq!(call(&Value::from("ab"), "ToUpper", &[]).unwrap(), Value::from("AB"));
        assert_eq!(
            call(&Value::from("abc"), "StartsWith", &[Value::from("ab")]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            call(&s, "Reverse", &[]).unwrap_err(),
            CompileError::UnsupportedMethod("Reverse".to_string())
        );
        assert!(call(&Value::Null, "Trim", &[]).is_err());
    }

    #[test]
    fn negation() {
        assert_eq!(not(&Value::Bool(true)).unwrap(), Value::Bool(false));
        assert!(not(&n(1)).is_err());
    }
}
