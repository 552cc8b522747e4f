//! End-to-end compilation tests across dialects.

use std::sync::Arc;

use chrono::NaiveDate;
use serial_test::serial;
use sqlpred::{
    active_dialect, col, compile, compile_pagination, lit, reset_active_dialect,
    set_active_dialect, BinaryOp, CompileError, Compiler, CompilerConfig, Dialect, DialectError,
    EnumType, Expr, FirebirdDialect, Member, RowWindow, SqlEnum, SqlQuery, SqlType, SqliteDialect,
    Value, DIALECT_ENV,
};

// ============================================================================
// Test dialects
// ============================================================================

/// Spells booleans as quoted characters and pages with FETCH.
#[derive(Debug)]
struct CharBoolDialect;

impl Dialect for CharBoolDialect {
    fn name(&self) -> &'static str {
        "charbool"
    }

    fn quote(&self, value: &Value, sql_type: SqlType) -> sqlpred_dialect::Result<String> {
        sqlpred_dialect::quote_standard(value, sql_type, ("'T'", "'F'"), "%Y-%m-%d")
    }

    fn true_literal(&self) -> String {
        "'T'".to_string()
    }

    fn false_literal(&self) -> String {
        "'F'".to_string()
    }

    fn pagination_clause(&self, skip: Option<i64>, limit: Option<i64>) -> sqlpred_dialect::Result<String> {
        let Some(window) = RowWindow::resolve(skip, limit)? else {
            return Ok(String::new());
        };
        Ok(match window.limit() {
            Some(n) => format!("OFFSET {} ROWS FETCH NEXT {} ROWS ONLY", window.skip(), n),
            None => format!("OFFSET {} ROWS", window.skip()),
        })
    }
}

/// True and false share one spelling.
#[derive(Debug)]
struct CollidingDialect;

impl Dialect for CollidingDialect {
    fn name(&self) -> &'static str {
        "colliding"
    }

    fn quote(&self, value: &Value, sql_type: SqlType) -> sqlpred_dialect::Result<String> {
        sqlpred_dialect::quote_standard(value, sql_type, ("B", "B"), "%Y-%m-%d")
    }

    fn true_literal(&self) -> String {
        "B".to_string()
    }

    fn false_literal(&self) -> String {
        "B".to_string()
    }

    fn pagination_clause(&self, _skip: Option<i64>, _limit: Option<i64>) -> sqlpred_dialect::Result<String> {
        Ok(String::new())
    }
}

#[derive(Debug, Clone, Copy)]
enum Color {
    Red,
    Blue,
}

impl SqlEnum for Color {
    fn enum_type() -> &'static EnumType {
        static COLOR: EnumType = EnumType::new("Color", &[(0, "Red"), (1, "Blue")]);
        &COLOR
    }

    fn ordinal(&self) -> i64 {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
        }
    }
}

fn firebird(expr: &Expr) -> String {
    Compiler::new(&FirebirdDialect).compile(expr).unwrap()
}

// ============================================================================
// Constant booleans
// ============================================================================

#[test]
fn bare_constants_render_as_sentinels() {
    assert_eq!(firebird(&lit(true)), "(1=1)");
    assert_eq!(firebird(&lit(false)), "(1=0)");

    let chars = Compiler::new(&CharBoolDialect);
    assert_eq!(chars.compile(&lit(true)).unwrap(), "('T'='T')");
    assert_eq!(chars.compile(&lit(false)).unwrap(), "('T'='F')");
}

#[test]
fn constant_logic_folds_to_host_result() {
    for (a, b) in [(true, true), (true, false), (false, true), (false, false)] {
        let expected_and = if a && b { "(1=1)" } else { "(1=0)" };
        let expected_or = if a || b { "(1=1)" } else { "(1=0)" };
        assert_eq!(firebird(&lit(a).and(b)), expected_and);
        assert_eq!(firebird(&lit(a).or(b)), expected_or);
    }
}

#[test]
fn colliding_literals_do_not_confuse_folding() {
    let compiler = Compiler::new(&CollidingDialect);
    // Rendered text is identical, but folding worked on tags, not text.
    assert_eq!(compiler.compile(&lit(true).and(false)).unwrap(), "(B=B)");
    assert_eq!(
        compiler.compile(&col("a").equals(true)).unwrap(),
        "(\"a\" = B)"
    );
    assert_eq!(
        compiler.compile(&col("a").gt(1).and(!lit(true))).unwrap(),
        "((\"a\" > 1) AND (B=B))"
    );
    assert_eq!(compiler.compile(&col("flag")).unwrap(), "\"flag\"=B");
}

// ============================================================================
// Null semantics
// ============================================================================

#[test]
fn null_comparisons_use_is() {
    assert_eq!(firebird(&col("col").equals(Expr::null())), "(\"col\" is null)");
    assert_eq!(firebird(&col("col").not_equals(Expr::null())), "(\"col\" is not null)");
    assert_eq!(firebird(&Expr::null().equals(col("col"))), "(\"col\" is null)");
}

#[test]
fn null_option_values_fold_to_is_null() {
    let missing: Option<i64> = None;
    assert_eq!(firebird(&col("parent").equals(lit(missing))), "(\"parent\" is null)");
    assert_eq!(firebird(&col("parent").equals(lit(Some(4i64)))), "(\"parent\" = 4)");
}

// ============================================================================
// Enums
// ============================================================================

#[test]
fn enum_comparisons_use_member_names() {
    let color = || Expr::enum_column::<Color>("color");
    assert_eq!(
        firebird(&color().equals(Expr::enum_lit(&Color::Blue))),
        "(\"color\" = 'Blue')"
    );
    assert_eq!(
        firebird(&Expr::enum_lit(&Color::Blue).equals(color())),
        "('Blue' = \"color\")"
    );
    assert_eq!(
        firebird(&color().not_equals(Expr::enum_lit(&Color::Red))),
        "(\"color\" <> 'Red')"
    );
}

#[test]
fn enum_member_built_by_hand() {
    let expr = Expr::Member {
        object: Box::new(Expr::Parameter),
        member: Member::of_enum::<Color>("paint"),
    };
    assert_eq!(firebird(&expr.equals(0)), "(\"paint\" = 'Red')");
}

#[test]
fn bare_enum_column_reads_as_true() {
    let color = || Expr::enum_column::<Color>("color");
    assert_eq!(
        firebird(&color().and(col("b").gt(1))),
        "(\"color\"=1 AND (\"b\" > 1))"
    );
    assert_eq!(firebird(&col("b").gt(1).or(color())), "((\"b\" > 1) OR \"color\"=1)");
    assert_eq!(firebird(&color()), "\"color\"=1");
    assert_eq!(firebird(&!color()), "\"color\"=0");
}

#[test]
fn null_is_not_a_predicate() {
    let err = Compiler::new(&FirebirdDialect).compile(&Expr::null()).unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedExpression(_)));
}

#[test]
fn unknown_ordinal_is_reported() {
    let err = Compiler::new(&FirebirdDialect)
        .compile(&Expr::enum_column::<Color>("color").equals(7))
        .unwrap_err();
    assert_eq!(err.to_string(), "Color has no member with ordinal 7");
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn datetimes_follow_the_dialect_format() {
    let at = NaiveDate::from_ymd_opt(2024, 1, 31)
        .unwrap()
        .and_hms_milli_opt(13, 5, 9, 250)
        .unwrap();
    let expr = col("created_at").gte(lit(at));
    assert_eq!(firebird(&expr), "(\"created_at\" >= '2024-01-31 13:05:09.250')");
    assert_eq!(
        Compiler::new(&SqliteDialect).compile(&expr).unwrap(),
        "(\"created_at\" >= '2024-01-31 13:05:09')"
    );
}

#[test]
fn quoted_identifiers_and_text() {
    assert_eq!(
        firebird(&col("odd\"name").equals("it's")),
        "(\"odd\"\"name\" = 'it''s')"
    );
}

#[test]
fn floats_and_unsigned() {
    assert_eq!(firebird(&col("ratio").lt(0.5)), "(\"ratio\" < 0.5)");
    assert_eq!(firebird(&col("n").equals(u64::MAX)), "(\"n\" = 18446744073709551615)");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn unknown_operator_names_are_rejected() {
    assert_eq!(
        Expr::binary_named("<=>", col("a"), 1).unwrap_err(),
        CompileError::UnsupportedOperator("<=>".to_string())
    );
    let expr = Expr::binary_named("??", col("nick"), "anon").unwrap();
    assert_eq!(firebird(&expr.equals("bob")), "(COALESCE(\"nick\",'anon') = 'bob')");
}

#[test]
fn record_literals_are_never_quoted() {
    let err = Compiler::new(&FirebirdDialect)
        .compile(&col("a").equals(lit(Value::record([("x", 1i64)]))))
        .unwrap_err();
    assert_eq!(
        err,
        CompileError::Dialect(DialectError::UnsupportedLiteral {
            value_type: "record",
            sql_type: "any",
        })
    );
}

#[test]
fn missing_record_member_is_an_evaluation_error() {
    let filter = lit(Value::record([("min", 1i64)]));
    let err = Compiler::new(&FirebirdDialect)
        .compile(&col("a").gt(filter.member("max")))
        .unwrap_err();
    assert!(matches!(err, CompileError::Evaluation(_)));
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn firebird_pagination() {
    let c = Compiler::new(&FirebirdDialect);
    assert_eq!(c.compile_pagination(Some(0), Some(4)).unwrap(), "ROWS 1 TO 4");
    assert_eq!(c.compile_pagination(Some(9), None).unwrap(), "ROWS 10 ");
    assert_eq!(c.compile_pagination(None, Some(4)).unwrap(), "");
    assert_eq!(c.compile_pagination(None, None).unwrap(), "");
    assert_eq!(c.compile_pagination(Some(5), Some(0)).unwrap(), "ROWS 6 TO 5");
}

#[test]
fn negative_pagination_is_rejected() {
    let c = Compiler::new(&FirebirdDialect);
    let err = c.compile_pagination(Some(-1), Some(4)).unwrap_err();
    assert!(err.is_invalid_pagination());
    assert_eq!(err.to_string(), "skip value '-1' must be >= 0");

    let err = c.compile_pagination(Some(0), Some(-1)).unwrap_err();
    assert_eq!(err.to_string(), "limit value '-1' must be >= 0");
}

#[test]
fn other_dialects_share_the_window() {
    let sqlite = Compiler::new(&SqliteDialect);
    assert_eq!(sqlite.compile_pagination(Some(9), None).unwrap(), "LIMIT -1 OFFSET 9");
    assert!(sqlite.compile_pagination(Some(-2), None).is_err());

    let chars = Compiler::new(&CharBoolDialect);
    assert_eq!(
        chars.compile_pagination(Some(9), Some(3)).unwrap(),
        "OFFSET 9 ROWS FETCH NEXT 3 ROWS ONLY"
    );
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn compiling_twice_is_identical() {
    let expr = col("name")
        .trim()
        .to_upper()
        .equals("BOB")
        .and(!col("archived"))
        .or(col("id").modulo(2).equals(0));
    let compiler = Compiler::new(&FirebirdDialect);
    assert_eq!(compiler.compile(&expr).unwrap(), compiler.compile(&expr).unwrap());
}

#[test]
fn dialects_differ_only_in_literals() {
    let expr = col("active")
        .and(col("age").gt(18))
        .or(lit(true).and(col("deleted").equals(false)));
    assert_eq!(firebird(&expr), "((\"active\"=1 AND (\"age\" > 18)) OR ((1=1) AND (\"deleted\" = 0)))");
    assert_eq!(
        Compiler::new(&CharBoolDialect).compile(&expr).unwrap(),
        "((\"active\"='T' AND (\"age\" > 18)) OR (('T'='T') AND (\"deleted\" = 'F')))"
    );
}

#[test]
fn binary_op_round_trips_through_symbols() {
    for op in [BinaryOp::And, BinaryOp::Eq, BinaryOp::Ne, BinaryOp::Mod, BinaryOp::Coalesce] {
        assert_eq!(op.as_sql().parse::<BinaryOp>().unwrap(), op);
    }
}

// ============================================================================
// Active dialect
// ============================================================================

#[test]
#[serial]
fn free_functions_use_the_active_dialect() {
    set_active_dialect(Arc::new(SqliteDialect));
    assert_eq!(compile_pagination(Some(2), Some(3)).unwrap(), "LIMIT 3 OFFSET 2");
    assert_eq!(
        compile(&col("name").trim_end().equals("x")).unwrap(),
        "(rtrim(\"name\") = 'x')"
    );

    set_active_dialect(Arc::new(CharBoolDialect));
    assert_eq!(compile(&lit(true)).unwrap(), "('T'='T')");

    std::env::remove_var(DIALECT_ENV);
    reset_active_dialect();
    assert_eq!(compile_pagination(Some(2), Some(3)).unwrap(), "ROWS 3 TO 5");
}

#[test]
#[serial]
fn query_compile_uses_the_active_dialect() {
    CompilerConfig::from_yaml("dialect: sqlite").unwrap().apply();
    assert_eq!(active_dialect().name(), "sqlite");

    let compiled = SqlQuery::new()
        .filter(col("name").trim_start().equals("x"))
        .skip(0)
        .limit(10)
        .compile()
        .unwrap();
    assert_eq!(compiled.where_clause, "(ltrim(\"name\") = 'x')");
    assert_eq!(compiled.pagination, "LIMIT 10 OFFSET 0");

    std::env::remove_var(DIALECT_ENV);
    reset_active_dialect();
}
