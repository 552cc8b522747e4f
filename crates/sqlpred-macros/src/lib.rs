//! Proc macros for sqlpred.
//!
//! ## Derive Macros
//!
//! - [`SqlEnum`] - Generate the enum identity used to compare typed
//!   columns by member name
//!
//! # Examples
//!
//! For working examples, see `sqlpred/tests/derive.rs`.

mod sql_enum;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `SqlEnum` trait for a unit-only enum.
///
/// The generated code stores the `(ordinal, name)` table of the enum in a
/// static `EnumType` and maps each variant to its ordinal. Ordinals are
/// the variant discriminants: explicit integer literals where given,
/// otherwise one more than the previous variant (starting at 0).
///
/// # Attributes
///
/// | Attribute | On | Description |
/// |-----------|----|-------------|
/// | `rename = "..."` | variant | Name stored in the column (default: variant name) |
/// | `rename = "..."` | enum | Name reported in errors (default: enum name) |
///
/// # Example
///
/// ```ignore
/// use sqlpred::{enum_col, Compiler, FirebirdDialect, SqlEnum};
///
/// #[derive(Clone, Copy, SqlEnum)]
/// enum Status {
///     Pending = 1,
///     Active,
///     #[sql(rename = "CLOSED")]
///     Done = 10,
/// }
///
/// assert_eq!(Status::Active.ordinal(), 2);
/// assert_eq!(Status::Done.sql_name(), Some("CLOSED"));
///
/// let sql = Compiler::new(&FirebirdDialect)
///     .compile(&enum_col::<Status>("status").equals(Status::Done.ordinal()))
///     .unwrap();
/// assert_eq!(sql, "(\"status\" = 'CLOSED')");
/// ```
///
/// # Restrictions
///
/// Generic enums, variants with fields and non-literal discriminants are
/// rejected at compile time, as are two variants sharing an ordinal or a
/// stored name.
#[proc_macro_derive(SqlEnum, attributes(sql))]
pub fn sql_enum_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    sql_enum::sql_enum_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
