//! Implementation of the `#[derive(SqlEnum)]` macro.
//!
//! Reads the variant table of a unit-only enum and generates the
//! `EnumType` identity plus the variant-to-ordinal mapping.

mod attrs;
mod derive;

pub use derive::sql_enum_derive_impl;
