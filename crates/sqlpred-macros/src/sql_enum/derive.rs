//! Implementation of the `#[derive(SqlEnum)]` macro.
//!
//! This macro generates an implementation of the `SqlEnum` trait whose
//! `enum_type()` returns a static table of `(ordinal, name)` pairs.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Expr, ExprLit, ExprUnary, Fields, Lit, Result, UnOp};

use super::attrs::parse_sql_attrs;

/// Main implementation of the SqlEnum derive macro.
pub fn sql_enum_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let enum_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "SqlEnum cannot be derived for generic enums",
        ));
    }

    let data = match &input.data {
        Data::Enum(data) => data,
        _ => {
            return Err(Error::new(
                input.span(),
                "SqlEnum can only be derived for enums",
            ))
        }
    };

    if data.variants.is_empty() {
        return Err(Error::new(
            input.span(),
            "SqlEnum needs at least one variant",
        ));
    }

    let type_name = parse_sql_attrs(&input.attrs)?
        .rename
        .unwrap_or_else(|| enum_name.to_string());

    let mut idents = Vec::new();
    let mut ordinals = Vec::new();
    let mut names = Vec::new();
    let mut seen_ordinals = HashSet::new();
    let mut seen_names = HashSet::new();
    let mut next_ordinal: i64 = 0;

    for variant in data.variants.iter() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new(
                variant.fields.span(),
                "SqlEnum variants cannot have fields",
            ));
        }

        let ordinal = match &variant.discriminant {
            Some((_, expr)) => literal_discriminant(expr)?,
            None => next_ordinal,
        };
        if !seen_ordinals.insert(ordinal) {
            return Err(Error::new(
                variant.span(),
                format!("ordinal {} is used by more than one variant", ordinal),
            ));
        }

        let name = parse_sql_attrs(&variant.attrs)?
            .rename
            .unwrap_or_else(|| variant.ident.to_string());
        if !seen_names.insert(name.clone()) {
            return Err(Error::new(
                variant.span(),
                format!("name '{}' is used by more than one variant", name),
            ));
        }

        next_ordinal = ordinal.checked_add(1).ok_or_else(|| {
            Error::new(variant.span(), "implicit ordinal after this variant overflows i64")
        })?;

        idents.push(&variant.ident);
        ordinals.push(ordinal);
        names.push(name);
    }

    let expanded = quote! {
        impl ::sqlpred::SqlEnum for #enum_name {
            fn enum_type() -> &'static ::sqlpred::EnumType {
                static ENUM_TYPE: ::sqlpred::EnumType = ::sqlpred::EnumType::new(
                    #type_name,
                    &[#((#ordinals, #names)),*],
                );
                &ENUM_TYPE
            }

            fn ordinal(&self) -> i64 {
                match self {
                    #(#enum_name::#idents => #ordinals,)*
                }
            }
        }
    };

    Ok(expanded)
}

/// Reads an integer literal discriminant, optionally negated.
fn literal_discriminant(expr: &Expr) -> Result<i64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => int.base10_parse::<i64>(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match inner.as_ref() {
            Expr::Lit(ExprLit {
                lit: Lit::Int(int), ..
            }) => {
                // Parse as i128 so i64::MIN survives the negation.
                let value = -int.base10_parse::<i128>()?;
                i64::try_from(value)
                    .map_err(|_| Error::new(int.span(), "discriminant does not fit in i64"))
            }
            other => Err(non_literal(other)),
        },
        other => Err(non_literal(other)),
    }
}

fn non_literal(expr: &Expr) -> Error {
    Error::new(
        expr.span(),
        "SqlEnum discriminants must be integer literals",
    )
}
