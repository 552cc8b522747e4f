//! Attribute parsing for the SqlEnum derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Attributes from `#[sql(...)]` on the enum or one of its variants.
#[derive(Debug, Clone)]
pub struct SqlAttr {
    /// Stored name replacing the Rust identifier.
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for SqlAttr {
    fn default() -> Self {
        SqlAttr {
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for SqlAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = SqlAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    let name = match &nv.value {
                        syn::Expr::Lit(syn::ExprLit {
                            lit: Lit::Str(s), ..
                        }) => s,
                        other => {
                            return Err(Error::new(other.span(), "rename must be a string literal"))
                        }
                    };
                    if attr.rename.is_some() {
                        return Err(Error::new(nv.span(), "duplicate rename"));
                    }
                    if name.value().is_empty() {
                        return Err(Error::new(name.span(), "rename must not be empty"));
                    }
                    attr.rename = Some(name.value());
                    attr.span = name.span();
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown sql attribute. Expected: rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[sql(...)]` attributes from an item's attributes.
pub fn parse_sql_attrs(attrs: &[Attribute]) -> Result<SqlAttr> {
    let mut found = attrs.iter().filter(|attr| attr.path().is_ident("sql"));
    let Some(first) = found.next() else {
        return Ok(SqlAttr::default());
    };
    if let Some(second) = found.next() {
        return Err(Error::new(second.span(), "only one #[sql(...)] attribute is allowed"));
    }
    first.parse_args::<SqlAttr>()
}
