//! The process-wide active dialect.
//!
//! Compilers take their dialect explicitly. The active dialect only serves
//! the outermost call sites ([`compile`](crate::compile),
//! [`SqlQuery::compile`](crate::SqlQuery::compile)) that have no dialect
//! of their own.
//!
//! # Resolution
//!
//! On first use the active dialect is read from the `SQLPRED_DIALECT`
//! environment variable (`firebird` or `sqlite`, case-insensitive). Unset
//! or unrecognised values fall back to Firebird.
//!
//! ```rust
//! use std::sync::Arc;
//! use sqlpred::{active_dialect, reset_active_dialect, set_active_dialect, SqliteDialect};
//!
//! set_active_dialect(Arc::new(SqliteDialect));
//! assert_eq!(active_dialect().name(), "sqlite");
//!
//! reset_active_dialect();
//! ```
//!
//! # Configuration documents
//!
//! [`CompilerConfig`] reads the same choice from YAML:
//!
//! ```rust
//! use sqlpred::{CompilerConfig, DialectKind};
//!
//! let config = CompilerConfig::from_yaml("dialect: sqlite").unwrap();
//! assert_eq!(config.dialect, DialectKind::Sqlite);
//! ```

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use serde::Deserialize;
use sqlpred_dialect::{Dialect, DialectKind};

use crate::error::{CompileError, Result};

/// Environment variable naming the initial active dialect.
pub const DIALECT_ENV: &str = "SQLPRED_DIALECT";

static ACTIVE_DIALECT: Lazy<RwLock<Arc<dyn Dialect>>> =
    Lazy::new(|| RwLock::new(resolve_from_env().dialect()));

/// Replaces the active dialect.
pub fn set_active_dialect(dialect: Arc<dyn Dialect>) {
    tracing::info!(dialect = dialect.name(), "active dialect replaced");
    let mut guard = ACTIVE_DIALECT.write().unwrap();
    *guard = dialect;
}

/// The active dialect.
///
/// Returns a clone of the shared handle, so the lock is released before
/// any compiling happens.
pub fn active_dialect() -> Arc<dyn Dialect> {
    Arc::clone(&ACTIVE_DIALECT.read().unwrap())
}

/// Re-resolves the active dialect from the environment.
pub fn reset_active_dialect() {
    set_active_dialect(resolve_from_env().dialect());
}

fn resolve_from_env() -> DialectKind {
    match std::env::var(DIALECT_ENV) {
        Ok(val) => val.parse().unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring {}, using the default dialect", DIALECT_ENV);
            DialectKind::default()
        }),
        Err(_) => DialectKind::default(),
    }
}

/// Compiler settings read from a configuration document.
///
/// Missing fields take their defaults, so an empty mapping is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// The dialect to install.
    pub dialect: DialectKind,
}

impl CompilerConfig {
    /// Parses a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| CompileError::Config(e.to_string()))
    }

    /// Installs this configuration as the active one.
    pub fn apply(&self) {
        set_active_dialect(self.dialect.dialect());
    }
}
