//! Row windows shared by every pagination syntax.
//!
//! Dialects disagree on how "skip N, take M" is spelled but not on what it
//! means. [`RowWindow`] holds the validated 1-based inclusive window so the
//! arithmetic and the negative-count checks live in one place.

use crate::error::{DialectError, Result};

/// A validated 1-based inclusive row window.
///
/// # Example
///
/// ```
/// use sqlpred_dialect::RowWindow;
///
/// let window = RowWindow::resolve(Some(10), Some(5)).unwrap().unwrap();
/// assert_eq!(window.from_row(), 11);
/// assert_eq!(window.to_row(), Some(15));
///
/// // No skip means no pagination at all.
/// assert_eq!(RowWindow::resolve(None, Some(5)).unwrap(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    skip: i64,
    limit: Option<i64>,
    from_row: i64,
    to_row: Option<i64>,
}

impl RowWindow {
    /// Validates skip/limit and computes the window.
    ///
    /// Returns `Ok(None)` when `skip` is absent. A negative `skip` or
    /// `limit` is rejected with [`DialectError::InvalidPagination`]
    /// carrying the offending value; values are never clamped.
    pub fn resolve(skip: Option<i64>, limit: Option<i64>) -> Result<Option<RowWindow>> {
        let Some(skip) = skip else {
            return Ok(None);
        };

        let from_row = skip
            .checked_add(1)
            .filter(|row| *row > 0)
            .ok_or(DialectError::InvalidPagination {
                name: "skip",
                value: skip,
            })?;

        let to_row = match limit {
            Some(limit) if limit < 0 => {
                return Err(DialectError::InvalidPagination {
                    name: "limit",
                    value: limit,
                })
            }
            Some(limit) => Some(from_row.checked_add(limit - 1).ok_or(
                DialectError::InvalidPagination {
                    name: "limit",
                    value: limit,
                },
            )?),
            None => None,
        };

        Ok(Some(RowWindow {
            skip,
            limit,
            from_row,
            to_row,
        }))
    }

    /// Rows skipped before the window starts.
    pub fn skip(&self) -> i64 {
        self.skip
    }

    /// Maximum rows in the window, if bounded.
    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    /// First row of the window (1-based).
    pub fn from_row(&self) -> i64 {
        self.from_row
    }

    /// Last row of the window (inclusive), if bounded.
    pub fn to_row(&self) -> Option<i64> {
        self.to_row
    }
}
