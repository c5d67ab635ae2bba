//! Budget types
//!
//! A budget is a spending ceiling for one category in one calendar month.
//! Months are zero-padded `YYYY-MM` strings, so lexicographic comparison is
//! chronological comparison; the carry-forward resolution in
//! [`crate::core::budget`] relies on exactly that.

use crate::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spending ceiling for one (category, month) pair
///
/// The engine keeps at most one budget per pair; setting a new limit for an
/// existing pair replaces the old record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique budget id
    pub id: String,

    /// Expense category the ceiling applies to
    pub category: String,

    /// The ceiling, strictly positive, in `currency`
    pub limit: Decimal,

    /// Currency the ceiling is denominated in
    pub currency: Currency,

    /// Calendar month, `YYYY-MM`
    pub month: String,
}
