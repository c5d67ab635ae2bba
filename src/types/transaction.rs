//! Transaction types for the finance ledger
//!
//! A transaction is a single financial event affecting one or two accounts.
//! Its kind determines the balance delta the ledger engine applies; its pool
//! determines which segregated view (personal, work, custody) it belongs to.

use crate::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a balance adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentDirection {
    /// The adjustment adds to the balance
    Plus,
    /// The adjustment subtracts from the balance
    Minus,
}

/// Settlement state of a work-pool transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkStatus {
    /// Still counted in the work pot
    Pending,
    /// Reconciled with the employer; excluded from the pot
    Settled,
}

/// Pool membership of a transaction
///
/// The three pools are mutually exclusive by construction: a transaction
/// carries exactly one variant, so work money can never leak into personal
/// totals and custody money can never leak into either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Pool {
    /// The user's own money, the implicit default
    #[default]
    Personal,
    /// Employer advance/expense pot
    Work {
        /// Whether this entry still counts toward the pending pot
        status: WorkStatus,
    },
    /// Money held on behalf of someone else
    Custody {
        /// Name of the owner the money must be returned to
        owner: String,
    },
}

impl Pool {
    /// Work pool entry still pending settlement
    pub fn pending_work() -> Self {
        Pool::Work {
            status: WorkStatus::Pending,
        }
    }

    /// Custody pool entry for the given owner
    pub fn custody(owner: impl Into<String>) -> Self {
        Pool::Custody {
            owner: owner.into(),
        }
    }
}

/// The financial effect of a transaction
///
/// Transfer legs are optional so that engine-emitted flows can model
/// one-sided movements: an investment purchase debits only a source account,
/// a liquidation credits only a destination. A leg that is absent (or that
/// references a since-deleted account) is simply skipped by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money entering the primary account (amount - commission arrives)
    Income,
    /// Money leaving the primary account (amount + commission leaves)
    Expense,
    /// Movement between two accounts
    Transfer {
        /// Destination account; `None` for source-only flows
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to_account_id: Option<String>,
        /// Destination-currency amount for cross-currency transfers;
        /// defaults to `amount` when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_amount: Option<Decimal>,
    },
    /// Manual balance correction in either direction
    Adjustment {
        /// Whether the correction adds or subtracts
        direction: AdjustmentDirection,
    },
}

impl TransactionKind {
    /// Shorthand for a transfer with both legs known
    pub fn transfer_to(to_account_id: impl Into<String>) -> Self {
        TransactionKind::Transfer {
            to_account_id: Some(to_account_id.into()),
            target_amount: None,
        }
    }
}

/// A single financial event
///
/// Transactions are immutable history once recorded: edits go through the
/// engine, which reverses the stored delta before applying the new one.
/// `date` is a `YYYY-MM-DD` string, sortable and month-filterable
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction id
    pub id: String,

    /// Human description of the event
    pub description: String,

    /// Amount in the transaction's own currency, strictly positive
    pub amount: Decimal,

    /// Fee charged alongside the amount, ≥ 0
    #[serde(default)]
    pub commission: Decimal,

    /// The financial effect
    #[serde(flatten)]
    pub kind: TransactionKind,

    /// Free-form category label; membership in the configured category
    /// lists is not enforced
    pub category: String,

    /// Calendar date, `YYYY-MM-DD`
    pub date: String,

    /// Currency the amount is denominated in
    pub currency: Currency,

    /// Primary (source) account; may reference a since-deleted account,
    /// or be empty for destination-only flows
    #[serde(default)]
    pub account_id: String,

    /// Which segregated pool this event belongs to
    #[serde(default)]
    pub pool: Pool,

    /// Investment this transaction funded or liquidated, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_investment_id: Option<String>,
}

impl Transaction {
    /// Create a personal-pool transaction with no commission
    ///
    /// The common case; commission, pool and investment link can be set on
    /// the returned value before handing it to the engine.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        kind: TransactionKind,
        category: impl Into<String>,
        date: impl Into<String>,
        currency: Currency,
        account_id: impl Into<String>,
    ) -> Self {
        Transaction {
            id: id.into(),
            description: description.into(),
            amount,
            commission: Decimal::ZERO,
            kind,
            category: category.into(),
            date: date.into(),
            currency,
            account_id: account_id.into(),
            pool: Pool::Personal,
            related_investment_id: None,
        }
    }

    /// Month prefix of the date (`YYYY-MM`)
    pub fn month(&self) -> &str {
        if self.date.len() >= 7 {
            &self.date[..7]
        } else {
            &self.date
        }
    }

    /// Whether the date falls within the given `YYYY-MM` month
    pub fn in_month(&self, month: &str) -> bool {
        self.date.starts_with(month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction::new(
            "tx-1",
            "Groceries",
            Decimal::new(4200, 2),
            TransactionKind::Expense,
            "Comida",
            "2024-05-14",
            Currency::Usd,
            "acc-1",
        )
    }

    #[test]
    fn test_month_prefix() {
        let tx = sample();
        assert_eq!(tx.month(), "2024-05");
        assert!(tx.in_month("2024-05"));
        assert!(!tx.in_month("2024-06"));
    }

    #[test]
    fn test_default_pool_is_personal() {
        assert_eq!(sample().pool, Pool::Personal);
    }

    #[test]
    fn test_pool_serde_tags() {
        let work = serde_json::to_value(Pool::pending_work()).unwrap();
        assert_eq!(work["kind"], "work");
        assert_eq!(work["status"], "pending");

        let custody = serde_json::to_value(Pool::custody("Ana")).unwrap();
        assert_eq!(custody["kind"], "custody");
        assert_eq!(custody["owner"], "Ana");
    }

    #[test]
    fn test_kind_flattens_into_transaction_json() {
        let mut tx = sample();
        tx.kind = TransactionKind::Transfer {
            to_account_id: Some("acc-2".to_string()),
            target_amount: Some(Decimal::new(4550, 0)),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "transfer");
        assert_eq!(value["to_account_id"], "acc-2");
    }

    #[test]
    fn test_transaction_json_round_trip() {
        let mut tx = sample();
        tx.pool = Pool::custody("Ana");
        tx.commission = Decimal::new(50, 2);
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
