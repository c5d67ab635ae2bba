//! Balance-delta engine
//!
//! Translates a transaction into a signed balance delta on one or two
//! accounts, and its exact inverse. Add, edit and delete all reduce to this
//! one function: add applies the delta, delete reverses it, edit reverses
//! the stored transaction and applies the new one. Because every delta has
//! an exact inverse, `apply_impact(apply_impact(A, t, Reverse), t, Apply)`
//! leaves the account set bit-for-bit unchanged.
//!
//! # Dangling references
//!
//! A leg whose account id matches nothing in the set is silently skipped.
//! Deleting an account does not cascade into history, so reversing an old
//! transfer whose destination is gone must not fail; the surviving leg is
//! still reversed correctly.

use crate::types::{Account, AdjustmentDirection, Transaction, TransactionKind};
use rust_decimal::Decimal;

/// Whether a transaction's impact is being applied or reversed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Apply the transaction's deltas (+1)
    Apply,
    /// Undo the transaction's deltas (-1)
    Reverse,
}

impl Direction {
    /// The sign this direction multiplies every delta by
    pub fn signum(self) -> Decimal {
        match self {
            Direction::Apply => Decimal::ONE,
            Direction::Reverse => -Decimal::ONE,
        }
    }
}

/// Apply (or reverse) a transaction's balance impact across an account set
///
/// For the primary account (`transaction.account_id`):
/// - Expense: balance decreases by `amount + commission`
/// - Income: balance increases by `amount - commission`
/// - Transfer: balance decreases by `amount` (no commission at the source)
/// - Adjustment: balance moves by `±amount` per the adjustment direction
///
/// For the destination account of a transfer (`to_account_id`): the arrival
/// is `target_amount` when set (cross-currency transfers), else `amount`,
/// and the commission is deducted there: the receiving side pays the fee.
///
/// Accounts matching neither leg are untouched. When a transaction somehow
/// names the same account on both legs, the primary leg wins, matching the
/// order the legs are checked in.
pub fn apply_impact(accounts: &mut [Account], transaction: &Transaction, direction: Direction) {
    let sign = direction.signum();

    for account in accounts.iter_mut() {
        if !transaction.account_id.is_empty() && account.id == transaction.account_id {
            match &transaction.kind {
                TransactionKind::Expense => {
                    account.balance -= sign * (transaction.amount + transaction.commission);
                }
                TransactionKind::Income => {
                    account.balance += sign * (transaction.amount - transaction.commission);
                }
                TransactionKind::Transfer { .. } => {
                    account.balance -= sign * transaction.amount;
                }
                TransactionKind::Adjustment { direction } => {
                    let delta = match direction {
                        AdjustmentDirection::Plus => transaction.amount,
                        AdjustmentDirection::Minus => -transaction.amount,
                    };
                    account.balance += sign * delta;
                }
            }
        } else if let TransactionKind::Transfer {
            to_account_id: Some(to),
            target_amount,
        } = &transaction.kind
        {
            if account.id == *to {
                let arrival = target_amount.unwrap_or(transaction.amount);
                account.balance += sign * (arrival - transaction.commission);
            }
        }
    }
}
