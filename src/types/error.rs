//! Error types for the finance ledger engine
//!
//! Every mutation on the engine surfaces failures synchronously through
//! [`LedgerError`]; a rejected operation leaves no partial state change
//! behind. I/O-boundary failures (snapshot load/save) are wrapped here too,
//! but callers at the boundary are expected to degrade gracefully rather
//! than abort: a malformed snapshot falls back to defaults, a failed save
//! is superseded by the next snapshot.

use crate::types::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for ledger operations
///
/// Each variant carries enough context to explain the rejection to the user
/// without a stack trace.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Transaction or budget amounts must be strictly positive
    #[error("Invalid amount {amount}: must be greater than zero")]
    InvalidAmount {
        /// The offending amount
        amount: Decimal,
    },

    /// Commissions may be zero but never negative
    #[error("Invalid commission {commission}: must not be negative")]
    InvalidCommission {
        /// The offending commission
        commission: Decimal,
    },

    /// Exchange rates must be strictly positive
    #[error("Invalid exchange rate {rate}: must be greater than zero")]
    InvalidRate {
        /// The offending rate
        rate: Decimal,
    },

    /// Credit-card closing/due days live on a calendar
    #[error("Invalid day of month {day}: must be between 1 and 31")]
    InvalidDayOfMonth {
        /// The offending day
        day: u8,
    },

    /// Credit limits may not be negative
    #[error("Invalid credit limit {limit}: must not be negative")]
    InvalidCreditLimit {
        /// The offending limit
        limit: Decimal,
    },

    /// A transfer needs two distinct accounts
    #[error("Transfer source and destination are the same account ({account_id})")]
    SelfTransfer {
        /// The account used on both legs
        account_id: String,
    },

    /// Lookup of a transaction by id failed
    #[error("Transaction {id} not found")]
    TransactionNotFound {
        /// The id that did not resolve
        id: String,
    },

    /// Lookup of an account by id failed where one is required
    ///
    /// Only raised by operations that need the account up front (deleting
    /// it, funding an investment from it). The ledger itself tolerates
    /// dangling account references by skipping the missing leg.
    #[error("Account {id} not found")]
    AccountNotFound {
        /// The id that did not resolve
        id: String,
    },

    /// Lookup of an investment by id failed
    #[error("Investment {id} not found")]
    InvestmentNotFound {
        /// The id that did not resolve
        id: String,
    },

    /// Lookup of a budget by id failed
    #[error("Budget {id} not found")]
    BudgetNotFound {
        /// The id that did not resolve
        id: String,
    },

    /// The funding account cannot cover an investment purchase
    #[error("Insufficient funds in account {account_id}: balance {balance}, required {required}")]
    InsufficientFunds {
        /// The funding account
        account_id: String,
        /// Its current balance
        balance: Decimal,
        /// Capital plus commission required
        required: Decimal,
    },

    /// A liquidation asked for more units than the position holds
    #[error("Insufficient units in investment {investment_id}: held {held}, requested {requested}")]
    InsufficientUnits {
        /// The position being liquidated
        investment_id: String,
        /// Units currently held
        held: Decimal,
        /// Units requested for sale
        requested: Decimal,
    },

    /// The funding/target account is denominated in a different currency
    #[error("Currency mismatch for account {account_id}: expected {expected:?}, found {found:?}")]
    CurrencyMismatch {
        /// The account checked
        account_id: String,
        /// Currency the operation is denominated in
        expected: Currency,
        /// Currency the account is denominated in
        found: Currency,
    },

    /// I/O error at the persistence boundary
    #[error("I/O error: {message}")]
    Io {
        /// Description of the underlying failure
        message: String,
    },

    /// Snapshot (de)serialization failure
    #[error("Snapshot format error: {message}")]
    SnapshotFormat {
        /// Description of the underlying failure
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        LedgerError::SnapshotFormat {
            message: error.to_string(),
        }
    }
}

// Helper constructors, mirroring how call sites build errors inline.

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InvalidCommission error
    pub fn invalid_commission(commission: Decimal) -> Self {
        LedgerError::InvalidCommission { commission }
    }

    /// Create an InvalidRate error
    pub fn invalid_rate(rate: Decimal) -> Self {
        LedgerError::InvalidRate { rate }
    }

    /// Create a SelfTransfer error
    pub fn self_transfer(account_id: &str) -> Self {
        LedgerError::SelfTransfer {
            account_id: account_id.to_string(),
        }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(id: &str) -> Self {
        LedgerError::TransactionNotFound { id: id.to_string() }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(id: &str) -> Self {
        LedgerError::AccountNotFound { id: id.to_string() }
    }

    /// Create an InvestmentNotFound error
    pub fn investment_not_found(id: &str) -> Self {
        LedgerError::InvestmentNotFound { id: id.to_string() }
    }

    /// Create a BudgetNotFound error
    pub fn budget_not_found(id: &str) -> Self {
        LedgerError::BudgetNotFound { id: id.to_string() }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account_id: &str, balance: Decimal, required: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account_id: account_id.to_string(),
            balance,
            required,
        }
    }

    /// Create an InsufficientUnits error
    pub fn insufficient_units(investment_id: &str, held: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientUnits {
            investment_id: investment_id.to_string(),
            held,
            requested,
        }
    }

    /// Create a CurrencyMismatch error
    pub fn currency_mismatch(account_id: &str, expected: Currency, found: Currency) -> Self {
        LedgerError::CurrencyMismatch {
            account_id: account_id.to_string(),
            expected,
            found,
        }
    }
}
