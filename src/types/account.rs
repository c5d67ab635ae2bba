//! Account types for the finance ledger
//!
//! An account is one store of money: a bank account, cash on hand, a mobile
//! wallet, a brokerage cash balance, or a credit card. Balances are signed
//! decimals owned exclusively by the ledger engine; only transaction deltas
//! mutate them after creation.

use crate::types::{Currency, LedgerError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kinds of money stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountType {
    /// Savings bank account
    Savings,
    /// Checking bank account
    Checking,
    /// Physical cash
    Cash,
    /// Credit card (balance stores the negative of current debt)
    CreditCard,
    /// Mobile / virtual wallet
    EWallet,
    /// Brokerage cash balance, usable to fund investments
    Broker,
}

impl std::fmt::Display for AccountType {
    /// Kebab-case label matching the serialized form
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AccountType::Savings => "savings",
            AccountType::Checking => "checking",
            AccountType::Cash => "cash",
            AccountType::CreditCard => "credit-card",
            AccountType::EWallet => "e-wallet",
            AccountType::Broker => "broker",
        };
        f.write_str(label)
    }
}

/// One store of money
///
/// For every non-credit type, `balance` represents owned funds. A negative
/// balance on a non-credit account is not rejected; an adjustment can push
/// it below zero, and that state is surfaced to the user rather than hidden.
///
/// For [`AccountType::CreditCard`], `balance` is the **negative of current
/// debt**: a card owing 300 stores `-300`. Debt, available credit and
/// utilization are derived read-only by [`crate::core::credit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account id
    pub id: String,

    /// Display name ("Banesco", "Binance", ...)
    pub name: String,

    /// Kind of store
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Signed balance in the account's own currency
    pub balance: Decimal,

    /// Currency the account is denominated in
    pub currency: Currency,

    /// Display color (hex string, presentation only)
    #[serde(default)]
    pub color: String,

    /// Credit limit, credit cards only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<Decimal>,

    /// Statement closing day of month (1-31), credit cards only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_day: Option<u8>,

    /// Payment due day of month (1-31), credit cards only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_day: Option<u8>,
}

impl Account {
    /// Create a non-credit account with an initial balance
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        balance: Decimal,
        currency: Currency,
        color: impl Into<String>,
    ) -> Self {
        Account {
            id: id.into(),
            name: name.into(),
            account_type,
            balance,
            currency,
            color: color.into(),
            credit_limit: None,
            closing_day: None,
            due_day: None,
        }
    }

    /// Create a credit-card account from an entered initial debt
    ///
    /// The entered debt is stored negated: a card created with an initial
    /// debt of 300 holds `balance == -300`. Rejects negative debt or limit
    /// and closing/due days outside 1-31.
    #[allow(clippy::too_many_arguments)]
    pub fn credit_card(
        id: impl Into<String>,
        name: impl Into<String>,
        initial_debt: Decimal,
        currency: Currency,
        color: impl Into<String>,
        credit_limit: Decimal,
        closing_day: u8,
        due_day: u8,
    ) -> Result<Self, LedgerError> {
        if initial_debt < Decimal::ZERO {
            return Err(LedgerError::invalid_amount(initial_debt));
        }
        if credit_limit < Decimal::ZERO {
            return Err(LedgerError::InvalidCreditLimit {
                limit: credit_limit,
            });
        }
        for day in [closing_day, due_day] {
            if !(1..=31).contains(&day) {
                return Err(LedgerError::InvalidDayOfMonth { day });
            }
        }

        Ok(Account {
            id: id.into(),
            name: name.into(),
            account_type: AccountType::CreditCard,
            balance: -initial_debt,
            currency,
            color: color.into(),
            credit_limit: Some(credit_limit),
            closing_day: Some(closing_day),
            due_day: Some(due_day),
        })
    }

    /// Whether this account is a credit card
    pub fn is_credit(&self) -> bool {
        self.account_type == AccountType::CreditCard
    }
}
