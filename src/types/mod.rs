//! Types module
//!
//! Contains the entity model used throughout the engine, organized into
//! logical submodules:
//! - `currency`: currency enum and the shared exchange-rate normalizer
//! - `account`: money stores, including the credit-card sign convention
//! - `transaction`: financial events, their kinds and pool membership
//! - `investment`: asset/receivable positions
//! - `budget`: monthly category spending ceilings
//! - `error`: the ledger error taxonomy

pub mod account;
pub mod budget;
pub mod currency;
pub mod error;
pub mod investment;
pub mod transaction;

pub use account::{Account, AccountType};
pub use budget::Budget;
pub use currency::{Currency, ExchangeRate};
pub use error::LedgerError;
pub use investment::{Investment, InvestmentCategory, YieldPeriod};
pub use transaction::{AdjustmentDirection, Pool, Transaction, TransactionKind, WorkStatus};
