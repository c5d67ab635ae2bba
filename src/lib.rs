//! Finanza360 Ledger Engine
//! # Overview
//!
//! A personal/family finance ledger: accounts, pooled transactions,
//! budgets and investments, with multi-currency normalization over a single
//! shared USD/VES rate.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Entity model (Account, Transaction, Investment, Budget,
//!   currency and error types)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - balance-delta engine with exact inverses
//!   - [`core::engine`] - the store owning every entity collection and
//!     exposing the full mutation surface
//!   - [`core::pools`] - personal / work / custody segregation
//!   - [`core::credit`] - credit-card debt and utilization derivation
//!   - [`core::budget`] - budget carry-forward and spend evaluation
//!   - [`core::report`] - net-worth projections
//! - [`io`] - snapshot persistence, debounced background saving, CSV export
//! - [`cli`] - CLI argument parsing
//!
//! # Pools
//!
//! Every transaction belongs to exactly one pool:
//!
//! - **Personal**: the user's own money; the only pool feeding the
//!   dashboard income/expense totals
//! - **Work**: employer advances and expensed spend, tracked as a separate
//!   pot until settled
//! - **Custody**: money held for someone else; a liability subtracted from
//!   net worth
//!
//! # Ledger contracts
//!
//! Adding a transaction applies its balance impact atomically; deleting
//! reverses it; editing reverses the stored original then applies the new
//! values. Every impact has an exact inverse, so edits and deletes leave
//! balances as if the changed history had always been the truth.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{
    apply_impact, Direction, FinanceEngine, InvestmentOrder, LiquidationOrder, NetWorth,
};
pub use io::{load_or_default, write_accounts_csv, DebouncedSaver, Snapshot, SnapshotPort};
pub use types::{
    Account, AccountType, AdjustmentDirection, Budget, Currency, ExchangeRate, Investment,
    InvestmentCategory, LedgerError, Pool, Transaction, TransactionKind, WorkStatus, YieldPeriod,
};
