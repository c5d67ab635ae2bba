//! Core business logic module
//!
//! This module contains the ledger and its derived views:
//! - `ledger` - balance-delta engine (apply/reverse transaction impacts)
//! - `engine` - the store owning all entity collections and every mutation
//! - `pools` - personal / work / custody segregation
//! - `credit` - credit-card debt and utilization derivation
//! - `budget` - budget carry-forward resolution and spend evaluation
//! - `report` - net-worth and dashboard projections

pub mod budget;
pub mod credit;
pub mod engine;
pub mod ledger;
pub mod pools;
pub mod report;

pub use budget::{active_budget, BudgetHealth, BudgetStatus};
pub use credit::{credit_summary, CreditSummary};
pub use engine::{FinanceEngine, InvestmentOrder, LiquidationOrder};
pub use ledger::{apply_impact, Direction};
pub use pools::{CustodyPot, MonthlyFlow, WorkPot, WorkPotStatus};
pub use report::NetWorth;
