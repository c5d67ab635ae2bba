//! Finance engine
//!
//! This module provides the `FinanceEngine`, the single write surface over
//! the entity collections (accounts, transactions, investments, budgets and
//! the category lists). Every mutation validates first and applies in full
//! before returning, so readers never observe a partially applied operation.
//!
//! The engine enforces the ledger contracts:
//! - adding a transaction applies its balance impact atomically with the
//!   history insert
//! - deleting reverses the stored impact before removing the record
//! - updating reverses the *original* stored impact, then applies the new
//!   one, so editing any field leaves balances as if the original never
//!   happened
//!
//! Persistence is not the engine's concern: snapshots are produced from and
//! loaded into it by the `io` module (injected at the boundary, never
//! ambient).

use crate::core::budget::{self, BudgetStatus};
use crate::core::credit::{self, CreditSummary};
use crate::core::ledger::{apply_impact, Direction};
use crate::core::pools::{self, CustodyPot, MonthlyFlow, WorkPot};
use crate::core::report::{self, NetWorth};
use crate::types::{
    Account, AccountType, Budget, Currency, ExchangeRate, Investment, InvestmentCategory,
    LedgerError, Pool, Transaction, TransactionKind, WorkStatus, YieldPeriod,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Expense categories a fresh engine starts with
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 9] = [
    "Comida",
    "Transporte",
    "Servicios",
    "Salud",
    "Educación",
    "Ocio",
    "Compras",
    "Comisiones",
    "Otros",
];

/// Income categories a fresh engine starts with
pub const DEFAULT_INCOME_CATEGORIES: [&str; 6] = [
    "Sueldo",
    "Freelance",
    "Ventas",
    "Inversiones",
    "Regalos",
    "Otros",
];

/// Category used for engine-emitted investment transactions
const INVESTMENT_CATEGORY: &str = "Inversiones";

/// Order to open a new investment position
///
/// `quantity` may be given explicitly (non-priced placements); when absent
/// and a buy price is set, units are derived as capital ÷ price.
#[derive(Debug, Clone)]
pub struct InvestmentOrder {
    /// Display name for the position
    pub name: String,
    /// Ticker symbol for priced assets
    pub ticker: Option<String>,
    /// Account the capital leaves from; must exist and match `currency`
    pub source_account_id: String,
    /// Capital invested (cost basis), strictly positive
    pub capital: Decimal,
    /// Purchase fee, ≥ 0
    pub buy_commission: Decimal,
    /// Explicit units held, when not derived from a price
    pub quantity: Option<Decimal>,
    /// Cost per unit; 0 when the position is not unit-priced
    pub buy_price: Decimal,
    /// Latest market price, when known at purchase time
    pub current_market_price: Decimal,
    /// Currency of the position and the funding flow
    pub currency: Currency,
    /// Asset class
    pub category: InvestmentCategory,
    /// Quoted yield for income-generating placements
    pub yield_rate: Option<Decimal>,
    /// Period of the quoted yield
    pub yield_period: Option<YieldPeriod>,
    /// Purchase date, `YYYY-MM-DD`
    pub date: String,
}

/// Order to partially (or fully) liquidate a position
#[derive(Debug, Clone)]
pub struct LiquidationOrder {
    /// Units to sell, strictly positive and ≤ the held quantity
    pub units: Decimal,
    /// Sale price per unit, strictly positive
    pub sell_price: Decimal,
    /// Sale fee, ≥ 0, deducted from the credited proceeds
    pub commission: Decimal,
    /// Account the proceeds are credited to; `None` records the reduction
    /// without moving cash
    pub target_account_id: Option<String>,
    /// Sale date, `YYYY-MM-DD`
    pub date: String,
}

/// The store owning all entity collections and exposing every mutation
///
/// Single-threaded, single-user: one engine instance owns one snapshot of
/// entities, and derived views (pools, budgets, credit, net worth) are pure
/// projections over its current state.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceEngine {
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    investments: Vec<Investment>,
    budgets: Vec<Budget>,
    expense_categories: Vec<String>,
    income_categories: Vec<String>,
}

impl FinanceEngine {
    /// Create an empty engine seeded with the default category lists
    pub fn new() -> Self {
        FinanceEngine {
            accounts: Vec::new(),
            transactions: Vec::new(),
            investments: Vec::new(),
            budgets: Vec::new(),
            expense_categories: DEFAULT_EXPENSE_CATEGORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            income_categories: DEFAULT_INCOME_CATEGORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Rebuild an engine from previously persisted collections
    ///
    /// Balances are taken as stored; no replay of history happens here.
    pub fn with_state(
        accounts: Vec<Account>,
        transactions: Vec<Transaction>,
        investments: Vec<Investment>,
        budgets: Vec<Budget>,
        expense_categories: Vec<String>,
        income_categories: Vec<String>,
    ) -> Self {
        FinanceEngine {
            accounts,
            transactions,
            investments,
            budgets,
            expense_categories,
            income_categories,
        }
    }

    // --- read surface -----------------------------------------------------

    /// All accounts, in creation order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Transaction history, newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Open investment positions
    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    /// All budget records
    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// Configured expense categories
    pub fn expense_categories(&self) -> &[String] {
        &self.expense_categories
    }

    /// Configured income categories
    pub fn income_categories(&self) -> &[String] {
        &self.income_categories
    }

    /// Look up an account by id
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Look up an investment by id
    pub fn investment(&self, id: &str) -> Option<&Investment> {
        self.investments.iter().find(|i| i.id == id)
    }

    // --- accounts ---------------------------------------------------------

    /// Register a new account
    pub fn add_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// Delete an account
    ///
    /// Historical transactions referencing it are kept untouched; the
    /// ledger skips their now-dangling legs from here on.
    pub fn delete_account(&mut self, id: &str) -> Result<Account, LedgerError> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| LedgerError::account_not_found(id))?;
        Ok(self.accounts.remove(index))
    }

    // --- transactions -----------------------------------------------------

    /// Record a transaction, applying its balance impact atomically
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts, negative commissions, non-positive
    /// transfer target amounts and transfers whose destination equals the
    /// source. Nothing is applied on rejection.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<(), LedgerError> {
        Self::validate_transaction(&transaction)?;
        apply_impact(&mut self.accounts, &transaction, Direction::Apply);
        self.transactions.insert(0, transaction);
        Ok(())
    }

    /// Delete a transaction, reversing its balance impact
    ///
    /// Returns the removed record.
    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction, LedgerError> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::transaction_not_found(id))?;
        apply_impact(&mut self.accounts, &self.transactions[index], Direction::Reverse);
        Ok(self.transactions.remove(index))
    }

    /// Replace a transaction, re-deriving balances
    ///
    /// The stored original's impact is reversed before the new values are
    /// applied, so balances end up exactly as if the original had never
    /// happened and the new transaction was added fresh, even when the
    /// amount, kind or accounts changed.
    pub fn update_transaction(&mut self, updated: Transaction) -> Result<(), LedgerError> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == updated.id)
            .ok_or_else(|| LedgerError::transaction_not_found(&updated.id))?;
        Self::validate_transaction(&updated)?;

        apply_impact(&mut self.accounts, &self.transactions[index], Direction::Reverse);
        apply_impact(&mut self.accounts, &updated, Direction::Apply);
        self.transactions[index] = updated;
        Ok(())
    }

    fn validate_transaction(transaction: &Transaction) -> Result<(), LedgerError> {
        if transaction.amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(transaction.amount));
        }
        if transaction.commission < Decimal::ZERO {
            return Err(LedgerError::invalid_commission(transaction.commission));
        }
        if let TransactionKind::Transfer {
            to_account_id,
            target_amount,
        } = &transaction.kind
        {
            if let Some(to) = to_account_id {
                if !transaction.account_id.is_empty() && *to == transaction.account_id {
                    return Err(LedgerError::self_transfer(to));
                }
            }
            if let Some(target) = target_amount {
                if *target <= Decimal::ZERO {
                    return Err(LedgerError::invalid_amount(*target));
                }
            }
        }
        Ok(())
    }

    // --- work pool --------------------------------------------------------

    /// Mark every pending work transaction as settled
    ///
    /// A bookkeeping label change only: no account balance moves, the
    /// pending pot simply reads empty afterwards. Returns how many
    /// transactions were flipped.
    pub fn settle_work_pool(&mut self) -> usize {
        let mut settled = 0;
        for transaction in &mut self.transactions {
            if matches!(
                transaction.pool,
                Pool::Work {
                    status: WorkStatus::Pending
                }
            ) {
                transaction.pool = Pool::Work {
                    status: WorkStatus::Settled,
                };
                settled += 1;
            }
        }
        settled
    }

    // --- budgets ----------------------------------------------------------

    /// Set the spending limit for a category in a month
    ///
    /// Replaces any existing budget for the same (category, month) pair.
    /// Returns the id of the new record.
    pub fn set_budget(
        &mut self,
        category: &str,
        limit: Decimal,
        currency: Currency,
        month: &str,
    ) -> Result<String, LedgerError> {
        if limit <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(limit));
        }
        self.budgets
            .retain(|b| !(b.category == category && b.month == month));
        let id = Uuid::new_v4().to_string();
        self.budgets.push(Budget {
            id: id.clone(),
            category: category.to_string(),
            limit,
            currency,
            month: month.to_string(),
        });
        Ok(id)
    }

    /// Delete a budget record by id
    pub fn delete_budget(&mut self, id: &str) -> Result<Budget, LedgerError> {
        let index = self
            .budgets
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| LedgerError::budget_not_found(id))?;
        Ok(self.budgets.remove(index))
    }

    // --- categories -------------------------------------------------------

    /// Replace the expense category list
    pub fn set_expense_categories(&mut self, categories: Vec<String>) {
        self.expense_categories = categories;
    }

    /// Replace the income category list
    pub fn set_income_categories(&mut self, categories: Vec<String>) {
        self.income_categories = categories;
    }

    // --- investments ------------------------------------------------------

    /// Open a position, debiting the funding account via a transfer
    ///
    /// The funding account must exist, match the order currency, and hold at
    /// least `capital + buy_commission`; otherwise nothing is applied.
    /// Returns the id of the new investment.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` / `InvalidCommission` on non-positive capital or
    ///   negative commission
    /// * `AccountNotFound` / `CurrencyMismatch` on a bad funding account
    /// * `InsufficientFunds` when the account cannot cover the total cost
    pub fn open_investment(&mut self, order: InvestmentOrder) -> Result<String, LedgerError> {
        if order.capital <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(order.capital));
        }
        if order.buy_commission < Decimal::ZERO {
            return Err(LedgerError::invalid_commission(order.buy_commission));
        }

        let source = self
            .account(&order.source_account_id)
            .ok_or_else(|| LedgerError::account_not_found(&order.source_account_id))?;
        if source.currency != order.currency {
            return Err(LedgerError::currency_mismatch(
                &source.id,
                order.currency,
                source.currency,
            ));
        }
        let total_cost = order.capital + order.buy_commission;
        if source.balance < total_cost {
            return Err(LedgerError::insufficient_funds(
                &source.id,
                source.balance,
                total_cost,
            ));
        }
        let broker_id =
            (source.account_type == AccountType::Broker).then(|| source.id.clone());

        let quantity = match order.quantity {
            Some(q) if q > Decimal::ZERO => q,
            _ if order.buy_price > Decimal::ZERO => order.capital / order.buy_price,
            _ => Decimal::ONE,
        };
        let unit_value = first_positive(&[
            order.current_market_price,
            order.buy_price,
            order.capital,
        ]);

        let investment_id = Uuid::new_v4().to_string();
        self.investments.push(Investment {
            id: investment_id.clone(),
            name: order.name.clone(),
            ticker: order.ticker,
            broker_id,
            initial_investment: order.capital,
            quantity,
            buy_price: order.buy_price,
            current_market_price: order.current_market_price,
            value: quantity * unit_value,
            currency: order.currency,
            performance: Decimal::ZERO,
            category: order.category,
            date: Some(order.date.clone()),
            yield_rate: order.yield_rate,
            yield_period: order.yield_period,
        });

        let mut funding = Transaction::new(
            Uuid::new_v4().to_string(),
            format!("Inversión: {}", order.name),
            order.capital,
            TransactionKind::Transfer {
                to_account_id: None,
                target_amount: None,
            },
            INVESTMENT_CATEGORY,
            order.date,
            order.currency,
            order.source_account_id,
        );
        funding.commission = order.buy_commission;
        funding.related_investment_id = Some(investment_id.clone());
        self.add_transaction(funding)?;

        Ok(investment_id)
    }

    /// Mark a position to market with a freshly observed price
    pub fn update_market_price(&mut self, id: &str, price: Decimal) -> Result<(), LedgerError> {
        if price <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(price));
        }
        let investment = self
            .investments
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| LedgerError::investment_not_found(id))?;
        investment.mark_to_market(price);
        Ok(())
    }

    /// Sell part (or all) of a position
    ///
    /// Reduces quantity and cost basis proportionally and, when a target
    /// account is given, credits it with `units × sell_price - commission`
    /// through a destination-only transfer. Liquidation proceeds are not
    /// personal income. A position sold down to zero units is closed and
    /// removed. Returns the id of the emitted transfer, if any.
    pub fn liquidate_investment(
        &mut self,
        id: &str,
        order: LiquidationOrder,
    ) -> Result<Option<String>, LedgerError> {
        if order.units <= Decimal::ZERO || order.sell_price <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(order.units.min(order.sell_price)));
        }
        if order.commission < Decimal::ZERO {
            return Err(LedgerError::invalid_commission(order.commission));
        }

        let index = self
            .investments
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| LedgerError::investment_not_found(id))?;
        {
            let investment = &self.investments[index];
            if order.units > investment.quantity {
                return Err(LedgerError::insufficient_units(
                    id,
                    investment.quantity,
                    order.units,
                ));
            }
            if let Some(target_id) = &order.target_account_id {
                let target = self
                    .account(target_id)
                    .ok_or_else(|| LedgerError::account_not_found(target_id))?;
                if target.currency != investment.currency {
                    return Err(LedgerError::currency_mismatch(
                        target_id,
                        investment.currency,
                        target.currency,
                    ));
                }
            }
        }

        let investment = &mut self.investments[index];
        investment.quantity -= order.units;
        investment.initial_investment -= order.units * investment.buy_price;
        let unit_value = first_positive(&[investment.current_market_price, order.sell_price]);
        investment.value = investment.quantity * unit_value;

        let name = investment.name.clone();
        let currency = investment.currency;
        let closed = investment.quantity.is_zero();
        if closed {
            self.investments.remove(index);
        }

        let Some(target_id) = order.target_account_id else {
            return Ok(None);
        };
        let mut proceeds = Transaction::new(
            Uuid::new_v4().to_string(),
            format!("Venta/Liquidación: {name}"),
            order.units * order.sell_price,
            TransactionKind::Transfer {
                to_account_id: Some(target_id),
                target_amount: None,
            },
            INVESTMENT_CATEGORY,
            order.date,
            currency,
            String::new(),
        );
        proceeds.commission = order.commission;
        proceeds.related_investment_id = Some(id.to_string());
        let transaction_id = proceeds.id.clone();
        self.add_transaction(proceeds)?;

        Ok(Some(transaction_id))
    }

    /// Record a yield/dividend payout into a target account
    ///
    /// Pure cash income: quantity, cost basis and market value of the
    /// position are untouched. Returns the id of the emitted transaction.
    pub fn record_yield(
        &mut self,
        id: &str,
        amount: Decimal,
        target_account_id: &str,
        date: &str,
    ) -> Result<String, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }
        let investment = self
            .investment(id)
            .ok_or_else(|| LedgerError::investment_not_found(id))?;
        let currency = investment.currency;
        let name = investment.name.clone();
        let target = self
            .account(target_account_id)
            .ok_or_else(|| LedgerError::account_not_found(target_account_id))?;
        if target.currency != currency {
            return Err(LedgerError::currency_mismatch(
                target_account_id,
                currency,
                target.currency,
            ));
        }

        let mut payout = Transaction::new(
            Uuid::new_v4().to_string(),
            format!("Rendimiento: {name}"),
            amount,
            TransactionKind::Income,
            INVESTMENT_CATEGORY,
            date,
            currency,
            target_account_id,
        );
        payout.related_investment_id = Some(id.to_string());
        let transaction_id = payout.id.clone();
        self.add_transaction(payout)?;
        Ok(transaction_id)
    }

    // --- derived views ----------------------------------------------------

    /// Personal income/expense flow for a month
    pub fn monthly_flow(&self, month: &str, rate: ExchangeRate) -> MonthlyFlow {
        pools::monthly_flow(&self.transactions, month, rate)
    }

    /// The pending work pot
    pub fn work_pot(&self, rate: ExchangeRate) -> WorkPot {
        pools::work_pot(&self.transactions, rate)
    }

    /// Custody pots per owner
    pub fn custody_pots(&self, rate: ExchangeRate) -> BTreeMap<String, CustodyPot> {
        pools::custody_pots(&self.transactions, rate)
    }

    /// Net-worth breakdown
    pub fn net_worth(&self, rate: ExchangeRate) -> NetWorth {
        report::net_worth(&self.accounts, &self.transactions, &self.investments, rate)
    }

    /// Budget statuses for a month, carry-forward applied
    pub fn budget_statuses(&self, month: &str, rate: ExchangeRate) -> Vec<BudgetStatus<'_>> {
        budget::evaluate_month(&self.budgets, &self.transactions, month, rate)
    }

    /// Credit summaries for every credit-card account
    pub fn credit_summaries(&self) -> Vec<(&Account, CreditSummary)> {
        self.accounts
            .iter()
            .filter(|a| a.is_credit())
            .map(|a| (a, credit::credit_summary(a)))
            .collect()
    }
}

impl Default for FinanceEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// First strictly positive value in the slice, or zero
fn first_positive(values: &[Decimal]) -> Decimal {
    values
        .iter()
        .copied()
        .find(|v| *v > Decimal::ZERO)
        .unwrap_or(Decimal::ZERO)
}
