//! Budget evaluator
//!
//! Resolves the active spending limit for a category in a given month and
//! measures actual spend against it. A month without its own budget inherits
//! the most recent earlier month's limit for the same category: a read-time
//! projection, not a stored record.

use crate::types::{Budget, Currency, ExchangeRate, Transaction, TransactionKind};
use rust_decimal::Decimal;

/// Percentage at which a budget is flagged as approaching its limit
const NEAR_LIMIT_PCT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Health band of a budget for a month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetHealth {
    /// Spend exceeds the limit
    Exceeded,
    /// Spend is at 80% or more of the limit, but not over it
    NearLimit,
    /// Spend is comfortably under the limit
    OnTrack,
}

/// A budget resolved for a month, with spend measured against it
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus<'a> {
    /// The governing budget record (possibly from an earlier month)
    pub budget: &'a Budget,
    /// Whether the record was carried forward from an earlier month
    pub inherited: bool,
    /// Total spent this month in the budget's currency
    pub spent: Decimal,
    /// Percent of the limit consumed, capped at 100
    pub percentage: Decimal,
    /// Health band
    pub health: BudgetHealth,
    /// Remaining headroom, floored at 0
    pub remaining: Decimal,
}

/// Resolve the budget governing `category` in `month`
///
/// Exact (category, month) match wins; otherwise the budget for that
/// category with the greatest month strictly before the queried one; `None`
/// when the category has no budget in any prior period. Zero-padded
/// `YYYY-MM` strings make plain string comparison chronological.
pub fn active_budget<'a>(budgets: &'a [Budget], category: &str, month: &str) -> Option<&'a Budget> {
    if let Some(exact) = budgets
        .iter()
        .find(|b| b.category == category && b.month == month)
    {
        return Some(exact);
    }

    budgets
        .iter()
        .filter(|b| b.category == category && b.month.as_str() < month)
        .max_by(|a, b| a.month.cmp(&b.month))
}

/// Sum expense spend for `category` in `month`, in `budget_currency`
///
/// Only expense-kind transactions count. Amounts in another currency are
/// converted into the budget's currency through the shared rate.
pub fn spent(
    transactions: &[Transaction],
    category: &str,
    month: &str,
    budget_currency: Currency,
    rate: ExchangeRate,
) -> Decimal {
    transactions
        .iter()
        .filter(|t| {
            matches!(t.kind, TransactionKind::Expense) && t.in_month(month) && t.category == category
        })
        .map(|t| rate.convert(t.amount, t.currency, budget_currency))
        .sum()
}

/// Resolve and evaluate every budgeted category for a month
///
/// One entry per category that has any budget at or before `month`, in the
/// order categories first appear in the budget list.
pub fn evaluate_month<'a>(
    budgets: &'a [Budget],
    transactions: &[Transaction],
    month: &str,
    rate: ExchangeRate,
) -> Vec<BudgetStatus<'a>> {
    let mut categories: Vec<&str> = Vec::new();
    for budget in budgets {
        if !categories.contains(&budget.category.as_str()) {
            categories.push(&budget.category);
        }
    }

    categories
        .iter()
        .filter_map(|category| {
            let budget = active_budget(budgets, category, month)?;
            Some(evaluate(budget, transactions, month, rate))
        })
        .collect()
}

/// Measure one resolved budget against a month's spend
pub fn evaluate<'a>(
    budget: &'a Budget,
    transactions: &[Transaction],
    month: &str,
    rate: ExchangeRate,
) -> BudgetStatus<'a> {
    let spent = spent(transactions, &budget.category, month, budget.currency, rate);
    let percentage = if budget.limit > Decimal::ZERO {
        (spent / budget.limit * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };
    let health = if spent > budget.limit {
        BudgetHealth::Exceeded
    } else if percentage >= NEAR_LIMIT_PCT {
        BudgetHealth::NearLimit
    } else {
        BudgetHealth::OnTrack
    };

    BudgetStatus {
        budget,
        inherited: budget.month != month,
        spent,
        percentage,
        health,
        remaining: (budget.limit - spent).max(Decimal::ZERO),
    }
}
