//! Pool segregation
//!
//! Splits the transaction history into three non-overlapping views and
//! derives each one's running numbers. Personal is "everything else",
//! feeding the dashboard flow totals; the work pot tracks employer advances
//! against expensed spend; custody pots track money held for other people,
//! which is a liability against the user's own net worth.
//!
//! Pool membership is a single enum on the transaction, so no event can be
//! counted in two pools.

use crate::types::{Currency, ExchangeRate, Pool, Transaction, TransactionKind, WorkStatus};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Owner label used when a custody entry arrives without one
pub const UNKNOWN_OWNER: &str = "Unknown";

/// Personal income/expense flow for one month
///
/// Only Income and Expense kinds count; transfers and adjustments move
/// money around without being earnings or spending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlyFlow {
    /// Income recorded in USD accounts
    pub income_usd: Decimal,
    /// Income recorded in VES accounts
    pub income_ves: Decimal,
    /// Expenses recorded in USD
    pub expense_usd: Decimal,
    /// Expenses recorded in VES
    pub expense_ves: Decimal,
    /// All income normalized to USD
    pub total_income_usd: Decimal,
    /// All expenses normalized to USD
    pub total_expense_usd: Decimal,
}

impl MonthlyFlow {
    /// Net result of the month in USD (income - expenses)
    pub fn net_usd(&self) -> Decimal {
        self.total_income_usd - self.total_expense_usd
    }
}

/// Status of the work pot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkPotStatus {
    /// Employer advances cover the spend; company money is in hand
    Funded,
    /// Spend exceeds advances; the employer owes a reimbursement
    Owed,
}

/// The pending work pot
#[derive(Debug, Clone, PartialEq)]
pub struct WorkPot {
    /// Advances received from the employer, USD-normalized
    pub total_advances: Decimal,
    /// Work spend already laid out, USD-normalized
    pub total_expenses: Decimal,
    /// Advances minus spend
    pub balance: Decimal,
    /// Funded when the balance is ≥ 0, otherwise owed
    pub status: WorkPotStatus,
    /// Ids of the pending transactions making up the pot
    pub transaction_ids: Vec<String>,
}

impl WorkPot {
    /// Percent of received advances already consumed, capped at 100
    ///
    /// `None` when no advances have been received yet.
    pub fn consumed_pct(&self) -> Option<Decimal> {
        if self.total_advances > Decimal::ZERO {
            Some(
                (self.total_expenses / self.total_advances * Decimal::ONE_HUNDRED)
                    .min(Decimal::ONE_HUNDRED),
            )
        } else {
            None
        }
    }
}

/// One custody pot: money held for a single owner
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustodyPot {
    /// Money received into custody, USD-normalized
    pub entries: Decimal,
    /// Money paid out of custody, USD-normalized
    pub exits: Decimal,
    /// What is still owed back to the owner
    pub balance: Decimal,
}

/// Personal income/expense flow for the given month
pub fn monthly_flow(transactions: &[Transaction], month: &str, rate: ExchangeRate) -> MonthlyFlow {
    let mut flow = MonthlyFlow::default();

    for t in transactions {
        if t.pool != Pool::Personal || !t.in_month(month) {
            continue;
        }
        match (&t.kind, t.currency) {
            (TransactionKind::Income, Currency::Usd) => flow.income_usd += t.amount,
            (TransactionKind::Income, Currency::Ves) => flow.income_ves += t.amount,
            (TransactionKind::Expense, Currency::Usd) => flow.expense_usd += t.amount,
            (TransactionKind::Expense, Currency::Ves) => flow.expense_ves += t.amount,
            _ => {}
        }
    }

    flow.total_income_usd = flow.income_usd + rate.to_usd(flow.income_ves, Currency::Ves);
    flow.total_expense_usd = flow.expense_usd + rate.to_usd(flow.expense_ves, Currency::Ves);
    flow
}

/// The pot of pending work transactions
///
/// Settled entries are already reconciled with the employer and no longer
/// count. Advances are income-kind entries, spend is expense-kind; other
/// kinds inside the work pool affect neither total.
pub fn work_pot(transactions: &[Transaction], rate: ExchangeRate) -> WorkPot {
    let mut total_advances = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut transaction_ids = Vec::new();

    for t in transactions {
        if !matches!(
            t.pool,
            Pool::Work {
                status: WorkStatus::Pending
            }
        ) {
            continue;
        }
        transaction_ids.push(t.id.clone());
        let amount_usd = rate.to_usd(t.amount, t.currency);
        match t.kind {
            TransactionKind::Income => total_advances += amount_usd,
            TransactionKind::Expense => total_expenses += amount_usd,
            _ => {}
        }
    }

    let balance = total_advances - total_expenses;
    WorkPot {
        total_advances,
        total_expenses,
        balance,
        status: if balance >= Decimal::ZERO {
            WorkPotStatus::Funded
        } else {
            WorkPotStatus::Owed
        },
        transaction_ids,
    }
}

/// Custody pots grouped per owner, ordered by owner name
///
/// Entries without an owner are grouped under [`UNKNOWN_OWNER`]. Each pot's
/// balance is what the user still owes back: custody income raises it,
/// custody spend on the owner's behalf lowers it.
pub fn custody_pots(transactions: &[Transaction], rate: ExchangeRate) -> BTreeMap<String, CustodyPot> {
    let mut pots: BTreeMap<String, CustodyPot> = BTreeMap::new();

    for t in transactions {
        let Pool::Custody { owner } = &t.pool else {
            continue;
        };
        let key = if owner.is_empty() {
            UNKNOWN_OWNER.to_string()
        } else {
            owner.clone()
        };
        let pot = pots.entry(key).or_default();
        let amount_usd = rate.to_usd(t.amount, t.currency);
        match t.kind {
            TransactionKind::Income => {
                pot.entries += amount_usd;
                pot.balance += amount_usd;
            }
            TransactionKind::Expense => {
                pot.exits += amount_usd;
                pot.balance -= amount_usd;
            }
            _ => {}
        }
    }

    pots
}

/// Total custody liability in USD across all owners
pub fn total_custody_liability(transactions: &[Transaction], rate: ExchangeRate) -> Decimal {
    custody_pots(transactions, rate)
        .values()
        .map(|pot| pot.balance)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(
        id: &str,
        kind: TransactionKind,
        amount: i64,
        currency: Currency,
        date: &str,
        pool: Pool,
    ) -> Transaction {
        let mut t = Transaction::new(
            id,
            "test",
            Decimal::new(amount, 0),
            kind,
            "Otros",
            date,
            currency,
            "acc-1",
        );
        t.pool = pool;
        t
    }

    fn mixed_history() -> Vec<Transaction> {
        vec![
            tx("p1", TransactionKind::Income, 1000, Currency::Usd, "2024-05-01", Pool::Personal),
            tx("p2", TransactionKind::Income, 4550, Currency::Ves, "2024-05-02", Pool::Personal),
            tx("p3", TransactionKind::Expense, 200, Currency::Usd, "2024-05-03", Pool::Personal),
            tx("p4", TransactionKind::Expense, 9100, Currency::Ves, "2024-05-04", Pool::Personal),
            // Transfers and adjustments never count as flow
            tx("p5", TransactionKind::transfer_to("acc-2"), 500, Currency::Usd, "2024-05-05", Pool::Personal),
            // Work and custody money stays out of the personal flow
            tx("w1", TransactionKind::Income, 200, Currency::Usd, "2024-05-06", Pool::pending_work()),
            tx("w2", TransactionKind::Expense, 150, Currency::Usd, "2024-05-07", Pool::pending_work()),
            tx("c1", TransactionKind::Income, 300, Currency::Usd, "2024-05-08", Pool::custody("Ana")),
            tx("c2", TransactionKind::Expense, 50, Currency::Usd, "2024-05-09", Pool::custody("Ana")),
            tx("c3", TransactionKind::Income, 455, Currency::Ves, "2024-05-10", Pool::custody("")),
            // Other month
            tx("p6", TransactionKind::Income, 999, Currency::Usd, "2024-04-30", Pool::Personal),
        ]
    }

    fn rate() -> ExchangeRate {
        ExchangeRate::new(Decimal::new(4550, 2)).unwrap()
    }

    #[test]
    fn test_monthly_flow_personal_only() {
        let flow = monthly_flow(&mixed_history(), "2024-05", rate());
        assert_eq!(flow.income_usd, Decimal::new(1000, 0));
        assert_eq!(flow.income_ves, Decimal::new(4550, 0));
        assert_eq!(flow.expense_usd, Decimal::new(200, 0));
        assert_eq!(flow.expense_ves, Decimal::new(9100, 0));
        // 4550 VES → 100 USD, 9100 VES → 200 USD
        assert_eq!(flow.total_income_usd, Decimal::new(1100, 0));
        assert_eq!(flow.total_expense_usd, Decimal::new(400, 0));
        assert_eq!(flow.net_usd(), Decimal::new(700, 0));
    }

    #[test]
    fn test_work_pot_balances_and_status() {
        let pot = work_pot(&mixed_history(), rate());
        assert_eq!(pot.total_advances, Decimal::new(200, 0));
        assert_eq!(pot.total_expenses, Decimal::new(150, 0));
        assert_eq!(pot.balance, Decimal::new(50, 0));
        assert_eq!(pot.status, WorkPotStatus::Funded);
        assert_eq!(pot.transaction_ids, vec!["w1", "w2"]);
        assert_eq!(pot.consumed_pct(), Some(Decimal::new(75, 0)));
    }

    #[test]
    fn test_work_pot_owed_when_spend_exceeds_advances() {
        let history = vec![
            tx("w1", TransactionKind::Income, 100, Currency::Usd, "2024-05-01", Pool::pending_work()),
            tx("w2", TransactionKind::Expense, 180, Currency::Usd, "2024-05-02", Pool::pending_work()),
        ];
        let pot = work_pot(&history, rate());
        assert_eq!(pot.balance, Decimal::new(-80, 0));
        assert_eq!(pot.status, WorkPotStatus::Owed);
    }

    #[test]
    fn test_work_pot_ignores_settled() {
        let history = vec![tx(
            "w1",
            TransactionKind::Income,
            100,
            Currency::Usd,
            "2024-05-01",
            Pool::Work {
                status: WorkStatus::Settled,
            },
        )];
        let pot = work_pot(&history, rate());
        assert_eq!(pot.balance, Decimal::ZERO);
        assert!(pot.transaction_ids.is_empty());
        assert_eq!(pot.consumed_pct(), None);
    }

    #[test]
    fn test_custody_pots_group_by_owner() {
        let pots = custody_pots(&mixed_history(), rate());
        assert_eq!(pots.len(), 2);

        let ana = &pots["Ana"];
        assert_eq!(ana.entries, Decimal::new(300, 0));
        assert_eq!(ana.exits, Decimal::new(50, 0));
        assert_eq!(ana.balance, Decimal::new(250, 0));

        // Empty owner falls into the Unknown pot, VES normalized to USD
        let unknown = &pots[UNKNOWN_OWNER];
        assert_eq!(unknown.balance, Decimal::new(10, 0));

        assert_eq!(
            total_custody_liability(&mixed_history(), rate()),
            Decimal::new(260, 0)
        );
    }

    #[test]
    fn test_pools_partition_every_transaction_once() {
        let history = mixed_history();
        let rate = rate();
        let work_ids = work_pot(&history, rate).transaction_ids;
        let custody_count: usize = history
            .iter()
            .filter(|t| matches!(t.pool, Pool::Custody { .. }))
            .count();
        let personal_count = history
            .iter()
            .filter(|t| t.pool == Pool::Personal)
            .count();
        let settled_work_count = history
            .iter()
            .filter(|t| {
                matches!(
                    t.pool,
                    Pool::Work {
                        status: WorkStatus::Settled
                    }
                )
            })
            .count();

        assert_eq!(
            personal_count + work_ids.len() + settled_work_count + custody_count,
            history.len()
        );
    }
}
