//! Net-worth and dashboard projections
//!
//! Read-only aggregation over the entity collections, recomputed from
//! scratch on every call. At the expected data volumes (thousands of
//! transactions) full scans are cheap; no caching layer hides behind these
//! functions.

use crate::core::pools;
use crate::types::{Account, ExchangeRate, Investment, Transaction};
use rust_decimal::Decimal;

/// Net-worth breakdown in USD
///
/// Liquid funds sum every account balance normalized to USD; credit-card
/// debt participates through its negative balance. Custody money sits in
/// those same accounts but belongs to other people, so it is subtracted as
/// a liability. Investments add their mark-to-market value.
#[derive(Debug, Clone, PartialEq)]
pub struct NetWorth {
    /// Sum of all account balances, USD-normalized
    pub liquid_usd: Decimal,
    /// Total owed back to custody owners
    pub custody_liability_usd: Decimal,
    /// Mark-to-market value of all open positions
    pub investment_value_usd: Decimal,
    /// liquid - custody + investments
    pub net_worth_usd: Decimal,
}

impl NetWorth {
    /// Cash that is actually the user's own, floored at 0 for display
    pub fn own_cash_usd(&self) -> Decimal {
        (self.liquid_usd - self.custody_liability_usd).max(Decimal::ZERO)
    }

    /// Custody share of cash on hand, floored at 0 for display
    pub fn custody_cash_usd(&self) -> Decimal {
        self.custody_liability_usd.max(Decimal::ZERO)
    }
}

/// Compute the net-worth breakdown
pub fn net_worth(
    accounts: &[Account],
    transactions: &[Transaction],
    investments: &[Investment],
    rate: ExchangeRate,
) -> NetWorth {
    let liquid_usd = accounts
        .iter()
        .map(|a| rate.to_usd(a.balance, a.currency))
        .sum::<Decimal>();

    let custody_liability_usd = pools::total_custody_liability(transactions, rate);

    let investment_value_usd = investments
        .iter()
        .map(|i| rate.to_usd(i.value, i.currency))
        .sum::<Decimal>();

    NetWorth {
        liquid_usd,
        custody_liability_usd,
        investment_value_usd,
        net_worth_usd: liquid_usd - custody_liability_usd + investment_value_usd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountType, Currency, InvestmentCategory, Pool, TransactionKind};

    fn account(id: &str, account_type: AccountType, balance: i64, currency: Currency) -> Account {
        Account::new(id, id, account_type, Decimal::new(balance, 0), currency, "#888")
    }

    fn investment(value: i64, currency: Currency) -> Investment {
        Investment {
            id: "inv-1".to_string(),
            name: "NVDA".to_string(),
            ticker: None,
            broker_id: None,
            initial_investment: Decimal::new(value, 0),
            quantity: Decimal::ONE,
            buy_price: Decimal::new(value, 0),
            current_market_price: Decimal::new(value, 0),
            value: Decimal::new(value, 0),
            currency,
            performance: Decimal::ZERO,
            category: InvestmentCategory::StocksEtfs,
            date: None,
            yield_rate: None,
            yield_period: None,
        }
    }

    fn rate() -> ExchangeRate {
        ExchangeRate::new(Decimal::new(4550, 2)).unwrap()
    }

    #[test]
    fn test_net_worth_breakdown() {
        let accounts = vec![
            account("a", AccountType::Checking, 1000, Currency::Usd),
            // 9100 VES → 200 USD
            account("b", AccountType::Savings, 9100, Currency::Ves),
            // Credit card owing 300: negative balance reduces liquidity
            account("cc", AccountType::CreditCard, -300, Currency::Usd),
        ];
        let mut custody = crate::types::Transaction::new(
            "c1",
            "holding for Ana",
            Decimal::new(250, 0),
            TransactionKind::Income,
            "Otros",
            "2024-05-01",
            Currency::Usd,
            "a",
        );
        custody.pool = Pool::custody("Ana");
        let investments = vec![investment(500, Currency::Usd)];

        let breakdown = net_worth(&accounts, &[custody], &investments, rate());
        assert_eq!(breakdown.liquid_usd, Decimal::new(900, 0));
        assert_eq!(breakdown.custody_liability_usd, Decimal::new(250, 0));
        assert_eq!(breakdown.investment_value_usd, Decimal::new(500, 0));
        assert_eq!(breakdown.net_worth_usd, Decimal::new(1150, 0));
        assert_eq!(breakdown.own_cash_usd(), Decimal::new(650, 0));
        assert_eq!(breakdown.custody_cash_usd(), Decimal::new(250, 0));
    }

    #[test]
    fn test_net_worth_empty_state_is_zero() {
        let breakdown = net_worth(&[], &[], &[], rate());
        assert_eq!(breakdown.net_worth_usd, Decimal::ZERO);
        assert_eq!(breakdown.own_cash_usd(), Decimal::ZERO);
    }

    #[test]
    fn test_own_cash_floors_at_zero() {
        // More custody liability than cash on hand
        let accounts = vec![account("a", AccountType::Cash, 100, Currency::Usd)];
        let mut custody = crate::types::Transaction::new(
            "c1",
            "holding",
            Decimal::new(400, 0),
            TransactionKind::Income,
            "Otros",
            "2024-05-01",
            Currency::Usd,
            "a",
        );
        custody.pool = Pool::custody("Ana");
        let breakdown = net_worth(&accounts, &[custody], &[], rate());
        assert_eq!(breakdown.own_cash_usd(), Decimal::ZERO);
        assert_eq!(breakdown.net_worth_usd, Decimal::new(-300, 0));
    }
}
