//! Investment types
//!
//! A position in a priced asset (stocks, crypto) or an informal
//! income-generating placement (a loan to a relative, real estate). Priced
//! assets are marked to market with externally supplied prices; non-priced
//! categories carry a yield rate instead and track value directly.

use crate::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Asset classes a position can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvestmentCategory {
    /// Exchange-traded equities and funds
    StocksEtfs,
    /// Cryptocurrencies
    Crypto,
    /// Fixed income and informal loans/receivables
    FixedIncome,
    /// Real estate
    RealEstate,
    /// Anything else
    Other,
}

/// Period a yield rate is quoted over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YieldPeriod {
    /// Rate accrues monthly
    Monthly,
    /// Rate accrues annually
    Annual,
}

/// A position in an asset or receivable
///
/// `initial_investment` is the cumulative cost basis and shrinks
/// proportionally on partial sales. A position whose quantity reaches zero
/// is removed from the active set by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    /// Unique investment id
    pub id: String,

    /// Display name ("NVDA shares", "Loan to Pedro", ...)
    pub name: String,

    /// Ticker symbol for priced assets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,

    /// Broker account the position was funded from, when that account is a
    /// broker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_id: Option<String>,

    /// Cumulative cost basis; decreases on partial sale
    pub initial_investment: Decimal,

    /// Units held; decreases on partial sale, never negative
    pub quantity: Decimal,

    /// Cost per unit at purchase
    pub buy_price: Decimal,

    /// Latest externally supplied market price per unit
    pub current_market_price: Decimal,

    /// Mark-to-market value (quantity × price), or directly tracked value
    /// for non-priced categories
    pub value: Decimal,

    /// Currency the position is denominated in
    pub currency: Currency,

    /// Percent gain/loss versus the buy price; only meaningful when
    /// `buy_price > 0`
    pub performance: Decimal,

    /// Asset class
    pub category: InvestmentCategory,

    /// Purchase date, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Quoted yield rate (percent) for income-generating positions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_rate: Option<Decimal>,

    /// Period the yield rate is quoted over
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_period: Option<YieldPeriod>,
}

impl Investment {
    /// Recompute value and performance from a fresh market price
    ///
    /// `value = quantity × price`; performance stays 0 when there is no
    /// meaningful buy price to compare against.
    pub fn mark_to_market(&mut self, price: Decimal) {
        self.current_market_price = price;
        self.value = self.quantity * price;
        self.performance = if self.buy_price > Decimal::ZERO {
            (price - self.buy_price) / self.buy_price * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> Investment {
        Investment {
            id: "inv-1".to_string(),
            name: "NVDA".to_string(),
            ticker: Some("NVDA".to_string()),
            broker_id: None,
            initial_investment: Decimal::new(500, 0),
            quantity: Decimal::new(10, 0),
            buy_price: Decimal::new(50, 0),
            current_market_price: Decimal::new(50, 0),
            value: Decimal::new(500, 0),
            currency: Currency::Usd,
            performance: Decimal::ZERO,
            category: InvestmentCategory::StocksEtfs,
            date: None,
            yield_rate: None,
            yield_period: None,
        }
    }

    #[test]
    fn test_mark_to_market_updates_value_and_performance() {
        let mut inv = position();
        inv.mark_to_market(Decimal::new(60, 0));
        assert_eq!(inv.current_market_price, Decimal::new(60, 0));
        assert_eq!(inv.value, Decimal::new(600, 0));
        assert_eq!(inv.performance, Decimal::new(20, 0));
    }

    #[test]
    fn test_mark_to_market_loss() {
        let mut inv = position();
        inv.mark_to_market(Decimal::new(40, 0));
        assert_eq!(inv.performance, Decimal::new(-20, 0));
    }

    #[test]
    fn test_mark_to_market_without_buy_price() {
        let mut inv = position();
        inv.buy_price = Decimal::ZERO;
        inv.mark_to_market(Decimal::new(75, 0));
        assert_eq!(inv.performance, Decimal::ZERO);
        assert_eq!(inv.value, Decimal::new(750, 0));
    }
}
