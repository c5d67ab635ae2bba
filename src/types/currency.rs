//! Currency and exchange-rate types
//!
//! All cross-currency aggregation in the engine goes through [`ExchangeRate`],
//! a single shared USD/VES rate. The rate is externally supplied state (the
//! application refreshes it from an outside source); the engine only requires
//! it to be positive and falls back to a fixed default when no fresh rate is
//! available.

use crate::types::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two currencies the ledger understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// United States dollar
    Usd,
    /// Venezuelan bolívar
    Ves,
}

impl Currency {
    /// Display symbol used by reports ("$" / "Bs")
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Ves => "Bs",
        }
    }
}

/// Shared USD→VES exchange rate
///
/// Wraps a positive `Decimal`: one USD buys `rate` VES. Construction rejects
/// non-positive rates so every conversion below is division-safe.
///
/// No rounding is applied by the conversions; display-time formatting owns
/// precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// Fallback rate used when no externally refreshed rate is available
    pub const FALLBACK: Decimal = Decimal::from_parts(4550, 0, 0, false, 2);

    /// Create a rate, rejecting values ≤ 0
    pub fn new(rate: Decimal) -> Result<Self, LedgerError> {
        if rate <= Decimal::ZERO {
            return Err(LedgerError::invalid_rate(rate));
        }
        Ok(ExchangeRate(rate))
    }

    /// The raw VES-per-USD value
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Normalize an amount to USD
    ///
    /// USD amounts pass through untouched; VES amounts divide by the rate.
    pub fn to_usd(&self, amount: Decimal, currency: Currency) -> Decimal {
        match currency {
            Currency::Usd => amount,
            Currency::Ves => amount / self.0,
        }
    }

    /// Normalize an amount to VES
    ///
    /// VES amounts pass through untouched; USD amounts multiply by the rate.
    pub fn to_ves(&self, amount: Decimal, currency: Currency) -> Decimal {
        match currency {
            Currency::Usd => amount * self.0,
            Currency::Ves => amount,
        }
    }

    /// Convert an amount from its own currency into `target`
    pub fn convert(&self, amount: Decimal, from: Currency, target: Currency) -> Decimal {
        match target {
            Currency::Usd => self.to_usd(amount, from),
            Currency::Ves => self.to_ves(amount, from),
        }
    }
}

impl Default for ExchangeRate {
    /// The 45.50 fallback rate
    fn default() -> Self {
        ExchangeRate(Self::FALLBACK)
    }
}

impl TryFrom<Decimal> for ExchangeRate {
    type Error = LedgerError;

    fn try_from(rate: Decimal) -> Result<Self, Self::Error> {
        ExchangeRate::new(rate)
    }
}

impl From<ExchangeRate> for Decimal {
    fn from(rate: ExchangeRate) -> Self {
        rate.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rate(units: i64, scale: u32) -> ExchangeRate {
        ExchangeRate::new(Decimal::new(units, scale)).unwrap()
    }

    #[test]
    fn test_default_rate_is_fallback() {
        assert_eq!(ExchangeRate::default().value(), Decimal::new(4550, 2));
    }

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::negative(Decimal::new(-455, 1))]
    fn test_non_positive_rate_rejected(#[case] value: Decimal) {
        let result = ExchangeRate::new(value);
        assert!(matches!(result, Err(LedgerError::InvalidRate { .. })));
    }

    #[test]
    fn test_usd_passes_through_to_usd() {
        let r = rate(4550, 2);
        assert_eq!(
            r.to_usd(Decimal::new(100, 0), Currency::Usd),
            Decimal::new(100, 0)
        );
    }

    #[test]
    fn test_ves_divides_to_usd() {
        // 4550 VES at 45.50 is exactly 100 USD
        let r = rate(4550, 2);
        assert_eq!(
            r.to_usd(Decimal::new(4550, 0), Currency::Ves),
            Decimal::new(100, 0)
        );
    }

    #[test]
    fn test_usd_multiplies_to_ves() {
        let r = rate(4550, 2);
        assert_eq!(
            r.to_ves(Decimal::new(2, 0), Currency::Usd),
            Decimal::new(9100, 2)
        );
    }

    #[test]
    fn test_ves_passes_through_to_ves() {
        let r = rate(4550, 2);
        assert_eq!(
            r.to_ves(Decimal::new(500, 0), Currency::Ves),
            Decimal::new(500, 0)
        );
    }

    #[rstest]
    #[case::usd_to_usd(Currency::Usd, Currency::Usd, Decimal::new(10, 0))]
    #[case::usd_to_ves(Currency::Usd, Currency::Ves, Decimal::new(455, 0))]
    #[case::ves_to_usd(Currency::Ves, Currency::Usd, Decimal::new(10, 0) / Decimal::new(4550, 2))]
    #[case::ves_to_ves(Currency::Ves, Currency::Ves, Decimal::new(10, 0))]
    fn test_convert(#[case] from: Currency, #[case] target: Currency, #[case] expected: Decimal) {
        let r = rate(4550, 2);
        assert_eq!(r.convert(Decimal::new(10, 0), from, target), expected);
    }
}
