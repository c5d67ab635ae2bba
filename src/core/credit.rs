//! Credit account model
//!
//! Pure derivation from account state; no debt field is stored anywhere.
//! A credit card's balance holds the negative of its debt, so everything a
//! dashboard shows (debt, available credit and utilization) is computed here
//! on demand.

use crate::types::Account;
use rust_decimal::Decimal;

/// Utilization percentage at or above which an account is flagged
pub const HIGH_UTILIZATION_PCT: Decimal = Decimal::from_parts(85, 0, 0, false, 0);

/// Derived view of a credit account
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditSummary {
    /// Current debt, ≥ 0
    pub debt: Decimal,
    /// Credit limit, ≥ 0
    pub limit: Decimal,
    /// Remaining spendable credit, ≥ 0
    pub available: Decimal,
    /// Percent of the limit currently drawn, clamped to [0, 100]
    pub utilization_pct: Decimal,
}

impl CreditSummary {
    /// Whether utilization has crossed the high-usage alert threshold
    ///
    /// A read-only classification; nothing blocks further spending.
    pub fn high_usage(&self) -> bool {
        self.utilization_pct >= HIGH_UTILIZATION_PCT
    }
}

/// Derive debt, available credit and utilization from an account
///
/// `debt = max(0, -balance)`; `available = max(0, limit - debt)`;
/// `utilization = min(100, debt / limit × 100)`, or 0 when no limit is set.
/// Works on any account, but only credit cards produce meaningful numbers.
pub fn credit_summary(account: &Account) -> CreditSummary {
    let debt = (-account.balance).max(Decimal::ZERO);
    let limit = account
        .credit_limit
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);
    let available = (limit - debt).max(Decimal::ZERO);
    let utilization_pct = if limit > Decimal::ZERO {
        (debt / limit * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    CreditSummary {
        debt,
        limit,
        available,
        utilization_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountType, Currency};
    use rstest::rstest;

    fn card(balance: i64, limit: Option<i64>) -> Account {
        let mut account = Account::new(
            "cc-1",
            "Visa",
            AccountType::CreditCard,
            Decimal::new(balance, 0),
            Currency::Usd,
            "#ef4444",
        );
        account.credit_limit = limit.map(|l| Decimal::new(l, 0));
        account
    }

    #[rstest]
    #[case::no_debt(0, Some(1000), 0, 1000, 0)]
    #[case::partial_debt(-300, Some(1000), 300, 700, 30)]
    #[case::at_limit(-1000, Some(1000), 1000, 0, 100)]
    #[case::over_limit_clamps(-1500, Some(1000), 1500, 0, 100)]
    #[case::positive_balance_is_zero_debt(250, Some(1000), 0, 1000, 0)]
    #[case::no_limit(-300, None, 300, 0, 0)]
    #[case::zero_limit(-300, Some(0), 300, 0, 0)]
    fn test_credit_summary(
        #[case] balance: i64,
        #[case] limit: Option<i64>,
        #[case] debt: i64,
        #[case] available: i64,
        #[case] utilization: i64,
    ) {
        let summary = credit_summary(&card(balance, limit));
        assert_eq!(summary.debt, Decimal::new(debt, 0));
        assert_eq!(summary.available, Decimal::new(available, 0));
        assert_eq!(summary.utilization_pct, Decimal::new(utilization, 0));
    }

    #[test]
    fn test_utilization_always_in_bounds() {
        for balance in [-5000, -1000, -999, -1, 0, 1, 1000] {
            for limit in [0, 1, 850, 1000] {
                let summary = credit_summary(&card(balance, Some(limit)));
                assert!(summary.utilization_pct >= Decimal::ZERO);
                assert!(summary.utilization_pct <= Decimal::ONE_HUNDRED);
                // Whenever debt fits under the limit, the split is exact
                if summary.debt <= summary.limit {
                    assert_eq!(summary.available + summary.debt, summary.limit);
                }
            }
        }
    }

    #[rstest]
    #[case::below_threshold(-840, false)]
    #[case::at_threshold(-850, true)]
    #[case::above_threshold(-900, true)]
    fn test_high_usage_threshold(#[case] balance: i64, #[case] expected: bool) {
        let summary = credit_summary(&card(balance, Some(1000)));
        assert_eq!(summary.high_usage(), expected);
    }
}
