//! CSV export of account summaries
//!
//! Writes the current account set as CSV with a USD-normalized balance
//! column, sorted by account name for deterministic output. Pure with
//! respect to I/O: the caller supplies any `Write` destination.

use crate::types::{Account, ExchangeRate, LedgerError};
use std::io::Write;

/// Write account states to CSV
///
/// Columns: id, name, type, currency, balance, balance_usd. Accounts are
/// sorted by name (then id, for stable ordering between same-named
/// accounts).
pub fn write_accounts_csv(
    accounts: &[Account],
    rate: ExchangeRate,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["id", "name", "type", "currency", "balance", "balance_usd"])?;

    let mut sorted: Vec<&Account> = accounts.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    for account in sorted {
        let balance_usd = rate.to_usd(account.balance, account.currency);
        writer.write_record(&[
            account.id.clone(),
            account.name.clone(),
            account.account_type.to_string(),
            format!("{:?}", account.currency).to_uppercase(),
            account.balance.normalize().to_string(),
            balance_usd.normalize().to_string(),
        ])?;
    }

    writer.flush().map_err(LedgerError::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountType, Currency};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn account(id: &str, name: &str, balance: i64, currency: Currency) -> Account {
        Account::new(
            id,
            name,
            AccountType::Checking,
            Decimal::new(balance, 0),
            currency,
            "#3b82f6",
        )
    }

    fn rate() -> ExchangeRate {
        ExchangeRate::new(Decimal::new(4550, 2)).unwrap()
    }

    #[rstest]
    #[case::empty(
        vec![],
        "id,name,type,currency,balance,balance_usd\n"
    )]
    #[case::single_usd(
        vec![account("a", "Banesco", 150, Currency::Usd)],
        "id,name,type,currency,balance,balance_usd\na,Banesco,checking,USD,150,150\n"
    )]
    #[case::ves_normalized(
        vec![account("b", "Mercantil", 9100, Currency::Ves)],
        "id,name,type,currency,balance,balance_usd\nb,Mercantil,checking,VES,9100,200\n"
    )]
    #[case::sorted_by_name(
        vec![
            account("z", "Zinli", 10, Currency::Usd),
            account("a", "Banesco", 20, Currency::Usd),
        ],
        "id,name,type,currency,balance,balance_usd\na,Banesco,checking,USD,20,20\nz,Zinli,checking,USD,10,10\n"
    )]
    fn test_write_accounts_csv(#[case] accounts: Vec<Account>, #[case] expected: &str) {
        let mut output = Vec::new();
        write_accounts_csv(&accounts, rate(), &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn test_credit_card_exports_negative_balance() {
        let card = Account::credit_card(
            "cc",
            "Visa",
            Decimal::new(300, 0),
            Currency::Usd,
            "#ef4444",
            Decimal::new(1000, 0),
            15,
            28,
        )
        .unwrap();

        let mut output = Vec::new();
        write_accounts_csv(&[card], rate(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("cc,Visa,credit-card,USD,-300,-300"));
    }
}
