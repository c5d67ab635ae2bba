//! JSON snapshot persistence
//!
//! The full entity set travels as one JSON document, the same shape the
//! application persists after every mutation. Loading is defensive: a
//! missing file, malformed JSON or absent fields all degrade to sensible
//! defaults instead of failing the session: the ledger must stay usable
//! with whatever state can be recovered.

use crate::core::engine::{DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES};
use crate::core::FinanceEngine;
use crate::types::{Account, Budget, Investment, LedgerError, Transaction};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The persisted entity set
///
/// Every field defaults independently, so a partial or legacy document
/// still loads: absent collections become empty, absent category lists
/// fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// All money stores
    pub accounts: Vec<Account>,
    /// Transaction history, newest first
    pub transactions: Vec<Transaction>,
    /// Open investment positions
    pub investments: Vec<Investment>,
    /// Budget records
    pub budgets: Vec<Budget>,
    /// Configured expense categories
    pub expense_categories: Vec<String>,
    /// Configured income categories
    pub income_categories: Vec<String>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot {
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
}

impl Snapshot {
    /// Capture the engine's current state
    pub fn from_engine(engine: &FinanceEngine) -> Self {
        Snapshot {
            accounts: engine.accounts().to_vec(),
            transactions: engine.transactions().to_vec(),
            investments: engine.investments().to_vec(),
            budgets: engine.budgets().to_vec(),
            expense_categories: engine.expense_categories().to_vec(),
            income_categories: engine.income_categories().to_vec(),
        }
    }

    /// Build an engine over this snapshot's collections
    pub fn into_engine(self) -> FinanceEngine {
        FinanceEngine::with_state(
            self.accounts,
            self.transactions,
            self.investments,
            self.budgets,
            self.expense_categories,
            self.income_categories,
        )
    }
}

/// Load a snapshot, failing on unreadable or malformed input
pub fn load(path: &Path) -> Result<Snapshot, LedgerError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Load a snapshot, degrading to defaults when anything goes wrong
///
/// A missing file is the normal first-run case and stays silent; any other
/// failure is noted on stderr before falling back.
pub fn load_or_default(path: &Path) -> Snapshot {
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                eprintln!(
                    "Snapshot at {} is malformed ({}); starting from defaults",
                    path.display(),
                    e
                );
                Snapshot::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
        Err(e) => {
            eprintln!(
                "Snapshot at {} is unreadable ({}); starting from defaults",
                path.display(),
                e
            );
            Snapshot::default()
        }
    }
}

/// Write a snapshot as pretty-printed JSON
pub fn save(snapshot: &Snapshot, path: &Path) -> Result<(), LedgerError> {
    let contents = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountType, Currency, TransactionKind};
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_snapshot() -> Snapshot {
        let mut engine = FinanceEngine::new();
        engine.add_account(Account::new(
            "a",
            "Banesco",
            AccountType::Savings,
            Decimal::new(150, 0),
            Currency::Usd,
            "#3b82f6",
        ));
        engine
            .add_transaction(Transaction::new(
                "t1",
                "Groceries",
                Decimal::new(40, 0),
                TransactionKind::Expense,
                "Comida",
                "2024-05-02",
                Currency::Usd,
                "a",
            ))
            .unwrap();
        engine
            .set_budget("Comida", Decimal::new(100, 0), Currency::Usd, "2024-05")
            .unwrap();
        Snapshot::from_engine(&engine)
    }

    #[test]
    fn test_save_load_round_trip() {
        let file = NamedTempFile::new().unwrap();
        let snapshot = sample_snapshot();
        save(&snapshot, file.path()).unwrap();

        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_round_trip_through_engine() {
        let snapshot = sample_snapshot();
        let engine = snapshot.clone().into_engine();
        assert_eq!(Snapshot::from_engine(&engine), snapshot);
        assert_eq!(engine.account("a").unwrap().balance, Decimal::new(110, 0));
    }

    #[test]
    fn test_missing_file_defaults() {
        let snapshot = load_or_default(Path::new("/nonexistent/finanza360.json"));
        assert_eq!(snapshot, Snapshot::default());
        assert_eq!(snapshot.expense_categories.len(), 9);
    }

    #[test]
    fn test_malformed_json_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json at all").unwrap();
        file.flush().unwrap();

        let snapshot = load_or_default(file.path());
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "accounts": [] }"#).unwrap();
        file.flush().unwrap();

        let snapshot = load_or_default(file.path());
        assert!(snapshot.transactions.is_empty());
        // Absent category lists fall back to the built-in defaults
        assert!(snapshot
            .income_categories
            .contains(&"Sueldo".to_string()));
    }

    #[test]
    fn test_strict_load_reports_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();
        file.flush().unwrap();

        let result = load(file.path());
        assert!(matches!(result, Err(LedgerError::SnapshotFormat { .. })));
    }
}
