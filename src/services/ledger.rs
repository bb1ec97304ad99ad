//! Ledger service
//!
//! The four operations the outside world gets: add, remove, clear and
//! snapshot. Each mutation changes the in-memory list first, then writes
//! the whole list to disk, then records an audit entry.

use serde::Serialize;

use crate::audit::AuditEntry;
use crate::error::{CashbookError, CashbookResult};
use crate::models::{Transaction, TransactionId};
use crate::storage::Storage;

use super::summary::Summary;
use super::validation::TransactionForm;

/// Shortest hex prefix accepted as an id
pub const MIN_ID_PREFIX: usize = 4;

/// Result of a mutation that went through
///
/// `warning` is set when memory changed but the ledger file could not be
/// written; the change is lost on restart unless a later save succeeds.
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub warning: Option<CashbookError>,
}

impl<T> Outcome<T> {
    fn new(value: T, warning: Option<CashbookError>) -> Self {
        Self { value, warning }
    }

    /// Check if the change reached disk
    pub fn is_saved(&self) -> bool {
        self.warning.is_none()
    }
}

/// Read-only copy of the ledger with its totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
}

/// Service for ledger mutations and queries
pub struct LedgerService<'a> {
    storage: &'a mut Storage,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Validate a form and append the resulting record
    pub fn add(&mut self, form: &TransactionForm) -> CashbookResult<Outcome<Transaction>> {
        let txn = form.validate()?.into_transaction();

        self.storage.ledger.append(txn.clone())?;
        tracing::info!(id = %txn.id, kind = txn.kind.as_str(), amount = %txn.amount, "added transaction");

        let warning = self.save();
        self.storage.audit(AuditEntry::create(&txn));

        Ok(Outcome::new(txn, warning))
    }

    /// Remove one record
    ///
    /// `None` means nothing was selected. Either that or an id that is not
    /// in the ledger leaves everything untouched.
    pub fn remove(&mut self, id: Option<TransactionId>) -> CashbookResult<Outcome<Transaction>> {
        let id = id.ok_or_else(|| CashbookError::NothingToDelete("no transaction selected".into()))?;

        let removed = self
            .storage
            .ledger
            .remove(id)
            .ok_or_else(|| CashbookError::NothingToDelete(format!("{} is not in the ledger", id)))?;
        tracing::info!(%id, "removed transaction");

        let warning = self.save();
        self.storage.audit(AuditEntry::delete(&removed));

        Ok(Outcome::new(removed, warning))
    }

    /// Remove every record, returning how many were removed
    pub fn clear(&mut self) -> CashbookResult<Outcome<usize>> {
        if self.storage.ledger.is_empty() {
            return Err(CashbookError::AlreadyEmpty);
        }

        let removed = self.storage.ledger.all().to_vec();
        let count = self.storage.ledger.clear();
        tracing::info!(count, "cleared ledger");

        let warning = self.save();
        self.storage.audit(AuditEntry::clear(&removed));

        Ok(Outcome::new(count, warning))
    }

    /// Copy of the records in insertion order, plus totals
    pub fn snapshot(&self) -> Snapshot {
        let transactions = self.storage.ledger.all().to_vec();
        let summary = Summary::from_transactions(&transactions);
        Snapshot {
            transactions,
            summary,
        }
    }

    /// Get a record by id
    pub fn get(&self, id: TransactionId) -> CashbookResult<&Transaction> {
        self.storage
            .ledger
            .get(id)
            .ok_or_else(|| CashbookError::transaction_not_found(id.to_string()))
    }

    /// Map what a user typed to a record id
    ///
    /// Accepts a full UUID, the `txn-xxxxxxxx` display form, or any hex
    /// prefix of at least four digits that matches exactly one record.
    pub fn resolve_id(&self, token: &str) -> CashbookResult<Option<TransactionId>> {
        let token = TransactionId::strip_prefix(token.trim());

        if let Ok(id) = token.parse::<TransactionId>() {
            return Ok(self.storage.ledger.contains(id).then_some(id));
        }

        let digits = token.chars().filter(|c| *c != '-').count();
        if digits < MIN_ID_PREFIX || !token.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
            return Ok(None);
        }

        let matches = self.storage.ledger.ids_with_prefix(token);
        match matches.as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            _ => Err(CashbookError::AmbiguousId {
                prefix: token.to_string(),
                count: matches.len(),
            }),
        }
    }

    fn save(&self) -> Option<CashbookError> {
        match self.storage.ledger.persist() {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(error = %e, "ledger kept in memory only");
                Some(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CashbookPaths;
    use crate::models::{Money, TransactionKind};
    use crate::storage::{LedgerRepository, LoadStatus};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.ledger.load();
        (temp_dir, storage)
    }

    fn form(kind: TransactionKind, category: &str, amount: &str) -> TransactionForm {
        TransactionForm::new("2025-11-22", kind, category, amount, "")
    }

    fn reload(storage: &Storage) -> Vec<Transaction> {
        let mut repo = LedgerRepository::new(storage.paths().ledger_file());
        repo.load();
        repo.all().to_vec()
    }

    fn break_ledger_file(storage: &Storage) {
        let data_dir = storage.paths().data_dir();
        fs::remove_dir_all(&data_dir).unwrap();
        fs::write(&data_dir, "").unwrap();
    }

    #[test]
    fn test_add_and_summarize() {
        let (_temp_dir, mut storage) = create_test_storage();
        let mut service = LedgerService::new(&mut storage);

        for (kind, category, amount) in [
            (TransactionKind::Income, "Salary", "100"),
            (TransactionKind::Expense, "Food", "40"),
            (TransactionKind::Income, "Bonus", "25"),
        ] {
            let outcome = service.add(&form(kind, category, amount)).unwrap();
            assert!(outcome.is_saved());
        }

        let snapshot = service.snapshot();
        assert_eq!(snapshot.transactions.len(), 3);
        assert_eq!(snapshot.summary.total_income, Money::from_units(125));
        assert_eq!(snapshot.summary.total_expense, Money::from_units(40));
        assert_eq!(snapshot.summary.balance, Money::from_units(85));

        let categories: Vec<_> = snapshot
            .transactions
            .iter()
            .map(|t| t.category.as_str())
            .collect();
        assert_eq!(categories, ["Salary", "Food", "Bonus"]);

        assert_eq!(reload(&storage), snapshot.transactions);
    }

    #[test]
    fn test_add_invalid_changes_nothing() {
        let (_temp_dir, mut storage) = create_test_storage();
        let mut service = LedgerService::new(&mut storage);
        service
            .add(&form(TransactionKind::Expense, "Food", "10"))
            .unwrap();
        let before = service.snapshot();

        for bad in [
            TransactionForm::new("", TransactionKind::Expense, "Food", "10", ""),
            TransactionForm::new("2025-11-22", TransactionKind::Expense, " ", "10", ""),
            TransactionForm::new("2025-11-22", TransactionKind::Expense, "Food", "-3", ""),
        ] {
            let err = service.add(&bad).unwrap_err();
            assert!(err.is_validation(), "{err}");
        }

        assert_eq!(service.snapshot(), before);
        assert_eq!(storage.audit_log().read_recent(10, None).unwrap().len(), 1);
    }

    #[test]
    fn test_largest_amounts_add_up() {
        let (_temp_dir, mut storage) = create_test_storage();
        let mut service = LedgerService::new(&mut storage);

        let err = service
            .add(&form(TransactionKind::Income, "Windfall", "92233720368547758"))
            .unwrap_err();
        assert!(err.to_string().contains("amount is too large"), "{err}");

        for _ in 0..2 {
            service
                .add(&form(TransactionKind::Income, "Windfall", "999999999999.99"))
                .unwrap();
        }
        let snapshot = service.snapshot();
        assert_eq!(snapshot.summary.total_income.cents(), 2 * Money::MAX.cents());
        assert_eq!(snapshot.summary.balance, snapshot.summary.total_income);
        assert_eq!(reload(&storage), snapshot.transactions);
    }

    #[test]
    fn test_remove() {
        let (_temp_dir, mut storage) = create_test_storage();
        let mut service = LedgerService::new(&mut storage);
        let a = service.add(&form(TransactionKind::Income, "A", "1")).unwrap().value;
        let b = service.add(&form(TransactionKind::Expense, "B", "2")).unwrap().value;
        let c = service.add(&form(TransactionKind::Income, "C", "3")).unwrap().value;

        let removed = service.remove(Some(b.id)).unwrap();
        assert_eq!(removed.value, b);
        assert_eq!(service.snapshot().transactions, vec![a, c]);
        assert_eq!(reload(&storage).len(), 2);
    }

    #[test]
    fn test_remove_nothing_selected() {
        let (_temp_dir, mut storage) = create_test_storage();
        let mut service = LedgerService::new(&mut storage);
        service.add(&form(TransactionKind::Income, "A", "1")).unwrap();

        let err = service.remove(None).unwrap_err();
        assert!(matches!(err, CashbookError::NothingToDelete(_)));

        let err = service.remove(Some(TransactionId::new())).unwrap_err();
        assert!(matches!(err, CashbookError::NothingToDelete(_)));
        assert_eq!(service.snapshot().transactions.len(), 1);
    }

    #[test]
    fn test_clear() {
        let (_temp_dir, mut storage) = create_test_storage();
        let mut service = LedgerService::new(&mut storage);
        service.add(&form(TransactionKind::Income, "A", "1")).unwrap();
        service.add(&form(TransactionKind::Expense, "B", "2")).unwrap();

        assert_eq!(service.clear().unwrap().value, 2);
        let snapshot = service.snapshot();
        assert!(snapshot.transactions.is_empty());
        assert_eq!(snapshot.summary, Summary::default());

        assert!(matches!(service.clear(), Err(CashbookError::AlreadyEmpty)));
        assert!(reload(&storage).is_empty());
    }

    #[test]
    fn test_snapshot_is_stable() {
        let (_temp_dir, mut storage) = create_test_storage();
        let mut service = LedgerService::new(&mut storage);
        service.add(&form(TransactionKind::Income, "A", "1.50")).unwrap();

        assert_eq!(service.snapshot(), service.snapshot());
    }

    #[test]
    fn test_persist_failure_is_a_warning() {
        let (_temp_dir, mut storage) = create_test_storage();
        break_ledger_file(&storage);
        let mut service = LedgerService::new(&mut storage);

        let outcome = service
            .add(&form(TransactionKind::Expense, "Food", "25000"))
            .unwrap();
        assert!(!outcome.is_saved());
        assert!(outcome.warning.as_ref().unwrap().is_persistence());
        assert_eq!(service.snapshot().transactions, vec![outcome.value]);
    }

    #[test]
    fn test_audit_trail() {
        let (_temp_dir, mut storage) = create_test_storage();
        let mut service = LedgerService::new(&mut storage);
        let a = service.add(&form(TransactionKind::Income, "A", "1")).unwrap().value;
        service.add(&form(TransactionKind::Income, "B", "1")).unwrap();
        service.remove(Some(a.id)).unwrap();
        service.clear().unwrap();

        let ops: Vec<String> = storage
            .audit_log()
            .read_all()
            .unwrap()
            .iter()
            .map(|e| e.operation.to_string())
            .collect();
        assert_eq!(ops, ["CREATE", "CREATE", "DELETE", "CLEAR"]);
    }

    #[test]
    fn test_resolve_id() {
        let (_temp_dir, mut storage) = create_test_storage();
        let mut service = LedgerService::new(&mut storage);
        let txn = service.add(&form(TransactionKind::Income, "A", "1")).unwrap().value;
        let simple = txn.id.simple();

        assert_eq!(service.resolve_id(&txn.id.to_string()).unwrap(), Some(txn.id));
        assert_eq!(
            service.resolve_id(&txn.id.as_uuid().to_string()).unwrap(),
            Some(txn.id)
        );
        assert_eq!(service.resolve_id(&simple[..4]).unwrap(), Some(txn.id));
        assert_eq!(service.resolve_id(&simple[..3]).unwrap(), None);
        assert_eq!(service.resolve_id("zzzzzz").unwrap(), None);
        assert_eq!(
            service
                .resolve_id(&TransactionId::new().as_uuid().to_string())
                .unwrap(),
            None
        );
        assert_eq!(service.get(txn.id).unwrap(), &txn);
        assert!(service.get(TransactionId::new()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let (_temp_dir, mut storage) = create_test_storage();
        let shared = "abcd0000-0000-4000-8000-00000000000";
        for last in ['1', '2'] {
            let id: TransactionId = format!("{shared}{last}").parse().unwrap();
            let mut txn = form(TransactionKind::Income, "A", "1")
                .validate()
                .unwrap()
                .into_transaction();
            txn.id = id;
            storage.ledger.append(txn).unwrap();
        }

        let service = LedgerService::new(&mut storage);
        let err = service.resolve_id("txn-abcd").unwrap_err();
        assert!(matches!(err, CashbookError::AmbiguousId { count: 2, .. }));
    }

    #[test]
    fn test_survives_restart() {
        let (_temp_dir, mut storage) = create_test_storage();
        LedgerService::new(&mut storage)
            .add(&form(TransactionKind::Expense, "Food", "12.34"))
            .unwrap();

        let paths = storage.paths().clone();
        let mut reopened = Storage::new(paths).unwrap();
        assert_eq!(reopened.ledger.load(), LoadStatus::Loaded { count: 1 });
        let snapshot = LedgerService::new(&mut reopened).snapshot();
        assert_eq!(snapshot.summary.total_expense, Money::from_cents(1234));
    }
}
