//! Ledger repository for JSON storage
//!
//! Holds the ordered list of transactions in memory and mirrors it to
//! ledger.json. The file is a plain JSON array of records and is replaced
//! wholesale on every save.

use std::path::{Path, PathBuf};

use crate::error::{CashbookError, CashbookResult};
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_ledger_file, write_ledger_file};

/// What `load` found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No ledger file yet; starting empty
    Missing,
    /// Ledger read successfully
    Loaded { count: usize },
    /// Ledger unreadable or invalid; starting empty
    Corrupt {
        reason: String,
        /// Where a copy of the unreadable file was kept, if anywhere
        preserved: Option<PathBuf>,
    },
}

impl LoadStatus {
    /// Check if the ledger file was unusable
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

/// Repository for the transaction list and its file mirror
#[derive(Debug)]
pub struct LedgerRepository {
    path: PathBuf,
    records: Vec<Transaction>,
}

impl LedgerRepository {
    /// Create a new, empty ledger repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            records: Vec::new(),
        }
    }

    /// Path of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory list with the contents of the ledger file
    ///
    /// Never fails: a missing file gives an empty ledger, and so does an
    /// unreadable one (reported as [`LoadStatus::Corrupt`]).
    pub fn load(&mut self) -> LoadStatus {
        if !self.path.exists() {
            self.records.clear();
            tracing::debug!(path = %self.path.display(), "no ledger file, starting empty");
            return LoadStatus::Missing;
        }

        match read_ledger_file(&self.path) {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                tracing::debug!(count, "loaded ledger");
                LoadStatus::Loaded { count }
            }
            Err(e) => {
                self.records.clear();
                let reason = match e {
                    CashbookError::Load(msg) => msg,
                    other => other.to_string(),
                };
                tracing::warn!(path = %self.path.display(), %reason, "ledger unreadable, starting empty");
                LoadStatus::Corrupt {
                    reason,
                    preserved: None,
                }
            }
        }
    }

    /// Write the full list to the ledger file, replacing it
    pub fn persist(&self) -> CashbookResult<()> {
        write_ledger_file(&self.path, &self.records)
    }

    /// Append a record at the end of the list
    pub fn append(&mut self, txn: Transaction) -> CashbookResult<()> {
        if self.get(txn.id).is_some() {
            return Err(CashbookError::Duplicate {
                entity_type: "Transaction",
                identifier: txn.id.to_string(),
            });
        }

        self.records.push(txn);
        Ok(())
    }

    /// Remove the record with the given id, keeping the order of the rest
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.records.iter().position(|t| t.id == id)?;
        Some(self.records.remove(index))
    }

    /// Remove every record, returning how many there were
    pub fn clear(&mut self) -> usize {
        std::mem::take(&mut self.records).len()
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.records.iter().find(|t| t.id == id)
    }

    /// Check whether an id is present
    pub fn contains(&self, id: TransactionId) -> bool {
        self.get(id).is_some()
    }

    /// All transactions in insertion order
    pub fn all(&self) -> &[Transaction] {
        &self.records
    }

    /// Ids whose hex digits start with `prefix` (case-insensitive, hyphens ignored)
    pub fn ids_with_prefix(&self, prefix: &str) -> Vec<TransactionId> {
        let prefix: String = prefix
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_lowercase();

        self.records
            .iter()
            .filter(|t| t.id.simple().starts_with(&prefix))
            .map(|t| t.id)
            .collect()
    }

    /// Count transactions
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there are no transactions
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
