//! Backup restoration for Cashbook
//!
//! Replaces the ledger file with the contents of a backup after checking
//! that the backup is a valid ledger.

use std::path::{Path, PathBuf};

use crate::config::paths::CashbookPaths;
use crate::error::{CashbookError, CashbookResult};
use crate::storage::{write_ledger_file, LedgerRepository, LoadStatus};

/// Handles restoring from backups
pub struct RestoreManager {
    ledger_file: PathBuf,
}

impl RestoreManager {
    /// Create a new RestoreManager
    pub fn new(paths: &CashbookPaths) -> Self {
        Self {
            ledger_file: paths.ledger_file(),
        }
    }

    /// Restore the ledger from a backup file
    ///
    /// Overwrites the current ledger. Returns the number of records restored.
    pub fn restore_from_file(&self, backup_path: &Path) -> CashbookResult<usize> {
        let mut backup = LedgerRepository::new(backup_path.to_path_buf());

        match backup.load() {
            LoadStatus::Loaded { count } => {
                write_ledger_file(&self.ledger_file, backup.all())?;
                tracing::info!(count, from = %backup_path.display(), "restored ledger");
                Ok(count)
            }
            LoadStatus::Missing => Err(CashbookError::Storage(format!(
                "Backup not found: {}",
                backup_path.display()
            ))),
            LoadStatus::Corrupt { reason, .. } => Err(CashbookError::Storage(format!(
                "Backup {} is not a valid ledger: {}",
                backup_path.display(),
                reason
            ))),
        }
    }
}
