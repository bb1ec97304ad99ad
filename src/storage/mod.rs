//! Storage layer for Cashbook
//!
//! Reads and writes the ledger file, and holds the coordinator that owns
//! the ledger and its audit log.

pub mod file_io;
pub mod ledger;

pub use file_io::{read_ledger_file, write_ledger_file};
pub use ledger::{LedgerRepository, LoadStatus};

use crate::audit::{AuditEntry, AuditLogger};
use crate::backup::BackupManager;
use crate::config::paths::CashbookPaths;
use crate::config::settings::Settings;
use crate::error::{CashbookError, CashbookResult};

/// Main storage coordinator: the ledger, its audit log and their paths
///
/// Created once per process and lent to the services that need it.
#[derive(Debug)]
pub struct Storage {
    paths: CashbookPaths,
    pub ledger: LedgerRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance with an empty, unloaded ledger
    pub fn new(paths: CashbookPaths) -> CashbookResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerRepository::new(paths.ledger_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Create storage and load the ledger according to `settings`
    ///
    /// With `strict_load` a corrupt ledger is an error. Otherwise the
    /// ledger starts empty and the unreadable file is copied into the
    /// backup directory first.
    pub fn open(paths: CashbookPaths, settings: &Settings) -> CashbookResult<(Self, LoadStatus)> {
        let mut storage = Self::new(paths)?;
        let status = storage.load(settings)?;
        Ok((storage, status))
    }

    /// Load the ledger from disk, replacing what is in memory
    pub fn load(&mut self, settings: &Settings) -> CashbookResult<LoadStatus> {
        match self.ledger.load() {
            LoadStatus::Corrupt { reason, .. } if settings.strict_load => {
                Err(CashbookError::Load(reason))
            }
            LoadStatus::Corrupt { reason, .. } => {
                let backups = BackupManager::new(&self.paths, settings.backup_retention);
                let preserved = match backups.preserve_corrupt(self.ledger.path()) {
                    Ok(path) => Some(path),
                    Err(e) => {
                        tracing::warn!(error = %e, "could not preserve unreadable ledger");
                        None
                    }
                };
                Ok(LoadStatus::Corrupt { reason, preserved })
            }
            status => Ok(status),
        }
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &CashbookPaths {
        &self.paths
    }

    /// The audit logger
    pub fn audit_log(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record an audit entry; failures are logged and otherwise ignored
    pub fn audit(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            tracing::warn!(error = %e, operation = %entry.operation, "failed to write audit entry");
        }
    }
}
