//! Backup system for Cashbook
//!
//! Provides manual ledger backups with a retention count, restore, and a
//! safe place for ledger files that failed to load.
//!
//! # Backup Format
//!
//! A backup is a byte-for-byte copy of `ledger.json` named
//! `backup-YYYYMMDD-HHMMSS-mmm.json`. Unreadable ledgers found at startup
//! are copied as `corrupt-YYYYMMDD-HHMMSS-mmm.json` and are never pruned.
//!
//! # Example
//!
//! ```rust,ignore
//! use cashbook_cli::backup::{BackupManager, RestoreManager};
//!
//! let manager = BackupManager::new(&paths, settings.backup_retention);
//! let (backup_path, _pruned) = manager.create_backup_with_retention()?;
//!
//! let count = RestoreManager::new(&paths).restore_from_file(&backup_path)?;
//! ```

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager};
pub use restore::RestoreManager;
