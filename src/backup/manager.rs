//! Backup manager for Cashbook
//!
//! Copies the ledger file into the backup directory under a timestamped
//! name and prunes old copies according to the retention setting.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::config::paths::CashbookPaths;
use crate::error::{CashbookError, CashbookResult};

const BACKUP_PREFIX: &str = "backup-";
const CORRUPT_PREFIX: &str = "corrupt-";

/// Metadata about a backup
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
    /// Copy of a ledger that failed to load, kept out of retention
    pub is_corrupt_copy: bool,
}

/// Manages backup creation and retention
#[derive(Debug, Clone)]
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Ledger file being backed up
    ledger_file: PathBuf,
    /// Number of regular backups to keep
    retention: u32,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &CashbookPaths, retention: u32) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            ledger_file: paths.ledger_file(),
            retention,
        }
    }

    /// Copy the current ledger file into the backup directory
    ///
    /// Returns the path to the created backup file.
    pub fn create_backup(&self) -> CashbookResult<PathBuf> {
        if !self.ledger_file.exists() {
            return Err(CashbookError::Storage(
                "No ledger file to back up yet".into(),
            ));
        }
        let path = self.copy_with_prefix(&self.ledger_file, BACKUP_PREFIX)?;
        tracing::info!(path = %path.display(), "created ledger backup");
        Ok(path)
    }

    /// Keep a copy of an unreadable ledger before it can be overwritten
    ///
    /// Each distinct content is kept once: when a `corrupt-*` copy with the
    /// same bytes already exists, its path is returned and nothing is written.
    pub fn preserve_corrupt(&self, ledger_file: &Path) -> CashbookResult<PathBuf> {
        let contents = fs::read(ledger_file)
            .map_err(|e| CashbookError::Io(format!("Failed to read unreadable ledger: {}", e)))?;

        if let Some(existing) = self.find_corrupt_copy(&contents)? {
            tracing::debug!(path = %existing.display(), "unreadable ledger already preserved");
            return Ok(existing);
        }

        let path = self.copy_with_prefix(ledger_file, CORRUPT_PREFIX)?;
        tracing::warn!(path = %path.display(), "preserved unreadable ledger");
        Ok(path)
    }

    fn find_corrupt_copy(&self, contents: &[u8]) -> CashbookResult<Option<PathBuf>> {
        let same_size = self
            .list_backups()?
            .into_iter()
            .filter(|b| b.is_corrupt_copy && b.size_bytes == contents.len() as u64);

        for copy in same_size {
            if fs::read(&copy.path).is_ok_and(|bytes| bytes == contents) {
                return Ok(Some(copy.path));
            }
        }
        Ok(None)
    }

    fn copy_with_prefix(&self, source: &Path, prefix: &str) -> CashbookResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            CashbookError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = format!(
            "{}{}-{:03}.json",
            prefix,
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        fs::copy(source, &backup_path)
            .map_err(|e| CashbookError::Io(format!("Failed to write backup file: {}", e)))?;

        Ok(backup_path)
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> CashbookResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| CashbookError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| CashbookError::Io(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Delete regular backups beyond the retention count
    ///
    /// Copies of corrupt ledgers are never pruned automatically.
    pub fn enforce_retention(&self) -> CashbookResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        let regular = self
            .list_backups()?
            .into_iter()
            .filter(|b| !b.is_corrupt_copy);

        for backup in regular.skip(self.retention as usize) {
            fs::remove_file(&backup.path)
                .map_err(|e| CashbookError::Io(format!("Failed to delete old backup: {}", e)))?;
            deleted.push(backup.path);
        }

        if !deleted.is_empty() {
            tracing::info!(count = deleted.len(), "pruned old backups");
        }
        Ok(deleted)
    }

    /// Create a backup and then enforce retention policy
    pub fn create_backup_with_retention(&self) -> CashbookResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Find a backup by filename
    pub fn get_backup(&self, filename: &str) -> Option<BackupInfo> {
        let path = self.backup_dir.join(filename);
        if path.exists() {
            parse_backup_info(&path)
        } else {
            None
        }
    }
}

/// Parse backup info from a backup file name
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stem = filename.strip_suffix(".json")?;

    let (is_corrupt_copy, date_part) = if let Some(rest) = stem.strip_prefix(BACKUP_PREFIX) {
        (false, rest)
    } else {
        (true, stem.strip_prefix(CORRUPT_PREFIX)?)
    };

    let created_at = parse_backup_timestamp(date_part)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_corrupt_copy,
    })
}

/// Parse a `YYYYMMDD-HHMMSS-mmm` timestamp from a backup file name
fn parse_backup_timestamp(date_str: &str) -> Option<DateTime<Utc>> {
    let mut parts = date_str.split('-');
    let (date_part, time_part, millis_part) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let date = NaiveDate::parse_from_str(date_part, "%Y%m%d").ok()?;
    let time = NaiveTime::parse_from_str(time_part, "%H%M%S").ok()?;
    let millis: i64 = millis_part.parse().ok()?;

    let datetime = NaiveDateTime::new(date, time) + chrono::Duration::milliseconds(millis);
    Some(DateTime::from_naive_utc_and_offset(datetime, Utc))
}
