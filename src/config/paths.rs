//! Path management for Cashbook
//!
//! Provides XDG-compliant path resolution for configuration, data, and backups.
//!
//! ## Path Resolution Order
//!
//! 1. `CASHBOOK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/cashbook` or `~/.config/cashbook`
//! 3. Windows: `%APPDATA%\cashbook`

use std::path::PathBuf;

use crate::error::CashbookError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "CASHBOOK_DATA_DIR";

/// Manages all paths used by Cashbook
#[derive(Debug, Clone)]
pub struct CashbookPaths {
    /// Base directory for all Cashbook data
    base_dir: PathBuf,
}

impl CashbookPaths {
    /// Create a new CashbookPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CashbookError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create CashbookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/cashbook/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/cashbook/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (~/.config/cashbook/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to ledger.json, the durable copy of all transactions
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), CashbookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CashbookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CashbookError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| CashbookError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CashbookError> {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(config_home).join("cashbook"));
    }

    let home = std::env::var("HOME").map_err(|_| {
        CashbookError::Config(format!(
            "Could not determine home directory; set {} instead",
            DATA_DIR_ENV
        ))
    })?;
    Ok(PathBuf::from(home).join(".config").join("cashbook"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CashbookError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CashbookError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("cashbook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashbookPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(
            paths.ledger_file(),
            temp_dir.path().join("data").join("ledger.json")
        );
    }
}
