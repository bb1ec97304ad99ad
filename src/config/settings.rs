//! User settings for Cashbook
//!
//! Manages display preferences, the corrupt-ledger policy and backup
//! retention. Every field has a serde default so older or partial
//! `config.json` files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::CashbookPaths;
use crate::error::CashbookError;

/// User settings for Cashbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Separator between groups of thousands
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,

    /// Separator before the fractional digits
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,

    /// Fractional digits shown for amounts (0-2)
    #[serde(default)]
    pub decimal_places: u8,

    /// Refuse to start on a corrupt ledger instead of starting empty
    #[serde(default)]
    pub strict_load: bool,

    /// Number of ledger backups to keep when pruning
    #[serde(default = "default_backup_retention")]
    pub backup_retention: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "Rp".to_string()
}

fn default_thousands_separator() -> String {
    ".".to_string()
}

fn default_decimal_separator() -> String {
    ",".to_string()
}

fn default_backup_retention() -> u32 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
            decimal_places: 0,
            strict_load: false,
            backup_retention: default_backup_retention(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &CashbookPaths) -> Result<Self, CashbookError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| CashbookError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| CashbookError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CashbookPaths) -> Result<(), CashbookError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CashbookError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CashbookError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    fn validate(&self) -> Result<(), CashbookError> {
        if self.decimal_places > 2 {
            return Err(CashbookError::Config(format!(
                "decimal_places must be between 0 and 2, got {}",
                self.decimal_places
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "Rp");
        assert_eq!(settings.thousands_separator, ".");
        assert_eq!(settings.decimal_places, 0);
        assert!(!settings.strict_load);
        assert_eq!(settings.backup_retention, 30);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "$".into(),
            thousands_separator: ",".into(),
            decimal_separator: ".".into(),
            decimal_places: 2,
            strict_load: true,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "EUR"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "EUR");
        assert_eq!(loaded.backup_retention, 30);
    }

    #[test]
    fn test_invalid_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CashbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        std::fs::write(paths.settings_file(), "not json").unwrap();
        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(CashbookError::Config(_))
        ));

        std::fs::write(paths.settings_file(), r#"{"decimal_places": 5}"#).unwrap();
        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(CashbookError::Config(_))
        ));
    }
}
