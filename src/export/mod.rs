//! Export module for Cashbook
//!
//! Writes the ledger out in three formats:
//! - CSV: one row per transaction (spreadsheet-compatible)
//! - JSON: versioned document with totals and metadata
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_transactions_csv;
pub use json::{export_ledger_json, ExportMetadata, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_ledger_yaml;
