//! JSON Export functionality
//!
//! Exports the ledger with its totals and a small metadata block, under a
//! schema version.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CashbookError, CashbookResult};
use crate::models::Transaction;
use crate::services::{Snapshot, Summary};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All transactions, in ledger order
    pub transactions: Vec<Transaction>,

    /// Totals at export time
    pub summary: Summary,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Total number of transactions
    pub transaction_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl LedgerExport {
    /// Build an export from a ledger snapshot
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let transactions = snapshot.transactions.clone();

        let earliest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .min()
            .map(|d| d.to_string());

        let latest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .max()
            .map(|d| d.to_string());

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            earliest_transaction,
            latest_transaction,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            summary: snapshot.summary,
            metadata,
        }
    }
}

/// Export the ledger to JSON
pub fn export_ledger_json<W: Write>(
    snapshot: &Snapshot,
    writer: &mut W,
    pretty: bool,
) -> CashbookResult<()> {
    let export = LedgerExport::from_snapshot(snapshot);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| CashbookError::Export(e.to_string()))?;

    writeln!(writer)?;
    Ok(())
}
