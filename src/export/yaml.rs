//! YAML Export functionality
//!
//! Same document as the JSON export, for reading by eye.

use std::io::Write;

use crate::error::{CashbookError, CashbookResult};
use crate::export::json::LedgerExport;
use crate::services::Snapshot;

/// Export the ledger to YAML format
pub fn export_ledger_yaml<W: Write>(snapshot: &Snapshot, writer: &mut W) -> CashbookResult<()> {
    let export = LedgerExport::from_snapshot(snapshot);

    writeln!(writer, "# Cashbook Ledger Export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| CashbookError::Export(e.to_string()))?;

    Ok(())
}
