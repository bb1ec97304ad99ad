//! CLI command for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::{CashbookError, CashbookResult};
use crate::export::{export_ledger_json, export_ledger_yaml, export_transactions_csv};
use crate::services::LedgerService;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (one row per transaction)
    Csv,
    /// JSON format (transactions, totals and metadata)
    Json,
    /// YAML format (same as JSON, human-readable)
    Yaml,
}

/// Handle `export`; writes to stdout when no output file is given
pub fn handle_export_command(
    storage: &mut Storage,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> CashbookResult<()> {
    let snapshot = LedgerService::new(storage).snapshot();

    let mut writer: Box<dyn Write> = match &output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CashbookError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match format {
        ExportFormat::Csv => export_transactions_csv(&snapshot.transactions, &mut writer)?,
        ExportFormat::Json => export_ledger_json(&snapshot, &mut writer, true)?,
        ExportFormat::Yaml => export_ledger_yaml(&snapshot, &mut writer)?,
    }
    writer.flush()?;

    if let Some(path) = output {
        eprintln!(
            "Exported {} transaction(s) to: {}",
            snapshot.transactions.len(),
            path.display()
        );
    }

    Ok(())
}
