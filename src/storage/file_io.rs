//! Reading and writing the ledger file
//!
//! The ledger file is a pretty-printed JSON array of records. Reads fail
//! with [`CashbookError::Load`] and name the offending record or the
//! parser position. Writes go to a sibling temp file that is synced and
//! renamed over the ledger, and fail with [`CashbookError::Persistence`];
//! the file on disk is always some complete earlier version.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use serde_json::error::Category;

use crate::error::{CashbookError, CashbookResult};
use crate::models::Transaction;

/// Read and check every record in a ledger file
///
/// The whole file is rejected if any record is malformed, breaks a record
/// invariant, or repeats an id.
pub fn read_ledger_file(path: &Path) -> CashbookResult<Vec<Transaction>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CashbookError::Load(format!("no file at {}", path.display())),
        _ => CashbookError::Load(format!("cannot open {}: {}", path.display(), e)),
    })?;

    let records: Vec<Transaction> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CashbookError::Load(describe_parse_error(&e)))?;

    let mut seen = HashSet::with_capacity(records.len());
    for (index, txn) in records.iter().enumerate() {
        txn.validate().map_err(|e| {
            CashbookError::Load(format!("record {} ({}): {}", index + 1, txn.id, e))
        })?;

        if !seen.insert(txn.id) {
            return Err(CashbookError::Load(format!(
                "record {} has a duplicate id {}",
                index + 1,
                txn.id
            )));
        }
    }

    Ok(records)
}

fn describe_parse_error(e: &serde_json::Error) -> String {
    match e.classify() {
        Category::Io => format!("read failed: {}", e),
        Category::Eof => format!("file ends early (line {}, column {})", e.line(), e.column()),
        Category::Syntax => format!("not valid JSON: {}", e),
        Category::Data => format!("not a list of transactions: {}", e),
    }
}

/// Replace the ledger file with `records`
pub fn write_ledger_file(path: &Path, records: &[Transaction]) -> CashbookResult<()> {
    let mut bytes = serde_json::to_vec_pretty(records)
        .map_err(|e| CashbookError::Persistence(format!("cannot encode ledger: {}", e)))?;
    bytes.push(b'\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CashbookError::Persistence(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }

    let temp_path = temp_path_for(path);
    if let Err(e) = write_synced(&temp_path, &bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(CashbookError::Persistence(format!(
            "cannot write {}: {}",
            temp_path.display(),
            e
        )));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CashbookError::Persistence(format!("cannot replace {}: {}", path.display(), e))
    })?;

    tracing::debug!(path = %path.display(), count = records.len(), bytes = bytes.len(), "wrote ledger file");
    Ok(())
}

// Same directory as the target, so the rename stays on one filesystem
fn temp_path_for(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
