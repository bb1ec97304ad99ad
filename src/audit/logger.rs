//! Append-only audit log of ledger changes
//!
//! One JSON object per line. Readers skip lines that do not parse, so a
//! line torn by a crash mid-append does not hide the rest of the history.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{CashbookError, CashbookResult};

use super::entry::{AuditEntry, Operation};

/// Writer and reader for the ledger's audit log
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    ///
    /// The line is written with a single call so entries never interleave.
    pub fn log(&self, entry: &AuditEntry) -> CashbookResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| CashbookError::Io(format!("Failed to open audit log: {}", e)))?;
        file.write_all(&line)
            .map_err(|e| CashbookError::Io(format!("Failed to write audit entry: {}", e)))?;

        Ok(())
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> CashbookResult<Vec<AuditEntry>> {
        self.read_recent(usize::MAX, None)
    }

    /// The last `limit` entries, oldest first, optionally of one operation only
    ///
    /// Only `limit` entries are held in memory while the file is scanned.
    pub fn read_recent(
        &self,
        limit: usize,
        operation: Option<Operation>,
    ) -> CashbookResult<Vec<AuditEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let file = match File::open(&self.log_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CashbookError::Io(format!("Failed to open audit log: {}", e))),
        };

        let mut recent = VecDeque::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = match serde_json::from_str(&line) {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(line = index + 1, error = %e, "skipping unreadable audit entry");
                    continue;
                }
            };

            if operation.is_some_and(|op| op != entry.operation) {
                continue;
            }
            if recent.len() == limit {
                recent.pop_front();
            }
            recent.push_back(entry);
        }

        Ok(recent.into())
    }
}
