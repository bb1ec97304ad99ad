//! Audit entry data structures
//!
//! Defines the structure of audit log entries: which ledger operation ran,
//! when, and the records it added or removed.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Entity id recorded for operations on the whole ledger
pub const ALL_RECORDS: &str = "*";

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A transaction was added
    Create,
    /// A single transaction was deleted
    Delete,
    /// All transactions were deleted
    Clear,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Clear => write!(f, "CLEAR"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// ID of the affected transaction, or `*` for the whole ledger
    pub entity_id: String,

    /// Human-readable description (e.g. "2025-11-22 Expense Food 25000.00")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// JSON of what was removed (deletes and clears)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// JSON of what was added (creates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Create a new audit entry for an added transaction
    pub fn create(txn: &Transaction) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_id: txn.id.as_uuid().to_string(),
            entity_name: Some(txn.to_string()),
            before: None,
            after: serde_json::to_value(txn).ok(),
        }
    }

    /// Create a new audit entry for a deleted transaction
    pub fn delete(txn: &Transaction) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_id: txn.id.as_uuid().to_string(),
            entity_name: Some(txn.to_string()),
            before: serde_json::to_value(txn).ok(),
            after: None,
        }
    }

    /// Create a new audit entry for clearing the ledger
    ///
    /// The removed records are kept in `before` so they can be recovered.
    pub fn clear(removed: &[Transaction]) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Clear,
            entity_id: ALL_RECORDS.to_string(),
            entity_name: Some(format!("{} transactions", removed.len())),
            before: serde_json::to_value(removed).ok(),
            after: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        output
    }
}
