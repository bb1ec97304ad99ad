//! Custom error types for Cashbook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::fmt;

use thiserror::Error;

/// Form fields that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Category,
    Amount,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Category => write!(f, "category"),
            Self::Amount => write!(f, "amount"),
        }
    }
}

/// Reasons a transaction form is rejected before a record is built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date is empty or not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date '{0}': use YYYY-MM-DD (e.g. 2025-11-22)")]
    BadDate(String),

    /// A required text field is blank
    #[error("Missing required field: {0}")]
    MissingField(FormField),

    /// Amount is not a number or is not greater than zero
    #[error("Invalid amount '{input}': {reason}")]
    BadAmount { input: String, reason: String },
}

impl ValidationError {
    /// The form field that failed
    pub fn field(&self) -> FormField {
        match self {
            Self::BadDate(_) => FormField::Date,
            Self::MissingField(field) => *field,
            Self::BadAmount { .. } => FormField::Amount,
        }
    }
}

/// The main error type for Cashbook operations
#[derive(Error, Debug)]
pub enum CashbookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Form input rejected; nothing was changed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The ledger could not be written; memory and disk may differ
    #[error("Failed to save ledger: {0}")]
    Persistence(String),

    /// The ledger file exists but could not be read or is corrupt
    #[error("Failed to load ledger: {0}")]
    Load(String),

    /// Delete requested without a matching record
    #[error("Nothing to delete: {0}")]
    NothingToDelete(String),

    /// Clear requested on an empty ledger
    #[error("No transactions to delete")]
    AlreadyEmpty,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A short id matched more than one record
    #[error("'{prefix}' matches {count} transactions; type more of the id")]
    AmbiguousId { prefix: String, count: usize },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CashbookError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a failed write of the ledger
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CashbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CashbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Cashbook operations
pub type CashbookResult<T> = Result<T, CashbookError>;
