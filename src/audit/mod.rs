//! Audit logging system for Cashbook
//!
//! Records every add, delete and clear of ledger records in an append-only
//! audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single entry with timestamp, operation, affected id
//!   and the JSON of the records added or removed.
//! - `AuditLogger`: appends entries to the audit log file as JSON lines
//!   and reads back the most recent ones, optionally by operation.
//!
//! # Example
//!
//! ```rust,ignore
//! use cashbook_cli::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(&txn))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation, ALL_RECORDS};
pub use logger::AuditLogger;
