//! Service layer for Cashbook
//!
//! The service layer sits between the CLI and storage: it validates input,
//! computes totals, and keeps memory, disk and the audit log in step.

pub mod ledger;
pub mod summary;
pub mod validation;

pub use ledger::{LedgerService, Outcome, Snapshot};
pub use summary::Summary;
pub use validation::{TransactionForm, ValidatedEntry};
