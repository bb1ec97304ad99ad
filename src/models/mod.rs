//! Core data models for Cashbook
//!
//! This module contains the data structures of the ledger domain: the
//! transaction record, its identifier and the money type.

pub mod ids;
pub mod money;
pub mod transaction;

pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
