//! Cashbook - a monthly income and expense ledger for the terminal
//!
//! This library provides the core functionality for the `cashbook` CLI: an
//! ordered list of income/expense records kept in memory and mirrored to a
//! JSON file, a validator for user input, and running totals.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, ids)
//! - `storage`: JSON file storage layer
//! - `services`: Validation, totals and the ledger operations
//! - `audit`: Audit logging system
//! - `backup`: Backup and restore of the ledger file
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use cashbook_cli::config::{paths::CashbookPaths, settings::Settings};
//! use cashbook_cli::models::TransactionKind;
//! use cashbook_cli::services::{LedgerService, TransactionForm};
//! use cashbook_cli::storage::Storage;
//!
//! let paths = CashbookPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let (mut storage, _status) = Storage::open(paths, &settings)?;
//!
//! let form = TransactionForm::new("2025-11-22", TransactionKind::Expense, "Food", "25000", "");
//! let outcome = LedgerService::new(&mut storage).add(&form)?;
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::CashbookError;
