//! Configuration module for Cashbook
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::CashbookPaths;
pub use settings::Settings;
