//! Display formatting for terminal output
//!
//! Turns ledger data into text: configured amount formatting, the register
//! table, the totals block and a single-record view.

pub mod amount;
pub mod summary;
pub mod transaction;

pub use amount::format_amount;
pub use summary::format_summary;
pub use transaction::{format_register, format_transaction_details};
