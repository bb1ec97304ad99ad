//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod backup;
pub mod export;
pub mod transaction;

use std::io::{self, BufRead, Write};

pub use audit::handle_audit_command;
pub use backup::{handle_backup_command, BackupCommands};
pub use export::{handle_export_command, ExportFormat};
pub use transaction::{
    handle_add_command, handle_clear_command, handle_delete_command, handle_list_command,
    handle_show_command, handle_summary_command, AddArgs,
};

use crate::error::CashbookError;

/// Ask a yes/no question; anything but `y`/`yes` counts as no
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Ask on the terminal
pub(crate) fn confirm_on_stdin(prompt: &str) -> io::Result<bool> {
    confirm(prompt, &mut io::stdin().lock(), &mut io::stdout())
}

/// Print a non-fatal problem from a mutation
pub(crate) fn report_warning(warning: Option<&CashbookError>) {
    if let Some(w) = warning {
        eprintln!("Warning: {}", w);
        eprintln!("The change is kept for this session but was not saved.");
    }
}
