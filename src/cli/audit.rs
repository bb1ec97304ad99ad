//! Audit CLI command

use crate::audit::Operation;
use crate::error::CashbookResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(
    storage: &Storage,
    limit: usize,
    operation: Option<Operation>,
) -> CashbookResult<()> {
    let entries = storage.audit_log().read_recent(limit, operation)?;

    if entries.is_empty() {
        match operation {
            Some(op) => println!("No {} entries in the audit log.", op),
            None => println!("No audit entries yet."),
        }
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
