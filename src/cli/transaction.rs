//! Transaction CLI commands
//!
//! add, list, summary, show, delete and clear.

use chrono::Local;
use clap::Args;

use super::{confirm_on_stdin, report_warning};
use crate::config::settings::Settings;
use crate::display::{format_amount, format_register, format_summary, format_transaction_details};
use crate::error::{CashbookError, CashbookResult};
use crate::models::TransactionKind;
use crate::services::{LedgerService, TransactionForm};
use crate::storage::Storage;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount, greater than zero (e.g. 25000 or 19.99)
    #[arg(allow_negative_numbers = true)]
    pub amount: String,

    /// Category name
    #[arg(short, long)]
    pub category: String,

    /// income or expense
    #[arg(short, long, default_value = "expense")]
    pub kind: TransactionKind,

    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Free-text note
    #[arg(short, long, default_value = "")]
    pub note: String,
}

impl AddArgs {
    fn into_form(self) -> TransactionForm {
        let date = self
            .date
            .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
        TransactionForm::new(date, self.kind, self.category, self.amount, self.note)
    }
}

/// Handle `add`
pub fn handle_add_command(
    storage: &mut Storage,
    settings: &Settings,
    args: AddArgs,
) -> CashbookResult<()> {
    let form = args.into_form();
    let outcome = LedgerService::new(storage).add(&form)?;
    let txn = &outcome.value;

    println!(
        "Added {} {} {} ({}) on {}",
        txn.id,
        txn.kind,
        format_amount(txn.amount, settings),
        txn.category,
        txn.date.format("%Y-%m-%d")
    );
    report_warning(outcome.warning.as_ref());

    Ok(())
}

/// Handle `list`: register followed by totals
pub fn handle_list_command(storage: &mut Storage, settings: &Settings) -> CashbookResult<()> {
    let snapshot = LedgerService::new(storage).snapshot();

    println!("{}", format_register(&snapshot.transactions, settings));
    println!();
    print!("{}", format_summary(&snapshot.summary, settings));

    Ok(())
}

/// Handle `summary`
pub fn handle_summary_command(storage: &mut Storage, settings: &Settings) -> CashbookResult<()> {
    let snapshot = LedgerService::new(storage).snapshot();
    print!("{}", format_summary(&snapshot.summary, settings));
    Ok(())
}

/// Handle `show`
pub fn handle_show_command(
    storage: &mut Storage,
    settings: &Settings,
    id: &str,
) -> CashbookResult<()> {
    let service = LedgerService::new(storage);
    let id = service
        .resolve_id(id)?
        .ok_or_else(|| CashbookError::transaction_not_found(id))?;

    print!("{}", format_transaction_details(service.get(id)?, settings));
    Ok(())
}

/// Handle `delete`
pub fn handle_delete_command(
    storage: &mut Storage,
    settings: &Settings,
    id: &str,
    force: bool,
) -> CashbookResult<()> {
    let mut service = LedgerService::new(storage);
    let Some(resolved) = service.resolve_id(id)? else {
        return Err(CashbookError::NothingToDelete(format!(
            "no transaction matches '{}'",
            id
        )));
    };

    if !force {
        print!("{}", format_transaction_details(service.get(resolved)?, settings));
        if !confirm_on_stdin("Delete this transaction?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let outcome = service.remove(Some(resolved))?;
    println!("Deleted {}", outcome.value.id);
    report_warning(outcome.warning.as_ref());

    Ok(())
}

/// Handle `clear`
pub fn handle_clear_command(storage: &mut Storage, force: bool) -> CashbookResult<()> {
    let mut service = LedgerService::new(storage);
    let count = service.snapshot().transactions.len();
    if count == 0 {
        return Err(CashbookError::AlreadyEmpty);
    }

    if !force {
        let prompt = format!("Delete all {} transactions?", count);
        if !confirm_on_stdin(&prompt)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let outcome = service.clear()?;
    println!("Deleted {} transaction(s).", outcome.value);
    report_warning(outcome.warning.as_ref());

    Ok(())
}
