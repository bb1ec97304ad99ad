//! Transaction display formatting
//!
//! Register table and single-record detail view.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::amount::format_amount;
use crate::config::settings::Settings;
use crate::models::Transaction;

const NOTE_WIDTH: usize = 30;

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

impl RegisterRow {
    fn new(txn: &Transaction, settings: &Settings) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            amount: format_amount(txn.amount, settings),
            note: truncate(&txn.note, NOTE_WIDTH),
        }
    }
}

/// Format the transactions as a register table, in the order given
pub fn format_register(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions recorded.".to_string();
    }

    let rows = transactions.iter().map(|t| RegisterRow::new(t, settings));
    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    table.to_string()
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Full ID:     {}\n", txn.id.as_uuid()));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Kind:        {}\n", txn.kind));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Amount:      {}\n", format_amount(txn.amount, settings)));

    if !txn.note.is_empty() {
        output.push_str(&format!("Note:        {}\n", txn.note));
    }

    output
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, category: &str, units: i64, note: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 11, 22).unwrap(),
            kind,
            category,
            Money::from_units(units),
            note,
        )
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(
            format_register(&[], &Settings::default()),
            "No transactions recorded."
        );
    }

    #[test]
    fn test_register_rows() {
        let salary = txn(TransactionKind::Income, "Salary", 5_000_000, "");
        let food = txn(TransactionKind::Expense, "Food", 25_000, "Nasi goreng");
        let output = format_register(&[salary.clone(), food.clone()], &Settings::default());

        for header in ["ID", "Date", "Kind", "Category", "Amount", "Note"] {
            assert!(output.contains(header), "missing {header}");
        }
        assert!(output.contains(&salary.id.to_string()));
        assert!(output.contains("Rp 5.000.000"));
        assert!(output.contains("Rp 25.000"));
        assert!(output.contains("Nasi goreng"));

        let salary_line = output.find("Salary").unwrap();
        let food_line = output.find("Food").unwrap();
        assert!(salary_line < food_line);
    }

    #[test]
    fn test_long_notes_are_truncated() {
        let note = "é".repeat(50);
        let output = format_register(
            &[txn(TransactionKind::Expense, "Food", 1, &note)],
            &Settings::default(),
        );
        assert!(!output.contains(&note));
        assert!(output.contains("..."));
    }

    #[test]
    fn test_details() {
        let t = txn(TransactionKind::Expense, "Food", 25_000, "Lunch");
        let output = format_transaction_details(&t, &Settings::default());

        assert!(output.contains(&t.id.to_string()));
        assert!(output.contains("2025-11-22"));
        assert!(output.contains("Expense"));
        assert!(output.contains("Rp 25.000"));
        assert!(output.contains("Note:        Lunch"));

        let plain = txn(TransactionKind::Income, "Gift", 10, "");
        assert!(!format_transaction_details(&plain, &Settings::default()).contains("Note:"));
    }
}
