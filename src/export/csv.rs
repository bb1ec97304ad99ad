//! CSV Export functionality
//!
//! One row per transaction, in ledger order.

use std::io::Write;

use csv::WriterBuilder;
use serde::Serialize;

use crate::error::{CashbookError, CashbookResult};
use crate::models::Transaction;

#[derive(Serialize)]
struct CsvRow<'a> {
    id: String,
    date: String,
    kind: &'static str,
    category: &'a str,
    amount: String,
    note: &'a str,
}

/// Export transactions to CSV
///
/// Header: `id,date,kind,category,amount,note`. Amounts are plain decimals
/// with two places, with no currency symbol or grouping.
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> CashbookResult<()> {
    let mut wrt = WriterBuilder::new().from_writer(writer);

    for txn in transactions {
        wrt.serialize(CsvRow {
            id: txn.id.as_uuid().to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.as_str(),
            category: &txn.category,
            amount: txn.amount.to_string(),
            note: &txn.note,
        })
        .map_err(|e| CashbookError::Export(e.to_string()))?;
    }

    // serialize() only writes the header with the first row
    if transactions.is_empty() {
        wrt.write_record(["id", "date", "kind", "category", "amount", "note"])
            .map_err(|e| CashbookError::Export(e.to_string()))?;
    }

    wrt.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use chrono::NaiveDate;

    fn export(transactions: &[Transaction]) -> String {
        let mut out = Vec::new();
        export_transactions_csv(transactions, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_export() {
        let mut lunch = Transaction::new(
            NaiveDate::from_ymd_opt(2025, 11, 22).unwrap(),
            TransactionKind::Expense,
            "Food",
            Money::from_cents(2_500_050),
            "Lunch, with \"team\"",
        );
        lunch.id = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();

        let csv = export(&[lunch]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,date,kind,category,amount,note"));
        assert_eq!(
            lines.next(),
            Some(
                "550e8400-e29b-41d4-a716-446655440000,2025-11-22,expense,Food,25000.50,\"Lunch, with \"\"team\"\"\""
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_export_has_header() {
        assert_eq!(export(&[]), "id,date,kind,category,amount,note\n");
    }
}
