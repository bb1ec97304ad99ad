//! Transaction form validation
//!
//! Turns the raw text a user typed into a checked entry. Nothing here
//! touches storage; a rejected form leaves the ledger exactly as it was.

use chrono::NaiveDate;

use crate::error::{FormField, ValidationError};
use crate::models::{Money, MoneyParseError, Transaction, TransactionKind};

/// The only accepted date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw input for a new transaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub date: String,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: String,
    pub note: String,
}

/// A form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntry {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub note: String,
}

impl ValidatedEntry {
    /// Build the record, assigning a fresh id
    pub fn into_transaction(self) -> Transaction {
        Transaction::new(self.date, self.kind, self.category, self.amount, self.note)
    }
}

impl TransactionForm {
    /// Create a form from its five fields
    pub fn new(
        date: impl Into<String>,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            kind,
            category: category.into(),
            amount: amount.into(),
            note: note.into(),
        }
    }

    /// Check every field, stopping at the first failure
    ///
    /// Order: date, category, amount.
    pub fn validate(&self) -> Result<ValidatedEntry, ValidationError> {
        let date = parse_date(&self.date)?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingField(FormField::Category));
        }

        let amount = parse_amount(&self.amount)?;

        Ok(ValidatedEntry {
            date,
            kind: self.kind,
            category: category.to_string(),
            amount,
            note: self.note.trim().to_string(),
        })
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BadDate(String::new()));
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::BadDate(trimmed.to_string()))
}

/// Parse an amount that must be strictly greater than zero
pub fn parse_amount(input: &str) -> Result<Money, ValidationError> {
    let trimmed = input.trim();
    let bad_amount = |reason: String| ValidationError::BadAmount {
        input: trimmed.to_string(),
        reason,
    };

    let amount = Money::parse(trimmed).map_err(|e: MoneyParseError| bad_amount(e.to_string()))?;

    if !amount.is_positive() {
        return Err(bad_amount("must be greater than 0".to_string()));
    }

    Ok(amount)
}
