//! Transaction model
//!
//! A single income or expense record. The amount is always positive; the
//! direction of the money is carried by [`TransactionKind`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received
    Income,
    /// Money spent
    #[default]
    Expense,
}

impl TransactionKind {
    /// Tag used in the ledger file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!("unknown transaction kind '{}'", other)),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Income or expense
    pub kind: TransactionKind,

    /// Free-form category label (e.g. "Groceries")
    pub category: String,

    /// Strictly positive amount
    pub amount: Money,

    /// Optional note
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Money,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            kind,
            category: category.into(),
            amount,
            note: note.into(),
        }
    }

    /// Validate the record invariants
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.category,
            self.amount
        )
    }
}

/// Invariant violations of a stored transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    MissingCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero, got {}", amount)
            }
            Self::MissingCategory => write!(f, "Category must not be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
