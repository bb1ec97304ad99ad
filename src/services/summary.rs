//! Ledger totals
//!
//! Recomputed from scratch over the whole list every time; the list is
//! small enough that nothing is cached. Totals saturate at the i64 range
//! rather than overflow.

use serde::{Deserialize, Serialize};

use crate::models::{Money, Transaction, TransactionKind};

/// Total income, total expense and balance of a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
}

impl Summary {
    /// Sum the transactions by kind
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (total_income, total_expense) = transactions.into_iter().fold(
            (Money::zero(), Money::zero()),
            |(income, expense), txn| match txn.kind {
                TransactionKind::Income => (income.saturating_add(txn.amount), expense),
                TransactionKind::Expense => (income, expense.saturating_add(txn.amount)),
            },
        );

        Self {
            total_income,
            total_expense,
            balance: total_income.saturating_sub(total_expense),
        }
    }
}
