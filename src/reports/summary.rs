//! Income, expense and balance totals

use crate::models::{Money, Transaction, TransactionType};

/// Headline figures for a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    /// Sum of income amounts
    pub income: Money,
    /// Sum of expense amounts
    pub expenses: Money,
    /// `income - expenses`
    pub balance: Money,
}

/// Compute income, expense and balance totals
pub fn totals(transactions: &[Transaction]) -> Totals {
    let (income, expenses) = transactions.iter().fold(
        (Money::zero(), Money::zero()),
        |(income, expenses), txn| match txn.kind {
            TransactionType::Income => (income + txn.amount, expenses),
            TransactionType::Expense => (income, expenses + txn.amount),
        },
    );

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}
