//! Ledger filtering
//!
//! The ledger shows the collection in its stored order, optionally narrowed
//! by type, category, date range or a description search.

use chrono::NaiveDate;

use crate::models::{Transaction, TransactionType};

/// Filter options for the transaction ledger
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only income or only expenses
    pub kind: Option<TransactionType>,
    /// Category label (case-insensitive)
    pub category: Option<String>,
    /// Inclusive start date
    pub from: Option<NaiveDate>,
    /// Inclusive end date
    pub to: Option<NaiveDate>,
    /// Substring of the description (case-insensitive)
    pub search: Option<String>,
    /// Maximum number of rows
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check if a transaction matches this filter
    ///
    /// When a date bound is set, transactions whose date cannot be parsed
    /// never match.
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }

        if let Some(ref category) = self.category {
            if !txn.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }

        if self.from.is_some() || self.to.is_some() {
            let Some(date) = txn.date.parse() else {
                return false;
            };
            if self.from.is_some_and(|from| date < from) || self.to.is_some_and(|to| date > to) {
                return false;
            }
        }

        if let Some(ref search) = self.search {
            if !txn
                .description
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }

        true
    }

    /// The matching transactions in collection order
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let matching = transactions.iter().filter(|t| self.matches(t));
        match self.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionDraft, TransactionId};

    fn txn(id: u64, description: &str, kind: TransactionType, category: &str, date: &str) -> Transaction {
        Transaction::from_draft(
            TransactionId::new(id),
            TransactionDraft::new(description, Money::from_units(10), kind, category, date),
        )
    }

    fn collection() -> Vec<Transaction> {
        vec![
            txn(1, "Salary", TransactionType::Income, "Job", "2024-01-01"),
            txn(2, "Groceries", TransactionType::Expense, "Food", "2024-01-15"),
            txn(3, "Dinner out", TransactionType::Expense, "food", "2024-02-03"),
            txn(4, "Mystery", TransactionType::Expense, "Food", "someday"),
        ]
    }

    fn ids(rows: Vec<&Transaction>) -> Vec<u64> {
        rows.iter().map(|t| t.id.value()).collect()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let all = collection();
        assert_eq!(ids(TransactionFilter::new().apply(&all)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_kind_filter() {
        let all = collection();
        let rows = TransactionFilter::new().kind(TransactionType::Income).apply(&all);
        assert_eq!(ids(rows), vec![1]);
    }

    #[test]
    fn test_category_is_case_insensitive() {
        let all = collection();
        let rows = TransactionFilter::new().category("FOOD").apply(&all);
        assert_eq!(ids(rows), vec![2, 3, 4]);
    }

    #[test]
    fn test_date_range_is_inclusive_and_skips_unparsable() {
        let all = collection();
        let rows = TransactionFilter::new()
            .date_range(
                NaiveDate::from_ymd_opt(2024, 1, 15),
                NaiveDate::from_ymd_opt(2024, 2, 3),
            )
            .apply(&all);
        assert_eq!(ids(rows), vec![2, 3]);

        let rows = TransactionFilter::new()
            .date_range(NaiveDate::from_ymd_opt(2024, 1, 2), None)
            .apply(&all);
        assert_eq!(ids(rows), vec![2, 3]);
    }

    #[test]
    fn test_search_and_limit() {
        let all = collection();
        let rows = TransactionFilter::new().search("r").limit(2).apply(&all);
        assert_eq!(ids(rows), vec![1, 2]);
    }
}
