//! Per-category totals
//!
//! Amounts are summed per category label across *both* income and expense
//! transactions; they are added, not netted. A category that has 500 of
//! income and 200 of expenses totals 700.

use crate::models::{Money, Transaction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

/// Category totals in the order each category first appears
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    /// Total for an exact category label
    pub fn get(&self, category: &str) -> Option<Money> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The largest total, useful for scaling a chart
    pub fn max_total(&self) -> Money {
        self.entries
            .iter()
            .map(|e| e.total)
            .max()
            .unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a CategoryBreakdown {
    type Item = &'a CategoryTotal;
    type IntoIter = std::slice::Iter<'a, CategoryTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Sum amounts per category, regardless of transaction type
pub fn by_category(transactions: &[Transaction]) -> CategoryBreakdown {
    let mut entries: Vec<CategoryTotal> = Vec::new();

    for txn in transactions {
        match entries.iter_mut().find(|e| e.category == txn.category) {
            Some(entry) => entry.total += txn.amount,
            None => entries.push(CategoryTotal {
                category: txn.category.clone(),
                total: txn.amount,
            }),
        }
    }

    CategoryBreakdown { entries }
}
