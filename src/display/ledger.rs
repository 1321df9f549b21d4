//! The transactions page: a filtered table of the whole collection

use std::io::Write;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{truncate, Surface};
use crate::error::TrackerResult;
use crate::reports::TransactionFilter;
use crate::sync::{Snapshot, View};

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

pub struct LedgerView<W: Write> {
    surface: Surface<W>,
    filter: TransactionFilter,
}

impl<W: Write> LedgerView<W> {
    pub fn new(surface: Surface<W>) -> Self {
        Self {
            surface,
            filter: TransactionFilter::default(),
        }
    }

    pub fn filter(mut self, filter: TransactionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn surface(&self) -> &Surface<W> {
        &self.surface
    }

    pub fn render(&self, snapshot: &Snapshot<'_>) -> String {
        let rows: Vec<LedgerRow> = self
            .filter
            .apply(snapshot.transactions)
            .into_iter()
            .map(|txn| LedgerRow {
                id: txn.id.value(),
                date: self.surface.format_date(&txn.date),
                description: truncate(&txn.description, 40),
                category: truncate(&txn.category, 20),
                kind: txn.kind.to_string(),
                amount: self.surface.signed_amount(txn),
            })
            .collect();

        if rows.is_empty() {
            return "No transactions found.".to_string();
        }

        let count = rows.len();
        format!(
            "{}\n{} of {} transactions",
            Table::new(rows).with(Style::sharp()),
            count,
            snapshot.transactions.len()
        )
    }
}

impl<W: Write> View for LedgerView<W> {
    fn name(&self) -> &str {
        "ledger"
    }

    fn is_mounted(&self) -> bool {
        self.surface.is_mounted()
    }

    fn refresh(&mut self, snapshot: &Snapshot<'_>) -> TrackerResult<()> {
        let text = self.render(snapshot);
        self.surface.emit("ledger", &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction, TransactionDraft, TransactionId, TransactionType};

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::from_draft(
                TransactionId::new(1),
                TransactionDraft::new("Salary", Money::from_units(1000), TransactionType::Income, "Job", "2024-01-01"),
            ),
            Transaction::from_draft(
                TransactionId::new(2),
                TransactionDraft::new("Groceries", Money::from_cents(5420), TransactionType::Expense, "Food", "2024-01-05"),
            ),
        ]
    }

    #[test]
    fn test_ledger_lists_rows_in_order() {
        let transactions = sample();
        let view = LedgerView::new(Surface::new(Vec::new()));

        let output = view.render(&Snapshot::of(&transactions));

        assert!(output.contains("Description"));
        assert!(output.find("Salary").unwrap() < output.find("Groceries").unwrap());
        assert!(output.contains("+$1000.00"));
        assert!(output.contains("-$54.20"));
        assert!(output.ends_with("2 of 2 transactions"));
    }

    #[test]
    fn test_ledger_applies_filter() {
        let transactions = sample();
        let view = LedgerView::new(Surface::new(Vec::new()))
            .filter(TransactionFilter::new().kind(TransactionType::Expense));

        let output = view.render(&Snapshot::of(&transactions));

        assert!(!output.contains("Salary"));
        assert!(output.ends_with("1 of 2 transactions"));
    }

    #[test]
    fn test_ledger_empty() {
        let mut view = LedgerView::new(Surface::new(Vec::new()));
        view.refresh(&Snapshot::of(&[])).unwrap();
        assert_eq!(view.surface().get_ref().as_slice(), b"No transactions found.\n");
    }
}
