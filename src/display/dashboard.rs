//! Dashboard widgets: headline totals and recent activity

use std::io::Write;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{truncate, Surface};
use crate::error::TrackerResult;
use crate::reports::{recent, DEFAULT_RECENT_LIMIT};
use crate::sync::{Snapshot, View};

/// Balance, income and expense totals
pub struct SummaryView<W: Write> {
    surface: Surface<W>,
}

impl<W: Write> SummaryView<W> {
    pub fn new(surface: Surface<W>) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &Surface<W> {
        &self.surface
    }

    pub fn render(&self, snapshot: &Snapshot<'_>) -> String {
        let symbol = self.surface.currency_symbol();
        let totals = snapshot.totals;
        format!(
            "Balance:   {:>14}\nIncome:    {:>14}\nExpenses:  {:>14}",
            totals.balance.format_with_symbol(symbol),
            totals.income.format_with_symbol(symbol),
            totals.expenses.format_with_symbol(symbol),
        )
    }
}

impl<W: Write> View for SummaryView<W> {
    fn name(&self) -> &str {
        "summary"
    }

    fn is_mounted(&self) -> bool {
        self.surface.is_mounted()
    }

    fn refresh(&mut self, snapshot: &Snapshot<'_>) -> TrackerResult<()> {
        let text = self.render(snapshot);
        self.surface.emit("summary", &text)
    }
}

#[derive(Tabled)]
struct RecentRow {
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Date")]
    date: String,
}

/// The most recent transactions by date
pub struct RecentView<W: Write> {
    surface: Surface<W>,
    limit: usize,
}

impl<W: Write> RecentView<W> {
    pub fn new(surface: Surface<W>) -> Self {
        Self {
            surface,
            limit: DEFAULT_RECENT_LIMIT,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn surface(&self) -> &Surface<W> {
        &self.surface
    }

    pub fn render(&self, snapshot: &Snapshot<'_>) -> String {
        let latest = recent(snapshot.transactions, self.limit);
        if latest.is_empty() {
            return "No transactions yet.".to_string();
        }

        let rows = latest.iter().map(|txn| RecentRow {
            description: truncate(&txn.description, 30),
            amount: self.surface.signed_amount(txn),
            date: self.surface.format_date(&txn.date),
        });

        format!(
            "Recent transactions\n{}",
            Table::new(rows).with(Style::sharp())
        )
    }
}

impl<W: Write> View for RecentView<W> {
    fn name(&self) -> &str {
        "recent"
    }

    fn is_mounted(&self) -> bool {
        self.surface.is_mounted()
    }

    fn refresh(&mut self, snapshot: &Snapshot<'_>) -> TrackerResult<()> {
        let text = self.render(snapshot);
        self.surface.emit("recent", &text)
    }
}
