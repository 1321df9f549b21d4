//! Text charts for the reports page

use std::io::Write;

use super::{bar, truncate, Surface};
use crate::error::TrackerResult;
use crate::reports::by_category;
use crate::sync::{Snapshot, View};

const BAR_WIDTH: usize = 30;

/// Income against expenses as two bars
pub struct IncomeExpenseView<W: Write> {
    surface: Surface<W>,
}

impl<W: Write> IncomeExpenseView<W> {
    pub fn new(surface: Surface<W>) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &Surface<W> {
        &self.surface
    }

    pub fn render(&self, snapshot: &Snapshot<'_>) -> String {
        let symbol = self.surface.currency_symbol();
        let income = snapshot.totals.income;
        let expenses = snapshot.totals.expenses;
        let max = income.max(expenses).cents();

        format!(
            "Income vs expenses\n{:<10} {:<width$} {}\n{:<10} {:<width$} {}",
            "Income",
            bar(income.cents(), max, BAR_WIDTH),
            income.format_with_symbol(symbol),
            "Expenses",
            bar(expenses.cents(), max, BAR_WIDTH),
            expenses.format_with_symbol(symbol),
            width = BAR_WIDTH,
        )
    }
}

impl<W: Write> View for IncomeExpenseView<W> {
    fn name(&self) -> &str {
        "income-expense-chart"
    }

    fn is_mounted(&self) -> bool {
        self.surface.is_mounted()
    }

    fn refresh(&mut self, snapshot: &Snapshot<'_>) -> TrackerResult<()> {
        let text = self.render(snapshot);
        self.surface.emit("income-expense-chart", &text)
    }
}

/// One bar per category, in the order categories first appear
pub struct CategoryChartView<W: Write> {
    surface: Surface<W>,
}

impl<W: Write> CategoryChartView<W> {
    pub fn new(surface: Surface<W>) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &Surface<W> {
        &self.surface
    }

    pub fn render(&self, snapshot: &Snapshot<'_>) -> String {
        let breakdown = by_category(snapshot.transactions);
        if breakdown.is_empty() {
            return "No categories to show.".to_string();
        }

        let symbol = self.surface.currency_symbol();
        let max = breakdown.max_total().cents();
        let label_width = breakdown
            .iter()
            .map(|e| e.category.chars().count().min(20))
            .max()
            .unwrap_or(0)
            .max(8);

        let mut output = String::from("By category");
        for entry in &breakdown {
            output.push_str(&format!(
                "\n{:<label$} {:<width$} {}",
                truncate(&entry.category, 20),
                bar(entry.total.cents(), max, BAR_WIDTH),
                entry.total.format_with_symbol(symbol),
                label = label_width,
                width = BAR_WIDTH,
            ));
        }
        output
    }
}

impl<W: Write> View for CategoryChartView<W> {
    fn name(&self) -> &str {
        "category-chart"
    }

    fn is_mounted(&self) -> bool {
        self.surface.is_mounted()
    }

    fn refresh(&mut self, snapshot: &Snapshot<'_>) -> TrackerResult<()> {
        let text = self.render(snapshot);
        self.surface.emit("category-chart", &text)
    }
}
