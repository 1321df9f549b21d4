//! Terminal views
//!
//! Each view implements [`View`](crate::sync::View) and renders into any
//! [`Write`] sink, so the same view serves the CLI (stdout) and tests
//! (`Vec<u8>`). Which views are mounted depends on the page being shown.

pub mod chart;
pub mod dashboard;
pub mod ledger;

pub use chart::{CategoryChartView, IncomeExpenseView};
pub use dashboard::{RecentView, SummaryView};
pub use ledger::LedgerView;

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Transaction, TransactionDate};

/// Output sink shared by all views
#[derive(Debug)]
pub struct Surface<W: Write> {
    out: W,
    mounted: bool,
    currency: String,
    date_format: String,
}

impl<W: Write> Surface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            mounted: true,
            currency: "$".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }

    pub fn mounted(mut self, mounted: bool) -> Self {
        self.mounted = mounted;
        self
    }

    pub fn currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency = symbol.into();
        self
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency
    }

    /// A stored date in the display format, or as entered if unparsable
    pub fn format_date(&self, date: &TransactionDate) -> String {
        match date.parse() {
            Some(parsed) => parsed.format(&self.date_format).to_string(),
            None => date.as_str().to_string(),
        }
    }

    /// Amount with its direction sign, e.g. "+$1000.00"
    pub fn signed_amount(&self, txn: &Transaction) -> String {
        format!(
            "{}{}",
            txn.kind.sign(),
            txn.amount.format_with_symbol(&self.currency)
        )
    }

    /// Write a rendered block, mapping failures to a view error
    pub fn emit(&mut self, view: &str, text: &str) -> TrackerResult<()> {
        writeln!(self.out, "{}", text)
            .and_then(|_| self.out.flush())
            .map_err(|e| TrackerError::view(view, e.to_string()))
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Truncate a string to `max_len` characters, adding "..." when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}

/// A horizontal bar scaled so that `max` fills `width` cells
pub fn bar(value: i64, max: i64, width: usize) -> String {
    if value <= 0 || max <= 0 {
        return String::new();
    }
    let cells = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}
