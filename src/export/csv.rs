//! CSV Export functionality
//!
//! The layout is fixed: a header row, then one row per transaction in
//! collection order. The description is always quoted; every other field is
//! written as-is. Rows are separated by `\n` with no trailing newline.

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::Transaction;

pub const CSV_HEADER: &str = "ID,Description,Amount,Type,Category,Date";

/// File name suggested for exports
pub const DEFAULT_EXPORT_FILE_NAME: &str = "budget-tracker-export.csv";

/// Render the collection as CSV text
pub fn transactions_to_csv(transactions: &[Transaction]) -> String {
    let mut lines = Vec::with_capacity(transactions.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(transactions.iter().map(format_row));
    lines.join("\n")
}

/// Write the collection as CSV to `writer`
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: &mut W,
) -> TrackerResult<()> {
    writer
        .write_all(transactions_to_csv(transactions).as_bytes())
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))
}

fn format_row(txn: &Transaction) -> String {
    format!(
        "{},{},{},{},{},{}",
        txn.id,
        quote(&txn.description),
        txn.amount.to_plain_string(),
        txn.kind,
        txn.category,
        txn.date
    )
}

/// Wrap in double quotes, doubling any embedded quote
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
