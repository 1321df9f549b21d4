//! Most recent transactions

use std::cmp::Reverse;

use crate::models::Transaction;

/// How many rows the recent-activity widget shows by default
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// The `n` most recent transactions, newest first
///
/// The sort is stable, so transactions on the same date keep their
/// collection order. Dates that cannot be parsed sort as the oldest.
pub fn recent(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    // Option orders None first, so unparsable dates end up last once reversed
    sorted.sort_by_key(|t| Reverse(t.date.parse()));
    sorted.into_iter().take(n).cloned().collect()
}
