//! Aggregations over a transaction collection
//!
//! Everything here is a pure function of a borrowed slice: no storage, no
//! side effects, and no error cases. Views call these single definitions
//! rather than computing totals themselves.

pub mod category;
pub mod ledger;
pub mod recent;
pub mod summary;

pub use category::{by_category, CategoryBreakdown, CategoryTotal};
pub use ledger::TransactionFilter;
pub use recent::{recent, DEFAULT_RECENT_LIMIT};
pub use summary::{totals, Totals};
