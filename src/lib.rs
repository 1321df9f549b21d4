//! budget-tracker - Personal income and expense tracking
//!
//! This library holds the core of a small personal finance tracker: a
//! transaction collection persisted to a key-value store, pure aggregations
//! over it, and a synchronization layer that keeps every open session's
//! views consistent with the stored data.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, ids, theme)
//! - `storage`: Key-value backends, the store adapter and the repository
//! - `reports`: Totals, category breakdown, recent activity, ledger filter
//! - `export`: CSV export
//! - `sync`: Change notification and cross-session reload
//! - `display`: Terminal views
//! - `cli`: Command handlers for the `budget` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use budget_tracker::models::{Money, TransactionDraft, TransactionType};
//! use budget_tracker::storage::{MemoryStore, Store};
//! use budget_tracker::sync::Tracker;
//!
//! let mut tracker = Tracker::open(Store::new(MemoryStore::new()))?;
//! tracker.add(TransactionDraft::new(
//!     "Salary",
//!     Money::from_units(1000),
//!     TransactionType::Income,
//!     "Job",
//!     "2024-01-01",
//! ))?;
//! assert_eq!(tracker.totals().balance, Money::from_units(1000));
//! # Ok::<(), budget_tracker::TrackerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod storage;
pub mod sync;

pub use error::{TrackerError, TrackerResult};
