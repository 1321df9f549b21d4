//! Core data models for the budget tracker
//!
//! This module contains the data structures of the tracking domain:
//! transactions, their ids, money amounts and the theme preference.

pub mod ids;
pub mod money;
pub mod theme;
pub mod transaction;

pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use theme::Theme;
pub use transaction::{Transaction, TransactionDate, TransactionDraft, TransactionType};
