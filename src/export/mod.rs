//! Export module for the budget tracker
//!
//! Turns the transaction collection into text that can be handed to the user
//! as a file. Offering it as a download or writing it to disk is the
//! caller's job.

pub mod csv;

pub use csv::{export_transactions_csv, transactions_to_csv, CSV_HEADER, DEFAULT_EXPORT_FILE_NAME};
