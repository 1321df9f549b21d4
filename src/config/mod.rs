//! Configuration module for the budget tracker
//!
//! This module provides configuration management including:
//! - Path resolution for the data directory and settings file
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
