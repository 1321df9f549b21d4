//! Watch CLI command
//!
//! Keeps the dashboard open and re-renders it whenever another session
//! changes the shared data.

use tracing::debug;

use super::{mount_page, Page};
use crate::config::Settings;
use crate::error::TrackerResult;
use crate::reports::TransactionFilter;
use crate::sync::Tracker;

/// Handle `watch`; runs until interrupted, or until `max_updates` external
/// changes have been shown
pub fn handle_watch_command(
    tracker: &mut Tracker,
    settings: &Settings,
    max_updates: Option<usize>,
) -> TrackerResult<()> {
    mount_page(tracker, Page::Dashboard, settings, TransactionFilter::default());
    tracker.refresh_views().into_result()?;
    println!("Watching for changes (Ctrl-C to stop)...");

    let mut updates = 0;
    while max_updates.map_or(true, |max| updates < max) {
        if let Some(report) = tracker.wait_for_external_change(settings.poll_interval())? {
            updates += 1;
            debug!(
                "Refreshed {} views ({} skipped, {} failed)",
                report.refreshed.len(),
                report.skipped.len(),
                report.failed.len()
            );
            report.into_result()?;
        }
    }
    Ok(())
}
