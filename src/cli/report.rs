//! Report CLI commands: dashboard summary, category chart, recent activity

use super::{mount_page, Page};
use crate::config::Settings;
use crate::error::TrackerResult;
use crate::reports::TransactionFilter;
use crate::sync::Tracker;

/// Handle `summary` (the dashboard page)
pub fn handle_summary_command(tracker: &mut Tracker, settings: &Settings) -> TrackerResult<()> {
    mount_page(tracker, Page::Dashboard, settings, TransactionFilter::default());
    tracker.refresh_views().into_result()?;

    if let Some(budget) = tracker.budget()? {
        let symbol = &settings.currency_symbol;
        let spent = tracker.totals().expenses;
        println!(
            "Monthly budget: {} ({} spent, {} left)",
            budget.format_with_symbol(symbol),
            spent.format_with_symbol(symbol),
            (budget - spent).format_with_symbol(symbol),
        );
    }
    Ok(())
}

/// Handle `categories` (the reports page)
pub fn handle_categories_command(tracker: &mut Tracker, settings: &Settings) -> TrackerResult<()> {
    mount_page(tracker, Page::Reports, settings, TransactionFilter::default());
    tracker.refresh_views().into_result()?;
    Ok(())
}

/// Handle `recent`
pub fn handle_recent_command(
    tracker: &mut Tracker,
    settings: &Settings,
    limit: Option<usize>,
) -> TrackerResult<()> {
    let settings = Settings {
        recent_limit: limit.unwrap_or(settings.recent_limit),
        ..settings.clone()
    };
    mount_page(tracker, Page::Activity, &settings, TransactionFilter::default());
    tracker.refresh_views().into_result()?;
    Ok(())
}
