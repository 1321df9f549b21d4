//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the tracker session. Each command shows one
//! "page": the views belonging to that page are mounted, the rest are
//! registered but skipped on refresh.

pub mod export;
pub mod preferences;
pub mod report;
pub mod transaction;
pub mod watch;

pub use export::handle_export_command;
pub use preferences::{handle_budget_command, handle_theme_command, BudgetCommands, ThemeCommands};
pub use report::{handle_categories_command, handle_recent_command, handle_summary_command};
pub use transaction::{
    handle_add_command, handle_delete_command, handle_edit_command, handle_list_command,
    handle_reset_command, AddArgs, EditArgs, ListArgs,
};
pub use watch::handle_watch_command;

use std::io::{self, Stdout};

use crate::config::Settings;
use crate::error::TrackerResult;
use crate::display::{
    CategoryChartView, IncomeExpenseView, LedgerView, RecentView, Surface, SummaryView,
};
use crate::reports::TransactionFilter;
use crate::sync::Tracker;

/// Which group of views a command shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Totals, recent activity and the income/expense chart
    Dashboard,
    /// The transaction ledger
    Transactions,
    /// Income/expense and category charts
    Reports,
    /// Recent activity only
    Activity,
    /// Totals only, shown after a change
    Status,
}

/// Register every view on `tracker`, mounting the ones `page` shows
pub fn mount_page(tracker: &mut Tracker, page: Page, settings: &Settings, filter: TransactionFilter) {
    let surface = |mounted: bool| -> Surface<Stdout> {
        Surface::new(io::stdout())
            .mounted(mounted)
            .currency(settings.currency_symbol.clone())
            .date_format(settings.date_format.clone())
    };

    tracker.register_view(SummaryView::new(surface(matches!(
        page,
        Page::Dashboard | Page::Status
    ))));
    tracker.register_view(
        RecentView::new(surface(matches!(page, Page::Dashboard | Page::Activity))).limit(settings.recent_limit),
    );
    tracker.register_view(IncomeExpenseView::new(surface(matches!(
        page,
        Page::Dashboard | Page::Reports
    ))));
    tracker.register_view(LedgerView::new(surface(page == Page::Transactions)).filter(filter));
    tracker.register_view(CategoryChartView::new(surface(page == Page::Reports)));
}

/// Fail when the last fan-out left a mounted view unrendered
pub fn ensure_rendered(tracker: &Tracker) -> TrackerResult<()> {
    match tracker.last_refresh() {
        Some(report) => report.clone().into_result(),
        None => Ok(()),
    }
}
