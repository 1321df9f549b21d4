//! Keeping views consistent with the repository
//!
//! After every mutation the [`Tracker`] hands a [`Snapshot`] to the
//! [`ChangeNotifier`], which refreshes each registered [`View`]. A view that
//! is not mounted is skipped, and a view that fails is recorded without
//! stopping the others.
//!
//! Changes written by other sessions arrive through a storage subscription;
//! the tracker reloads from the store and runs the same fan-out.

mod tracker;

pub use tracker::Tracker;

use tracing::{trace, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::Transaction;
use crate::reports::{totals, Totals};

/// What a view gets to render from
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub transactions: &'a [Transaction],
    pub totals: Totals,
}

impl<'a> Snapshot<'a> {
    pub fn of(transactions: &'a [Transaction]) -> Self {
        Self {
            transactions,
            totals: totals(transactions),
        }
    }
}

/// A presentation component refreshed after every change
pub trait View {
    /// Name used in logs and refresh reports
    fn name(&self) -> &str;

    /// Whether the view is present on the current screen
    fn is_mounted(&self) -> bool {
        true
    }

    /// Re-render from the snapshot
    fn refresh(&mut self, snapshot: &Snapshot<'_>) -> TrackerResult<()>;
}

/// Outcome of one fan-out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub refreshed: Vec<String>,
    pub skipped: Vec<String>,
    /// View name and error message
    pub failed: Vec<(String, String)>,
}

impl RefreshReport {
    /// True when no view failed
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Turn the first failure, if any, into an error
    pub fn into_result(self) -> TrackerResult<()> {
        match self.failed.into_iter().next() {
            Some((view, reason)) => Err(TrackerError::view(view, reason)),
            None => Ok(()),
        }
    }
}

/// Registry of views to refresh on change
#[derive(Default)]
pub struct ChangeNotifier {
    views: Vec<Box<dyn View>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, view: Box<dyn View>) {
        self.views.push(view);
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Refresh every mounted view, in registration order
    pub fn notify_changed(&mut self, snapshot: &Snapshot<'_>) -> RefreshReport {
        let mut report = RefreshReport::default();

        for view in &mut self.views {
            let name = view.name().to_string();
            if !view.is_mounted() {
                trace!("Skipping unmounted view {}", name);
                report.skipped.push(name);
                continue;
            }

            match view.refresh(snapshot) {
                Ok(()) => report.refreshed.push(name),
                Err(e) => {
                    warn!("View {} failed to refresh: {}", name, e);
                    let reason = match e {
                        TrackerError::View { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    report.failed.push((name, reason));
                }
            }
        }

        report
    }
}
