//! A single tracker session
//!
//! One [`Tracker`] corresponds to one open tab of the application: it owns a
//! repository, the views registered on it and a subscription to changes made
//! by other sessions sharing the same store.

use std::time::Duration;

use tracing::{debug, info};

use super::{ChangeNotifier, RefreshReport, Snapshot, View};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, Theme, Transaction, TransactionDraft, TransactionId};
use crate::reports::{totals, Totals};
use crate::storage::{StorageEvent, StorageSubscription, Store, TransactionRepository};

pub struct Tracker {
    repo: TransactionRepository,
    notifier: ChangeNotifier,
    subscription: StorageSubscription,
    last_refresh: Option<RefreshReport>,
}

impl Tracker {
    /// Open a session over `store` and load its transactions
    pub fn open(store: Store) -> TrackerResult<Self> {
        // Subscribe before loading so nothing written in between is missed
        let subscription = store.subscribe();
        let repo = TransactionRepository::open(store)?;
        debug!("Opened tracker with {} transactions", repo.len());

        Ok(Self {
            repo,
            notifier: ChangeNotifier::new(),
            subscription,
            last_refresh: None,
        })
    }

    pub fn register_view(&mut self, view: impl View + 'static) {
        self.notifier.register(Box::new(view));
    }

    /// Render every mounted view from the current state
    pub fn refresh_views(&mut self) -> RefreshReport {
        let snapshot = Snapshot::of(self.repo.transactions());
        let report = self.notifier.notify_changed(&snapshot);
        self.last_refresh = Some(report.clone());
        report
    }

    /// The report of the most recent fan-out, if any ran
    pub fn last_refresh(&self) -> Option<&RefreshReport> {
        self.last_refresh.as_ref()
    }

    pub fn add(&mut self, draft: TransactionDraft) -> TrackerResult<Transaction> {
        let txn = self.repo.add(draft)?;
        self.refresh_views();
        Ok(txn)
    }

    pub fn edit(&mut self, id: TransactionId, patch: TransactionDraft) -> TrackerResult<Transaction> {
        let txn = self.repo.edit(id, patch)?;
        self.refresh_views();
        Ok(txn)
    }

    /// Remove `id`; views only refresh when something was removed
    pub fn remove(&mut self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        let removed = self.repo.remove(id)?;
        if removed.is_some() {
            self.refresh_views();
        }
        Ok(removed)
    }

    pub fn reset_all(&mut self) -> TrackerResult<()> {
        self.repo.reset_all()?;
        self.refresh_views();
        Ok(())
    }

    /// Apply changes other sessions made since the last call
    ///
    /// Returns the fan-out report when a reload happened.
    pub fn process_external_changes(&mut self) -> TrackerResult<Option<RefreshReport>> {
        let events = self.subscription.drain();
        self.apply_external(events)
    }

    /// Block up to `timeout` for a change from another session, then apply it
    /// along with anything else already pending
    pub fn wait_for_external_change(
        &mut self,
        timeout: Duration,
    ) -> TrackerResult<Option<RefreshReport>> {
        let Some(first) = self.subscription.wait(timeout) else {
            return Ok(None);
        };
        let mut events = vec![first];
        events.extend(self.subscription.drain());
        self.apply_external(events)
    }

    fn apply_external(&mut self, events: Vec<StorageEvent>) -> TrackerResult<Option<RefreshReport>> {
        if events.is_empty() {
            return Ok(None);
        }

        let keys: Vec<&str> = events.iter().map(|e| e.key.name()).collect();
        debug!("External changes to {:?}", keys);

        self.repo.reload()?;
        info!("Reloaded {} transactions after external change", self.repo.len());
        Ok(Some(self.refresh_views()))
    }

    /// The saved monthly budget
    pub fn budget(&self) -> TrackerResult<Option<Money>> {
        self.repo.store().load_budget()
    }

    /// Save the monthly budget from user-entered text
    pub fn set_budget_from_input(&self, input: &str) -> TrackerResult<Money> {
        let input = input.trim();
        if input.is_empty() {
            return Err(TrackerError::InvalidInput(
                "Please enter a budget amount".into(),
            ));
        }

        let budget = Money::parse(input).map_err(|e| TrackerError::InvalidInput(e.to_string()))?;
        if budget.is_negative() {
            return Err(TrackerError::InvalidInput(
                "Budget cannot be negative".into(),
            ));
        }
        if !budget.is_within_limit() {
            return Err(TrackerError::InvalidInput(format!(
                "Budget cannot exceed {}",
                Money::MAX_AMOUNT
            )));
        }

        self.repo.store().save_budget(budget)?;
        info!("Monthly budget set to {}", budget);
        Ok(budget)
    }

    pub fn theme(&self) -> TrackerResult<Theme> {
        self.repo.store().load_theme()
    }

    pub fn set_theme(&self, theme: Theme) -> TrackerResult<()> {
        self.repo.store().save_theme(theme)?;
        debug!("Theme set to {}", theme);
        Ok(())
    }

    /// Switch between light and dark, returning the new theme
    pub fn toggle_theme(&self) -> TrackerResult<Theme> {
        let theme = self.theme()?.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    pub fn repository(&self) -> &TransactionRepository {
        &self.repo
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.repo.transactions()
    }

    pub fn totals(&self) -> Totals {
        totals(self.repo.transactions())
    }

    pub fn export_csv(&self) -> String {
        self.repo.export_csv()
    }
}
