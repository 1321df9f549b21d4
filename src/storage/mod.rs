//! Storage layer for the budget tracker
//!
//! [`Store`] is the only place that knows how transactions, the id counter,
//! the monthly budget and the theme are laid out in the key-value namespace.
//! It does no business logic; the [`TransactionRepository`] sits on top of it.

pub mod file_io;
pub mod file_store;
pub mod kv;
pub mod memory;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic};
pub use file_store::FileStore;
pub use kv::{KeyValueStore, StorageEvent, StorageKey, StorageSubscription};
pub use memory::MemoryStore;
pub use transactions::TransactionRepository;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, Theme, Transaction, TransactionId};

/// Persistence adapter over a key-value namespace
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
}

impl Store {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn from_backend(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Load the persisted collection
    ///
    /// A missing entry and a payload that does not parse both yield an empty
    /// collection; the latter is logged. Only substrate failures are errors.
    pub fn load(&self) -> TrackerResult<Vec<Transaction>> {
        match self.load_checked() {
            Err(TrackerError::MalformedPersistedData { key, reason }) => {
                warn!("Ignoring malformed {} payload: {}", key, reason);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Like [`Store::load`] but reports malformed payloads
    pub fn load_checked(&self) -> TrackerResult<Vec<Transaction>> {
        let Some(raw) = self.backend.get(StorageKey::Transactions)? else {
            return Ok(Vec::new());
        };

        let malformed = |reason: String| TrackerError::MalformedPersistedData {
            key: StorageKey::Transactions.name().to_string(),
            reason,
        };

        let transactions: Vec<Transaction> =
            serde_json::from_str(&raw).map_err(|e| malformed(e.to_string()))?;
        if let Some(last) = transactions.iter().find(|t| t.id.checked_next().is_none()) {
            return Err(malformed(format!("id {} leaves no room for new ids", last.id)));
        }
        Ok(transactions)
    }

    /// Overwrite the persisted collection with `transactions`
    pub fn save(&self, transactions: &[Transaction]) -> TrackerResult<()> {
        let payload = serde_json::to_string(transactions)?;
        self.backend.set(StorageKey::Transactions, &payload)?;
        debug!("Saved {} transactions", transactions.len());
        Ok(())
    }

    /// Remove the persisted collection and the id counter
    pub fn clear(&self) -> TrackerResult<()> {
        self.backend.remove(StorageKey::Transactions)?;
        self.backend.remove(StorageKey::NextId)?;
        debug!("Cleared persisted transactions");
        Ok(())
    }

    /// The persisted id counter, if one was saved and is readable
    pub fn load_next_id(&self) -> TrackerResult<Option<TransactionId>> {
        let Some(raw) = self.backend.get(StorageKey::NextId)? else {
            return Ok(None);
        };
        match raw.parse::<TransactionId>() {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                warn!("Ignoring malformed {} value '{}': {}", StorageKey::NextId.name(), raw, e);
                Ok(None)
            }
        }
    }

    pub fn save_next_id(&self, next_id: TransactionId) -> TrackerResult<()> {
        self.backend.set(StorageKey::NextId, &next_id.to_string())
    }

    /// The monthly budget, `None` when unset or unreadable
    pub fn load_budget(&self) -> TrackerResult<Option<Money>> {
        let Some(raw) = self.backend.get(StorageKey::MonthlyBudget)? else {
            return Ok(None);
        };
        match Money::parse(&raw) {
            Ok(budget) => Ok(Some(budget)),
            Err(e) => {
                warn!("Ignoring malformed {} value: {}", StorageKey::MonthlyBudget.name(), e);
                Ok(None)
            }
        }
    }

    pub fn save_budget(&self, budget: Money) -> TrackerResult<()> {
        self.backend
            .set(StorageKey::MonthlyBudget, &budget.to_plain_string())
    }

    /// The theme preference, light unless dark was saved
    pub fn load_theme(&self) -> TrackerResult<Theme> {
        let Some(raw) = self.backend.get(StorageKey::Theme)? else {
            return Ok(Theme::default());
        };
        Ok(raw.parse().unwrap_or_else(|_| {
            debug!("Unknown theme '{}', using default", raw);
            Theme::default()
        }))
    }

    pub fn save_theme(&self, theme: Theme) -> TrackerResult<()> {
        self.backend.set(StorageKey::Theme, theme.as_str())
    }

    /// Subscribe to changes made by other sessions
    pub fn subscribe(&self) -> StorageSubscription {
        self.backend.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionDraft, TransactionType};
    use tempfile::TempDir;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::from_draft(
                TransactionId::new(1),
                TransactionDraft::new(
                    "Salary",
                    Money::from_units(1000),
                    TransactionType::Income,
                    "Job",
                    "2024-01-01",
                ),
            ),
            Transaction::from_draft(
                TransactionId::new(3),
                TransactionDraft::new(
                    "Lunch, with \"friends\"",
                    Money::from_cents(1250),
                    TransactionType::Expense,
                    "Food",
                    "1/15/2024",
                ),
            ),
        ]
    }

    #[test]
    fn test_load_empty_store() {
        let store = Store::new(MemoryStore::new());
        assert!(store.load().unwrap().is_empty());
        assert!(store.load_checked().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = Store::new(MemoryStore::new());
        let transactions = sample();

        store.save(&transactions).unwrap();
        assert_eq!(store.load().unwrap(), transactions);
    }

    #[test]
    fn test_round_trip_through_files() {
        let temp_dir = TempDir::new().unwrap();
        let transactions = sample();

        Store::new(FileStore::new(temp_dir.path()))
            .save(&transactions)
            .unwrap();

        let reopened = Store::new(FileStore::new(temp_dir.path()));
        assert_eq!(reopened.load().unwrap(), transactions);
    }

    #[test]
    fn test_malformed_payload_degrades_to_empty() {
        let backend = MemoryStore::new();
        backend.set(StorageKey::Transactions, "{not json").unwrap();
        let store = Store::new(backend);

        assert!(store.load().unwrap().is_empty());
        assert!(store.load_checked().unwrap_err().is_malformed());
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let backend = MemoryStore::new();
        backend
            .set(StorageKey::Transactions, r#"[{"id":1,"amount":"lots"}]"#)
            .unwrap();
        let store = Store::new(backend);

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_amounts_over_limit_are_malformed() {
        let backend = MemoryStore::new();
        backend
            .set(
                StorageKey::Transactions,
                r#"[{"id":1,"description":"a","amount":60000000000000000,"type":"income","category":"X","date":"2024-01-01"},
                    {"id":2,"description":"b","amount":60000000000000000,"type":"income","category":"X","date":"2024-01-01"}]"#,
            )
            .unwrap();
        let store = Store::new(backend);

        assert!(store.load_checked().unwrap_err().is_malformed());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_largest_possible_id_is_malformed() {
        let backend = MemoryStore::new();
        backend
            .set(
                StorageKey::Transactions,
                r#"[{"id":18446744073709551615,"description":"a","amount":1,"type":"income","category":"X","date":"2024-01-01"}]"#,
            )
            .unwrap();
        let store = Store::new(backend);

        assert!(store.load_checked().unwrap_err().is_malformed());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_sub_cent_amounts_are_rewritten_rounded() {
        let backend = MemoryStore::new();
        backend
            .set(
                StorageKey::Transactions,
                r#"[{"id":1,"description":"a","amount":12.346,"type":"expense","category":"X","date":"2024-01-01"}]"#,
            )
            .unwrap();
        let store = Store::new(backend);

        let loaded = store.load_checked().unwrap();
        assert_eq!(loaded[0].amount, Money::from_cents(1235));

        store.save(&loaded).unwrap();
        assert_eq!(store.load_checked().unwrap()[0].amount, Money::from_cents(1235));
    }

    #[test]
    fn test_clear_removes_collection_and_counter() {
        let store = Store::new(MemoryStore::new());
        store.save(&sample()).unwrap();
        store.save_next_id(TransactionId::new(4)).unwrap();

        store.clear().unwrap();

        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.load_next_id().unwrap(), None);
    }

    #[test]
    fn test_next_id_round_trip() {
        let store = Store::new(MemoryStore::new());
        assert_eq!(store.load_next_id().unwrap(), None);

        store.save_next_id(TransactionId::new(9)).unwrap();
        assert_eq!(store.load_next_id().unwrap(), Some(TransactionId::new(9)));
    }

    #[test]
    fn test_budget_is_stored_independently() {
        let store = Store::new(MemoryStore::new());
        assert_eq!(store.load_budget().unwrap(), None);

        store.save_budget(Money::from_cents(150050)).unwrap();
        store.clear().unwrap();

        assert_eq!(store.load_budget().unwrap(), Some(Money::from_cents(150050)));
    }

    #[test]
    fn test_budget_written_by_browser() {
        let backend = MemoryStore::new();
        backend.set(StorageKey::MonthlyBudget, "2500").unwrap();
        let store = Store::new(backend);
        assert_eq!(store.load_budget().unwrap(), Some(Money::from_units(2500)));
    }

    #[test]
    fn test_unreadable_budget_is_none() {
        let backend = MemoryStore::new();
        backend.set(StorageKey::MonthlyBudget, "lots").unwrap();
        let store = Store::new(backend);
        assert_eq!(store.load_budget().unwrap(), None);
    }

    #[test]
    fn test_theme_defaults_to_light() {
        let store = Store::new(MemoryStore::new());
        assert_eq!(store.load_theme().unwrap(), Theme::Light);

        store.save_theme(Theme::Dark).unwrap();
        assert_eq!(store.load_theme().unwrap(), Theme::Dark);
    }
}
