//! Transaction repository
//!
//! Owns the in-memory transaction collection and the id counter. Every
//! mutation rewrites the whole collection through the [`Store`] before it
//! returns.

use tracing::{info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::export::csv::transactions_to_csv;
use crate::models::{Transaction, TransactionDraft, TransactionId};

use super::Store;

/// The authoritative collection of transactions
pub struct TransactionRepository {
    store: Store,
    transactions: Vec<Transaction>,
    next_id: TransactionId,
}

impl TransactionRepository {
    /// Create an empty repository; call [`initialize`](Self::initialize) to load
    pub fn new(store: Store) -> Self {
        Self {
            store,
            transactions: Vec::new(),
            next_id: TransactionId::FIRST,
        }
    }

    /// Create a repository and load it from the store
    pub fn open(store: Store) -> TrackerResult<Self> {
        let mut repo = Self::new(store);
        repo.initialize()?;
        Ok(repo)
    }

    /// Load the collection and derive the id counter
    ///
    /// The counter is the larger of the persisted counter and one past the
    /// highest id present, so it never falls back onto an id that was used.
    pub fn initialize(&mut self) -> TrackerResult<()> {
        let transactions = self.store.load()?;
        let derived = transactions
            .iter()
            .filter_map(|t| t.id.checked_next())
            .max()
            .unwrap_or(TransactionId::FIRST);
        let persisted = self.store.load_next_id()?.unwrap_or(TransactionId::FIRST);

        self.next_id = derived.max(persisted);
        self.transactions = transactions;
        Ok(())
    }

    /// Re-read everything from the store (used after another session wrote)
    pub fn reload(&mut self) -> TrackerResult<()> {
        self.initialize()
    }

    /// Record a new transaction under a fresh id
    pub fn add(&mut self, draft: TransactionDraft) -> TrackerResult<Transaction> {
        draft.validate()?;

        let id = self.next_id;
        let following = id
            .checked_next()
            .ok_or_else(|| TrackerError::Storage(format!("no transaction ids left after {}", id)))?;
        let txn = Transaction::from_draft(id, draft);
        self.next_id = following;
        self.transactions.push(txn.clone());

        if let Err(e) = self.persist() {
            // The id stays burned; the counter only moves forward
            self.transactions.pop();
            return Err(e);
        }

        info!("Added transaction {}: {}", txn.id, txn.description);
        Ok(txn)
    }

    /// Overwrite every editable field of the transaction with `id`
    pub fn edit(&mut self, id: TransactionId, patch: TransactionDraft) -> TrackerResult<Transaction> {
        patch.validate()?;

        let index = self
            .position(id)
            .ok_or_else(|| TrackerError::transaction_not_found(id))?;

        let previous = self.transactions[index].clone();
        self.transactions[index].apply(patch);

        if let Err(e) = self.persist() {
            self.transactions[index] = previous;
            return Err(e);
        }

        info!("Edited transaction {}", id);
        Ok(self.transactions[index].clone())
    }

    /// Remove the transaction with `id`
    ///
    /// Removing an id that is not present does nothing and returns `None`.
    pub fn remove(&mut self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let removed = self.transactions.remove(index);
        if let Err(e) = self.persist() {
            self.transactions.insert(index, removed);
            return Err(e);
        }

        info!("Deleted transaction {}", id);
        Ok(Some(removed))
    }

    /// Drop every transaction and restart ids at 1
    pub fn reset_all(&mut self) -> TrackerResult<()> {
        self.store.clear()?;
        self.transactions.clear();
        self.next_id = TransactionId::FIRST;
        info!("Reset all transactions");
        Ok(())
    }

    /// The collection as CSV text, in collection order
    pub fn export_csv(&self) -> String {
        transactions_to_csv(&self.transactions)
    }

    /// All transactions in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The id the next `add` will assign
    pub fn next_id(&self) -> TransactionId {
        self.next_id
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn position(&self, id: TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    /// Write the collection, then the counter
    ///
    /// Once the collection is saved the change has happened; a failed
    /// counter write only loses information `initialize` can mostly derive
    /// again, so it is logged rather than reported.
    fn persist(&self) -> TrackerResult<()> {
        self.store.save(&self.transactions)?;
        if let Err(e) = self.store.save_next_id(self.next_id) {
            warn!("Failed to save id counter {}: {}", self.next_id, e);
        }
        Ok(())
    }
}
