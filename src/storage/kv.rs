//! Key-value substrate shared by every tracker session
//!
//! The store is a small namespace of string values under fixed keys. A
//! handle can subscribe to changes; a subscription only ever sees writes
//! made through *other* handles, so a session never reacts to its own saves.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Weak};
use std::time::Duration;

use crate::error::TrackerResult;

/// The fixed set of entries the tracker persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    /// The serialized transaction collection
    Transactions,
    /// The next id to hand out
    NextId,
    /// The monthly budget target
    MonthlyBudget,
    /// The theme preference
    Theme,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Transactions,
        StorageKey::NextId,
        StorageKey::MonthlyBudget,
        StorageKey::Theme,
    ];

    /// Stable key name within the namespace
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::NextId => "nextId",
            Self::MonthlyBudget => "monthlyBudget",
            Self::Theme => "theme",
        }
    }

    /// File name used by the file-backed store
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Transactions => "transactions.json",
            Self::NextId => "next_id",
            Self::MonthlyBudget => "monthly_budget",
            Self::Theme => "theme",
        }
    }
}

/// Notification that a key was changed by another handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: StorageKey,
    /// The value after the change, `None` if the key was removed
    pub new_value: Option<String>,
}

/// Receiving end of a change subscription
pub struct StorageSubscription {
    receiver: Receiver<StorageEvent>,
    alive: Arc<()>,
}

impl StorageSubscription {
    pub fn new(receiver: Receiver<StorageEvent>) -> Self {
        Self {
            receiver,
            alive: Arc::new(()),
        }
    }

    /// A subscription that never receives anything
    pub fn detached() -> Self {
        let (_sender, receiver) = mpsc::channel();
        Self::new(receiver)
    }

    /// Handle that stops upgrading once this subscription is dropped
    pub fn liveness(&self) -> Weak<()> {
        Arc::downgrade(&self.alive)
    }

    /// Take the next pending event without blocking
    pub fn try_next(&self) -> Option<StorageEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Take every pending event without blocking
    pub fn drain(&self) -> Vec<StorageEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Block until an event arrives or the timeout elapses
    pub fn wait(&self, timeout: Duration) -> Option<StorageEvent> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                // Nobody can send anymore; behave like an idle wait
                std::thread::sleep(timeout);
                None
            }
        }
    }
}

/// A durable string key-value namespace
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: StorageKey) -> TrackerResult<Option<String>>;

    /// Overwrite the value under `key`
    fn set(&self, key: StorageKey, value: &str) -> TrackerResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: StorageKey) -> TrackerResult<()>;

    /// Subscribe to changes made through other handles of this namespace
    fn subscribe(&self) -> StorageSubscription;
}
