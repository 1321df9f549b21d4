//! In-memory key-value namespace
//!
//! Several handles can share one namespace, each standing in for an
//! independent session (a browser tab, a second window). Writes through one
//! handle are broadcast to the subscribers of every other handle.

use std::collections::HashMap;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, RwLock};

use uuid::Uuid;

use super::kv::{KeyValueStore, StorageEvent, StorageKey, StorageSubscription};
use crate::error::{TrackerError, TrackerResult};

struct Subscriber {
    origin: Uuid,
    sender: Sender<StorageEvent>,
}

#[derive(Default)]
struct Namespace {
    data: RwLock<HashMap<StorageKey, String>>,
    subscribers: Mutex<Vec<Subscriber>>,
}

/// One handle onto a shared in-memory namespace
pub struct MemoryStore {
    origin: Uuid,
    namespace: Arc<Namespace>,
}

impl MemoryStore {
    /// Create a fresh, empty namespace with a single handle
    pub fn new() -> Self {
        Self {
            origin: Uuid::new_v4(),
            namespace: Arc::new(Namespace::default()),
        }
    }

    /// Open another handle onto the same namespace
    pub fn connect(&self) -> Self {
        Self {
            origin: Uuid::new_v4(),
            namespace: Arc::clone(&self.namespace),
        }
    }

    fn broadcast(&self, event: StorageEvent) -> TrackerResult<()> {
        let mut subscribers = self
            .namespace
            .subscribers
            .lock()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire lock: {}", e)))?;

        // Dead receivers are pruned as a side effect of the send
        subscribers.retain(|sub| sub.origin == self.origin || sub.sender.send(event.clone()).is_ok());
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StorageKey) -> TrackerResult<Option<String>> {
        let data = self
            .namespace
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> TrackerResult<()> {
        let previous = {
            let mut data = self.namespace.data.write().map_err(|e| {
                TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            data.insert(key, value.to_string())
        };

        if previous.as_deref() != Some(value) {
            self.broadcast(StorageEvent {
                key,
                new_value: Some(value.to_string()),
            })?;
        }
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> TrackerResult<()> {
        let previous = {
            let mut data = self.namespace.data.write().map_err(|e| {
                TrackerError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            data.remove(&key)
        };

        if previous.is_some() {
            self.broadcast(StorageEvent {
                key,
                new_value: None,
            })?;
        }
        Ok(())
    }

    fn subscribe(&self) -> StorageSubscription {
        let (sender, receiver) = mpsc::channel();
        match self.namespace.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(Subscriber {
                origin: self.origin,
                sender,
            }),
            Err(e) => {
                tracing::warn!("Cannot subscribe to memory store: {}", e);
            }
        }
        StorageSubscription::new(receiver)
    }
}
