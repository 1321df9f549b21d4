//! File-backed key-value namespace
//!
//! Each key lives in its own file under the data directory. Separate
//! processes opening the same directory share the namespace; changes made by
//! another process are picked up by a background poller that compares file
//! contents against what this handle last wrote or observed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, Weak};
use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use super::file_io::{read_text, remove_if_exists, write_text_atomic};
use super::kv::{KeyValueStore, StorageEvent, StorageKey, StorageSubscription};
use crate::error::{TrackerError, TrackerResult};

/// Default interval between polls for external changes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Default)]
struct WatchState {
    /// Last contents this handle wrote or reported, per key
    known: HashMap<StorageKey, Option<String>>,
    /// Live subscriptions; an entry goes once its subscription is dropped
    subscribers: Vec<(Sender<StorageEvent>, Weak<()>)>,
    poller_running: bool,
}

/// Key-value namespace stored as one file per key
pub struct FileStore {
    data_dir: PathBuf,
    poll_interval: Duration,
    state: Arc<Mutex<WatchState>>,
}

impl FileStore {
    /// Open (or lazily create) a namespace in `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            state: Arc::new(Mutex::new(WatchState::default())),
        }
    }

    /// Set how often subscriptions poll for external changes
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.data_dir.join(key.file_name())
    }

    /// Whether a background poller is currently running for this handle
    pub fn is_watching(&self) -> bool {
        self.state
            .lock()
            .map(|watch| watch.poller_running)
            .unwrap_or(false)
    }

    fn lock_state(&self) -> TrackerResult<std::sync::MutexGuard<'_, WatchState>> {
        self.state
            .lock()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire lock: {}", e)))
    }

    fn spawn_poller(&self) {
        // The poller must not keep the store alive on its own
        let state = Arc::downgrade(&self.state);
        let data_dir = self.data_dir.clone();
        let interval = self.poll_interval;

        thread::spawn(move || {
            debug!("Watching {} for external changes", data_dir.display());
            loop {
                thread::sleep(interval);

                let Some(shared) = state.upgrade() else {
                    break;
                };
                let Ok(mut watch) = shared.lock() else {
                    break;
                };
                watch
                    .subscribers
                    .retain(|(_, liveness)| liveness.strong_count() > 0);
                if watch.subscribers.is_empty() {
                    watch.poller_running = false;
                    break;
                }

                for key in StorageKey::ALL {
                    let current = match read_text(data_dir.join(key.file_name())) {
                        Ok(current) => current,
                        Err(e) => {
                            debug!("Skipping {} this tick: {}", key.name(), e);
                            continue;
                        }
                    };

                    if watch.known.get(&key) == Some(&current) {
                        continue;
                    }

                    trace!("External change detected on {}", key.name());
                    watch.known.insert(key, current.clone());
                    let event = StorageEvent {
                        key,
                        new_value: current,
                    };
                    watch
                        .subscribers
                        .retain(|(sender, _)| sender.send(event.clone()).is_ok());
                }
            }
            debug!("Stopped watching {}", data_dir.display());
        });
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StorageKey) -> TrackerResult<Option<String>> {
        read_text(self.path_for(key))
    }

    fn set(&self, key: StorageKey, value: &str) -> TrackerResult<()> {
        // Holding the lock across the write keeps the poller from reporting
        // our own write as an external change
        let mut state = self.lock_state()?;
        write_text_atomic(self.path_for(key), value)?;
        state.known.insert(key, Some(value.to_string()));
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> TrackerResult<()> {
        let mut state = self.lock_state()?;
        remove_if_exists(self.path_for(key))?;
        state.known.insert(key, None);
        Ok(())
    }

    fn subscribe(&self) -> StorageSubscription {
        let (sender, receiver) = mpsc::channel();

        let mut state = match self.lock_state() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Cannot subscribe to file store: {}", e);
                return StorageSubscription::detached();
            }
        };

        if !state.poller_running {
            // Baseline: whatever is on disk now is not a change
            for key in StorageKey::ALL {
                match read_text(self.path_for(key)) {
                    Ok(current) => {
                        state.known.insert(key, current);
                    }
                    Err(e) => debug!("Could not read {} for baseline: {}", key.name(), e),
                }
            }
            state.poller_running = true;
            self.spawn_poller();
        }

        let subscription = StorageSubscription::new(receiver);
        state.subscribers.push((sender, subscription.liveness()));
        subscription
    }
}
