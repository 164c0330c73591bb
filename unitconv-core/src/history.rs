//! Bounded most-recent-first conversion history.
//!
//! The recorder owns the in-memory list and writes it through to a
//! [`HistoryStore`] after every mutation. It reads the store once, when it is
//! opened; anything missing or unreadable there is treated as "no history".

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::StoreError;
use crate::models::ConversionRecord;

/// Maximum number of records kept.
pub const HISTORY_LIMIT: usize = 10;

/// Fixed key the history is stored under.
pub const HISTORY_KEY: &str = "conversionHistory";

/// Key-value persistence port for the history.
pub trait HistoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: HistoryStore + ?Sized> HistoryStore for &S {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-process store, used in tests and when no database is wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let values = HashMap::from([(key.to_string(), value.to_string())]);
        Self {
            values: Mutex::new(values),
        }
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.values
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl HistoryStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values()?.remove(key);
        Ok(())
    }
}

/// Owns the history list and keeps the store in sync with it.
pub struct HistoryRecorder<S: HistoryStore> {
    store: S,
    entries: Vec<ConversionRecord>,
}

impl<S: HistoryStore> HistoryRecorder<S> {
    /// Rehydrate the history from `store`.
    pub fn open(store: S) -> Self {
        let entries = match load_entries(&store) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Could not load conversion history, starting empty: {}", e);
                Vec::new()
            }
        };
        tracing::debug!("Loaded {} history entries", entries.len());
        Self { store, entries }
    }

    /// Records, most recent first.
    pub fn list(&self) -> &[ConversionRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert at the front, dropping the oldest entries past the limit, then
    /// persist.
    ///
    /// The in-memory list is updated even when persisting fails.
    pub fn record(&mut self, entry: ConversionRecord) -> Result<(), StoreError> {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
        self.persist()
    }

    /// Empty the list and delete it from the store.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.store.remove(HISTORY_KEY)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.write(HISTORY_KEY, &json)
    }
}

fn load_entries<S: HistoryStore>(store: &S) -> Result<Vec<ConversionRecord>, StoreError> {
    let Some(json) = store.read(HISTORY_KEY)? else {
        return Ok(Vec::new());
    };
    let mut entries: Vec<ConversionRecord> = serde_json::from_str(&json)?;
    entries.truncate(HISTORY_LIMIT);
    Ok(entries)
}
