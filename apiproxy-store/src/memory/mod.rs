use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::store::{Entry, Store, StoreError};

const INITIAL_CAPACITY: usize = 256;

/// In-process [`Store`] guarded by a single lock.
///
/// The lock is only held for the map access itself, never across a loader call.
pub struct MemoryStore<V> {
    name: String,
    entries: Mutex<HashMap<String, Entry<V>>>,
}

impl<V> MemoryStore<V>
where
    V: Clone + Send,
{
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Mutex::new(HashMap::with_capacity(INITIAL_CAPACITY)),
        }
    }

    /// Number of physically stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Cache-aside read: on a miss, runs `loader` and stores its value with `ttl`
    /// (no expiry when `None`) before returning it.
    ///
    /// There is no single-flight guard; concurrent misses for one key may each
    /// run the loader, and the last one to finish wins the slot.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        loader: F,
    ) -> Result<V, E>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: std::fmt::Display,
    {
        if let Ok(value) = self.lookup(key) {
            return Ok(value);
        }

        tracing::debug!(store = %self.name, key, ttl = ?ttl, "loading missing value");
        let value = match loader(key.to_string()).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(store = %self.name, key, error = %e, "loader failed");
                return Err(e);
            }
        };

        match ttl {
            Some(ttl) if !ttl.is_zero() => self.set_with_ttl(key, value.clone(), ttl),
            _ => self.set(key, value.clone()),
        }
        Ok(value)
    }

    fn insert(&self, key: &str, entry: Entry<V>) {
        self.entries.lock().insert(key.to_string(), entry);
    }
}

impl<V> Store<V> for MemoryStore<V>
where
    V: Clone + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, key: &str) -> Result<V, StoreError> {
        let entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_live(Instant::now()) => Ok(entry.value.clone()),
            _ => Err(StoreError::NotFound(key.to_string())),
        }
    }

    fn exists(&self, key: &str) -> bool {
        self.entries
            .lock()
            .get(key)
            .is_some_and(|e| e.is_live(Instant::now()))
    }

    fn set(&self, key: &str, value: V) {
        self.insert(key, Entry::new(value, None));
        tracing::debug!(store = %self.name, key, "set");
    }

    fn set_with_ttl(&self, key: &str, value: V, ttl: Duration) {
        self.insert(key, Entry::new(value, Some(Instant::now() + ttl)));
        tracing::debug!(store = %self.name, key, ttl = ?ttl, "set with ttl");
    }

    fn delete(&self, key: &str) {
        self.entries.lock().remove(key);
        tracing::debug!(store = %self.name, key, "deleted");
    }

    fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .lock()
            .iter()
            .filter(|(_, e)| e.is_live(now))
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }
}
