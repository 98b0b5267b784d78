use std::time::Duration;

use crate::store::StoreError;

/// A named key-value store whose entries may expire.
///
/// Expiry is lazy: an expired entry reads as absent but stays in the backing
/// map until the same key is written again or the store is cleared.
pub trait Store<V>: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the live value for `key`, or `NotFound` if absent or expired.
    fn lookup(&self, key: &str) -> Result<V, StoreError>;

    fn exists(&self, key: &str) -> bool {
        self.lookup(key).is_ok()
    }

    fn set(&self, key: &str, value: V);

    fn set_with_ttl(&self, key: &str, value: V, ttl: Duration);

    fn delete(&self, key: &str);

    /// Live keys, sorted.
    fn keys(&self) -> Vec<String>;

    fn clear(&self);

    /// Stores `value` only if `key` has no live entry.
    ///
    /// The check and the write take the lock separately, so two concurrent
    /// registrations of the same key can both succeed; the later write wins.
    fn register(&self, key: &str, value: V) -> Result<(), StoreError> {
        if self.exists(key) {
            return Err(StoreError::AlreadyExists(key.to_string()));
        }
        self.set(key, value);
        Ok(())
    }
}
