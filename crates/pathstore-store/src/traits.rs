use pathstore_types::{PathKey, StoredValue};

use crate::error::{StoreError, StoreResult};

/// Path-keyed value store.
///
/// All implementations must satisfy these invariants:
/// - Each call is atomic: either the whole write is visible or none of it.
/// - Read-your-writes: after `put` returns `Ok`, `get` returns the new value.
/// - A missing path is reported as [`StoreError::NotFound`], never as an
///   empty value.
/// - Calls may block for engine I/O but never hold engine locks across
///   calls.
pub trait PathStore: Send + Sync {
    /// Read the current value at `path`.
    fn get(&self, path: &PathKey) -> StoreResult<StoredValue>;

    /// Store `value` as the sole current value at `path`, replacing any
    /// previous one.
    fn put(&self, path: &PathKey, value: &StoredValue) -> StoreResult<()>;

    /// Remove the value at `path`. Returns `true` if a value was present.
    ///
    /// Removing an absent path is not an error here; callers that need to
    /// report it check existence first.
    fn delete(&self, path: &PathKey) -> StoreResult<bool>;

    /// Check whether a value exists at `path`.
    fn exists(&self, path: &PathKey) -> StoreResult<bool> {
        match self.get(path) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
