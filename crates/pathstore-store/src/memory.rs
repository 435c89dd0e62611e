use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use pathstore_codec::ValueCodec;
use pathstore_types::{PathKey, StoredValue};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::PathStore;

/// In-memory, `BTreeMap`-based path store.
///
/// Intended for tests and embedding. Values are kept encoded, exactly as the
/// on-disk store keeps them, behind a `RwLock`. Holding the write lock for
/// the whole of a `put` or `delete` gives the same all-or-nothing visibility
/// as an engine transaction.
pub struct InMemoryPathStore {
    values: RwLock<BTreeMap<PathKey, Vec<u8>>>,
}

impl InMemoryPathStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of paths currently holding a value.
    ///
    /// Counts entries even if a writer panicked while holding the lock;
    /// `put` and `delete` never leave the map half-updated.
    pub fn len(&self) -> usize {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no path holds a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryPathStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned_read() -> StoreError {
    StoreError::EngineRead("lock poisoned".into())
}

fn poisoned_write() -> StoreError {
    StoreError::EngineWrite("lock poisoned".into())
}

impl PathStore for InMemoryPathStore {
    fn get(&self, path: &PathKey) -> StoreResult<StoredValue> {
        let map = self.values.read().map_err(|_| poisoned_read())?;
        let bytes = map
            .get(path)
            .ok_or_else(|| StoreError::NotFound(path.clone()))?;
        ValueCodec::decode(bytes).map_err(|source| StoreError::Decoding {
            path: path.clone(),
            source,
        })
    }

    fn put(&self, path: &PathKey, value: &StoredValue) -> StoreResult<()> {
        value.validate().map_err(|source| StoreError::InvalidValue {
            path: path.clone(),
            source,
        })?;
        let bytes = ValueCodec::encode(value).map_err(|source| StoreError::Encoding {
            path: path.clone(),
            source,
        })?;
        let size = bytes.len();
        self.values
            .write()
            .map_err(|_| poisoned_write())?
            .insert(path.clone(), bytes);
        debug!(path = %path, bytes = size, "stored value in memory");
        Ok(())
    }

    fn delete(&self, path: &PathKey) -> StoreResult<bool> {
        let mut map = self.values.write().map_err(|_| poisoned_write())?;
        Ok(map.remove(path).is_some())
    }

    fn exists(&self, path: &PathKey) -> StoreResult<bool> {
        let map = self.values.read().map_err(|_| poisoned_read())?;
        Ok(map.contains_key(path))
    }
}

impl std::fmt::Debug for InMemoryPathStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPathStore")
            .field("path_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> PathKey {
        PathKey::new(s).unwrap()
    }

    #[test]
    fn put_then_get_text() {
        let store = InMemoryPathStore::new();
        let value = StoredValue::text("# hi", "text/markdown");
        store.put(&key("docs/readme"), &value).unwrap();
        assert_eq!(store.get(&key("docs/readme")).unwrap(), value);
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = InMemoryPathStore::new();
        let err = store.get(&key("nope")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn overwrite_replaces_whole_value() {
        let store = InMemoryPathStore::new();
        let p = key("alphabet/soup");
        store
            .put(&p, &StoredValue::binary(vec![1, 2, 3], "application/octet-stream"))
            .unwrap();
        let v2 = StoredValue::text("Delicious alphabet soup recipe", "text/plain");
        store.put(&p, &v2).unwrap();
        let got = store.get(&p).unwrap();
        assert_eq!(got, v2);
        assert_eq!(got.binary_data, None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let store = InMemoryPathStore::new();
        let p = key("docs/readme");
        store.put(&p, &StoredValue::text("x", "text/plain")).unwrap();
        assert!(store.delete(&p).unwrap());
        assert!(store.get(&p).unwrap_err().is_not_found());
        assert!(!store.delete(&p).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn exists_tracks_state() {
        let store = InMemoryPathStore::new();
        let p = key("config/settings.json");
        assert!(!store.exists(&p).unwrap());
        store
            .put(&p, &StoredValue::text(r#"{"theme": "dark"}"#, "application/json"))
            .unwrap();
        assert!(store.exists(&p).unwrap());
    }

    #[test]
    fn rejects_empty_content_type() {
        let store = InMemoryPathStore::new();
        let err = store
            .put(&key("a"), &StoredValue::text("body", ""))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidValue { .. }));
        assert!(err.is_invalid_input());
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_bytes_surface_as_decoding_error() {
        let store = InMemoryPathStore::new();
        store
            .values
            .write()
            .unwrap()
            .insert(key("broken"), b"not a frame".to_vec());
        let err = store.get(&key("broken")).unwrap_err();
        assert!(matches!(err, StoreError::Decoding { .. }));
    }

    #[test]
    fn poisoned_lock_keeps_count_and_fails_reads() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryPathStore::new());
        store.put(&key("x"), &StoredValue::text("v", "text/plain")).unwrap();

        let poisoner = Arc::clone(&store);
        let joined = thread::spawn(move || {
            let _guard = poisoner.values.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(joined.is_err());

        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
        assert!(matches!(store.get(&key("x")), Err(StoreError::EngineRead(_))));
        assert!(matches!(
            store.put(&key("y"), &StoredValue::text("v", "text/plain")),
            Err(StoreError::EngineWrite(_))
        ));
    }

    #[test]
    fn rejects_control_characters_in_content_type() {
        let store = InMemoryPathStore::new();
        let err = store
            .put(&key("a"), &StoredValue::text("hi", "text/plain\n"))
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(store.is_empty());
    }

    #[test]
    fn debug_format() {
        let store = InMemoryPathStore::new();
        store.put(&key("x"), &StoredValue::text("", "text/plain")).unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryPathStore"));
        assert!(debug.contains("path_count"));
    }
}
