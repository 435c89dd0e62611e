use std::sync::Arc;

use pathstore_store::{PathStore, StoreResult};

use crate::error::{ServerError, ServerResult};

/// Shared handler state: the store every request goes through.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn PathStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PathStore>) -> Self {
        Self { store }
    }

    /// Run a store operation on the blocking pool.
    ///
    /// Store calls block for engine I/O and must not run on async workers.
    /// The outer error is a failed task; the inner one is the store's.
    pub async fn with_store<T, F>(&self, op: F) -> ServerResult<StoreResult<T>>
    where
        F: FnOnce(&dyn PathStore) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| ServerError::Internal(format!("store task failed: {e}")))
    }
}
