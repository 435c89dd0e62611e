use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for opening an on-disk store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the database file. Created if missing.
    pub data_dir: PathBuf,
    /// Engine page cache size in bytes; `None` keeps the engine default.
    pub cache_size: Option<usize>,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache_size: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("./data")
    }
}
