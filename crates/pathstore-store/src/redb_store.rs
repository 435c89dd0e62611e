use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use pathstore_codec::ValueCodec;
use pathstore_types::{PathKey, StoredValue};
use redb::{Database, ReadOnlyTable, StorageError, Table, TableDefinition};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::traits::PathStore;

/// Name of the database file inside the data directory.
pub const DB_FILE_NAME: &str = "pathstore.redb";

/// Path key -> encoded `StoredValue`.
const VALUES: TableDefinition<&str, &[u8]> = TableDefinition::new("values");

type ValuesTable<'txn> = Table<'txn, &'static str, &'static [u8]>;
type ValuesReadTable = ReadOnlyTable<&'static str, &'static [u8]>;

/// On-disk path store backed by a single redb database.
///
/// redb gives each read transaction a consistent snapshot and serializes
/// write transactions, so concurrent `put`s to one path resolve
/// last-committed-wins and readers never see a half-written value.
///
/// The store owns the database handle. It is released exactly once, either
/// by [`close`](Self::close) or when the store is dropped.
pub struct RedbPathStore {
    db: Database,
    file: PathBuf,
}

fn engine_read(e: impl Display) -> StoreError {
    StoreError::EngineRead(e.to_string())
}

fn engine_write(e: impl Display) -> StoreError {
    StoreError::EngineWrite(e.to_string())
}

impl RedbPathStore {
    /// Open (or create) the store under `config.data_dir`.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let file = config.data_dir.join(DB_FILE_NAME);
        let open_err = |reason: String| StoreError::Open {
            path: file.clone(),
            reason,
        };

        fs::create_dir_all(&config.data_dir).map_err(|e| open_err(e.to_string()))?;

        let mut builder = Database::builder();
        if let Some(cache_size) = config.cache_size {
            builder.set_cache_size(cache_size);
        }
        let db = builder
            .create(&file)
            .map_err(|e| open_err(e.to_string()))?;

        // Create the table up front so read transactions never race its
        // creation.
        let txn = db.begin_write().map_err(|e| open_err(e.to_string()))?;
        txn.open_table(VALUES)
            .map_err(|e| open_err(e.to_string()))?;
        txn.commit().map_err(|e| open_err(e.to_string()))?;

        info!(file = %file.display(), "opened path store");
        Ok(Self { db, file })
    }

    /// Location of the database file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Release the database handle.
    pub fn close(self) {
        let Self { db, file } = self;
        drop(db);
        info!(file = %file.display(), "closed path store");
    }

    /// Run `op` against the values table in a read transaction.
    fn read<T>(&self, op: impl FnOnce(&ValuesReadTable) -> StoreResult<T>) -> StoreResult<T> {
        let txn = self.db.begin_read().map_err(engine_read)?;
        let table = txn.open_table(VALUES).map_err(engine_read)?;
        op(&table)
    }

    /// Run `op` against the values table in a write transaction.
    ///
    /// Commits if `op` succeeds and aborts otherwise.
    fn write<T>(
        &self,
        op: impl FnOnce(&mut ValuesTable<'_>) -> Result<T, StorageError>,
    ) -> StoreResult<T> {
        let txn = self.db.begin_write().map_err(engine_write)?;
        let outcome = match txn.open_table(VALUES) {
            Ok(mut table) => op(&mut table).map_err(engine_write),
            Err(e) => Err(engine_write(e)),
        };
        match outcome {
            Ok(value) => {
                txn.commit().map_err(engine_write)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(abort_err) = txn.abort() {
                    warn!(error = %abort_err, "failed to abort write transaction");
                }
                Err(e)
            }
        }
    }
}

impl PathStore for RedbPathStore {
    fn get(&self, path: &PathKey) -> StoreResult<StoredValue> {
        self.read(|table| {
            let guard = table
                .get(path.as_str())
                .map_err(engine_read)?
                .ok_or_else(|| StoreError::NotFound(path.clone()))?;
            ValueCodec::decode(guard.value()).map_err(|source| StoreError::Decoding {
                path: path.clone(),
                source,
            })
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
        self.write(|table| {
            table.insert(path.as_str(), bytes.as_slice())?;
            Ok(())
        })?;
        debug!(path = %path, bytes = bytes.len(), "stored value");
        Ok(())
    }

    fn delete(&self, path: &PathKey) -> StoreResult<bool> {
        let existed = self.write(|table| Ok(table.remove(path.as_str())?.is_some()))?;
        debug!(path = %path, existed, "deleted value");
        Ok(existed)
    }

    fn exists(&self, path: &PathKey) -> StoreResult<bool> {
        self.read(|table| Ok(table.get(path.as_str()).map_err(engine_read)?.is_some()))
    }
}

impl std::fmt::Debug for RedbPathStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbPathStore")
            .field("file", &self.file)
            .finish()
    }
}
