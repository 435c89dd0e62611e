//! Path-addressed transactional storage for Pathstore.
//!
//! Values are kept under [`PathKey`](pathstore_types::PathKey)s in an
//! ordered key-value engine, one encoded [`StoredValue`] per key. Every
//! operation runs in its own engine transaction.
//!
//! # Storage Backends
//!
//! All backends implement the [`PathStore`] trait:
//!
//! - [`RedbPathStore`] -- on-disk store backed by a single redb database
//! - [`InMemoryPathStore`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. A write replaces the whole value at its path; there is no partial update.
//! 2. Once `put` returns, every later `get` of that path sees the new value.
//! 3. Reads see a committed snapshot; uncommitted writes are never visible.
//! 4. Concurrent writes to one path resolve last-committed-wins, never merged.
//! 5. Corrupt stored bytes are reported, never decoded leniently.
//! 6. All engine errors are propagated, never silently ignored.
//!
//! [`StoredValue`]: pathstore_types::StoredValue

pub mod config;
pub mod error;
pub mod memory;
pub mod redb_store;
pub mod traits;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryPathStore;
pub use redb_store::{RedbPathStore, DB_FILE_NAME};
pub use traits::PathStore;
