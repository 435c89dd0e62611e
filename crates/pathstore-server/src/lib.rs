//! HTTP server for Pathstore.
//!
//! Exposes a [`PathStore`](pathstore_store::PathStore) over HTTP: every URL
//! path is a store key, and the method picks the operation.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{WriteRequest, WriteResponse};
pub use server::PathServer;
pub use state::AppState;
