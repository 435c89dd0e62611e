//! Foundation types for Pathstore.
//!
//! Pathstore keeps arbitrary text or binary payloads under slash-delimited
//! path keys. Every other Pathstore crate depends on `pathstore-types`.
//!
//! # Key Types
//!
//! - [`StoredValue`] -- the persisted unit: text content, content type, optional binary payload
//! - [`PathKey`] -- validated, non-empty path address such as `docs/readme`

pub mod error;
pub mod path;
pub mod value;

pub use error::{TypeError, TypeResult};
pub use path::PathKey;
pub use value::{StoredValue, DEFAULT_BINARY_CONTENT_TYPE};
