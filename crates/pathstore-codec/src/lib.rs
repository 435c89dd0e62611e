//! Value codec for Pathstore.
//!
//! Turns a [`StoredValue`](pathstore_types::StoredValue) into the opaque byte
//! string the storage engine keeps, and back. Encoding is pure: no I/O, no
//! shared state.

pub mod codec;
pub mod error;

pub use codec::{ValueCodec, FORMAT_VERSION, HEADER_SIZE, MAGIC};
pub use error::{CodecError, CodecResult};
