use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// Content type used for raw-body writes that arrive without one.
pub const DEFAULT_BINARY_CONTENT_TYPE: &str = "application/octet-stream";

/// The unit of storage: one current value per path.
///
/// Writes from structured (JSON) requests fill `text_content`; raw-body
/// writes fill `binary_data`. When `binary_data` is present and non-empty it
/// wins at read time, whatever `text_content` holds.
///
/// `binary_data: None` and `binary_data: Some(vec![])` are distinct values
/// and survive storage as such.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredValue {
    /// Textual payload.
    pub text_content: String,
    /// MIME type, served verbatim as the response content type.
    pub content_type: String,
    /// Binary payload.
    pub binary_data: Option<Vec<u8>>,
}

impl StoredValue {
    /// A textual value with no binary payload.
    pub fn text(content: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            text_content: content.into(),
            content_type: content_type.into(),
            binary_data: None,
        }
    }

    /// A binary value with empty text content.
    pub fn binary(data: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            text_content: String::new(),
            content_type: content_type.into(),
            binary_data: Some(data),
        }
    }

    /// Whether the binary payload is the authoritative body.
    pub fn is_binary(&self) -> bool {
        self.binary_data.as_ref().is_some_and(|d| !d.is_empty())
    }

    /// The bytes to serve for this value.
    pub fn body(&self) -> &[u8] {
        match &self.binary_data {
            Some(data) if !data.is_empty() => data,
            _ => self.text_content.as_bytes(),
        }
    }

    /// Consuming variant of [`body`](Self::body).
    pub fn into_body(self) -> Vec<u8> {
        match self.binary_data {
            Some(data) if !data.is_empty() => data,
            _ => self.text_content.into_bytes(),
        }
    }

    pub fn body_len(&self) -> usize {
        self.body().len()
    }

    /// Check the invariants a value must satisfy before it is stored.
    ///
    /// Both payloads being empty is allowed; it serves as an empty body.
    /// The content type is echoed as a response header, so it may not hold
    /// control characters other than horizontal tab.
    pub fn validate(&self) -> TypeResult<()> {
        if self.content_type.is_empty() {
            return Err(TypeError::EmptyContentType);
        }
        let is_control = |b: u8| (b < 0x20 && b != b'\t') || b == 0x7f;
        if self.content_type.bytes().any(is_control) {
            return Err(TypeError::InvalidContentType(self.content_type.clone()));
        }
        Ok(())
    }
}
