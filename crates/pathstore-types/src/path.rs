//! Path keys.
//!
//! A path key is the address a value lives under, e.g. `docs/readme` or
//! `config/settings.json`. Slashes are a naming convention only: the store
//! treats the key as an opaque identifier and never lists or walks prefixes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// A non-empty path key.
///
/// The only rule enforced is non-emptiness; any other normalization is the
/// router's job.
///
/// ```
/// use pathstore_types::PathKey;
///
/// let key = PathKey::new("docs/readme").unwrap();
/// assert_eq!(key.as_str(), "docs/readme");
/// assert!(PathKey::new("").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathKey(String);

impl PathKey {
    /// Validate and wrap a path string.
    pub fn new(path: impl Into<String>) -> TypeResult<Self> {
        let path = path.into();
        if path.is_empty() {
            return Err(TypeError::EmptyPath);
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key bytes as handed to the storage engine.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for PathKey {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for PathKey {
    type Error = TypeError;

    fn try_from(value: String) -> TypeResult<Self> {
        Self::new(value)
    }
}

impl From<PathKey> for String {
    fn from(key: PathKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hierarchical_path() {
        let key = PathKey::new("alphabet/soup").unwrap();
        assert_eq!(key.as_str(), "alphabet/soup");
        assert_eq!(key.as_bytes(), b"alphabet/soup");
    }

    #[test]
    fn rejects_empty_path() {
        assert_eq!(PathKey::new("").unwrap_err(), TypeError::EmptyPath);
        assert!("".parse::<PathKey>().is_err());
    }

    #[test]
    fn keys_are_opaque() {
        // No trimming or slash collapsing happens here.
        for raw in ["/leading", "trailing/", "a//b", " spaced ", "."] {
            assert_eq!(PathKey::new(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = PathKey::new("docs/a").unwrap();
        let b = PathKey::new("docs/b").unwrap();
        assert!(a < b);
    }

    #[test]
    fn serde_rejects_empty() {
        let ok: PathKey = serde_json::from_str("\"config/settings.json\"").unwrap();
        assert_eq!(ok.to_string(), "config/settings.json");
        assert!(serde_json::from_str::<PathKey>("\"\"").is_err());
    }
}
