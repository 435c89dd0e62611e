use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("value too large: {size} bytes (max {max})")]
    ValueTooLarge { size: usize, max: usize },

    #[error("framing error: {0}")]
    FramingError(String),

    #[error("bad magic: {0:02x?}")]
    BadMagic([u8; 2]),

    #[error("unsupported format version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch: stored {stored:08x}, computed {computed:08x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl CodecError {
    /// Whether this error came out of `encode` rather than `decode`.
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Serialization(_) | Self::ValueTooLarge { .. })
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
