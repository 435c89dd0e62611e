use bincode::Options;
use pathstore_types::StoredValue;

use crate::error::{CodecError, CodecResult};

/// Leading bytes of every encoded value.
pub const MAGIC: [u8; 2] = *b"PV";

/// Current on-disk format version.
pub const FORMAT_VERSION: u8 = 1;

/// Header size: 2 bytes magic + 1 byte version + 4 bytes length + 4 bytes CRC.
pub const HEADER_SIZE: usize = 11;

/// Largest payload the 4-byte length field can describe.
const MAX_PAYLOAD_SIZE: usize = u32::MAX as usize;

/// Codec for stored values.
///
/// Layout:
/// ```text
/// [2 bytes: magic "PV"]
/// [1 byte:  format version]
/// [4 bytes: payload length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized StoredValue)]
/// ```
pub struct ValueCodec;

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

impl ValueCodec {
    /// Encode a value into a framed, checksummed byte string.
    pub fn encode(value: &StoredValue) -> CodecResult<Vec<u8>> {
        let payload = bincode_options()
            .serialize(value)
            .map_err(|e| CodecError::Serialization(e.to_string()))?;
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(CodecError::ValueTooLarge {
                size: payload.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }
        Ok(frame(&payload))
    }

    /// Decode a byte string produced by [`encode`](Self::encode).
    ///
    /// The whole input must be exactly one frame. Anything else (short
    /// input, trailing bytes, a checksum that does not match) is an error.
    pub fn decode(data: &[u8]) -> CodecResult<StoredValue> {
        if data.len() < HEADER_SIZE {
            return Err(CodecError::FramingError(format!(
                "too short: {} bytes, header is {}",
                data.len(),
                HEADER_SIZE
            )));
        }
        let magic = [data[0], data[1]];
        if magic != MAGIC {
            return Err(CodecError::BadMagic(magic));
        }
        if data[2] != FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion(data[2]));
        }
        let len = read_u32(&data[3..7]) as usize;
        let stored_crc = read_u32(&data[7..11]);

        let payload = &data[HEADER_SIZE..];
        if payload.len() != len {
            return Err(CodecError::FramingError(format!(
                "length mismatch: header says {len}, have {}",
                payload.len()
            )));
        }
        let computed = crc32fast::hash(payload);
        if computed != stored_crc {
            return Err(CodecError::ChecksumMismatch {
                stored: stored_crc,
                computed,
            });
        }

        bincode_options()
            .deserialize(payload)
            .map_err(|e| CodecError::Deserialization(e.to_string()))
    }
}

fn frame(payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(&MAGIC);
    buf.push(FORMAT_VERSION);
    buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    buf.extend_from_slice(&crc32fast::hash(payload).to_le_bytes());
    buf.extend_from_slice(payload);
    buf
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(bytes);
    u32::from_le_bytes(word)
}
