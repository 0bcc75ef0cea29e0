//! Snappy uncompressed-length prefix validation (C8, spec.md §4.7).
//!
//! Decompression itself is an external collaborator (spec.md §1); this
//! module only decodes the varint length prefix Snappy puts ahead of a
//! compressed frame and enforces the 16 MiB wire budget before any bytes
//! are handed to a real Snappy decoder.

/// The protocol-wide cap on a Snappy frame's declared uncompressed length
/// (spec.md §4.7, §8 "Snappy length exactly at 16 MiB is accepted").
pub const RLPX_MAX_SNAPPY_UNCOMPRESSED_LENGTH: u64 = 16 * 1024 * 1024;

/// A varint group carries 7 value bits per byte; 5 groups of 7 bits cover
/// the full 32-bit range this core treats as representable.
const MAX_VARINT_BYTES: usize = 5;

/// Errors surfaced while decoding and bounding a Snappy length prefix
/// (spec.md §7 "RLPx").
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnappyLengthError {
    /// The input carried no bytes at all.
    #[error("empty snappy payload")]
    EmptyPayload,
    /// The continuation bit never cleared before the input ran out.
    #[error("truncated snappy length prefix")]
    TruncatedLength,
    /// The accumulated length doesn't fit in the representable range,
    /// either because decoding needed more than 5 bytes or because the
    /// 5th byte carried bits beyond the 4 it's allowed to contribute.
    #[error("snappy length prefix overflow")]
    LengthOverflow,
    /// The decoded length exceeds [`RLPX_MAX_SNAPPY_UNCOMPRESSED_LENGTH`].
    #[error("snappy uncompressed length {actual} exceeds max {max}")]
    LengthExceeded {
        /// The length the prefix declared.
        actual: u64,
        /// The protocol cap it was compared against.
        max: u64,
    },
}

/// Decodes and bounds-checks a Snappy frame's uncompressed-length prefix
/// (C8, spec.md §4.7).
#[derive(Debug, Clone, Default)]
pub struct RlpxSnappyLengthValidator {
    metrics: reth_metrics::RlpxWireMetrics,
}

impl RlpxSnappyLengthValidator {
    /// Decodes `payload`'s length prefix and checks it against
    /// [`RLPX_MAX_SNAPPY_UNCOMPRESSED_LENGTH`], returning the decoded
    /// length on success.
    pub fn validate(&self, payload: &[u8]) -> Result<u64, SnappyLengthError> {
        let result = self.validate_inner(payload);
        if let Err(err) = &result {
            tracing::debug!(target: "net::eth-wire", %err, "rejected snappy length prefix");
            self.metrics.snappy_length_rejected.increment(1);
        }
        result
    }

    fn validate_inner(&self, payload: &[u8]) -> Result<u64, SnappyLengthError> {
        let length = decode_length(payload)?;
        if length > RLPX_MAX_SNAPPY_UNCOMPRESSED_LENGTH {
            return Err(SnappyLengthError::LengthExceeded {
                actual: length,
                max: RLPX_MAX_SNAPPY_UNCOMPRESSED_LENGTH,
            });
        }
        Ok(length)
    }
}

/// Decodes the varint uncompressed-length prefix at the start of
/// `payload`, without any budget check (spec.md §4.7).
///
/// Reads bytes until one with a clear continuation bit (`0x80`) is found,
/// accumulating `value << (7 * i)` per byte's low 7 bits.
pub fn decode_length(payload: &[u8]) -> Result<u64, SnappyLengthError> {
    if payload.is_empty() {
        return Err(SnappyLengthError::EmptyPayload);
    }

    let mut value: u64 = 0;
    for (i, &byte) in payload.iter().take(MAX_VARINT_BYTES).enumerate() {
        let continuation = byte & 0x80 != 0;
        let group = u64::from(byte & 0x7F);

        if i == MAX_VARINT_BYTES - 1 && (continuation || group > 0x0F) {
            return Err(SnappyLengthError::LengthOverflow);
        }

        value |= group << (7 * i);

        if !continuation {
            return Ok(value);
        }
    }

    if payload.len() < MAX_VARINT_BYTES {
        Err(SnappyLengthError::TruncatedLength)
    } else {
        Err(SnappyLengthError::LengthOverflow)
    }
}
