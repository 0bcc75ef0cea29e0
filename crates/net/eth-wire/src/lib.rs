//! RLPx wire preliminaries (spec.md §4.7–§4.8): the Snappy
//! uncompressed-length validator (C8) that guards every frame before a
//! real Snappy decoder ever sees it, and the Hello capability negotiator
//! (C9) that turns a local/remote capability offer pair into a sorted,
//! message-ID-ranged shared capability set.
//!
//! Transport (reading frames off a socket, running the actual ECIES
//! handshake) stays out of this core's scope (spec.md §1); `snap` is
//! named in this crate's manifest for fidelity to the teacher's stack
//! even though only the varint length prefix — never decompression
//! itself — is reimplemented here.

mod negotiate;
mod snappy;

pub use negotiate::{
    HelloNegotiationError, NegotiatedCapabilities, RlpxHelloCapabilityNegotiator,
    FIRST_CAPABILITY_MESSAGE_ID,
};
pub use snappy::{decode_length, RlpxSnappyLengthValidator, SnappyLengthError, RLPX_MAX_SNAPPY_UNCOMPRESSED_LENGTH};

/// Union of every error this crate's two validators can raise, for
/// callers that want one type to match on (mirrors `reth-errors`'s
/// aggregate pattern one layer up).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RlpxError {
    /// The Snappy length prefix was malformed or exceeded the wire cap.
    #[error(transparent)]
    SnappyLength(#[from] SnappyLengthError),
    /// Hello capability validation or negotiation failed.
    #[error(transparent)]
    HelloNegotiation(#[from] HelloNegotiationError),
}
