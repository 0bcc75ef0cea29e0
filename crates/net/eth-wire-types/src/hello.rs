use alloy_primitives::B512;
use alloy_rlp::{RlpDecodable, RlpEncodable};

use crate::Capability;

/// The RLPx `Hello` message (spec.md §4.8): a peer's offered capabilities,
/// alongside the handshake metadata this core's negotiation doesn't
/// inspect (`protocol_version`, `client_version`, `port`, `id`) but
/// carries for wire fidelity.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct HelloMessage {
    /// The RLPx protocol version, `5` for the current wire protocol.
    pub protocol_version: u64,
    /// Human-readable client identifier string.
    pub client_version: String,
    /// The capabilities this peer offers.
    pub capabilities: Vec<Capability>,
    /// The port this peer listens on for incoming connections, `0` if
    /// none.
    pub port: u16,
    /// This peer's public key / node ID.
    pub id: B512,
}

impl HelloMessage {
    /// Builds a `Hello` carrying `capabilities`, with placeholder
    /// handshake metadata (this core never transmits the message, only
    /// negotiates over its `capabilities` field).
    pub fn new(capabilities: Vec<Capability>, id: B512) -> Self {
        Self { protocol_version: 5, client_version: String::new(), capabilities, port: 0, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_hello_defaults_to_protocol_version_5() {
        let hello = HelloMessage::new(vec![Capability::new("eth", 68)], B512::ZERO);
        assert_eq!(hello.protocol_version, 5);
        assert_eq!(hello.capabilities.len(), 1);
    }
}
