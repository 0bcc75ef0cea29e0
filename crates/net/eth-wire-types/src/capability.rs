use alloy_rlp::{RlpDecodable, RlpEncodable};
use derive_more::Display;

/// The longest a capability name may be (spec.md §4.8 validation).
pub const CAPABILITY_NAME_MAX_LEN: usize = 8;

/// A named, versioned RLPx subprotocol capability, as offered in a
/// [`HelloMessage`](crate::HelloMessage) (spec.md §3 "Capability").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, RlpEncodable, RlpDecodable, Display)]
#[display("{name}/{version}")]
pub struct Capability {
    /// Subprotocol name, e.g. `"eth"` or `"snap"`.
    pub name: String,
    /// Subprotocol version.
    pub version: u64,
}

impl Capability {
    /// Builds a capability from its name and version.
    pub fn new(name: impl Into<String>, version: u64) -> Self {
        Self { name: name.into(), version }
    }
}

/// A capability this node offers, additionally carrying how many message
/// IDs it needs reserved (spec.md §4.8: `{name, version,
/// message_id_space_size}`). Only the local side of a negotiation declares
/// a space size — the remote side is a bare [`Capability`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCapability {
    /// The offered capability.
    pub capability: Capability,
    /// How many contiguous message IDs this capability needs.
    pub message_id_space_size: u64,
}

impl LocalCapability {
    /// Builds a local capability declaration.
    pub fn new(name: impl Into<String>, version: u64, message_id_space_size: u64) -> Self {
        Self { capability: Capability::new(name, version), message_id_space_size }
    }
}

/// An inclusive, contiguous range of message IDs assigned to a negotiated
/// capability (spec.md §4.8 "Message-ID assignment").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageIdRange {
    /// First message ID in the range.
    pub offset: u64,
    /// Last message ID in the range (inclusive).
    pub range_end: u64,
}

impl MessageIdRange {
    /// Number of message IDs covered by this range.
    pub const fn len(&self) -> u64 {
        self.range_end - self.offset + 1
    }

    /// `false` for every well-formed range (`offset <= range_end` always
    /// holds by construction); present for API symmetry with `len`.
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// A capability that survived negotiation: the shared name/version plus
/// the message-ID range assigned to it (spec.md §4.8, I6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedCapability {
    /// The negotiated capability (name plus the higher of the two offered
    /// versions).
    pub capability: Capability,
    /// The message-ID range reserved for it.
    pub message_id_range: MessageIdRange,
}

impl SharedCapability {
    /// Capability name.
    pub fn name(&self) -> &str {
        &self.capability.name
    }

    /// Negotiated version.
    pub const fn version(&self) -> u64 {
        self.capability.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_displays_as_name_slash_version() {
        let cap = Capability::new("eth", 68);
        assert_eq!(cap.to_string(), "eth/68");
    }

    #[test]
    fn message_id_range_len_is_inclusive() {
        let range = MessageIdRange { offset: 0x10, range_end: 0x20 };
        assert_eq!(range.len(), 0x11);
    }
}
