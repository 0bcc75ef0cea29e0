//! RLPx Hello capability negotiation (C9, spec.md §4.8).

use std::collections::HashMap;

use reth_eth_wire_types::{Capability, LocalCapability, MessageIdRange, SharedCapability};

/// The first message ID reserved for capabilities; `0x00..0x0F` stays
/// reserved for p2p control messages (spec.md §4.8, §6).
pub const FIRST_CAPABILITY_MESSAGE_ID: u64 = 0x10;

/// The upper bound this core treats as a representable message-ID
/// accumulator, matching the "safe integer" ceiling the source's host
/// language uses (spec.md §4.8 "Message-ID assignment").
const MAX_SAFE_MESSAGE_ID: u64 = (1u64 << 53) - 1;

/// Errors surfaced while validating and negotiating capabilities
/// (spec.md §7 "RLPx").
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HelloNegotiationError {
    /// A capability name was empty.
    #[error("capability name must not be empty")]
    EmptyName,
    /// A capability name exceeded 8 bytes.
    #[error("capability name `{name}` exceeds {max} bytes", max = reth_eth_wire_types::CAPABILITY_NAME_MAX_LEN)]
    NameTooLong {
        /// The offending name.
        name: String,
    },
    /// A capability name contained a byte outside `0x21..=0x7E`.
    #[error("capability name `{name}` contains a non-printable byte")]
    NonPrintableName {
        /// The offending name.
        name: String,
    },
    /// A local capability declared `message_id_space_size == 0`.
    #[error("capability {name}/{version} declared a zero message-id space size")]
    ZeroMessageIdSpaceSize {
        /// The capability's name.
        name: String,
        /// The capability's version.
        version: u64,
    },
    /// Two local capabilities shared `(name, version)` but disagreed on
    /// `message_id_space_size` (spec.md §4.8 validation).
    #[error("capability {name}/{version} was declared twice with different message-id space sizes")]
    DuplicateCapabilityWithDifferentMessageSpace {
        /// The capability's name.
        name: String,
        /// The capability's version.
        version: u64,
    },
    /// Assigning contiguous message-ID ranges would overflow the
    /// representable range (spec.md §4.8).
    #[error("message-id allocation overflowed")]
    MessageIdAllocation,
}

fn validate_name(name: &str) -> Result<(), HelloNegotiationError> {
    if name.is_empty() {
        return Err(HelloNegotiationError::EmptyName);
    }
    if name.len() > reth_eth_wire_types::CAPABILITY_NAME_MAX_LEN {
        return Err(HelloNegotiationError::NameTooLong { name: name.to_string() });
    }
    if !name.bytes().all(|b| (0x21..=0x7E).contains(&b)) {
        return Err(HelloNegotiationError::NonPrintableName { name: name.to_string() });
    }
    Ok(())
}

/// The result of a negotiation (spec.md §8 scenario 2): the sorted,
/// message-ID-ranged shared capability set plus the next free message ID,
/// as a named value rather than a bare tuple (this core's habit of small
/// named return types at public API boundaries).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NegotiatedCapabilities {
    /// The negotiated capabilities, sorted by name (byte-lexicographic).
    pub capabilities: Vec<SharedCapability>,
    /// The first message ID not assigned to any negotiated capability.
    pub next_message_id: u64,
}

/// Validates and negotiates a shared capability set from local and remote
/// offers (C9, spec.md §4.8).
#[derive(Debug, Clone, Default)]
pub struct RlpxHelloCapabilityNegotiator {
    metrics: reth_metrics::RlpxWireMetrics,
}

impl RlpxHelloCapabilityNegotiator {
    /// Validates `local` (name/version/space-size well-formed, no
    /// conflicting duplicates), validates `remote` (name/version
    /// well-formed), intersects on exact `(name, version)` match, keeps
    /// the highest shared version per name, sorts by name, and assigns
    /// contiguous message-ID ranges starting at
    /// [`FIRST_CAPABILITY_MESSAGE_ID`].
    pub fn negotiate(
        &self,
        local: &[LocalCapability],
        remote: &[Capability],
    ) -> Result<NegotiatedCapabilities, HelloNegotiationError> {
        let result = self.negotiate_inner(local, remote);
        match &result {
            Ok(negotiated) => tracing::debug!(
                target: "net::eth-wire",
                shared = negotiated.capabilities.len(),
                next_message_id = negotiated.next_message_id,
                "negotiated hello capabilities"
            ),
            Err(err) => {
                tracing::debug!(target: "net::eth-wire", %err, "rejected hello capability negotiation");
                self.metrics.hello_negotiation_rejected.increment(1);
            }
        }
        result
    }

    fn negotiate_inner(
        &self,
        local: &[LocalCapability],
        remote: &[Capability],
    ) -> Result<NegotiatedCapabilities, HelloNegotiationError> {
        let mut local_by_name_version: HashMap<(&str, u64), u64> = HashMap::new();
        for entry in local {
            validate_name(&entry.capability.name)?;
            if entry.message_id_space_size == 0 {
                return Err(HelloNegotiationError::ZeroMessageIdSpaceSize {
                    name: entry.capability.name.clone(),
                    version: entry.capability.version,
                });
            }
            let key = (entry.capability.name.as_str(), entry.capability.version);
            match local_by_name_version.get(&key) {
                Some(&existing) if existing != entry.message_id_space_size => {
                    return Err(HelloNegotiationError::DuplicateCapabilityWithDifferentMessageSpace {
                        name: entry.capability.name.clone(),
                        version: entry.capability.version,
                    });
                }
                _ => {
                    local_by_name_version.insert(key, entry.message_id_space_size);
                }
            }
        }

        for cap in remote {
            validate_name(&cap.name)?;
        }

        // For each name, the highest version offered by both sides.
        let mut best_version_by_name: HashMap<&str, u64> = HashMap::new();
        for cap in remote {
            if local_by_name_version.contains_key(&(cap.name.as_str(), cap.version)) {
                best_version_by_name
                    .entry(cap.name.as_str())
                    .and_modify(|v| *v = (*v).max(cap.version))
                    .or_insert(cap.version);
            }
        }

        let mut negotiated_names: Vec<&str> = best_version_by_name.keys().copied().collect();
        negotiated_names.sort_unstable();

        let mut next = FIRST_CAPABILITY_MESSAGE_ID;
        let mut shared = Vec::with_capacity(negotiated_names.len());

        for name in negotiated_names {
            let version = best_version_by_name[name];
            let space_size = local_by_name_version[&(name, version)];

            if next > MAX_SAFE_MESSAGE_ID - space_size {
                return Err(HelloNegotiationError::MessageIdAllocation);
            }

            let offset = next;
            let range_end = offset + space_size - 1;
            next = offset + space_size;

            shared.push(SharedCapability {
                capability: Capability::new(name, version),
                message_id_range: MessageIdRange { offset, range_end },
            });
        }

        Ok(NegotiatedCapabilities { capabilities: shared, next_message_id: next })
    }
}
