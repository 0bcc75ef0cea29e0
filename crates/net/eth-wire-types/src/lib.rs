//! The RLPx wire vocabulary negotiated over (C9, spec.md §4.8): named,
//! versioned [`Capability`] entries, the [`HelloMessage`] that carries a
//! peer's offered capabilities, and the [`SharedCapability`] /
//! [`MessageIdRange`] types a negotiation produces.
//!
//! `reth-eth-wire` holds the negotiation and Snappy length-validation
//! logic that consumes these types; this crate is just their shape, the
//! same split `reth-blockchain-tree-api`/`reth-blockchain-tree` and
//! `reth-consensus`/`reth-consensus-common` use elsewhere in this
//! workspace.

mod capability;
mod hello;

pub use capability::{
    Capability, LocalCapability, MessageIdRange, SharedCapability, CAPABILITY_NAME_MAX_LEN,
};
pub use hello::HelloMessage;
