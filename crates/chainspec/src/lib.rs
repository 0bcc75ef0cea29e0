//! The chain-capability collaborator consensus and the EVM blockhash
//! provider consult (spec.md §9 "Service injection").
//!
//! The upstream source resolves these capabilities through a capability
//! effect runtime; this core reimplements that as an explicit trait object
//! passed by shared reference into the constructor of its dependents,
//! following the "Service injection" design note.

use alloy_primitives::Address;

/// Capabilities consumed by the consensus and blockhash-resolution layers.
///
/// Implementations are expected to be cheap to clone (a thin handle over a
/// static or `Arc`-backed fork table) since every header validated and
/// every `BLOCKHASH` lookup consults it.
pub trait ReleaseSpec: Send + Sync + 'static {
    /// `true` once EIP-2935 (ancestor hashes in state) is active, switching
    /// [`crate::BlockhashProvider`] from the legacy cache-backed strategy to
    /// reading the system contract's storage (spec.md §4.5).
    fn is_blockhash_in_state_available(&self, block_number: u64) -> bool;

    /// Capacity of the EIP-2935 ring buffer. Left opaque by spec.md §9's
    /// open question — this is consumed, never hard-coded, by callers.
    fn blockhash_ring_buffer_size(&self) -> u64;

    /// Address of the EIP-2935 history-storage system contract.
    fn blockhash_system_contract(&self) -> Address;

    /// `true` once EIP-1559 is active (affects header base-fee validation).
    fn is_london_active(&self, block_number: u64) -> bool;

    /// `true` once EIP-4844 is active (affects header blob-gas validation).
    fn is_cancun_active(&self, block_number: u64, timestamp: u64) -> bool;
}

/// The canonical [`ReleaseSpec`] for Ethereum mainnet-shaped chains: every
/// capability activates at block `0`, i.e. the chain is always post-merge,
/// post-London, post-Cancun — matching this core's scope (spec.md §1 scopes
/// out "fork-activation table beyond `ReleaseSpec`").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthereumReleaseSpec {
    blockhash_in_state_from: u64,
    london_from: u64,
    cancun_from: u64,
    ring_buffer_size: u64,
    system_contract: Address,
}

/// `HISTORY_STORAGE_ADDRESS` from EIP-2935.
const EIP2935_HISTORY_STORAGE_ADDRESS: Address =
    Address::new(alloy_primitives::hex!("0000F90827F1C53a10cb7A02335B175320002935"));

/// `HISTORY_SERVE_WINDOW` from EIP-2935: how many ancestor hashes the ring
/// buffer retains.
const EIP2935_RING_BUFFER_SIZE: u64 = 8_192;

impl EthereumReleaseSpec {
    /// A spec where every fork is active from genesis onward.
    pub const fn mainnet_shaped() -> Self {
        Self {
            blockhash_in_state_from: 0,
            london_from: 0,
            cancun_from: 0,
            ring_buffer_size: EIP2935_RING_BUFFER_SIZE,
            system_contract: EIP2935_HISTORY_STORAGE_ADDRESS,
        }
    }

    /// A spec where EIP-2935 activates at `block_number` (useful for tests
    /// exercising the legacy-to-ring-buffer transition).
    pub const fn with_blockhash_in_state_from(mut self, block_number: u64) -> Self {
        self.blockhash_in_state_from = block_number;
        self
    }
}

impl Default for EthereumReleaseSpec {
    fn default() -> Self {
        Self::mainnet_shaped()
    }
}

impl ReleaseSpec for EthereumReleaseSpec {
    fn is_blockhash_in_state_available(&self, block_number: u64) -> bool {
        block_number >= self.blockhash_in_state_from
    }

    fn blockhash_ring_buffer_size(&self) -> u64 {
        self.ring_buffer_size
    }

    fn blockhash_system_contract(&self) -> Address {
        self.system_contract
    }

    fn is_london_active(&self, block_number: u64) -> bool {
        block_number >= self.london_from
    }

    fn is_cancun_active(&self, block_number: u64, _timestamp: u64) -> bool {
        block_number >= self.cancun_from
    }
}
