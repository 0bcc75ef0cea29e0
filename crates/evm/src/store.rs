use alloy_primitives::{Address, U256};

/// The world-state storage collaborator the EIP-2935 strategy reads and
/// writes (spec.md §1 treats state storage itself as an external
/// collaborator; this trait is the seam).
pub trait WorldState: Send + Sync {
    /// Reads a storage slot, returning `U256::ZERO` if never written.
    fn get_storage(&self, address: Address, slot: U256) -> U256;
    /// Writes a storage slot.
    fn set_storage(&mut self, address: Address, slot: U256, value: U256);
    /// `true` iff `address` has no deployed code (the "contract not yet
    /// active" case spec.md §4.5 guards `applyBlockhashStateChanges` on).
    fn is_code_empty(&self, address: Address) -> bool;
}

/// Writes the EIP-2935 ring buffer (C6, spec.md §4.5): on each header,
/// `slot = (number - 1) mod ring_size = parent_hash`, but only once the
/// system contract has code.
#[derive(Debug, Clone, Copy)]
pub struct BlockhashStore<S> {
    spec: S,
}

impl<S: reth_chainspec::ReleaseSpec> BlockhashStore<S> {
    /// Builds a store writing through `spec`'s system contract and ring
    /// size.
    pub const fn new(spec: S) -> Self {
        Self { spec }
    }

    /// Applies `header`'s blockhash state change to `world_state`, a
    /// no-op for genesis or while the system contract carries no code.
    pub fn apply_blockhash_state_changes(
        &self,
        world_state: &mut impl WorldState,
        header: &reth_primitives::Header,
    ) {
        if header.number == 0 {
            return;
        }
        let contract = self.spec.blockhash_system_contract();
        if world_state.is_code_empty(contract) {
            return;
        }
        let ring_size = self.spec.blockhash_ring_buffer_size();
        if ring_size == 0 {
            return;
        }

        let slot = U256::from((header.number - 1) % ring_size);
        let value = U256::from_be_bytes(header.parent_hash.0);
        world_state.set_storage(contract, slot, value);
    }
}

/// Minimal in-memory [`WorldState`] used by this crate's own tests and
/// exposed `pub(crate)` so the provider tests can share it.
#[cfg(test)]
pub(crate) mod test_support {
    use super::{Address, WorldState, U256};
    use std::{cell::RefCell, collections::HashMap};

    #[derive(Default)]
    pub(crate) struct MapWorldState {
        storage: RefCell<HashMap<(Address, U256), U256>>,
        nonempty_code: RefCell<std::collections::HashSet<Address>>,
    }

    impl MapWorldState {
        /// Seeds a storage slot from a hash value, callable on a shared
        /// reference so fixtures can be built before the resolver borrows
        /// the world state.
        pub(crate) fn set(&self, address: Address, slot: U256, value: alloy_primitives::B256) {
            self.storage.borrow_mut().insert((address, slot), U256::from_be_bytes(value.0));
        }
    }

    impl WorldState for MapWorldState {
        fn get_storage(&self, address: Address, slot: U256) -> U256 {
            self.storage.borrow().get(&(address, slot)).copied().unwrap_or_default()
        }

        fn set_storage(&mut self, address: Address, slot: U256, value: U256) {
            self.storage.get_mut().insert((address, slot), value);
        }

        fn is_code_empty(&self, address: Address) -> bool {
            !self.nonempty_code.borrow().contains(&address)
        }
    }
}
