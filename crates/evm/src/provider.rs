use alloy_primitives::B256;
use reth_blockchain_tree_api::BlockStore;
use reth_chainspec::ReleaseSpec;
use reth_primitives::Header;
use reth_primitives_traits::BlockHash;

use crate::{cache::BlockhashCache, store::WorldState};

/// Errors surfaced by BLOCKHASH resolution (spec.md §7 "Blockhash").
/// Out-of-range requests (depth 0, or greater than 256) are *not* errors —
/// they resolve to `Ok(None)` (spec.md §4.5).
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum BlockhashError {
    /// An ancestor in the requested range could not be resolved, either
    /// because the chain was missing a link or an ancestor's `number`
    /// didn't decrement by exactly one from its child.
    #[error("missing blockhash ancestor")]
    MissingBlockhash,
    /// `ReleaseSpec::blockhash_ring_buffer_size` reported zero.
    #[error("invalid blockhash ring buffer size")]
    InvalidBlockhashNumber,
}

/// A source of ancestor headers by hash, consulted by the legacy
/// [`BlockhashCache`]-backed strategy when it needs to extend a cached
/// list (spec.md §4.5 "walks parent links via the block tree").
///
/// Blanket-implemented for anything that implements
/// [`BlockStore`](reth_blockchain_tree_api::BlockStore): the block tree
/// *borrows* its block store (spec.md §3 "Ownership"), and that store is
/// exactly what this resolution needs.
pub trait AncestorSource: Send + Sync {
    /// Looks up the header of the block with the given hash.
    fn header_by_hash(&self, hash: BlockHash) -> Option<Header>;
}

impl<T> AncestorSource for T
where
    T: BlockStore + Send + Sync,
{
    fn header_by_hash(&self, hash: BlockHash) -> Option<Header> {
        self.get(hash).map(|block| block.header)
    }
}

/// Answers `BLOCKHASH` queries for a given "current" header (C6, spec.md
/// §4.5). Implementations may mutate internal cache state, hence `&mut
/// self`.
pub trait BlockhashProvider {
    /// Resolves the hash of the ancestor numbered `requested_number`,
    /// relative to `current`. Returns `Ok(None)` for the current/future
    /// block or any depth outside `1..=256` (not an error).
    fn blockhash(
        &mut self,
        current: &Header,
        requested_number: u64,
    ) -> Result<Option<BlockHash>, BlockhashError>;

    /// Populates whatever cache the provider maintains for `current`,
    /// without returning a specific hash (spec.md §4.5's "prefetch
    /// variant").
    fn prefetch(&mut self, current: &Header) -> Result<(), BlockhashError>;
}

/// `current.number - requested_number`, or `None` if `requested_number`
/// is the current or a future block.
fn depth(current: &Header, requested_number: u64) -> Option<u64> {
    current.number.checked_sub(requested_number).filter(|&d| d > 0)
}

/// The legacy (pre-EIP-2935) strategy: depth 1 reads `parent_hash`
/// directly; deeper requests consult a 32-entry ancestor cache, walking
/// `source` on a miss (spec.md §4.5).
pub struct LegacyBlockhashProvider<'a, S> {
    source: &'a S,
    cache: BlockhashCache,
}

impl<'a, S: AncestorSource> LegacyBlockhashProvider<'a, S> {
    /// Builds a provider over `source` with an empty ancestor cache.
    pub fn new(source: &'a S) -> Self {
        Self { source, cache: BlockhashCache::new() }
    }
}

impl<S: AncestorSource> BlockhashProvider for LegacyBlockhashProvider<'_, S> {
    fn blockhash(
        &mut self,
        current: &Header,
        requested_number: u64,
    ) -> Result<Option<BlockHash>, BlockhashError> {
        let Some(d) = depth(current, requested_number) else { return Ok(None) };
        if d > 256 {
            return Ok(None);
        }
        if d == 1 {
            return Ok(Some(current.parent_hash));
        }

        let needed_len = (d - 1) as usize;
        let hash =
            self.cache.resolve(self.source, current.parent_hash, current.number - 1, needed_len)?;
        Ok(Some(hash))
    }

    fn prefetch(&mut self, current: &Header) -> Result<(), BlockhashError> {
        let max_depth = current.number.min(256);
        if max_depth < 2 {
            return Ok(());
        }
        let needed_len = (max_depth - 1) as usize;
        self.cache.resolve(self.source, current.parent_hash, current.number - 1, needed_len)?;
        Ok(())
    }
}

/// The EIP-2935 strategy: reads the ring-buffer slot directly from world
/// state. A zero stored value means "not available" (spec.md §4.5).
pub struct StateBlockhashProvider<'a, W, S> {
    world_state: &'a W,
    spec: &'a S,
}

impl<'a, W: WorldState, S: ReleaseSpec> StateBlockhashProvider<'a, W, S> {
    /// Builds a provider reading `world_state` via `spec`'s system
    /// contract address and ring size.
    pub const fn new(world_state: &'a W, spec: &'a S) -> Self {
        Self { world_state, spec }
    }
}

impl<W: WorldState, S: ReleaseSpec> BlockhashProvider for StateBlockhashProvider<'_, W, S> {
    fn blockhash(
        &mut self,
        current: &Header,
        requested_number: u64,
    ) -> Result<Option<BlockHash>, BlockhashError> {
        let Some(d) = depth(current, requested_number) else { return Ok(None) };
        if d > 256 {
            return Ok(None);
        }

        let ring_size = self.spec.blockhash_ring_buffer_size();
        if ring_size == 0 {
            return Err(BlockhashError::InvalidBlockhashNumber);
        }

        let slot = alloy_primitives::U256::from(requested_number % ring_size);
        let value = self.world_state.get_storage(self.spec.blockhash_system_contract(), slot);
        if value.is_zero() {
            return Ok(None);
        }
        Ok(Some(B256::from(value)))
    }

    fn prefetch(&mut self, _current: &Header) -> Result<(), BlockhashError> {
        // Reads go straight to world state; there is no cache to warm.
        Ok(())
    }
}

/// Dispatches to [`LegacyBlockhashProvider`] or [`StateBlockhashProvider`]
/// per block, per `spec.is_blockhash_in_state_available` (spec.md §4.5
/// "Two modes").
pub struct BlockhashResolver<'a, S, W, A> {
    spec: &'a S,
    legacy: LegacyBlockhashProvider<'a, A>,
    state: StateBlockhashProvider<'a, W, S>,
}

impl<'a, S, W, A> BlockhashResolver<'a, S, W, A>
where
    S: ReleaseSpec,
    W: WorldState,
    A: AncestorSource,
{
    /// Builds a resolver consulting `spec` to pick a strategy per block.
    pub fn new(spec: &'a S, world_state: &'a W, ancestor_source: &'a A) -> Self {
        Self {
            spec,
            legacy: LegacyBlockhashProvider::new(ancestor_source),
            state: StateBlockhashProvider::new(world_state, spec),
        }
    }

    /// Resolves `requested_number`'s hash relative to `current`.
    pub fn blockhash(
        &mut self,
        current: &Header,
        requested_number: u64,
    ) -> Result<Option<BlockHash>, BlockhashError> {
        if self.spec.is_blockhash_in_state_available(current.number) {
            self.state.blockhash(current, requested_number)
        } else {
            self.legacy.blockhash(current, requested_number)
        }
    }

    /// Warms whichever strategy is active for `current`.
    pub fn prefetch(&mut self, current: &Header) -> Result<(), BlockhashError> {
        if self.spec.is_blockhash_in_state_available(current.number) {
            self.state.prefetch(current)
        } else {
            self.legacy.prefetch(current)
        }
    }

    /// The last up-to-256 ancestor hashes of `current`, oldest first
    /// (spec.md §8 scenario 6, `getLast256BlockHashes`).
    pub fn last_256_block_hashes(
        &mut self,
        current: &Header,
    ) -> Result<Vec<BlockHash>, BlockhashError> {
        let count = current.number.min(256);
        let mut out = Vec::with_capacity(count as usize);
        for i in (1..=count).rev() {
            match self.blockhash(current, current.number - i)? {
                Some(hash) => out.push(hash),
                None => return Err(BlockhashError::MissingBlockhash),
            }
        }
        Ok(out)
    }
}
