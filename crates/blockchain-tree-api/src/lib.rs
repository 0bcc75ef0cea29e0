//! Shared error type and trait surface for [C1–C4]: `BlockStore`,
//! `HeaderStore`, `BlockTree`, and `BlockTreeOverlay` (spec.md §4.1–§4.3).
//!
//! `reth-blockchain-tree` provides the concrete in-memory implementations;
//! this crate exists so consumers (the beacon consensus manager, tests) can
//! depend on the trait surface without pulling in the implementation.

use alloy_primitives::BlockNumber;
use reth_primitives::{Block, Header};
use reth_primitives_traits::BlockHash;

/// Errors surfaced by the block store, block tree, and overlay (spec.md §7
/// "Input validation" and "Tree integrity" groups).
#[derive(Debug, Clone, thiserror::Error)]
pub enum BlockchainTreeError {
    /// A block failed structural validation on insertion.
    #[error("invalid block")]
    InvalidBlock,
    /// A supplied hash was not a well-formed 32-byte value.
    #[error("invalid block hash")]
    InvalidBlockHash,
    /// A supplied block number was out of the representable range.
    #[error("invalid block number")]
    InvalidBlockNumber,
    /// A header failed structural validation.
    #[error("invalid block header")]
    InvalidBlockHeader,
    /// Genesis candidate has `number != 0` or a non-zero `parent_hash`.
    #[error("invalid genesis block")]
    InvalidGenesisBlock,
    /// A referenced block/header is not present in the store.
    #[error("block not found: {0}")]
    BlockNotFound(BlockHash),
    /// `setCanonicalHead` was called with an orphan.
    #[error("cannot set orphan as canonical head: {0}")]
    CannotSetOrphanAsHead(BlockHash),
    /// The walk from a candidate head back to genesis was not contiguous.
    #[error("canonical chain invalid at block {0}")]
    CanonicalChainInvalid(BlockNumber),
    /// The walk reached a number-0 block that is not the initialized genesis.
    #[error("canonical chain does not resolve to the initialized genesis")]
    GenesisMismatch,
    /// `initializeGenesis` called a second time.
    #[error("genesis already initialized")]
    GenesisAlreadyInitialized,
    /// An operation required genesis to be initialized first.
    #[error("genesis not initialized")]
    GenesisNotInitialized,
    /// An overlay was constructed with a base sharing its tree instance.
    #[error("overlay base and delta share the same tree instance")]
    SharedStateError,
}

/// Read/write access to full blocks, keyed by hash (C1, spec.md §4.1).
pub trait BlockStore {
    /// Looks up a block by hash.
    fn get(&self, hash: BlockHash) -> Option<Block>;
    /// `true` iff a block with this hash is stored.
    fn has(&self, hash: BlockHash) -> bool;
    /// Stores `block`. Re-inserting an existing hash is a no-op (I1).
    fn put(&mut self, hash: BlockHash, block: Block) -> Result<(), BlockchainTreeError>;
    /// Number of distinct blocks stored.
    fn count(&self) -> usize;
    /// `true` iff [`BlockStore::count`] is zero.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Read/write access to headers, keyed by hash (C2, spec.md §4.1).
pub trait HeaderStore {
    /// Looks up a header by hash.
    fn get_header(&self, hash: BlockHash) -> Option<Header>;
    /// `true` iff a header with this hash is stored.
    fn has_header(&self, hash: BlockHash) -> bool;
    /// Stores `header` under `hash`. Idempotent like [`BlockStore::put`].
    fn put_header(&mut self, hash: BlockHash, header: Header) -> Result<(), BlockchainTreeError>;
    /// Number of distinct headers stored.
    fn header_count(&self) -> usize;
    /// `true` iff [`HeaderStore::header_count`] is zero.
    fn is_header_empty(&self) -> bool {
        self.header_count() == 0
    }
}

/// Canonical-chain and orphan bookkeeping on top of a [`BlockStore`] (C3,
/// spec.md §4.2).
pub trait BlockTree {
    /// Inserts `block`, marking it orphan if its parent is absent, and
    /// cascade-resolving any descendants newly reachable by it.
    fn put_block(&mut self, hash: BlockHash, block: Block) -> Result<(), BlockchainTreeError>;
    /// Replaces the canonical chain with the walk from `hash` to genesis.
    fn set_canonical_head(&mut self, hash: BlockHash) -> Result<(), BlockchainTreeError>;
    /// The highest block number in the canonical chain, if any.
    fn head_block_number(&self) -> Option<BlockNumber>;
    /// `true` iff `hash` is currently indexed as an orphan.
    fn is_orphan(&self, hash: BlockHash) -> bool;
    /// `true` iff `hash` is present in the underlying store.
    fn has_block(&self, hash: BlockHash) -> bool;
    /// Number of blocks currently marked orphan.
    fn orphan_count(&self) -> usize;
    /// Number of blocks in the underlying store.
    fn block_count(&self) -> usize;
    /// The canonical hash at `number`, if the canonical chain currently
    /// reaches that far. Lets a caller that tracks its own genesis hash
    /// (e.g. the chain manager) confirm a new canonical head still
    /// resolves to it, without re-walking parent links itself.
    fn canonical_hash_at(&self, number: BlockNumber) -> Option<BlockHash>;
    /// Performs the same walk-to-genesis check as
    /// [`BlockTree::set_canonical_head`], without replacing the canonical
    /// chain map. Used to validate a fork-choice head that isn't (yet)
    /// being promoted to canonical.
    fn validate_chain_to_genesis(&self, hash: BlockHash) -> Result<(), BlockchainTreeError>;
}
