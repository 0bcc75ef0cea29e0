use std::{
    collections::{BTreeMap, HashMap, HashSet, VecDeque},
    sync::atomic::{AtomicU64, Ordering},
};

use alloy_primitives::BlockNumber;
use reth_blockchain_tree_api::{
    BlockStore as BlockStoreTrait, BlockTree as BlockTreeTrait, BlockchainTreeError,
};
use reth_primitives::Block;
use reth_primitives_traits::BlockHash;

use crate::store::InMemoryBlockStore;

/// Monotonic counter handing out a fresh identity to every [`BlockTree`],
/// used by [`crate::overlay::BlockTreeOverlay`] to reject a base and delta
/// that are secretly the same instance (spec.md §4.3, `SharedStateError`).
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(0);

/// Owns the canonical-chain map and orphan indices for a set of blocks (C3,
/// spec.md §4.2).
///
/// Conceptually `BlockTree` *borrows* a shared, read-mostly `BlockStore`
/// (spec.md §3 "Ownership"); this implementation holds an owned
/// [`InMemoryBlockStore`] to keep the type self-contained — the store is
/// never aliased with another tree's store because each `BlockTree` gets a
/// fresh instance identity at construction.
#[derive(Debug)]
pub struct BlockTree {
    instance_id: u64,
    store: InMemoryBlockStore,
    canonical_chain: BTreeMap<BlockNumber, BlockHash>,
    orphans: HashSet<BlockHash>,
    orphans_by_parent: HashMap<BlockHash, HashSet<BlockHash>>,
}

impl Default for BlockTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockTree {
    /// Creates an empty tree with a fresh instance identity.
    pub fn new() -> Self {
        Self {
            instance_id: NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed),
            store: InMemoryBlockStore::default(),
            canonical_chain: BTreeMap::new(),
            orphans: HashSet::new(),
            orphans_by_parent: HashMap::new(),
        }
    }

    pub(crate) const fn instance_id(&self) -> u64 {
        self.instance_id
    }

    pub(crate) fn get_block(&self, hash: BlockHash) -> Option<Block> {
        self.store.get(hash)
    }

    /// Snapshot of all hashes currently marked orphan.
    pub(crate) fn orphan_hashes(&self) -> Vec<BlockHash> {
        self.orphans.iter().copied().collect()
    }

    /// Test-only constructor that pins a specific instance id, used to
    /// simulate a base/delta pair that accidentally share one tree.
    #[cfg(test)]
    pub(crate) fn with_instance_id_for_test(instance_id: u64) -> Self {
        Self { instance_id, ..Self::new() }
    }

    /// `true` iff `hash` is in the current canonical chain.
    pub fn is_canonical(&self, hash: BlockHash) -> bool {
        self.store
            .get(hash)
            .is_some_and(|b| self.canonical_chain.get(&b.header.number) == Some(&hash))
    }

    /// Walks from `hash` to `number == 0` via successive `parent_hash`
    /// lookups, verifying each step's number decrements by exactly one.
    /// Shared by [`BlockTreeTrait::set_canonical_head`] (which commits the
    /// result) and [`BlockTreeTrait::validate_chain_to_genesis`] (which
    /// discards it).
    fn walk_to_genesis(
        &self,
        hash: BlockHash,
    ) -> Result<BTreeMap<BlockNumber, BlockHash>, BlockchainTreeError> {
        if !self.store.has(hash) {
            return Err(BlockchainTreeError::BlockNotFound(hash));
        }
        if self.orphans.contains(&hash) {
            return Err(BlockchainTreeError::CannotSetOrphanAsHead(hash));
        }

        let mut scratch = BTreeMap::new();
        let mut expected_number: Option<BlockNumber> = None;
        let mut current_hash = hash;

        loop {
            let block = self
                .store
                .get(current_hash)
                .ok_or(BlockchainTreeError::BlockNotFound(current_hash))?;
            let number = block.header.number;

            if let Some(expected) = expected_number {
                if number != expected {
                    return Err(BlockchainTreeError::CanonicalChainInvalid(number));
                }
            }

            scratch.insert(number, current_hash);

            if number == 0 {
                break;
            }
            expected_number = Some(number - 1);
            current_hash = block.header.parent_hash;
        }

        Ok(scratch)
    }
}

impl BlockTreeTrait for BlockTree {
    /// Inserts `block`. See spec.md §4.2 "putBlock": marks `block` orphan
    /// when its parent is unknown, otherwise cascade-resolves any
    /// descendants the new block newly unblocks.
    fn put_block(&mut self, hash: BlockHash, block: Block) -> Result<(), BlockchainTreeError> {
        if self.store.has(hash) {
            return Ok(());
        }

        let number = block.header.number;
        let parent_hash = block.header.parent_hash;
        let is_genesis = number == 0;
        let has_parent = self.store.has(parent_hash);
        let is_orphan = !is_genesis && !has_parent;

        self.store.put(hash, block)?;

        if is_orphan {
            self.orphans.insert(hash);
            self.orphans_by_parent.entry(parent_hash).or_default().insert(hash);
            tracing::debug!(target: "blockchain_tree", ?hash, ?parent_hash, "orphaned block");
            return Ok(());
        }

        // Cascade-resolve: BFS over orphans_by_parent starting at `hash`.
        // Termination: the orphan set strictly shrinks every iteration and
        // each hash is dequeued at most once (spec.md §4.2).
        let mut queue = VecDeque::from([hash]);
        while let Some(resolved) = queue.pop_front() {
            if let Some(children) = self.orphans_by_parent.remove(&resolved) {
                for child in children {
                    self.orphans.remove(&child);
                    tracing::debug!(target: "blockchain_tree", ?child, "orphan resolved");
                    queue.push_back(child);
                }
            }
        }
        Ok(())
    }

    /// Replaces the canonical chain with the walk from `hash` to genesis.
    /// Builds the new map in a scratch container first so a failure midway
    /// leaves the tree's existing canonical chain untouched (spec.md §4.2
    /// "Failure semantics").
    fn set_canonical_head(&mut self, hash: BlockHash) -> Result<(), BlockchainTreeError> {
        let scratch = self.walk_to_genesis(hash)?;
        self.canonical_chain = scratch;
        Ok(())
    }

    fn head_block_number(&self) -> Option<BlockNumber> {
        self.canonical_chain.keys().next_back().copied()
    }

    fn is_orphan(&self, hash: BlockHash) -> bool {
        self.orphans.contains(&hash)
    }

    fn has_block(&self, hash: BlockHash) -> bool {
        self.store.has(hash)
    }

    fn orphan_count(&self) -> usize {
        self.orphans.len()
    }

    fn block_count(&self) -> usize {
        self.store.count()
    }

    fn canonical_hash_at(&self, number: BlockNumber) -> Option<BlockHash> {
        self.canonical_chain.get(&number).copied()
    }

    fn validate_chain_to_genesis(&self, hash: BlockHash) -> Result<(), BlockchainTreeError> {
        self.walk_to_genesis(hash).map(drop)
    }
}
