use std::collections::HashSet;

use alloy_primitives::BlockNumber;
use reth_blockchain_tree_api::{BlockTree as BlockTreeTrait, BlockchainTreeError};
use reth_primitives::Block;
use reth_primitives_traits::BlockHash;

use crate::tree::BlockTree;

/// Composes a read-only `base` and a mutable `overlay` [`BlockTree`] (C4,
/// spec.md §4.3). Reads check the overlay first, falling back to base;
/// writes only ever touch the overlay, after materializing whatever
/// ancestry the write needs from base.
#[derive(Debug)]
pub struct BlockTreeOverlay<'base> {
    base: &'base BlockTree,
    overlay: BlockTree,
    /// Hashes inserted directly into the overlay (not materialized from
    /// base), used to compute `blockCount` without double-counting
    /// materialized ancestors that also exist in `base`.
    overlay_only: HashSet<BlockHash>,
}

impl<'base> BlockTreeOverlay<'base> {
    /// Builds an overlay over `base` with an initially-empty `overlay` tree.
    ///
    /// Fails with [`BlockchainTreeError::SharedStateError`] if `overlay` is
    /// actually the same tree instance as `base` (spec.md §4.3).
    pub fn new(base: &'base BlockTree, overlay: BlockTree) -> Result<Self, BlockchainTreeError> {
        if base.instance_id() == overlay.instance_id() {
            return Err(BlockchainTreeError::SharedStateError);
        }
        Ok(Self { base, overlay, overlay_only: HashSet::new() })
    }

    /// `true` iff `hash` is known to either layer.
    pub fn has_block(&self, hash: BlockHash) -> bool {
        self.overlay.has_block(hash) || self.base.has_block(hash)
    }

    /// `true` iff `hash` is an orphan in either layer (spec.md §4.3:
    /// "`hasBlock`/`isOrphan` OR across layers").
    pub fn is_orphan(&self, hash: BlockHash) -> bool {
        self.overlay.is_orphan(hash) || self.base.is_orphan(hash)
    }

    /// Inserts `block` into the overlay, first materializing any ancestry
    /// its parent chain needs from `base`.
    pub fn put_block(&mut self, hash: BlockHash, block: Block) -> Result<(), BlockchainTreeError> {
        self.materialize_ancestry(block.header.parent_hash)?;

        let already_in_overlay = self.overlay.has_block(hash);
        self.overlay.put_block(hash, block)?;

        if !already_in_overlay && !self.base.has_block(hash) {
            self.overlay_only.insert(hash);
        }
        Ok(())
    }

    /// Materializes `hash`'s ancestry, then replaces the overlay's
    /// canonical chain with the walk from `hash` to genesis.
    pub fn set_canonical_head(&mut self, hash: BlockHash) -> Result<(), BlockchainTreeError> {
        self.materialize_ancestry(hash)?;
        self.overlay.set_canonical_head(hash)
    }

    /// The overlay's head if it has one, else the base's.
    pub fn head_block_number(&self) -> Option<BlockNumber> {
        self.overlay.head_block_number().or_else(|| self.base.head_block_number())
    }

    /// `baseCount + |overlay_only|` (spec.md §4.3).
    pub fn block_count(&self) -> usize {
        self.base.block_count() + self.overlay_only.len()
    }

    /// Orphans visible through the overlay, excluding base orphans the
    /// overlay has since materialized and resolved (spec.md §4.3).
    pub fn orphan_count(&self) -> usize {
        let mut combined: HashSet<BlockHash> = self.overlay.orphan_hashes().into_iter().collect();
        for hash in self.base.orphan_hashes() {
            let resolved_in_overlay = self.overlay.has_block(hash) && !self.overlay.is_orphan(hash);
            if !resolved_in_overlay {
                combined.insert(hash);
            }
        }
        combined.len()
    }

    /// Recursively copies ancestors of `hash` from `base` into the overlay,
    /// starting from the first ancestor missing from the overlay and
    /// working forward so each parent is present before its child is
    /// inserted (spec.md §4.3).
    fn materialize_ancestry(&mut self, hash: BlockHash) -> Result<(), BlockchainTreeError> {
        let mut missing = Vec::new();
        let mut current = hash;

        loop {
            if self.overlay.has_block(current) {
                break;
            }
            let Some(block) = self.base.get_block(current) else { break };
            let parent_hash = block.header.parent_hash;
            let number = block.header.number;
            missing.push((current, block));
            if number == 0 {
                break;
            }
            current = parent_hash;
        }

        for (hash, block) in missing.into_iter().rev() {
            self.overlay.put_block(hash, block)?;
        }
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use reth_primitives::Header;
    use reth_primitives_traits::ZERO_HASH;

    fn hash(byte: u8) -> BlockHash {
        B256::repeat_byte(byte)
    }

    fn block(number: BlockNumber, parent: BlockHash) -> Block {
        Block::empty(Header { number, parent_hash: parent, ..Default::default() })
    }

    #[test]
    fn overlay_rejects_sharing_base_instance() {
        let base = BlockTree::new();
        // Simulates the "same instance" failure case: a tree sharing
        // `base`'s instance id without exposing a public clone of it.
        let same = BlockTree::with_instance_id_for_test(base.instance_id());
        let err = BlockTreeOverlay::new(&base, same).unwrap_err();
        assert!(matches!(err, BlockchainTreeError::SharedStateError));
    }

    #[test]
    fn put_block_materializes_missing_ancestry_before_writing() {
        let mut base = BlockTree::new();
        let h0 = hash(0x30);
        let h1 = hash(0x31);
        base.put_block(h0, block(0, ZERO_HASH)).unwrap();
        base.put_block(h1, block(1, h0)).unwrap();

        let delta = BlockTree::new();
        let mut overlay = BlockTreeOverlay::new(&base, delta).unwrap();

        let h2 = hash(0x32);
        overlay.put_block(h2, block(2, h1)).unwrap();

        assert!(overlay.has_block(h0));
        assert!(overlay.has_block(h1));
        assert!(!overlay.is_orphan(h2));
        assert_eq!(overlay.block_count(), base.block_count() + 1);
    }

    #[test]
    fn set_canonical_head_materializes_then_commits_in_overlay_only() {
        let mut base = BlockTree::new();
        let h0 = hash(0x30);
        base.put_block(h0, block(0, ZERO_HASH)).unwrap();
        base.set_canonical_head(h0).unwrap();

        let delta = BlockTree::new();
        let mut overlay = BlockTreeOverlay::new(&base, delta).unwrap();
        overlay.set_canonical_head(h0).unwrap();

        assert_eq!(overlay.head_block_number(), Some(0));
        assert_eq!(base.head_block_number(), Some(0));
    }
}
