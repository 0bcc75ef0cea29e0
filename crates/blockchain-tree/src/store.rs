use std::collections::HashMap;

use reth_blockchain_tree_api::{BlockStore as BlockStoreTrait, BlockchainTreeError, HeaderStore as HeaderStoreTrait};
use reth_primitives::{Block, Header};
use reth_primitives_traits::BlockHash;

/// In-memory [`BlockStore`](BlockStoreTrait), keyed by hash (C1, spec.md
/// §4.1). The map key is the hash value itself rather than its hex
/// encoding — any representation preserving equality satisfies the
/// contract, and `B256` equality is exactly hash equality.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBlockStore {
    blocks: HashMap<BlockHash, Block>,
}

impl BlockStoreTrait for InMemoryBlockStore {
    fn get(&self, hash: BlockHash) -> Option<Block> {
        self.blocks.get(&hash).cloned()
    }

    fn has(&self, hash: BlockHash) -> bool {
        self.blocks.contains_key(&hash)
    }

    fn put(&mut self, hash: BlockHash, block: Block) -> Result<(), BlockchainTreeError> {
        // Idempotent: re-putting an existing hash is a no-op, never an
        // error (spec.md §4.1, I1).
        self.blocks.entry(hash).or_insert(block);
        Ok(())
    }

    fn count(&self) -> usize {
        self.blocks.len()
    }
}

/// In-memory [`HeaderStore`](HeaderStoreTrait), mirroring
/// [`InMemoryBlockStore`] (C2, spec.md §4.1).
#[derive(Debug, Default, Clone)]
pub struct InMemoryHeaderStore {
    headers: HashMap<BlockHash, Header>,
}

impl HeaderStoreTrait for InMemoryHeaderStore {
    fn get_header(&self, hash: BlockHash) -> Option<Header> {
        self.headers.get(&hash).cloned()
    }

    fn has_header(&self, hash: BlockHash) -> bool {
        self.headers.contains_key(&hash)
    }

    fn put_header(&mut self, hash: BlockHash, header: Header) -> Result<(), BlockchainTreeError> {
        self.headers.entry(hash).or_insert(header);
        Ok(())
    }

    fn header_count(&self) -> usize {
        self.headers.len()
    }
}
