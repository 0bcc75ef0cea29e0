//! In-memory implementations of the block store, header store, block tree,
//! and read-only overlay (C1–C4, spec.md §4.1–§4.3).
//!
//! Grounded on the orphan-cascade / canonical-head-swap design of
//! `BlockchainTree`/`BlockIndices` in upstream `reth`, reduced to this
//! core's synchronous, single-producer scope (spec.md §5) — no execution,
//! no persistent storage, no side-chain objects.

mod overlay;
mod store;
mod tree;

pub use overlay::BlockTreeOverlay;
pub use store::{InMemoryBlockStore, InMemoryHeaderStore};
pub use tree::BlockTree;

pub use reth_blockchain_tree_api::{
    BlockStore, BlockTree as BlockTreeApi, BlockchainTreeError, HeaderStore,
};
