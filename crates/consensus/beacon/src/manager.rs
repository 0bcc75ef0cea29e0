use alloy_primitives::BlockNumber;
use parking_lot::Mutex;
use reth_blockchain_tree_api::{BlockTree, BlockchainTreeError};
use reth_primitives::Block;
use reth_primitives_traits::{BlockHash, ZERO_HASH};
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::{
    events::{ChainEvent, EventListeners},
    state::{BlockchainState, ForkChoiceState},
};

/// Tracks fork-choice state and genesis identity on top of a borrowed
/// [`BlockTree`], publishing [`ChainEvent`]s as that state changes (C7,
/// spec.md §4.6).
///
/// Per spec.md §3 "Ownership", `ChainManager` uniquely owns its
/// [`BlockchainState`] and event bus but borrows the tree; this struct
/// models that borrow as an owned, mutex-guarded `T` so it stays
/// `Send + Sync` without requiring callers to manage lifetimes across an
/// async boundary.
#[derive(Debug)]
pub struct ChainManager<T> {
    tree: Mutex<T>,
    state: Mutex<BlockchainState>,
    events: EventListeners<ChainEvent>,
}

impl<T: BlockTree> ChainManager<T> {
    /// Builds a manager over `tree`, with no genesis initialized yet.
    pub fn new(tree: T) -> Self {
        Self { tree: Mutex::new(tree), state: Mutex::new(BlockchainState::default()), events: EventListeners::default() }
    }

    /// A snapshot of the current state. Cheap: the state is small and
    /// `Clone`.
    pub fn state(&self) -> BlockchainState {
        self.state.lock().clone()
    }

    /// Subscribes to chain events. Dropping the returned stream
    /// unsubscribes (spec.md §4.6 "Event bus").
    pub fn subscribe(&self) -> UnboundedReceiverStream<ChainEvent> {
        self.events.subscribe()
    }

    /// One-shot genesis initialization (spec.md §4.6, I5).
    pub fn initialize_genesis(
        &self,
        hash: BlockHash,
        genesis: Block,
    ) -> Result<(), BlockchainTreeError> {
        let mut state = self.state.lock();
        if state.genesis_hash.is_some() {
            return Err(BlockchainTreeError::GenesisAlreadyInitialized);
        }
        if genesis.header.number != 0 || genesis.header.parent_hash != ZERO_HASH {
            return Err(BlockchainTreeError::InvalidGenesisBlock);
        }

        let mut tree = self.tree.lock();
        tree.put_block(hash, genesis)?;
        tree.set_canonical_head(hash)?;
        drop(tree);

        state.genesis_hash = Some(hash);
        state.head_hash = Some(hash);
        state.head_number = Some(0);
        state.best_known_number = Some(0);
        state.best_suggested_hash = Some(hash);
        state.best_suggested_number = Some(0);
        state.fork_choice = ForkChoiceState::new(hash);
        drop(state);

        tracing::debug!(target: "consensus::beacon", ?hash, "genesis initialized");
        self.events.notify(ChainEvent::GenesisInitialized { hash });
        self.events.notify(ChainEvent::CanonicalHeadUpdated { hash, number: 0 });
        Ok(())
    }

    /// Promotes `hash` to canonical head, verifying the walk resolves to
    /// the initialized genesis (spec.md §4.6).
    pub fn set_canonical_head(&self, hash: BlockHash) -> Result<(), BlockchainTreeError> {
        let mut state = self.state.lock();
        let genesis_hash = state.genesis_hash.ok_or(BlockchainTreeError::GenesisNotInitialized)?;

        let mut tree = self.tree.lock();
        tree.set_canonical_head(hash)?;
        if tree.canonical_hash_at(0) != Some(genesis_hash) {
            return Err(BlockchainTreeError::GenesisMismatch);
        }
        let number = tree.head_block_number().ok_or(BlockchainTreeError::GenesisMismatch)?;
        drop(tree);

        state.head_hash = Some(hash);
        state.head_number = Some(number);
        state.best_known_number = Some(state.best_known_number.unwrap_or(0).max(number));
        drop(state);

        tracing::debug!(target: "consensus::beacon", ?hash, number, "canonical head updated");
        self.events.notify(ChainEvent::CanonicalHeadUpdated { hash, number });
        Ok(())
    }

    /// Applies a new fork-choice triple, validating `head`'s ancestry (and
    /// the mere presence of `safe`/`finalized`) without promoting it to
    /// canonical (spec.md §4.6).
    pub fn fork_choice_updated(&self, update: ForkChoiceState) -> Result<(), BlockchainTreeError> {
        let mut state = self.state.lock();
        state.genesis_hash.ok_or(BlockchainTreeError::GenesisNotInitialized)?;

        let tree = self.tree.lock();
        tree.validate_chain_to_genesis(update.head)?;
        for optional in [update.safe, update.finalized].into_iter().flatten() {
            if !tree.has_block(optional) {
                return Err(BlockchainTreeError::BlockNotFound(optional));
            }
        }
        drop(tree);

        state.fork_choice = update;
        drop(state);

        tracing::debug!(target: "consensus::beacon", ?update, "fork choice updated");
        self.events.notify(ChainEvent::ForkChoiceUpdated { state: update });
        Ok(())
    }

    /// Inserts `block` and publishes `BlockSuggested`; if its number is a
    /// new high, also updates and publishes the best-suggested pointer
    /// (spec.md §4.6).
    pub fn suggest_block(&self, hash: BlockHash, block: Block) -> Result<(), BlockchainTreeError> {
        let number: BlockNumber = block.header.number;
        self.tree.lock().put_block(hash, block)?;

        tracing::debug!(target: "consensus::beacon", ?hash, number, "block suggested");
        self.events.notify(ChainEvent::BlockSuggested { hash, number });

        let mut state = self.state.lock();
        let is_new_best = state.best_suggested_number.is_none_or(|best| number > best);
        if is_new_best {
            state.best_suggested_hash = Some(hash);
            state.best_suggested_number = Some(number);
            state.best_known_number = Some(state.best_known_number.unwrap_or(0).max(number));
        }
        drop(state);

        if is_new_best {
            self.events.notify(ChainEvent::BestSuggestedBlock { hash, number });
        }
        Ok(())
    }
}
