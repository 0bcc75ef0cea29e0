//! Fork-choice state, genesis initialization, and canonical-head event
//! publication on top of a block tree (C7, spec.md §4.6).

mod events;
mod manager;
mod state;

pub use events::{ChainEvent, EventListeners};
pub use manager::ChainManager;
pub use state::{BlockchainState, ForkChoiceState};

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use futures::StreamExt;
    use reth_blockchain_tree::BlockTree as InMemoryBlockTree;
    use reth_blockchain_tree_api::BlockchainTreeError;
    use reth_primitives::{Block, Header};
    use reth_primitives_traits::ZERO_HASH;

    fn hash(byte: u8) -> B256 {
        B256::repeat_byte(byte)
    }

    fn block(number: u64, parent: B256) -> Block {
        Block::empty(Header { number, parent_hash: parent, ..Default::default() })
    }

    fn manager() -> ChainManager<InMemoryBlockTree> {
        ChainManager::new(InMemoryBlockTree::new())
    }

    #[test]
    fn initialize_genesis_sets_state_and_is_one_shot() {
        let mgr = manager();
        let genesis_hash = hash(0x30);
        mgr.initialize_genesis(genesis_hash, block(0, ZERO_HASH)).unwrap();

        let state = mgr.state();
        assert_eq!(state.genesis_hash, Some(genesis_hash));
        assert_eq!(state.head_hash, Some(genesis_hash));
        assert_eq!(state.head_number, Some(0));

        let err = mgr.initialize_genesis(hash(0x31), block(0, ZERO_HASH)).unwrap_err();
        assert!(matches!(err, BlockchainTreeError::GenesisAlreadyInitialized));
    }

    #[test]
    fn initialize_genesis_rejects_nonzero_number_or_parent() {
        let mgr = manager();
        let err = mgr.initialize_genesis(hash(0x30), block(1, ZERO_HASH)).unwrap_err();
        assert!(matches!(err, BlockchainTreeError::InvalidGenesisBlock));

        let err = mgr.initialize_genesis(hash(0x30), block(0, hash(0x99))).unwrap_err();
        assert!(matches!(err, BlockchainTreeError::InvalidGenesisBlock));
    }

    #[test]
    fn set_canonical_head_requires_genesis_first() {
        let mgr = manager();
        let err = mgr.set_canonical_head(hash(0x30)).unwrap_err();
        assert!(matches!(err, BlockchainTreeError::GenesisNotInitialized));
    }

    #[test]
    fn set_canonical_head_advances_to_a_descendant() {
        let mgr = manager();
        let h0 = hash(0x30);
        let h1 = hash(0x31);
        mgr.initialize_genesis(h0, block(0, ZERO_HASH)).unwrap();
        mgr.suggest_block(h1, block(1, h0)).unwrap();

        mgr.set_canonical_head(h1).unwrap();
        let state = mgr.state();
        assert_eq!(state.head_hash, Some(h1));
        assert_eq!(state.head_number, Some(1));
        assert_eq!(state.best_known_number, Some(1));
    }

    #[test]
    fn fork_choice_updated_validates_ancestry_without_promoting_canonical() {
        let mgr = manager();
        let h0 = hash(0x30);
        let h1 = hash(0x31);
        mgr.initialize_genesis(h0, block(0, ZERO_HASH)).unwrap();
        mgr.suggest_block(h1, block(1, h0)).unwrap();

        mgr.fork_choice_updated(ForkChoiceState::new(h1)).unwrap();
        let state = mgr.state();
        assert_eq!(state.fork_choice.head, h1);
        // Head pointer itself is untouched; only fork-choice moved.
        assert_eq!(state.head_hash, Some(h0));
    }

    #[test]
    fn fork_choice_updated_rejects_missing_safe_block() {
        let mgr = manager();
        let h0 = hash(0x30);
        mgr.initialize_genesis(h0, block(0, ZERO_HASH)).unwrap();

        let err = mgr
            .fork_choice_updated(ForkChoiceState {
                head: h0,
                safe: Some(hash(0xff)),
                finalized: None,
            })
            .unwrap_err();
        assert!(matches!(err, BlockchainTreeError::BlockNotFound(_)));
    }

    #[tokio::test]
    async fn suggest_block_publishes_and_tracks_the_best_suggestion() {
        let mgr = manager();
        let h0 = hash(0x30);
        mgr.initialize_genesis(h0, block(0, ZERO_HASH)).unwrap();

        let mut events = mgr.subscribe();
        let h1 = hash(0x31);
        mgr.suggest_block(h1, block(1, h0)).unwrap();

        assert_eq!(events.next().await, Some(ChainEvent::BlockSuggested { hash: h1, number: 1 }));
        assert_eq!(
            events.next().await,
            Some(ChainEvent::BestSuggestedBlock { hash: h1, number: 1 })
        );

        let state = mgr.state();
        assert_eq!(state.best_suggested_hash, Some(h1));
        assert_eq!(state.best_suggested_number, Some(1));
    }

    #[tokio::test]
    async fn suggest_block_does_not_republish_best_when_not_a_new_high() {
        let mgr = manager();
        let h0 = hash(0x30);
        mgr.initialize_genesis(h0, block(0, ZERO_HASH)).unwrap();

        let h1 = hash(0x31);
        mgr.suggest_block(h1, block(1, h0)).unwrap();

        let mut events = mgr.subscribe();
        // A lower-numbered sibling of genesis's child never raises "best".
        let h1b = hash(0x32);
        mgr.suggest_block(h1b, block(1, h0)).unwrap();
        assert_eq!(
            events.next().await,
            Some(ChainEvent::BlockSuggested { hash: h1b, number: 1 })
        );

        let state = mgr.state();
        assert_eq!(state.best_suggested_hash, Some(h1));
    }
}
