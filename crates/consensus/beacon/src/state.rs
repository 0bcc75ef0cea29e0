use alloy_primitives::BlockNumber;
use reth_primitives_traits::BlockHash;

/// The fork-choice triple an external driver (the consensus layer, in the
/// post-merge engine API model) supplies: the block it considers the chain
/// tip, and the two blocks it considers safe/finalized (spec.md §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ForkChoiceState {
    /// The block the driver wants as the chain's head.
    pub head: BlockHash,
    /// The most recent block the driver considers safe from reorg.
    pub safe: Option<BlockHash>,
    /// The most recent block the driver considers finalized.
    pub finalized: Option<BlockHash>,
}

impl ForkChoiceState {
    /// A state with only `head` set.
    pub const fn new(head: BlockHash) -> Self {
        Self { head, safe: None, finalized: None }
    }
}

/// All state the chain manager owns outright (spec.md §3 "Ownership"):
/// genesis identity, canonical-head pointer, the best block it has ever
/// seen, and the fork-choice triple.
#[derive(Debug, Clone, Default)]
pub struct BlockchainState {
    /// Set once by `initializeGenesis`; `None` before that.
    pub genesis_hash: Option<BlockHash>,
    /// The current canonical head, mirroring the block tree's.
    pub head_hash: Option<BlockHash>,
    /// The current canonical head's number.
    pub head_number: Option<BlockNumber>,
    /// The highest block number ever observed via `suggestBlock` or
    /// `setCanonicalHead`.
    pub best_known_number: Option<BlockNumber>,
    /// The hash of the highest-numbered block ever suggested.
    pub best_suggested_hash: Option<BlockHash>,
    /// The number of the highest-numbered block ever suggested.
    pub best_suggested_number: Option<BlockNumber>,
    /// The most recently applied fork-choice triple.
    pub fork_choice: ForkChoiceState,
}
