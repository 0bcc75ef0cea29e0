use alloy_primitives::BlockNumber;
use parking_lot::Mutex;
use reth_primitives_traits::BlockHash;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::state::ForkChoiceState;

/// Events the chain manager publishes as its state changes (spec.md §4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    /// `initializeGenesis` completed; carries the genesis block's hash.
    GenesisInitialized {
        /// The genesis block's hash.
        hash: BlockHash,
    },
    /// The canonical head changed, via `initializeGenesis` or
    /// `setCanonicalHead`.
    CanonicalHeadUpdated {
        /// The new canonical head's hash.
        hash: BlockHash,
        /// The new canonical head's number.
        number: BlockNumber,
    },
    /// `forkChoiceUpdated` applied a new fork-choice triple.
    ForkChoiceUpdated {
        /// The triple that was applied.
        state: ForkChoiceState,
    },
    /// `suggestBlock` accepted a block into the tree.
    BlockSuggested {
        /// The suggested block's hash.
        hash: BlockHash,
        /// The suggested block's number.
        number: BlockNumber,
    },
    /// A `suggestBlock` call raised the best-known suggested block.
    BestSuggestedBlock {
        /// The new best-suggested block's hash.
        hash: BlockHash,
        /// The new best-suggested block's number.
        number: BlockNumber,
    },
}

/// A publish-subscribe bus over `T`, unbounded in both subscriber count and
/// per-subscriber queue depth (spec.md §4.6 "Event bus").
///
/// Grounded on the teacher's `BeaconConsensusEngineHandle`/`EventListeners`
/// pattern: each subscriber gets its own unbounded channel; publishing
/// clones the event to every live sender and quietly drops any whose
/// receiver has gone away. Dropping a subscriber's stream unsubscribes it —
/// the next publish after that finds the channel closed and prunes it
/// (spec.md §3 "dropping the scope releases the subscription queue").
#[derive(Debug)]
pub struct EventListeners<T> {
    listeners: Mutex<Vec<UnboundedSender<T>>>,
}

impl<T> Default for EventListeners<T> {
    fn default() -> Self {
        Self { listeners: Mutex::new(Vec::new()) }
    }
}

impl<T: Clone> EventListeners<T> {
    /// Registers a new subscriber and returns its stream.
    pub fn subscribe(&self) -> UnboundedReceiverStream<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.lock().push(tx);
        UnboundedReceiverStream::new(rx)
    }

    /// Publishes `event` to every live subscriber, in the order they were
    /// registered, pruning any whose receiver has been dropped.
    pub fn notify(&self, event: T) {
        self.listeners.lock().retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of currently registered subscribers. Subscribers that have
    /// dropped their receiver are only pruned on the next [`notify`], so
    /// this can overcount briefly after a scope exits.
    ///
    /// [`notify`]: EventListeners::notify
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}
