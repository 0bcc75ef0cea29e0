//! The pool's type-erased dispatch surface (C12, spec.md §4.11) plus an
//! in-memory implementation covering the pending subpool this core's
//! admission pipeline dispatches against. Later subpool stages (queued,
//! basefee, blob-specific persistence) are out of this core's scope
//! (spec.md §4.9 "later stages not in this core").
//!
//! State lives behind a single `parking_lot::Mutex`, matching spec.md §5
//! "linearizable with respect to the component's internal state" — the
//! pool is meant to be shared (`Arc<InMemoryTxPool<T>>`) across callers
//! that each hold a `&self` reference, the teacher's habit for
//! `reth_transaction_pool`'s pool state over a bare `std::sync::Mutex`.

use std::collections::BTreeMap;

use alloy_primitives::{Address, B256};
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    admission::{admit, AdmissionContext},
    config::TxPoolConfig,
    known::KnownHashCache,
    options::TxHandlingOptions,
    ordering::{compare_replaced_blob_transaction_by_fee, compare_replaced_transaction_by_fee},
    result::AcceptTxResult,
    transaction::PoolTransaction,
};

/// The surface the admission layer dispatches to (C12, spec.md §4.11).
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait TxPool {
    /// The concrete pooled-transaction type this pool holds.
    type Transaction: PoolTransaction;

    /// Number of transactions in the pending subpool.
    fn pending_count(&self) -> usize;

    /// Number of blob-carrying transactions in the pending subpool.
    fn pending_blob_count(&self) -> usize;

    /// All pending transactions, in no particular order.
    fn get_pending_transactions(&self) -> Vec<Self::Transaction>;

    /// `true` iff this pool accepts blob transactions at all
    /// (`cfg.blobs_support != Disabled`).
    fn supports_blobs(&self) -> bool;

    /// Pending transaction count for `sender`, inclusive of every
    /// transaction type (spec.md §9 open question, resolved inclusive).
    fn get_pending_count_for_sender(&self, sender: Address) -> usize;

    /// Pending blob-transaction count for `sender` (spec.md §9 open
    /// question: a separate blob-only accessor).
    fn get_pending_blob_count_for_sender(&self, sender: Address) -> usize;

    /// Pending transactions for `sender`, ordered by nonce.
    fn get_pending_transactions_by_sender(&self, sender: Address) -> Vec<Self::Transaction>;

    /// `true` iff `hash` has been marked known in the dedup cache.
    fn is_known(&self, hash: B256) -> bool;

    /// Marks `hash` known for the remainder of the current (and future)
    /// admission scopes.
    fn mark_known_for_current_scope(&self, hash: B256);

    /// `true` iff a transaction with this exact `(hash, type)` pair is
    /// held in a typed container (distinct from the hash-only dedup
    /// cache, spec.md §4.9 `precheck_duplicate`).
    fn contains_tx(&self, hash: B256, tx_type: u8) -> bool;

    /// Runs the admission pipeline and, on success, inserts the
    /// transaction (replacing an existing same-sender/nonce transaction
    /// when the replacement policy allows it).
    fn submit_tx(
        &self,
        tx: Self::Transaction,
        opts: TxHandlingOptions,
        ctx: AdmissionContext,
    ) -> AcceptTxResult;
}

#[derive(Debug)]
struct Inner<T> {
    by_sender: FxHashMap<Address, BTreeMap<u64, T>>,
    by_hash_and_type: FxHashSet<(B256, u8)>,
    known: KnownHashCache,
}

/// A minimal in-memory pending subpool: one nonce-ordered map per
/// sender, a typed `(hash, type)` index, and the bounded dedup cache
/// (spec.md §4.11, §9 "Duplicate filter scope").
#[derive(Debug)]
pub struct InMemoryTxPool<T: PoolTransaction + Clone> {
    cfg: TxPoolConfig,
    inner: Mutex<Inner<T>>,
    size_metrics: reth_metrics::PoolSizeMetrics,
    event_metrics: reth_metrics::PoolEventMetrics,
}

impl<T: PoolTransaction + Clone> InMemoryTxPool<T> {
    /// An empty pool configured by `cfg`.
    pub fn new(cfg: TxPoolConfig) -> Self {
        let known = KnownHashCache::new(cfg.hash_cache_size);
        let inner = Inner { by_sender: FxHashMap::default(), by_hash_and_type: FxHashSet::default(), known };
        Self {
            cfg,
            inner: Mutex::new(inner),
            size_metrics: reth_metrics::PoolSizeMetrics::default(),
            event_metrics: reth_metrics::PoolEventMetrics::default(),
        }
    }

    /// This pool's configuration.
    pub const fn config(&self) -> &TxPoolConfig {
        &self.cfg
    }
}

impl<T: PoolTransaction + Clone> TxPool for InMemoryTxPool<T> {
    type Transaction = T;

    fn pending_count(&self) -> usize {
        self.inner.lock().by_sender.values().map(BTreeMap::len).sum()
    }

    fn pending_blob_count(&self) -> usize {
        self.inner
            .lock()
            .by_sender
            .values()
            .flat_map(BTreeMap::values)
            .filter(|tx| tx.is_eip4844())
            .count()
    }

    fn get_pending_transactions(&self) -> Vec<T> {
        self.inner.lock().by_sender.values().flat_map(BTreeMap::values).cloned().collect()
    }

    fn supports_blobs(&self) -> bool {
        self.cfg.blobs_support != crate::config::BlobsSupport::Disabled
    }

    fn get_pending_count_for_sender(&self, sender: Address) -> usize {
        self.inner.lock().by_sender.get(&sender).map_or(0, BTreeMap::len)
    }

    fn get_pending_blob_count_for_sender(&self, sender: Address) -> usize {
        self.inner
            .lock()
            .by_sender
            .get(&sender)
            .map(|txs| txs.values().filter(|tx| tx.is_eip4844()).count())
            .unwrap_or(0)
    }

    fn get_pending_transactions_by_sender(&self, sender: Address) -> Vec<T> {
        self.inner
            .lock()
            .by_sender
            .get(&sender)
            .map(|txs| txs.values().cloned().collect())
            .unwrap_or_default()
    }

    fn is_known(&self, hash: B256) -> bool {
        self.inner.lock().known.is_known(hash)
    }

    fn mark_known_for_current_scope(&self, hash: B256) {
        self.inner.lock().known.mark_known(hash);
    }

    fn contains_tx(&self, hash: B256, tx_type: u8) -> bool {
        self.inner.lock().by_hash_and_type.contains(&(hash, tx_type))
    }

    fn submit_tx(&self, tx: T, _opts: TxHandlingOptions, ctx: AdmissionContext) -> AcceptTxResult {
        let outcome = admit(&tx, self, &self.cfg, &ctx);

        if !outcome.is_accepted() {
            self.event_metrics.rejected.increment(1);
            tracing::debug!(target: "txpool", code = outcome.code(), "rejected transaction");
            return outcome;
        }

        let mut inner = self.inner.lock();
        let existing =
            inner.by_sender.get(&tx.sender()).and_then(|txs| txs.get(&tx.nonce())).cloned();
        if let Some(existing) = existing {
            let decision = if tx.is_eip4844() || existing.is_eip4844() {
                compare_replaced_blob_transaction_by_fee(&tx, &existing)
            } else {
                compare_replaced_transaction_by_fee(&tx, &existing)
            };
            if decision >= 0 {
                drop(inner);
                self.event_metrics.rejected.increment(1);
                tracing::debug!(target: "txpool", "replacement underpriced");
                return AcceptTxResult::ReplacementNotAllowed;
            }
            inner.by_hash_and_type.remove(&(existing.hash(), existing.tx_type()));
        }

        inner.by_hash_and_type.insert((tx.hash(), tx.tx_type()));
        inner.by_sender.entry(tx.sender()).or_default().insert(tx.nonce(), tx);
        drop(inner);

        self.size_metrics.pending_pool_size.increment(1.0);
        self.event_metrics.accepted.increment(1);
        tracing::debug!(target: "txpool", "accepted transaction");
        AcceptTxResult::Accepted
    }
}
