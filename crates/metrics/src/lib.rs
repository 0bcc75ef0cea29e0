//! Gauges and counters for the transaction pool, the one subsystem with
//! long-lived numbers worth exporting (queue depth, rejection counts).
//! Hand-written rather than derived: there are only two small structs, and
//! each field is registered once at construction.

use metrics::{Counter, Gauge};

/// Pool-wide gauges tracked for as long as a pool instance lives.
#[derive(Debug, Clone)]
pub struct PoolSizeMetrics {
    /// Number of transactions currently in the pending subpool.
    pub pending_pool_size: Gauge,
    /// Number of transactions currently in the queued (non-executable)
    /// subpool.
    pub queued_pool_size: Gauge,
    /// Number of transactions currently in the basefee subpool.
    pub basefee_pool_size: Gauge,
    /// Number of blob-carrying transactions currently tracked across all
    /// subpools.
    pub blob_pool_size: Gauge,
    /// Total bytes of transaction payload currently held by the pool.
    pub total_pool_size_bytes: Gauge,
}

impl Default for PoolSizeMetrics {
    fn default() -> Self {
        Self {
            pending_pool_size: metrics::gauge!("core_pool_pending_size"),
            queued_pool_size: metrics::gauge!("core_pool_queued_size"),
            basefee_pool_size: metrics::gauge!("core_pool_basefee_size"),
            blob_pool_size: metrics::gauge!("core_pool_blob_size"),
            total_pool_size_bytes: metrics::gauge!("core_pool_total_size_bytes"),
        }
    }
}

/// Monotonically increasing counters for pool admission outcomes (C10/C12).
#[derive(Debug, Clone)]
pub struct PoolEventMetrics {
    /// Transactions accepted into the pool.
    pub accepted: Counter,
    /// Transactions rejected by admission, keyed loosely by the counter
    /// itself rather than a label per-variant (spec.md's `AcceptTxResult`
    /// catalog is small enough that callers match on it directly and bump
    /// this once per rejection).
    pub rejected: Counter,
    /// Transactions replaced by a higher-fee transaction from the same
    /// sender and nonce.
    pub replaced: Counter,
    /// Transactions evicted to keep the pool within its configured limits.
    pub evicted: Counter,
}

impl Default for PoolEventMetrics {
    fn default() -> Self {
        Self {
            accepted: metrics::counter!("core_pool_accepted_total"),
            rejected: metrics::counter!("core_pool_rejected_total"),
            replaced: metrics::counter!("core_pool_replaced_total"),
            evicted: metrics::counter!("core_pool_evicted_total"),
        }
    }
}

/// Counters for the RLPx wire preliminaries (C8/C9): frames rejected before
/// decompression and Hello negotiations that failed validation.
#[derive(Debug, Clone)]
pub struct RlpxWireMetrics {
    /// Frames whose Snappy length prefix was malformed or over budget.
    pub snappy_length_rejected: Counter,
    /// Hello exchanges whose capability negotiation failed validation.
    pub hello_negotiation_rejected: Counter,
}

impl Default for RlpxWireMetrics {
    fn default() -> Self {
        Self {
            snappy_length_rejected: metrics::counter!("core_rlpx_snappy_length_rejected_total"),
            hello_negotiation_rejected: metrics::counter!(
                "core_rlpx_hello_negotiation_rejected_total"
            ),
        }
    }
}
