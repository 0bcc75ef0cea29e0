//! `TxPoolConfig` (spec.md §6) — the only configuration surface in this
//! core's scope, a plain struct with a `Default` impl matching the
//! table's defaults, the way `reth_transaction_pool::PoolConfig` is built.

/// How the pool persists blob sidecars (spec.md §6 `blobs_support`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlobsSupport {
    /// Blob transactions are rejected outright.
    Disabled,
    /// Sidecars live only in memory; lost on restart.
    InMemory,
    /// Sidecars are persisted to disk.
    Storage,
    /// Sidecars are persisted to disk and survive reorgs.
    #[default]
    StorageWithReorgs,
}

/// Transaction pool configuration (spec.md §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxPoolConfig {
    /// Percent of persistent transactions announced per block; `0`
    /// disables peer notification.
    pub peer_notification_threshold: u64,
    /// Base-fee multiplier percent used for broadcast filtering.
    pub min_base_fee_threshold: u64,
    /// Max pending non-blob transactions.
    pub size: usize,
    /// Blob sidecar persistence mode.
    pub blobs_support: BlobsSupport,
    /// Persistent blob capacity.
    pub persistent_blob_storage_size: usize,
    /// LRU capacity for full blob transactions.
    pub blob_cache_size: usize,
    /// In-memory blob capacity.
    pub in_memory_blob_pool_size: usize,
    /// Max pending non-blob transactions per sender; `0` disables.
    pub max_pending_txs_per_sender: u64,
    /// Max pending blob transactions per sender; `0` disables.
    pub max_pending_blob_txs_per_sender: u64,
    /// Dedup hash-cache capacity (spec.md §4.9 `precheck_duplicate`).
    pub hash_cache_size: u32,
    /// Optional per-transaction gas cap.
    pub gas_limit: Option<u64>,
    /// Non-blob RLP byte cap.
    pub max_tx_size: usize,
    /// Blob RLP byte cap, excluding the blobs themselves.
    pub max_blob_tx_size: Option<usize>,
    /// Whether blob proof versions are translated on ingestion.
    pub proofs_translation_enabled: bool,
    /// Reporting interval, in minutes.
    pub report_minutes: Option<u64>,
    /// Accept transactions while the node is still syncing.
    pub accept_tx_when_not_synced: bool,
    /// Enable persistent broadcast for transactions from local accounts.
    pub persistent_broadcast_enabled: bool,
    /// Enforce the current blob base fee as a floor on
    /// `max_fee_per_blob_gas` (spec.md §4.9 `enforce_min_priority_fee_for_blobs`).
    pub current_blob_base_fee_required: bool,
    /// Minimum priority tip required for blob transactions; `0` disables.
    pub min_blob_tx_priority_fee: u128,
}

impl Default for TxPoolConfig {
    fn default() -> Self {
        Self {
            peer_notification_threshold: 5,
            min_base_fee_threshold: 70,
            size: 2048,
            blobs_support: BlobsSupport::default(),
            persistent_blob_storage_size: 16_384,
            blob_cache_size: 256,
            in_memory_blob_pool_size: 512,
            max_pending_txs_per_sender: 0,
            max_pending_blob_txs_per_sender: 16,
            hash_cache_size: 524_288,
            gas_limit: None,
            max_tx_size: 131_072,
            max_blob_tx_size: Some(1_048_576),
            proofs_translation_enabled: false,
            report_minutes: None,
            accept_tx_when_not_synced: false,
            persistent_broadcast_enabled: true,
            current_blob_base_fee_required: true,
            min_blob_tx_priority_fee: 0,
        }
    }
}

impl TxPoolConfig {
    /// The effective size cap for a transaction of the given kind
    /// (spec.md §4.9 `fits_size_limits`): `max_blob_tx_size` for blob
    /// transactions, falling back to `max_tx_size` when unset, otherwise
    /// `max_tx_size`.
    pub const fn size_limit_for(&self, is_blob: bool) -> usize {
        if is_blob {
            match self.max_blob_tx_size {
                Some(limit) => limit,
                None => self.max_tx_size,
            }
        } else {
            self.max_tx_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_configuration_table() {
        let cfg = TxPoolConfig::default();
        assert_eq!(cfg.size, 2048);
        assert_eq!(cfg.hash_cache_size, 524_288);
        assert_eq!(cfg.max_tx_size, 131_072);
        assert_eq!(cfg.max_blob_tx_size, Some(1_048_576));
        assert_eq!(cfg.blobs_support, BlobsSupport::StorageWithReorgs);
        assert!(cfg.current_blob_base_fee_required);
        assert!(cfg.persistent_broadcast_enabled);
    }

    #[test]
    fn blob_size_limit_falls_back_to_max_tx_size_when_unset() {
        let cfg = TxPoolConfig { max_blob_tx_size: None, max_tx_size: 1000, ..Default::default() };
        assert_eq!(cfg.size_limit_for(true), 1000);
        assert_eq!(cfg.size_limit_for(false), 1000);
    }
}
