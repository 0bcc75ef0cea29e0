//! Admission pipeline (C10, spec.md §4.9): duplicate → size → gas →
//! nonce-gap → blob-fee, each a pure predicate over a transaction and
//! the pool's config. A failing predicate aborts the remainder (spec.md
//! §5 "a failing predicate aborts the remainder").

use crate::{config::TxPoolConfig, pool::TxPool, result::AcceptTxResult, transaction::PoolTransaction};

/// The detailed rejection a single predicate raises. Only a subset of
/// spec.md §6's full `AcceptTxResult` catalog is ever produced by this
/// core's predicates — the rest of the catalog exists for outcomes this
/// core's external collaborators (balance checks, sender resolution)
/// produce (spec.md §7 "Txpool").
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionError {
    /// The transaction (by hash, or by `(hash, type)`) was already known
    /// to the pool (spec.md §4.9 `precheck_duplicate`).
    #[error("transaction already known to the pool")]
    AlreadyKnown,
    /// The transaction's wire-encoded size exceeded the configured cap.
    #[error("encoded size {actual} exceeds the {max}-byte limit")]
    MaxTxSizeExceeded {
        /// The transaction's actual encoded size.
        actual: usize,
        /// The configured limit it was checked against.
        max: usize,
    },
    /// `tx.gas_limit` exceeded `cfg.gas_limit`.
    #[error("gas limit {actual} exceeds the configured {max}")]
    TxGasLimitExceeded {
        /// The transaction's gas limit.
        actual: u64,
        /// The configured per-transaction cap.
        max: u64,
    },
    /// `tx_nonce - current_nonce` exceeded the sender's allowed pending
    /// gap (spec.md §4.9 `enforce_nonce_gap`).
    #[error("nonce gap {distance} exceeds the allowed {allowed}")]
    NonceGap {
        /// `tx_nonce - current_nonce`.
        distance: u64,
        /// The maximum allowed gap.
        allowed: u64,
    },
    /// A blob transaction's `max_priority_fee_per_gas` was below
    /// `cfg.min_blob_tx_priority_fee`.
    #[error("blob priority fee {actual} is below the required minimum {required}")]
    BlobPriorityFeeTooLow {
        /// The transaction's priority fee.
        actual: u128,
        /// The configured minimum.
        required: u128,
    },
    /// A blob transaction's `max_fee_per_blob_gas` was below the current
    /// blob base fee.
    #[error("max fee per blob gas {actual} is below the current blob base fee {required}")]
    BlobBaseFeeTooLow {
        /// The transaction's blob fee cap.
        actual: u128,
        /// The current blob base fee it was checked against.
        required: u128,
    },
}

impl From<AdmissionError> for AcceptTxResult {
    fn from(error: AdmissionError) -> Self {
        match error {
            AdmissionError::AlreadyKnown => Self::AlreadyKnown,
            AdmissionError::MaxTxSizeExceeded { .. } => Self::MaxTxSizeExceeded,
            // Closest catalog entry: a per-transaction gas cap is a
            // capacity rejection, same family as the pool-wide one
            // (spec.md §6 has no dedicated per-tx-gas-limit id).
            AdmissionError::TxGasLimitExceeded { .. } => Self::GasLimitReached,
            AdmissionError::NonceGap { .. } => Self::NonceTooHigh,
            AdmissionError::BlobPriorityFeeTooLow { .. }
            | AdmissionError::BlobBaseFeeTooLow { .. } => Self::FeeTooLow,
        }
    }
}

/// External context the admission pipeline consults alongside the
/// transaction and its config — values this core does not itself
/// compute (account state, the current blob market, spec.md §1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionContext {
    /// The sender's current on-chain nonce.
    pub current_nonce: u64,
    /// The max nonce gap this sender is allowed to hold pending,
    /// resolved from `cfg.max_pending_txs_per_sender` /
    /// `cfg.max_pending_blob_txs_per_sender` by the caller.
    pub max_pending_gap: u64,
    /// The current blob base fee, when known.
    pub current_blob_base_fee: Option<u128>,
}

/// `precheck_duplicate` (spec.md §4.9): consults the pool's hash cache
/// first, then its typed container; marks the hash known on a first
/// miss so repeat lookups within the same submission are cheap.
pub fn precheck_duplicate<T: PoolTransaction, P: TxPool<Transaction = T> + ?Sized>(
    tx: &T,
    pool: &P,
) -> Result<(), AdmissionError> {
    if pool.is_known(tx.hash()) {
        return Err(AdmissionError::AlreadyKnown);
    }
    if pool.contains_tx(tx.hash(), tx.tx_type()) {
        return Err(AdmissionError::AlreadyKnown);
    }
    pool.mark_known_for_current_scope(tx.hash());
    Ok(())
}

/// `fits_size_limits` (spec.md §4.9): compares the transaction's
/// RLP-encoded wire size against the config's blob or non-blob cap.
pub fn fits_size_limits<T: PoolTransaction>(
    tx: &T,
    cfg: &TxPoolConfig,
) -> Result<(), AdmissionError> {
    let max = cfg.size_limit_for(tx.is_eip4844());
    let actual = tx.encoded_length();
    if actual > max {
        return Err(AdmissionError::MaxTxSizeExceeded { actual, max });
    }
    Ok(())
}

/// `fits_gas_limit` (spec.md §4.9): a no-op unless `cfg.gas_limit` is
/// set.
pub fn fits_gas_limit<T: PoolTransaction>(
    tx: &T,
    cfg: &TxPoolConfig,
) -> Result<(), AdmissionError> {
    if let Some(max) = cfg.gas_limit {
        let actual = tx.gas_limit();
        if actual > max {
            return Err(AdmissionError::TxGasLimitExceeded { actual, max });
        }
    }
    Ok(())
}

/// `enforce_nonce_gap` (spec.md §4.9): accepts when `tx_nonce <=
/// current_nonce`; computes the gap by subtraction (never by wrapping
/// arithmetic) to avoid wraparound near `u64::MAX`.
pub fn enforce_nonce_gap(
    tx_nonce: u64,
    current_nonce: u64,
    max_pending_gap: u64,
) -> Result<(), AdmissionError> {
    if tx_nonce <= current_nonce {
        return Ok(());
    }
    let distance = tx_nonce - current_nonce;
    if distance > max_pending_gap {
        return Err(AdmissionError::NonceGap { distance, allowed: max_pending_gap });
    }
    Ok(())
}

/// `enforce_min_priority_fee_for_blobs` (spec.md §4.9): a no-op for
/// non-blob transactions.
pub fn enforce_min_priority_fee_for_blobs<T: PoolTransaction>(
    tx: &T,
    cfg: &TxPoolConfig,
    current_blob_base_fee: Option<u128>,
) -> Result<(), AdmissionError> {
    if !tx.is_eip4844() {
        return Ok(());
    }

    if cfg.min_blob_tx_priority_fee > 0 {
        let actual = tx.max_priority_fee_per_gas().unwrap_or(0);
        if actual < cfg.min_blob_tx_priority_fee {
            return Err(AdmissionError::BlobPriorityFeeTooLow {
                actual,
                required: cfg.min_blob_tx_priority_fee,
            });
        }
    }

    if cfg.current_blob_base_fee_required {
        if let Some(required) = current_blob_base_fee {
            let actual = tx.max_fee_per_blob_gas().unwrap_or(0);
            if actual < required {
                return Err(AdmissionError::BlobBaseFeeTooLow { actual, required });
            }
        }
    }

    Ok(())
}

/// Runs the full admission pipeline in the documented short-circuit
/// order: duplicate → size → gas → nonce-gap → blob-fee (spec.md §4.9).
pub fn admit<T: PoolTransaction, P: TxPool<Transaction = T> + ?Sized>(
    tx: &T,
    pool: &P,
    cfg: &TxPoolConfig,
    ctx: &AdmissionContext,
) -> AcceptTxResult {
    if let Err(err) = precheck_duplicate(tx, pool) {
        return err.into();
    }
    if let Err(err) = fits_size_limits(tx, cfg) {
        return err.into();
    }
    if let Err(err) = fits_gas_limit(tx, cfg) {
        return err.into();
    }
    if let Err(err) = enforce_nonce_gap(tx.nonce(), ctx.current_nonce, ctx.max_pending_gap) {
        return err.into();
    }
    if let Err(err) = enforce_min_priority_fee_for_blobs(tx, cfg, ctx.current_blob_base_fee) {
        return err.into();
    }
    AcceptTxResult::Accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::InMemoryTxPool;
    use crate::transaction::PooledTransaction;
    use alloy_consensus::{TxEip4844, TxLegacy};
    use alloy_primitives::{Address, Signature, B256};
    use reth_primitives::Transaction;

    fn legacy(nonce: u64, gas_limit: u64, hash: u8) -> PooledTransaction {
        PooledTransaction::new(
            Transaction::Legacy(TxLegacy { nonce, gas_limit, gas_price: 10, ..Default::default() }),
            B256::repeat_byte(hash),
            Address::repeat_byte(0x01),
            Signature::test_signature(),
        )
    }

    fn blob(max_priority: u128, max_fee_per_blob_gas: u128, hash: u8) -> PooledTransaction {
        PooledTransaction::new(
            Transaction::Eip4844(alloy_consensus::transaction::TxEip4844Variant::TxEip4844(
                TxEip4844 { max_priority_fee_per_gas: max_priority, max_fee_per_blob_gas, ..Default::default() },
            )),
            B256::repeat_byte(hash),
            Address::repeat_byte(0x01),
            Signature::test_signature(),
        )
    }

    #[test]
    fn fits_size_limits_rejects_oversized_transaction() {
        let tx = legacy(0, 21_000, 0x01);
        let actual = tx.encoded_length();
        let cfg = TxPoolConfig { max_tx_size: actual - 1, ..Default::default() };

        let err = fits_size_limits(&tx, &cfg).unwrap_err();
        assert!(matches!(
            err,
            AdmissionError::MaxTxSizeExceeded { actual: a, max } if a == actual && max == actual - 1
        ));
    }

    #[test]
    fn fits_size_limits_uses_blob_cap_for_blob_transactions() {
        let cfg = TxPoolConfig { max_tx_size: 1, max_blob_tx_size: Some(1000), ..Default::default() };
        let tx = blob(1, 1, 0x01);
        assert!(fits_size_limits(&tx, &cfg).is_ok());
    }

    #[test]
    fn fits_gas_limit_is_a_no_op_when_unset() {
        let cfg = TxPoolConfig { gas_limit: None, ..Default::default() };
        let tx = legacy(0, u64::MAX, 0x01);
        assert!(fits_gas_limit(&tx, &cfg).is_ok());
    }

    #[test]
    fn fits_gas_limit_rejects_over_cap() {
        let cfg = TxPoolConfig { gas_limit: Some(21_000), ..Default::default() };
        let tx = legacy(0, 30_000, 0x01);
        let err = fits_gas_limit(&tx, &cfg).unwrap_err();
        assert!(matches!(err, AdmissionError::TxGasLimitExceeded { actual: 30_000, max: 21_000 }));
    }

    #[test]
    fn nonce_gap_accepts_at_or_below_current() {
        assert!(enforce_nonce_gap(5, 5, 0).is_ok());
        assert!(enforce_nonce_gap(4, 5, 0).is_ok());
    }

    #[test]
    fn nonce_gap_rejects_beyond_allowed_distance() {
        let err = enforce_nonce_gap(10, 5, 3).unwrap_err();
        assert!(matches!(err, AdmissionError::NonceGap { distance: 5, allowed: 3 }));
    }

    #[test]
    fn nonce_gap_accepts_within_allowed_distance() {
        assert!(enforce_nonce_gap(8, 5, 3).is_ok());
    }

    #[test]
    fn nonce_gap_computes_distance_by_subtraction_never_wraparound() {
        // tx_nonce below current_nonce never triggers a wrapping subtraction.
        assert!(enforce_nonce_gap(0, u64::MAX, 0).is_ok());
    }

    #[test]
    fn blob_fee_checks_are_a_no_op_for_non_blob_transactions() {
        let cfg = TxPoolConfig {
            min_blob_tx_priority_fee: 1000,
            current_blob_base_fee_required: true,
            ..Default::default()
        };
        let tx = legacy(0, 21_000, 0x01);
        assert!(enforce_min_priority_fee_for_blobs(&tx, &cfg, Some(1000)).is_ok());
    }

    #[test]
    fn blob_fee_rejects_below_minimum_priority_fee() {
        let cfg = TxPoolConfig { min_blob_tx_priority_fee: 100, ..Default::default() };
        let tx = blob(50, 1_000_000, 0x01);
        let err = enforce_min_priority_fee_for_blobs(&tx, &cfg, None).unwrap_err();
        assert!(matches!(err, AdmissionError::BlobPriorityFeeTooLow { actual: 50, required: 100 }));
    }

    #[test]
    fn blob_fee_rejects_below_current_blob_base_fee() {
        let cfg = TxPoolConfig { current_blob_base_fee_required: true, ..Default::default() };
        let tx = blob(10, 5, 0x01);
        let err = enforce_min_priority_fee_for_blobs(&tx, &cfg, Some(100)).unwrap_err();
        assert!(matches!(err, AdmissionError::BlobBaseFeeTooLow { actual: 5, required: 100 }));
    }

    #[test]
    fn admit_runs_predicates_in_order_and_short_circuits_on_duplicate() {
        let pool = InMemoryTxPool::<PooledTransaction>::new(TxPoolConfig::default());
        let cfg = TxPoolConfig::default();
        let ctx = AdmissionContext { current_nonce: 0, max_pending_gap: 0, current_blob_base_fee: None };
        let tx = legacy(0, 21_000, 0x01);

        assert_eq!(admit(&tx, &pool, &cfg, &ctx), AcceptTxResult::Accepted);
        // A second, distinct in-memory check against the hash cache: the
        // same hash is now known.
        assert!(pool.is_known(tx.hash()));
    }

    #[test]
    fn admit_rejects_known_hash_before_running_later_predicates() {
        let pool = InMemoryTxPool::<PooledTransaction>::new(TxPoolConfig::default());
        let cfg = TxPoolConfig { gas_limit: Some(1), ..Default::default() };
        let ctx = AdmissionContext { current_nonce: 0, max_pending_gap: 0, current_blob_base_fee: None };
        let tx = legacy(0, 21_000, 0x01);
        pool.mark_known_for_current_scope(tx.hash());

        assert_eq!(admit(&tx, &pool, &cfg, &ctx), AcceptTxResult::AlreadyKnown);
    }
}
