//! Fee-market ordering, replacement, and broadcast policy (C11, spec.md
//! §4.10).

use std::cmp::Ordering;

use alloy_primitives::U256;

use crate::transaction::PoolTransaction;

/// Errors raised while resolving a transaction's effective priority fee
/// against a base fee (spec.md §4.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OrderingError {
    /// A legacy transaction's `gas_price` was below the base fee.
    #[error("gas price {gas_price} is below the base fee {base_fee}")]
    GasPriceBelowBaseFee {
        /// The transaction's gas price.
        gas_price: u128,
        /// The block's base fee.
        base_fee: u128,
    },
    /// A dynamic-fee transaction's `max_fee_per_gas` was below the base
    /// fee.
    #[error("max fee per gas {max_fee} is below the base fee {base_fee}")]
    MaxFeePerGasBelowBaseFee {
        /// The transaction's fee cap.
        max_fee: u128,
        /// The block's base fee.
        base_fee: u128,
    },
    /// A dynamic-fee transaction's tip exceeded its own fee cap.
    #[error("max priority fee {max_priority} exceeds max fee per gas {max_fee}")]
    PriorityFeeGreaterThanMaxFee {
        /// The transaction's requested tip.
        max_priority: u128,
        /// The transaction's fee cap.
        max_fee: u128,
    },
}

/// Resolves the effective priority fee (spec.md §4.10 "Effective
/// priority fee"): `gas_price - base_fee` for legacy, `min(max_priority,
/// max_fee - base_fee)` for the dynamic-fee variants.
pub fn effective_priority_fee<T: PoolTransaction>(
    tx: &T,
    base_fee: u128,
) -> Result<u128, OrderingError> {
    match tx.max_priority_fee_per_gas() {
        None => {
            let gas_price = tx.gas_price().unwrap_or_else(|| tx.max_fee_per_gas());
            if gas_price < base_fee {
                return Err(OrderingError::GasPriceBelowBaseFee { gas_price, base_fee });
            }
            Ok(gas_price - base_fee)
        }
        Some(max_priority) => {
            let max_fee = tx.max_fee_per_gas();
            if max_fee < base_fee {
                return Err(OrderingError::MaxFeePerGasBelowBaseFee { max_fee, base_fee });
            }
            if max_priority > max_fee {
                return Err(OrderingError::PriorityFeeGreaterThanMaxFee { max_priority, max_fee });
            }
            Ok(max_priority.min(max_fee - base_fee))
        }
    }
}

/// `(max_fee, max_priority)` with legacy-style transactions normalized
/// to `max_fee == max_priority == gas_price` (spec.md §4.10 "legacy
/// fields normalized").
fn resolved_fees<T: PoolTransaction>(tx: &T) -> (u128, u128) {
    let max_fee = tx.max_fee_per_gas();
    let max_priority = tx.max_priority_fee_per_gas().unwrap_or(max_fee);
    (max_fee, max_priority)
}

const fn ordering_to_i32(order: Ordering) -> i32 {
    match order {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// `compare_fee_market_priority` (spec.md §4.10): `-1` means "`x` should
/// sort before `y`". When `eip1559_active`, compares the effective gas
/// price `min(max_fee, base_fee + max_priority)`, descending, with ties
/// broken on resolved `max_fee` descending. Otherwise compares
/// `gas_price` descending only.
pub fn compare_fee_market_priority<T: PoolTransaction>(
    x: &T,
    y: &T,
    base_fee: u128,
    eip1559_active: bool,
) -> i32 {
    if eip1559_active {
        let (x_max, x_priority) = resolved_fees(x);
        let (y_max, y_priority) = resolved_fees(y);
        let x_effective = x_max.min(base_fee.saturating_add(x_priority));
        let y_effective = y_max.min(base_fee.saturating_add(y_priority));
        ordering_to_i32(y_effective.cmp(&x_effective).then(y_max.cmp(&x_max)))
    } else {
        let x_price = x.gas_price().unwrap_or_else(|| x.max_fee_per_gas());
        let y_price = y.gas_price().unwrap_or_else(|| y.max_fee_per_gas());
        ordering_to_i32(y_price.cmp(&x_price))
    }
}

/// 10% of `value`, floored (the bump margin both replacement policies
/// use, spec.md §4.10).
const fn ten_percent(value: u128) -> u128 {
    value / 10
}

/// `compare_replaced_transaction_by_fee` (spec.md §4.10): `-1` new
/// replaces old, `+1` keep old, `0` undecided. Identical hashes are
/// always undecided.
pub fn compare_replaced_transaction_by_fee<T: PoolTransaction>(new: &T, old: &T) -> i32 {
    if new.hash() == old.hash() {
        return 0;
    }

    let both_legacy_style = new.max_priority_fee_per_gas().is_none()
        && old.max_priority_fee_per_gas().is_none();

    if both_legacy_style {
        let new_price = new.gas_price().unwrap_or_else(|| new.max_fee_per_gas());
        let old_price = old.gas_price().unwrap_or_else(|| old.max_fee_per_gas());
        let threshold = old_price + ten_percent(old_price);

        return if new_price > threshold {
            -1
        } else if new_price > old_price {
            // A positive but insufficient bump: neither side is decided.
            0
        } else {
            1
        };
    }

    let (new_max, new_priority) = resolved_fees(new);
    let (old_max, old_priority) = resolved_fees(old);
    let meets_max = new_max >= old_max + ten_percent(old_max);
    let meets_priority = new_priority >= old_priority + ten_percent(old_priority);

    if meets_max && meets_priority {
        -1
    } else if new_max > old_max || new_priority > old_priority {
        0
    } else {
        1
    }
}

/// `compare_replaced_blob_transaction_by_fee` (spec.md §4.10): requires
/// the new transaction to carry at least as many blobs and at least
/// double each of `max_fee_per_gas`, `max_priority_fee_per_gas`, and
/// `max_fee_per_blob_gas`.
pub fn compare_replaced_blob_transaction_by_fee<T: PoolTransaction>(new: &T, old: &T) -> i32 {
    if new.hash() == old.hash() {
        return 0;
    }

    let new_blob_fee = new.max_fee_per_blob_gas().unwrap_or(0);
    let old_blob_fee = old.max_fee_per_blob_gas().unwrap_or(0);
    let new_priority = new.max_priority_fee_per_gas().unwrap_or_else(|| new.max_fee_per_gas());
    let old_priority = old.max_priority_fee_per_gas().unwrap_or_else(|| old.max_fee_per_gas());

    let qualifies = new.blob_count() >= old.blob_count()
        && new.max_fee_per_gas() >= old.max_fee_per_gas().saturating_mul(2)
        && new_priority >= old_priority.saturating_mul(2)
        && new_blob_fee >= old_blob_fee.saturating_mul(2);

    if qualifies {
        -1
    } else {
        1
    }
}

/// `calculate_base_fee_threshold` (spec.md §4.10): `floor(base_fee *
/// percent / 100)`, falling back to `floor(base_fee / 100) * percent` on
/// multiplicative overflow, saturating to `U256::MAX` if that still
/// overflows (spec.md §9 "the broadcast threshold fallback path is
/// mandatory").
pub fn calculate_base_fee_threshold(base_fee: U256, percent: u64) -> U256 {
    let percent = U256::from(percent);
    match base_fee.checked_mul(percent) {
        Some(product) => product / U256::from(100),
        None => (base_fee / U256::from(100)).checked_mul(percent).unwrap_or(U256::MAX),
    }
}

/// `calculate_persistent_broadcast_quota` (spec.md §4.10): `min(floor(percent
/// * pool_size / 100) + 1, pool_size)`, zero when either input is zero.
pub fn calculate_persistent_broadcast_quota(pool_size: usize, percent: u64) -> usize {
    if pool_size == 0 || percent == 0 {
        return 0;
    }
    let scaled = (percent as u128 * pool_size as u128) / 100 + 1;
    scaled.min(pool_size as u128) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::PooledTransaction;
    use alloy_consensus::{TxEip1559, TxLegacy};
    use alloy_primitives::{Address, Signature, B256};
    use reth_primitives::Transaction;

    fn legacy(gas_price: u128, hash: u8) -> PooledTransaction {
        PooledTransaction::new(
            Transaction::Legacy(TxLegacy { gas_price, ..Default::default() }),
            B256::repeat_byte(hash),
            Address::ZERO,
            Signature::test_signature(),
        )
    }

    fn dynamic(max_fee: u128, max_priority: u128, hash: u8) -> PooledTransaction {
        PooledTransaction::new(
            Transaction::Eip1559(TxEip1559 {
                max_fee_per_gas: max_fee,
                max_priority_fee_per_gas: max_priority,
                ..Default::default()
            }),
            B256::repeat_byte(hash),
            Address::ZERO,
            Signature::test_signature(),
        )
    }

    #[test]
    fn legacy_effective_priority_fee_rejects_below_base_fee() {
        let tx = legacy(50, 0x01);
        let err = effective_priority_fee(&tx, 100).unwrap_err();
        assert!(matches!(err, OrderingError::GasPriceBelowBaseFee { gas_price: 50, base_fee: 100 }));
    }

    #[test]
    fn legacy_effective_priority_fee_is_gas_price_minus_base_fee() {
        let tx = legacy(150, 0x01);
        assert_eq!(effective_priority_fee(&tx, 100).unwrap(), 50);
    }

    #[test]
    fn dynamic_effective_priority_fee_caps_at_max_fee_minus_base_fee() {
        let tx = dynamic(150, 100, 0x01);
        assert_eq!(effective_priority_fee(&tx, 100).unwrap(), 50);
    }

    #[test]
    fn dynamic_effective_priority_fee_rejects_priority_above_max_fee() {
        let tx = dynamic(100, 150, 0x01);
        let err = effective_priority_fee(&tx, 10).unwrap_err();
        assert!(matches!(err, OrderingError::PriorityFeeGreaterThanMaxFee { .. }));
    }

    /// spec.md §8: comparator is antisymmetric and zero iff both sides
    /// resolve equal.
    #[test]
    fn fee_market_comparator_is_antisymmetric() {
        let x = dynamic(200, 50, 0x01);
        let y = dynamic(150, 100, 0x02);
        let base_fee = 100;
        assert_eq!(
            compare_fee_market_priority(&x, &y, base_fee, true),
            -compare_fee_market_priority(&y, &x, base_fee, true)
        );
    }

    #[test]
    fn fee_market_comparator_zero_when_both_sides_equal() {
        let x = dynamic(200, 50, 0x01);
        let y = dynamic(200, 50, 0x02);
        assert_eq!(compare_fee_market_priority(&x, &y, 100, true), 0);
    }

    #[test]
    fn fee_market_comparator_falls_back_to_gas_price_when_inactive() {
        let x = legacy(200, 0x01);
        let y = legacy(100, 0x02);
        assert_eq!(compare_fee_market_priority(&x, &y, 0, false), -1);
    }

    /// spec.md §8 scenario 5: old gas_price = 100.
    #[test]
    fn legacy_replacement_requires_strictly_more_than_a_ten_percent_bump() {
        let old = legacy(100, 0x01);
        let undecided = legacy(110, 0x02);
        let replaces = legacy(111, 0x03);

        assert_eq!(compare_replaced_transaction_by_fee(&undecided, &old), 0);
        assert_eq!(compare_replaced_transaction_by_fee(&replaces, &old), -1);
    }

    #[test]
    fn legacy_replacement_keeps_old_when_new_fee_is_not_higher() {
        let old = legacy(100, 0x01);
        let lower = legacy(90, 0x02);
        assert_eq!(compare_replaced_transaction_by_fee(&lower, &old), 1);
    }

    #[test]
    fn identical_hash_is_always_undecided() {
        let tx = legacy(100, 0x01);
        assert_eq!(compare_replaced_transaction_by_fee(&tx, &tx), 0);
    }

    #[test]
    fn dynamic_replacement_requires_both_fee_and_priority_bumped_ten_percent() {
        let old = dynamic(100, 50, 0x01);
        let insufficient = dynamic(109, 54, 0x02);
        let sufficient = dynamic(110, 55, 0x03);

        assert_eq!(compare_replaced_transaction_by_fee(&insufficient, &old), 0);
        assert_eq!(compare_replaced_transaction_by_fee(&sufficient, &old), -1);
    }

    fn blob_tx(max_fee: u128, max_priority: u128, blob_fee: u128, hash: u8) -> PooledTransaction {
        PooledTransaction::new(
            Transaction::Eip4844(alloy_consensus::transaction::TxEip4844Variant::TxEip4844(
                alloy_consensus::TxEip4844 {
                    max_fee_per_gas: max_fee,
                    max_priority_fee_per_gas: max_priority,
                    max_fee_per_blob_gas: blob_fee,
                    blob_versioned_hashes: vec![B256::ZERO],
                    ..Default::default()
                },
            )),
            B256::repeat_byte(hash),
            Address::ZERO,
            Signature::test_signature(),
        )
    }

    #[test]
    fn blob_replacement_requires_doubling_every_fee() {
        let old = blob_tx(100, 10, 5, 0x01);
        let insufficient = blob_tx(199, 20, 10, 0x02);
        let sufficient = blob_tx(200, 20, 10, 0x03);

        assert_eq!(compare_replaced_blob_transaction_by_fee(&insufficient, &old), 1);
        assert_eq!(compare_replaced_blob_transaction_by_fee(&sufficient, &old), -1);
    }

    #[test]
    fn base_fee_threshold_computes_floor_percentage() {
        assert_eq!(calculate_base_fee_threshold(U256::from(1000), 70), U256::from(700));
    }

    #[test]
    fn base_fee_threshold_falls_back_on_multiplicative_overflow() {
        let base_fee = U256::MAX - U256::from(1);
        let threshold = calculate_base_fee_threshold(base_fee, 50);
        assert_eq!(threshold, (base_fee / U256::from(100)) * U256::from(50));
    }

    /// spec.md §8: `calculate_persistent_broadcast_quota(n, p) <= n`.
    #[test]
    fn broadcast_quota_never_exceeds_pool_size() {
        for pool_size in [0usize, 1, 10, 1000] {
            for percent in [0u64, 1, 50, 99, 100, 200] {
                assert!(calculate_persistent_broadcast_quota(pool_size, percent) <= pool_size);
            }
        }
    }

    #[test]
    fn broadcast_quota_is_zero_when_either_input_is_zero() {
        assert_eq!(calculate_persistent_broadcast_quota(0, 50), 0);
        assert_eq!(calculate_persistent_broadcast_quota(100, 0), 0);
    }
}
