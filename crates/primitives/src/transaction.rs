use alloy_consensus::{TxEip1559, TxEip2930, TxEip7702, TxLegacy, transaction::TxEip4844Variant};
use alloy_primitives::B256;

/// The five transaction shapes the pool and wire layers reason about
/// (spec.md §3). Unlike [`alloy_consensus::TxEnvelope`] this union carries
/// no signature — signature recovery is explicitly out of this core's scope
/// (spec.md §1) and is assumed to have already happened by the time a
/// transaction reaches the pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Pre-EIP-2718 transaction with a single `gas_price`.
    Legacy(TxLegacy),
    /// EIP-2930 transaction carrying an access list.
    Eip2930(TxEip2930),
    /// EIP-1559 dynamic-fee transaction.
    Eip1559(TxEip1559),
    /// EIP-4844 blob-carrying transaction, with or without its sidecar.
    Eip4844(TxEip4844Variant),
    /// EIP-7702 transaction carrying an authorization list.
    Eip7702(TxEip7702),
}

/// A byte that does not correspond to any of the five known type tags.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("unsupported transaction type tag 0x{0:02x}")]
pub struct TransactionError(pub u8);

impl Transaction {
    /// The EIP-2718 type tag: `0x00` legacy, `0x01`..`0x04` typed.
    pub const fn type_id(&self) -> u8 {
        match self {
            Self::Legacy(_) => 0x00,
            Self::Eip2930(_) => 0x01,
            Self::Eip1559(_) => 0x02,
            Self::Eip4844(_) => 0x03,
            Self::Eip7702(_) => 0x04,
        }
    }

    /// `true` for every variant but [`Transaction::Legacy`].
    pub const fn is_typed(&self) -> bool {
        !matches!(self, Self::Legacy(_))
    }

    /// `true` only for the blob-carrying variant.
    pub const fn is_eip4844(&self) -> bool {
        matches!(self, Self::Eip4844(_))
    }

    pub const fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.nonce,
            Self::Eip2930(tx) => tx.nonce,
            Self::Eip1559(tx) => tx.nonce,
            Self::Eip4844(TxEip4844Variant::TxEip4844(tx)) => tx.nonce,
            Self::Eip4844(TxEip4844Variant::TxEip4844WithSidecar(tx)) => tx.tx.nonce,
            Self::Eip7702(tx) => tx.nonce,
        }
    }

    pub const fn gas_limit(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.gas_limit,
            Self::Eip2930(tx) => tx.gas_limit,
            Self::Eip1559(tx) => tx.gas_limit,
            Self::Eip4844(TxEip4844Variant::TxEip4844(tx)) => tx.gas_limit,
            Self::Eip4844(TxEip4844Variant::TxEip4844WithSidecar(tx)) => tx.tx.gas_limit,
            Self::Eip7702(tx) => tx.gas_limit,
        }
    }

    /// `Some` only for the legacy and EIP-2930 variants, which have no
    /// separate fee cap / tip split (spec.md §4.10's "legacy-style" branch).
    pub const fn gas_price(&self) -> Option<u128> {
        match self {
            Self::Legacy(tx) => Some(tx.gas_price),
            Self::Eip2930(tx) => Some(tx.gas_price),
            _ => None,
        }
    }

    /// The fee cap used for ordering: `gas_price` for legacy-style
    /// transactions, `max_fee_per_gas` for the dynamic-fee variants.
    pub const fn max_fee_per_gas(&self) -> u128 {
        match self {
            Self::Legacy(tx) => tx.gas_price,
            Self::Eip2930(tx) => tx.gas_price,
            Self::Eip1559(tx) => tx.max_fee_per_gas,
            Self::Eip4844(TxEip4844Variant::TxEip4844(tx)) => tx.max_fee_per_gas,
            Self::Eip4844(TxEip4844Variant::TxEip4844WithSidecar(tx)) => tx.tx.max_fee_per_gas,
            Self::Eip7702(tx) => tx.max_fee_per_gas,
        }
    }

    /// `None` for legacy-style transactions, which have no separate tip.
    pub const fn max_priority_fee_per_gas(&self) -> Option<u128> {
        match self {
            Self::Legacy(_) | Self::Eip2930(_) => None,
            Self::Eip1559(tx) => Some(tx.max_priority_fee_per_gas),
            Self::Eip4844(TxEip4844Variant::TxEip4844(tx)) => Some(tx.max_priority_fee_per_gas),
            Self::Eip4844(TxEip4844Variant::TxEip4844WithSidecar(tx)) => {
                Some(tx.tx.max_priority_fee_per_gas)
            }
            Self::Eip7702(tx) => Some(tx.max_priority_fee_per_gas),
        }
    }

    /// Only the EIP-4844 variant carries a blob fee cap.
    pub const fn max_fee_per_blob_gas(&self) -> Option<u128> {
        match self {
            Self::Eip4844(TxEip4844Variant::TxEip4844(tx)) => Some(tx.max_fee_per_blob_gas),
            Self::Eip4844(TxEip4844Variant::TxEip4844WithSidecar(tx)) => {
                Some(tx.tx.max_fee_per_blob_gas)
            }
            _ => None,
        }
    }

    /// Only the EIP-4844 variant carries blob versioned hashes.
    pub fn blob_versioned_hashes(&self) -> Option<&[B256]> {
        match self {
            Self::Eip4844(TxEip4844Variant::TxEip4844(tx)) => {
                Some(tx.blob_versioned_hashes.as_slice())
            }
            Self::Eip4844(TxEip4844Variant::TxEip4844WithSidecar(tx)) => {
                Some(tx.tx.blob_versioned_hashes.as_slice())
            }
            _ => None,
        }
    }

    /// Number of blobs carried, `0` for every non-blob variant.
    pub fn blob_count(&self) -> usize {
        self.blob_versioned_hashes().map_or(0, <[B256]>::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_with_gas_price(gas_price: u128) -> Transaction {
        Transaction::Legacy(TxLegacy { gas_price, ..Default::default() })
    }

    fn eip1559_with_fees(max_fee: u128, max_priority: u128) -> Transaction {
        Transaction::Eip1559(TxEip1559 {
            max_fee_per_gas: max_fee,
            max_priority_fee_per_gas: max_priority,
            ..Default::default()
        })
    }

    #[test]
    fn legacy_has_no_priority_fee() {
        let tx = legacy_with_gas_price(100);
        assert_eq!(tx.type_id(), 0x00);
        assert_eq!(tx.gas_price(), Some(100));
        assert_eq!(tx.max_fee_per_gas(), 100);
        assert_eq!(tx.max_priority_fee_per_gas(), None);
        assert!(!tx.is_typed());
    }

    #[test]
    fn eip1559_exposes_fee_cap_and_tip() {
        let tx = eip1559_with_fees(200, 10);
        assert_eq!(tx.type_id(), 0x02);
        assert_eq!(tx.gas_price(), None);
        assert_eq!(tx.max_fee_per_gas(), 200);
        assert_eq!(tx.max_priority_fee_per_gas(), Some(10));
        assert!(tx.is_typed());
        assert!(!tx.is_eip4844());
    }

    #[test]
    fn non_blob_variants_report_zero_blobs() {
        let tx = eip1559_with_fees(1, 1);
        assert_eq!(tx.blob_count(), 0);
        assert_eq!(tx.blob_versioned_hashes(), None);
    }
}
