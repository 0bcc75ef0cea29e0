//! `PoolTransaction` (SPEC_FULL.md §2 "C10/C11/C12"): the read-only
//! accessor surface the admission predicates and ordering functions need,
//! generic over the concrete transaction representation the same way
//! `reth_transaction_pool::traits::PoolTransaction` decouples the pool
//! core from `TransactionSigned`.

use alloy_consensus::transaction::TxEip4844Variant;
use alloy_primitives::{Address, Signature, B256};
use alloy_rlp::{length_of_length, Encodable};
use reth_primitives::Transaction;

/// The total encoded size of an RLP list whose payload is
/// `payload_length` bytes: a minimal-byte-count length header plus the
/// payload itself (spec.md §4.9 `rlp_list_len`). `alloy_rlp` is this
/// core's assumed-primitive RLP codec (spec.md §1); this wraps its
/// `length_of_length` rather than hand-rolling varint-length encoding.
fn rlp_list_len(payload_length: usize) -> usize {
    length_of_length(payload_length) + payload_length
}

/// Sums each field's [`Encodable::length`] the same way
/// `TxEip4844::fields_len` does upstream, plus the signature triplet's
/// contribution (spec.md §4.9 "include the signature triplet `(y_parity|v,
/// r, s)`"). The EIP-4844 sidecar (blobs/commitments/proofs) is excluded:
/// `cfg.max_blob_tx_size` is documented as "excluding blobs" (spec.md §6).
fn signed_fields_len(transaction: &Transaction, signature: &Signature) -> usize {
    let body_len = match transaction {
        Transaction::Legacy(tx) => {
            tx.nonce.length()
                + tx.gas_price.length()
                + tx.gas_limit.length()
                + tx.to.length()
                + tx.value.length()
                + tx.input.length()
        }
        Transaction::Eip2930(tx) => {
            tx.chain_id.length()
                + tx.nonce.length()
                + tx.gas_price.length()
                + tx.gas_limit.length()
                + tx.to.length()
                + tx.value.length()
                + tx.input.length()
                + tx.access_list.length()
        }
        Transaction::Eip1559(tx) => {
            tx.chain_id.length()
                + tx.nonce.length()
                + tx.max_priority_fee_per_gas.length()
                + tx.max_fee_per_gas.length()
                + tx.gas_limit.length()
                + tx.to.length()
                + tx.value.length()
                + tx.input.length()
                + tx.access_list.length()
        }
        Transaction::Eip4844(variant) => {
            let tx = match variant {
                TxEip4844Variant::TxEip4844(tx) => tx,
                TxEip4844Variant::TxEip4844WithSidecar(tx) => tx.tx(),
            };
            tx.chain_id.length()
                + tx.nonce.length()
                + tx.max_priority_fee_per_gas.length()
                + tx.max_fee_per_gas.length()
                + tx.gas_limit.length()
                + tx.to.length()
                + tx.value.length()
                + tx.input.length()
                + tx.access_list.length()
                + tx.blob_versioned_hashes.length()
                + tx.max_fee_per_blob_gas.length()
        }
        Transaction::Eip7702(tx) => {
            tx.chain_id.length()
                + tx.nonce.length()
                + tx.max_priority_fee_per_gas.length()
                + tx.max_fee_per_gas.length()
                + tx.gas_limit.length()
                + tx.to.length()
                + tx.value.length()
                + tx.input.length()
                + tx.access_list.length()
                + tx.authorization_list.length()
        }
    };
    body_len + signature.rlp_vrs_len()
}

/// The transaction's total wire-encoded size (spec.md §4.9
/// `fits_size_limits`): `legacy = rlp_list_len(...)`, typed
/// `= 1 + rlp_list_len(...)` for the leading EIP-2718 type byte.
fn rlp_encoded_length(transaction: &Transaction, signature: &Signature) -> usize {
    let list_len = rlp_list_len(signed_fields_len(transaction, signature));
    if transaction.is_typed() { 1 + list_len } else { list_len }
}

/// Everything the admission pipeline (C10) and the fee-market
/// comparator/replacement policy (C11) need to read off a pooled
/// transaction.
///
/// Implementors own the recovered sender and signature: signature
/// *recovery* is an external collaborator this core never performs
/// (spec.md §1 "signature recovery"; §3 "hash... always computed by a
/// trusted helper"), but once recovered, the wire-encoded size that
/// includes that signature is computed here, not supplied from outside.
pub trait PoolTransaction {
    /// The transaction's hash, used for duplicate detection and identity
    /// comparisons (spec.md §4.9, §4.10 "identical references").
    fn hash(&self) -> B256;

    /// The recovered sender, an external input to this core (spec.md
    /// §1 "signature recovery").
    fn sender(&self) -> Address;

    /// The EIP-2718 type tag: `0x00` legacy .. `0x04` EIP-7702.
    fn tx_type(&self) -> u8;

    /// `true` only for the EIP-4844 type.
    fn is_eip4844(&self) -> bool;

    fn nonce(&self) -> u64;

    fn gas_limit(&self) -> u64;

    /// The transaction's total wire-encoded size in bytes, signature
    /// included (spec.md §4.9 `fits_size_limits`).
    fn encoded_length(&self) -> usize;

    /// `Some` only for legacy/EIP-2930 ("legacy-style", spec.md §4.10).
    fn gas_price(&self) -> Option<u128>;

    /// The fee cap used for ordering: `gas_price` for legacy-style
    /// transactions, `max_fee_per_gas` for the dynamic-fee variants.
    fn max_fee_per_gas(&self) -> u128;

    /// `None` for legacy-style transactions.
    fn max_priority_fee_per_gas(&self) -> Option<u128>;

    /// `Some` only for the EIP-4844 variant.
    fn max_fee_per_blob_gas(&self) -> Option<u128>;

    /// Number of blobs carried; `0` for every non-blob variant.
    fn blob_count(&self) -> usize;
}

/// The concrete [`PoolTransaction`] this core carries: a [`Transaction`]
/// bundled with its trusted hash, recovered sender, and recovered
/// signature (spec.md §3 "hash is always computed by a trusted helper").
/// The wire-encoded size is computed once at construction from
/// `transaction` and `signature` (spec.md §4.9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PooledTransaction {
    transaction: Transaction,
    hash: B256,
    sender: Address,
    encoded_length: usize,
}

impl PooledTransaction {
    /// Wraps `transaction` with its already-known hash, recovered sender,
    /// and recovered signature, computing and caching the wire-encoded
    /// length (spec.md §4.9 `fits_size_limits`).
    pub fn new(transaction: Transaction, hash: B256, sender: Address, signature: Signature) -> Self {
        let encoded_length = rlp_encoded_length(&transaction, &signature);
        Self { transaction, hash, sender, encoded_length }
    }

    /// The wrapped transaction.
    pub const fn transaction(&self) -> &Transaction {
        &self.transaction
    }
}

impl PoolTransaction for PooledTransaction {
    fn hash(&self) -> B256 {
        self.hash
    }

    fn sender(&self) -> Address {
        self.sender
    }

    fn tx_type(&self) -> u8 {
        self.transaction.type_id()
    }

    fn is_eip4844(&self) -> bool {
        self.transaction.is_eip4844()
    }

    fn nonce(&self) -> u64 {
        self.transaction.nonce()
    }

    fn gas_limit(&self) -> u64 {
        self.transaction.gas_limit()
    }

    fn encoded_length(&self) -> usize {
        self.encoded_length
    }

    fn gas_price(&self) -> Option<u128> {
        self.transaction.gas_price()
    }

    fn max_fee_per_gas(&self) -> u128 {
        self.transaction.max_fee_per_gas()
    }

    fn max_priority_fee_per_gas(&self) -> Option<u128> {
        self.transaction.max_priority_fee_per_gas()
    }

    fn max_fee_per_blob_gas(&self) -> Option<u128> {
        self.transaction.max_fee_per_blob_gas()
    }

    fn blob_count(&self) -> usize {
        self.transaction.blob_count()
    }
}
