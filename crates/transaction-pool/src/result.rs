//! `AcceptTxResult`, the catalog of semantic admission outcomes (spec.md
//! §6): the sole surface `TxPool::submit_tx` returns (C12, spec.md §4.9),
//! matched by external observers on a stable `(id, code)` pair rather than
//! the Rust variant name.

/// The outcome of attempting to admit a transaction into the pool.
///
/// Only [`Self::Accepted`] means the transaction was admitted; every
/// other variant is a rejection carrying a stable numeric id and string
/// code, for parity with external observers (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptTxResult {
    /// The transaction was admitted.
    Accepted,
    /// An identical `(hash, type)` pair was already known to the pool
    /// (spec.md §4.9 `precheck_duplicate`).
    AlreadyKnown,
    /// The transaction's sender could not be resolved (signature
    /// recovery is external to this core, spec.md §1).
    FailedToResolveSender,
    /// The transaction's fee does not clear the pool's current floor.
    FeeTooLow,
    /// The transaction's fee is too low to outcompete the transaction it
    /// would have to replace.
    FeeTooLowToCompete,
    /// The pool has reached its configured size limit.
    GasLimitReached,
    /// The sender's balance cannot cover the transaction's cost.
    InsufficientFunds,
    /// A fee field overflowed the 256-bit integer domain.
    Int256Overflow,
    /// The transaction failed structural validation.
    Invalid,
    /// `tx_nonce - current_nonce` exceeded the sender's allowed pending
    /// gap (spec.md §4.9 `enforce_nonce_gap`, `NonceGap`).
    NonceTooHigh,
    /// `tx_nonce` is at or below an already-included nonce.
    NonceTooLow,
    /// A replacement transaction did not meet the bump requirement
    /// (spec.md §4.10 `compare_replaced_transaction_by_fee`).
    ReplacementNotAllowed,
    /// The sender account is a contract, not an externally owned account.
    SenderNotAnEoa,
    /// `tx_nonce` is far enough ahead of `current_nonce` to be rejected
    /// outright rather than queued.
    NonceTooFarInFuture,
    /// The sender already has a pending transaction of a conflicting
    /// type (e.g. a blob transaction alongside a non-blob one).
    PendingTxsOfConflictingType,
    /// The pool does not support this transaction type.
    NotSupportedTxType,
    /// The transaction's RLP-encoded size exceeds the configured cap
    /// (spec.md §4.9 `fits_size_limits`, non-blob or blob).
    MaxTxSizeExceeded,
    /// An EIP-7702 delegation transaction did not match the delegator's
    /// current nonce.
    NotCurrentNonceForDelegation,
    /// The delegator already has a pending transaction.
    DelegatorHasPendingTx,
    /// The node is still syncing and `accept_tx_when_not_synced` is
    /// `false`.
    Syncing,
}

impl AcceptTxResult {
    /// The stable numeric id (spec.md §6 catalog).
    pub const fn id(self) -> u32 {
        match self {
            Self::Accepted => 0,
            Self::AlreadyKnown => 1,
            Self::FailedToResolveSender => 2,
            Self::FeeTooLow => 3,
            Self::FeeTooLowToCompete => 4,
            Self::GasLimitReached => 5,
            Self::InsufficientFunds => 6,
            Self::Int256Overflow => 7,
            Self::Invalid => 8,
            Self::NonceTooHigh => 9,
            Self::NonceTooLow => 10,
            Self::ReplacementNotAllowed => 11,
            Self::SenderNotAnEoa => 12,
            Self::NonceTooFarInFuture => 13,
            Self::PendingTxsOfConflictingType => 14,
            Self::NotSupportedTxType => 15,
            Self::MaxTxSizeExceeded => 16,
            Self::NotCurrentNonceForDelegation => 17,
            Self::DelegatorHasPendingTx => 18,
            Self::Syncing => 503,
        }
    }

    /// The stable string code (spec.md §6 catalog).
    pub const fn code(self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::AlreadyKnown => "AlreadyKnown",
            Self::FailedToResolveSender => "FailedToResolveSender",
            Self::FeeTooLow => "FeeTooLow",
            Self::FeeTooLowToCompete => "FeeTooLowToCompete",
            Self::GasLimitReached => "gas limit reached",
            Self::InsufficientFunds => "InsufficientFunds",
            Self::Int256Overflow => "Int256Overflow",
            Self::Invalid => "Invalid",
            Self::NonceTooHigh => "nonce too high",
            Self::NonceTooLow => "nonce too low",
            Self::ReplacementNotAllowed => "ReplacementNotAllowed",
            Self::SenderNotAnEoa => "sender not an eoa",
            Self::NonceTooFarInFuture => "NonceTooFarInFuture",
            Self::PendingTxsOfConflictingType => "PendingTxsOfConflictingType",
            Self::NotSupportedTxType => "NotSupportedTxType",
            Self::MaxTxSizeExceeded => "MaxTxSizeExceeded",
            Self::NotCurrentNonceForDelegation => "NotCurrentNonceForDelegation",
            Self::DelegatorHasPendingTx => "DelegatorHasPendingTx",
            Self::Syncing => "Syncing",
        }
    }

    /// `true` only for [`Self::Accepted`]; callers compare `id ==
    /// Accepted.id` per spec.md §7, this is the ergonomic equivalent.
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}
