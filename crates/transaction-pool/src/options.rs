//! `TxHandlingOptions` (C12, spec.md §4.11): a closed-domain bitflag set
//! callers pass alongside a transaction to `TxPool::submit_tx`.

bitflags::bitflags! {
    /// Flags modifying how `submit_tx` handles a single transaction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TxHandlingOptions: u8 {
        /// The pool, not the caller, assigns the transaction's nonce.
        const MANAGED_NONCE = 0b0001;
        /// Announce this transaction persistently to peers regardless of
        /// the broadcast quota (spec.md §4.10).
        const PERSISTENT_BROADCAST = 0b0010;
        /// The transaction was signed without EIP-155 chain-id
        /// replay protection.
        const PRE_EIP155_SIGNING = 0b0100;
        /// Allow a replacement to change only the signature, keeping
        /// every fee field identical.
        const ALLOW_REPLACING_SIGNATURE = 0b1000;
    }
}

impl TxHandlingOptions {
    /// Builds from raw bits, rejecting any bit outside this type's
    /// domain (spec.md §4.11 "any bit outside this domain is rejected").
    pub const fn from_bits_checked(bits: u8) -> Option<Self> {
        Self::from_bits(bits)
    }

    /// Masks out any bit outside this type's domain instead of
    /// rejecting (spec.md §4.11 `sanitize`).
    pub const fn sanitize(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }

    /// `true` iff `self` holds no bits outside this type's domain and
    /// contains `flag`. A value built by bypassing validation (so it
    /// carries unknown bits) reports `false` for every flag — a closed
    /// domain (spec.md §4.11 "`has` on an invalid value returns false").
    pub const fn has(self, flag: Self) -> bool {
        if Self::from_bits(self.bits()).is_none() {
            return false;
        }
        self.contains(flag)
    }
}
