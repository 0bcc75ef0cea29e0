use reth_primitives_traits::{InMemorySize, Sealed};

use crate::{Header, Transaction};

/// The transaction/ommer/withdrawal payload of a block, keyed by the same
/// [`Header`] type the block tree stores (spec.md §3's `body` component of
/// the `Block` tuple).
pub type BlockBody = alloy_consensus::BlockBody<Transaction, Header>;

/// `(header, body)` pair, matching the `Block` tuple of spec.md §3 minus the
/// trusted `hash`/`size` fields, which [`SealedBlock`] adds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The block's header.
    pub header: Header,
    /// Transactions, ommer headers, and withdrawals.
    pub body: BlockBody,
}

impl Block {
    /// A block with the given header and an empty body (no transactions,
    /// ommers, or withdrawals).
    pub fn empty(header: Header) -> Self {
        Self {
            header,
            body: BlockBody { transactions: Vec::new(), ommers: Vec::new(), withdrawals: None },
        }
    }
}

impl InMemorySize for Block {
    fn size(&self) -> usize {
        // Approximate: the fixed header plus one pointer-sized unit per
        // transaction and ommer, matching the accounting style of
        // reth_primitives_traits's `InMemorySize` impls (exactness isn't
        // the goal — pool/tree capacity bookkeeping is, spec.md §1).
        std::mem::size_of::<Header>()
            + self.body.transactions.len() * std::mem::size_of::<Transaction>()
            + self.body.ommers.len() * std::mem::size_of::<Header>()
    }
}

/// A [`Block`] together with its trusted hash and precomputed
/// [`InMemorySize`], as spec.md §3's `Block = (header, body, hash, size)`.
///
/// The hash is never recomputed by this core (see [`Sealed`]); it is
/// established by a trusted boundary (block decoding / import) outside this
/// crate's scope.
pub type SealedBlock = Sealed<Block>;

/// The size recorded at seal time, the `size` field of spec.md §3's tuple.
pub fn sealed_block_size(block: &SealedBlock) -> usize {
    block.value().size()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;

    #[test]
    fn sealed_block_keeps_trusted_hash_and_exposes_size() {
        let block = Block::empty(Header { number: 5, ..Default::default() });
        let hash = B256::repeat_byte(0x22);
        let sealed = SealedBlock::new_unchecked(block, hash);

        assert_eq!(sealed.hash(), hash);
        assert_eq!(sealed.value().header.number, 5);
        assert!(sealed_block_size(&sealed) >= std::mem::size_of::<Header>());
    }

    #[test]
    fn empty_body_has_no_transactions_or_ommers() {
        let block = Block::empty(Header::default());
        assert!(block.body.transactions.is_empty());
        assert!(block.body.ommers.is_empty());
    }
}
