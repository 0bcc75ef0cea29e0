use reth_primitives_traits::{BlockHash, Sealed};

/// The execution-layer block header (spec.md §3).
///
/// This core never re-derives header RLP encoding or field semantics from
/// scratch: [`alloy_consensus::Header`] already carries every field spec.md
/// names (`parent_hash`, `ommers_hash`, `beneficiary`, `state_root`,
/// `transactions_root`, `receipts_root`, `logs_bloom`, `difficulty`,
/// `number`, `gas_limit`, `gas_used`, `timestamp`, `extra_data`, `mix_hash`,
/// `nonce`, `base_fee_per_gas`, `blob_gas_used`, `excess_blob_gas`,
/// `parent_beacon_block_root`) along with its RLP `Encodable`/`Decodable`
/// impls, so the block tree and consensus crates build directly on it.
pub type Header = alloy_consensus::Header;

/// A [`Header`] bundled with its trusted Keccak-256 hash.
///
/// The hash is never recomputed here (see [`Sealed`]); it is established by
/// a trusted boundary outside this core's scope (block decoding / import).
pub type SealedHeader = Sealed<Header>;

/// Convenience accessor, mirroring the teacher's `SealedHeader::hash()` habit.
pub fn sealed_header_hash(header: &SealedHeader) -> BlockHash {
    header.hash()
}
