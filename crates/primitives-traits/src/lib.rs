//! Common primitive types shared across the execution-layer core.
//!
//! Hashes are always treated as trusted, externally-computed identifiers:
//! nothing in this crate recomputes a block or header hash from its RLP
//! encoding. [`Sealed`] is the wrapper that carries a value alongside its
//! already-known hash.

mod sealed;
mod size;

pub use sealed::Sealed;
pub use size::InMemorySize;

use alloy_primitives::B256;

/// A block number in the canonical chain.
pub type BlockNumber = u64;

/// The 32-byte Keccak-256 hash identifying a block or header.
pub type BlockHash = B256;

/// The well-known empty-list RLP hash `keccak256(rlp([]))`, used as the
/// `ommers_hash` of every post-merge header (spec.md §4.4).
pub const EMPTY_OMMER_ROOT_HASH: B256 = alloy_consensus::constants::EMPTY_OMMER_ROOT_HASH;

/// The all-zero hash used as the parent hash of genesis (spec.md §4.6, I5).
pub const ZERO_HASH: B256 = B256::ZERO;
