//! Trait surface and error type for header validation (C5, spec.md §4.4).
//!
//! `reth-consensus-common` provides the concrete post-merge rule set; this
//! crate exists so callers (the block tree, the beacon consensus manager,
//! tests) can depend on the trait without pulling in the implementation —
//! the same split `reth-blockchain-tree-api`/`reth-blockchain-tree` uses.

use alloy_primitives::U256;
use reth_primitives::Header;
use reth_primitives_traits::BlockHash;

/// A single failed field check, carrying enough detail for telemetry and
/// RPC error passthrough (spec.md §7 "Header validator").
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid header field `{field}`: {message} (expected {expected}, got {actual})")]
pub struct HeaderValidationError {
    /// Name of the field that failed, e.g. `"baseFeePerGas"`.
    pub field: &'static str,
    /// Human-readable description of the rule that failed.
    pub message: String,
    /// The value the rule required.
    pub expected: String,
    /// The value actually observed.
    pub actual: String,
}

impl HeaderValidationError {
    /// Builds an error from display-able expected/actual values.
    pub fn new(
        field: &'static str,
        message: impl Into<String>,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Self {
            field,
            message: message.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Validates a header against its parent (C5, spec.md §4.4). Implementors
/// perform no I/O: both headers, and the parent's trusted hash, are
/// supplied by the caller (the block tree, which already has them on
/// hand) — the hash is never recomputed from the parent's RLP encoding
/// (spec.md §3's "hash ... always computed by a trusted helper").
#[auto_impl::auto_impl(&, Arc)]
pub trait HeaderValidator: Send + Sync {
    /// Validates `header` against `parent` (whose trusted hash is
    /// `parent_hash`), returning every rule that failed. An empty `Ok(())`
    /// means the header is valid.
    fn validate_against_parent(
        &self,
        header: &Header,
        parent: &Header,
        parent_hash: BlockHash,
    ) -> Result<(), Vec<HeaderValidationError>>;
}

/// Convenience alias matching the yellow-paper habit of carrying gas
/// quantities as `U256` at 256-bit-arithmetic boundaries (spec.md §4.4
/// "all integer arithmetic is on 256-bit unsigned values").
pub type Gas = U256;
