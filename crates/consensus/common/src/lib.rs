//! Post-merge header consensus rules (C5, spec.md §4.4): number
//! contiguity, gas-used/gas-limit bound, the gas-limit adjustment window,
//! EIP-1559 base-fee recomputation, EIP-4844 excess-blob-gas
//! recomputation, timestamp monotonicity, extra-data length, the
//! post-merge difficulty/nonce/ommers-hash triad, and parent-hash
//! linkage.
//!
//! Grounded on `reth_consensus_common`'s real job in the teacher repo:
//! exactly this rule set, gated here by [`ReleaseSpec`] rather than a
//! hardcoded fork-activation table (spec.md §1 non-goals).

use alloy_primitives::{B64, U256};
use reth_chainspec::ReleaseSpec;
use reth_consensus::{HeaderValidationError, HeaderValidator};
use reth_primitives::Header;
use reth_primitives_traits::{BlockHash, EMPTY_OMMER_ROOT_HASH};

/// `parent.gas_limit / GAS_LIMIT_BOUND_DIVISOR` bounds how much the gas
/// limit may move between two adjacent blocks.
const GAS_LIMIT_BOUND_DIVISOR: u128 = 1024;

/// The protocol-wide floor on `gas_limit`.
const MINIMUM_GAS_LIMIT: u128 = 5_000;

/// EIP-1559's `BASE_FEE_MAX_CHANGE_DENOMINATOR`.
const BASE_FEE_MAX_CHANGE_DENOMINATOR: u128 = 8;

/// The excess-blob-gas subtraction constant used by this core's
/// EIP-4844 recomputation (spec.md §4.4).
const EXCESS_BLOB_GAS_TARGET: u128 = 786_432;

/// Validates headers against the post-merge rule set, gating the
/// EIP-1559 and EIP-4844 checks on the capabilities `S` reports active
/// (spec.md §9 "Service injection").
#[derive(Debug, Clone)]
pub struct PostMergeHeaderValidator<S> {
    spec: S,
}

impl<S: ReleaseSpec> PostMergeHeaderValidator<S> {
    /// Builds a validator that consults `spec` for fork activation.
    pub const fn new(spec: S) -> Self {
        Self { spec }
    }
}

impl<S: ReleaseSpec> HeaderValidator for PostMergeHeaderValidator<S> {
    fn validate_against_parent(
        &self,
        header: &Header,
        parent: &Header,
        parent_hash: BlockHash,
    ) -> Result<(), Vec<HeaderValidationError>> {
        let mut errors = Vec::new();

        if header.number == 0 || header.number != parent.number + 1 {
            errors.push(HeaderValidationError::new(
                "number",
                "must be parent.number + 1 and nonzero",
                parent.number + 1,
                header.number,
            ));
        }

        if header.gas_used > header.gas_limit {
            errors.push(HeaderValidationError::new(
                "gasUsed",
                "must not exceed gasLimit",
                header.gas_limit,
                header.gas_used,
            ));
        }

        if let Err(e) = validate_gas_limit_adjustment(header, parent) {
            errors.push(e);
        }

        if self.spec.is_london_active(header.number) {
            if let Err(e) = validate_base_fee(header, parent) {
                errors.push(e);
            }
        }

        if self.spec.is_cancun_active(header.number, header.timestamp) {
            if let Err(e) = validate_excess_blob_gas(header, parent) {
                errors.push(e);
            }
        }

        if header.timestamp <= parent.timestamp {
            errors.push(HeaderValidationError::new(
                "timestamp",
                "must be strictly greater than parent.timestamp",
                format!("> {}", parent.timestamp),
                header.timestamp,
            ));
        }

        if header.extra_data.len() > 32 {
            errors.push(HeaderValidationError::new(
                "extraData",
                "must be at most 32 bytes",
                "<= 32",
                header.extra_data.len(),
            ));
        }

        if header.difficulty != U256::ZERO {
            errors.push(HeaderValidationError::new(
                "difficulty",
                "must be zero post-merge",
                U256::ZERO,
                header.difficulty,
            ));
        }

        if header.nonce != B64::ZERO {
            errors.push(HeaderValidationError::new(
                "nonce",
                "must be zero post-merge",
                B64::ZERO,
                header.nonce,
            ));
        }

        if header.ommers_hash != EMPTY_OMMER_ROOT_HASH {
            errors.push(HeaderValidationError::new(
                "ommersHash",
                "must be keccak256(rlp([])) post-merge",
                EMPTY_OMMER_ROOT_HASH,
                header.ommers_hash,
            ));
        }

        if header.parent_hash != parent_hash {
            errors.push(HeaderValidationError::new(
                "parentHash",
                "must equal the parent's trusted hash",
                parent_hash,
                header.parent_hash,
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn validate_gas_limit_adjustment(
    header: &Header,
    parent: &Header,
) -> Result<(), HeaderValidationError> {
    let bound = u128::from(parent.gas_limit) / GAS_LIMIT_BOUND_DIVISOR;
    let diff = u128::from(header.gas_limit.abs_diff(parent.gas_limit));

    if diff >= bound || u128::from(header.gas_limit) < MINIMUM_GAS_LIMIT {
        return Err(HeaderValidationError::new(
            "gasLimit",
            "must move by less than parent.gasLimit / 1024 and be at least 5000",
            format!("within {bound} of {}, >= {MINIMUM_GAS_LIMIT}", parent.gas_limit),
            header.gas_limit,
        ));
    }
    Ok(())
}

/// `a * b / c`, carried out in [`U256`] so that `a * b` never overflows
/// the native `u128` multiplication (spec.md §4.4, §9 "bignum
/// arithmetic"), floored and converted back to `u128`.
fn mul_div_floor(a: u128, b: u128, c: u128) -> u128 {
    let product = U256::from(a) * U256::from(b);
    let quotient = product / U256::from(c);
    quotient.saturating_to()
}

fn expected_base_fee(parent: &Header) -> Option<u128> {
    let parent_base_fee = u128::from(parent.base_fee_per_gas?);
    let parent_target = u128::from(parent.gas_limit) / 2;
    if parent_target == 0 {
        return Some(parent_base_fee);
    }
    let parent_gas_used = u128::from(parent.gas_used);

    Some(match parent_gas_used.cmp(&parent_target) {
        std::cmp::Ordering::Equal => parent_base_fee,
        std::cmp::Ordering::Greater => {
            let delta = mul_div_floor(
                parent_base_fee,
                parent_gas_used - parent_target,
                parent_target,
            ) / BASE_FEE_MAX_CHANGE_DENOMINATOR;
            parent_base_fee + delta.max(1)
        }
        std::cmp::Ordering::Less => {
            let delta = mul_div_floor(
                parent_base_fee,
                parent_target - parent_gas_used,
                parent_target,
            ) / BASE_FEE_MAX_CHANGE_DENOMINATOR;
            parent_base_fee.saturating_sub(delta)
        }
    })
}

fn validate_base_fee(header: &Header, parent: &Header) -> Result<(), HeaderValidationError> {
    let Some(expected) = expected_base_fee(parent) else {
        // Parent carries no base fee (pre-London); nothing to check yet.
        return Ok(());
    };
    let actual = header.base_fee_per_gas.ok_or_else(|| {
        HeaderValidationError::new("baseFeePerGas", "must be present once London is active", expected, "<missing>")
    })?;
    let actual = u128::from(actual);

    if actual != expected {
        return Err(HeaderValidationError::new(
            "baseFeePerGas",
            "must match the EIP-1559 recomputation from the parent",
            expected,
            actual,
        ));
    }
    Ok(())
}

fn validate_excess_blob_gas(header: &Header, parent: &Header) -> Result<(), HeaderValidationError> {
    let (Some(parent_excess), Some(parent_blob_used)) =
        (parent.excess_blob_gas, parent.blob_gas_used)
    else {
        return Ok(());
    };
    let expected = (u128::from(parent_excess) + u128::from(parent_blob_used))
        .saturating_sub(EXCESS_BLOB_GAS_TARGET);

    let actual = header.excess_blob_gas.ok_or_else(|| {
        HeaderValidationError::new(
            "excessBlobGas",
            "must be present once Cancun is active",
            expected,
            "<missing>",
        )
    })?;
    let actual = u128::from(actual);

    if actual != expected {
        return Err(HeaderValidationError::new(
            "excessBlobGas",
            "must match parent.excessBlobGas + parent.blobGasUsed - 786432, floored at 0",
            expected,
            actual,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use reth_chainspec::EthereumReleaseSpec;

    fn parent_header() -> Header {
        Header {
            number: 10,
            gas_limit: 30_000_000,
            gas_used: 15_000_000,
            base_fee_per_gas: Some(100),
            timestamp: 1_000,
            difficulty: U256::ZERO,
            nonce: B64::ZERO,
            ommers_hash: EMPTY_OMMER_ROOT_HASH,
            excess_blob_gas: Some(0),
            blob_gas_used: Some(0),
            ..Default::default()
        }
    }

    fn child_of(parent: &Header, parent_hash: BlockHash) -> Header {
        Header {
            number: parent.number + 1,
            parent_hash,
            gas_limit: parent.gas_limit,
            gas_used: 0,
            base_fee_per_gas: Some(100),
            timestamp: parent.timestamp + 1,
            difficulty: U256::ZERO,
            nonce: B64::ZERO,
            ommers_hash: EMPTY_OMMER_ROOT_HASH,
            excess_blob_gas: Some(0),
            blob_gas_used: Some(0),
            ..Default::default()
        }
    }

    /// Concrete scenario from spec.md §8 #3: parent `gas_used ==
    /// gas_limit/2` (the target) keeps `base_fee_per_gas` unchanged.
    #[test]
    fn base_fee_unchanged_at_target_utilization() {
        let validator = PostMergeHeaderValidator::new(EthereumReleaseSpec::mainnet_shaped());
        let parent = parent_header();
        let parent_hash = B256::repeat_byte(0xaa);
        let child = child_of(&parent, parent_hash);

        validator.validate_against_parent(&child, &parent, parent_hash).unwrap();
    }

    #[test]
    fn base_fee_mismatch_is_rejected() {
        let validator = PostMergeHeaderValidator::new(EthereumReleaseSpec::mainnet_shaped());
        let parent = parent_header();
        let parent_hash = B256::repeat_byte(0xaa);
        let mut child = child_of(&parent, parent_hash);
        child.base_fee_per_gas = Some(101);

        let errors = validator.validate_against_parent(&child, &parent, parent_hash).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "baseFeePerGas"));
    }

    #[test]
    fn base_fee_rises_when_parent_above_target() {
        let validator = PostMergeHeaderValidator::new(EthereumReleaseSpec::mainnet_shaped());
        let mut parent = parent_header();
        parent.gas_used = 20_000_000; // above the 15M target
        let parent_hash = B256::repeat_byte(0xbb);
        let mut child = child_of(&parent, parent_hash);
        // target = 15_000_000, used - target = 5_000_000
        // delta = 100 * 5_000_000 / 15_000_000 / 8 = 4 (floor)
        child.base_fee_per_gas = Some(104);

        validator.validate_against_parent(&child, &parent, parent_hash).unwrap();
    }

    #[test]
    fn gas_limit_adjustment_rejects_large_jump() {
        let validator = PostMergeHeaderValidator::new(EthereumReleaseSpec::mainnet_shaped());
        let parent = parent_header();
        let parent_hash = B256::repeat_byte(0xcc);
        let mut child = child_of(&parent, parent_hash);
        child.gas_limit = parent.gas_limit * 2;
        child.base_fee_per_gas = Some(100);

        let errors = validator.validate_against_parent(&child, &parent, parent_hash).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "gasLimit"));
    }

    #[test]
    fn timestamp_must_strictly_increase() {
        let validator = PostMergeHeaderValidator::new(EthereumReleaseSpec::mainnet_shaped());
        let parent = parent_header();
        let parent_hash = B256::repeat_byte(0xdd);
        let mut child = child_of(&parent, parent_hash);
        child.timestamp = parent.timestamp;

        let errors = validator.validate_against_parent(&child, &parent, parent_hash).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "timestamp"));
    }

    #[test]
    fn wrong_parent_hash_is_rejected() {
        let validator = PostMergeHeaderValidator::new(EthereumReleaseSpec::mainnet_shaped());
        let parent = parent_header();
        let parent_hash = B256::repeat_byte(0xee);
        let child = child_of(&parent, B256::repeat_byte(0xff));

        let errors = validator.validate_against_parent(&child, &parent, parent_hash).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "parentHash"));
    }
}
